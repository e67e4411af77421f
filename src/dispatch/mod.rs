//! Dispatcher: match the path, find the controller, invoke the named method.

mod controller;
mod registry;

pub use controller::{redirect_to_route, render_view, unknown_method, Controller, Reply, RequestContext};
pub use registry::HandlerRegistry;

use crate::error::{AppError, ConfigError};
use crate::router::RouteTable;
use std::sync::Arc;

#[derive(Clone)]
pub struct Dispatcher {
    routes: Arc<RouteTable>,
    handlers: Arc<HandlerRegistry>,
}

impl Dispatcher {
    /// Fails when a route names a controller or method that is not registered.
    pub fn new(routes: RouteTable, handlers: HandlerRegistry) -> Result<Self, ConfigError> {
        handlers.check_routes(&routes)?;
        Ok(Dispatcher {
            routes: Arc::new(routes),
            handlers: Arc::new(handlers),
        })
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    pub async fn dispatch(&self, path: &str, request: &RequestContext) -> Result<Reply, AppError> {
        let Some(m) = self.routes.resolve(path) else {
            tracing::warn!(path = %path, "no route");
            return Err(AppError::NoRouteMatch(path.to_string()));
        };
        let controller = self.handlers.get(&m.handler.controller).ok_or_else(|| AppError::UnknownHandler {
            controller: m.handler.controller.clone(),
            method: m.handler.method.clone(),
        })?;
        tracing::debug!(
            path = %path,
            pattern = %m.pattern,
            controller = %m.handler.controller,
            method = %m.handler.method,
            "dispatch"
        );
        controller.invoke(&m.handler.method, &m.params, request).await
    }
}
