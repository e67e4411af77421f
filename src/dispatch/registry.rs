//! Controllers by name.

use crate::dispatch::Controller;
use crate::error::ConfigError;
use crate::router::RouteTable;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Clone, Default)]
pub struct HandlerRegistry {
    by_name: HashMap<String, Arc<dyn Controller>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        HandlerRegistry::default()
    }

    pub fn register(mut self, name: impl Into<String>, controller: impl Controller + 'static) -> Self {
        self.by_name.insert(name.into(), Arc::new(controller));
        self
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Controller>> {
        self.by_name.get(name)
    }

    /// Every route must name a registered controller and one of its methods.
    pub fn check_routes(&self, routes: &RouteTable) -> Result<(), ConfigError> {
        for route in routes.routes() {
            let handler = &route.handler;
            let controller = self.get(&handler.controller).ok_or_else(|| ConfigError::MissingReference {
                kind: "controller",
                id: handler.controller.clone(),
            })?;
            if !controller.methods().iter().any(|m| *m == handler.method) {
                return Err(ConfigError::MissingReference {
                    kind: "method",
                    id: format!("{}::{}", handler.controller, handler.method),
                });
            }
        }
        Ok(())
    }
}
