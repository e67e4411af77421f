//! Route table: ordered patterns and the handler each resolves to. Read-only after startup.

use crate::config::RouteConfig;
use crate::router::{match_path, RouteMatch, RoutePattern};

/// Controller name plus method name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HandlerRef {
    pub controller: String,
    pub method: String,
}

#[derive(Clone, Debug)]
pub struct Route {
    pub pattern: RoutePattern,
    pub handler: HandlerRef,
}

#[derive(Clone, Debug, Default)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn new(routes: Vec<Route>) -> Self {
        RouteTable { routes }
    }

    /// Builds the table in config order without validating; see `config::resolve`.
    pub fn from_config(routes: &[RouteConfig]) -> Self {
        RouteTable::new(
            routes
                .iter()
                .map(|r| Route {
                    pattern: RoutePattern::parse(&r.path),
                    handler: HandlerRef {
                        controller: r.controller.clone(),
                        method: r.method.clone(),
                    },
                })
                .collect(),
        )
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn resolve(&self, path: &str) -> Option<RouteMatch> {
        match_path(path, self)
    }
}
