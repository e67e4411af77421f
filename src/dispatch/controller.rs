//! Controller contract: named methods invoked with route parameters, returning a view or a redirect.

use crate::error::AppError;
use crate::router::RouteParams;
use async_trait::async_trait;
use axum::http::Method;
use serde_json::Value;
use std::collections::HashMap;

/// Request data passed through to controllers untouched; none of it takes part in matching.
#[derive(Clone, Debug, Default)]
pub struct RequestContext {
    pub method: Method,
    pub path: String,
    pub query: HashMap<String, String>,
    /// urlencoded form fields from the body.
    pub form: HashMap<String, String>,
}

impl RequestContext {
    pub fn is_post(&self) -> bool {
        self.method == Method::POST
    }

    /// Form field or a bad request naming it.
    pub fn form_field(&self, name: &str) -> Result<&str, AppError> {
        self.form
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| AppError::BadRequest(format!("missing form field '{}'", name)))
    }
}

/// What a controller method produces. Rendering and redirect mechanics live in the HTTP layer.
#[derive(Clone, Debug, PartialEq)]
pub enum Reply {
    View { template: String, data: Value },
    Redirect { path: String, params: Vec<(String, String)> },
}

pub fn render_view(template: impl Into<String>, data: Value) -> Reply {
    Reply::View {
        template: template.into(),
        data,
    }
}

pub fn redirect_to_route(path: impl Into<String>, params: &[(&str, &str)]) -> Reply {
    Reply::Redirect {
        path: path.into(),
        params: params.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
    }
}

#[async_trait]
pub trait Controller: Send + Sync {
    /// Method names routes may refer to; checked against the route table at startup.
    fn methods(&self) -> &'static [&'static str];

    async fn invoke(
        &self,
        method: &str,
        params: &RouteParams,
        request: &RequestContext,
    ) -> Result<Reply, AppError>;
}

/// Error for a method name a controller does not implement.
pub fn unknown_method(controller: &str, method: &str) -> AppError {
    AppError::UnknownHandler {
        controller: controller.to_string(),
        method: method.to_string(),
    }
}
