//! Turning controller replies into HTTP responses: views via a renderer, redirects as 303.

use crate::dispatch::Reply;
use crate::error::AppError;
use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::Value;

/// Template rendering is supplied by the application.
pub trait ViewRenderer: Send + Sync {
    fn render(&self, template: &str, data: &Value) -> Result<String, AppError>;

    fn content_type(&self) -> &'static str {
        "text/html; charset=utf-8"
    }
}

#[derive(Serialize)]
pub struct SuccessOne<T> {
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
}

/// Renders a view as `{ "data": ..., "meta": { "template": ... } }`.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonViewRenderer;

impl ViewRenderer for JsonViewRenderer {
    fn render(&self, template: &str, data: &Value) -> Result<String, AppError> {
        let body = SuccessOne {
            data,
            meta: Some(serde_json::json!({ "template": template })),
        };
        serde_json::to_string(&body).map_err(|e| AppError::Render(e.to_string()))
    }

    fn content_type(&self) -> &'static str {
        "application/json"
    }
}

/// `path?k=v&...` with keys and values form-urlencoded.
pub fn redirect_location(path: &str, params: &[(String, String)]) -> String {
    if params.is_empty() {
        return path.to_string();
    }
    let query = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params.iter())
        .finish();
    format!("{}?{}", path, query)
}

/// `app_name` is added to object view data unless the controller set it.
pub fn into_response(reply: Reply, renderer: &dyn ViewRenderer, app_name: &str) -> Result<Response, AppError> {
    match reply {
        Reply::View { template, mut data } => {
            if let Value::Object(map) = &mut data {
                map.entry("app_name").or_insert_with(|| Value::String(app_name.to_string()));
            }
            let body = renderer.render(&template, &data)?;
            Ok((StatusCode::OK, [(header::CONTENT_TYPE, renderer.content_type())], body).into_response())
        }
        Reply::Redirect { path, params } => {
            let location = redirect_location(&path, &params);
            Ok((StatusCode::SEE_OTHER, [(header::LOCATION, location)]).into_response())
        }
    }
}
