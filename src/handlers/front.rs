//! Front controller: every request not claimed by another route lands here.

use crate::dispatch::RequestContext;
use crate::error::AppError;
use crate::response::into_response;
use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::State,
    http::{Method, Uri},
    response::Response,
};
use std::collections::HashMap;

fn parse_form(bytes: &[u8]) -> HashMap<String, String> {
    url::form_urlencoded::parse(bytes).into_owned().collect()
}

/// The routed path is the `path` query parameter when present, else the URI path.
pub async fn front_controller(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    body: Bytes,
) -> Result<Response, AppError> {
    let query = uri.query().map(|q| parse_form(q.as_bytes())).unwrap_or_default();
    let path = query
        .get("path")
        .cloned()
        .unwrap_or_else(|| uri.path().to_string());
    let request = RequestContext {
        method,
        path: path.clone(),
        query,
        form: parse_form(&body),
    };
    let reply = state.dispatcher.dispatch(&path, &request).await?;
    into_response(reply, state.renderer.as_ref(), &state.settings.app_name)
}
