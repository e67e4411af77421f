//! Front controller mounted as the fallback, so the route table sees every other path.

use crate::handlers::front_controller;
use crate::state::AppState;
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;

pub fn front_routes(state: AppState) -> Router {
    let limit = state.settings.body_limit;
    Router::new()
        .fallback(front_controller)
        .layer(RequestBodyLimitLayer::new(limit))
        .with_state(state)
}

/// Common routes plus the front controller.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .merge(crate::routes::common_routes())
        .merge(front_routes(state))
}
