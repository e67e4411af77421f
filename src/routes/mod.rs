mod common;
mod front;

pub use common::common_routes;
pub use front::{app_router, front_routes};
