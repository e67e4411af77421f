//! wal: minimal path router and generic CRUD data mapper.

pub mod config;
pub mod dispatch;
pub mod entity;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod naming;
pub mod response;
pub mod router;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;

pub use config::{load_from_dir, resolve, AppSettings, DatabaseConfig, FullConfig, RouteConfig};
pub use dispatch::{redirect_to_route, render_view, Controller, Dispatcher, HandlerRegistry, Reply, RequestContext};
pub use entity::{EntityDescriptor, Persistable};
pub use error::{AppError, ConfigError, Operation};
pub use logging::init_tracing;
pub use response::{JsonViewRenderer, ViewRenderer};
pub use router::{match_path, RouteMatch, RouteParams, RouteTable};
pub use routes::{app_router, common_routes, front_routes};
pub use service::{EntityManager, PgExecutor, StatementExecutor};
pub use sql::{build, QueryBuf, QuerySpec, SortDirection, ValueMap};
pub use state::AppState;
