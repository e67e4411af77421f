//! Example blog on wal: routes from config/routes.json, articles in PostgreSQL.
//!
//! Run from repo root: `cargo run -p example-consumer`
//! Set `DATABASE_URL` (or DB_HOST / DB_PORT / DB_NAME / DB_USER / DB_PASSWORD) and optionally `CONFIG_PATH`.

mod controllers;
mod model;

use controllers::{ArticleController, MainController};
use tokio::net::TcpListener;
use wal::{app_router, init_tracing, load_from_dir, resolve, AppState, Dispatcher, EntityManager, HandlerRegistry, PgExecutor};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    init_tracing("wal=info,example_consumer=info");

    let config_dir = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "example_consumer/config".into());
    let config = load_from_dir(&config_dir).await?;
    let routes = resolve(&config)?;
    let executor = PgExecutor::from_config(&config.database)?;

    let handlers = HandlerRegistry::new()
        .register(
            "MainController",
            MainController {
                title: config.app.app_name.clone(),
            },
        )
        .register(
            "ArticleController",
            ArticleController {
                articles: EntityManager::new(executor),
            },
        );
    let dispatcher = Dispatcher::new(routes, handlers)?;
    let state = AppState::new(dispatcher, config.app.clone());

    let listener = TcpListener::bind(&config.app.bind).await?;
    tracing::info!("{} listening on http://{}", config.app.app_name, listener.local_addr()?);
    axum::serve(listener, app_router(state)).await?;
    Ok(())
}
