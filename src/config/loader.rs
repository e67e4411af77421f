//! Load config from a directory (routes.json, app.json) and the environment, then resolve the route table.

use crate::config::types::*;
use crate::config::validate;
use crate::error::ConfigError;
use crate::router::RouteTable;
use std::path::Path;

/// Validate and build the route table. Call once at startup.
pub fn resolve(config: &FullConfig) -> Result<RouteTable, ConfigError> {
    validate(config)?;
    let table = RouteTable::from_config(&config.routes);
    tracing::info!(routes = table.len(), "route table loaded");
    Ok(table)
}

/// Routes from a JSON array of `{ "path", "controller", "method" }`. Array order is kept.
pub fn parse_routes(json: &str) -> Result<Vec<RouteConfig>, ConfigError> {
    serde_json::from_str(json).map_err(|e| ConfigError::Load(format!("routes: {}", e)))
}

/// Reads `routes.json` (required) and `app.json` (optional) from `dir`; database settings come from env.
pub async fn load_from_dir(dir: impl AsRef<Path>) -> Result<FullConfig, ConfigError> {
    let dir = dir.as_ref();
    let routes_path = dir.join("routes.json");
    let routes_json = tokio::fs::read_to_string(&routes_path)
        .await
        .map_err(|e| ConfigError::Load(format!("{}: {}", routes_path.display(), e)))?;
    let routes = parse_routes(&routes_json)?;

    let app = match tokio::fs::read_to_string(dir.join("app.json")).await {
        Ok(s) => serde_json::from_str(&s).map_err(|e| ConfigError::Load(format!("app: {}", e)))?,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => AppSettings::default(),
        Err(e) => return Err(ConfigError::Load(format!("app.json: {}", e))),
    };

    Ok(FullConfig {
        app,
        routes,
        database: database_from_env()?,
    })
}

/// `DATABASE_URL`, or `DB_HOST` / `DB_PORT` / `DB_NAME` / `DB_USER` / `DB_PASSWORD`.
/// A `.env` file in the working directory is read first when present.
pub fn database_from_env() -> Result<DatabaseConfig, ConfigError> {
    dotenvy::dotenv().ok();
    database_from_lookup(|key| std::env::var(key).ok())
}

fn database_from_lookup<F>(get: F) -> Result<DatabaseConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut db = DatabaseConfig {
        url: get("DATABASE_URL").filter(|s| !s.is_empty()),
        ..DatabaseConfig::default()
    };
    if let Some(host) = get("DB_HOST") {
        db.host = host;
    }
    if let Some(port) = get("DB_PORT") {
        db.port = port
            .parse()
            .map_err(|_| ConfigError::Validation(format!("DB_PORT is not a port number: {}", port)))?;
    }
    db.dbname = get("DB_NAME");
    db.username = get("DB_USER");
    db.password = get("DB_PASSWORD");
    Ok(db)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn routes_keep_declaration_order() {
        let routes = parse_routes(
            r#"[
                {"path": "/posts/new", "controller": "ArticleController", "method": "add"},
                {"path": "/posts/{id}", "controller": "ArticleController", "method": "show"}
            ]"#,
        )
        .unwrap();
        assert_eq!(routes[0].path, "/posts/new");
        assert_eq!(routes[1].method, "show");
    }

    #[test]
    fn malformed_routes_are_load_errors() {
        assert!(matches!(parse_routes("{}").unwrap_err(), ConfigError::Load(_)));
    }

    #[test]
    fn resolve_fails_at_startup_on_bad_table() {
        let config = FullConfig {
            routes: vec![RouteConfig {
                path: "/a/{x}/{x}".into(),
                controller: "C".into(),
                method: "m".into(),
            }],
            ..FullConfig::default()
        };
        assert!(matches!(resolve(&config).unwrap_err(), ConfigError::DuplicateParam { .. }));
    }

    #[test]
    fn database_settings_from_lookup() {
        let env: HashMap<&str, &str> = [("DB_HOST", "db"), ("DB_PORT", "5433"), ("DB_NAME", "blog")].into();
        let db = database_from_lookup(|k| env.get(k).map(|s| s.to_string())).unwrap();
        assert_eq!(db.host, "db");
        assert_eq!(db.port, 5433);
        assert_eq!(db.dbname.as_deref(), Some("blog"));
        assert!(db.url.is_none());
    }

    #[test]
    fn bad_port_is_rejected() {
        let err = database_from_lookup(|k| (k == "DB_PORT").then(|| "abc".to_string())).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[tokio::test]
    async fn missing_routes_file_is_a_load_error() {
        let err = load_from_dir("/nonexistent/wal-config").await.unwrap_err();
        assert!(matches!(err, ConfigError::Load(_)));
    }
}
