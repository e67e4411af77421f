//! Raw config types matching routes.json, app.json and the DB_* environment.

use serde::{Deserialize, Serialize};

/// One route: a path pattern such as `/posts/{id}` and the controller method it resolves to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteConfig {
    pub path: String,
    pub controller: String,
    pub method: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AppSettings {
    /// Shown as the layout title; passed to views as `app_name`.
    #[serde(default = "default_app_name")]
    pub app_name: String,
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Max request body in bytes (form posts).
    #[serde(default = "default_body_limit")]
    pub body_limit: usize,
}

fn default_app_name() -> String {
    "wal".into()
}

fn default_bind() -> String {
    "127.0.0.1:3000".into()
}

fn default_body_limit() -> usize {
    64 * 1024
}

impl Default for AppSettings {
    fn default() -> Self {
        AppSettings {
            app_name: default_app_name(),
            bind: default_bind(),
            body_limit: default_body_limit(),
        }
    }
}

/// Connection settings. `url` takes precedence over the individual fields.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub dbname: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

fn default_host() -> String {
    "localhost".into()
}

fn default_port() -> u16 {
    5432
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        DatabaseConfig {
            url: None,
            host: default_host(),
            port: default_port(),
            dbname: None,
            username: None,
            password: None,
        }
    }
}

/// All config in one struct for in-memory loading.
#[derive(Clone, Debug, Default)]
pub struct FullConfig {
    pub app: AppSettings,
    /// Declaration order is match priority.
    pub routes: Vec<RouteConfig>,
    pub database: DatabaseConfig,
}
