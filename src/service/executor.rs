//! Statement execution against PostgreSQL: one connection per statement, rows as JSON objects.

use crate::config::DatabaseConfig;
use crate::error::{AppError, ConfigError};
use crate::sql::{PgBindValue, QueryBuf};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use sqlx::postgres::{PgConnectOptions, PgConnection, PgRow};
use sqlx::{ConnectOptions, Connection};
use std::str::FromStr;
use std::sync::Arc;

/// Runs built statements. Rows come back as JSON objects keyed by column name.
#[async_trait]
pub trait StatementExecutor: Send + Sync {
    async fn fetch_all(&self, q: &QueryBuf) -> Result<Vec<Value>, sqlx::Error>;

    async fn fetch_optional(&self, q: &QueryBuf) -> Result<Option<Value>, sqlx::Error> {
        Ok(self.fetch_all(q).await?.into_iter().next())
    }

    /// Returns rows affected.
    async fn execute(&self, q: &QueryBuf) -> Result<u64, sqlx::Error>;
}

#[async_trait]
impl<T: StatementExecutor + ?Sized> StatementExecutor for Arc<T> {
    async fn fetch_all(&self, q: &QueryBuf) -> Result<Vec<Value>, sqlx::Error> {
        (**self).fetch_all(q).await
    }

    async fn fetch_optional(&self, q: &QueryBuf) -> Result<Option<Value>, sqlx::Error> {
        (**self).fetch_optional(q).await
    }

    async fn execute(&self, q: &QueryBuf) -> Result<u64, sqlx::Error> {
        (**self).execute(q).await
    }
}

/// Opens a fresh connection for every statement and closes it afterwards, success or not.
#[derive(Clone, Debug)]
pub struct PgExecutor {
    options: PgConnectOptions,
}

impl PgExecutor {
    pub fn new(options: PgConnectOptions) -> Self {
        PgExecutor { options }
    }

    /// `url` wins when set; otherwise host/port/dbname/credentials are applied one by one.
    pub fn from_config(config: &DatabaseConfig) -> Result<Self, ConfigError> {
        if let Some(url) = config.url.as_deref().filter(|s| !s.is_empty()) {
            let options = PgConnectOptions::from_str(url).map_err(|e| ConfigError::Load(e.to_string()))?;
            return Ok(PgExecutor::new(options));
        }
        let mut options = PgConnectOptions::new().host(&config.host).port(config.port);
        if let Some(db) = &config.dbname {
            options = options.database(db);
        }
        if let Some(user) = &config.username {
            options = options.username(user);
        }
        if let Some(password) = &config.password {
            options = options.password(password);
        }
        Ok(PgExecutor::new(options))
    }

    async fn connect(&self) -> Result<PgConnection, sqlx::Error> {
        self.options.connect().await
    }

    async fn close(conn: PgConnection) {
        if let Err(e) = conn.close().await {
            tracing::warn!(error = %e, "closing connection");
        }
    }
}

#[async_trait]
impl StatementExecutor for PgExecutor {
    async fn fetch_all(&self, q: &QueryBuf) -> Result<Vec<Value>, sqlx::Error> {
        let (sql, values) = q.to_positional();
        tracing::debug!(sql = %sql, params = ?values, "query");
        let mut conn = self.connect().await?;
        let mut query = sqlx::query(&sql);
        for v in &values {
            query = query.bind(PgBindValue::from_json(v));
        }
        let result = query.fetch_all(&mut conn).await;
        Self::close(conn).await;
        Ok(result?.iter().map(row_to_json).collect())
    }

    async fn fetch_optional(&self, q: &QueryBuf) -> Result<Option<Value>, sqlx::Error> {
        let (sql, values) = q.to_positional();
        tracing::debug!(sql = %sql, params = ?values, "query");
        let mut conn = self.connect().await?;
        let mut query = sqlx::query(&sql);
        for v in &values {
            query = query.bind(PgBindValue::from_json(v));
        }
        let result = query.fetch_optional(&mut conn).await;
        Self::close(conn).await;
        Ok(result?.map(|r| row_to_json(&r)))
    }

    async fn execute(&self, q: &QueryBuf) -> Result<u64, sqlx::Error> {
        let (sql, values) = q.to_positional();
        tracing::debug!(sql = %sql, params = ?values, "execute");
        let mut conn = self.connect().await?;
        let mut query = sqlx::query(&sql);
        for v in &values {
            query = query.bind(PgBindValue::from_json(v));
        }
        let result = query.execute(&mut conn).await;
        Self::close(conn).await;
        Ok(result?.rows_affected())
    }
}

/// Deserialize one row into an entity.
pub fn map_row<E: DeserializeOwned>(row: Value) -> Result<E, AppError> {
    serde_json::from_value(row).map_err(|e| AppError::Mapping(e.to_string()))
}

/// Deserialize rows into entities, keeping row order.
pub fn map_rows<E: DeserializeOwned>(rows: Vec<Value>) -> Result<Vec<E>, AppError> {
    rows.into_iter().map(map_row).collect()
}

fn row_to_json(row: &PgRow) -> Value {
    use sqlx::Column;
    use sqlx::Row;
    let mut map = serde_json::Map::new();
    for col in row.columns() {
        let name = col.name();
        let v = cell_to_value(row, name);
        map.insert(name.to_string(), v);
    }
    Value::Object(map)
}

fn cell_to_value(row: &PgRow, name: &str) -> Value {
    use sqlx::Row;
    if let Ok(Some(n)) = row.try_get::<Option<i16>, _>(name) {
        return Value::Number(n.into());
    }
    if let Ok(Some(n)) = row.try_get::<Option<i32>, _>(name) {
        return Value::Number(n.into());
    }
    if let Ok(Some(n)) = row.try_get::<Option<i64>, _>(name) {
        return Value::Number(n.into());
    }
    if let Ok(Some(n)) = row.try_get::<Option<f32>, _>(name) {
        if let Some(n) = serde_json::Number::from_f64(n as f64) {
            return Value::Number(n);
        }
    }
    if let Ok(Some(n)) = row.try_get::<Option<f64>, _>(name) {
        if let Some(n) = serde_json::Number::from_f64(n) {
            return Value::Number(n);
        }
    }
    if let Ok(Some(b)) = row.try_get::<Option<bool>, _>(name) {
        return Value::Bool(b);
    }
    if let Ok(Some(u)) = row.try_get::<Option<uuid::Uuid>, _>(name) {
        return Value::String(u.to_string());
    }
    if let Ok(Some(d)) = row.try_get::<Option<chrono::DateTime<chrono::Utc>>, _>(name) {
        return Value::String(d.to_rfc3339());
    }
    if let Ok(Some(d)) = row.try_get::<Option<chrono::NaiveDateTime>, _>(name) {
        return Value::String(d.format("%Y-%m-%dT%H:%M:%S%.f").to_string());
    }
    if let Ok(Some(d)) = row.try_get::<Option<chrono::NaiveDate>, _>(name) {
        return Value::String(d.format("%Y-%m-%d").to_string());
    }
    if let Ok(Some(s)) = row.try_get::<Option<String>, _>(name) {
        return Value::String(s);
    }
    if let Ok(Some(j)) = row.try_get::<Option<Value>, _>(name) {
        return j;
    }
    Value::Null
}
