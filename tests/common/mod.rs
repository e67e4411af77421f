#![allow(dead_code)]

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Mutex;
use wal::{Persistable, QueryBuf, StatementExecutor};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: Option<i64>,
    pub title: String,
    pub description: String,
    pub content: String,
}

impl Persistable for Article {
    const COLUMNS: &'static [&'static str] = &["id", "title", "description", "content"];
}

pub fn article_row(id: i64, title: &str) -> Value {
    serde_json::json!({
        "id": id,
        "title": title,
        "description": "d",
        "content": "c"
    })
}

/// In-memory executor: records every statement and answers with canned rows or a driver error.
#[derive(Default)]
pub struct RecordingExecutor {
    statements: Mutex<Vec<QueryBuf>>,
    rows: Vec<Value>,
    failure: Option<String>,
}

impl RecordingExecutor {
    pub fn with_rows(rows: Vec<Value>) -> Self {
        RecordingExecutor {
            rows,
            ..Default::default()
        }
    }

    pub fn failing(message: &str) -> Self {
        RecordingExecutor {
            failure: Some(message.to_string()),
            ..Default::default()
        }
    }

    pub fn statements(&self) -> Vec<QueryBuf> {
        self.statements.lock().unwrap().clone()
    }

    fn record(&self, q: &QueryBuf) -> Result<(), sqlx::Error> {
        self.statements.lock().unwrap().push(q.clone());
        match &self.failure {
            Some(msg) => Err(sqlx::Error::Protocol(msg.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl StatementExecutor for RecordingExecutor {
    async fn fetch_all(&self, q: &QueryBuf) -> Result<Vec<Value>, sqlx::Error> {
        self.record(q)?;
        Ok(self.rows.clone())
    }

    async fn execute(&self, q: &QueryBuf) -> Result<u64, sqlx::Error> {
        self.record(q)?;
        Ok(1)
    }
}
