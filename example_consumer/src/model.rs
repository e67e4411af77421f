use serde::{Deserialize, Serialize};
use wal::Persistable;

/// Stored in table `article`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Article {
    pub id: Option<i64>,
    pub title: String,
    pub description: String,
    pub content: String,
}

impl Persistable for Article {
    const COLUMNS: &'static [&'static str] = &["id", "title", "description", "content"];
}
