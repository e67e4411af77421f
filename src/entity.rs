//! Persistable entities: one type = one table, fields = columns.

use crate::error::AppError;
use crate::naming;
use crate::sql::{ValueMap, ID_COLUMN};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

/// Table name plus ordered column list for one entity type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntityDescriptor {
    pub table_name: String,
    pub columns: Vec<String>,
}

impl EntityDescriptor {
    pub fn new<S: AsRef<str>>(table_name: impl Into<String>, columns: &[S]) -> Self {
        EntityDescriptor {
            table_name: table_name.into(),
            columns: columns.iter().map(|c| c.as_ref().to_string()).collect(),
        }
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }
}

/// Capability for types stored in a table named after the type.
///
/// The table is the lowercased unqualified type name and the columns are
/// `COLUMNS` verbatim; no renaming layer. Rows are mapped back through serde,
/// so field names must match column names.
pub trait Persistable: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Column names in declaration order, including `id`. Names are letters,
    /// digits and `_`; anything else cannot be bound as a `:name` parameter.
    const COLUMNS: &'static [&'static str];

    fn table_name() -> String {
        naming::table_name_of::<Self>()
    }

    fn descriptor() -> EntityDescriptor {
        EntityDescriptor::new(Self::table_name(), Self::COLUMNS)
    }

    /// Identifier value, `None` when not yet persisted.
    fn id(&self) -> Result<Option<Value>, AppError> {
        let value = serde_json::to_value(self).map_err(|e| AppError::Mapping(e.to_string()))?;
        Ok(value.get(ID_COLUMN).filter(|v| !v.is_null()).cloned())
    }

    /// Values to persist, in `COLUMNS` order, without the identifier.
    fn fields(&self) -> Result<ValueMap, AppError> {
        let value = serde_json::to_value(self).map_err(|e| AppError::Mapping(e.to_string()))?;
        let Value::Object(mut obj) = value else {
            return Err(AppError::Mapping(format!(
                "{} does not serialize to an object",
                Self::table_name()
            )));
        };
        let mut out = ValueMap::new();
        for col in Self::COLUMNS.iter().filter(|c| **c != ID_COLUMN) {
            if let Some(v) = obj.remove(*col) {
                out.insert(*col, v);
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Serialize, Deserialize)]
    struct Article {
        id: Option<i64>,
        title: String,
        description: String,
        content: String,
    }

    impl Persistable for Article {
        const COLUMNS: &'static [&'static str] = &["id", "title", "description", "content"];
    }

    fn sample(id: Option<i64>) -> Article {
        Article {
            id,
            title: "T".into(),
            description: "D".into(),
            content: "C".into(),
        }
    }

    #[test]
    fn descriptor_uses_lowercased_type_name() {
        let d = Article::descriptor();
        assert_eq!(d.table_name, "article");
        assert_eq!(d.columns, vec!["id", "title", "description", "content"]);
        assert!(d.has_column("title"));
        assert!(!d.has_column("author"));
    }

    #[test]
    fn fields_follow_column_order_and_skip_id() {
        let fields = sample(Some(4)).fields().unwrap();
        assert_eq!(fields.keys().collect::<Vec<_>>(), vec!["title", "description", "content"]);
        assert_eq!(fields.get("content"), Some(&json!("C")));
    }

    #[test]
    fn id_is_none_until_persisted() {
        assert_eq!(sample(None).id().unwrap(), None);
        assert_eq!(sample(Some(9)).id().unwrap(), Some(json!(9)));
    }
}
