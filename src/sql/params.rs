//! Ordered column -> value maps, and conversion of serde_json::Value to types sqlx can bind.

use serde_json::Value;
use sqlx::encode::{Encode, IsNull};
use sqlx::postgres::types::Oid;
use sqlx::postgres::{PgTypeInfo, Postgres};
use sqlx::{Database, Type};

/// Column -> value map that keeps insertion order. Re-inserting a key replaces
/// the value in place, so a key appears at most once.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ValueMap {
    entries: Vec<(String, Value)>,
}

impl ValueMap {
    pub fn new() -> Self {
        ValueMap { entries: Vec::new() }
    }

    /// Insert or replace; returns the previous value when the key existed.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        let pos = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(pos).1)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for ValueMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = ValueMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl IntoIterator for ValueMap {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// A value that can be bound to a PostgreSQL query. Converts from serde_json::Value.
/// No coercion beyond this: strings bind as TEXT, integers as INT8.
#[derive(Clone, Debug, PartialEq)]
pub enum PgBindValue {
    Null,
    Bool(bool),
    I64(i64),
    F64(f64),
    String(String),
    Json(Value),
}

impl PgBindValue {
    pub fn from_json(v: &Value) -> Self {
        match v {
            Value::Null => PgBindValue::Null,
            Value::Bool(b) => PgBindValue::Bool(*b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    PgBindValue::I64(i)
                } else {
                    PgBindValue::F64(n.as_f64().unwrap_or(0.0))
                }
            }
            Value::String(s) => PgBindValue::String(s.clone()),
            Value::Array(_) | Value::Object(_) => PgBindValue::Json(v.clone()),
        }
    }
}

impl<'q> Encode<'q, Postgres> for PgBindValue {
    fn encode_by_ref(
        &self,
        buf: &mut <Postgres as Database>::ArgumentBuffer<'q>,
    ) -> Result<IsNull, Box<dyn std::error::Error + Send + Sync>> {
        Ok(match self {
            PgBindValue::Null => IsNull::Yes,
            PgBindValue::Bool(b) => <bool as Encode<Postgres>>::encode_by_ref(b, buf)?,
            PgBindValue::I64(n) => <i64 as Encode<Postgres>>::encode_by_ref(n, buf)?,
            PgBindValue::F64(n) => <f64 as Encode<Postgres>>::encode_by_ref(n, buf)?,
            PgBindValue::String(s) => {
                let s_ref: &str = s.as_str();
                <&str as Encode<Postgres>>::encode_by_ref(&s_ref, buf)?
            }
            PgBindValue::Json(v) => <Value as Encode<Postgres>>::encode_by_ref(v, buf)?,
        })
    }

    fn produces(&self) -> Option<PgTypeInfo> {
        Some(match self {
            // OID 0 leaves the parameter type to the server, so NULL fits any column.
            PgBindValue::Null => PgTypeInfo::with_oid(Oid(0)),
            PgBindValue::String(_) => <String as Type<Postgres>>::type_info(),
            PgBindValue::Bool(_) => <bool as Type<Postgres>>::type_info(),
            PgBindValue::I64(_) => <i64 as Type<Postgres>>::type_info(),
            PgBindValue::F64(_) => <f64 as Type<Postgres>>::type_info(),
            PgBindValue::Json(_) => <Value as Type<Postgres>>::type_info(),
        })
    }
}

impl Type<Postgres> for PgBindValue {
    fn type_info() -> PgTypeInfo {
        <String as Type<Postgres>>::type_info()
    }

    fn compatible(_ty: &PgTypeInfo) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reinsert_keeps_position() {
        let mut m = ValueMap::new();
        m.insert("title", "a");
        m.insert("content", "b");
        let prev = m.insert("title", "c");
        assert_eq!(prev, Some(json!("a")));
        assert_eq!(m.keys().collect::<Vec<_>>(), vec!["title", "content"]);
        assert_eq!(m.get("title"), Some(&json!("c")));
    }

    #[test]
    fn remove_and_contains() {
        let mut m: ValueMap = [("id", json!(1)), ("title", json!("x"))].into_iter().collect();
        assert!(m.contains_key("id"));
        assert_eq!(m.remove("id"), Some(json!(1)));
        assert!(!m.contains_key("id"));
        assert_eq!(m.len(), 1);
    }

    #[test]
    fn bind_value_from_json() {
        assert_eq!(PgBindValue::from_json(&json!(3)), PgBindValue::I64(3));
        assert_eq!(PgBindValue::from_json(&json!(1.5)), PgBindValue::F64(1.5));
        assert_eq!(PgBindValue::from_json(&json!("x")), PgBindValue::String("x".into()));
        assert_eq!(PgBindValue::from_json(&Value::Null), PgBindValue::Null);
        assert!(matches!(PgBindValue::from_json(&json!({"a": 1})), PgBindValue::Json(_)));
    }

    #[test]
    fn null_leaves_parameter_type_unspecified() {
        let ty = PgBindValue::Null.produces();
        assert_eq!(ty, Some(PgTypeInfo::with_oid(Oid(0))));
        assert_ne!(ty, Some(<String as Type<Postgres>>::type_info()));
        assert_eq!(
            PgBindValue::String("x".into()).produces(),
            Some(<String as Type<Postgres>>::type_info())
        );
    }
}
