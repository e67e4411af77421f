//! QuerySpec: what to read or write, independent of any entity.

use crate::error::{AppError, Operation};
use crate::sql::ValueMap;
use serde_json::Value;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

impl FromStr for SortDirection {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(AppError::BadRequest(format!(
                "invalid sort direction: {} (expected ASC or DESC)",
                s
            ))),
        }
    }
}

/// One read or write against a single table.
///
/// Filters are equality-only and ANDed. `offset` is ignored unless `limit` is set.
#[derive(Clone, Debug, PartialEq)]
pub struct QuerySpec {
    pub operation: Operation,
    pub filters: ValueMap,
    pub order: Vec<(String, SortDirection)>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
    /// Values to persist (create/update).
    pub fields: ValueMap,
    /// Row identifier (update/delete).
    pub id: Option<Value>,
}

impl QuerySpec {
    fn new(operation: Operation) -> Self {
        QuerySpec {
            operation,
            filters: ValueMap::new(),
            order: Vec::new(),
            limit: None,
            offset: None,
            fields: ValueMap::new(),
            id: None,
        }
    }

    pub fn read_one(filters: ValueMap) -> Self {
        QuerySpec {
            filters,
            ..Self::new(Operation::ReadOne)
        }
    }

    pub fn read_many() -> Self {
        Self::new(Operation::ReadMany)
    }

    pub fn create(fields: ValueMap) -> Self {
        QuerySpec {
            fields,
            ..Self::new(Operation::Create)
        }
    }

    pub fn update(fields: ValueMap, id: impl Into<Value>) -> Self {
        QuerySpec {
            fields,
            id: Some(id.into()),
            ..Self::new(Operation::Update)
        }
    }

    pub fn delete(id: impl Into<Value>) -> Self {
        QuerySpec {
            id: Some(id.into()),
            ..Self::new(Operation::Delete)
        }
    }

    pub fn filter(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.insert(column, value);
        self
    }

    pub fn filters(mut self, filters: ValueMap) -> Self {
        for (k, v) in filters {
            self.filters.insert(k, v);
        }
        self
    }

    /// Appends a sort key; a repeated column keeps its first position and takes the new direction.
    pub fn order_by(mut self, column: impl Into<String>, direction: SortDirection) -> Self {
        let column = column.into();
        match self.order.iter_mut().find(|(c, _)| *c == column) {
            Some((_, dir)) => *dir = direction,
            None => self.order.push((column, direction)),
        }
        self
    }

    pub fn limit(mut self, limit: Option<u64>) -> Self {
        self.limit = limit;
        self
    }

    pub fn offset(mut self, offset: Option<u64>) -> Self {
        self.offset = offset;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_direction_case_insensitively() {
        assert_eq!("ASC".parse::<SortDirection>().unwrap(), SortDirection::Asc);
        assert_eq!("desc".parse::<SortDirection>().unwrap(), SortDirection::Desc);
        assert!("up".parse::<SortDirection>().is_err());
    }

    #[test]
    fn repeated_order_column_is_replaced() {
        let spec = QuerySpec::read_many()
            .order_by("title", SortDirection::Asc)
            .order_by("id", SortDirection::Desc)
            .order_by("title", SortDirection::Desc);
        assert_eq!(
            spec.order,
            vec![
                ("title".to_string(), SortDirection::Desc),
                ("id".to_string(), SortDirection::Desc)
            ]
        );
    }
}
