//! Builds parameterized SELECT, INSERT, UPDATE, DELETE from an entity descriptor.
//! Table and column names are interpolated as quoted identifiers (they come from
//! entity definitions); every value is a named `:column` parameter.

use crate::entity::EntityDescriptor;
use crate::error::{AppError, Operation};
use crate::sql::{QuerySpec, SortDirection, ValueMap};
use serde_json::Value;

/// Identifier column used by update and delete.
pub const ID_COLUMN: &str = "id";

/// SQL text with `:name` placeholders and the values bound to them, in placeholder order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<(String, Value)>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, name: &str, v: Value) -> String {
        self.params.push((name.to_string(), v));
        format!(":{}", name)
    }

    pub fn param(&self, name: &str) -> Option<&Value> {
        self.params.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    pub fn param_names(&self) -> Vec<&str> {
        self.params.iter().map(|(k, _)| k.as_str()).collect()
    }

    /// Rewrites `:name` placeholders to PostgreSQL `$n` and returns the values in bind order.
    /// `::` casts are left untouched.
    pub fn to_positional(&self) -> (String, Vec<&Value>) {
        let mut sql = String::with_capacity(self.sql.len());
        let mut values: Vec<&Value> = Vec::new();
        let mut chars = self.sql.chars().peekable();
        while let Some(c) = chars.next() {
            if c != ':' {
                sql.push(c);
                continue;
            }
            match chars.peek() {
                Some(':') => {
                    sql.push_str("::");
                    chars.next();
                }
                Some(n) if is_name_char(*n) => {
                    let mut name = String::new();
                    while let Some(&n) = chars.peek() {
                        if is_name_char(n) {
                            name.push(n);
                            chars.next();
                        } else {
                            break;
                        }
                    }
                    match self.param(&name) {
                        Some(v) => {
                            values.push(v);
                            sql.push_str(&format!("${}", values.len()));
                        }
                        None => {
                            sql.push(':');
                            sql.push_str(&name);
                        }
                    }
                }
                _ => sql.push(c),
            }
        }
        (sql, values)
    }
}

/// Characters a `:name` placeholder may contain. Column names outside this set
/// cannot be bound.
fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// LIMIT and OFFSET are BIGINT in PostgreSQL.
fn check_bound(what: &str, n: u64) -> Result<u64, AppError> {
    if n > i64::MAX as u64 {
        return Err(AppError::BadRequest(format!("{} out of range: {}", what, n)));
    }
    Ok(n)
}

fn check_column(entity: &EntityDescriptor, column: &str) -> Result<(), AppError> {
    if entity.has_column(column) {
        Ok(())
    } else {
        Err(AppError::UnknownColumn {
            table: entity.table_name.clone(),
            column: column.to_string(),
        })
    }
}

/// `" WHERE a = :a AND b = :b"`, or empty when there are no filters.
fn where_clause(q: &mut QueryBuf, entity: &EntityDescriptor, filters: &ValueMap) -> Result<String, AppError> {
    let mut parts = Vec::with_capacity(filters.len());
    for (col, val) in filters.iter() {
        check_column(entity, col)?;
        let ph = q.push_param(col, val.clone());
        parts.push(format!("{} = {}", quoted(col), ph));
    }
    Ok(if parts.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", parts.join(" AND "))
    })
}

/// Dispatches on the operation kind.
pub fn build(entity: &EntityDescriptor, spec: &QuerySpec) -> Result<QueryBuf, AppError> {
    match spec.operation {
        Operation::ReadOne => select_one(entity, &spec.filters),
        Operation::ReadMany => select_many(entity, &spec.filters, &spec.order, spec.limit, spec.offset),
        Operation::Create => insert(entity, &spec.fields),
        Operation::Update => update(entity, &spec.fields, require_id(entity, spec)?),
        Operation::Delete => Ok(delete(entity, require_id(entity, spec)?)),
    }
}

fn require_id<'a>(entity: &EntityDescriptor, spec: &'a QuerySpec) -> Result<&'a Value, AppError> {
    spec.id.as_ref().filter(|v| !v.is_null()).ok_or_else(|| {
        AppError::BadRequest(format!(
            "{} on '{}' requires an id",
            spec.operation, entity.table_name
        ))
    })
}

/// SELECT * ... WHERE (all filters ANDed). At least one filter is required.
pub fn select_one(entity: &EntityDescriptor, filters: &ValueMap) -> Result<QueryBuf, AppError> {
    if filters.is_empty() {
        return Err(AppError::MalformedFilterSet {
            table: entity.table_name.clone(),
        });
    }
    let mut q = QueryBuf::new();
    let where_clause = where_clause(&mut q, entity, filters)?;
    q.sql = format!("SELECT * FROM {}{}", quoted(&entity.table_name), where_clause);
    Ok(q)
}

/// SELECT * with optional WHERE, ORDER BY, LIMIT. OFFSET is only emitted together with LIMIT.
pub fn select_many(
    entity: &EntityDescriptor,
    filters: &ValueMap,
    order: &[(String, SortDirection)],
    limit: Option<u64>,
    offset: Option<u64>,
) -> Result<QueryBuf, AppError> {
    let mut q = QueryBuf::new();
    let where_clause = where_clause(&mut q, entity, filters)?;

    let mut order_parts = Vec::with_capacity(order.len());
    for (col, dir) in order {
        check_column(entity, col)?;
        order_parts.push(format!("{} {}", quoted(col), dir.as_sql()));
    }
    let order_clause = if order_parts.is_empty() {
        String::new()
    } else {
        format!(" ORDER BY {}", order_parts.join(", "))
    };

    let limit_clause = match limit {
        Some(n) => {
            let offset_clause = match offset {
                Some(m) => format!(" OFFSET {}", check_bound("offset", m)?),
                None => String::new(),
            };
            format!(" LIMIT {}{}", check_bound("limit", n)?, offset_clause)
        }
        None => String::new(),
    };

    q.sql = format!(
        "SELECT * FROM {}{}{}{}",
        quoted(&entity.table_name),
        where_clause, order_clause, limit_clause
    );
    Ok(q)
}

/// INSERT: column list and placeholder list both follow the field map's order.
pub fn insert(entity: &EntityDescriptor, fields: &ValueMap) -> Result<QueryBuf, AppError> {
    if fields.is_empty() {
        return Err(AppError::EmptyFieldSet {
            operation: Operation::Create,
            table: entity.table_name.clone(),
        });
    }
    let mut q = QueryBuf::new();
    let mut cols = Vec::with_capacity(fields.len());
    let mut placeholders = Vec::with_capacity(fields.len());
    for (col, val) in fields.iter() {
        check_column(entity, col)?;
        cols.push(quoted(col));
        placeholders.push(q.push_param(col, val.clone()));
    }
    q.sql = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        quoted(&entity.table_name),
        cols.join(", "),
        placeholders.join(", ")
    );
    Ok(q)
}

/// UPDATE by id. An `id` entry in `fields` is never SET; the identifier is bound once, last.
pub fn update(entity: &EntityDescriptor, fields: &ValueMap, id: &Value) -> Result<QueryBuf, AppError> {
    let mut q = QueryBuf::new();
    let mut sets = Vec::with_capacity(fields.len());
    for (col, val) in fields.iter() {
        if col == ID_COLUMN {
            continue;
        }
        check_column(entity, col)?;
        let ph = q.push_param(col, val.clone());
        sets.push(format!("{} = {}", quoted(col), ph));
    }
    if sets.is_empty() {
        return Err(AppError::EmptyFieldSet {
            operation: Operation::Update,
            table: entity.table_name.clone(),
        });
    }
    let id_ph = q.push_param(ID_COLUMN, id.clone());
    q.sql = format!(
        "UPDATE {} SET {} WHERE {} = {}",
        quoted(&entity.table_name),
        sets.join(", "),
        quoted(ID_COLUMN),
        id_ph
    );
    Ok(q)
}

/// DELETE by id.
pub fn delete(entity: &EntityDescriptor, id: &Value) -> QueryBuf {
    let mut q = QueryBuf::new();
    let id_ph = q.push_param(ID_COLUMN, id.clone());
    q.sql = format!(
        "DELETE FROM {} WHERE {} = {}",
        quoted(&entity.table_name),
        quoted(ID_COLUMN),
        id_ph
    );
    q
}
