//! Parameters extracted from a matched path, handed to controllers by name.

use crate::error::AppError;
use std::collections::HashMap;
use std::str::FromStr;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RouteParams {
    values: HashMap<String, String>,
}

impl RouteParams {
    pub fn new() -> Self {
        RouteParams::default()
    }

    /// Overwrites an existing value for `name`.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Value for `name`, or a bad request naming the missing parameter.
    pub fn require(&self, name: &str) -> Result<&str, AppError> {
        self.get(name)
            .ok_or_else(|| AppError::BadRequest(format!("missing route parameter '{}'", name)))
    }

    /// Parses `name` into `T`; missing or unparseable values are bad requests.
    pub fn parse<T: FromStr>(&self, name: &str) -> Result<T, AppError> {
        let raw = self.require(name)?;
        raw.parse()
            .map_err(|_| AppError::BadRequest(format!("invalid route parameter '{}': {}", name, raw)))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
