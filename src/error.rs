//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Startup-time configuration problems. Raised while loading or validating, never per request.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("duplicate parameter '{name}' in route pattern '{pattern}'")]
    DuplicateParam { pattern: String, name: String },
    #[error("invalid parameter placeholder '{segment}' in route pattern '{pattern}'")]
    InvalidPlaceholder { pattern: String, segment: String },
    #[error("duplicate route pattern: {0}")]
    DuplicatePattern(String),
    #[error("missing reference: {kind} '{id}'")]
    MissingReference { kind: &'static str, id: String },
    #[error("config load: {0}")]
    Load(String),
    #[error("validation: {0}")]
    Validation(String),
}

/// Statement kind, carried on execution failures for logging.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    ReadOne,
    ReadMany,
    Create,
    Update,
    Delete,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::ReadOne => "read_one",
            Operation::ReadMany => "read_many",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("no route matches '{0}'")]
    NoRouteMatch(String),
    #[error("read_one on '{table}' requires at least one filter")]
    MalformedFilterSet { table: String },
    #[error("{table}: entity not found")]
    EntityNotFound { table: String },
    #[error("{operation} on '{table}' failed")]
    StatementExecution {
        operation: Operation,
        table: String,
        #[source]
        source: sqlx::Error,
    },
    #[error("unknown column '{column}' for table '{table}'")]
    UnknownColumn { table: String, column: String },
    #[error("{operation} on '{table}' has no fields to write")]
    EmptyFieldSet { operation: Operation, table: String },
    #[error("no handler '{controller}::{method}'")]
    UnknownHandler { controller: String, method: String },
    #[error("entity mapping: {0}")]
    Mapping(String),
    #[error("render: {0}")]
    Render(String),
    #[error("bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    /// True for the recoverable "nothing there" outcomes (no route, no row).
    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::NoRouteMatch(_) | AppError::EntityNotFound { .. })
    }
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            AppError::NoRouteMatch(_) => (StatusCode::NOT_FOUND, "not_found"),
            AppError::EntityNotFound { .. } => (StatusCode::NOT_FOUND, "not_found"),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            AppError::StatementExecution { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "database_error"),
            AppError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "config_error"),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        };
        if status.is_server_error() {
            tracing::error!(error = ?self, "request failed");
        }
        // Server-side failures are logged in full; clients only get the code.
        let message = if status.is_server_error() {
            "internal server error".to_string()
        } else {
            self.to_string()
        };
        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
            },
        };
        (status, Json(body)).into_response()
    }
}
