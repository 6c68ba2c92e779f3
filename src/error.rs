//! Typed errors and HTTP mapping.

use crate::response::error_body;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Failures while building the explorer. Fatal: the service is not constructed.
#[derive(Error, Debug)]
pub enum StartupError {
    #[error("list tables: {0}")]
    ListTables(#[source] sqlx::Error),
    #[error("read columns of table {table}: {source}")]
    Columns {
        table: String,
        #[source]
        source: sqlx::Error,
    },
    #[error("route pattern: {0}")]
    Pattern(#[from] regex::Error),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("unknown table")]
    UnknownTable,
    #[error("record not found")]
    NotFound,
    #[error("field {0} have invalid type")]
    InvalidField(String),
    #[error("{0}")]
    MalformedPayload(String),
    #[error("payload too large")]
    PayloadTooLarge,
    /// Table is in the name set but has no cached columns.
    #[error("no columns cached for table {0}")]
    MissingColumns(String),
    /// Table has no primary key or a composite one.
    #[error("table {table} has {found} primary key columns, expected exactly one")]
    PrimaryKey { table: String, found: usize },
    /// Statement rejected by the engine on a write path.
    #[error("{0}")]
    Execution(#[source] sqlx::Error),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::UnknownTable | AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::InvalidField(_) | AppError::MalformedPayload(_) | AppError::Execution(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::MissingColumns(_) | AppError::PrimaryKey { .. } | AppError::Db(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "request failed");
            return status.into_response();
        }
        if let AppError::Execution(e) = &self {
            tracing::warn!(error = %e, "statement rejected");
        }
        (status, error_body(self.to_string())).into_response()
    }
}
