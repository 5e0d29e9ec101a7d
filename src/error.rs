//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Environment configuration could not be turned into an `AppConfig`.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}'")]
    InvalidValue { key: &'static str, value: String },
}

/// Product type seed data could not be read or normalized. Fatal at startup.
#[derive(Error, Debug)]
pub enum SeedError {
    #[error("read seed file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("parse seed yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("product type {id}: metadata_schema is not valid JSON: {source}")]
    MetadataSchema {
        id: i32,
        #[source]
        source: serde_json::Error,
    },
    #[error("seed database write: {0}")]
    Db(#[from] sqlx::Error),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),
    #[error("validation: {0}")]
    Validation(String),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    /// Request rejected before reaching a handler; carries the status axum chose.
    #[error("{1}")]
    Rejected(StatusCode, String),
}

impl AppError {
    pub fn comparison_not_found() -> Self {
        AppError::NotFound("Comparison not found".into())
    }

    pub fn product_not_found() -> Self {
        AppError::NotFound("Product not found".into())
    }

    pub fn product_type_not_found() -> Self {
        AppError::NotFound("Product type not found".into())
    }

    /// True when the underlying database error is a foreign key violation.
    pub fn is_foreign_key_violation(&self) -> bool {
        match self {
            AppError::Db(e) => e
                .as_database_error()
                .map(|d| d.is_foreign_key_violation())
                .unwrap_or(false),
            _ => false,
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorDetail {
    #[schema(example = "not_found")]
    pub code: String,
    #[schema(example = "Comparison not found")]
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub details: Option<serde_json::Value>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            AppError::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "validation_error"),
            AppError::Db(e) => {
                if let sqlx::Error::RowNotFound = e {
                    (StatusCode::NOT_FOUND, "not_found")
                } else {
                    tracing::error!(error = %e, "database error");
                    (StatusCode::INTERNAL_SERVER_ERROR, "database_error")
                }
            }
            AppError::Conflict(_) => (StatusCode::CONFLICT, "conflict"),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            AppError::Rejected(status, _) => (*status, rejection_code(*status)),
        };
        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
                details: None,
            },
        };
        (status, Json(body)).into_response()
    }
}

fn rejection_code(status: StatusCode) -> &'static str {
    match status {
        StatusCode::PAYLOAD_TOO_LARGE => "payload_too_large",
        StatusCode::UNSUPPORTED_MEDIA_TYPE => "unsupported_media_type",
        s if s.is_server_error() => "internal_error",
        _ => "bad_request",
    }
}
