use std::collections::BTreeMap;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::storage::StorageError;
use sea_orm::DbErr;
use serde::Serialize;

/// Field name mapped to every validation message reported for it.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Structured error envelope returned by all endpoints on failure.
#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    /// HTTP status code, repeated in the body.
    #[schema(example = 400)]
    pub status_code: u16,
    /// Machine-readable error code. One of: `VALIDATION_ERROR`, `NOT_FOUND`,
    /// `INVALID_OPERATION`, `INTERNAL_ERROR`.
    #[schema(example = "VALIDATION_ERROR")]
    pub code: &'static str,
    #[schema(example = "Validation failed")]
    pub message: String,
    #[schema(example = "One or more validation errors occurred")]
    pub reason: String,
    /// Per-field error messages. Empty unless `code` is `VALIDATION_ERROR`.
    pub data: FieldErrors,
}

/// Application-level error type.
#[derive(Debug)]
pub enum AppError {
    Validation(FieldErrors),
    NotFound(String),
    /// The request cannot be served in the current context.
    InvalidOperation(String),
    Internal(String),
}

impl AppError {
    /// Validation failure on a single field.
    pub fn field(field: &str, message: impl Into<String>) -> Self {
        let mut errors = FieldErrors::new();
        errors.insert(field.to_string(), vec![message.into()]);
        AppError::Validation(errors)
    }

    fn status_and_body(self) -> (StatusCode, ErrorBody) {
        match self {
            AppError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    status_code: StatusCode::BAD_REQUEST.as_u16(),
                    code: "VALIDATION_ERROR",
                    message: "Validation failed".into(),
                    reason: "One or more validation errors occurred".into(),
                    data: errors,
                },
            ),
            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                ErrorBody {
                    status_code: StatusCode::NOT_FOUND.as_u16(),
                    code: "NOT_FOUND",
                    message: msg,
                    reason: "The requested resource does not exist".into(),
                    data: FieldErrors::new(),
                },
            ),
            AppError::InvalidOperation(detail) => {
                tracing::error!("Invalid operation: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        status_code: StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
                        code: "INVALID_OPERATION",
                        message: "An error occurred while processing your request".into(),
                        reason: detail,
                        data: FieldErrors::new(),
                    },
                )
            }
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        status_code: StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
                        code: "INTERNAL_ERROR",
                        message: "An error occurred while processing your request".into(),
                        reason: detail,
                        data: FieldErrors::new(),
                    },
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        (status, Json(body)).into_response()
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::InvalidName(name) => {
                AppError::field("file_name", format!("Invalid file name: {name}"))
            }
            other => AppError::Internal(other.to_string()),
        }
    }
}
