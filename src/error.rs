/// Error taxonomy shared by the storage layer and HTTP handlers
///
/// Storage functions return `ApiResult` so handlers can propagate with `?`.
/// Each variant maps onto exactly one HTTP status; storage failures are logged
/// and answered with a generic message.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use sqlx::error::ErrorKind;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Referenced entity is absent
    #[error("{0}")]
    NotFound(String),

    /// Malformed or semantically invalid input
    #[error("{0}")]
    Validation(String),

    /// Uniqueness violation, or a delete blocked by referencing rows
    #[error("{0}")]
    Conflict(String),

    /// Unexpected persistence failure; the transaction in flight has been rolled back
    #[error("storage failure: {0}")]
    Storage(#[from] sqlx::Error),
}

impl ApiError {
    pub fn not_found(entity: &str, id: i64) -> Self {
        ApiError::NotFound(format!("{} {} not found", entity, id))
    }

    /// Classify a failed INSERT or UPDATE
    pub fn from_write(err: sqlx::Error, entity: &str) -> Self {
        match constraint_kind(&err) {
            Some(ErrorKind::UniqueViolation) => {
                ApiError::Conflict(format!("{} already exists", entity))
            }
            Some(ErrorKind::ForeignKeyViolation) => {
                ApiError::Validation(format!("{} references a row that does not exist", entity))
            }
            Some(ErrorKind::CheckViolation) | Some(ErrorKind::NotNullViolation) => {
                ApiError::Validation(format!("{} has invalid field values", entity))
            }
            _ => ApiError::Storage(err),
        }
    }

    /// Classify a failed DELETE; foreign keys never cascade, so a referenced row stays put
    pub fn from_delete(err: sqlx::Error, entity: &str, id: i64) -> Self {
        match constraint_kind(&err) {
            Some(ErrorKind::ForeignKeyViolation) => ApiError::Conflict(format!(
                "{} {} is still referenced by other rows; remove those first",
                entity, id
            )),
            _ => ApiError::Storage(err),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Unreadable JSON bodies are input errors like any other
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(format!("invalid request body: {}", rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Validation(format!("invalid query string: {}", rejection.body_text()))
    }
}

fn constraint_kind(err: &sqlx::Error) -> Option<ErrorKind> {
    match err {
        sqlx::Error::Database(db_err) => Some(db_err.kind()),
        _ => None,
    }
}

/// Convert ApiError to HTTP response
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            ApiError::Storage(e) => {
                tracing::error!("❌ Storage failure: {}", e);
                "internal storage failure".to_string()
            }
            other => {
                tracing::debug!("Request rejected ({}): {}", status, other);
                other.to_string()
            }
        };

        let body = serde_json::json!({ "error": message });

        (
            status,
            [(header::CONTENT_TYPE, "application/json")],
            body.to_string(),
        )
            .into_response()
    }
}
