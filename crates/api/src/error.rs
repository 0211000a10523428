use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use rolodex_core::error::CoreError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `rolodex_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

/// Body of an error response before serialization.
struct ErrorBody {
    status: StatusCode,
    code: &'static str,
    message: String,
    details: Option<serde_json::Value>,
}

impl ErrorBody {
    fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
            details: None,
        }
    }

    fn internal() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "INTERNAL_ERROR",
            "An internal error occurred",
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => ErrorBody::new(
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Ambiguous { entity, id, count } => {
                    tracing::error!(entity, id, count, "Id lookup matched more than one row");
                    ErrorBody::new(
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "AMBIGUOUS_MATCH",
                        format!("{entity} with id {id} matched {count} rows"),
                    )
                }
                CoreError::Validation(errors) => ErrorBody {
                    details: Some(json!(errors)),
                    ..ErrorBody::new(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", core.to_string())
                },
                CoreError::Conflict(msg) => {
                    ErrorBody::new(StatusCode::CONFLICT, "CONFLICT", msg.clone())
                }
            },

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => {
                ErrorBody::new(StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone())
            }
        };

        let mut payload = json!({
            "error": body.message,
            "code": body.code,
        });
        if let Some(details) = body.details {
            payload["details"] = details;
        }

        (body.status, axum::Json(payload)).into_response()
    }
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Foreign key violations (`23503`) map to 409: the row is still referenced.
/// - Unique constraint violations (`23505`) map to 409.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> ErrorBody {
    match err {
        sqlx::Error::RowNotFound => {
            ErrorBody::new(StatusCode::NOT_FOUND, "NOT_FOUND", "Resource not found")
        }
        sqlx::Error::Database(db_err) => match db_err.code().as_deref() {
            Some("23503") => {
                tracing::warn!(
                    constraint = db_err.constraint().unwrap_or("unknown"),
                    "Foreign key violation"
                );
                ErrorBody::new(
                    StatusCode::CONFLICT,
                    "CONFLICT",
                    "Cannot delete: dependent records exist",
                )
            }
            Some("23505") => {
                let constraint = db_err.constraint().unwrap_or("unknown");
                ErrorBody::new(
                    StatusCode::CONFLICT,
                    "CONFLICT",
                    format!("Duplicate value violates unique constraint: {constraint}"),
                )
            }
            _ => {
                tracing::error!(error = %db_err, "Database error");
                ErrorBody::internal()
            }
        },
        other => {
            tracing::error!(error = %other, "Database error");
            ErrorBody::internal()
        }
    }
}
