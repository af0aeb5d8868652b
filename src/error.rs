//! Application error type shared by services, repositories and handlers.
//!
//! Validation and not-found errors carry a user-facing message and are returned
//! to callers unchanged. Store and exhaustion errors carry the operation they
//! failed in, added through [`AppError::context`].

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Error payload returned in JSON responses.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Malformed input, e.g. a long URL that is not an absolute http(s) URI.
    #[error("{message}")]
    Validation { message: String, details: Value },

    /// Unknown short code.
    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// Every candidate code collided within the retry budget.
    #[error("{context}: no unique short code after {attempts} attempts")]
    CodeSpaceExhausted { context: String, attempts: usize },

    /// Persistence or read failure unrelated to a collision.
    #[error("{message}")]
    Store { message: String, details: Value },

    /// The operating system entropy source could not supply bytes.
    #[error("random source unavailable: {0}")]
    RandomSource(String),

    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn store(message: impl Into<String>, details: Value) -> Self {
        Self::Store {
            message: message.into(),
            details,
        }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// Prefixes store and internal errors with the operation that produced them.
    ///
    /// Validation and not-found errors pass through untouched so handlers can
    /// still translate them into 400/404 responses.
    pub fn context(self, operation: &str) -> Self {
        match self {
            AppError::Store { message, details } => AppError::Store {
                message: format!("{operation}: {message}"),
                details,
            },
            AppError::Internal { message, details } => AppError::Internal {
                message: format!("{operation}: {message}"),
                details,
            },
            AppError::CodeSpaceExhausted { context, attempts } => AppError::CodeSpaceExhausted {
                context: format!("{operation}: {context}"),
                attempts,
            },
            other => other,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::NotFound { .. })
    }

    /// Converts the error into the JSON payload used in API responses.
    pub fn to_error_info(&self) -> ErrorInfo {
        let (code, details) = match self {
            AppError::Validation { details, .. } => ("validation_error", details.clone()),
            AppError::NotFound { details, .. } => ("not_found", details.clone()),
            AppError::CodeSpaceExhausted { attempts, .. } => {
                ("code_space_exhausted", json!({ "attempts": attempts }))
            }
            // Store details may contain driver messages; keep them out of responses.
            AppError::Store { .. } => ("store_error", json!({})),
            AppError::RandomSource(_) => ("internal_error", json!({})),
            AppError::Internal { details, .. } => ("internal_error", details.clone()),
        };

        let message = match self {
            AppError::Store { .. } | AppError::RandomSource(_) => "Internal server error".to_string(),
            other => other.to_string(),
        };

        ErrorInfo {
            code,
            message,
            details,
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::CodeSpaceExhausted { .. } => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Store { .. } | AppError::RandomSource(_) | AppError::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        map_sqlx_error(e)
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        AppError::bad_request(
            "Request validation failed",
            serde_json::to_value(e.field_errors()).unwrap_or_else(|_| json!({})),
        )
    }
}

/// Maps a database driver error onto [`AppError::Store`].
pub fn map_sqlx_error(e: sqlx::Error) -> AppError {
    if let Some(db) = e.as_database_error()
        && db.is_unique_violation()
    {
        return AppError::store(
            "Unique constraint violation",
            json!({ "constraint": db.constraint() }),
        );
    }

    AppError::store(format!("Database error: {e}"), json!({}))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_wraps_store_errors() {
        let err = AppError::store("Database error: pool timed out", json!({}))
            .context("checking short code uniqueness");

        assert!(matches!(err, AppError::Store { .. }));
        assert_eq!(
            err.to_string(),
            "checking short code uniqueness: Database error: pool timed out"
        );
    }

    #[test]
    fn test_context_leaves_not_found_unchanged() {
        let err = AppError::not_found("Short link not found", json!({ "code": "abc123" }))
            .context("fetching link");

        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Short link not found");
    }

    #[test]
    fn test_exhaustion_message_includes_attempts() {
        let err = AppError::CodeSpaceExhausted {
            context: "creating link".to_string(),
            attempts: 5,
        };

        assert_eq!(
            err.to_string(),
            "creating link: no unique short code after 5 attempts"
        );
        assert_eq!(err.to_error_info().code, "code_space_exhausted");
    }

    #[test]
    fn test_store_error_info_hides_driver_message() {
        let err = AppError::store("Database error: disk I/O error", json!({ "table": "links" }));
        let info = err.to_error_info();

        assert_eq!(info.code, "store_error");
        assert_eq!(info.message, "Internal server error");
        assert_eq!(info.details, json!({}));
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::bad_request("bad", json!({})).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::not_found("missing", json!({})).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::RandomSource("unavailable".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
