use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Errors surfaced by request handlers. The `Display` text is what the
/// caller sees in `{"message": ...}`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(&'static str),

    #[error("{0}")]
    NotFound(&'static str),

    #[error("{0}")]
    Unauthorized(&'static str),

    /// `message` goes to the caller, `source` only to the log.
    #[error("{message}")]
    Internal {
        message: &'static str,
        #[source]
        source: anyhow::Error,
    },
}

impl AppError {
    pub fn internal(message: &'static str, source: impl Into<anyhow::Error>) -> Self {
        AppError::Internal {
            message,
            source: source.into(),
        }
    }
}

/// Attaches the caller-facing message of a 500 to a repository result.
pub trait ResultExt<T> {
    fn or_internal(self, message: &'static str) -> Result<T, AppError>;
}

impl<T> ResultExt<T> for anyhow::Result<T> {
    fn or_internal(self, message: &'static str) -> Result<T, AppError> {
        self.map_err(|e| AppError::internal(message, e))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::warn!(error = %rejection.body_text(), "rejected request body");
        AppError::Validation(crate::messages::INVALID_BODY)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Internal { message, source } => {
                tracing::error!(error = ?source, "{message}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = serde_json::json!({ "message": self.to_string() });
        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_internal_hides_source_from_caller() {
        let err = AppError::internal("generic failure", anyhow::anyhow!("disk I/O error"));
        assert_eq!(err.to_string(), "generic failure");

        let res = err.into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_status_codes_by_variant() {
        assert_eq!(
            AppError::Validation("x").into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::NotFound("x").into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Unauthorized("x").into_response().status(),
            StatusCode::UNAUTHORIZED
        );
    }
}
