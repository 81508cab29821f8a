use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::generation::normalizer::NormalizeError;
use crate::llm_client::LlmError;
use crate::render::RenderError;
use crate::upload::UploadError;

/// Characters of offending completion text echoed back with a malformed-response error.
pub const PREVIEW_CHARS: usize = 500;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required form field is missing or out of range. No upstream call was made.
    #[error("{0}")]
    UserInput(String),

    /// Upstream kept throttling after the retry budget was spent.
    #[error(
        "Rate limit exceeded. Successfully generated {completed} resumes. \
         Please wait a few minutes and try again for the remaining resumes."
    )]
    RateLimited { completed: usize },

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Error parsing response: {message}")]
    MalformedResponse { message: String, preview: String },

    #[error("Could not read the uploaded document: {0}")]
    DocumentParse(String),

    #[error("Error generating document: {0}")]
    Render(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Stable machine-readable code, shared by HTTP bodies and batch failure reports.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::UserInput(_) => "USER_INPUT_ERROR",
            AppError::RateLimited { .. } => "RATE_LIMITED",
            AppError::Upstream(_) => "UPSTREAM_ERROR",
            AppError::MalformedResponse { .. } => "MALFORMED_RESPONSE",
            AppError::DocumentParse(_) => "DOCUMENT_PARSE_ERROR",
            AppError::Render(_) => "RENDER_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Converts a completion failure. `completed` is the number of items already finished in
    /// the surrounding batch, reported back when the rate limit could not be outlasted.
    pub fn from_llm(err: LlmError, completed: usize) -> Self {
        match err {
            LlmError::RateLimited { .. } => AppError::RateLimited { completed },
            other => AppError::Upstream(other.to_string()),
        }
    }
}

impl From<NormalizeError> for AppError {
    fn from(err: NormalizeError) -> Self {
        let preview = err.raw_text().chars().take(PREVIEW_CHARS).collect();
        AppError::MalformedResponse {
            message: err.to_string(),
            preview,
        }
    }
}

impl From<UploadError> for AppError {
    fn from(err: UploadError) -> Self {
        match err {
            UploadError::UnsupportedType(_) => AppError::UserInput(err.to_string()),
            other => AppError::DocumentParse(other.to_string()),
        }
    }
}

impl From<RenderError> for AppError {
    fn from(err: RenderError) -> Self {
        AppError::Render(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let code = self.code();
        let (status, details) = match &self {
            AppError::UserInput(_) => (StatusCode::BAD_REQUEST, None),
            AppError::RateLimited { .. } => (StatusCode::TOO_MANY_REQUESTS, None),
            AppError::Upstream(msg) => {
                tracing::error!("Upstream error: {msg}");
                (StatusCode::BAD_GATEWAY, None)
            }
            AppError::MalformedResponse { message, preview } => {
                tracing::error!("Malformed completion: {message}");
                (StatusCode::BAD_GATEWAY, Some(preview.clone()))
            }
            AppError::DocumentParse(msg) => {
                tracing::warn!("Document parse error: {msg}");
                (StatusCode::UNPROCESSABLE_ENTITY, None)
            }
            AppError::Render(msg) => {
                tracing::error!("Render error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, None)
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (StatusCode::INTERNAL_SERVER_ERROR, None)
            }
        };

        let message = match &self {
            AppError::Internal(_) => "An internal server error occurred".to_string(),
            other => other.to_string(),
        };

        let mut error = json!({
            "code": code,
            "message": message,
        });
        if let Some(details) = details {
            error["details"] = json!(details);
        }

        (status, Json(json!({ "error": error }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limited_message_reports_partial_progress() {
        let err = AppError::RateLimited { completed: 2 };
        assert!(err.to_string().contains("Successfully generated 2 resumes"));
        assert_eq!(err.code(), "RATE_LIMITED");
    }

    #[test]
    fn test_from_llm_maps_throttling_and_other_failures() {
        let throttled = LlmError::RateLimited {
            retries: 3,
            message: "quota".to_string(),
        };
        assert!(matches!(
            AppError::from_llm(throttled, 4),
            AppError::RateLimited { completed: 4 }
        ));

        let other = AppError::from_llm(LlmError::EmptyContent, 0);
        assert!(matches!(other, AppError::Upstream(_)));
    }

    #[test]
    fn test_status_codes() {
        let cases = [
            (AppError::UserInput("x".into()), StatusCode::BAD_REQUEST),
            (AppError::RateLimited { completed: 0 }, StatusCode::TOO_MANY_REQUESTS),
            (AppError::Upstream("x".into()), StatusCode::BAD_GATEWAY),
            (AppError::DocumentParse("x".into()), StatusCode::UNPROCESSABLE_ENTITY),
            (AppError::Render("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }
}
