//! Axum route handler for document downloads.

use axum::{
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::resume::ResumeRecord;
use crate::render::{render_blocking, OutputFormat, Renderer, StyleKind};

#[derive(Debug, Deserialize)]
pub struct RenderRequest {
    pub resume: ResumeRecord,
    #[serde(default)]
    pub format: OutputFormat,
    #[serde(default)]
    pub style: StyleKind,
}

/// POST /api/v1/resumes/render
///
/// Returns the document bytes as an attachment named after the candidate.
pub async fn handle_render(Json(request): Json<RenderRequest>) -> Result<Response, AppError> {
    let file_name = header_safe(&Renderer::file_name(&request.resume, request.format));
    let disposition = HeaderValue::from_str(&format!("attachment; filename=\"{file_name}\""))
        .map_err(|e| AppError::Internal(e.into()))?;

    let bytes = render_blocking(request.resume, request.format, request.style).await?;

    Ok((
        [
            (
                header::CONTENT_TYPE,
                HeaderValue::from_static(request.format.mime_type()),
            ),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}

/// Replaces anything outside `[A-Za-z0-9._-]` so the name is a valid quoted header token.
fn header_safe(file_name: &str) -> String {
    file_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}
