//! Axum route handlers for the generation API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::generation::batch::{fabricate_batch, BatchOutcome, FabricateParams, ResumeSession};
use crate::generation::optimizer::{
    extract_resume, optimize_resume, require_job_requirements, OptimizedResume,
};
use crate::models::resume::ResumeRecord;
use crate::state::AppState;
use crate::upload::extract_text_blocking;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    #[serde(flatten)]
    pub params: FabricateParams,
    #[serde(default)]
    pub api_key: Option<String>,
    /// Résumés from earlier batches; new ones are appended.
    #[serde(default)]
    pub session: ResumeSession,
}

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub resume: ResumeRecord,
}

/// Fields of an extract/optimize multipart form.
#[derive(Debug, Default)]
struct UploadForm {
    file: Option<(String, Bytes)>,
    job_requirements: Option<String>,
    api_key: Option<String>,
}

impl UploadForm {
    async fn read(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = UploadForm::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::UserInput(format!("Invalid form data: {e}")))?
        {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "file" => {
                    let file_name = field.file_name().unwrap_or_default().to_string();
                    let data = field
                        .bytes()
                        .await
                        .map_err(|e| AppError::UserInput(format!("Invalid file upload: {e}")))?;
                    form.file = Some((file_name, data));
                }
                "job_requirements" | "api_key" => {
                    let value = field
                        .text()
                        .await
                        .map_err(|e| AppError::UserInput(format!("Invalid field '{name}': {e}")))?;
                    if name == "api_key" {
                        form.api_key = Some(value);
                    } else {
                        form.job_requirements = Some(value);
                    }
                }
                _ => {}
            }
        }

        Ok(form)
    }

    fn take_file(&mut self) -> Result<(String, Bytes), AppError> {
        self.file
            .take()
            .filter(|(_, data)| !data.is_empty())
            .ok_or_else(|| AppError::UserInput("Please upload your resume".to_string()))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resumes/generate
///
/// Fabricates `quantity` résumés one after another and appends them to the supplied session.
/// Individual failures are reported in the outcome instead of failing the request.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<BatchOutcome>, AppError> {
    let client = state.completion_client(request.api_key.as_deref())?;
    let mut rng = StdRng::from_entropy();

    let outcome = fabricate_batch(
        &client,
        &request.params,
        &state.config.batch_config(),
        request.session,
        &mut rng,
    )
    .await?;

    Ok(Json(outcome))
}

/// POST /api/v1/resumes/extract
///
/// Multipart: `file` (PDF or DOCX), optional `api_key`.
pub async fn handle_extract(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ExtractResponse>, AppError> {
    let mut form = UploadForm::read(multipart).await?;
    let client = state.completion_client(form.api_key.as_deref())?;
    let (file_name, data) = form.take_file()?;

    let text = extract_text_blocking(&file_name, data).await?;
    let resume = extract_resume(&client, &text, &state.config.retry_policy()).await?;

    Ok(Json(ExtractResponse { resume }))
}

/// POST /api/v1/resumes/optimize
///
/// Multipart: `file`, `job_requirements`, optional `api_key`. Returns the extracted original
/// alongside the rewritten version.
pub async fn handle_optimize(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<OptimizedResume>, AppError> {
    let mut form = UploadForm::read(multipart).await?;
    let client = state.completion_client(form.api_key.as_deref())?;
    let (file_name, data) = form.take_file()?;
    let job_requirements = form.job_requirements.unwrap_or_default();
    require_job_requirements(&job_requirements)?;

    let text = extract_text_blocking(&file_name, data).await?;
    let result = optimize_resume(
        &client,
        &text,
        &job_requirements,
        &state.config.optimize_config(),
    )
    .await?;

    Ok(Json(result))
}
