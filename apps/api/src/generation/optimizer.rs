//! Extract and optimize: structure an uploaded résumé, then rewrite it for a job posting.

use std::time::Duration;

use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::generation::normalizer::normalize;
use crate::generation::prompt_builder::build_prompt;
use crate::llm_client::retry::{complete_with_retry, RetryPolicy};
use crate::llm_client::CompletionService;
use crate::models::request::{GenerationRequest, PromptMode};
use crate::models::resume::ResumeRecord;

pub const DEFAULT_OPTIMIZE_DELAY_MILLIS: u64 = 1000;

#[derive(Debug, Clone, Copy)]
pub struct OptimizeConfig {
    pub retry: RetryPolicy,
    /// Pause between the extract call and the optimize call.
    pub pause: Duration,
}

impl Default for OptimizeConfig {
    fn default() -> Self {
        Self {
            retry: RetryPolicy::default(),
            pause: Duration::from_millis(DEFAULT_OPTIMIZE_DELAY_MILLIS),
        }
    }
}

/// Both versions, so callers can show what changed.
#[derive(Debug, Clone, Serialize)]
pub struct OptimizedResume {
    pub original: ResumeRecord,
    pub optimized: ResumeRecord,
}

pub fn require_job_requirements(job_requirements: &str) -> Result<(), AppError> {
    if job_requirements.trim().is_empty() {
        return Err(AppError::UserInput(
            "Please enter the job requirements".to_string(),
        ));
    }
    Ok(())
}

/// Turns plain résumé text into a structured record.
pub async fn extract_resume(
    service: &dyn CompletionService,
    resume_text: &str,
    retry: &RetryPolicy,
) -> Result<ResumeRecord, AppError> {
    if resume_text.trim().is_empty() {
        return Err(AppError::UserInput(
            "Could not extract text from the uploaded file".to_string(),
        ));
    }

    let mode = PromptMode::Extract;
    let prompt = build_prompt(mode, &GenerationRequest::extract(resume_text));
    let raw = complete_with_retry(service, &prompt, mode.temperature(), retry)
        .await
        .map_err(|e| AppError::from_llm(e, 0))?;

    let record = normalize(&raw)?;
    info!(
        "Extracted resume for {}",
        record.name.as_deref().unwrap_or("unnamed candidate")
    );
    Ok(record)
}

/// Extracts `resume_text`, then asks for a version tailored to `job_requirements`.
pub async fn optimize_resume(
    service: &dyn CompletionService,
    resume_text: &str,
    job_requirements: &str,
    config: &OptimizeConfig,
) -> Result<OptimizedResume, AppError> {
    require_job_requirements(job_requirements)?;
    let original = extract_resume(service, resume_text, &config.retry).await?;

    tokio::time::sleep(config.pause).await;

    let original_json = serde_json::to_string_pretty(&original)
        .map_err(|e| AppError::Internal(e.into()))?;
    let mode = PromptMode::Optimize;
    let prompt = build_prompt(
        mode,
        &GenerationRequest::optimize(original_json, job_requirements.trim()),
    );
    let raw = complete_with_retry(service, &prompt, mode.temperature(), &config.retry)
        .await
        .map_err(|e| AppError::from_llm(e, 0))?;

    let optimized = normalize(&raw)?;
    info!("Optimized resume against {} chars of job requirements", job_requirements.len());

    Ok(OptimizedResume {
        original,
        optimized,
    })
}
