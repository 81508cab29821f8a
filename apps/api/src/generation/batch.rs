//! Batch fabrication — a strictly sequential loop of completion calls.
//!
//! Items are generated one at a time with a fixed pause between them to stay under the
//! upstream per-minute limit. A failed item is recorded and skipped; the loop always moves on
//! to the next one.

use std::time::Duration;

use chrono::Utc;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::identity::{assign_identity, name_hint};
use crate::generation::normalizer::{normalize, require_generated_fields};
use crate::generation::prompt_builder::build_prompt;
use crate::llm_client::retry::{complete_with_retry, RetryPolicy};
use crate::llm_client::CompletionService;
use crate::models::request::{clamp_experience, GenerationRequest, PromptMode};
use crate::models::resume::ResumeRecord;

pub const MIN_QUANTITY: usize = 1;
pub const MAX_QUANTITY: usize = 50;
pub const DEFAULT_ITEM_DELAY_SECS: u64 = 4;

// ────────────────────────────────────────────────────────────────────────────
// Session container
// ────────────────────────────────────────────────────────────────────────────

/// Append-only list of generated résumés, owned by the caller and threaded through each batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResumeSession {
    resumes: Vec<ResumeRecord>,
}

impl ResumeSession {
    #[cfg(test)]
    pub(crate) fn resumes(&self) -> &[ResumeRecord] {
        &self.resumes
    }

    fn len(&self) -> usize {
        self.resumes.len()
    }

    fn append(&mut self, record: ResumeRecord) {
        self.resumes.push(record);
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Inputs and report
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct FabricateParams {
    pub department: String,
    pub sub_department: String,
    pub experience: i64,
    pub quantity: usize,
}

impl FabricateParams {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.department.trim().is_empty() || self.sub_department.trim().is_empty() {
            return Err(AppError::UserInput(
                "Please fill in Department and Sub-Department fields".to_string(),
            ));
        }
        if !(MIN_QUANTITY..=MAX_QUANTITY).contains(&self.quantity) {
            return Err(AppError::UserInput(format!(
                "Number of resumes must be between {MIN_QUANTITY} and {MAX_QUANTITY}"
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct BatchConfig {
    pub retry: RetryPolicy,
    /// Pause before every item except the first.
    pub item_delay: Duration,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            retry: RetryPolicy::default(),
            item_delay: Duration::from_secs(DEFAULT_ITEM_DELAY_SECS),
        }
    }
}

/// One skipped item.
#[derive(Debug, Clone, Serialize)]
pub struct ItemFailure {
    pub index: usize,
    pub code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview: Option<String>,
}

impl ItemFailure {
    fn new(index: usize, err: &AppError) -> Self {
        let preview = match err {
            AppError::MalformedResponse { preview, .. } => Some(preview.clone()),
            _ => None,
        };
        Self {
            index,
            code: err.code(),
            message: err.to_string(),
            preview,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub requested: usize,
    pub generated: usize,
    pub failures: Vec<ItemFailure>,
}

impl BatchReport {
    pub fn is_complete(&self) -> bool {
        self.generated == self.requested
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchOutcome {
    pub session: ResumeSession,
    pub report: BatchReport,
}

// ────────────────────────────────────────────────────────────────────────────
// Batch loop
// ────────────────────────────────────────────────────────────────────────────

/// Generates `params.quantity` résumés and appends the successful ones to `session`.
///
/// Only input validation fails the whole call; per-item failures land in the report.
pub async fn fabricate_batch<R: Rng + Send>(
    service: &dyn CompletionService,
    params: &FabricateParams,
    config: &BatchConfig,
    mut session: ResumeSession,
    rng: &mut R,
) -> Result<BatchOutcome, AppError> {
    params.validate()?;

    let batch_id = Uuid::new_v4();
    info!(
        %batch_id,
        quantity = params.quantity,
        department = %params.department,
        sub_department = %params.sub_department,
        "Starting resume batch"
    );

    let mut report = BatchReport {
        requested: params.quantity,
        generated: 0,
        failures: Vec::new(),
    };

    for index in 0..params.quantity {
        if index > 0 {
            tokio::time::sleep(config.item_delay).await;
        }

        match fabricate_one(service, params, config, index, report.generated, rng).await {
            Ok(record) => {
                session.append(record);
                report.generated += 1;
                info!(%batch_id, "Resume {} of {} completed", index + 1, params.quantity);
            }
            Err(err) => {
                warn!(
                    %batch_id,
                    code = err.code(),
                    "Resume {} of {} skipped: {err}",
                    index + 1,
                    params.quantity
                );
                report.failures.push(ItemFailure::new(index, &err));
            }
        }
    }

    if report.is_complete() {
        info!(
            %batch_id,
            generated = report.generated,
            session_size = session.len(),
            "Resume batch finished"
        );
    } else {
        warn!(
            %batch_id,
            generated = report.generated,
            requested = report.requested,
            session_size = session.len(),
            "Resume batch finished with skipped items"
        );
    }

    Ok(BatchOutcome { session, report })
}

async fn fabricate_one<R: Rng + Send>(
    service: &dyn CompletionService,
    params: &FabricateParams,
    config: &BatchConfig,
    index: usize,
    completed: usize,
    rng: &mut R,
) -> Result<ResumeRecord, AppError> {
    // Jitter the experience level so consecutive résumés read differently.
    let base = i64::from(clamp_experience(params.experience));
    let years = clamp_experience(base + rng.gen_range(-1..=2));
    let seed = format!(
        "RESUME-{index}-{}-{}",
        rng.gen_range(10000..=99999),
        Utc::now().timestamp_millis()
    );
    let request = GenerationRequest::fabricate(
        params.department.trim(),
        params.sub_department.trim(),
        i64::from(years),
        seed,
        name_hint(index),
    );

    let mode = PromptMode::Fabricate;
    let prompt = build_prompt(mode, &request);
    let raw = complete_with_retry(service, &prompt, mode.temperature(), &config.retry)
        .await
        .map_err(|e| AppError::from_llm(e, completed))?;

    let mut record = normalize(&raw)?;
    require_generated_fields(&record, &raw)?;
    assign_identity(&mut record, index, rng);

    Ok(record)
}
