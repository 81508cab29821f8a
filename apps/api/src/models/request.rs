//! Per-action generation parameters consumed once by the prompt builder.

use serde::{Deserialize, Serialize};

pub const MIN_EXPERIENCE_YEARS: i64 = 0;
pub const MAX_EXPERIENCE_YEARS: i64 = 50;

/// Which prompt template to fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptMode {
    /// Invent a complete résumé for a department and experience level.
    Fabricate,
    /// Structure the plain text of an uploaded résumé.
    Extract,
    /// Rewrite an extracted résumé against job requirements.
    Optimize,
}

impl PromptMode {
    /// Sampling temperature sent with the completion call.
    pub fn temperature(self) -> f32 {
        match self {
            PromptMode::Fabricate => 1.0,
            PromptMode::Extract | PromptMode::Optimize => 0.7,
        }
    }
}

/// Parameters for a single completion request. Which fields are meaningful depends on the mode;
/// the constructors fill only those.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationRequest {
    pub department: String,
    pub sub_department: String,
    /// Always within [`MIN_EXPERIENCE_YEARS`, `MAX_EXPERIENCE_YEARS`].
    pub experience_years: u8,
    /// Opaque token that differs per call to discourage duplicate model output.
    pub seed: String,
    /// Letter the fabricated candidate's name must start with.
    pub name_hint: char,
    /// Uploaded résumé text (extract) or the extracted record as JSON (optimize).
    pub resume_text: String,
    pub job_requirements: String,
}

impl GenerationRequest {
    pub fn fabricate(
        department: impl Into<String>,
        sub_department: impl Into<String>,
        experience_years: i64,
        seed: impl Into<String>,
        name_hint: char,
    ) -> Self {
        Self {
            department: department.into(),
            sub_department: sub_department.into(),
            experience_years: clamp_experience(experience_years),
            seed: seed.into(),
            name_hint,
            ..Default::default()
        }
    }

    pub fn extract(resume_text: impl Into<String>) -> Self {
        Self {
            resume_text: resume_text.into(),
            ..Default::default()
        }
    }

    pub fn optimize(resume_json: impl Into<String>, job_requirements: impl Into<String>) -> Self {
        Self {
            resume_text: resume_json.into(),
            job_requirements: job_requirements.into(),
            ..Default::default()
        }
    }
}

pub fn clamp_experience(years: i64) -> u8 {
    years.clamp(MIN_EXPERIENCE_YEARS, MAX_EXPERIENCE_YEARS) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_experience_is_clamped() {
        assert_eq!(GenerationRequest::fabricate("IT", "Dev", -3, "s", 'A').experience_years, 0);
        assert_eq!(GenerationRequest::fabricate("IT", "Dev", 75, "s", 'A').experience_years, 50);
        assert_eq!(GenerationRequest::fabricate("IT", "Dev", 7, "s", 'A').experience_years, 7);
    }

    #[test]
    fn test_mode_temperatures() {
        assert_eq!(PromptMode::Fabricate.temperature(), 1.0);
        assert_eq!(PromptMode::Extract.temperature(), 0.7);
        assert_eq!(PromptMode::Optimize.temperature(), 0.7);
    }

    #[test]
    fn test_mode_serializes_snake_case() {
        let json = serde_json::to_string(&PromptMode::Fabricate).unwrap();
        assert_eq!(json, "\"fabricate\"");
    }
}
