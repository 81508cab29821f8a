//! Response Normalizer — turns free-form completion text into a [`ResumeRecord`].
//!
//! Models often wrap the requested JSON in a markdown fence even when told not to. The fence
//! parser below isolates the payload; decoding afterwards is strict (no JSON repair).

use serde_json::Value;
use thiserror::Error;

use crate::models::resume::ResumeRecord;

const FENCE: &str = "```";
const JSON_FENCE: &str = "```json";

#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("invalid JSON: {source}")]
    InvalidJson {
        #[source]
        source: serde_json::Error,
        raw: String,
    },

    #[error("expected a JSON object, found {found}")]
    NotAnObject { found: &'static str, raw: String },

    #[error("response is missing required fields: {}", .missing.join(", "))]
    MissingFields {
        missing: Vec<&'static str>,
        raw: String,
    },
}

impl NormalizeError {
    /// The completion text that failed to normalize, for previews in error reports.
    pub fn raw_text(&self) -> &str {
        match self {
            NormalizeError::InvalidJson { raw, .. }
            | NormalizeError::NotAnObject { raw, .. }
            | NormalizeError::MissingFields { raw, .. } => raw,
        }
    }
}

/// Returns the text inside the first fenced region, or the whole input when there is none.
///
/// A `` ```json `` opener (ASCII case-insensitive) wins over a bare fence anywhere in the text.
/// The region ends at the next fence, or at the end of the text when the fence is never closed.
/// The result is not trimmed.
pub fn strip_fences(raw: &str) -> &str {
    // ASCII lowercasing keeps byte offsets valid for `raw`.
    let lowered = raw.to_ascii_lowercase();

    let body_start = if let Some(pos) = lowered.find(JSON_FENCE) {
        pos + JSON_FENCE.len()
    } else if let Some(pos) = raw.find(FENCE) {
        pos + FENCE.len()
    } else {
        return raw;
    };

    let body = &raw[body_start..];
    match body.find(FENCE) {
        Some(end) => &body[..end],
        None => body,
    }
}

/// Decodes one completion answer into a résumé record.
pub fn normalize(raw: &str) -> Result<ResumeRecord, NormalizeError> {
    let payload = strip_fences(raw).trim();

    let value: Value = serde_json::from_str(payload).map_err(|source| {
        NormalizeError::InvalidJson {
            source,
            raw: raw.to_string(),
        }
    })?;

    if !value.is_object() {
        return Err(NormalizeError::NotAnObject {
            found: json_kind(&value),
            raw: raw.to_string(),
        });
    }

    serde_json::from_value(value).map_err(|source| NormalizeError::InvalidJson {
        source,
        raw: raw.to_string(),
    })
}

/// Fabricated résumés must carry every section the prompt asked for.
pub fn require_generated_fields(record: &ResumeRecord, raw: &str) -> Result<(), NormalizeError> {
    let missing = record.missing_generated_fields();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(NormalizeError::MissingFields {
            missing,
            raw: raw.to_string(),
        })
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAYLOAD: &str = r#"{"name": "X Y", "summary": "S", "skills": ["a", "b"]}"#;

    #[test]
    fn test_strip_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_fences(input).trim(), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_fences_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_fences(input).trim(), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_fences_no_fences() {
        let input = "{\"key\": \"value\"}";
        assert_eq!(strip_fences(input), input);
    }

    #[test]
    fn test_strip_fences_ignores_surrounding_prose() {
        let input = "Here is the resume:\n```json\n{\"a\": 1}\n```\nLet me know if you need more.";
        assert_eq!(strip_fences(input).trim(), "{\"a\": 1}");
    }

    #[test]
    fn test_json_fence_wins_over_earlier_generic_fence() {
        let input = "```\nnot this\n```\n```json\n{\"a\": 1}\n```";
        assert_eq!(strip_fences(input).trim(), "{\"a\": 1}");
    }

    #[test]
    fn test_uppercase_json_tag_is_recognised() {
        let input = "```JSON\n{\"a\": 1}\n```";
        assert_eq!(strip_fences(input).trim(), "{\"a\": 1}");
    }

    #[test]
    fn test_unclosed_fence_runs_to_end() {
        let input = "```json\n{\"a\": 1}";
        assert_eq!(strip_fences(input).trim(), "{\"a\": 1}");
    }

    #[test]
    fn test_fenced_and_bare_payloads_normalize_identically() {
        let payloads = [
            PAYLOAD,
            r#"{}"#,
            r#"{"education": {"degree": "D", "university": "U", "year": "2020"}}"#,
            r#"{"experience": [{"title": "T", "company": "C", "responsibilities": ["r1", "r2"]}]}"#,
        ];
        for payload in payloads {
            let bare = normalize(payload).unwrap();
            for wrapped in [
                format!("```json\n{payload}\n```"),
                format!("```json{payload}```"),
                format!("Sure!\n```json\n{payload}\n```\n"),
            ] {
                assert_eq!(normalize(&wrapped).unwrap(), bare, "wrapped: {wrapped}");
            }
        }
    }

    #[test]
    fn test_not_json_is_malformed() {
        let err = normalize("not json at all").unwrap_err();
        assert!(matches!(err, NormalizeError::InvalidJson { .. }));
        assert_eq!(err.raw_text(), "not json at all");
    }

    #[test]
    fn test_top_level_array_is_rejected() {
        let err = normalize("[1, 2, 3]").unwrap_err();
        assert!(matches!(
            err,
            NormalizeError::NotAnObject {
                found: "an array",
                ..
            }
        ));
    }

    #[test]
    fn test_no_repair_of_trailing_commas() {
        assert!(normalize(r#"{"name": "A",}"#).is_err());
    }

    #[test]
    fn test_wrong_field_type_is_malformed() {
        assert!(normalize(r#"{"skills": "Rust, Go"}"#).is_err());
    }

    #[test]
    fn test_require_generated_fields() {
        let record = normalize(PAYLOAD).unwrap();
        let err = require_generated_fields(&record, PAYLOAD).unwrap_err();
        assert_eq!(
            err.to_string(),
            "response is missing required fields: experience, education"
        );

        let complete = normalize(
            r#"{"summary": "S", "skills": [], "experience": [], "education": {"degree": "D"}}"#,
        )
        .unwrap();
        assert!(require_generated_fields(&complete, "").is_ok());
    }
}
