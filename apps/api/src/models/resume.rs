//! The canonical structured résumé record produced by the normalizer and consumed by the renderer.
//!
//! Every field is optional: the completion model decides which keys it emits, and a missing or
//! empty field means "omit that section" downstream. Ordering of every sequence is preserved
//! exactly as supplied by the model.

use serde::{Deserialize, Deserializer, Serialize};

/// A single résumé, as decoded from one completion response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience: Option<Vec<Experience>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub education: Option<Education>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projects: Option<Vec<Project>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certifications: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default)]
    pub responsibilities: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EducationEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub degree: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub university: Option<String>,
    /// Models emit the graduation year both as `"2020"` and as `2020`.
    #[serde(
        default,
        deserialize_with = "string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub year: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Project {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
}

/// Education arrives either as a single object (fabricate prompt) or as a list (extract prompt).
///
/// Renderers must go through [`Education::entries`] so both shapes render identically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Education {
    // `Many` first: a struct with all-default fields would also accept `[]`.
    Many(Vec<EducationEntry>),
    One(EducationEntry),
}

impl Education {
    pub fn entries(&self) -> &[EducationEntry] {
        match self {
            Education::One(entry) => std::slice::from_ref(entry),
            Education::Many(entries) => entries,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}

impl ResumeRecord {
    /// Name used in download file names: spaces become underscores, missing name is `candidate`.
    pub fn file_stem(&self) -> String {
        let name = self
            .name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or("candidate");
        format!("resume_{}", name.replace(' ', "_"))
    }

    /// Keys that the fabricate prompt demands and that are not overwritten afterwards.
    pub fn missing_generated_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.summary.is_none() {
            missing.push("summary");
        }
        if self.skills.is_none() {
            missing.push("skills");
        }
        if self.experience.is_none() {
            missing.push("experience");
        }
        if self.education.is_none() {
            missing.push("education");
        }
        missing
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(Option::<Scalar>::deserialize(deserializer)?.map(|s| match s {
        Scalar::Text(t) => t,
        Scalar::Int(i) => i.to_string(),
        Scalar::Float(f) => f.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_education_single_object_and_list_normalize_to_same_entries() {
        let single: ResumeRecord = serde_json::from_str(
            r#"{"education": {"degree": "BSc", "university": "U", "year": "2020"}}"#,
        )
        .unwrap();
        let list: ResumeRecord = serde_json::from_str(
            r#"{"education": [{"degree": "BSc", "university": "U", "year": "2020"}]}"#,
        )
        .unwrap();

        assert_eq!(
            single.education.unwrap().entries(),
            list.education.unwrap().entries()
        );
    }

    #[test]
    fn test_empty_education_list_is_empty() {
        let record: ResumeRecord = serde_json::from_str(r#"{"education": []}"#).unwrap();
        assert!(record.education.unwrap().is_empty());
    }

    #[test]
    fn test_numeric_year_is_accepted() {
        let record: ResumeRecord =
            serde_json::from_str(r#"{"education": {"degree": "MSc", "year": 2019}}"#).unwrap();
        let education = record.education.unwrap();
        assert_eq!(education.entries()[0].year.as_deref(), Some("2019"));
    }

    #[test]
    fn test_missing_keys_decode_as_none() {
        let record: ResumeRecord = serde_json::from_str(r#"{"name": "Ada Lovelace"}"#).unwrap();
        assert_eq!(record.name.as_deref(), Some("Ada Lovelace"));
        assert!(record.skills.is_none());
        assert!(record.projects.is_none());
        assert_eq!(
            record.missing_generated_fields(),
            vec!["summary", "skills", "experience", "education"]
        );
    }

    #[test]
    fn test_skill_order_is_preserved() {
        let record: ResumeRecord =
            serde_json::from_str(r#"{"skills": ["Rust", "Go", "Ada", "C"]}"#).unwrap();
        assert_eq!(record.skills.unwrap(), vec!["Rust", "Go", "Ada", "C"]);
    }

    #[test]
    fn test_file_stem_replaces_spaces() {
        let record = ResumeRecord {
            name: Some("Mary Jane Watson".to_string()),
            ..Default::default()
        };
        assert_eq!(record.file_stem(), "resume_Mary_Jane_Watson");
        assert_eq!(ResumeRecord::default().file_stem(), "resume_candidate");
    }
}
