//! Section contract: turns a [`ResumeRecord`] into an ordered list of styled blocks.
//!
//! Header → summary → skills → experience → projects → education → certifications. A section
//! whose field is absent or empty produces nothing at all, not even its heading. Both output
//! backends consume these blocks and never look at the record themselves.

use crate::models::resume::{EducationEntry, Experience, Project, ResumeRecord};
use crate::render::style::{StyleConfig, TextRole};

pub const SKILL_SEPARATOR: &str = " \u{2022} ";
pub const BULLET: &str = "\u{2022}";
pub const TECHNOLOGIES_LABEL: &str = "Technologies:";

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Title(String),
    Contact(String),
    Rule,
    Heading(String),
    /// A paragraph. `label`, when set, is a bold lead-in followed by one space and `text`.
    Text {
        role: TextRole,
        label: Option<String>,
        text: String,
    },
    Bullet(String),
    /// Vertical whitespace in points.
    Gap(f32),
}

impl Block {
    fn text(role: TextRole, text: impl Into<String>) -> Self {
        Block::Text {
            role,
            label: None,
            text: text.into(),
        }
    }

    fn labelled(role: TextRole, label: impl Into<String>, text: impl Into<String>) -> Self {
        Block::Text {
            role,
            label: Some(label.into()),
            text: text.into(),
        }
    }
}

pub fn build_blocks(record: &ResumeRecord, style: &StyleConfig) -> Vec<Block> {
    let mut blocks = Vec::new();

    push_header(&mut blocks, record, style);

    if let Some(summary) = non_blank(&record.summary) {
        blocks.push(Block::Heading(style.headings.summary.to_string()));
        blocks.push(Block::text(TextRole::Body, summary));
        blocks.push(Block::Gap(style.gaps.section));
    }

    if let Some(skills) = non_empty(&record.skills) {
        blocks.push(Block::Heading(style.headings.skills.to_string()));
        blocks.push(Block::text(TextRole::Plain, skills.join(SKILL_SEPARATOR)));
        blocks.push(Block::Gap(style.gaps.section));
    }

    if let Some(experience) = non_empty(&record.experience) {
        blocks.push(Block::Heading(style.headings.experience.to_string()));
        for entry in experience {
            push_experience(&mut blocks, entry, style);
        }
    }

    if let Some(projects) = non_empty(&record.projects) {
        blocks.push(Block::Heading(style.headings.projects.to_string()));
        for project in projects {
            push_project(&mut blocks, project, style);
        }
    }

    if let Some(education) = record.education.as_ref().filter(|e| !e.is_empty()) {
        blocks.push(Block::Heading(style.headings.education.to_string()));
        for entry in education.entries() {
            push_education(&mut blocks, entry, style);
        }
    }

    if let Some(certifications) = non_empty(&record.certifications) {
        blocks.push(Block::Heading(style.headings.certifications.to_string()));
        for cert in certifications {
            blocks.push(Block::Bullet(cert.clone()));
        }
    }

    blocks
}

fn push_header(blocks: &mut Vec<Block>, record: &ResumeRecord, style: &StyleConfig) {
    if let Some(name) = non_blank(&record.name) {
        let name = if style.uppercase_name {
            name.to_uppercase()
        } else {
            name.to_string()
        };
        blocks.push(Block::Title(name));
    }

    let contact: Vec<&str> = [&record.email, &record.phone]
        .into_iter()
        .filter_map(non_blank)
        .collect();
    if !contact.is_empty() {
        blocks.push(Block::Contact(contact.join(" | ")));
    }

    blocks.push(Block::Rule);
}

fn push_experience(blocks: &mut Vec<Block>, entry: &Experience, style: &StyleConfig) {
    let title = non_blank(&entry.title).unwrap_or("Position");
    let company = non_blank(&entry.company).unwrap_or("Company");

    if style.inline_company {
        blocks.push(Block::labelled(TextRole::Body, title, format!("- {company}")));
    } else {
        blocks.push(Block::text(TextRole::JobTitle, title));
        blocks.push(Block::text(TextRole::Company, company));
    }

    if let Some(duration) = non_blank(&entry.duration) {
        blocks.push(Block::text(TextRole::Duration, duration));
    }
    for line in &entry.responsibilities {
        blocks.push(Block::Bullet(line.clone()));
    }
    blocks.push(Block::Gap(style.gaps.experience_entry));
}

fn push_project(blocks: &mut Vec<Block>, project: &Project, style: &StyleConfig) {
    let mut name = non_blank(&project.name).unwrap_or("Project").to_string();
    if let Some(duration) = non_blank(&project.duration) {
        name.push_str(&format!(" ({duration})"));
    }
    blocks.push(Block::text(TextRole::JobTitle, name));

    if let Some(description) = non_blank(&project.description) {
        blocks.push(Block::text(TextRole::Body, description));
    }
    if !project.technologies.is_empty() {
        blocks.push(Block::labelled(
            TextRole::Plain,
            TECHNOLOGIES_LABEL,
            project.technologies.join(", "),
        ));
    }
    blocks.push(Block::Gap(style.gaps.project_entry));
}

fn push_education(blocks: &mut Vec<Block>, entry: &EducationEntry, style: &StyleConfig) {
    blocks.push(Block::text(
        TextRole::JobTitle,
        non_blank(&entry.degree).unwrap_or("Degree"),
    ));
    blocks.push(Block::text(
        TextRole::Company,
        non_blank(&entry.university).unwrap_or("University"),
    ));

    let meta: Vec<&str> = [&entry.year, &entry.details]
        .into_iter()
        .filter_map(non_blank)
        .collect();
    if !meta.is_empty() {
        blocks.push(Block::text(TextRole::Duration, meta.join(" | ")));
    }
    blocks.push(Block::Gap(style.gaps.education_entry));
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn non_empty<T>(value: &Option<Vec<T>>) -> Option<&[T]> {
    value.as_deref().filter(|items| !items.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::Education;

    fn headings(blocks: &[Block]) -> Vec<&str> {
        blocks
            .iter()
            .filter_map(|b| match b {
                Block::Heading(h) => Some(h.as_str()),
                _ => None,
            })
            .collect()
    }

    fn sample() -> ResumeRecord {
        serde_json::from_str(
            r#"{
                "name": "Ada Moreno",
                "email": "ada.moreno@example.com",
                "phone": "+1 (415) 555-0199",
                "summary": "Backend engineer.",
                "skills": ["Rust", "PostgreSQL"],
                "experience": [{
                    "title": "Senior Engineer",
                    "company": "Initech",
                    "duration": "2019 - Present",
                    "responsibilities": ["Built the billing pipeline", "Led on-call rotation"]
                }],
                "projects": [{"name": "Ledger", "duration": "2021", "technologies": ["Rust", "Kafka"]}],
                "education": {"degree": "BSc CS", "university": "MIT", "year": 2015},
                "certifications": ["AWS SAA"]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_full_record_section_order() {
        let blocks = build_blocks(&sample(), &StyleConfig::stylish());
        assert_eq!(
            headings(&blocks),
            vec![
                "PROFESSIONAL SUMMARY",
                "CORE COMPETENCIES",
                "PROFESSIONAL EXPERIENCE",
                "PROJECTS",
                "EDUCATION",
                "CERTIFICATIONS",
            ]
        );
        assert_eq!(blocks[0], Block::Title("ADA MORENO".into()));
        assert_eq!(
            blocks[1],
            Block::Contact("ada.moreno@example.com | +1 (415) 555-0199".into())
        );
        assert_eq!(blocks[2], Block::Rule);
    }

    #[test]
    fn test_empty_sections_emit_no_heading() {
        let mut record = sample();
        record.certifications = Some(vec![]);
        record.experience = Some(vec![]);
        record.projects = None;
        record.summary = Some("   ".into());

        let blocks = build_blocks(&record, &StyleConfig::basic());
        assert_eq!(headings(&blocks), vec!["SKILLS", "EDUCATION"]);
    }

    #[test]
    fn test_minimal_record_order() {
        let record: ResumeRecord = serde_json::from_str(
            r#"{"name":"X Y","summary":"S","skills":["a","b"],"experience":[],
                "education":{"degree":"D","university":"U","year":"2020"},"certifications":[]}"#,
        )
        .unwrap();
        let blocks = build_blocks(&record, &StyleConfig::basic());

        assert_eq!(blocks[0], Block::Title("X Y".into()));
        assert_eq!(blocks[1], Block::Rule);
        assert_eq!(headings(&blocks), vec!["PROFESSIONAL SUMMARY", "SKILLS", "EDUCATION"]);
        assert!(blocks.contains(&Block::text(TextRole::Plain, "a \u{2022} b")));
    }

    #[test]
    fn test_single_and_listed_education_build_the_same_blocks() {
        let mut one = sample();
        let mut many = sample();
        let entry = one.education.as_ref().unwrap().entries()[0].clone();
        one.education = Some(Education::One(entry.clone()));
        many.education = Some(Education::Many(vec![entry]));

        let style = StyleConfig::stylish();
        assert_eq!(build_blocks(&one, &style), build_blocks(&many, &style));
    }

    #[test]
    fn test_defaults_for_missing_entry_fields() {
        let record: ResumeRecord = serde_json::from_str(
            r#"{"experience":[{"responsibilities":[]}],"projects":[{}],"education":[{}]}"#,
        )
        .unwrap();
        let blocks = build_blocks(&record, &StyleConfig::stylish());

        for expected in ["Position", "Company", "Project", "Degree", "University"] {
            assert!(
                blocks.iter().any(|b| matches!(b, Block::Text { text, .. } if text == expected)),
                "missing default {expected}"
            );
        }
    }

    #[test]
    fn test_basic_style_puts_company_inline() {
        let blocks = build_blocks(&sample(), &StyleConfig::basic());
        assert!(blocks.contains(&Block::labelled(
            TextRole::Body,
            "Senior Engineer",
            "- Initech"
        )));
        assert!(blocks.contains(&Block::Title("Ada Moreno".into())));
    }

    #[test]
    fn test_project_line_and_education_meta() {
        let mut record = sample();
        record.education = Some(Education::One(EducationEntry {
            degree: Some("MSc".into()),
            university: Some("ETH".into()),
            year: Some("2017".into()),
            details: Some("GPA 3.9".into()),
        }));
        let blocks = build_blocks(&record, &StyleConfig::stylish());

        assert!(blocks.contains(&Block::text(TextRole::JobTitle, "Ledger (2021)")));
        assert!(blocks.contains(&Block::labelled(
            TextRole::Plain,
            TECHNOLOGIES_LABEL,
            "Rust, Kafka"
        )));
        assert!(blocks.contains(&Block::text(TextRole::Duration, "2017 | GPA 3.9")));
    }
}
