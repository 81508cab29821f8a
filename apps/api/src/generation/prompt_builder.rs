//! Prompt Builder — fills the fixed template for a mode with request parameters.
//!
//! Presence checks on the inputs happen in the handlers before this is called; an empty
//! field here simply produces a prompt with an empty slot.

use crate::generation::prompts::{
    EXTRACT_PROMPT_TEMPLATE, FABRICATE_PROMPT_TEMPLATE, OPTIMIZE_PROMPT_TEMPLATE,
};
use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;
use crate::models::request::{GenerationRequest, PromptMode};

pub fn build_prompt(mode: PromptMode, request: &GenerationRequest) -> String {
    match mode {
        PromptMode::Fabricate => {
            let experience = request.experience_years.to_string();
            let name_hint = request.name_hint.to_string();
            fill_template(
                FABRICATE_PROMPT_TEMPLATE,
                &[
                    ("department", request.department.as_str()),
                    ("sub_department", request.sub_department.as_str()),
                    ("experience", experience.as_str()),
                    ("seed", request.seed.as_str()),
                    ("name_hint", name_hint.as_str()),
                    ("json_only_instruction", JSON_ONLY_INSTRUCTION),
                ],
            )
        }
        PromptMode::Extract => fill_template(
            EXTRACT_PROMPT_TEMPLATE,
            &[
                ("resume_text", request.resume_text.as_str()),
                ("json_only_instruction", JSON_ONLY_INSTRUCTION),
            ],
        ),
        PromptMode::Optimize => fill_template(
            OPTIMIZE_PROMPT_TEMPLATE,
            &[
                ("extracted_resume", request.resume_text.as_str()),
                ("job_requirements", request.job_requirements.as_str()),
                ("json_only_instruction", JSON_ONLY_INSTRUCTION),
            ],
        ),
    }
}

/// Single-pass `{key}` substitution. Substituted values are never rescanned, so user text that
/// happens to contain `{key}` stays literal. Braces that do not name a key are kept as-is.
fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start + 1..];
        let hit = values
            .iter()
            .find(|(key, _)| tail.starts_with(key) && tail[key.len()..].starts_with('}'));
        match hit {
            Some((key, value)) => {
                out.push_str(value);
                rest = &tail[key.len() + 1..];
            }
            None => {
                out.push('{');
                rest = tail;
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fabricate_prompt_fills_every_placeholder() {
        let request = GenerationRequest::fabricate("Engineering", "Backend", 5, "RESUME-0-1", 'K');
        let prompt = build_prompt(PromptMode::Fabricate, &request);

        assert!(prompt.contains("Department: Engineering"));
        assert!(prompt.contains("Sub-Department: Backend"));
        assert!(prompt.contains("Years of Experience: 5"));
        assert!(prompt.contains("Unique Identifier: RESUME-0-1"));
        assert!(prompt.contains("starting with the letter \"K\""));
        assert!(prompt.contains(JSON_ONLY_INSTRUCTION));
        assert!(!prompt.contains("{department}"));
        assert!(!prompt.contains("{name_hint}"));
    }

    #[test]
    fn test_extract_prompt_embeds_resume_text() {
        let request = GenerationRequest::extract("Jane Doe\nRust Engineer at Acme");
        let prompt = build_prompt(PromptMode::Extract, &request);

        assert!(prompt.contains("Jane Doe\nRust Engineer at Acme"));
        assert!(prompt.contains("\"projects\""));
        assert!(!prompt.contains("{resume_text}"));
    }

    #[test]
    fn test_optimize_prompt_embeds_resume_and_requirements() {
        let request = GenerationRequest::optimize(r#"{"name": "Jane"}"#, "5+ years of Kubernetes");
        let prompt = build_prompt(PromptMode::Optimize, &request);

        assert!(prompt.contains(r#"{"name": "Jane"}"#));
        assert!(prompt.contains("5+ years of Kubernetes"));
        assert!(prompt.contains("Keep Education section EXACTLY as is"));
    }

    #[test]
    fn test_fill_template_keeps_unknown_braces() {
        let filled = fill_template("{ \"a\": {x}, {unknown} }", &[("x", "1")]);
        assert_eq!(filled, "{ \"a\": 1, {unknown} }");
    }

    #[test]
    fn test_user_text_with_placeholder_syntax_is_not_expanded() {
        let request = GenerationRequest::optimize("{}", "Mention {extracted_resume} verbatim");
        let prompt = build_prompt(PromptMode::Optimize, &request);
        assert!(prompt.contains("Mention {extracted_resume} verbatim"));
    }
}
