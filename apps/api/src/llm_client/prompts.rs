// Shared prompt fragments. Each feature that needs completion calls defines its own
// prompts.rs alongside it; this file holds the cross-cutting pieces.

/// Appended to every template: the answer must be exactly one JSON object.
pub const JSON_ONLY_INSTRUCTION: &str = "Return ONLY a valid JSON object, no additional text.";
