// Résumé generation: prompt assembly, completion-answer normalization, identity overwrite,
// the sequential fabricate batch and the extract/optimize flow.
// All completion calls go through llm_client; nothing here talks HTTP directly.

pub mod batch;
pub mod handlers;
pub mod identity;
pub mod normalizer;
pub mod optimizer;
pub mod prompt_builder;
pub mod prompts;
