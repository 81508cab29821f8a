//! Document rendering: one section contract ([`blocks::build_blocks`]) feeding two backends.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::models::resume::ResumeRecord;

pub mod blocks;
pub mod docx;
pub mod handlers;
pub mod pdf;
pub mod style;

pub use style::{StyleConfig, StyleKind};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PDF output failed: {0}")]
    Pdf(String),

    #[error("DOCX output failed: {0}")]
    Docx(String),

    #[error("renderer aborted: {0}")]
    Aborted(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Pdf,
    Docx,
}

impl OutputFormat {
    pub fn mime_type(self) -> &'static str {
        match self {
            OutputFormat::Pdf => "application/pdf",
            OutputFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Pdf => "pdf",
            OutputFormat::Docx => "docx",
        }
    }
}

/// Renders records with one fixed style. Never mutates the record.
#[derive(Debug, Clone)]
pub struct Renderer {
    style: StyleConfig,
}

impl Renderer {
    pub fn new(style: StyleConfig) -> Self {
        Self { style }
    }

    #[cfg(test)]
    pub(crate) fn style(&self) -> &StyleConfig {
        &self.style
    }

    pub fn render(
        &self,
        record: &ResumeRecord,
        format: OutputFormat,
    ) -> Result<Vec<u8>, RenderError> {
        let blocks = blocks::build_blocks(record, &self.style);
        match format {
            OutputFormat::Pdf => pdf::render_pdf(&blocks, &self.style, &record.file_stem()),
            OutputFormat::Docx => docx::render_docx(&blocks, &self.style),
        }
    }

    /// Download name, e.g. `resume_Ada_Moreno.pdf`.
    pub fn file_name(record: &ResumeRecord, format: OutputFormat) -> String {
        format!("{}.{}", record.file_stem(), format.extension())
    }
}

/// Runs [`Renderer::render`] on the blocking pool.
pub async fn render_blocking(
    record: ResumeRecord,
    format: OutputFormat,
    kind: StyleKind,
) -> Result<Vec<u8>, RenderError> {
    let bytes = tokio::task::spawn_blocking(move || {
        Renderer::new(StyleConfig::for_kind(kind)).render(&record, format)
    })
    .await
    .map_err(|e| RenderError::Aborted(e.to_string()))??;

    info!("Rendered {:?} document with {:?} style ({} bytes)", format, kind, bytes.len());
    Ok(bytes)
}
