//! Document upload boundary: turns an uploaded PDF or DOCX into plain text.
//!
//! Parsing is all-or-nothing. Any failure aborts the extract/optimize flow before a completion
//! call is made; there is no partial-text fallback.

use bytes::Bytes;
use thiserror::Error;
use tracing::info;

pub mod docx;
pub mod pdf;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Unsupported file type '{0}'. Please upload a PDF or DOCX file")]
    UnsupportedType(String),

    #[error("Error reading PDF: {0}")]
    Pdf(String),

    #[error("Error reading DOCX: {0}")]
    Docx(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
}

impl DocumentKind {
    /// Detects the format from the uploaded file name's extension.
    pub fn from_file_name(file_name: &str) -> Result<Self, UploadError> {
        let extension = file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();
        match extension.as_str() {
            "pdf" => Ok(DocumentKind::Pdf),
            "docx" => Ok(DocumentKind::Docx),
            _ => Err(UploadError::UnsupportedType(file_name.to_string())),
        }
    }
}

/// Synchronous parse. Prefer [`extract_text_blocking`] from async code.
pub fn extract_text(kind: DocumentKind, data: &[u8]) -> Result<String, UploadError> {
    match kind {
        DocumentKind::Pdf => pdf::extract_text(data),
        DocumentKind::Docx => docx::extract_text(data),
    }
}

/// Parses an upload on the blocking pool. A panic inside a parser becomes an [`UploadError`].
pub async fn extract_text_blocking(file_name: &str, data: Bytes) -> Result<String, UploadError> {
    let kind = DocumentKind::from_file_name(file_name)?;
    info!("Extracting text from {:?} upload '{}' ({} bytes)", kind, file_name, data.len());

    let text = tokio::task::spawn_blocking(move || extract_text(kind, &data))
        .await
        .map_err(|e| match kind {
            DocumentKind::Pdf => UploadError::Pdf(format!("parser aborted: {e}")),
            DocumentKind::Docx => UploadError::Docx(format!("parser aborted: {e}")),
        })??;

    info!("Extracted {} characters from '{}'", text.chars().count(), file_name);
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_file_name() {
        assert_eq!(DocumentKind::from_file_name("cv.pdf").unwrap(), DocumentKind::Pdf);
        assert_eq!(DocumentKind::from_file_name("My CV.DOCX").unwrap(), DocumentKind::Docx);
        assert!(matches!(
            DocumentKind::from_file_name("cv.txt"),
            Err(UploadError::UnsupportedType(_))
        ));
        assert!(DocumentKind::from_file_name("noextension").is_err());
    }

    #[tokio::test]
    async fn test_garbage_pdf_is_a_parse_error() {
        let err = extract_text_blocking("cv.pdf", Bytes::from_static(b"definitely not a pdf"))
            .await
            .unwrap_err();
        assert!(matches!(err, UploadError::Pdf(_)));
    }

    #[tokio::test]
    async fn test_unsupported_upload_is_rejected_without_parsing() {
        let err = extract_text_blocking("cv.odt", Bytes::from_static(b"PK"))
            .await
            .unwrap_err();
        assert!(matches!(err, UploadError::UnsupportedType(_)));
    }
}
