// Thin wrapper over `pdf-extract`: the text of every page, concatenated in page order.

use crate::upload::UploadError;

pub fn extract_text(data: &[u8]) -> Result<String, UploadError> {
    pdf_extract::extract_text_from_mem(data).map_err(|e| UploadError::Pdf(e.to_string()))
}
