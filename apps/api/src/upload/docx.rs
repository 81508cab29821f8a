//! DOCX text extraction: `word/document.xml` read from the ZIP container, one line per
//! paragraph.

use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::upload::UploadError;

const DOCUMENT_XML: &str = "word/document.xml";

pub fn extract_text(data: &[u8]) -> Result<String, UploadError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(data))
        .map_err(|e| UploadError::Docx(format!("not a DOCX archive: {e}")))?;

    let mut xml = String::new();
    archive
        .by_name(DOCUMENT_XML)
        .map_err(|_| UploadError::Docx(format!("missing {DOCUMENT_XML}")))?
        .read_to_string(&mut xml)
        .map_err(|e| UploadError::Docx(format!("failed to read {DOCUMENT_XML}: {e}")))?;

    paragraphs_to_text(&xml)
}

/// Concatenates the `w:t` runs of each `w:p`, ending every paragraph (empty ones included)
/// with a newline.
fn paragraphs_to_text(xml: &str) -> Result<String, UploadError> {
    let mut reader = Reader::from_str(xml);
    let mut output = String::new();
    let mut paragraph = String::new();
    let mut in_paragraph = false;
    let mut in_text = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"p" => {
                    in_paragraph = true;
                    paragraph.clear();
                }
                b"t" => in_text = true,
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.local_name().as_ref() {
                b"p" => output.push('\n'),
                b"tab" if in_paragraph => paragraph.push('\t'),
                b"br" if in_paragraph => paragraph.push('\n'),
                _ => {}
            },
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"p" => {
                    output.push_str(&paragraph);
                    output.push('\n');
                    in_paragraph = false;
                }
                b"t" => in_text = false,
                _ => {}
            },
            Ok(Event::Text(e)) if in_text => {
                let text = e
                    .unescape()
                    .map_err(|err| UploadError::Docx(format!("bad text in {DOCUMENT_XML}: {err}")))?;
                paragraph.push_str(&text);
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(UploadError::Docx(format!(
                    "XML error at position {}: {e}",
                    reader.buffer_position()
                )))
            }
            _ => {}
        }
    }

    Ok(output)
}
