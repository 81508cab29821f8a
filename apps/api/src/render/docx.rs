//! DOCX backend: writes a minimal WordprocessingML package from [`Block`]s.
//!
//! Only three parts are emitted (content types, package relationships, the main document).
//! Word falls back to its built-in defaults for styles, numbering and settings. Every zip entry
//! carries the same fixed timestamp so output is byte-stable.

use std::io::{Cursor, Write};

use quick_xml::escape::escape;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::layout::FontFace;
use crate::render::blocks::{Block, BULLET};
use crate::render::style::{Align, RgbColor, StyleConfig, TextStyle};
use crate::render::RenderError;

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#;

const PACKAGE_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

const DOCUMENT_OPEN: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>"#;

const FONT_NAME: &str = "Helvetica";

pub fn render_docx(blocks: &[Block], style: &StyleConfig) -> Result<Vec<u8>, RenderError> {
    let document = document_xml(blocks, style);

    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(zip::DateTime::default());

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, body) in [
        ("[Content_Types].xml", CONTENT_TYPES),
        ("_rels/.rels", PACKAGE_RELS),
        ("word/document.xml", document.as_str()),
    ] {
        zip.start_file(name, options)
            .map_err(|e| RenderError::Docx(format!("{name}: {e}")))?;
        zip.write_all(body.as_bytes())
            .map_err(|e| RenderError::Docx(format!("{name}: {e}")))?;
    }

    let cursor = zip
        .finish()
        .map_err(|e| RenderError::Docx(e.to_string()))?;
    Ok(cursor.into_inner())
}

/// Serialises the blocks into `word/document.xml`.
pub fn document_xml(blocks: &[Block], style: &StyleConfig) -> String {
    let mut xml = String::from(DOCUMENT_OPEN);

    for block in blocks {
        match block {
            Block::Title(text) => paragraph(&mut xml, &style.title, &[(text, style.title.face)]),
            Block::Contact(text) => {
                paragraph(&mut xml, &style.contact, &[(text, style.contact.face)])
            }
            Block::Heading(text) => {
                paragraph(&mut xml, &style.heading, &[(text, style.heading.face)])
            }
            Block::Text { role, label, text } => {
                let ts = style.text(*role);
                match label {
                    Some(label) => paragraph(
                        &mut xml,
                        ts,
                        &[(&format!("{label} "), FontFace::Bold), (text, ts.face)],
                    ),
                    None => paragraph(&mut xml, ts, &[(text, ts.face)]),
                }
            }
            Block::Bullet(text) => paragraph(
                &mut xml,
                &style.bullet,
                &[(&format!("{BULLET} {text}"), style.bullet.face)],
            ),
            Block::Rule => rule(&mut xml, style),
            Block::Gap(points) => xml.push_str(&format!(
                r#"<w:p><w:pPr><w:spacing w:before="0" w:after="{}" w:line="20" w:lineRule="exact"/></w:pPr></w:p>"#,
                twips(*points)
            )),
        }
    }

    let page = &style.page;
    xml.push_str(&format!(
        r#"<w:sectPr><w:pgSz w:w="{}" w:h="{}"/><w:pgMar w:top="{}" w:right="{}" w:bottom="{}" w:left="{}" w:header="0" w:footer="0" w:gutter="0"/></w:sectPr>"#,
        twips(page.width),
        twips(page.height),
        twips(page.margin_top),
        twips(page.margin_right),
        twips(page.margin_bottom),
        twips(page.margin_left),
    ));
    xml.push_str("</w:body></w:document>");
    xml
}

fn paragraph(xml: &mut String, ts: &TextStyle, runs: &[(&String, FontFace)]) {
    xml.push_str("<w:p><w:pPr>");
    xml.push_str(&format!(
        r#"<w:spacing w:before="{}" w:after="{}" w:line="{}" w:lineRule="atLeast"/>"#,
        twips(ts.space_before),
        twips(ts.space_after),
        twips(ts.leading),
    ));
    if ts.indent > 0.0 {
        xml.push_str(&format!(r#"<w:ind w:left="{}"/>"#, twips(ts.indent)));
    }
    let jc = match ts.align {
        Align::Left => "left",
        Align::Center => "center",
        Align::Justify => "both",
    };
    xml.push_str(&format!(r#"<w:jc w:val="{jc}"/></w:pPr>"#));

    for (text, face) in runs {
        run(xml, text, *face, ts.size, ts.color);
    }
    xml.push_str("</w:p>");
}

fn run(xml: &mut String, text: &str, face: FontFace, size: f32, color: RgbColor) {
    xml.push_str(&format!(
        r#"<w:r><w:rPr><w:rFonts w:ascii="{FONT_NAME}" w:hAnsi="{FONT_NAME}" w:cs="{FONT_NAME}"/>"#
    ));
    if face.is_bold() {
        xml.push_str("<w:b/>");
    }
    if face.is_italic() {
        xml.push_str("<w:i/>");
    }
    xml.push_str(&format!(
        r#"<w:color w:val="{}"/><w:sz w:val="{}"/></w:rPr><w:t xml:space="preserve">{}</w:t></w:r>"#,
        color.hex(),
        (size * 2.0).round() as u32,
        escape(text),
    ));
}

fn rule(xml: &mut String, style: &StyleConfig) {
    let rule = style.rule;
    xml.push_str(&format!(
        r#"<w:p><w:pPr><w:pBdr><w:bottom w:val="single" w:sz="{}" w:space="1" w:color="{}"/></w:pBdr><w:spacing w:before="0" w:after="{}" w:line="20" w:lineRule="exact"/></w:pPr></w:p>"#,
        (rule.thickness * 8.0).round() as u32,
        rule.color.hex(),
        twips(rule.space_after),
    ));
}

/// Points to twentieths of a point.
fn twips(points: f32) -> i64 {
    (points * 20.0).round() as i64
}
