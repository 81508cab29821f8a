//! PDF backend: lays [`Block`]s out top-to-bottom with the built-in Helvetica faces.
//!
//! Text is broken into lines with the width tables in `layout`, and a new page starts whenever
//! the next line would cross the bottom margin. The document id and every timestamp are fixed and
//! no XMP packet is written, so identical blocks produce identical bytes.

use std::collections::BTreeSet;

use printpdf::{
    BuiltinFont, Color, CustomPdfConformance, IndirectFontRef, Line, Mm, PdfConformance,
    PdfDocument, PdfDocumentReference, PdfLayerReference, Point, Pt, Rgb,
};
use time::OffsetDateTime;

use crate::layout::{get_metrics, wrap_lines, FontFace};
use crate::render::blocks::{Block, BULLET};
use crate::render::style::{Align, RgbColor, StyleConfig, TextStyle};
use crate::render::RenderError;

const DOCUMENT_ID: &str = "5245535547454E5245534547454E5245";
const LAYER_NAME: &str = "Content";

/// Baseline offset from the top of a line box, as a fraction of the leading.
const BASELINE_RATIO: f32 = 0.8;

/// Code points above Latin-1 that the WinAnsi encoding of the built-in faces still covers.
const WIN_ANSI_EXTRAS: &[char] = &[
    '\u{20AC}', '\u{201A}', '\u{0192}', '\u{201E}', '\u{2026}', '\u{2020}', '\u{2021}',
    '\u{02C6}', '\u{2030}', '\u{0160}', '\u{2039}', '\u{0152}', '\u{017D}', '\u{2018}',
    '\u{2019}', '\u{201C}', '\u{201D}', '\u{2022}', '\u{2013}', '\u{2014}', '\u{02DC}',
    '\u{2122}', '\u{0161}', '\u{203A}', '\u{0153}', '\u{017E}', '\u{0178}',
];

/// Whether a built-in Helvetica face can draw `c`. Anything else is dropped by the viewer.
fn win_ansi_encodable(c: char) -> bool {
    matches!(c, ' '..='~' | '\u{00A0}'..='\u{00FF}') || WIN_ANSI_EXTRAS.contains(&c)
}

fn unencodable_chars(text: &str) -> impl Iterator<Item = char> + '_ {
    text.chars()
        .filter(|&c| !c.is_control() && !win_ansi_encodable(c))
}

pub fn render_pdf(
    blocks: &[Block],
    style: &StyleConfig,
    title: &str,
) -> Result<Vec<u8>, RenderError> {
    let page = &style.page;
    let (doc, page_idx, layer_idx) = PdfDocument::new(
        title,
        Mm::from(Pt(page.width)),
        Mm::from(Pt(page.height)),
        LAYER_NAME,
    );
    let doc = doc
        .with_document_id(DOCUMENT_ID.to_string())
        .with_creation_date(OffsetDateTime::UNIX_EPOCH)
        .with_mod_date(OffsetDateTime::UNIX_EPOCH)
        .with_metadata_date(OffsetDateTime::UNIX_EPOCH)
        .with_conformance(PdfConformance::Custom(CustomPdfConformance {
            requires_icc_profile: false,
            requires_xmp_metadata: false,
            ..Default::default()
        }));

    let fonts = Fonts::load(&doc)?;
    let layer = doc.get_page(page_idx).get_layer(layer_idx);

    let mut writer = PageWriter {
        doc: &doc,
        layer,
        fonts,
        style,
        cursor: page.height - page.margin_top,
        pages: 1,
        unencodable: BTreeSet::new(),
    };
    for block in blocks {
        writer.block(block);
    }
    if !writer.unencodable.is_empty() {
        let dropped: String = writer.unencodable.iter().collect();
        tracing::warn!(%title, %dropped, "PDF text has characters Helvetica cannot encode");
    }
    tracing::debug!(pages = writer.pages, blocks = blocks.len(), "PDF laid out");
    drop(writer);

    let bytes = doc
        .save_to_bytes()
        .map_err(|e| RenderError::Pdf(e.to_string()))?;
    Ok(pin_trailer_id(bytes))
}

/// printpdf writes a fresh random instance id into the trailer `/ID` on every save. Overwrite
/// both id strings in place with [`DOCUMENT_ID`] digits. Lengths are unchanged, so every xref
/// offset stays valid.
fn pin_trailer_id(mut bytes: Vec<u8>) -> Vec<u8> {
    let Some(id_pos) = bytes.windows(3).rposition(|w| w == b"/ID") else {
        return bytes;
    };
    let Some(open) = bytes[id_pos..].iter().position(|&b| b == b'[') else {
        return bytes;
    };
    let start = id_pos + open + 1;
    let Some(close) = bytes[start..].iter().position(|&b| b == b']') else {
        return bytes;
    };

    let digits = DOCUMENT_ID.as_bytes();
    let mut next = 0;
    for byte in &mut bytes[start..start + close] {
        if byte.is_ascii_alphanumeric() {
            *byte = digits[next % digits.len()];
            next += 1;
        }
    }
    bytes
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    oblique: IndirectFontRef,
}

impl Fonts {
    fn load(doc: &PdfDocumentReference) -> Result<Self, RenderError> {
        let load = |font: BuiltinFont| {
            doc.add_builtin_font(font)
                .map_err(|e| RenderError::Pdf(format!("font load failed: {e}")))
        };
        Ok(Self {
            regular: load(BuiltinFont::Helvetica)?,
            bold: load(BuiltinFont::HelveticaBold)?,
            oblique: load(BuiltinFont::HelveticaOblique)?,
        })
    }

    fn get(&self, face: FontFace) -> &IndirectFontRef {
        match face {
            FontFace::Regular => &self.regular,
            FontFace::Bold => &self.bold,
            FontFace::Oblique => &self.oblique,
        }
    }
}

struct PageWriter<'a> {
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    fonts: Fonts,
    style: &'a StyleConfig,
    /// Top of the next line box, in points from the bottom edge.
    cursor: f32,
    pages: usize,
    unencodable: BTreeSet<char>,
}

impl PageWriter<'_> {
    fn block(&mut self, block: &Block) {
        let style = self.style;
        match block {
            Block::Title(text) => self.paragraph(&style.title, None, text),
            Block::Contact(text) => self.paragraph(&style.contact, None, text),
            Block::Heading(text) => self.paragraph(&style.heading, None, text),
            Block::Text { role, label, text } => {
                self.paragraph(style.text(*role), label.as_deref(), text)
            }
            Block::Bullet(text) => {
                self.paragraph(&style.bullet, None, &format!("{BULLET} {text}"))
            }
            Block::Rule => self.rule(),
            Block::Gap(points) => self.gap(*points),
        }
    }

    fn paragraph(&mut self, ts: &TextStyle, label: Option<&str>, text: &str) {
        let regular = get_metrics(ts.face);
        let width = self.style.page.content_width() - ts.indent;

        // The bold label shares the first line with the body text. Wrap against a narrower
        // column so the wider bold glyphs still fit.
        let (content, label_extra) = match label {
            Some(label) => {
                let bold_w = get_metrics(FontFace::Bold).measure_pt(label, ts.size);
                let plain_w = regular.measure_pt(label, ts.size);
                (format!("{label} {text}"), (bold_w - plain_w).max(0.0))
            }
            None => (text.to_string(), 0.0),
        };
        let lines = wrap_lines(&content, regular, ts.size, width - label_extra);
        if lines.is_empty() {
            return;
        }
        self.unencodable.extend(unencodable_chars(&content));

        if !self.at_page_top() {
            self.cursor -= ts.space_before;
        }
        for (i, line) in lines.iter().enumerate() {
            self.ensure_room(ts.leading);
            let baseline = self.cursor - ts.leading * BASELINE_RATIO;
            let x = self.line_x(ts, regular.measure_pt(line, ts.size) + label_extra);

            match label.filter(|_| i == 0) {
                Some(label) => {
                    let rest = line.strip_prefix(label).unwrap_or(line.as_str());
                    let label_w = get_metrics(FontFace::Bold).measure_pt(label, ts.size);
                    self.text(label, ts, FontFace::Bold, x, baseline);
                    self.text(rest, ts, ts.face, x + label_w, baseline);
                }
                None => self.text(line, ts, ts.face, x, baseline),
            }
            self.cursor -= ts.leading;
        }
        self.cursor -= ts.space_after;
    }

    fn line_x(&self, ts: &TextStyle, line_width: f32) -> f32 {
        let left = self.style.page.margin_left + ts.indent;
        match ts.align {
            Align::Center => {
                let room = self.style.page.content_width() - ts.indent;
                left + ((room - line_width) / 2.0).max(0.0)
            }
            Align::Left | Align::Justify => left,
        }
    }

    fn text(&self, text: &str, ts: &TextStyle, face: FontFace, x: f32, y: f32) {
        if text.is_empty() {
            return;
        }
        self.layer.set_fill_color(pdf_color(ts.color));
        self.layer.use_text(
            text,
            ts.size,
            Mm::from(Pt(x)),
            Mm::from(Pt(y)),
            self.fonts.get(face),
        );
    }

    fn rule(&mut self) {
        let rule = self.style.rule;
        let page = self.style.page;
        self.ensure_room(rule.thickness);
        let y = Mm::from(Pt(self.cursor - rule.thickness / 2.0));

        self.layer.set_outline_color(pdf_color(rule.color));
        self.layer.set_outline_thickness(rule.thickness);
        self.layer.add_line(Line {
            points: vec![
                (Point::new(Mm::from(Pt(page.margin_left)), y), false),
                (Point::new(Mm::from(Pt(page.width - page.margin_right)), y), false),
            ],
            is_closed: false,
        });
        self.cursor -= rule.thickness + rule.space_after;
    }

    fn gap(&mut self, points: f32) {
        if !self.at_page_top() {
            self.cursor -= points;
        }
    }

    fn at_page_top(&self) -> bool {
        self.cursor >= self.style.page.height - self.style.page.margin_top
    }

    fn ensure_room(&mut self, height: f32) {
        if self.cursor - height >= self.style.page.margin_bottom {
            return;
        }
        let page = self.style.page;
        let (page_idx, layer_idx) = self.doc.add_page(
            Mm::from(Pt(page.width)),
            Mm::from(Pt(page.height)),
            LAYER_NAME,
        );
        self.layer = self.doc.get_page(page_idx).get_layer(layer_idx);
        self.cursor = page.height - page.margin_top;
        self.pages += 1;
    }
}

fn pdf_color(color: RgbColor) -> Color {
    let (r, g, b) = color.unit();
    Color::Rgb(Rgb::new(r, g, b, None))
}
