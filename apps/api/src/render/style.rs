//! Fixed style constants for the two résumé looks.
//!
//! Sizes, leading, spacing and margins are in points. Both backends read the same values, so a
//! style change shows up identically in PDF and DOCX output.

use serde::{Deserialize, Serialize};

use crate::layout::FontFace;

/// Which of the built-in looks to render with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleKind {
    Basic,
    #[default]
    Stylish,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RgbColor(pub u8, pub u8, pub u8);

impl RgbColor {
    /// `RRGGBB`, as WordprocessingML expects it.
    pub fn hex(self) -> String {
        format!("{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }

    /// Components scaled to `0.0..=1.0`.
    pub fn unit(self) -> (f32, f32, f32) {
        (
            f32::from(self.0) / 255.0,
            f32::from(self.1) / 255.0,
            f32::from(self.2) / 255.0,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    /// Full justification. The PDF backend sets these paragraphs ragged-right.
    Justify,
}

/// Paragraph + run formatting for one text role.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub face: FontFace,
    pub size: f32,
    pub leading: f32,
    pub color: RgbColor,
    pub space_before: f32,
    pub space_after: f32,
    pub indent: f32,
    pub align: Align,
}

impl TextStyle {
    const fn body(size: f32, leading: f32, color: RgbColor) -> Self {
        Self {
            face: FontFace::Regular,
            size,
            leading,
            color,
            space_before: 0.0,
            space_after: 0.0,
            indent: 0.0,
            align: Align::Left,
        }
    }

    const fn face(mut self, face: FontFace) -> Self {
        self.face = face;
        self
    }

    const fn after(mut self, space_after: f32) -> Self {
        self.space_after = space_after;
        self
    }

    const fn before(mut self, space_before: f32) -> Self {
        self.space_before = space_before;
        self
    }

    const fn indent(mut self, indent: f32) -> Self {
        self.indent = indent;
        self
    }

    const fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }
}

/// Text roles a block can carry. Each maps to one [`TextStyle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextRole {
    Body,
    /// Body text that is never justified (skills line, technologies line).
    Plain,
    JobTitle,
    Company,
    Duration,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RuleStyle {
    pub color: RgbColor,
    pub thickness: f32,
    pub space_after: f32,
}

/// US-letter page with per-edge margins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin_top: f32,
    pub margin_bottom: f32,
    pub margin_left: f32,
    pub margin_right: f32,
}

impl PageGeometry {
    const fn letter(vertical: f32, horizontal: f32) -> Self {
        Self {
            width: 612.0,
            height: 792.0,
            margin_top: vertical,
            margin_bottom: vertical,
            margin_left: horizontal,
            margin_right: horizontal,
        }
    }

    pub fn content_width(&self) -> f32 {
        self.width - self.margin_left - self.margin_right
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SectionHeadings {
    pub summary: &'static str,
    pub skills: &'static str,
    pub experience: &'static str,
    pub projects: &'static str,
    pub education: &'static str,
    pub certifications: &'static str,
}

/// Vertical space inserted after a section body or after each entry of a repeated section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gaps {
    pub section: f32,
    pub experience_entry: f32,
    pub project_entry: f32,
    pub education_entry: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StyleConfig {
    pub kind: StyleKind,
    pub page: PageGeometry,
    pub headings: SectionHeadings,
    pub gaps: Gaps,
    pub rule: RuleStyle,
    pub uppercase_name: bool,
    /// Render `Title - Company` on one line instead of two styled lines.
    pub inline_company: bool,
    pub title: TextStyle,
    pub contact: TextStyle,
    pub heading: TextStyle,
    pub body: TextStyle,
    pub plain: TextStyle,
    pub job_title: TextStyle,
    pub company: TextStyle,
    pub duration: TextStyle,
    pub bullet: TextStyle,
}

const INCH: f32 = 72.0;

impl StyleConfig {
    pub fn for_kind(kind: StyleKind) -> Self {
        match kind {
            StyleKind::Basic => Self::basic(),
            StyleKind::Stylish => Self::stylish(),
        }
    }

    /// Single-colour layout: slate headings, inline `Title - Company`, 1" side margins.
    pub fn basic() -> Self {
        let ink = RgbColor(0x2C, 0x3E, 0x50);
        let soft = RgbColor(0x5D, 0x6D, 0x7E);
        let heading = RgbColor(0x34, 0x49, 0x5E);
        let body = TextStyle::body(10.0, 14.0, ink).after(6.0);

        Self {
            kind: StyleKind::Basic,
            page: PageGeometry::letter(0.5 * INCH, INCH),
            headings: SectionHeadings {
                summary: "PROFESSIONAL SUMMARY",
                skills: "SKILLS",
                experience: "WORK EXPERIENCE",
                projects: "PROJECTS",
                education: "EDUCATION",
                certifications: "CERTIFICATIONS",
            },
            gaps: Gaps {
                section: 0.1 * INCH,
                experience_entry: 0.1 * INCH,
                project_entry: 0.1 * INCH,
                education_entry: 0.1 * INCH,
            },
            rule: RuleStyle {
                color: RgbColor(0xBD, 0xC3, 0xC7),
                thickness: 1.0,
                space_after: 12.0,
            },
            uppercase_name: false,
            inline_company: true,
            title: TextStyle::body(24.0, 28.8, ink)
                .face(FontFace::Bold)
                .after(6.0)
                .align(Align::Center),
            contact: TextStyle::body(10.0, 12.0, soft)
                .after(12.0)
                .align(Align::Center),
            heading: TextStyle::body(14.0, 16.8, heading)
                .face(FontFace::Bold)
                .before(12.0)
                .after(8.0),
            body,
            plain: body,
            job_title: body.face(FontFace::Bold),
            company: body,
            duration: body.face(FontFace::Oblique),
            bullet: body,
        }
    }

    /// Blue palette with uppercased name, two-line job headers and indented bullets.
    pub fn stylish() -> Self {
        let primary = RgbColor(0x1A, 0x54, 0x90);
        let secondary = RgbColor(0x2C, 0x3E, 0x50);
        let accent = RgbColor(0x34, 0x98, 0xDB);
        let muted = RgbColor(0x7F, 0x8C, 0x8D);

        Self {
            kind: StyleKind::Stylish,
            page: PageGeometry::letter(0.5 * INCH, 0.75 * INCH),
            headings: SectionHeadings {
                summary: "PROFESSIONAL SUMMARY",
                skills: "CORE COMPETENCIES",
                experience: "PROFESSIONAL EXPERIENCE",
                projects: "PROJECTS",
                education: "EDUCATION",
                certifications: "CERTIFICATIONS",
            },
            gaps: Gaps {
                section: 0.15 * INCH,
                experience_entry: 0.12 * INCH,
                project_entry: 0.1 * INCH,
                education_entry: 0.08 * INCH,
            },
            rule: RuleStyle {
                color: primary,
                thickness: 2.0,
                space_after: 16.0,
            },
            uppercase_name: true,
            inline_company: false,
            title: TextStyle::body(28.0, 32.0, primary)
                .face(FontFace::Bold)
                .after(4.0)
                .align(Align::Center),
            contact: TextStyle::body(10.0, 14.0, secondary)
                .after(16.0)
                .align(Align::Center),
            heading: TextStyle::body(13.0, 16.0, primary)
                .face(FontFace::Bold)
                .before(14.0)
                .after(10.0),
            body: TextStyle::body(10.0, 14.0, secondary)
                .after(8.0)
                .align(Align::Justify),
            plain: TextStyle::body(10.0, 14.0, secondary).after(6.0),
            job_title: TextStyle::body(11.0, 14.0, secondary)
                .face(FontFace::Bold)
                .after(2.0),
            company: TextStyle::body(10.0, 12.0, accent)
                .face(FontFace::Bold)
                .after(2.0),
            duration: TextStyle::body(9.0, 11.0, muted)
                .face(FontFace::Oblique)
                .after(6.0),
            bullet: TextStyle::body(10.0, 13.0, secondary)
                .after(4.0)
                .indent(20.0),
        }
    }

    pub fn text(&self, role: TextRole) -> &TextStyle {
        match role {
            TextRole::Body => &self.body,
            TextRole::Plain => &self.plain,
            TextRole::JobTitle => &self.job_title,
            TextRole::Company => &self.company,
            TextRole::Duration => &self.duration,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_is_uppercase_six_digits() {
        assert_eq!(RgbColor(0x1A, 0x54, 0x90).hex(), "1A5490");
        assert_eq!(RgbColor(0, 0, 0).hex(), "000000");
    }

    #[test]
    fn test_margins() {
        let basic = StyleConfig::basic();
        assert_eq!(basic.page.margin_top, 36.0);
        assert_eq!(basic.page.content_width(), 612.0 - 144.0);

        let stylish = StyleConfig::stylish();
        assert_eq!(stylish.page.margin_left, 54.0);
        assert_eq!(stylish.page.margin_bottom, 36.0);
    }

    #[test]
    fn test_styles_differ_only_in_constants() {
        let basic = StyleConfig::basic();
        let stylish = StyleConfig::stylish();
        assert_eq!(basic.headings.skills, "SKILLS");
        assert_eq!(stylish.headings.skills, "CORE COMPETENCIES");
        assert!(stylish.uppercase_name && !basic.uppercase_name);
        assert_eq!(StyleConfig::for_kind(StyleKind::Basic), basic);
    }

    #[test]
    fn test_style_kind_deserializes_lowercase() {
        let kind: StyleKind = serde_json::from_str("\"basic\"").unwrap();
        assert_eq!(kind, StyleKind::Basic);
    }
}
