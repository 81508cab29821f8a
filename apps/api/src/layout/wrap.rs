//! Greedy word wrap against measured glyph widths.

use crate::layout::font_metrics::FontMetricTable;

/// Breaks `text` into lines no wider than `max_width_pt`.
///
/// Whitespace runs collapse to single spaces. A word wider than the line gets a line of its
/// own rather than being split. Empty or blank text yields no lines.
pub fn wrap_lines(
    text: &str,
    metrics: &FontMetricTable,
    font_size_pt: f32,
    max_width_pt: f32,
) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0.0_f32;
    let space_w = metrics.space_width * font_size_pt;

    for word in text.split_whitespace() {
        let word_w = metrics.measure_pt(word, font_size_pt);

        if current.is_empty() {
            current.push_str(word);
            current_width = word_w;
        } else if current_width + space_w + word_w > max_width_pt {
            // Line is full; start a new one with this word.
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_width = word_w;
        } else {
            current.push(' ');
            current.push_str(word);
            current_width += space_w + word_w;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::font_metrics::{get_metrics, FontFace};

    #[test]
    fn test_short_text_is_one_line() {
        let m = get_metrics(FontFace::Regular);
        assert_eq!(wrap_lines("Rust  engineer", m, 10.0, 500.0), vec!["Rust engineer"]);
    }

    #[test]
    fn test_blank_text_has_no_lines() {
        let m = get_metrics(FontFace::Regular);
        assert!(wrap_lines("   \n ", m, 10.0, 500.0).is_empty());
    }

    #[test]
    fn test_lines_respect_width() {
        let m = get_metrics(FontFace::Regular);
        let text = "Designed and operated a multi-region event pipeline handling two billion \
                    messages per day while cutting infrastructure cost by a third";
        let lines = wrap_lines(text, m, 10.0, 150.0);

        assert!(lines.len() > 1);
        for line in &lines {
            assert!(m.measure_pt(line, 10.0) <= 150.0, "overflowing line: {line}");
        }
        assert_eq!(lines.join(" "), text.split_whitespace().collect::<Vec<_>>().join(" "));
    }

    #[test]
    fn test_overlong_word_gets_own_line() {
        let m = get_metrics(FontFace::Regular);
        let lines = wrap_lines("a Supercalifragilisticexpialidocious b", m, 10.0, 60.0);
        assert_eq!(lines, vec!["a", "Supercalifragilisticexpialidocious", "b"]);
    }
}
