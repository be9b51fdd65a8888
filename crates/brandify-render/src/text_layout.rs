use std::sync::Arc;

use crate::render_ir::TextStyle;

/// Text measurement hook so layout wraps with the backend's glyph widths.
pub trait TextMeasurer: Send + Sync {
    /// Measure rendered text width for the provided style.
    fn measure_text_px(&self, text: &str, style: &TextStyle) -> f32;
}

/// Per-glyph class width model used when no backend measurer is attached.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeuristicTextMeasurer;

impl HeuristicTextMeasurer {
    pub fn shared() -> Arc<dyn TextMeasurer> {
        Arc::new(Self)
    }
}

impl TextMeasurer for HeuristicTextMeasurer {
    fn measure_text_px(&self, text: &str, style: &TextStyle) -> f32 {
        heuristic_measure_text(text, style)
    }
}

fn heuristic_measure_text(text: &str, style: &TextStyle) -> f32 {
    if text.is_empty() {
        return 0.0;
    }
    let family = style.family.to_ascii_lowercase();
    let proportional = !(family.contains("mono") || family.contains("fixed"));
    let mut em_sum = 0.0f32;
    if proportional {
        for ch in text.chars() {
            em_sum += proportional_glyph_em_width(ch);
        }
    } else {
        for ch in text.chars() {
            em_sum += if ch == ' ' { 0.52 } else { 0.58 };
        }
    }

    let mut family_scale = if family.contains("serif") && !family.contains("sans") {
        1.03
    } else {
        1.00
    };
    // Heavy display weights (800/900) run noticeably wider than bold.
    if style.weight >= 800 {
        family_scale += 0.06;
    } else if style.weight >= 600 {
        family_scale += 0.03;
    }
    if style.italic {
        family_scale += 0.01;
    }
    em_sum * style.size_px * family_scale
}

fn proportional_glyph_em_width(ch: char) -> f32 {
    match ch {
        ' ' => 0.32,
        '\t' => 1.28,
        '\u{00A0}' => 0.32,
        'i' | 'l' | 'I' | '|' | '!' => 0.24,
        '.' | ',' | ':' | ';' | '\'' | '"' | '`' => 0.23,
        '-' | '\u{2010}' | '\u{2011}' | '\u{2012}' | '\u{2013}' | '\u{2014}' => 0.34,
        '(' | ')' | '[' | ']' | '{' | '}' => 0.30,
        'f' | 't' | 'j' | 'r' => 0.34,
        'm' | 'w' | 'M' | 'W' | '@' | '%' | '&' | '#' => 0.74,
        c if c.is_ascii_digit() => 0.52,
        c if c.is_ascii_uppercase() => 0.64,
        c if c.is_ascii_lowercase() => 0.52,
        c if c.is_whitespace() => 0.32,
        c if c.is_ascii_punctuation() => 0.42,
        _ => 0.56,
    }
}

/// Greedy word wrap.
///
/// A word joins the current line while `line + " " + word` measures strictly
/// below `max_width`. A word wider than `max_width` sits alone on its line.
/// Empty input yields one empty line; a non-positive width yields one word
/// per line.
pub fn wrap_text(
    measurer: &dyn TextMeasurer,
    style: &TextStyle,
    text: &str,
    max_width: f32,
) -> Vec<String> {
    let mut words = text.split_whitespace();
    let Some(first) = words.next() else {
        return vec![String::new()];
    };

    let mut lines = Vec::new();
    let mut current = first.to_string();
    let mut candidate = String::with_capacity(64);
    for word in words {
        candidate.clear();
        candidate.push_str(&current);
        candidate.push(' ');
        candidate.push_str(word);
        if max_width > 0.0 && measurer.measure_text_px(&candidate, style) < max_width {
            core::mem::swap(&mut current, &mut candidate);
        } else {
            lines.push(core::mem::replace(&mut current, word.to_string()));
        }
    }
    lines.push(current);
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every char is 10px wide.
    struct FixedMeasurer;

    impl TextMeasurer for FixedMeasurer {
        fn measure_text_px(&self, text: &str, _style: &TextStyle) -> f32 {
            text.chars().count() as f32 * 10.0
        }
    }

    fn style() -> TextStyle {
        TextStyle::sans(500, 16.0)
    }

    #[test]
    fn empty_text_is_one_empty_line() {
        assert_eq!(wrap_text(&FixedMeasurer, &style(), "", 100.0), vec![""]);
        assert_eq!(wrap_text(&FixedMeasurer, &style(), "   ", 100.0), vec![""]);
    }

    #[test]
    fn strict_less_than_breaks_at_exact_width() {
        // "ab cd" is exactly 50px: must break.
        assert_eq!(
            wrap_text(&FixedMeasurer, &style(), "ab cd", 50.0),
            vec!["ab", "cd"]
        );
        assert_eq!(
            wrap_text(&FixedMeasurer, &style(), "ab cd", 51.0),
            vec!["ab cd"]
        );
    }

    #[test]
    fn long_word_sits_alone_unsplit() {
        let lines = wrap_text(&FixedMeasurer, &style(), "a extraordinarily b", 40.0);
        assert_eq!(lines, vec!["a", "extraordinarily", "b"]);
    }

    #[test]
    fn non_positive_width_degrades_to_word_per_line() {
        assert_eq!(
            wrap_text(&FixedMeasurer, &style(), "one two three", 0.0),
            vec!["one", "two", "three"]
        );
        assert_eq!(
            wrap_text(&FixedMeasurer, &style(), "one two", -5.0),
            vec!["one", "two"]
        );
    }

    #[test]
    fn multi_word_lines_fit_within_width() {
        let text = "Office Field is looking for a skilled engineer to build and deploy systems";
        let measurer = HeuristicTextMeasurer;
        let lines = wrap_text(&measurer, &style(), text, 180.0);
        assert!(lines.len() > 1);
        for line in &lines {
            if line.contains(' ') {
                assert!(measurer.measure_text_px(line, &style()) < 180.0, "{line}");
            }
        }
        assert_eq!(lines.join(" "), text);
    }

    #[test]
    fn heavier_weights_measure_wider() {
        let m = HeuristicTextMeasurer;
        let regular = m.measure_text_px("HIRING", &TextStyle::sans(400, 48.0));
        let black = m.measure_text_px("HIRING", &TextStyle::sans(900, 48.0));
        assert!(black > regular);
        assert_eq!(m.measure_text_px("", &style()), 0.0);
    }
}
