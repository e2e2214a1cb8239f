//! Greedy word wrapping against font metrics.

use crate::writer::{FontManager, FontWeight};

/// Font face and size used to measure and draw a run of text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontSpec {
    /// Helvetica weight
    pub weight: FontWeight,
    /// Size in points
    pub size: f32,
}

impl FontSpec {
    /// Bold Helvetica at `size` points.
    pub const fn bold(size: f32) -> Self {
        Self {
            weight: FontWeight::Bold,
            size,
        }
    }

    /// Regular Helvetica at `size` points.
    pub const fn regular(size: f32) -> Self {
        Self {
            weight: FontWeight::Normal,
            size,
        }
    }
}

/// Splits text into lines that fit a maximum width.
///
/// Widths are measured with the same metrics the PDF writer declares, so a
/// line that fits here fits on the page.
#[derive(Debug, Clone, Default)]
pub struct TextFitter {
    fonts: FontManager,
}

impl TextFitter {
    /// Create a fitter over the Helvetica metrics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Width of `text` in points.
    pub fn measure(&self, text: &str, font: FontSpec) -> f32 {
        self.fonts.text_width(text, font.weight, font.size)
    }

    /// Distance from the top of a line box to its baseline, in points.
    pub fn ascent(&self, font: FontSpec) -> f32 {
        self.fonts.ascent(font.weight, font.size)
    }

    /// Wrap `text` into lines no wider than `max_width` points.
    ///
    /// Text is split on single spaces and words are appended to the current
    /// line while the candidate line still fits, so spacing inside a line is
    /// kept as written. A word that alone is wider than `max_width` gets a
    /// line of its own and is never broken. Spaces at the start of a line
    /// are dropped; blank text yields no lines.
    pub fn wrap(&self, text: &str, max_width: f32, font: FontSpec) -> Vec<String> {
        let mut lines = Vec::new();
        let mut current = String::new();

        for word in text.split(' ') {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", current, word)
            };

            if !current.is_empty() && self.measure(&candidate, font) > max_width {
                lines.push(std::mem::replace(&mut current, word.to_string()));
            } else {
                current = candidate;
            }
        }

        if !current.is_empty() {
            lines.push(current);
        }

        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TITLE: FontSpec = FontSpec::bold(14.0);

    #[test]
    fn test_short_text_single_line() {
        let fitter = TextFitter::new();
        let lines = fitter.wrap("Solar roads", 1000.0, TITLE);
        assert_eq!(lines, vec!["Solar roads".to_string()]);
    }

    #[test]
    fn test_wraps_at_word_boundaries() {
        let fitter = TextFitter::new();
        let text = "The quick brown fox jumps over the lazy dog";
        let lines = fitter.wrap(text, 100.0, FontSpec::regular(12.0));

        assert!(lines.len() > 1);
        assert_eq!(lines.join(" "), text);
        for line in &lines {
            assert!(fitter.measure(line, FontSpec::regular(12.0)) <= 100.0);
        }
    }

    #[test]
    fn test_long_word_kept_whole() {
        let fitter = TextFitter::new();
        let lines = fitter.wrap("a Pneumonoultramicroscopicsilicovolcanoconiosis b", 40.0, TITLE);
        assert_eq!(
            lines,
            vec!["a", "Pneumonoultramicroscopicsilicovolcanoconiosis", "b"]
        );
    }

    #[test]
    fn test_empty_and_blank() {
        let fitter = TextFitter::new();
        assert!(fitter.wrap("", 100.0, TITLE).is_empty());
        assert!(fitter.wrap("   ", 100.0, TITLE).is_empty());
    }

    #[test]
    fn test_inner_spacing_kept() {
        let fitter = TextFitter::new();
        assert_eq!(fitter.wrap("Solar  roads", 1000.0, TITLE), vec!["Solar  roads"]);
        assert_eq!(fitter.wrap("  Solar roads", 1000.0, TITLE), vec!["Solar roads"]);
    }

    #[test]
    fn test_fitting_text_returned_unchanged() {
        let fitter = TextFitter::new();
        for text in ["Vertical   farming", "3D printed homes", "a b  c   d"] {
            let width = fitter.measure(text, TITLE) + 0.5;
            assert_eq!(fitter.wrap(text, width, TITLE), vec![text.to_string()]);
        }
    }

    #[test]
    fn test_bold_wraps_sooner() {
        let fitter = TextFitter::new();
        let text = "illuminating little lilies in lit fields";
        let regular = fitter.wrap(text, 90.0, FontSpec::regular(10.0));
        let bold = fitter.wrap(text, 90.0, FontSpec::bold(10.0));
        assert!(bold.len() >= regular.len());
    }
}
