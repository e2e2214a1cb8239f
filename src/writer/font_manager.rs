//! Font management for PDF generation.
//!
//! Provides metrics for the Helvetica family of the PDF Base-14 fonts so
//! that text can be measured with exactly the widths a viewer will use to
//! render it. Text is written with `WinAnsiEncoding`.

/// Character drawn in place of anything WinAnsiEncoding cannot represent.
pub const REPLACEMENT_CHAR: char = '?';

/// Font weight classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontWeight {
    /// Normal weight
    #[default]
    Normal,
    /// Bold weight
    Bold,
}

impl FontWeight {
    /// PostScript name of the Helvetica face with this weight.
    pub fn base_font(&self) -> &'static str {
        match self {
            FontWeight::Normal => "Helvetica",
            FontWeight::Bold => "Helvetica-Bold",
        }
    }

    /// Key of this face under `/Font` in page resources.
    pub fn resource_name(&self) -> &'static str {
        match self {
            FontWeight::Normal => "Helvetica",
            FontWeight::Bold => "HelveticaBold",
        }
    }
}

/// Font manager for PDF generation.
///
/// Holds the Helvetica and Helvetica-Bold metrics used by both the text
/// fitter and the page compositor.
#[derive(Debug, Clone)]
pub struct FontManager {
    regular: FontInfo,
    bold: FontInfo,
}

impl FontManager {
    /// Create a new font manager with the Helvetica faces registered.
    pub fn new() -> Self {
        Self {
            regular: FontInfo::helvetica(FontWeight::Normal),
            bold: FontInfo::helvetica(FontWeight::Bold),
        }
    }

    /// Get font info for a weight.
    pub fn font(&self, weight: FontWeight) -> &FontInfo {
        match weight {
            FontWeight::Normal => &self.regular,
            FontWeight::Bold => &self.bold,
        }
    }

    /// Calculate the width of a string at the given size.
    ///
    /// Returns width in points.
    pub fn text_width(&self, text: &str, weight: FontWeight, font_size: f32) -> f32 {
        self.font(weight).text_width(text, font_size)
    }

    /// Distance from baseline to the top of the tallest glyphs, in points.
    pub fn ascent(&self, weight: FontWeight, font_size: f32) -> f32 {
        self.font(weight).ascender * font_size / 1000.0
    }
}

impl Default for FontManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Information about a font.
#[derive(Debug, Clone)]
pub struct FontInfo {
    /// Font weight
    pub weight: FontWeight,
    /// Advance widths of the printable ASCII range, 1/1000 em
    ascii_widths: &'static [u16; 95],
    /// Advance widths of WinAnsi bytes 0x80..=0xFF, 1/1000 em
    high_widths: &'static [u16; 128],
    /// Ascender height (above baseline)
    pub ascender: f32,
}

impl FontInfo {
    fn helvetica(weight: FontWeight) -> Self {
        let (ascii_widths, high_widths) = match weight {
            FontWeight::Normal => (&HELVETICA_WIDTHS, &HELVETICA_HIGH_WIDTHS),
            FontWeight::Bold => (&HELVETICA_BOLD_WIDTHS, &HELVETICA_BOLD_HIGH_WIDTHS),
        };
        Self {
            weight,
            ascii_widths,
            high_widths,
            ascender: 718.0,
        }
    }

    /// Calculate the width of text in this font.
    ///
    /// Returns width in points for the given font size.
    pub fn text_width(&self, text: &str, font_size: f32) -> f32 {
        let width_units: f32 = text.chars().map(|c| self.char_width(c)).sum();
        width_units * font_size / 1000.0
    }

    /// Width of the glyph `ch` is drawn with, in 1/1000 em.
    ///
    /// Characters outside WinAnsiEncoding measure as [`REPLACEMENT_CHAR`].
    pub fn char_width(&self, ch: char) -> f32 {
        let byte = win_ansi_byte(ch).unwrap_or(REPLACEMENT_CHAR as u8);
        let units = match byte {
            0x20..=0x7E => self.ascii_widths[(byte - 0x20) as usize],
            0x80..=0xFF => self.high_widths[(byte - 0x80) as usize],
            _ => 0,
        };
        units as f32
    }
}

/// WinAnsiEncoding byte for a character, if it has one.
///
/// See PDF 32000-1:2008 Annex D.2.
pub fn win_ansi_byte(ch: char) -> Option<u8> {
    let code = ch as u32;
    match code {
        0x20..=0x7E | 0xA0..=0xFF => Some(code as u8),
        _ => {
            let byte = match ch {
                '\u{20AC}' => 0x80,
                '\u{201A}' => 0x82,
                '\u{0192}' => 0x83,
                '\u{201E}' => 0x84,
                '\u{2026}' => 0x85,
                '\u{2020}' => 0x86,
                '\u{2021}' => 0x87,
                '\u{02C6}' => 0x88,
                '\u{2030}' => 0x89,
                '\u{0160}' => 0x8A,
                '\u{2039}' => 0x8B,
                '\u{0152}' => 0x8C,
                '\u{017D}' => 0x8E,
                '\u{2018}' => 0x91,
                '\u{2019}' => 0x92,
                '\u{201C}' => 0x93,
                '\u{201D}' => 0x94,
                '\u{2022}' => 0x95,
                '\u{2013}' => 0x96,
                '\u{2014}' => 0x97,
                '\u{02DC}' => 0x98,
                '\u{2122}' => 0x99,
                '\u{0161}' => 0x9A,
                '\u{203A}' => 0x9B,
                '\u{0153}' => 0x9C,
                '\u{017E}' => 0x9E,
                '\u{0178}' => 0x9F,
                _ => return None,
            };
            Some(byte)
        },
    }
}

/// Encode text for a `Tj` operator under WinAnsiEncoding.
///
/// Unrepresentable characters become [`REPLACEMENT_CHAR`].
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|ch| win_ansi_byte(ch).unwrap_or(REPLACEMENT_CHAR as u8))
        .collect()
}

/// Helvetica advance widths for U+0020..=U+007E (Adobe AFM).
#[rustfmt::skip]
static HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

/// Helvetica-Bold advance widths for U+0020..=U+007E (Adobe AFM).
#[rustfmt::skip]
static HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

/// Helvetica advance widths for WinAnsi 0x80..=0xFF (Adobe AFM); unused codes are 0.
#[rustfmt::skip]
static HELVETICA_HIGH_WIDTHS: [u16; 128] = [
    556, 0, 222, 556, 333, 1000, 556, 556, 333, 1000, 667, 333, 1000, 0, 611, 0,
    0, 222, 222, 333, 333, 350, 556, 1000, 333, 1000, 500, 333, 944, 0, 500, 667,
    278, 333, 556, 556, 556, 556, 260, 556, 333, 737, 370, 556, 584, 333, 737, 333,
    400, 584, 333, 333, 333, 556, 537, 278, 333, 333, 365, 556, 834, 834, 834, 611,
    667, 667, 667, 667, 667, 667, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278,
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611,
    556, 556, 556, 556, 556, 556, 889, 500, 556, 556, 556, 556, 278, 278, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 584, 611, 556, 556, 556, 556, 500, 556, 500,
];

/// Helvetica-Bold advance widths for WinAnsi 0x80..=0xFF (Adobe AFM); unused codes are 0.
#[rustfmt::skip]
static HELVETICA_BOLD_HIGH_WIDTHS: [u16; 128] = [
    556, 0, 278, 556, 500, 1000, 556, 556, 333, 1000, 667, 333, 1000, 0, 611, 0,
    0, 278, 278, 500, 500, 350, 556, 1000, 333, 1000, 556, 333, 944, 0, 500, 667,
    278, 333, 556, 556, 556, 556, 280, 556, 333, 737, 370, 556, 584, 333, 737, 333,
    400, 584, 333, 333, 333, 611, 556, 278, 333, 333, 365, 556, 834, 834, 834, 611,
    722, 722, 722, 722, 722, 722, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278,
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611,
    556, 556, 556, 556, 556, 556, 889, 556, 556, 556, 556, 556, 278, 278, 278, 278,
    611, 611, 611, 611, 611, 611, 611, 584, 611, 611, 611, 611, 611, 556, 611, 556,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_helvetica_widths() {
        let fm = FontManager::new();
        // "Hello": H=722 e=556 l=222 l=222 o=556 = 2278
        let width = fm.text_width("Hello", FontWeight::Normal, 10.0);
        assert!((width - 22.78).abs() < 0.001);
    }

    #[test]
    fn test_bold_is_wider() {
        let fm = FontManager::new();
        let normal = fm.text_width("illustration", FontWeight::Normal, 12.0);
        let bold = fm.text_width("illustration", FontWeight::Bold, 12.0);
        assert!(bold > normal);
    }

    #[test]
    fn test_space_width() {
        let fm = FontManager::new();
        assert!((fm.text_width(" ", FontWeight::Bold, 1000.0) - 278.0).abs() < 0.001);
    }

    #[test]
    fn test_accented_letters_use_base_width() {
        let font = FontInfo::helvetica(FontWeight::Normal);
        assert_eq!(font.char_width('é'), font.char_width('e'));
        assert_eq!(font.char_width('Ñ'), font.char_width('N'));
    }

    #[test]
    fn test_upper_win_ansi_widths() {
        let regular = FontInfo::helvetica(FontWeight::Normal);
        let bold = FontInfo::helvetica(FontWeight::Bold);
        assert_eq!(regular.char_width('æ'), 889.0);
        assert_eq!(regular.char_width('Æ'), 1000.0);
        assert_eq!(regular.char_width('\u{2122}'), 1000.0);
        assert_eq!(regular.char_width('×'), 584.0);
        assert_eq!(regular.char_width('¿'), 611.0);
        assert_eq!(regular.char_width('œ'), 944.0);
        assert_eq!(regular.char_width('\u{201C}'), 333.0);
        assert_eq!(bold.char_width('\u{201C}'), 500.0);
        assert_eq!(regular.char_width('š'), 500.0);
        assert_eq!(bold.char_width('š'), 556.0);
        assert_eq!(bold.char_width('þ'), 611.0);
        assert_eq!(bold.char_width('Ð'), 722.0);
    }

    #[test]
    fn test_every_encodable_char_has_a_width() {
        for weight in [FontWeight::Normal, FontWeight::Bold] {
            let font = FontInfo::helvetica(weight);
            for code in (0x20u32..=0x17F).chain(0x2000..=0x2130) {
                let Some(ch) = char::from_u32(code) else { continue };
                if win_ansi_byte(ch).is_some() {
                    assert!(font.char_width(ch) > 0.0, "{:?} has no width", ch);
                }
            }
        }
    }

    #[test]
    fn test_unencodable_measured_as_replacement() {
        let font = FontInfo::helvetica(FontWeight::Normal);
        assert_eq!(font.char_width('漢'), font.char_width('?'));
    }

    #[test]
    fn test_ascent() {
        let fm = FontManager::new();
        assert!((fm.ascent(FontWeight::Bold, 10.0) - 7.18).abs() < 0.001);
    }

    #[test]
    fn test_win_ansi_encoding() {
        assert_eq!(encode_win_ansi("Café"), vec![b'C', b'a', b'f', 0xE9]);
        assert_eq!(encode_win_ansi("a\u{2014}b"), vec![b'a', 0x97, b'b']);
        assert_eq!(encode_win_ansi("日本"), b"??".to_vec());
    }

    #[test]
    fn test_resource_names() {
        assert_eq!(FontWeight::Bold.base_font(), "Helvetica-Bold");
        assert_eq!(FontWeight::Bold.resource_name(), "HelveticaBold");
        assert_eq!(FontWeight::Normal.resource_name(), "Helvetica");
    }
}
