//! Page compositor: draws one unit inside its template cell.
//!
//! Cards and stickers share one drawing routine; what differs between them
//! (type sizes, which fields exist, where the QR code goes) lives in a
//! [`UnitStyle`] descriptor.

use super::surface::DrawingSurface;
use super::template::Template;
use super::{mm_to_pt, Color};
use crate::error::Result;
use crate::qr::QrRasterizer;
use crate::text::{FontSpec, TextFitter};
use crate::units::{PrintUnit, UnitKind};

/// Slack allowed when comparing accumulated line positions, in mm.
const POSITION_EPSILON: f32 = 1e-4;

/// How one text field is set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Face and size
    pub font: FontSpec,
    /// Distance between consecutive line tops, mm
    pub line_height: f32,
    /// Lines kept after wrapping; `None` means bounded by space only
    pub max_lines: Option<usize>,
    /// Fill color
    pub color: Color,
}

/// Vertical placement of the title block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleAlign {
    /// Starts at the top of the content box
    Top,
    /// Centered in the content box
    Centered,
}

/// Edge length rule for the QR code.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QrSizing {
    /// Fraction of the cell width
    CellWidth(f32),
    /// Smaller of a fraction of the content height and of the content width
    ContentFit {
        /// Fraction of content height
        height: f32,
        /// Fraction of content width
        width: f32,
    },
}

/// Where the QR code sits in the cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QrAnchor {
    /// Bottom-right corner of the content box
    BottomRight,
    /// Right edge of the content box, vertically centered in the cell
    MiddleRight,
}

/// Per-variant layout descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitStyle {
    /// Inset of the content box from every cell edge, mm
    pub padding: f32,
    /// Title field
    pub title: TextStyle,
    /// Space after the title block, mm
    pub title_gap: f32,
    /// Title block placement
    pub title_align: TitleAlign,
    /// When set, the title column stops this far short of the QR code
    pub title_qr_gap: Option<f32>,
    /// Category field, if the variant has one
    pub category: Option<TextStyle>,
    /// Summary field, if the variant has one
    pub summary: Option<TextStyle>,
    /// QR edge length rule
    pub qr_sizing: QrSizing,
    /// QR position
    pub qr_anchor: QrAnchor,
    /// Space kept clear above the QR code, mm
    pub qr_clearance: f32,
    /// Requested QR pixels per mm (before supersampling)
    pub qr_pixels_per_mm: f32,
}

impl UnitStyle {
    /// Layout of a full card.
    pub const CARD: UnitStyle = UnitStyle {
        padding: 3.0,
        title: TextStyle {
            font: FontSpec::bold(14.0),
            line_height: 5.0,
            max_lines: Some(2),
            color: Color::black(),
        },
        title_gap: 1.0,
        title_align: TitleAlign::Top,
        title_qr_gap: None,
        category: Some(TextStyle {
            font: FontSpec::bold(8.0),
            line_height: 4.0,
            max_lines: Some(1),
            color: Color::new(100.0 / 255.0, 100.0 / 255.0, 100.0 / 255.0),
        }),
        summary: Some(TextStyle {
            font: FontSpec::regular(7.0),
            line_height: 2.5,
            max_lines: None,
            color: Color::new(50.0 / 255.0, 50.0 / 255.0, 50.0 / 255.0),
        }),
        qr_sizing: QrSizing::CellWidth(0.5),
        qr_anchor: QrAnchor::BottomRight,
        qr_clearance: 2.0,
        qr_pixels_per_mm: 10.0,
    };

    /// Layout of a sticker.
    pub const STICKER: UnitStyle = UnitStyle {
        padding: 1.0,
        title: TextStyle {
            font: FontSpec::bold(6.0),
            line_height: 2.2,
            max_lines: Some(3),
            color: Color::black(),
        },
        title_gap: 0.0,
        title_align: TitleAlign::Centered,
        title_qr_gap: Some(2.0),
        category: None,
        summary: None,
        qr_sizing: QrSizing::ContentFit {
            height: 0.9,
            width: 0.45,
        },
        qr_anchor: QrAnchor::MiddleRight,
        qr_clearance: 0.0,
        qr_pixels_per_mm: 10.0,
    };

    /// The descriptor for a unit variant.
    pub fn for_kind(kind: UnitKind) -> &'static UnitStyle {
        match kind {
            UnitKind::Card => &Self::CARD,
            UnitKind::Sticker => &Self::STICKER,
        }
    }

    /// Edge length of the QR code in a cell of `template`, mm.
    pub fn qr_size(&self, template: &Template) -> f32 {
        match self.qr_sizing {
            QrSizing::CellWidth(fraction) => template.cell_width * fraction,
            QrSizing::ContentFit { height, width } => {
                let (content_width, content_height) = self.content_size(template);
                (content_height * height).min(content_width * width)
            },
        }
    }

    /// Width and height of the padded content box, mm.
    pub fn content_size(&self, template: &Template) -> (f32, f32) {
        (
            template.cell_width - self.padding * 2.0,
            template.cell_height - self.padding * 2.0,
        )
    }
}

/// Optional card fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawOptions {
    /// Print the category line
    pub include_category: bool,
    /// Print the summary
    pub include_summary: bool,
}

impl Default for DrawOptions {
    fn default() -> Self {
        Self {
            include_category: true,
            include_summary: true,
        }
    }
}

/// What ended up in a cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrawnUnit {
    /// Title lines drawn
    pub title_lines: usize,
    /// Whether the category line was drawn
    pub category: bool,
    /// Summary lines drawn
    pub summary_lines: usize,
    /// Whether a QR code was placed
    pub qr: bool,
}

/// Draws units of one variant onto a surface.
pub struct PageCompositor<'a> {
    rasterizer: &'a QrRasterizer,
    fitter: TextFitter,
    style: &'static UnitStyle,
    options: DrawOptions,
}

impl<'a> PageCompositor<'a> {
    /// Create a compositor for `kind`, drawing QR codes with `rasterizer`.
    pub fn new(kind: UnitKind, rasterizer: &'a QrRasterizer, options: DrawOptions) -> Self {
        Self {
            rasterizer,
            fitter: TextFitter::new(),
            style: UnitStyle::for_kind(kind),
            options,
        }
    }

    /// The layout descriptor in use.
    pub fn style(&self) -> &UnitStyle {
        self.style
    }

    /// Draw `unit` in the cell whose top-left corner is `(x, y)` mm.
    ///
    /// A QR code that cannot be produced is logged and its area left blank.
    /// Surface errors are returned.
    pub fn draw_unit<U: PrintUnit + ?Sized>(
        &self,
        surface: &mut dyn DrawingSurface,
        unit: &U,
        x: f32,
        y: f32,
        template: &Template,
    ) -> Result<DrawnUnit> {
        let style = self.style;
        let mut drawn = DrawnUnit::default();

        let content_x = x + style.padding;
        let content_y = y + style.padding;
        let (content_width, content_height) = style.content_size(template);
        let qr_size = style.qr_size(template);

        // 1. Title
        let title_width = match style.title_qr_gap {
            Some(gap) => content_width - qr_size - gap,
            None => content_width,
        };
        let title_lines = self.fit(unit.name(), title_width, &style.title);
        let title_height = title_lines.len() as f32 * style.title.line_height;
        let title_top = match style.title_align {
            TitleAlign::Top => content_y,
            TitleAlign::Centered => content_y + (content_height - title_height) / 2.0,
        };
        for (i, line) in title_lines.iter().enumerate() {
            let top = title_top + i as f32 * style.title.line_height;
            surface.draw_text(line, content_x, top, style.title.font, style.title.color)?;
        }
        drawn.title_lines = title_lines.len();
        let mut cursor = content_y + title_height + style.title_gap;

        // 2. Category
        if let (Some(category_style), Some(category)) = (&style.category, unit.category()) {
            if self.options.include_category && !category.trim().is_empty() {
                surface.draw_text(
                    &category.to_uppercase(),
                    content_x,
                    cursor,
                    category_style.font,
                    category_style.color,
                )?;
                cursor += category_style.line_height;
                drawn.category = true;
            }
        }

        // 3. Summary, bounded by the zone reserved for the QR code
        if let (Some(summary_style), Some(summary)) = (&style.summary, unit.summary()) {
            if self.options.include_summary && !summary.trim().is_empty() {
                let reserved = qr_size + style.qr_clearance;
                let available = content_y + content_height - reserved - cursor;
                let max_lines = if available > 0.0 {
                    (available / summary_style.line_height).floor() as usize
                } else {
                    0
                };

                let lines = self.fitter.wrap(
                    summary,
                    mm_to_pt(content_width),
                    summary_style.font,
                );
                // Line tops are also held below a cutoff measured from the cell
                // origin, which sits one padding above the budget's boundary.
                let cutoff = y + content_height - reserved;
                for (i, line) in lines.iter().take(max_lines).enumerate() {
                    let top = cursor + i as f32 * summary_style.line_height;
                    if top > cutoff - POSITION_EPSILON {
                        continue;
                    }
                    surface.draw_text(
                        line,
                        content_x,
                        top,
                        summary_style.font,
                        summary_style.color,
                    )?;
                    drawn.summary_lines += 1;
                }
            }
        }

        // 4. QR code
        let qr_x = x + template.cell_width - style.padding - qr_size;
        let qr_y = match style.qr_anchor {
            QrAnchor::BottomRight => y + template.cell_height - style.padding - qr_size,
            QrAnchor::MiddleRight => y + (template.cell_height - qr_size) / 2.0,
        };
        let pixels = (qr_size * style.qr_pixels_per_mm).floor() as u32;
        match self.rasterizer.render(&unit.qr_payload(), pixels) {
            Ok(qr) => {
                surface.draw_image(&qr.png, qr_x, qr_y, qr_size)?;
                drawn.qr = true;
            },
            Err(e) => {
                log::warn!("QR code for unit '{}' left blank: {}", unit.id(), e);
            },
        }

        Ok(drawn)
    }

    /// Wrap and truncate a field to its line budget.
    fn fit(&self, text: &str, width: f32, style: &TextStyle) -> Vec<String> {
        let mut lines = self.fitter.wrap(text, mm_to_pt(width), style.font);
        if let Some(max) = style.max_lines {
            lines.truncate(max);
        }
        lines
    }
}
