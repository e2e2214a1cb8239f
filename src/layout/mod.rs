//! Physical page layout.
//!
//! All layout math is done in millimetres with the origin at the top-left
//! corner of the sheet, the way label stock is specified. Conversion to PDF
//! points (origin bottom-left) happens only at the drawing surface.
//!
//! - [`template`]: catalog of card and sticker stock
//! - [`compositor`]: draws one unit inside its cell
//! - [`paginate`]: walks units through the grid, page after page
//! - [`surface`]: the drawing target (PDF pages)

pub mod compositor;
pub mod paginate;
pub mod surface;
pub mod template;

pub use compositor::{
    DrawOptions, DrawnUnit, PageCompositor, QrAnchor, QrSizing, TextStyle, TitleAlign, UnitStyle,
};
pub use paginate::{paginate, Pagination, Placement};
pub use surface::{DrawingSurface, PdfSurface};
pub use template::{
    lookup_template, lookup_template_for, templates, units_per_page, Orientation, Template,
};

/// Points per inch in PDF user space.
pub const POINTS_PER_INCH: f32 = 72.0;

/// Millimetres per inch.
pub const MM_PER_INCH: f32 = 25.4;

/// Convert millimetres to PDF points.
pub fn mm_to_pt(mm: f32) -> f32 {
    mm * POINTS_PER_INCH / MM_PER_INCH
}

/// Convert PDF points to millimetres.
pub fn pt_to_mm(pt: f32) -> f32 {
    pt * MM_PER_INCH / POINTS_PER_INCH
}

/// RGB color with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red
    pub r: f32,
    /// Green
    pub g: f32,
    /// Blue
    pub b: f32,
}

impl Color {
    /// Create a color from float components.
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Create a color from 8-bit components.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    /// Black.
    pub const fn black() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::black()
    }
}
