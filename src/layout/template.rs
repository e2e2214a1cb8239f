//! Template catalog: the physical geometry of supported card and label stock.
//!
//! Identifiers are matched exactly; they name real products and must not
//! change. Dimensions are millimetres, measured from the sheet's top-left.

use crate::error::{Error, Result};
use crate::units::UnitKind;

/// Units per page reported for an unknown card template.
pub const FALLBACK_CARDS_PER_PAGE: usize = 10;

/// Units per page reported for an unknown sticker template.
pub const FALLBACK_STICKERS_PER_PAGE: usize = 80;

/// Sheet orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Wider than tall
    Landscape,
    /// Taller than wide
    Portrait,
}

/// Immutable physical layout descriptor for one stock product.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    /// Catalog identifier, e.g. `avery5371`
    pub id: &'static str,
    /// Display name, e.g. `Avery 5371`
    pub name: &'static str,
    /// Short description of the stock
    pub description: &'static str,
    /// Which unit variant this stock is for
    pub kind: UnitKind,
    /// Sheet width
    pub page_width: f32,
    /// Sheet height
    pub page_height: f32,
    /// Width of one unit cell
    pub cell_width: f32,
    /// Height of one unit cell
    pub cell_height: f32,
    /// Cells per row
    pub columns: usize,
    /// Rows per sheet
    pub rows: usize,
    /// Distance from the sheet's left edge to the first column
    pub margin_left: f32,
    /// Distance from the sheet's top edge to the first row
    pub margin_top: f32,
    /// Horizontal distance between the left edges of adjacent cells
    pub pitch_x: f32,
    /// Vertical distance between the top edges of adjacent cells
    pub pitch_y: f32,
}

impl Template {
    /// Number of cells on one sheet.
    pub fn units_per_page(&self) -> usize {
        self.columns * self.rows
    }

    /// Orientation fixed by the unit variant.
    pub fn orientation(&self) -> Orientation {
        match self.kind {
            UnitKind::Card => Orientation::Landscape,
            UnitKind::Sticker => Orientation::Portrait,
        }
    }

    /// Pages needed for `unit_count` units.
    pub fn pages_for(&self, unit_count: usize) -> usize {
        unit_count.div_ceil(self.units_per_page())
    }

    /// Top-left corner of the cell at `(row, column)`.
    pub fn cell_origin(&self, row: usize, column: usize) -> (f32, f32) {
        (
            self.margin_left + column as f32 * self.pitch_x,
            self.margin_top + row as f32 * self.pitch_y,
        )
    }
}

const fn card(
    id: &'static str,
    name: &'static str,
    description: &'static str,
    page: (f32, f32),
    cell: (f32, f32),
    grid: (usize, usize),
    margin: (f32, f32),
) -> Template {
    Template {
        id,
        name,
        description,
        kind: UnitKind::Card,
        page_width: page.0,
        page_height: page.1,
        cell_width: cell.0,
        cell_height: cell.1,
        columns: grid.0,
        rows: grid.1,
        margin_left: margin.0,
        margin_top: margin.1,
        pitch_x: cell.0,
        pitch_y: cell.1,
    }
}

const fn sticker(id: &'static str, name: &'static str, description: &'static str) -> Template {
    Template {
        id,
        name,
        description,
        kind: UnitKind::Sticker,
        page_width: 210.0,
        page_height: 297.0,
        cell_width: 35.6,
        cell_height: 16.9,
        columns: 5,
        rows: 16,
        margin_left: 11.0,
        margin_top: 13.0,
        // 35.6 mm label plus a 2.5 mm gap; rows touch.
        pitch_x: 38.1,
        pitch_y: 16.9,
    }
}

const US_LETTER_LANDSCAPE: (f32, f32) = (279.4, 215.9);
const A4_LANDSCAPE: (f32, f32) = (297.0, 210.0);

static CARD_TEMPLATES: [Template; 6] = [
    card(
        "avery5371",
        "Avery 5371",
        "Business cards 2\" x 3.5\", 10 per US Letter sheet",
        US_LETTER_LANDSCAPE,
        (50.8, 88.9),
        (5, 2),
        (19.05, 12.7),
    ),
    card(
        "avery8371",
        "Avery 8371",
        "Business cards 2\" x 3.5\", 10 per US Letter sheet (inkjet)",
        US_LETTER_LANDSCAPE,
        (50.8, 88.9),
        (5, 2),
        (19.05, 12.7),
    ),
    card(
        "avery5376",
        "Avery 5376",
        "Tent cards 2.33\" x 3.375\", 8 per US Letter sheet",
        US_LETTER_LANDSCAPE,
        (59.18, 85.73),
        (4, 2),
        (21.2, 15.87),
    ),
    card(
        "apli10609",
        "Apli 10609",
        "Business cards 51 x 89 mm, 10 per A4 sheet",
        A4_LANDSCAPE,
        (51.0, 89.0),
        (5, 2),
        (21.0, 16.0),
    ),
    card(
        "apli10608",
        "Apli 10608",
        "Business cards 50.8 x 90 mm, 10 per A4 sheet",
        A4_LANDSCAPE,
        (50.8, 90.0),
        (5, 2),
        (21.5, 15.0),
    ),
    card(
        "apli11744",
        "Apli 11744",
        "Business cards 50.8 x 90 mm, 10 per A4 sheet (legacy id of Apli 10608)",
        A4_LANDSCAPE,
        (50.8, 90.0),
        (5, 2),
        (21.5, 15.0),
    ),
];

static STICKER_TEMPLATES: [Template; 2] = [
    sticker(
        "apli10199",
        "Apli 10199",
        "Labels 35.6 x 16.9 mm, 80 per A4 sheet",
    ),
    sticker(
        "averyL4732",
        "Avery L4732",
        "Mini labels 35.6 x 16.9 mm, 80 per A4 sheet",
    ),
];

/// All templates for a unit variant, in catalog order.
pub fn templates(kind: UnitKind) -> &'static [Template] {
    match kind {
        UnitKind::Card => &CARD_TEMPLATES,
        UnitKind::Sticker => &STICKER_TEMPLATES,
    }
}

/// Look up a template of either variant by id.
pub fn lookup_template(id: &str) -> Result<&'static Template> {
    CARD_TEMPLATES
        .iter()
        .chain(STICKER_TEMPLATES.iter())
        .find(|t| t.id == id)
        .ok_or_else(|| Error::UnknownTemplate(id.to_string()))
}

/// Look up a template and require it to be for `kind`.
///
/// A card id used for stickers (or the reverse) is unknown to that variant.
pub fn lookup_template_for(kind: UnitKind, id: &str) -> Result<&'static Template> {
    templates(kind)
        .iter()
        .find(|t| t.id == id)
        .ok_or_else(|| Error::UnknownTemplate(format!("{} (no {} template with this id)", id, kind)))
}

/// Cells per sheet for a template id.
///
/// Unknown ids fall back to 10 for cards and 80 for stickers.
pub fn units_per_page(kind: UnitKind, id: &str) -> usize {
    match lookup_template_for(kind, id) {
        Ok(template) => template.units_per_page(),
        Err(_) => match kind {
            UnitKind::Card => FALLBACK_CARDS_PER_PAGE,
            UnitKind::Sticker => FALLBACK_STICKERS_PER_PAGE,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known() {
        let t = lookup_template("avery5376").unwrap();
        assert_eq!(t.columns, 4);
        assert_eq!(t.rows, 2);
        assert_eq!(t.units_per_page(), 8);
        assert_eq!(t.orientation(), Orientation::Landscape);
    }

    #[test]
    fn test_lookup_unknown() {
        let err = lookup_template("avery0000").unwrap_err();
        assert!(matches!(err, Error::UnknownTemplate(ref id) if id == "avery0000"));
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert!(lookup_template("averyL4732").is_ok());
        assert!(lookup_template("averyl4732").is_err());
    }

    #[test]
    fn test_kind_mismatch_rejected() {
        assert!(lookup_template_for(UnitKind::Sticker, "avery5371").is_err());
        assert!(lookup_template_for(UnitKind::Card, "apli10199").is_err());
    }

    #[test]
    fn test_fallbacks() {
        assert_eq!(units_per_page(UnitKind::Card, "nope"), 10);
        assert_eq!(units_per_page(UnitKind::Sticker, "nope"), 80);
    }

    #[test]
    fn test_sticker_pitch_exceeds_cell() {
        let t = lookup_template("apli10199").unwrap();
        assert!(t.pitch_x > t.cell_width);
        assert_eq!(t.cell_origin(1, 2), (11.0 + 2.0 * 38.1, 13.0 + 16.9));
        assert_eq!(t.orientation(), Orientation::Portrait);
    }

    #[test]
    fn test_legacy_apli_id_matches_current() {
        let current = lookup_template("apli10608").unwrap();
        let legacy = lookup_template("apli11744").unwrap();
        assert_eq!(current.cell_width, legacy.cell_width);
        assert_eq!(current.margin_left, legacy.margin_left);
    }

    #[test]
    fn test_pages_for() {
        let t = lookup_template("avery5371").unwrap();
        assert_eq!(t.pages_for(0), 0);
        assert_eq!(t.pages_for(10), 1);
        assert_eq!(t.pages_for(11), 2);
    }
}
