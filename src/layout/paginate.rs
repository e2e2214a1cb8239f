//! Pagination engine: fills template grids page by page.

use super::compositor::PageCompositor;
use super::surface::DrawingSurface;
use super::template::Template;
use crate::error::Result;
use crate::units::PrintUnit;

/// Where one unit landed.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    /// Position of the unit in the input slice
    pub unit_index: usize,
    /// Zero-based page number within the document
    pub page: usize,
    /// Grid row
    pub row: usize,
    /// Grid column
    pub column: usize,
    /// Cell left edge, mm from the sheet's left
    pub x: f32,
    /// Cell top edge, mm from the sheet's top
    pub y: f32,
}

/// Result of laying out one document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pagination {
    /// Pages begun on the surface
    pub pages: usize,
    /// Placements in input order
    pub placements: Vec<Placement>,
}

/// Lay `units` out on `surface` in input order, row-major per page.
///
/// A page is begun for the first unit and whenever the previous page's grid
/// is full, so `ceil(len / units_per_page)` pages are produced. Cells after
/// the last unit stay blank.
pub fn paginate<U: PrintUnit>(
    units: &[U],
    template: &Template,
    compositor: &PageCompositor<'_>,
    surface: &mut dyn DrawingSurface,
) -> Result<Pagination> {
    let per_page = template.units_per_page();
    let mut pagination = Pagination {
        pages: 0,
        placements: Vec::with_capacity(units.len()),
    };

    for (unit_index, unit) in units.iter().enumerate() {
        let slot = unit_index % per_page;
        if slot == 0 {
            surface.begin_page(template.page_width, template.page_height)?;
            pagination.pages += 1;
        }

        let row = slot / template.columns;
        let column = slot % template.columns;
        let (x, y) = template.cell_origin(row, column);
        compositor.draw_unit(surface, unit, x, y, template)?;

        pagination.placements.push(Placement {
            unit_index,
            page: pagination.pages - 1,
            row,
            column,
            x,
            y,
        });
    }

    log::debug!(
        "Laid out {} units on {} pages of {}",
        units.len(),
        pagination.pages,
        template.id
    );
    Ok(pagination)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LogoSource;
    use crate::layout::{lookup_template, Color, DrawOptions};
    use crate::qr::QrRasterizer;
    use crate::text::FontSpec;
    use crate::units::{StickerUnit, UnitKind};

    #[derive(Default)]
    struct PageCounter {
        pages: usize,
    }

    impl DrawingSurface for PageCounter {
        fn begin_page(&mut self, _width: f32, _height: f32) -> Result<()> {
            self.pages += 1;
            Ok(())
        }

        fn draw_text(&mut self, _: &str, _: f32, _: f32, _: FontSpec, _: Color) -> Result<()> {
            Ok(())
        }

        fn draw_image(&mut self, _: &[u8], _: f32, _: f32, _: f32) -> Result<()> {
            Ok(())
        }

        fn page_count(&self) -> usize {
            self.pages
        }
    }

    fn stickers(n: usize) -> Vec<StickerUnit> {
        (0..n)
            .map(|i| StickerUnit::new(i.to_string(), format!("Sticker {}", i)))
            .collect()
    }

    #[test]
    fn test_row_major_with_pitch() {
        let rasterizer = QrRasterizer::new(LogoSource::None);
        let compositor =
            PageCompositor::new(UnitKind::Sticker, &rasterizer, DrawOptions::default());
        let template = lookup_template("apli10199").unwrap();

        let mut surface = PageCounter::default();
        let result = paginate(&stickers(7), template, &compositor, &mut surface).unwrap();

        assert_eq!(result.pages, 1);
        let sixth = &result.placements[5];
        assert_eq!((sixth.row, sixth.column), (1, 0));
        assert!((sixth.x - 11.0).abs() < 1e-4);
        assert!((sixth.y - 29.9).abs() < 1e-4);
        let second = &result.placements[1];
        assert!((second.x - 49.1).abs() < 1e-4);
    }

    #[test]
    fn test_new_page_when_grid_full() {
        let rasterizer = QrRasterizer::new(LogoSource::None);
        let compositor =
            PageCompositor::new(UnitKind::Sticker, &rasterizer, DrawOptions::default());
        let template = lookup_template("averyL4732").unwrap();

        let mut surface = PageCounter::default();
        let result = paginate(&stickers(81), template, &compositor, &mut surface).unwrap();

        assert_eq!(result.pages, 2);
        assert_eq!(surface.page_count(), 2);
        let last = result.placements.last().unwrap();
        assert_eq!((last.page, last.row, last.column), (1, 0, 0));
    }

    #[test]
    fn test_no_units_no_pages() {
        let rasterizer = QrRasterizer::new(LogoSource::None);
        let compositor =
            PageCompositor::new(UnitKind::Sticker, &rasterizer, DrawOptions::default());
        let template = lookup_template("apli10199").unwrap();

        let mut surface = PageCounter::default();
        let result =
            paginate::<StickerUnit>(&[], template, &compositor, &mut surface).unwrap();
        assert_eq!(result.pages, 0);
        assert!(result.placements.is_empty());
    }
}
