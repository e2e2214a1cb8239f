//! Drawing surfaces.
//!
//! The compositor and paginator speak millimetres from the sheet's top-left
//! corner. A [`DrawingSurface`] turns those calls into output; [`PdfSurface`]
//! writes PDF pages.

use super::{mm_to_pt, Color};
use crate::error::{Error, Result};
use crate::text::{FontSpec, TextFitter};
use crate::writer::{ImageData, PdfWriter, PdfWriterConfig};

/// Target of all drawing done by the page compositor.
pub trait DrawingSurface {
    /// Append a page `width` × `height` mm and make it current.
    fn begin_page(&mut self, width: f32, height: f32) -> Result<()>;

    /// Draw one line of text whose line box starts at `top`.
    fn draw_text(&mut self, text: &str, x: f32, top: f32, font: FontSpec, color: Color)
        -> Result<()>;

    /// Place a square PNG with its top-left corner at `(x, top)`.
    fn draw_image(&mut self, png: &[u8], x: f32, top: f32, size: f32) -> Result<()>;

    /// Pages begun so far.
    fn page_count(&self) -> usize;
}

/// Surface that renders into a PDF document.
pub struct PdfSurface {
    writer: PdfWriter,
    fitter: TextFitter,
    /// Index and height in points of the current page
    current: Option<(usize, f32)>,
}

impl PdfSurface {
    /// Create an empty document.
    pub fn new(config: PdfWriterConfig) -> Self {
        Self {
            writer: PdfWriter::with_config(config),
            fitter: TextFitter::new(),
            current: None,
        }
    }

    fn current_page(&self) -> Result<(usize, f32)> {
        self.current
            .ok_or_else(|| Error::Generation("drawing before the first page was begun".to_string()))
    }

    /// Serialize the document.
    pub fn finish(self) -> Result<Vec<u8>> {
        self.writer.finish()
    }
}

impl DrawingSurface for PdfSurface {
    fn begin_page(&mut self, width: f32, height: f32) -> Result<()> {
        if !(width > 0.0 && height > 0.0) {
            return Err(Error::Generation(format!(
                "invalid page size {} x {} mm",
                width, height
            )));
        }
        let height_pt = mm_to_pt(height);
        self.writer.add_page(mm_to_pt(width), height_pt).finish();
        self.current = Some((self.writer.page_count() - 1, height_pt));
        Ok(())
    }

    fn draw_text(
        &mut self,
        text: &str,
        x: f32,
        top: f32,
        font: FontSpec,
        color: Color,
    ) -> Result<()> {
        let (index, page_height) = self.current_page()?;
        let baseline = page_height - mm_to_pt(top) - self.fitter.ascent(font);
        self.writer
            .page(index)?
            .add_text(text, mm_to_pt(x), baseline, font.weight, font.size, color);
        Ok(())
    }

    fn draw_image(&mut self, png: &[u8], x: f32, top: f32, size: f32) -> Result<()> {
        let (index, page_height) = self.current_page()?;
        let image = ImageData::from_png(png)?;
        let side = mm_to_pt(size);
        let bottom = page_height - mm_to_pt(top) - side;
        self.writer
            .page(index)?
            .add_image(image, mm_to_pt(x), bottom, side, side);
        Ok(())
    }

    fn page_count(&self) -> usize {
        self.writer.page_count()
    }
}
