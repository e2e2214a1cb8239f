//! Branded QR code rasterization.
//!
//! Symbols are encoded at error-correction level H so the center mark can
//! cover part of the data area. The canvas is drawn at four times the
//! requested size and handed back as an opaque RGB PNG; the PDF viewer
//! scales it down when placing it.

use super::logo::LogoCache;
use crate::config::LogoSource;
use crate::error::{Error, Result};
use image::{imageops, DynamicImage, RgbaImage};
use qrcode::{EcLevel, QrCode};
use std::io::Cursor;
use tiny_skia::{Color, FillRule, Paint, PathBuilder, Pixmap, Rect, Transform};

/// Canvas pixels per requested pixel.
pub const SUPERSAMPLE: u32 = 4;

/// Logo edge length as a fraction of the canvas edge.
pub const LOGO_FRACTION: f32 = 0.22;

/// Hexagon circumradius relative to half the logo edge.
pub const HEXAGON_SCALE: f32 = 1.15;

/// Edge length of a finder pattern, in modules.
pub const FINDER_SIZE: usize = 7;

/// A rendered QR code.
#[derive(Debug, Clone)]
pub struct QrImage {
    /// PNG-encoded RGB canvas
    pub png: Vec<u8>,
    /// Canvas edge length in pixels
    pub pixel_size: u32,
    /// Symbol edge length in modules
    pub modules: usize,
    /// Whether the brand mark was drawn
    pub has_logo: bool,
}

/// Whether `(row, col)` lies in one of the three 7×7 finder corners of a
/// symbol that is `width` modules wide.
pub fn is_finder_module(row: usize, col: usize, width: usize) -> bool {
    let near = |i: usize| i < FINDER_SIZE;
    let far = |i: usize| i + FINDER_SIZE >= width;
    (near(row) && near(col)) || (near(row) && far(col)) || (far(row) && near(col))
}

/// Renders QR codes with rounded data modules and a logo in the center.
///
/// Owns the logo cache, so the logo is decoded at most once per rasterizer.
#[derive(Debug)]
pub struct QrRasterizer {
    logo: LogoCache,
}

impl QrRasterizer {
    /// Create a rasterizer drawing the logo from `source`.
    pub fn new(source: LogoSource) -> Self {
        Self {
            logo: LogoCache::new(source),
        }
    }

    /// The logo cache shared by every code this rasterizer renders.
    pub fn logo(&self) -> &LogoCache {
        &self.logo
    }

    /// Encode `payload` and rasterize it on a canvas of `target_size * 4` pixels.
    ///
    /// A logo that cannot be loaded is logged and skipped; the symbol is
    /// still returned and scans thanks to level-H correction.
    pub fn render(&self, payload: &str, target_size: u32) -> Result<QrImage> {
        if target_size == 0 {
            return Err(Error::QrEncode("target size must be positive".to_string()));
        }

        let code = QrCode::with_error_correction_level(payload.as_bytes(), EcLevel::H)
            .map_err(|e| Error::QrEncode(format!("{} ({} bytes)", e, payload.len())))?;
        let width = code.width();

        let canvas_size = target_size * SUPERSAMPLE;
        let mut pixmap = Pixmap::new(canvas_size, canvas_size).ok_or_else(|| {
            Error::Image(format!("cannot allocate {0}x{0} canvas", canvas_size))
        })?;
        pixmap.fill(Color::WHITE);

        draw_modules(&mut pixmap, &code.to_colors(), width);

        let logo = match self.logo.get() {
            Ok(logo) => logo,
            Err(e) => {
                log::warn!(
                    "Could not load logo from {:?}, using plain QR code: {}",
                    self.logo.source(),
                    e
                );
                None
            },
        };

        let logo_size = canvas_size as f32 * LOGO_FRACTION;
        if logo.is_some() {
            let center = canvas_size as f32 / 2.0;
            if let Some(hexagon) = hexagon(center, center, logo_size / 2.0 * HEXAGON_SCALE) {
                pixmap.fill_path(
                    &hexagon,
                    &solid(Color::WHITE, true),
                    FillRule::Winding,
                    Transform::identity(),
                    None,
                );
            }
        }

        // Every pixel is opaque, so premultiplied data equals straight RGBA.
        let mut canvas = RgbaImage::from_raw(canvas_size, canvas_size, pixmap.take())
            .ok_or_else(|| Error::Image("canvas buffer size mismatch".to_string()))?;

        if let Some(logo) = logo {
            let edge = (logo_size.round() as u32).max(1);
            let scaled = imageops::resize(logo, edge, edge, imageops::FilterType::Triangle);
            let offset = ((canvas_size - edge) / 2) as i64;
            imageops::overlay(&mut canvas, &scaled, offset, offset);
        }

        let mut png = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(canvas)
            .to_rgb8()
            .write_to(&mut png, image::ImageFormat::Png)
            .map_err(|e| Error::Image(e.to_string()))?;

        Ok(QrImage {
            png: png.into_inner(),
            pixel_size: canvas_size,
            modules: width,
            has_logo: logo.is_some(),
        })
    }
}

/// Finder corners as solid squares, every other dark module as a dot.
fn draw_modules(pixmap: &mut Pixmap, modules: &[qrcode::Color], width: usize) {
    let module_px = pixmap.width() as f32 / width as f32;
    // Squares are not anti-aliased so adjacent modules leave no seams.
    let square = solid(Color::BLACK, false);
    let dot = solid(Color::BLACK, true);

    for (row, line) in modules.chunks(width).enumerate() {
        for (col, module) in line.iter().enumerate() {
            if *module != qrcode::Color::Dark {
                continue;
            }
            let x = col as f32 * module_px;
            let y = row as f32 * module_px;

            if is_finder_module(row, col, width) {
                if let Some(rect) = Rect::from_xywh(x, y, module_px, module_px) {
                    pixmap.fill_rect(rect, &square, Transform::identity(), None);
                }
            } else if let Some(circle) =
                PathBuilder::from_circle(x + module_px / 2.0, y + module_px / 2.0, module_px / 2.0)
            {
                pixmap.fill_path(&circle, &dot, FillRule::Winding, Transform::identity(), None);
            }
        }
    }
}

/// Regular hexagon with a vertex straight up and one straight down.
fn hexagon(cx: f32, cy: f32, radius: f32) -> Option<tiny_skia::Path> {
    let mut pb = PathBuilder::new();
    for i in 0..6 {
        let angle = std::f32::consts::FRAC_PI_2 + i as f32 * std::f32::consts::FRAC_PI_3;
        let x = cx + radius * angle.cos();
        let y = cy + radius * angle.sin();
        if i == 0 {
            pb.move_to(x, y);
        } else {
            pb.line_to(x, y);
        }
    }
    pb.close();
    pb.finish()
}

fn solid(color: Color, anti_alias: bool) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(color);
    paint.anti_alias = anti_alias;
    paint
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finder_regions() {
        assert!(is_finder_module(0, 0, 29));
        assert!(is_finder_module(6, 6, 29));
        assert!(!is_finder_module(7, 7, 29));
        assert!(is_finder_module(0, 22, 29));
        assert!(!is_finder_module(0, 21, 29));
        assert!(is_finder_module(28, 0, 29));
        // Bottom-right has no finder pattern
        assert!(!is_finder_module(28, 28, 29));
    }

    #[test]
    fn test_render_png_dimensions() {
        let rasterizer = QrRasterizer::new(LogoSource::None);
        let qr = rasterizer.render("https://fs.cards/a/1", 32).unwrap();

        assert_eq!(qr.pixel_size, 128);
        assert!(!qr.has_logo);
        assert_eq!(&qr.png[..8], b"\x89PNG\r\n\x1a\n");

        let decoded = image::load_from_memory(&qr.png).unwrap();
        assert_eq!(decoded.width(), 128);
        assert_eq!(decoded.color(), image::ColorType::Rgb8);
    }

    #[test]
    fn test_level_h_symbol_size() {
        let rasterizer = QrRasterizer::new(LogoSource::None);
        let qr = rasterizer.render("https://fs.cards/a/1", 8).unwrap();
        let expected = QrCode::with_error_correction_level("https://fs.cards/a/1", EcLevel::H)
            .unwrap()
            .width();
        assert_eq!(qr.modules, expected);
    }

    #[test]
    fn test_logo_drawn_when_available() {
        let rasterizer = QrRasterizer::new(LogoSource::Embedded);
        let qr = rasterizer.render("https://fs.cards/a/abc", 64).unwrap();
        assert!(qr.has_logo);
        assert!(rasterizer.logo().is_loaded());
    }

    #[test]
    fn test_broken_logo_degrades() {
        let rasterizer = QrRasterizer::new(LogoSource::File("/no/such/logo.png".into()));
        let qr = rasterizer.render("https://fs.cards/a/abc", 16).unwrap();
        assert!(!qr.has_logo);
        assert!(!qr.png.is_empty());
    }

    #[test]
    fn test_zero_size_rejected() {
        let rasterizer = QrRasterizer::new(LogoSource::None);
        assert!(matches!(rasterizer.render("x", 0), Err(Error::QrEncode(_))));
    }

    #[test]
    fn test_oversized_payload_is_encode_error() {
        let rasterizer = QrRasterizer::new(LogoSource::None);
        let payload = "x".repeat(5000);
        assert!(matches!(rasterizer.render(&payload, 16), Err(Error::QrEncode(_))));
    }

    #[test]
    fn test_hexagon_is_pointy_top() {
        let path = hexagon(50.0, 50.0, 10.0).unwrap();
        let bounds = path.bounds();
        assert!((bounds.top() - 40.0).abs() < 1e-3);
        assert!((bounds.bottom() - 60.0).abs() < 1e-3);
        // Flat sides: width is sqrt(3) * r
        assert!((bounds.width() - 17.320).abs() < 1e-2);
    }
}
