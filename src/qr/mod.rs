//! QR code generation for unit links.

mod logo;
mod rasterizer;

pub use logo::{LogoCache, EMBEDDED_LOGO};
pub use rasterizer::{
    is_finder_module, QrImage, QrRasterizer, FINDER_SIZE, HEXAGON_SCALE, LOGO_FRACTION,
    SUPERSAMPLE,
};
