//! Brand logo drawn in the middle of every QR code.
//!
//! The logo is decoded on first use and kept for the lifetime of its
//! [`LogoCache`]. A failed load is remembered too: the file is not retried,
//! and every QR code rendered afterwards is produced without a center mark.

use crate::config::LogoSource;
use crate::error::{Error, Result};
use image::RgbaImage;
use std::sync::OnceLock;

/// PNG compiled into the crate and used by [`LogoSource::Embedded`].
pub static EMBEDDED_LOGO: &[u8] = include_bytes!("../../assets/fs_logo.png");

/// Load-once holder for the decoded logo.
#[derive(Debug)]
pub struct LogoCache {
    source: LogoSource,
    loaded: OnceLock<std::result::Result<Option<RgbaImage>, String>>,
}

impl LogoCache {
    /// Create an empty cache; nothing is read until [`LogoCache::get`].
    pub fn new(source: LogoSource) -> Self {
        Self {
            source,
            loaded: OnceLock::new(),
        }
    }

    /// Where the logo is read from.
    pub fn source(&self) -> &LogoSource {
        &self.source
    }

    /// The decoded logo, `Ok(None)` when disabled.
    ///
    /// Safe to call from several threads; the first caller decodes.
    pub fn get(&self) -> Result<Option<&RgbaImage>> {
        let loaded = self.loaded.get_or_init(|| {
            let result = load(&self.source);
            match &result {
                Ok(Some(img)) => log::debug!(
                    "Loaded QR logo {}x{} from {:?}",
                    img.width(),
                    img.height(),
                    self.source
                ),
                Ok(None) => log::debug!("QR logo disabled"),
                Err(e) => log::debug!("QR logo unavailable: {}", e),
            }
            result
        });

        match loaded {
            Ok(logo) => Ok(logo.as_ref()),
            Err(message) => Err(Error::Logo(message.clone())),
        }
    }

    /// Whether the first load has already happened.
    pub fn is_loaded(&self) -> bool {
        self.loaded.get().is_some()
    }
}

fn load(source: &LogoSource) -> std::result::Result<Option<RgbaImage>, String> {
    let bytes = match source {
        LogoSource::None => return Ok(None),
        LogoSource::Embedded => EMBEDDED_LOGO.to_vec(),
        LogoSource::File(path) => std::fs::read(path)
            .map_err(|e| format!("cannot read {}: {}", path.display(), e))?,
    };

    let img = image::load_from_memory(&bytes).map_err(|e| format!("cannot decode logo: {}", e))?;
    if img.width() == 0 || img.height() == 0 {
        return Err("logo has no pixels".to_string());
    }
    Ok(Some(img.to_rgba8()))
}
