//! Configuration for print document generation.

use std::path::PathBuf;
use std::time::Duration;

/// Where the brand mark drawn in the middle of every QR code comes from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LogoSource {
    /// The PNG compiled into the crate.
    #[default]
    Embedded,
    /// A PNG or JPEG file read on first use.
    File(PathBuf),
    /// No center mark at all.
    None,
}

/// Print pipeline configuration.
#[derive(Debug, Clone)]
pub struct PrintConfig {
    /// Directory that [`DirectorySink`](crate::sink::DirectorySink) writes into.
    pub output_dir: PathBuf,

    /// Pause between two consecutive batches.
    pub inter_batch_delay: Duration,

    /// Jobs spanning at most this many pages are written as one document.
    pub single_document_page_limit: usize,

    /// Brand logo for the QR center mark.
    pub logo: LogoSource,

    /// Flate-compress page content streams.
    pub compress: bool,
}

impl Default for PrintConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl PrintConfig {
    /// Create new configuration with defaults.
    pub fn new() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            inter_batch_delay: Duration::from_millis(500),
            single_document_page_limit: 20,
            logo: LogoSource::Embedded,
            compress: true,
        }
    }

    /// Set the output directory.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Set the pause between batches.
    pub fn with_inter_batch_delay(mut self, delay: Duration) -> Self {
        self.inter_batch_delay = delay;
        self
    }

    /// Set the page count up to which a job is written as a single document.
    pub fn with_single_document_page_limit(mut self, pages: usize) -> Self {
        self.single_document_page_limit = pages;
        self
    }

    /// Set the logo source.
    pub fn with_logo(mut self, logo: LogoSource) -> Self {
        self.logo = logo;
        self
    }

    /// Enable or disable content stream compression.
    pub fn with_compress(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }
}
