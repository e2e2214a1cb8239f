// Allow some clippy lints that are too pedantic for this project
#![allow(clippy::too_many_arguments)]
#![allow(clippy::excessive_precision)]
// Allow unused for tests
#![cfg_attr(test, allow(dead_code))]

//! # FS Cards Print
//!
//! Print-registered PDF output for innovation cards and stickers.
//!
//! ## Core Features
//!
//! - **Template Catalog**: Avery and Apli card and label stock, in millimetres
//! - **Text Fitting**: greedy word wrap against Helvetica metrics
//! - **Branded QR Codes**: level-H symbols with dotted data modules and a centered logo
//! - **Page Composition**: one layout routine for cards and stickers, driven by a style descriptor
//! - **Batching**: large jobs split on page boundaries, one PDF per batch, with progress
//!
//! ## Architecture
//!
//! ```text
//! units + options
//!     ↓
//! [batch] plan and run batches sequentially
//!     ↓
//! [layout::paginate] row-major placement on template grids
//!     ↓
//! [layout::compositor] title, category, summary ([text]) and QR code ([qr])
//!     ↓
//! [layout::surface] → [writer] PDF bytes
//!     ↓
//! [sink] directory or memory
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use fs_cards_print::api::{CardPrintOptions, Printer};
//! use fs_cards_print::sink::MemorySink;
//! use fs_cards_print::{CardUnit, PrintConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let cards = vec![
//!     CardUnit::new("1", "Graphene", "Materials", "A single layer of carbon atoms."),
//!     CardUnit::new("2", "Fusion power", "Energy", "Plasma confined by magnets."),
//! ];
//!
//! let printer = Printer::new(PrintConfig::default());
//! let mut sink = MemorySink::new();
//! let report = printer.render_card_document(
//!     &cards,
//!     &CardPrintOptions::new("avery5371"),
//!     &mut sink,
//!     None,
//! )?;
//! assert_eq!(report.files.len(), 1);
//! # Ok(())
//! # }
//! ```
//!
//! ## License
//!
//! Licensed under either of:
//!
//! * Apache License, Version 2.0 (<http://www.apache.org/licenses/LICENSE-2.0>)
//! * MIT license (<http://opensource.org/licenses/MIT>)
//!
//! at your option.

#![warn(missing_docs)]

// Error handling
pub mod error;

// Configuration
pub mod config;

// Printable units
pub mod units;

// PDF output
pub mod object;
pub mod writer;

// Layout
pub mod layout;
pub mod qr;
pub mod text;

// Job orchestration
pub mod batch;
pub mod sink;

// High-level API
pub mod api;

// Re-exports
pub use api::{CardPrintOptions, GenerationReport, Printer, StickerPrintOptions};
pub use config::{LogoSource, PrintConfig};
pub use error::{Error, Result};
pub use units::{CardUnit, PrintUnit, StickerUnit, UnitKind};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_name() {
        assert_eq!(NAME, "fs_cards_print");
    }
}
