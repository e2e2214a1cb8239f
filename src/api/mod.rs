//! High-level print API.
//!
//! [`Printer`] turns a list of cards or stickers into one or more PDF
//! documents and hands each finished document to a [`DocumentSink`].
//!
//! ## Quick Start
//!
//! ```ignore
//! use fs_cards_print::api::{CardPrintOptions, Printer};
//! use fs_cards_print::sink::DirectorySink;
//! use fs_cards_print::{CardUnit, PrintConfig};
//!
//! let cards = vec![CardUnit::new("42", "Fusion power", "Energy", "Plasma in a bottle.")];
//! let printer = Printer::new(PrintConfig::default());
//! let mut sink = DirectorySink::new("out");
//!
//! let report = printer.render_card_document(
//!     &cards,
//!     &CardPrintOptions::new("avery5371"),
//!     &mut sink,
//!     None,
//! )?;
//! println!("{} pages in {:?}", report.pages, report.files);
//! ```
//!
//! ## Progress
//!
//! Large jobs are split into batches. Pass a callback to follow them:
//!
//! ```ignore
//! let mut progress = |n: usize, m: usize| println!("batch {}/{}", n, m);
//! printer.render_sticker_document(&stickers, &options, &mut sink, Some(&mut progress))?;
//! ```
//!
//! [`DocumentSink`]: crate::sink::DocumentSink

mod printer;

pub use crate::batch::{estimate_batches, BatchEstimate, BatchSlice};
pub use crate::layout::units_per_page;
pub use printer::{CardPrintOptions, GenerationReport, Printer, StickerPrintOptions};
