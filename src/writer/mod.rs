//! PDF writing module for generating print documents.
//!
//! ## Architecture
//!
//! ```text
//! text lines, QR images
//!     ↓
//! [ContentStreamBuilder] (drawing ops → content stream bytes)
//!     ↓
//! [PdfWriter] (assembles pages, fonts, image XObjects, xref)
//!     ↓
//! [BodyWriter] (indirect objects, xref, trailer)
//!     ↓
//! PDF bytes
//! ```
//!
//! ## Example
//!
//! ```ignore
//! use fs_cards_print::layout::Color;
//! use fs_cards_print::writer::{FontWeight, PdfWriter};
//!
//! let mut writer = PdfWriter::new();
//! let mut page = writer.add_page(612.0, 792.0);
//! page.add_text("Hello, World!", 72.0, 720.0, FontWeight::Bold, 14.0, Color::black());
//! page.finish();
//! let bytes = writer.finish()?;
//! ```

mod content_stream;
mod font_manager;
mod image_handler;
mod object_serializer;
mod pdf_writer;

pub use content_stream::{ContentStreamBuilder, ContentStreamOp};
pub use font_manager::{
    encode_win_ansi, win_ansi_byte, FontInfo, FontManager, FontWeight, REPLACEMENT_CHAR,
};
pub use image_handler::{ColorSpace, ImageData, ImageError};
pub use object_serializer::{to_string, write_object, BodyWriter};
pub use pdf_writer::{PageBuilder, PdfWriter, PdfWriterConfig};
