//! PDF document writer.
//!
//! Pages are recorded as content streams while the document is drawn; fonts,
//! images, page tree and cross-reference table are only produced by
//! [`PdfWriter::finish`].

use super::content_stream::ContentStreamBuilder;
use super::font_manager::{encode_win_ansi, FontWeight};
use super::image_handler::ImageData;
use super::object_serializer::BodyWriter;
use crate::error::{Error, Result};
use crate::layout::Color;
use crate::object::{Dict, Object, ObjectRef};
use std::io::Write;

/// Configuration for PDF generation.
#[derive(Debug, Clone)]
pub struct PdfWriterConfig {
    /// PDF version (e.g., "1.7")
    pub version: String,
    /// Document title
    pub title: Option<String>,
    /// Creator application
    pub creator: Option<String>,
    /// Whether to compress content streams
    pub compress: bool,
}

impl Default for PdfWriterConfig {
    fn default() -> Self {
        Self {
            version: "1.7".to_string(),
            title: None,
            creator: Some(crate::NAME.to_string()),
            compress: true,
        }
    }
}

impl PdfWriterConfig {
    /// Set document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Enable or disable FlateDecode on page content streams.
    pub fn with_compress(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }
}

fn deflate(data: &[u8]) -> std::io::Result<Vec<u8>> {
    use flate2::write::ZlibEncoder;
    use flate2::Compression;

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}

/// Drawing access to one page.
///
/// Coordinates are PDF user space (points, origin bottom-left).
pub struct PageBuilder<'a> {
    writer: &'a mut PdfWriter,
    page_index: usize,
}

impl<'a> PageBuilder<'a> {
    /// Add one line of text with its baseline origin at `(x, y)`.
    pub fn add_text(
        &mut self,
        text: &str,
        x: f32,
        y: f32,
        weight: FontWeight,
        font_size: f32,
        color: Color,
    ) -> &mut Self {
        let page = &mut self.writer.pages[self.page_index];
        page.content
            .fill_color(color)
            .begin_text()
            .set_font(weight.resource_name(), font_size)
            .text(encode_win_ansi(text), x, y);
        self
    }

    /// Place an image with its lower-left corner at `(x, y)`.
    ///
    /// Every placement embeds its own XObject, named `Im1`, `Im2`, ... per page.
    pub fn add_image(
        &mut self,
        image: ImageData,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    ) -> &mut Self {
        let image_index = self.writer.images.len();
        self.writer.images.push(image);

        let page = &mut self.writer.pages[self.page_index];
        let resource_name = format!("Im{}", page.images.len() + 1);
        page.content.draw_image(&resource_name, x, y, width, height);
        page.images.push((resource_name, image_index));
        self
    }

    /// Close any open text object and return to the writer.
    pub fn finish(self) -> &'a mut PdfWriter {
        self.writer.pages[self.page_index].content.end_text();
        self.writer
    }
}

struct PageData {
    width: f32,
    height: f32,
    content: ContentStreamBuilder,
    /// XObject resource name and index into `PdfWriter::images`
    images: Vec<(String, usize)>,
}

/// PDF document writer.
///
/// Every document references the two Helvetica faces, whether or not a page
/// uses them.
pub struct PdfWriter {
    config: PdfWriterConfig,
    pages: Vec<PageData>,
    images: Vec<ImageData>,
}

impl PdfWriter {
    /// Create a new PDF writer with default config.
    pub fn new() -> Self {
        Self::with_config(PdfWriterConfig::default())
    }

    /// Create a PDF writer with custom config.
    pub fn with_config(config: PdfWriterConfig) -> Self {
        Self {
            config,
            pages: Vec::new(),
            images: Vec::new(),
        }
    }

    /// Add a page with the given dimensions in points.
    pub fn add_page(&mut self, width: f32, height: f32) -> PageBuilder<'_> {
        let page_index = self.pages.len();
        self.pages.push(PageData {
            width,
            height,
            content: ContentStreamBuilder::new(),
            images: Vec::new(),
        });
        PageBuilder {
            writer: self,
            page_index,
        }
    }

    /// Reopen an existing page for drawing.
    pub fn page(&mut self, page_index: usize) -> Result<PageBuilder<'_>> {
        if page_index >= self.pages.len() {
            return Err(Error::Generation(format!(
                "page {} does not exist ({} pages)",
                page_index,
                self.pages.len()
            )));
        }
        Ok(PageBuilder {
            writer: self,
            page_index,
        })
    }

    /// Number of pages added so far.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Serialize the document.
    pub fn finish(self) -> Result<Vec<u8>> {
        let mut last_id = 0;
        let mut next_id = || {
            last_id += 1;
            ObjectRef(last_id)
        };

        let catalog = next_id();
        let page_tree = next_id();
        let info = next_id();
        let fonts = [FontWeight::Normal, FontWeight::Bold].map(|weight| (weight, next_id()));
        let image_ids: Vec<(ObjectRef, Option<ObjectRef>)> = self
            .images
            .iter()
            .map(|image| (next_id(), image.soft_mask.as_ref().map(|_| next_id())))
            .collect();

        let mut body = BodyWriter::new(&self.config.version);
        body.object(
            catalog,
            &Object::dict([
                ("Type", Object::name("Catalog")),
                ("Pages", Object::Reference(page_tree)),
            ]),
        )?;

        for (weight, id) in &fonts {
            body.object(
                *id,
                &Object::dict([
                    ("Type", Object::name("Font")),
                    ("Subtype", Object::name("Type1")),
                    ("BaseFont", Object::name(weight.base_font())),
                    ("Encoding", Object::name("WinAnsiEncoding")),
                ]),
            )?;
        }
        let font_resources: Dict = fonts
            .iter()
            .map(|(weight, id)| (weight.resource_name().to_string(), Object::Reference(*id)))
            .collect();

        for (image, (image_id, mask_id)) in self.images.iter().zip(&image_ids) {
            body.object(*image_id, &Object::stream(image.xobject_dict(*mask_id), image.data.clone()))?;
            if let (Some(mask_id), Some(mask_dict), Some(mask)) =
                (mask_id, image.soft_mask_dict(), &image.soft_mask)
            {
                body.object(*mask_id, &Object::stream(mask_dict, mask.clone()))?;
            }
        }

        let mut kids = Vec::with_capacity(self.pages.len());
        for page in &self.pages {
            let page_id = next_id();
            let content_id = next_id();

            let raw = page.content.build()?;
            let mut content_dict = Dict::new();
            let content = if self.config.compress {
                match deflate(&raw) {
                    Ok(compressed) => {
                        content_dict.insert("Filter".to_string(), Object::name("FlateDecode"));
                        compressed
                    },
                    Err(e) => {
                        log::warn!("Content stream compression failed, writing uncompressed: {}", e);
                        raw
                    },
                }
            } else {
                raw
            };

            let mut resources = Dict::new();
            resources.insert("Font".to_string(), Object::Dictionary(font_resources.clone()));
            if !page.images.is_empty() {
                let xobjects: Dict = page
                    .images
                    .iter()
                    .map(|(name, index)| (name.clone(), Object::Reference(image_ids[*index].0)))
                    .collect();
                resources.insert("XObject".to_string(), Object::Dictionary(xobjects));
            }

            body.object(
                page_id,
                &Object::dict([
                    ("Type", Object::name("Page")),
                    ("Parent", Object::Reference(page_tree)),
                    ("MediaBox", Object::rect(0.0, 0.0, page.width, page.height)),
                    ("Contents", Object::Reference(content_id)),
                    ("Resources", Object::Dictionary(resources)),
                ]),
            )?;
            body.object(content_id, &Object::stream(content_dict, content))?;
            kids.push(Object::Reference(page_id));
        }

        let page_count = kids.len();
        body.object(
            page_tree,
            &Object::dict([
                ("Type", Object::name("Pages")),
                ("Kids", Object::Array(kids)),
                ("Count", Object::Integer(page_count as i64)),
            ]),
        )?;

        let mut info_dict = Dict::new();
        if let Some(title) = &self.config.title {
            info_dict.insert("Title".to_string(), Object::text(title));
        }
        if let Some(creator) = &self.config.creator {
            info_dict.insert("Creator".to_string(), Object::text(creator));
            info_dict.insert("Producer".to_string(), Object::text(creator));
        }
        body.object(info, &Object::Dictionary(info_dict))?;

        log::debug!(
            "Serialized {} pages, {} images, {} objects",
            page_count,
            self.images.len(),
            body.len()
        );
        Ok(body.finish(catalog, info)?)
    }
}

impl Default for PdfWriter {
    fn default() -> Self {
        Self::new()
    }
}
