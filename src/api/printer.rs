//! Card and sticker document generation.

use crate::batch::{document_file_name, plan_batches, timestamp_millis, BatchScheduler};
use crate::config::PrintConfig;
use crate::error::{Error, Result};
use crate::layout::{lookup_template_for, paginate, DrawOptions, PageCompositor, PdfSurface};
use crate::qr::QrRasterizer;
use crate::sink::DocumentSink;
use crate::units::{CardUnit, PrintUnit, StickerUnit, UnitKind};
use crate::writer::PdfWriterConfig;

/// Options for printing cards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardPrintOptions {
    /// Card template id
    pub template_id: String,
    /// Print the category line
    pub include_category: bool,
    /// Print the summary
    pub include_summary: bool,
}

impl CardPrintOptions {
    /// Options for `template_id` with every optional field enabled.
    pub fn new(template_id: impl Into<String>) -> Self {
        Self {
            template_id: template_id.into(),
            include_category: true,
            include_summary: true,
        }
    }

    /// Enable or disable the category line.
    pub fn with_category(mut self, include: bool) -> Self {
        self.include_category = include;
        self
    }

    /// Enable or disable the summary.
    pub fn with_summary(mut self, include: bool) -> Self {
        self.include_summary = include;
        self
    }
}

/// Options for printing stickers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StickerPrintOptions {
    /// Sticker template id
    pub template_id: String,
}

impl StickerPrintOptions {
    /// Options for `template_id`.
    pub fn new(template_id: impl Into<String>) -> Self {
        Self {
            template_id: template_id.into(),
        }
    }
}

/// Summary of a completed run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    /// File names handed to the sink, in order
    pub files: Vec<String>,
    /// Pages across all documents
    pub pages: usize,
    /// Number of documents
    pub batches: usize,
}

/// Entry point for document generation.
///
/// Holds the configuration and the QR rasterizer, so the logo is loaded at
/// most once for every document this printer produces.
#[derive(Debug)]
pub struct Printer {
    config: PrintConfig,
    rasterizer: QrRasterizer,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new(PrintConfig::default())
    }
}

impl Printer {
    /// Create a printer.
    pub fn new(config: PrintConfig) -> Self {
        let rasterizer = QrRasterizer::new(config.logo.clone());
        Self { config, rasterizer }
    }

    /// Active configuration.
    pub fn config(&self) -> &PrintConfig {
        &self.config
    }

    /// The QR rasterizer shared by every document.
    pub fn rasterizer(&self) -> &QrRasterizer {
        &self.rasterizer
    }

    /// Print `units` as cards.
    ///
    /// Fails with [`Error::UnknownTemplate`] or [`Error::EmptySelection`]
    /// before anything is drawn. A failing batch aborts the run; documents
    /// already delivered to `sink` stay there.
    pub fn render_card_document(
        &self,
        units: &[CardUnit],
        options: &CardPrintOptions,
        sink: &mut dyn DocumentSink,
        on_progress: Option<&mut dyn FnMut(usize, usize)>,
    ) -> Result<GenerationReport> {
        let draw_options = DrawOptions {
            include_category: options.include_category,
            include_summary: options.include_summary,
        };
        self.generate(
            UnitKind::Card,
            units,
            &options.template_id,
            draw_options,
            sink,
            on_progress,
        )
    }

    /// Print `units` as stickers.
    pub fn render_sticker_document(
        &self,
        units: &[StickerUnit],
        options: &StickerPrintOptions,
        sink: &mut dyn DocumentSink,
        on_progress: Option<&mut dyn FnMut(usize, usize)>,
    ) -> Result<GenerationReport> {
        self.generate(
            UnitKind::Sticker,
            units,
            &options.template_id,
            DrawOptions::default(),
            sink,
            on_progress,
        )
    }

    fn generate<U: PrintUnit>(
        &self,
        kind: UnitKind,
        units: &[U],
        template_id: &str,
        draw_options: DrawOptions,
        sink: &mut dyn DocumentSink,
        on_progress: Option<&mut dyn FnMut(usize, usize)>,
    ) -> Result<GenerationReport> {
        let template = lookup_template_for(kind, template_id)?;
        if units.is_empty() {
            return Err(Error::EmptySelection);
        }

        let plan = plan_batches(units.len(), template, self.config.single_document_page_limit);
        let compositor = PageCompositor::new(kind, &self.rasterizer, draw_options);
        let scheduler = BatchScheduler::new(self.config.inter_batch_delay);
        let batch_count = plan.batch_count;

        log::info!(
            "Printing {} {}s on {} in {} document(s)",
            units.len(),
            kind,
            template.name,
            batch_count
        );

        let mut report = GenerationReport {
            batches: batch_count,
            ..Default::default()
        };

        scheduler.run(&plan, on_progress, |index, slice| {
            let title = if batch_count > 1 {
                format!("{} {} ({}/{})", kind.file_label(), template.name, index + 1, batch_count)
            } else {
                format!("{} {}", kind.file_label(), template.name)
            };
            let mut surface = PdfSurface::new(
                PdfWriterConfig::default()
                    .with_title(title)
                    .with_compress(self.config.compress),
            );

            let pagination =
                paginate(&units[slice.start..slice.end], template, &compositor, &mut surface)?;
            let bytes = surface.finish()?;

            let file_name = document_file_name(
                kind,
                template.id,
                Some((index + 1, batch_count)),
                timestamp_millis(),
            );
            sink.deliver(&file_name, bytes)?;

            report.pages += pagination.pages;
            report.files.push(file_name);
            Ok(())
        })?;

        Ok(report)
    }
}
