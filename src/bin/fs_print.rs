//! Print cards and stickers to PDF
//!
//! Usage:
//!   fs_print cards    --input units.json --template avery5371 [--no-category] [--no-summary]
//!                     [--output-dir DIR] [--logo PATH | --no-logo] [--no-delay]
//!   fs_print stickers --input units.json --template apli10199
//!                     [--output-dir DIR] [--logo PATH | --no-logo] [--no-delay]
//!   fs_print templates
//!   fs_print estimate --count N --template ID [--pages-per-batch P]
//!
//! Input is a JSON array of `{"id", "name", "category", "summary"}` objects.
//! Set `RUST_LOG=debug` for layout details.

use fs_cards_print::api::{estimate_batches, units_per_page};
use fs_cards_print::layout::{lookup_template, templates};
use fs_cards_print::sink::DirectorySink;
use fs_cards_print::{
    CardPrintOptions, CardUnit, LogoSource, PrintConfig, Printer, StickerPrintOptions, StickerUnit,
    UnitKind,
};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

const USAGE: &str = "usage: fs_print <cards|stickers|templates|estimate> [options]";

struct PrintArgs {
    input: Option<PathBuf>,
    template: Option<String>,
    output_dir: PathBuf,
    logo: LogoSource,
    include_category: bool,
    include_summary: bool,
    no_delay: bool,
    count: Option<usize>,
    pages_per_batch: Option<usize>,
}

impl PrintArgs {
    fn parse(args: &[String]) -> Result<Self, String> {
        let mut parsed = Self {
            input: None,
            template: None,
            output_dir: PathBuf::from("."),
            logo: LogoSource::Embedded,
            include_category: true,
            include_summary: true,
            no_delay: false,
            count: None,
            pages_per_batch: None,
        };

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--input" | "-i" => parsed.input = Some(PathBuf::from(value(args, &mut i)?)),
                "--template" | "-t" => parsed.template = Some(value(args, &mut i)?.to_string()),
                "--output-dir" | "-o" => parsed.output_dir = PathBuf::from(value(args, &mut i)?),
                "--logo" => parsed.logo = LogoSource::File(PathBuf::from(value(args, &mut i)?)),
                "--no-logo" => parsed.logo = LogoSource::None,
                "--no-category" => parsed.include_category = false,
                "--no-summary" => parsed.include_summary = false,
                "--no-delay" => parsed.no_delay = true,
                "--count" | "-n" => parsed.count = Some(number(value(args, &mut i)?)?),
                "--pages-per-batch" => {
                    parsed.pages_per_batch = Some(number(value(args, &mut i)?)?)
                },
                other => return Err(format!("unknown option '{}'", other)),
            }
            i += 1;
        }

        Ok(parsed)
    }

    fn template(&self) -> Result<&str, String> {
        self.template
            .as_deref()
            .ok_or_else(|| "--template is required".to_string())
    }

    fn config(&self) -> PrintConfig {
        let mut config = PrintConfig::default()
            .with_output_dir(&self.output_dir)
            .with_logo(self.logo.clone());
        if self.no_delay {
            config = config.with_inter_batch_delay(Duration::ZERO);
        }
        config
    }

    fn read_units(&self) -> Result<Vec<CardUnit>, Box<dyn std::error::Error>> {
        let path = self
            .input
            .as_ref()
            .ok_or_else(|| "--input is required".to_string())?;
        let json = fs::read_to_string(path)?;
        let units: Vec<CardUnit> = serde_json::from_str(&json)?;
        log::debug!("Read {} units from {}", units.len(), path.display());
        Ok(units)
    }
}

fn value<'a>(args: &'a [String], i: &mut usize) -> Result<&'a str, String> {
    let flag = &args[*i];
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| format!("{} needs a value", flag))
}

fn number(text: &str) -> Result<usize, String> {
    text.parse()
        .map_err(|_| format!("'{}' is not a non-negative integer", text))
}

fn print_progress(n: usize, m: usize) {
    println!("batch {}/{}", n, m);
}

fn run_cards(args: &PrintArgs) -> Result<(), Box<dyn std::error::Error>> {
    let units = args.read_units()?;
    let options = CardPrintOptions::new(args.template()?)
        .with_category(args.include_category)
        .with_summary(args.include_summary);

    let printer = Printer::new(args.config());
    let mut sink = DirectorySink::new(&printer.config().output_dir);
    let mut progress = print_progress;
    let report = printer.render_card_document(&units, &options, &mut sink, Some(&mut progress))?;

    println!("{} pages in {} file(s)", report.pages, report.files.len());
    for path in sink.written() {
        println!("  {}", path.display());
    }
    Ok(())
}

fn run_stickers(args: &PrintArgs) -> Result<(), Box<dyn std::error::Error>> {
    let units: Vec<StickerUnit> = args.read_units()?.iter().map(StickerUnit::from).collect();
    let options = StickerPrintOptions::new(args.template()?);

    let printer = Printer::new(args.config());
    let mut sink = DirectorySink::new(&printer.config().output_dir);
    let mut progress = print_progress;
    let report =
        printer.render_sticker_document(&units, &options, &mut sink, Some(&mut progress))?;

    println!("{} pages in {} file(s)", report.pages, report.files.len());
    for path in sink.written() {
        println!("  {}", path.display());
    }
    Ok(())
}

fn run_templates() {
    for kind in [UnitKind::Card, UnitKind::Sticker] {
        println!("{}s:", kind);
        for template in templates(kind) {
            println!(
                "  {:<12} {:<12} {}x{} ({}/page)  {}",
                template.id,
                template.name,
                template.columns,
                template.rows,
                template.units_per_page(),
                template.description
            );
        }
    }
}

fn run_estimate(args: &PrintArgs) -> Result<(), Box<dyn std::error::Error>> {
    let count = args.count.ok_or_else(|| "--count is required".to_string())?;
    let template_id = args.template()?;
    let kind = lookup_template(template_id)
        .map(|t| t.kind)
        .unwrap_or(UnitKind::Card);
    let pages_per_batch = args.pages_per_batch.unwrap_or_else(|| kind.pages_per_batch());

    let estimate = estimate_batches(count, kind, template_id, pages_per_batch);
    println!(
        "{} {}s, {} per page, {} per batch: {} batch(es)",
        count,
        kind,
        units_per_page(kind, template_id),
        estimate.units_per_batch,
        estimate.batch_count
    );
    for (i, batch) in estimate.batches.iter().enumerate() {
        println!(
            "  {:>4}: units {}..{} ({} pages)",
            i + 1,
            batch.start,
            batch.end,
            batch.pages
        );
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(command) = args.first() else {
        eprintln!("{}", USAGE);
        return ExitCode::from(2);
    };

    let parsed = match PrintArgs::parse(&args[1..]) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("Error: {}\n{}", e, USAGE);
            return ExitCode::from(2);
        },
    };

    let result = match command.as_str() {
        "cards" => run_cards(&parsed),
        "stickers" => run_stickers(&parsed),
        "templates" => {
            run_templates();
            Ok(())
        },
        "estimate" => run_estimate(&parsed),
        "--help" | "-h" | "help" => {
            println!("{}", USAGE);
            Ok(())
        },
        other => {
            eprintln!("Error: unknown command '{}'\n{}", other, USAGE);
            return ExitCode::from(2);
        },
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        },
    }
}
