//! Integration tests for batch planning and multi-document runs.

use fs_cards_print::api::estimate_batches;
use fs_cards_print::batch::plan_batches;
use fs_cards_print::layout::lookup_template;
use fs_cards_print::sink::{DirectorySink, MemorySink};
use fs_cards_print::{
    CardPrintOptions, CardUnit, LogoSource, PrintConfig, Printer, StickerPrintOptions, StickerUnit,
    UnitKind,
};
use regex::Regex;
use std::time::Duration;

fn printer() -> Printer {
    Printer::new(
        PrintConfig::default()
            .with_logo(LogoSource::None)
            .with_inter_batch_delay(Duration::ZERO),
    )
}

fn cards(n: usize) -> Vec<CardUnit> {
    (0..n)
        .map(|i| CardUnit::new(format!("c{}", i), format!("Card {}", i), "Deck", ""))
        .collect()
}

fn file_pattern() -> Regex {
    Regex::new(r"^fs-(cards|stickers)-[A-Za-z0-9]+(-batch\d+of\d+)?-\d{13}\.pdf$").unwrap()
}

#[test]
fn test_three_cards_one_document() {
    let mut sink = MemorySink::new();
    let mut progress = Vec::new();
    let mut record = |n: usize, m: usize| progress.push((n, m));

    let report = printer()
        .render_card_document(
            &cards(3),
            &CardPrintOptions::new("avery5371"),
            &mut sink,
            Some(&mut record),
        )
        .unwrap();

    assert_eq!(progress, vec![(1, 1)]);
    assert_eq!(report.pages, 1);
    assert_eq!(sink.documents.len(), 1);
    assert!(file_pattern().is_match(&sink.documents[0].0));
    assert!(!sink.documents[0].0.contains("batch"));
}

#[test]
fn test_twenty_five_cards_single_document() {
    let mut sink = MemorySink::new();
    let report = printer()
        .render_card_document(&cards(25), &CardPrintOptions::new("avery5376"), &mut sink, None)
        .unwrap();

    assert_eq!(report.batches, 1);
    assert_eq!(report.pages, 4);
    let pdf = String::from_utf8_lossy(&sink.documents[0].1).to_string();
    assert!(pdf.contains("/Count 4"));
}

#[test]
fn test_two_hundred_fifty_stickers_single_batch() {
    let stickers: Vec<StickerUnit> = cards(250).iter().map(StickerUnit::from).collect();
    let mut sink = MemorySink::new();
    let report = printer()
        .render_sticker_document(
            &stickers,
            &StickerPrintOptions::new("apli10199"),
            &mut sink,
            None,
        )
        .unwrap();

    assert_eq!(report.batches, 1);
    assert_eq!(report.pages, 4);
    assert!(report.files[0].starts_with("fs-stickers-apli10199-"));
}

#[test]
fn test_five_thousand_cards_plan() {
    let template = lookup_template("avery5371").unwrap();
    let plan = plan_batches(5000, template, 20);
    assert_eq!(plan.units_per_batch, 100);
    assert_eq!(plan.batch_count, 50);

    let mut next = 0;
    for slice in &plan.batches {
        assert_eq!(slice.start, next);
        assert!(slice.pages <= 10);
        next = slice.end;
    }
    assert_eq!(next, 5000);
}

#[test]
fn test_estimate_matches_ceiling_formula() {
    for total in [1, 99, 100, 101, 4999, 5000, 5001] {
        let estimate = estimate_batches(total, UnitKind::Card, "avery5371", 10);
        assert_eq!(estimate.batch_count, total.div_ceil(100), "total {}", total);
        let covered: usize = estimate.batches.iter().map(|b| b.len()).sum();
        assert_eq!(covered, total);
    }
}

#[test]
fn test_batched_run_names_and_progress() {
    // A low single-document limit forces batching without thousands of units.
    let printer = Printer::new(
        PrintConfig::default()
            .with_logo(LogoSource::None)
            .with_inter_batch_delay(Duration::ZERO)
            .with_single_document_page_limit(2),
    );
    let mut sink = MemorySink::new();
    let mut progress = Vec::new();
    let mut record = |n: usize, m: usize| progress.push((n, m));

    let report = printer
        .render_card_document(
            &cards(230),
            &CardPrintOptions::new("avery5371").with_summary(false),
            &mut sink,
            Some(&mut record),
        )
        .unwrap();

    assert_eq!(report.batches, 3);
    assert_eq!(report.pages, 23);
    assert_eq!(progress, vec![(1, 3), (2, 3), (3, 3)]);

    let pattern = file_pattern();
    for (i, (name, bytes)) in sink.documents.iter().enumerate() {
        assert!(pattern.is_match(name), "{}", name);
        assert!(name.contains(&format!("-batch{}of3-", i + 1)));
        assert!(bytes.starts_with(b"%PDF-"));
    }
}

#[test]
fn test_directory_sink_writes_files() {
    let dir = tempfile::tempdir().unwrap();
    let mut sink = DirectorySink::new(dir.path().join("print"));

    let report = printer()
        .render_card_document(&cards(12), &CardPrintOptions::new("apli10608"), &mut sink, None)
        .unwrap();

    assert_eq!(sink.written().len(), 1);
    let path = &sink.written()[0];
    assert_eq!(path.file_name().unwrap().to_string_lossy(), report.files[0]);
    let bytes = std::fs::read(path).unwrap();
    assert!(bytes.starts_with(b"%PDF-1.7"));
}
