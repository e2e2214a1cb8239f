//! Batch planning and sequential batch execution.
//!
//! Small jobs become one document. Larger jobs are cut into slices whose
//! boundaries fall on page boundaries, and each slice becomes its own
//! document. Slices run strictly one after another with a pause in between.

use crate::error::Result;
use crate::layout::{units_per_page, Template};
use crate::units::UnitKind;
use std::time::Duration;

/// One contiguous slice `[start, end)` of the unit list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchSlice {
    /// First unit index
    pub start: usize,
    /// One past the last unit index
    pub end: usize,
    /// Pages the slice fills
    pub pages: usize,
}

impl BatchSlice {
    /// Units in the slice.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the slice holds no units.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// How a job is cut into documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchEstimate {
    /// Number of documents
    pub batch_count: usize,
    /// Units in every batch but possibly the last
    pub units_per_batch: usize,
    /// Slices in order
    pub batches: Vec<BatchSlice>,
}

/// Cut `total_units` into batches of `pages_per_batch` pages of template
/// `template_id`.
///
/// Unknown templates use the fallback page capacity of their kind. A page
/// budget of zero is treated as one page.
pub fn estimate_batches(
    total_units: usize,
    kind: UnitKind,
    template_id: &str,
    pages_per_batch: usize,
) -> BatchEstimate {
    let per_page = units_per_page(kind, template_id);
    slice_units(total_units, per_page, pages_per_batch.max(1))
}

/// Decide how a job runs: one document when it spans at most
/// `single_document_page_limit` pages, otherwise the kind's page budget per
/// batch.
pub fn plan_batches(
    total_units: usize,
    template: &Template,
    single_document_page_limit: usize,
) -> BatchEstimate {
    let per_page = template.units_per_page();
    let total_pages = template.pages_for(total_units);

    let estimate = if total_pages <= single_document_page_limit {
        BatchEstimate {
            batch_count: 1,
            units_per_batch: total_units,
            batches: vec![BatchSlice {
                start: 0,
                end: total_units,
                pages: total_pages,
            }],
        }
    } else {
        slice_units(total_units, per_page, template.kind.pages_per_batch())
    };

    log::debug!(
        "{} units on {} ({} per page): {} pages in {} document(s)",
        total_units,
        template.id,
        per_page,
        total_pages,
        estimate.batch_count
    );
    estimate
}

fn slice_units(total_units: usize, per_page: usize, pages_per_batch: usize) -> BatchEstimate {
    let units_per_batch = per_page * pages_per_batch;
    let batch_count = total_units.div_ceil(units_per_batch);
    let batches = (0..batch_count)
        .map(|i| {
            let start = i * units_per_batch;
            let end = (start + units_per_batch).min(total_units);
            BatchSlice {
                start,
                end,
                pages: (end - start).div_ceil(per_page),
            }
        })
        .collect();

    BatchEstimate {
        batch_count,
        units_per_batch,
        batches,
    }
}

/// Output file name for one document.
///
/// `batch` is `(number, count)` with a one-based number; the suffix is only
/// added when the job has more than one batch.
pub fn document_file_name(
    kind: UnitKind,
    template_id: &str,
    batch: Option<(usize, usize)>,
    timestamp_ms: i64,
) -> String {
    let suffix = match batch {
        Some((number, count)) if count > 1 => format!("-batch{}of{}", number, count),
        _ => String::new(),
    };
    format!(
        "fs-{}-{}{}-{}.pdf",
        kind.file_label(),
        template_id,
        suffix,
        timestamp_ms
    )
}

/// Milliseconds since the Unix epoch, used in file names.
pub fn timestamp_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Runs planned batches in order.
#[derive(Debug, Clone)]
pub struct BatchScheduler {
    delay: Duration,
}

impl BatchScheduler {
    /// Create a scheduler pausing `delay` between batches.
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Run `job` for every slice of `plan`.
    ///
    /// `on_progress(n, count)` is called before batch `n` starts. The first
    /// failing batch aborts the run; documents delivered before it are kept.
    pub fn run<F>(
        &self,
        plan: &BatchEstimate,
        mut on_progress: Option<&mut dyn FnMut(usize, usize)>,
        mut job: F,
    ) -> Result<()>
    where
        F: FnMut(usize, &BatchSlice) -> Result<()>,
    {
        let count = plan.batches.len();
        for (index, slice) in plan.batches.iter().enumerate() {
            if let Some(callback) = on_progress.as_mut() {
                callback(index + 1, count);
            }
            if count > 1 {
                log::info!(
                    "Generating batch {}/{} (units {}..{}, {} pages)",
                    index + 1,
                    count,
                    slice.start,
                    slice.end,
                    slice.pages
                );
            }

            job(index, slice)?;

            if index + 1 < count && !self.delay.is_zero() {
                std::thread::sleep(self.delay);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::layout::lookup_template;
    use std::time::Instant;

    #[test]
    fn test_estimate_cards() {
        let estimate = estimate_batches(5000, UnitKind::Card, "avery5371", 10);
        assert_eq!(estimate.batch_count, 50);
        assert_eq!(estimate.units_per_batch, 100);
        assert_eq!(estimate.batches[49], BatchSlice { start: 4900, end: 5000, pages: 10 });
    }

    #[test]
    fn test_estimate_partial_last_batch() {
        let estimate = estimate_batches(250, UnitKind::Sticker, "apli10199", 1);
        assert_eq!(estimate.batch_count, 4);
        assert_eq!(estimate.batches[3], BatchSlice { start: 240, end: 250, pages: 1 });
    }

    #[test]
    fn test_estimate_unknown_template_uses_fallback() {
        let estimate = estimate_batches(200, UnitKind::Sticker, "nope", 1);
        assert_eq!(estimate.units_per_batch, 80);
        assert_eq!(estimate.batch_count, 3);
    }

    #[test]
    fn test_estimate_zero_page_budget() {
        let estimate = estimate_batches(25, UnitKind::Card, "avery5371", 0);
        assert_eq!(estimate.units_per_batch, 10);
        assert_eq!(estimate.batch_count, 3);
    }

    #[test]
    fn test_estimate_empty() {
        let estimate = estimate_batches(0, UnitKind::Card, "avery5371", 10);
        assert_eq!(estimate.batch_count, 0);
        assert!(estimate.batches.is_empty());
    }

    #[test]
    fn test_plan_single_document_up_to_limit() {
        let template = lookup_template("avery5371").unwrap();
        let plan = plan_batches(200, template, 20);
        assert_eq!(plan.batch_count, 1);
        assert_eq!(plan.batches[0], BatchSlice { start: 0, end: 200, pages: 20 });

        let plan = plan_batches(201, template, 20);
        assert_eq!(plan.batch_count, 3);
        assert_eq!(plan.batches[2].len(), 1);
    }

    #[test]
    fn test_plan_stickers_use_twenty_pages() {
        let template = lookup_template("apli10199").unwrap();
        let plan = plan_batches(80 * 21, template, 20);
        assert_eq!(plan.units_per_batch, 1600);
        assert_eq!(plan.batch_count, 2);
    }

    #[test]
    fn test_file_names() {
        assert_eq!(
            document_file_name(UnitKind::Card, "avery5371", None, 1700000000000),
            "fs-cards-avery5371-1700000000000.pdf"
        );
        assert_eq!(
            document_file_name(UnitKind::Sticker, "apli10199", Some((2, 5)), 42),
            "fs-stickers-apli10199-batch2of5-42.pdf"
        );
        assert_eq!(
            document_file_name(UnitKind::Card, "apli10609", Some((1, 1)), 7),
            "fs-cards-apli10609-7.pdf"
        );
    }

    #[test]
    fn test_run_reports_progress_in_order() {
        let plan = estimate_batches(35, UnitKind::Card, "avery5371", 1);
        let scheduler = BatchScheduler::new(Duration::ZERO);
        let mut seen = Vec::new();
        let mut jobs = Vec::new();
        let mut progress = |n: usize, m: usize| seen.push((n, m));

        scheduler
            .run(&plan, Some(&mut progress), |i, slice| {
                jobs.push((i, slice.start));
                Ok(())
            })
            .unwrap();

        assert_eq!(seen, vec![(1, 4), (2, 4), (3, 4), (4, 4)]);
        assert_eq!(jobs, vec![(0, 0), (1, 10), (2, 20), (3, 30)]);
    }

    #[test]
    fn test_run_aborts_on_failure() {
        let plan = estimate_batches(50, UnitKind::Card, "avery5371", 1);
        let scheduler = BatchScheduler::new(Duration::ZERO);
        let mut ran = 0;

        let result = scheduler.run(&plan, None, |i, _| {
            ran += 1;
            if i == 1 {
                Err(Error::Generation("surface lost".to_string()))
            } else {
                Ok(())
            }
        });

        assert!(matches!(result, Err(Error::Generation(_))));
        assert_eq!(ran, 2);
    }

    #[test]
    fn test_run_sleeps_between_batches_only() {
        let plan = estimate_batches(30, UnitKind::Card, "avery5371", 1);
        let scheduler = BatchScheduler::new(Duration::from_millis(20));
        let started = Instant::now();
        scheduler.run(&plan, None, |_, _| Ok(())).unwrap();
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_millis(40));
        assert!(elapsed < Duration::from_millis(2000));
    }
}
