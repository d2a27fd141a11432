//! Aggregator & share calculator.
//!
//! Rows are pushed one at a time. Each push reports a [`RowOutcome`]; only
//! resolved rows touch the accumulator. [`Aggregator::finish`] turns the
//! accumulated totals into percentages of the grand total.

use std::collections::BTreeMap;

use crate::normalizer::normalize;
use crate::resolver::resolve;
use crate::{BrowserId, ResolvedRow, StatsDocument, Taxonomy, UsageRow};

/// Why a row was left out of the totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// The vendor browser name matches no taxonomy alias.
    UnknownBrowser,
    /// The version is malformed or older than every tracked version.
    UnknownVersion,
    /// The metric is negative, NaN or infinite.
    InvalidMetric,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::UnknownBrowser => write!(f, "unknown browser"),
            SkipReason::UnknownVersion => write!(f, "unknown version"),
            SkipReason::InvalidMetric => write!(f, "invalid metric"),
        }
    }
}

/// Per-row result of [`Aggregator::push`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RowOutcome<'t> {
    Resolved(ResolvedRow<'t>),
    Skipped(SkipReason),
}

impl RowOutcome<'_> {
    pub fn is_resolved(&self) -> bool {
        matches!(self, RowOutcome::Resolved(_))
    }
}

/// Skipped-row counters, one per [`SkipReason`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SkipCounts {
    pub unknown_browser: usize,
    pub unknown_version: usize,
    pub invalid_metric: usize,
}

impl SkipCounts {
    fn record(&mut self, reason: SkipReason) {
        match reason {
            SkipReason::UnknownBrowser => self.unknown_browser += 1,
            SkipReason::UnknownVersion => self.unknown_version += 1,
            SkipReason::InvalidMetric => self.invalid_metric += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.unknown_browser + self.unknown_version + self.invalid_metric
    }
}

/// Finished aggregation: the document plus what was dropped along the way.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateReport {
    pub document: StatsDocument,
    pub retained_rows: usize,
    pub skipped: SkipCounts,
    /// Sum of every retained metric; infinite if the metrics overflow `f64`.
    pub grand_total: f64,
}

/// Power of two applied to every metric when the unscaled totals overflow.
/// Scaling by a power of two is exact, so shares are unchanged.
const OVERFLOW_SCALE: f64 = 1.0 / 18_446_744_073_709_551_616.0;

/// Every retained metric, grouped by bucket.
///
/// Contributions are summed only in [`Accumulator::totals`], in sorted order,
/// so the totals are the same for any ordering of the input rows.
#[derive(Debug, Default)]
struct Accumulator<'t> {
    buckets: BTreeMap<BrowserId, BTreeMap<&'t str, Vec<f64>>>,
}

impl<'t> Accumulator<'t> {
    fn add(&mut self, row: &ResolvedRow<'t>) {
        self.buckets
            .entry(row.browser)
            .or_default()
            .entry(row.version)
            .or_default()
            .push(row.metric);
    }

    fn sort(&mut self) {
        for contributions in self.buckets.values_mut().flat_map(BTreeMap::values_mut) {
            contributions.sort_by(f64::total_cmp);
        }
    }

    /// Bucket totals in key order, each metric multiplied by `scale`, plus
    /// their sum. Expects [`Accumulator::sort`] to have run.
    fn totals(&self, scale: f64) -> (Vec<(BrowserId, &'t str, f64)>, f64) {
        let mut totals = Vec::new();
        let mut grand_total = 0.0;
        for (&browser, versions) in &self.buckets {
            for (&version, contributions) in versions {
                let total: f64 = contributions.iter().map(|metric| metric * scale).sum();
                grand_total += total;
                totals.push((browser, version, total));
            }
        }
        (totals, grand_total)
    }
}

/// Single-pass aggregator over one taxonomy.
#[derive(Debug)]
pub struct Aggregator<'t> {
    taxonomy: &'t Taxonomy,
    precision: u32,
    acc: Accumulator<'t>,
    retained_rows: usize,
    skipped: SkipCounts,
}

impl<'t> Aggregator<'t> {
    /// `precision` is the number of decimal places shares are rounded to.
    pub fn new(taxonomy: &'t Taxonomy, precision: u32) -> Self {
        Self {
            taxonomy,
            precision,
            acc: Accumulator::default(),
            retained_rows: 0,
            skipped: SkipCounts::default(),
        }
    }

    /// Classify one row without touching the totals.
    pub fn classify(&self, row: &UsageRow) -> RowOutcome<'t> {
        if !row.metric.is_finite() || row.metric < 0.0 {
            return RowOutcome::Skipped(SkipReason::InvalidMetric);
        }
        let Some(browser) = resolve(self.taxonomy, &row.browser) else {
            return RowOutcome::Skipped(SkipReason::UnknownBrowser);
        };
        let Some(version) = normalize(self.taxonomy, browser, &row.version) else {
            return RowOutcome::Skipped(SkipReason::UnknownVersion);
        };
        RowOutcome::Resolved(ResolvedRow {
            browser,
            version,
            metric: row.metric,
        })
    }

    /// Classify one row and, if it resolved, add it to the totals.
    pub fn push(&mut self, row: &UsageRow) -> RowOutcome<'t> {
        let outcome = self.classify(row);
        match &outcome {
            RowOutcome::Resolved(resolved) => {
                self.acc.add(resolved);
                self.retained_rows += 1;
            }
            RowOutcome::Skipped(reason) => {
                self.skipped.record(*reason);
                tracing::debug!(
                    browser = %row.browser,
                    version = %row.version,
                    metric = row.metric,
                    %reason,
                    "skipping row"
                );
            }
        }
        outcome
    }

    pub fn extend<'r>(&mut self, rows: impl IntoIterator<Item = &'r UsageRow>) {
        for row in rows {
            self.push(row);
        }
    }

    /// Convert totals into rounded percentages of the grand total.
    pub fn finish(mut self) -> AggregateReport {
        self.acc.sort();
        let (mut totals, grand_total) = self.acc.totals(1.0);
        let mut divisor = grand_total;
        if !grand_total.is_finite() {
            tracing::warn!("usage totals overflow; rescaling metrics");
            (totals, divisor) = self.acc.totals(OVERFLOW_SCALE);
        }

        let mut document = StatsDocument::new();
        if divisor > 0.0 {
            for (browser, version, value) in totals {
                if value > 0.0 {
                    document.insert(browser, version, round_to(value / divisor * 100.0, self.precision));
                }
            }
        }

        tracing::info!(
            retained = self.retained_rows,
            skipped = self.skipped.total(),
            unknown_browser = self.skipped.unknown_browser,
            unknown_version = self.skipped.unknown_version,
            invalid_metric = self.skipped.invalid_metric,
            entries = document.len(),
            "aggregation finished"
        );

        AggregateReport {
            document,
            retained_rows: self.retained_rows,
            skipped: self.skipped,
            grand_total,
        }
    }
}

/// One-shot aggregation of `rows` against `taxonomy`.
pub fn aggregate<'r>(
    taxonomy: &Taxonomy,
    rows: impl IntoIterator<Item = &'r UsageRow>,
    precision: u32,
) -> StatsDocument {
    let mut aggregator = Aggregator::new(taxonomy, precision);
    aggregator.extend(rows);
    aggregator.finish().document
}

/// Round half away from zero to `precision` decimal places.
pub fn round_to(value: f64, precision: u32) -> f64 {
    let scale = 10f64.powi(precision.min(15) as i32);
    (value * scale).round() / scale
}
