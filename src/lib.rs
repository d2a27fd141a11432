//! blstats: browser analytics to `browserslist-stats.json`.
//!
//! The binary is a thin shell over this crate. The library re-exports the
//! core and feed types and adds the two pieces that touch the outside world
//! on the way out: the stats file writer and the run pipeline.
//!
//! # Architecture
//!
//! ```text
//! RowSource ──► Aggregator ──► StatsDocument ──► write_stats
//!  (feeds)        (core)                          (export)
//! ```

pub mod export;
pub mod pipeline;

pub use blstats_core::{
    aggregate, AggregateReport, Aggregator, BrowserId, RowOutcome, SkipCounts, SkipReason, StatsDocument, Taxonomy,
    UsageRow,
};
pub use blstats_feeds::{FeedError, FileSource, InputFormat, RowSource, StdinSource};
