//! blstats-core: browser usage to browserslist stats conversion.
//!
//! This crate holds the three pipeline stages plus the static reference data
//! they share. Nothing in here performs I/O during a run; rows come in as an
//! in-memory slice and a [`StatsDocument`] comes out.
//!
//! # Architecture
//!
//! ```text
//! UsageRow ──► Resolver ──► Normalizer ──► Aggregator ──► StatsDocument
//!                 │             │
//!                 └── Taxonomy ─┘   (immutable, process-wide)
//! ```

pub mod aggregator;
pub mod browser;
pub mod config;
pub mod error;
pub mod normalizer;
pub mod resolver;
pub mod taxonomy;
pub mod types;
pub mod version;

pub use aggregator::{aggregate, AggregateReport, Aggregator, RowOutcome, SkipCounts, SkipReason};
pub use browser::BrowserId;
pub use error::TaxonomyError;
pub use taxonomy::{GapPolicy, Taxonomy, VersionScheme};
pub use types::{ResolvedRow, StatsDocument, UsageRow};
pub use version::Version;

/// Number of decimal places shares are rounded to when nothing else is configured.
pub const DEFAULT_PRECISION: u32 = 2;
