//! Error types for blstats-feeds.

use std::path::PathBuf;
use thiserror::Error;

/// Failure to read or parse an analytics report.
#[derive(Error, Debug)]
pub enum FeedError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed JSON report: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed CSV report: {0}")]
    Csv(#[from] csv::Error),

    #[error("row {row}: metric {value:?} is not a number")]
    InvalidMetric { row: usize, value: String },

    #[error("cannot tell the report format of {0} (expected a .json or .csv file)")]
    UnknownFormat(PathBuf),
}
