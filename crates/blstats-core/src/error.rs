//! Error types for blstats-core.
//!
//! Per-row misses are not errors (see [`crate::RowOutcome`]). The only hard
//! failure in the core is a taxonomy that cannot classify versions
//! unambiguously.

use crate::BrowserId;
use thiserror::Error;

/// A defect in taxonomy reference data, reported when the taxonomy is loaded.
#[derive(Error, Debug)]
pub enum TaxonomyError {
    #[error("failed to parse taxonomy: {0}")]
    Parse(#[from] config::ConfigError),

    #[error("unknown browser identifier {0:?}")]
    UnknownBrowser(String),

    #[error("browser {0} is defined more than once")]
    DuplicateBrowser(BrowserId),

    #[error("alias {alias:?} is claimed by both {first} and {second}")]
    DuplicateAlias {
        alias: String,
        first: BrowserId,
        second: BrowserId,
    },

    #[error("browser {0} has no version tokens")]
    EmptyScheme(BrowserId),

    #[error("browser {browser}: unknown version scheme {kind:?} (expected exact, ranges or single)")]
    UnknownScheme { browser: BrowserId, kind: String },

    #[error("browser {browser}: unknown gap policy {value:?} (expected older or newer)")]
    UnknownGapPolicy { browser: BrowserId, value: String },

    #[error("browser {browser}: malformed version token {token:?}")]
    InvalidToken { browser: BrowserId, token: String },

    #[error("browser {browser}: range {token:?} ends before it starts")]
    InvertedRange { browser: BrowserId, token: String },

    #[error("browser {browser}: buckets {lower:?} and {upper:?} overlap or are out of order")]
    Overlap {
        browser: BrowserId,
        lower: String,
        upper: String,
    },

    #[error("browser {browser}: exact version list contains range {token:?}")]
    RangeInExactList { browser: BrowserId, token: String },

    #[error("browser {browser}: token {token:?} appears more than once")]
    DuplicateToken { browser: BrowserId, token: String },
}
