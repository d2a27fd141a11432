//! Core types for blstats-core.
//!
//! This module defines the data that crosses stage boundaries: the raw
//! [`UsageRow`] handed in by a feed, the [`ResolvedRow`] produced once both
//! axes are classified, and the [`StatsDocument`] written to
//! `browserslist-stats.json`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::BrowserId;

/// One analytics record as reported by the vendor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageRow {
    /// Vendor browser name, e.g. `"Chrome"` or `"Safari (in-app)"`.
    pub browser: String,
    /// Vendor version string, e.g. `"85.0.4183.121"`.
    pub version: String,
    /// Sessions (or users) attributed to this browser/version.
    pub metric: f64,
}

impl UsageRow {
    pub fn new(browser: impl Into<String>, version: impl Into<String>, metric: f64) -> Self {
        Self {
            browser: browser.into(),
            version: version.into(),
            metric,
        }
    }
}

/// A row whose browser and version were both recognized. Borrows the version
/// token from the taxonomy it was classified against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedRow<'t> {
    pub browser: BrowserId,
    pub version: &'t str,
    pub metric: f64,
}

/// Browser → version token → usage share (percent of all retained traffic).
///
/// Serializes as the plain nested object `browserslist` reads. Keys are kept
/// in sorted order so rendered files are stable across runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatsDocument {
    browsers: BTreeMap<BrowserId, BTreeMap<String, f64>>,
}

impl StatsDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, browser: BrowserId, version: impl Into<String>, share: f64) {
        self.browsers
            .entry(browser)
            .or_default()
            .insert(version.into(), share);
    }

    /// Share for one `(browser, token)` pair, if it received traffic.
    pub fn share(&self, browser: BrowserId, version: &str) -> Option<f64> {
        self.browsers.get(&browser)?.get(version).copied()
    }

    /// All version shares for `browser`.
    pub fn versions(&self, browser: BrowserId) -> Option<&BTreeMap<String, f64>> {
        self.browsers.get(&browser)
    }

    pub fn browsers(&self) -> impl Iterator<Item = BrowserId> + '_ {
        self.browsers.keys().copied()
    }

    /// Every `(browser, token, share)` triple in key order.
    pub fn iter(&self) -> impl Iterator<Item = (BrowserId, &str, f64)> + '_ {
        self.browsers.iter().flat_map(|(&browser, versions)| {
            versions
                .iter()
                .map(move |(version, &share)| (browser, version.as_str(), share))
        })
    }

    /// Number of `(browser, token)` pairs.
    pub fn len(&self) -> usize {
        self.browsers.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.browsers.is_empty()
    }

    /// Sum of every share in the document.
    pub fn total_share(&self) -> f64 {
        self.iter().map(|(_, _, share)| share).sum()
    }
}
