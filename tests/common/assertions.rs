//! Domain-specific assertion macros for blstats harnesses.
//!
//! These add context-rich failure messages that say *which* document entry
//! or share invariant broke, and print the whole document when it did.

use blstats_core::StatsDocument;

// ---------------------------------------------------------------------------
// Entry assertions
// ---------------------------------------------------------------------------

/// Assert that a document holds `share` for `(browser, version)`.
///
/// ```rust
/// assert_share!(doc, BrowserId::Chrome, "80-89", 75.0);
/// ```
#[macro_export]
macro_rules! assert_share {
    ($doc:expr, $browser:expr, $version:expr, $share:expr) => {{
        let doc: &blstats_core::StatsDocument = &$doc;
        let browser: blstats_core::BrowserId = $browser;
        let version: &str = $version;
        let expected: f64 = $share;
        match doc.share(browser, version) {
            Some(actual) if actual == expected => {}
            Some(actual) => panic!(
                "assert_share! failed:\n  {}[{:?}]\n  expected: {}\n  actual:   {}\n  document: {:?}",
                browser, version, expected, actual, doc
            ),
            None => panic!(
                "assert_share! failed: no entry {}[{:?}].\n  versions for {}: {:?}",
                browser,
                version,
                browser,
                doc.versions(browser).map(|v| v.keys().collect::<Vec<_>>())
            ),
        }
    }};
}

/// Assert that a document has no entry at all for `browser`.
#[macro_export]
macro_rules! assert_no_browser {
    ($doc:expr, $browser:expr) => {{
        let doc: &blstats_core::StatsDocument = &$doc;
        let browser: blstats_core::BrowserId = $browser;
        if let Some(versions) = doc.versions(browser) {
            panic!(
                "assert_no_browser! failed: {} is present with {:?}",
                browser, versions
            );
        }
    }};
}

// ---------------------------------------------------------------------------
// Share invariants
// ---------------------------------------------------------------------------

/// Assert that every share lies in `[0, 100]`.
#[macro_export]
macro_rules! assert_shares_in_range {
    ($doc:expr) => {{
        let doc: &blstats_core::StatsDocument = &$doc;
        for (browser, version, share) in doc.iter() {
            if !(0.0..=100.0).contains(&share) {
                panic!(
                    "assert_shares_in_range! failed: {}[{:?}] = {}",
                    browser, version, share
                );
            }
        }
    }};
}

/// Largest drift the rounded shares of `doc` may show from 100, given the
/// precision they were rounded to.
pub fn rounding_slack(doc: &StatsDocument, precision: u32) -> f64 {
    0.5 * 10f64.powi(-(precision as i32)) * doc.len() as f64 + 1e-9
}

/// Assert that the shares of a non-empty document add up to 100 within the
/// rounding slack for `precision`.
#[macro_export]
macro_rules! assert_shares_sum_to_100 {
    ($doc:expr, $precision:expr) => {{
        let doc: &blstats_core::StatsDocument = &$doc;
        let total = doc.total_share();
        let slack = $crate::common::rounding_slack(doc, $precision);
        if (total - 100.0).abs() > slack {
            panic!(
                "assert_shares_sum_to_100! failed:\n  total: {}\n  slack: {}\n  document: {:?}",
                total, slack, doc
            );
        }
    }};
}
