//! Version normalizer: raw version strings to taxonomy version tokens.
//!
//! Classification is attempted in order: named token (`"TP"`) → dotted
//! version → bucket search. Bucket search finds the last bucket whose start
//! is at or below the version:
//!
//! - a version equal to a bucket's start belongs to that bucket
//!   (`80.0` with `70-79` / `80-89` → `80-89`);
//! - a version past the newest bucket clamps into it;
//! - a version below the first bucket is not recognized;
//! - a version between one bucket's end and the next bucket's start goes to
//!   the older bucket, unless the scheme's [`GapPolicy`] is `Newer`.

use crate::taxonomy::{Bucket, GapPolicy, VersionScheme};
use crate::{BrowserId, Taxonomy, Version};

/// Normalize `raw_version` for `browser`. Returns `None` when the browser is
/// not in the taxonomy or the version cannot be placed.
pub fn normalize<'t>(taxonomy: &'t Taxonomy, browser: BrowserId, raw_version: &str) -> Option<&'t str> {
    taxonomy.scheme(browser)?.classify(raw_version)
}

impl VersionScheme {
    /// Map a raw version onto one of this scheme's tokens.
    pub fn classify(&self, raw_version: &str) -> Option<&str> {
        match self {
            VersionScheme::Single { token } => Some(token.as_str()),
            VersionScheme::Exact { buckets, named } => {
                match_named(named, raw_version).or_else(|| {
                    let version = Version::parse(raw_version)?;
                    locate(buckets, &version, GapPolicy::Older)
                })
            }
            VersionScheme::Ranges {
                buckets,
                named,
                gap,
            } => match_named(named, raw_version).or_else(|| {
                let version = Version::parse(raw_version)?;
                locate(buckets, &version, *gap)
            }),
        }
    }
}

fn match_named<'s>(named: &'s [String], raw_version: &str) -> Option<&'s str> {
    let raw = raw_version.trim();
    named
        .iter()
        .find(|token| token.eq_ignore_ascii_case(raw))
        .map(String::as_str)
}

/// Buckets are sorted and non-overlapping (checked at taxonomy load), so a
/// binary search on bucket starts is enough.
fn locate<'b>(buckets: &'b [Bucket], version: &Version, gap: GapPolicy) -> Option<&'b str> {
    let above = buckets.partition_point(|bucket| bucket.start <= *version);
    let index = above.checked_sub(1)?;
    let bucket = &buckets[index];

    let chosen = match (gap, buckets.get(index + 1)) {
        (GapPolicy::Newer, Some(next)) if bucket.ends_before(version) => next,
        _ => bucket,
    };
    Some(chosen.token.as_str())
}
