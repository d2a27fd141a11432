//! Browser identity resolver: vendor browser names to caniuse identifiers.
//!
//! Matching is a case-insensitive lookup of the trimmed name in the
//! taxonomy's alias index. Names that are not listed (crawlers, in-house
//! agents, rare browsers) resolve to `None`; that is an ordinary outcome and
//! the caller simply skips the row.

use crate::{BrowserId, Taxonomy};

/// Resolve a raw vendor browser name against `taxonomy`.
pub fn resolve(taxonomy: &Taxonomy, raw_browser: &str) -> Option<BrowserId> {
    taxonomy.lookup_alias(raw_browser)
}
