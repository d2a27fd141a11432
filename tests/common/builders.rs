//! Test builders: ergonomic constructors for rows and small taxonomies.
//!
//! These are written for readability in assertions, not for production use.
//! They panic on invalid input rather than returning `Result`.

use blstats_core::{Taxonomy, UsageRow};

// ---------------------------------------------------------------------------
// Rows
// ---------------------------------------------------------------------------

/// Fluent builder for a `Vec<UsageRow>`.
///
/// ```rust
/// let rows = RowsBuilder::new()
///     .row("Chrome", "85.0", 100.0)
///     .repeat("Safari", "14.1", 10.0, 5)
///     .build();
/// ```
#[derive(Debug, Default)]
pub struct RowsBuilder {
    rows: Vec<UsageRow>,
}

impl RowsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn row(mut self, browser: &str, version: &str, metric: f64) -> Self {
        self.rows.push(UsageRow::new(browser, version, metric));
        self
    }

    /// Push the same row `times` times, as a report split by a dimension
    /// the tool ignores (country, OS) would.
    pub fn repeat(mut self, browser: &str, version: &str, metric: f64, times: usize) -> Self {
        for _ in 0..times {
            self.rows.push(UsageRow::new(browser, version, metric));
        }
        self
    }

    pub fn build(self) -> Vec<UsageRow> {
        self.rows
    }
}

/// Rows from `(browser, version, metric)` tuples.
pub fn rows(tuples: &[(&str, &str, f64)]) -> Vec<UsageRow> {
    tuples
        .iter()
        .map(|&(browser, version, metric)| UsageRow::new(browser, version, metric))
        .collect()
}

// ---------------------------------------------------------------------------
// Taxonomies
// ---------------------------------------------------------------------------

/// Fluent builder producing taxonomy TOML, then a validated [`Taxonomy`].
///
/// ```rust
/// let taxonomy = TaxonomyBuilder::new()
///     .ranges("chrome", &["Chrome"], &["70-79", "80-89"])
///     .exact("safari", &["Safari"], &["13", "13.1", "14", "14.1"])
///     .build();
/// ```
#[derive(Debug, Default)]
pub struct TaxonomyBuilder {
    toml: String,
}

fn quoted(items: &[&str]) -> String {
    items.iter().map(|s| format!("{s:?}")).collect::<Vec<_>>().join(", ")
}

impl TaxonomyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn browser(mut self, id: &str, aliases: &[&str], scheme: &str, tokens: &[&str], extra: &str) -> Self {
        self.toml.push_str(&format!(
            "[[browser]]\nid = {id:?}\naliases = [{}]\nscheme = {scheme:?}\ntokens = [{}]\n{extra}\n",
            quoted(aliases),
            quoted(tokens),
        ));
        self
    }

    pub fn exact(self, id: &str, aliases: &[&str], tokens: &[&str]) -> Self {
        self.browser(id, aliases, "exact", tokens, "")
    }

    pub fn ranges(self, id: &str, aliases: &[&str], tokens: &[&str]) -> Self {
        self.browser(id, aliases, "ranges", tokens, "")
    }

    /// Ranges whose gaps go to the newer bucket.
    pub fn ranges_gap_newer(self, id: &str, aliases: &[&str], tokens: &[&str]) -> Self {
        self.browser(id, aliases, "ranges", tokens, "gap = \"newer\"\n")
    }

    pub fn single(self, id: &str, aliases: &[&str], token: &str) -> Self {
        self.browser(id, aliases, "single", &[token], "")
    }

    pub fn to_toml(&self) -> &str {
        &self.toml
    }

    pub fn build(self) -> Taxonomy {
        Taxonomy::from_toml_str(&self.toml)
            .unwrap_or_else(|err| panic!("test taxonomy failed to load: {err}\n{}", self.toml))
    }
}

/// Chrome in decade buckets plus Safari minors: the taxonomy the worked
/// examples of the share calculation use.
pub fn decade_taxonomy() -> Taxonomy {
    TaxonomyBuilder::new()
        .ranges("chrome", &["Chrome"], &["70-79", "80-89"])
        .exact("safari", &["Safari"], &["13", "13.1", "14", "14.1"])
        .single("op_mini", &["Opera Mini"], "all")
        .build()
}
