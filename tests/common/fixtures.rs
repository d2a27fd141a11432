//! Static analytics reports and row sets used across harnesses.
//!
//! The report strings mirror what analytics UIs and the Core Reporting API
//! actually export, preamble lines and thousands separators included.

use blstats_core::UsageRow;

/// The first worked example: two Chrome 85 rows and one Safari 14.1 row.
pub const SCENARIO_ONE: &[(&str, &str, f64)] = &[
    ("Chrome", "85.0", 100.0),
    ("Chrome", "85.0", 50.0),
    ("Safari", "14.1", 50.0),
];

/// Realistic mix across the built-in taxonomy, including rows that must be
/// skipped (bots, `(not set)` versions, too-old versions).
pub const MIXED_TRAFFIC: &[(&str, &str, f64)] = &[
    ("Chrome", "120.0.6099.109", 4200.0),
    ("Chrome", "119.0.6045.199", 1300.0),
    ("Safari", "17.1", 900.0),
    ("Safari", "15.3", 120.0),
    ("Safari (in-app)", "16.6.1", 310.0),
    ("Mobile Safari", "14.4.2", 75.0),
    ("Firefox", "115.0", 480.0),
    ("Edge", "120.0.2210.77", 650.0),
    ("Internet Explorer", "11.0", 40.0),
    ("Opera Mini", "(not set)", 15.0),
    ("Samsung Internet", "23.0", 220.0),
    ("Chrome Mobile", "120.0.6099.144", 2100.0),
    ("BotCrawler", "1.0", 9000.0),
    ("Chrome", "(not set)", 33.0),
    ("Internet Explorer", "4.0", 2.0),
];

/// A Google Analytics CSV export with its comment preamble.
pub const GA_CSV_EXPORT: &str = "\
# ----------------------------------------
# All Web Site Data
# Browser & OS
# 20240101-20240331
# ----------------------------------------

Browser,Browser Version,Sessions
Chrome,85.0.4183.121,\"1,500\"
Safari,14.1,500
Opera Mini,(not set),0
";

/// One Core Reporting API page.
pub const GA_API_PAGE: &str = r#"{
  "kind": "analytics#gaData",
  "columnHeaders": [
    {"name": "ga:browser"},
    {"name": "ga:browserVersion"},
    {"name": "ga:sessions"}
  ],
  "rows": [
    ["Chrome", "85.0.4183.121", "1500"],
    ["Safari", "14.1", "500"]
  ]
}"#;

/// `n` rows cycling through [`MIXED_TRAFFIC`], for volume tests.
pub fn high_volume_rows(n: usize) -> Vec<UsageRow> {
    MIXED_TRAFFIC
        .iter()
        .cycle()
        .take(n)
        .map(|&(browser, version, metric)| UsageRow::new(browser, version, metric))
        .collect()
}
