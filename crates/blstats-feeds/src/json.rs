//! JSON analytics reports.
//!
//! Accepted shapes, tried in this order:
//!
//! ```text
//! [{"browser": "Chrome", "version": "85.0", "sessions": 100}, …]   records
//! [["Chrome", "85.0", "100"], …]                                    tuples
//! [{"rows": [["Chrome", "85.0", "100"], …]}, …]                     report pages
//! {"rows": [["Chrome", "85.0", "100"], …]}                          one report page
//! ```
//!
//! Records and tuples may be mixed. Metrics may be numbers or numeric strings.

use std::io::Read;

use blstats_core::UsageRow;
use serde::Deserialize;

use crate::{parse_metric, FeedError};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Number(serde_json::Number),
}

impl Scalar {
    fn into_text(self) -> String {
        match self {
            Scalar::Text(text) => text,
            Scalar::Number(number) => number.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct Record {
    #[serde(alias = "ga:browser", alias = "browserName")]
    browser: String,
    #[serde(alias = "ga:browserVersion", alias = "browserVersion")]
    version: Scalar,
    #[serde(
        alias = "sessions",
        alias = "ga:sessions",
        alias = "users",
        alias = "ga:users",
        alias = "count"
    )]
    metric: Scalar,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Row {
    Record(Record),
    Tuple(String, Scalar, Scalar),
}

/// One page of a paginated report. Inside a page list `rows` is required,
/// so a list of half-filled records is reported as an error rather than read
/// as empty pages.
#[derive(Debug, Deserialize)]
struct Page {
    rows: Vec<Row>,
}

/// A lone report page; vendors omit `rows` when the result is empty.
#[derive(Debug, Deserialize)]
struct SinglePage {
    #[serde(default)]
    rows: Vec<Row>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Report {
    Rows(Vec<Row>),
    Pages(Vec<Page>),
    Page(SinglePage),
}

/// Read every row of a JSON report.
pub fn read_rows<R: Read>(reader: R) -> Result<Vec<UsageRow>, FeedError> {
    let report: Report = serde_json::from_reader(reader)?;
    let rows = match report {
        Report::Rows(rows) => rows,
        Report::Pages(pages) => pages.into_iter().flat_map(|page| page.rows).collect(),
        Report::Page(page) => page.rows,
    };

    rows.into_iter()
        .enumerate()
        .map(|(index, row)| {
            let (browser, version, metric) = match row {
                Row::Record(r) => (r.browser, r.version, r.metric),
                Row::Tuple(browser, version, metric) => (browser, version, metric),
            };
            let metric = metric.into_text();
            let Some(value) = parse_metric(&metric) else {
                return Err(FeedError::InvalidMetric {
                    row: index + 1,
                    value: metric,
                });
            };
            Ok(UsageRow::new(browser, version.into_text(), value))
        })
        .collect()
}
