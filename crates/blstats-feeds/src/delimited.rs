//! CSV analytics reports.
//!
//! The first non-comment line is the header. Column names follow the
//! vendor export (`Browser`, `Browser Version`, `Sessions`) or the short
//! forms (`browser`, `version`, `metric`). Lines starting with `#` are the
//! preamble analytics UIs put above an export and are skipped.

use std::io::Read;

use blstats_core::UsageRow;
use serde::Deserialize;

use crate::{parse_metric, FeedError};

#[derive(Debug, Deserialize)]
struct Record {
    #[serde(alias = "Browser", alias = "ga:browser", alias = "browserName")]
    browser: String,
    #[serde(
        alias = "Browser Version",
        alias = "Browser version",
        alias = "ga:browserVersion",
        alias = "browserVersion"
    )]
    version: String,
    #[serde(
        alias = "Sessions",
        alias = "sessions",
        alias = "ga:sessions",
        alias = "Users",
        alias = "users",
        alias = "ga:users",
        alias = "count"
    )]
    metric: String,
}

/// Read every row of a CSV report.
pub fn read_rows<R: Read>(reader: R) -> Result<Vec<UsageRow>, FeedError> {
    let mut reader = ::csv::ReaderBuilder::new()
        .has_headers(true)
        .comment(Some(b'#'))
        .trim(::csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();
    for (index, record) in reader.deserialize::<Record>().enumerate() {
        let record = record?;
        let Some(metric) = parse_metric(&record.metric) else {
            return Err(FeedError::InvalidMetric {
                row: index + 1,
                value: record.metric,
            });
        };
        rows.push(UsageRow::new(record.browser, record.version, metric));
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn read(src: &str) -> Result<Vec<UsageRow>, FeedError> {
        read_rows(src.as_bytes())
    }

    #[test]
    fn vendor_export_with_preamble() {
        let src = "\
# ----------------------------------------
# All Web Site Data
# Browser & OS
# 20240101-20240331
# ----------------------------------------
Browser,Browser Version,Sessions
Chrome,85.0.4183.121,\"1,234\"
Safari,14.1.2,56
";
        assert_eq!(
            read(src).unwrap(),
            vec![
                UsageRow::new("Chrome", "85.0.4183.121", 1234.0),
                UsageRow::new("Safari", "14.1.2", 56.0),
            ]
        );
    }

    #[test]
    fn short_headers_and_padding() {
        let src = "browser , version , metric\n Opera Mini , (not set) , 3 \n";
        assert_eq!(read(src).unwrap(), vec![UsageRow::new("Opera Mini", "(not set)", 3.0)]);
    }

    #[test]
    fn extra_columns_are_ignored() {
        let src = "Browser,Operating System,Browser Version,Sessions,Bounce Rate\nEdge,Windows,18.17763,9,40%\n";
        assert_eq!(read(src).unwrap(), vec![UsageRow::new("Edge", "18.17763", 9.0)]);
    }

    #[test]
    fn header_only_has_no_rows() {
        assert!(read("browser,version,sessions\n").unwrap().is_empty());
        assert!(read("").unwrap().is_empty());
    }

    #[test]
    fn bad_metric_names_the_row() {
        let err = read("browser,version,sessions\nChrome,85,1\nChrome,86,\n").unwrap_err();
        assert!(matches!(err, FeedError::InvalidMetric { row: 2, .. }), "{err:?}");
    }

    #[test]
    fn missing_column_is_a_csv_error() {
        let err = read("browser,sessions\nChrome,1\n").unwrap_err();
        assert!(matches!(err, FeedError::Csv(_)), "{err:?}");
    }
}
