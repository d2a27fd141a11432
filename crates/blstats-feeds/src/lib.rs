//! blstats-feeds: analytics report sources for blstats.
//!
//! Each source reads one exported analytics report (JSON or CSV, from a file
//! or stdin) and hands back flat [`blstats_core::UsageRow`] values. Sources do
//! no classification; unknown browsers and odd versions are passed through
//! for the core to skip.

pub mod delimited;
pub mod error;
pub mod file;
pub mod json;
pub mod stdin;

pub use blstats_core::config::InputFormat;
pub use error::FeedError;
pub use file::FileSource;
pub use stdin::StdinSource;

use blstats_core::UsageRow;

/// Trait implemented by each report source.
pub trait RowSource {
    /// Short description used in logs and error messages.
    fn describe(&self) -> String;

    /// Read every row the source holds.
    fn read_rows(&mut self) -> Result<Vec<UsageRow>, FeedError>;
}

/// Parse a metric cell. Accepts plain numbers and thousands separators
/// (`"1,234"`), as analytics exports write them.
pub(crate) fn parse_metric(text: &str) -> Option<f64> {
    let cleaned: String = text.trim().chars().filter(|&c| c != ',').collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok()
}

pub(crate) fn read_report<R: std::io::Read>(reader: R, format: InputFormat) -> Result<Vec<UsageRow>, FeedError> {
    match format {
        InputFormat::Json => json::read_rows(reader),
        InputFormat::Csv => delimited::read_rows(reader),
    }
}
