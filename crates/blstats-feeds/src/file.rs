//! File report source.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use blstats_core::UsageRow;

use crate::{read_report, FeedError, InputFormat, RowSource};

/// Format implied by a file extension (`.json` or `.csv`, any case).
pub fn format_for_path(path: &Path) -> Option<InputFormat> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "json" => Some(InputFormat::Json),
        "csv" => Some(InputFormat::Csv),
        _ => None,
    }
}

/// Reads one exported report from disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    format: InputFormat,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>, format: InputFormat) -> Self {
        Self {
            path: path.into(),
            format,
        }
    }

    /// Build a source whose format comes from the file extension.
    pub fn infer(path: impl Into<PathBuf>) -> Result<Self, FeedError> {
        let path = path.into();
        let format = format_for_path(&path).ok_or_else(|| FeedError::UnknownFormat(path.clone()))?;
        Ok(Self { path, format })
    }

}

impl RowSource for FileSource {
    fn describe(&self) -> String {
        format!("{} ({})", self.path.display(), self.format)
    }

    fn read_rows(&mut self) -> Result<Vec<UsageRow>, FeedError> {
        let file = File::open(&self.path).map_err(|source| FeedError::Io {
            path: self.path.clone(),
            source,
        })?;
        let rows = read_report(BufReader::new(file), self.format)?;
        tracing::debug!(source = %self.describe(), rows = rows.len(), "read report");
        Ok(rows)
    }
}
