//! Stdin report source.
//!
//! Reads the whole stream to EOF, so the report must be finite. The reader is
//! generic so tests can feed bytes without a real stdin.

use std::io::{self, Read};

use blstats_core::UsageRow;

use crate::{read_report, FeedError, InputFormat, RowSource};

/// Reads one report from stdin (or any other reader).
#[derive(Debug)]
pub struct StdinSource<R = io::Stdin> {
    reader: R,
    format: InputFormat,
}

impl StdinSource<io::Stdin> {
    pub fn new(format: InputFormat) -> Self {
        Self {
            reader: io::stdin(),
            format,
        }
    }
}

impl<R: Read> StdinSource<R> {
    pub fn from_reader(reader: R, format: InputFormat) -> Self {
        Self { reader, format }
    }
}

impl<R: Read> RowSource for StdinSource<R> {
    fn describe(&self) -> String {
        format!("stdin ({})", self.format)
    }

    fn read_rows(&mut self) -> Result<Vec<UsageRow>, FeedError> {
        let rows = read_report(&mut self.reader, self.format)?;
        tracing::debug!(source = %self.describe(), rows = rows.len(), "read report");
        Ok(rows)
    }
}
