//! Stats file writer.
//!
//! The document is written as 2-space-indented JSON with keys in sorted
//! order, which is the layout `browserslist` tooling expects to read and
//! keeps diffs of the committed file small between runs.

use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use blstats_core::StatsDocument;

/// Where the stats file goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stdout,
    File(PathBuf),
}

impl OutputTarget {
    /// `-` means stdout; anything else is a file path.
    pub fn from_path(path: &Path) -> Self {
        if path.as_os_str() == "-" {
            OutputTarget::Stdout
        } else {
            OutputTarget::File(path.to_path_buf())
        }
    }
}

impl fmt::Display for OutputTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputTarget::Stdout => write!(f, "stdout"),
            OutputTarget::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Render `doc` as pretty JSON without a trailing newline.
pub fn render(doc: &StatsDocument) -> anyhow::Result<String> {
    serde_json::to_string_pretty(doc).context("failed to serialize stats document")
}

/// Render `doc` and write it, followed by a newline, to `target`.
pub fn write_stats(doc: &StatsDocument, target: &OutputTarget) -> anyhow::Result<()> {
    let mut body = render(doc)?;
    body.push('\n');

    match target {
        OutputTarget::Stdout => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(body.as_bytes())
                .and_then(|()| stdout.flush())
                .context("failed to write stats to stdout")?;
        }
        OutputTarget::File(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
            std::fs::write(path, body).with_context(|| format!("failed to write {}", path.display()))?;
        }
    }

    tracing::debug!(%target, entries = doc.len(), "stats written");
    Ok(())
}
