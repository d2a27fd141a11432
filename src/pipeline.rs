//! One full run: read a report, aggregate it, write the stats file.

use std::path::{Path, PathBuf};

use anyhow::Context;
use blstats_core::config::{Config, InputFormat};
use blstats_core::{AggregateReport, Aggregator};
use blstats_feeds::{FileSource, RowSource, StdinSource};

use crate::export::{write_stats, OutputTarget};

/// Where rows come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Stdin,
    File(PathBuf),
}

impl InputSource {
    /// `-` means stdin; anything else is a file path.
    pub fn from_path(path: &Path) -> Self {
        if path.as_os_str() == "-" {
            InputSource::Stdin
        } else {
            InputSource::File(path.to_path_buf())
        }
    }
}

/// Everything a run needs, after config and command-line flags are merged.
#[derive(Debug, Clone)]
pub struct Settings {
    pub input: InputSource,
    /// Format forced on the command line. When unset, files use their
    /// extension and fall back to `config.input.format` like stdin does.
    pub format: Option<InputFormat>,
    pub output: OutputTarget,
    pub config: Config,
}

impl Settings {
    /// Read stdin and write the configured output path.
    pub fn from_config(config: Config) -> Self {
        Self {
            input: InputSource::Stdin,
            format: None,
            output: OutputTarget::from_path(&config.output.path),
            config,
        }
    }

    fn open_source(&self) -> Box<dyn RowSource> {
        let fallback = self.config.input.format;
        match &self.input {
            InputSource::Stdin => Box::new(StdinSource::new(self.format.unwrap_or(fallback))),
            InputSource::File(path) => match self.format {
                Some(format) => Box::new(FileSource::new(path, format)),
                None => match FileSource::infer(path) {
                    Ok(source) => Box::new(source),
                    Err(_) => {
                        tracing::debug!(path = %path.display(), %fallback, "no known extension, using configured format");
                        Box::new(FileSource::new(path, fallback))
                    }
                },
            },
        }
    }
}

/// Run the whole pipeline and return the aggregation report.
pub fn run(settings: &Settings) -> anyhow::Result<AggregateReport> {
    settings.config.validate()?;
    let taxonomy = settings.config.load_taxonomy().context("failed to load browser taxonomy")?;

    let mut source = settings.open_source();
    let rows = source
        .read_rows()
        .with_context(|| format!("failed to read rows from {}", source.describe()))?;
    tracing::info!(source = %source.describe(), rows = rows.len(), "report read");

    let mut aggregator = Aggregator::new(&taxonomy, settings.config.output.precision);
    aggregator.extend(&rows);
    let report = aggregator.finish();

    if report.document.is_empty() {
        tracing::warn!(
            rows = rows.len(),
            skipped = report.skipped.total(),
            "no usage could be attributed; writing an empty stats document"
        );
    }

    write_stats(&report.document, &settings.output)?;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use blstats_core::BrowserId;

    fn settings_for(input: PathBuf, output: PathBuf) -> Settings {
        Settings {
            input: InputSource::File(input),
            format: None,
            output: OutputTarget::File(output),
            config: Config::defaults(),
        }
    }

    #[test]
    fn dash_is_stdin() {
        assert_eq!(InputSource::from_path(Path::new("-")), InputSource::Stdin);
        assert_eq!(
            InputSource::from_path(Path::new("report.csv")),
            InputSource::File(PathBuf::from("report.csv"))
        );
    }

    #[test]
    fn csv_file_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("report.csv");
        let output = dir.path().join("browserslist-stats.json");
        std::fs::write(&input, "Browser,Browser Version,Sessions\nChrome,85.0,75\nFirefox,78.0,25\n").unwrap();

        let report = run(&settings_for(input, output.clone())).unwrap();
        assert_eq!(report.retained_rows, 2);
        assert_eq!(report.document.share(BrowserId::Chrome, "85"), Some(75.0));
        assert_eq!(report.document.share(BrowserId::Firefox, "78"), Some(25.0));
        assert!(output.exists());
    }

    #[test]
    fn unknown_extension_uses_configured_format() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("report.txt");
        let output = dir.path().join("out.json");
        std::fs::write(&input, r#"[["Opera Mini", "(not set)", 4]]"#).unwrap();

        let report = run(&settings_for(input, output)).unwrap();
        assert_eq!(report.document.share(BrowserId::OpMini, "all"), Some(100.0));
    }

    #[test]
    fn missing_input_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = run(&settings_for(dir.path().join("nope.json"), dir.path().join("out.json"))).unwrap_err();
        assert!(format!("{err:#}").contains("nope.json"), "{err:#}");
    }
}
