use std::path::PathBuf;

use anyhow::Context;
use blstats::export::OutputTarget;
use blstats::pipeline::{self, InputSource, Settings};
use blstats::InputFormat;
use blstats_core::config::{Config, MAX_PRECISION};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "blstats",
    version,
    about = "Convert browser analytics rows into a browserslist-stats.json usage file"
)]
struct Cli {
    /// Analytics report to read. `-` or omitted reads stdin.
    #[arg(short, long, value_name = "PATH")]
    input: Option<PathBuf>,

    /// Report format. Defaults to the file extension, then the configured format.
    #[arg(short, long, value_enum)]
    format: Option<FormatArg>,

    /// Where to write the stats file. `-` writes to stdout.
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Decimal places shares are rounded to.
    #[arg(short, long, value_name = "N", value_parser = clap::value_parser!(u32).range(0..=MAX_PRECISION as i64))]
    precision: Option<u32>,

    /// Browser taxonomy file replacing the built-in caniuse one.
    #[arg(long, value_name = "PATH")]
    taxonomy: Option<PathBuf>,

    /// Config file to use instead of ~/.config/blstats/config.toml.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Append logs to this file instead of stderr.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Log at debug level, including every skipped row.
    #[arg(long)]
    debug: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Json,
    Csv,
}

impl From<FormatArg> for InputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => InputFormat::Json,
            FormatArg::Csv => InputFormat::Csv,
        }
    }
}

fn init_logging(cli: &Cli) -> anyhow::Result<()> {
    let default_level = if cli.debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("RUST_LOG").unwrap_or_else(|_| EnvFilter::new(default_level));

    match &cli.log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_writer(std::sync::Mutex::new(file))
                .with_ansi(false)
                .with_env_filter(filter)
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_writer(std::io::stderr)
                .with_env_filter(filter)
                .init();
        }
    }
    Ok(())
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path).with_context(|| format!("failed to load config {}", path.display()))?,
        None => Config::load().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "could not load user config, using defaults");
            Config::defaults()
        }),
    };

    if let Some(path) = &cli.output {
        config.output.path = path.clone();
    }
    if let Some(precision) = cli.precision {
        config.output.precision = precision;
    }
    if let Some(path) = &cli.taxonomy {
        config.taxonomy.path = Some(path.clone());
    }
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let config = load_config(&cli)?;
    let mut settings = Settings::from_config(config);
    if let Some(path) = &cli.input {
        settings.input = InputSource::from_path(path);
    }
    settings.format = cli.format.map(InputFormat::from);

    pipeline::run(&settings)?;

    if let OutputTarget::File(path) = &settings.output {
        println!("Success! Stats saved to '{}'", path.display());
    }
    Ok(())
}
