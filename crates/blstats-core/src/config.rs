//! Configuration types for blstats.
//!
//! [`Config::load`] reads `~/.config/blstats/config.toml`, creating it with
//! hardcoded defaults if it does not yet exist. [`Config::load_from`] reads an
//! explicit file instead. [`Config::defaults`] returns the same defaults
//! without touching the filesystem (useful in tests).

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::{Taxonomy, TaxonomyError, DEFAULT_PRECISION};

/// Largest supported number of decimal places for shares.
pub const MAX_PRECISION: u32 = 12;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[output]
path      = "browserslist-stats.json"
precision = 2

[input]
format = "json"

[taxonomy]
# path = "/path/to/taxonomy.toml"
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration, loaded from `~/.config/blstats/config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub taxonomy: TaxonomyConfig,
}

/// `[output]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_path")]
    pub path: PathBuf,
    #[serde(default = "default_precision")]
    pub precision: u32,
}

fn default_output_path() -> PathBuf { PathBuf::from("browserslist-stats.json") }
fn default_precision() -> u32 { DEFAULT_PRECISION }

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
            precision: default_precision(),
        }
    }
}

/// Analytics report formats the feeds understand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    #[default]
    Json,
    Csv,
}

impl std::fmt::Display for InputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputFormat::Json => write!(f, "json"),
            InputFormat::Csv => write!(f, "csv"),
        }
    }
}

/// `[input]` section of `config.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InputConfig {
    /// Format used for stdin and for files without a recognised extension.
    #[serde(default)]
    pub format: InputFormat,
}

/// `[taxonomy]` section of `config.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaxonomyConfig {
    /// Replacement taxonomy file; the built-in caniuse taxonomy when unset.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/blstats/config.toml`, layered on top of the
    /// built-in defaults. Creates the file with defaults if it does not exist.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, DEFAULT_CONFIG.trim_start())?;
        }

        Self::layered(&path, false)
    }

    /// Load an explicit config file, layered on top of the built-in defaults.
    /// The file must exist.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        Self::layered(path, true)
    }

    fn layered(path: &Path, required: bool) -> anyhow::Result<Self> {
        let config: Self = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path).required(required))
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.output.precision <= MAX_PRECISION,
            "output.precision must be at most {MAX_PRECISION}, got {}",
            self.output.precision
        );
        Ok(())
    }

    /// The taxonomy this configuration selects: the configured file, or the
    /// shared built-in one.
    pub fn load_taxonomy(&self) -> Result<Cow<'static, Taxonomy>, TaxonomyError> {
        match &self.taxonomy.path {
            Some(path) => Taxonomy::from_path(path).map(Cow::Owned),
            None => Ok(Cow::Borrowed(Taxonomy::builtin())),
        }
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("blstats")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_load() {
        let cfg = Config::defaults();
        assert_eq!(cfg.output.path, PathBuf::from("browserslist-stats.json"));
        assert_eq!(cfg.output.precision, 2);
        assert_eq!(cfg.input.format, InputFormat::Json);
        assert!(cfg.taxonomy.path.is_none());
    }

    #[test]
    fn file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[output]\nprecision = 4\n\n[input]\nformat = \"csv\"\n").unwrap();

        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.output.precision, 4);
        assert_eq!(cfg.output.path, PathBuf::from("browserslist-stats.json"));
        assert_eq!(cfg.input.format, InputFormat::Csv);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::load_from(&dir.path().join("nope.toml")).is_err());
    }

    #[test]
    fn excessive_precision_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[output]\nprecision = 40\n").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn builtin_taxonomy_is_borrowed() {
        let cfg = Config::defaults();
        assert!(matches!(cfg.load_taxonomy().unwrap(), Cow::Borrowed(_)));
    }

    #[test]
    fn configured_taxonomy_is_loaded_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("taxonomy.toml");
        std::fs::write(
            &path,
            "[[browser]]\nid = \"chrome\"\naliases = [\"Chrome\"]\nscheme = \"ranges\"\ntokens = [\"70-79\", \"80-89\"]\n",
        )
        .unwrap();

        let mut cfg = Config::defaults();
        cfg.taxonomy.path = Some(path);
        let taxonomy = cfg.load_taxonomy().unwrap();
        assert_eq!(taxonomy.len(), 1);
    }
}
