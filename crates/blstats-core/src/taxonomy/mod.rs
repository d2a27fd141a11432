//! Browser taxonomy: the reference data every row is classified against.
//!
//! Taxonomies are defined as TOML files. The default one mirrors the caniuse
//! agents dataset that `browserslist` reads and is embedded in the binary via
//! [`include_str!`], so the tool works without any files on disk. Call
//! [`Taxonomy::builtin`] to get the shared, process-wide instance, or
//! [`Taxonomy::from_path`] to load a replacement.
//!
//! # Validation
//!
//! A taxonomy is checked in full when it is loaded: unknown identifiers,
//! aliases claimed by two browsers, malformed tokens and overlapping or
//! out-of-order buckets are all reported as [`TaxonomyError`]. Once a
//! [`Taxonomy`] exists, every version at or above a browser's first bucket
//! maps to exactly one token.

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::OnceLock;

use config::{Config, File, FileFormat};
use serde::Deserialize;

use crate::{BrowserId, TaxonomyError, Version};

const BUILTIN_TAXONOMY_SRC: &str = include_str!("caniuse.toml");

// ---------------------------------------------------------------------------
// Raw (serde) types mirroring the TOML structure
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawTaxonomy {
    #[serde(default)]
    browser: Vec<RawBrowser>,
}

#[derive(Debug, Deserialize)]
struct RawBrowser {
    id: String,
    #[serde(default)]
    aliases: Vec<String>,
    scheme: String,
    #[serde(default)]
    tokens: Vec<String>,
    #[serde(default)]
    named: Vec<String>,
    gap: Option<String>,
}

// ---------------------------------------------------------------------------
// Public taxonomy types
// ---------------------------------------------------------------------------

/// Where versions that fall between two buckets go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GapPolicy {
    /// The older bucket keeps the gap (nearest token at or below).
    #[default]
    Older,
    /// The gap is handed to the next bucket up.
    Newer,
}

/// One version bucket: a token plus the version span it declares.
///
/// For `"14.0-14.4"` the span is `14.0..=14.4`; for `"8"` it is `8..=8`.
#[derive(Debug, Clone)]
pub struct Bucket {
    pub token: String,
    pub start: Version,
    pub end: Version,
}

impl Bucket {
    fn parse(browser: BrowserId, token: &str) -> Result<Self, TaxonomyError> {
        let invalid = || TaxonomyError::InvalidToken {
            browser,
            token: token.to_string(),
        };
        let (start, end) = match token.split_once('-') {
            Some((lo, hi)) => (
                Version::parse(lo).ok_or_else(invalid)?,
                Version::parse(hi).ok_or_else(invalid)?,
            ),
            None => {
                let v = Version::parse(token).ok_or_else(invalid)?;
                (v.clone(), v)
            }
        };
        if end < start {
            return Err(TaxonomyError::InvertedRange {
                browser,
                token: token.to_string(),
            });
        }
        Ok(Self {
            token: token.to_string(),
            start,
            end,
        })
    }

    fn is_range(&self) -> bool {
        self.token.contains('-')
    }

    /// True when `version` lies past this bucket's declared end, compared at
    /// the end's precision (`14.4.1` is still inside `14.0-14.4`).
    pub fn ends_before(&self, version: &Version) -> bool {
        version.truncated(self.end.precision()) > self.end
    }
}

/// How a browser's raw versions map onto its tokens.
#[derive(Debug, Clone)]
pub enum VersionScheme {
    /// A short list of tracked versions; a raw version takes the nearest
    /// tracked one at or below it.
    Exact { buckets: Vec<Bucket>, named: Vec<String> },
    /// Contiguous buckets, each a single version or a `lo-hi` range.
    Ranges {
        buckets: Vec<Bucket>,
        named: Vec<String>,
        gap: GapPolicy,
    },
    /// No version granularity; every row lands in one token (e.g. `"all"`).
    Single { token: String },
}

impl VersionScheme {
    /// All tokens this scheme can produce, oldest first, named tokens last.
    pub fn tokens(&self) -> Vec<&str> {
        match self {
            VersionScheme::Exact { buckets, named } | VersionScheme::Ranges { buckets, named, .. } => buckets
                .iter()
                .map(|b| b.token.as_str())
                .chain(named.iter().map(String::as_str))
                .collect(),
            VersionScheme::Single { token } => vec![token.as_str()],
        }
    }

    fn build(browser: BrowserId, raw: &RawBrowser) -> Result<Self, TaxonomyError> {
        match raw.scheme.trim().to_ascii_lowercase().as_str() {
            "single" => {
                let mut tokens = raw.tokens.iter();
                let token = tokens.next().ok_or(TaxonomyError::EmptyScheme(browser))?;
                if let Some(extra) = tokens.next() {
                    return Err(TaxonomyError::InvalidToken {
                        browser,
                        token: extra.clone(),
                    });
                }
                if token.trim().is_empty() {
                    return Err(TaxonomyError::InvalidToken {
                        browser,
                        token: token.clone(),
                    });
                }
                Ok(VersionScheme::Single {
                    token: token.clone(),
                })
            }
            "exact" => {
                let buckets = build_buckets(browser, &raw.tokens)?;
                if let Some(range) = buckets.iter().find(|b| b.is_range()) {
                    return Err(TaxonomyError::RangeInExactList {
                        browser,
                        token: range.token.clone(),
                    });
                }
                let named = build_named(browser, &raw.named, &buckets)?;
                Ok(VersionScheme::Exact { buckets, named })
            }
            "ranges" => {
                let buckets = build_buckets(browser, &raw.tokens)?;
                let named = build_named(browser, &raw.named, &buckets)?;
                let gap = match raw.gap.as_deref().map(|g| g.trim().to_ascii_lowercase()) {
                    None => GapPolicy::Older,
                    Some(g) if g == "older" => GapPolicy::Older,
                    Some(g) if g == "newer" => GapPolicy::Newer,
                    Some(_) => {
                        return Err(TaxonomyError::UnknownGapPolicy {
                            browser,
                            value: raw.gap.clone().unwrap_or_default(),
                        })
                    }
                };
                Ok(VersionScheme::Ranges {
                    buckets,
                    named,
                    gap,
                })
            }
            _ => Err(TaxonomyError::UnknownScheme {
                browser,
                kind: raw.scheme.clone(),
            }),
        }
    }
}

fn build_buckets(browser: BrowserId, tokens: &[String]) -> Result<Vec<Bucket>, TaxonomyError> {
    if tokens.is_empty() {
        return Err(TaxonomyError::EmptyScheme(browser));
    }
    let buckets = tokens
        .iter()
        .map(|t| Bucket::parse(browser, t.trim()))
        .collect::<Result<Vec<_>, _>>()?;

    for pair in buckets.windows(2) {
        let (lower, upper) = (&pair[0], &pair[1]);
        if lower.end >= upper.start {
            return Err(TaxonomyError::Overlap {
                browser,
                lower: lower.token.clone(),
                upper: upper.token.clone(),
            });
        }
    }
    Ok(buckets)
}

fn build_named(
    browser: BrowserId,
    named: &[String],
    buckets: &[Bucket],
) -> Result<Vec<String>, TaxonomyError> {
    let mut seen: HashSet<String> = HashSet::new();
    for token in named {
        let trimmed = token.trim();
        if trimmed.is_empty() || Version::parse(trimmed).is_some() || trimmed.contains('-') {
            return Err(TaxonomyError::InvalidToken {
                browser,
                token: token.clone(),
            });
        }
        let clashes_with_bucket = buckets.iter().any(|b| b.token.eq_ignore_ascii_case(trimmed));
        if clashes_with_bucket || !seen.insert(trimmed.to_ascii_lowercase()) {
            return Err(TaxonomyError::DuplicateToken {
                browser,
                token: token.clone(),
            });
        }
    }
    Ok(named.iter().map(|t| t.trim().to_string()).collect())
}

/// A browser identifier with its vendor aliases and version scheme.
#[derive(Debug, Clone)]
pub struct BrowserEntry {
    pub id: BrowserId,
    pub aliases: Vec<String>,
    pub scheme: VersionScheme,
}

/// Validated, immutable browser taxonomy.
///
/// Load once and share by reference; nothing on a `Taxonomy` mutates.
#[derive(Debug, Clone)]
pub struct Taxonomy {
    browsers: Vec<BrowserEntry>,
    by_id: HashMap<BrowserId, usize>,
    /// Lowercased alias (and identifier) → browser.
    aliases: HashMap<String, BrowserId>,
}

impl Taxonomy {
    /// The embedded caniuse taxonomy, parsed and validated on first use.
    ///
    /// # Panics
    ///
    /// Panics if the embedded data fails validation, which is a build defect.
    pub fn builtin() -> &'static Taxonomy {
        static BUILTIN: OnceLock<Taxonomy> = OnceLock::new();
        BUILTIN.get_or_init(|| {
            Taxonomy::from_toml_str(BUILTIN_TAXONOMY_SRC)
                .expect("built-in caniuse taxonomy must be valid")
        })
    }

    /// Parse and validate a taxonomy from TOML source.
    pub fn from_toml_str(src: &str) -> Result<Self, TaxonomyError> {
        let raw: RawTaxonomy = Config::builder()
            .add_source(File::from_str(src, FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        Self::from_raw(raw)
    }

    /// Load and validate a taxonomy file. The format is taken from the file
    /// extension (TOML, YAML or JSON).
    pub fn from_path(path: &Path) -> Result<Self, TaxonomyError> {
        let raw: RawTaxonomy = Config::builder()
            .add_source(File::from(path).required(true))
            .build()?
            .try_deserialize()?;
        let taxonomy = Self::from_raw(raw)?;
        tracing::info!(path = %path.display(), browsers = taxonomy.len(), "loaded taxonomy");
        Ok(taxonomy)
    }

    fn from_raw(raw: RawTaxonomy) -> Result<Self, TaxonomyError> {
        let mut browsers = Vec::with_capacity(raw.browser.len());
        let mut by_id = HashMap::new();
        let mut aliases: HashMap<String, BrowserId> = HashMap::new();

        for raw_browser in &raw.browser {
            let id = BrowserId::from_key(raw_browser.id.trim())
                .ok_or_else(|| TaxonomyError::UnknownBrowser(raw_browser.id.clone()))?;
            if by_id.insert(id, browsers.len()).is_some() {
                return Err(TaxonomyError::DuplicateBrowser(id));
            }

            let names = std::iter::once(id.as_str()).chain(raw_browser.aliases.iter().map(String::as_str));
            for name in names {
                let key = alias_key(name);
                if key.is_empty() {
                    continue;
                }
                match aliases.get(&key) {
                    Some(&first) if first != id => {
                        return Err(TaxonomyError::DuplicateAlias {
                            alias: name.to_string(),
                            first,
                            second: id,
                        })
                    }
                    Some(_) => {}
                    None => {
                        aliases.insert(key, id);
                    }
                }
            }

            browsers.push(BrowserEntry {
                id,
                aliases: raw_browser.aliases.clone(),
                scheme: VersionScheme::build(id, raw_browser)?,
            });
        }

        tracing::debug!(browsers = browsers.len(), aliases = aliases.len(), "taxonomy validated");
        Ok(Self {
            browsers,
            by_id,
            aliases,
        })
    }

    /// Browsers in definition order.
    pub fn browsers(&self) -> impl Iterator<Item = &BrowserEntry> {
        self.browsers.iter()
    }

    pub fn get(&self, id: BrowserId) -> Option<&BrowserEntry> {
        self.by_id.get(&id).map(|&i| &self.browsers[i])
    }

    pub fn scheme(&self, id: BrowserId) -> Option<&VersionScheme> {
        self.get(id).map(|entry| &entry.scheme)
    }

    /// Case-insensitive alias lookup; identifiers are their own aliases.
    pub fn lookup_alias(&self, name: &str) -> Option<BrowserId> {
        self.aliases.get(&alias_key(name)).copied()
    }

    pub fn len(&self) -> usize {
        self.browsers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.browsers.is_empty()
    }
}

fn alias_key(name: &str) -> String {
    name.trim().to_lowercase()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
