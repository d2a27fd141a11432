//! Dotted numeric versions as reported by analytics vendors (`85.0.4183.121`).

use std::cmp::Ordering;
use std::fmt;

/// A parsed dotted version.
///
/// Comparison pads the shorter version with zeros, so `85`, `85.0` and
/// `85.0.0` are all equal.
#[derive(Debug, Clone)]
pub struct Version {
    parts: Vec<u32>,
}

impl Version {
    /// Parse a dotted version. Every component must be a non-empty run of
    /// ASCII digits; anything else (`""`, `"(not set)"`, `"12.x"`) is rejected.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        let parts = raw
            .split('.')
            .map(|part| {
                if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                    return None;
                }
                part.parse::<u32>().ok()
            })
            .collect::<Option<Vec<_>>>()?;
        Some(Self { parts })
    }

    /// Number of components as written.
    pub fn precision(&self) -> usize {
        self.parts.len()
    }

    /// Keep only the first `n` components (`14.4.1` → `14.4` for `n = 2`).
    pub fn truncated(&self, n: usize) -> Self {
        Self {
            parts: self.parts.iter().copied().take(n.max(1)).collect(),
        }
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.parts.len().max(other.parts.len());
        for i in 0..len {
            let a = self.parts.get(i).copied().unwrap_or(0);
            let b = other.parts.get(i).copied().unwrap_or(0);
            match a.cmp(&b) {
                Ordering::Equal => continue,
                unequal => return unequal,
            }
        }
        Ordering::Equal
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for part in &self.parts {
            if !first {
                f.write_str(".")?;
            }
            write!(f, "{part}")?;
            first = false;
        }
        Ok(())
    }
}
