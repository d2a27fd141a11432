//! Canonical browser identifiers.
//!
//! The identifier set is fixed by the caniuse agents dataset that
//! `browserslist` reads, so it is a closed enum rather than free text. Text
//! lookups go through a compile-time perfect hash map.

use phf::phf_map;
use serde::{Deserialize, Serialize};

/// A caniuse agent key, e.g. `chrome` or `ios_saf`.
///
/// Serializes to (and deserializes from) the exact key used in
/// `browserslist-stats.json`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrowserId {
    Ie,
    Edge,
    Firefox,
    Chrome,
    Safari,
    Opera,
    IosSaf,
    OpMini,
    Android,
    Bb,
    OpMob,
    AndChr,
    AndFf,
    IeMob,
    AndUc,
    Samsung,
    AndQq,
    Baidu,
    Kaios,
}

static BROWSER_IDS: phf::Map<&'static str, BrowserId> = phf_map! {
    "ie" => BrowserId::Ie,
    "edge" => BrowserId::Edge,
    "firefox" => BrowserId::Firefox,
    "chrome" => BrowserId::Chrome,
    "safari" => BrowserId::Safari,
    "opera" => BrowserId::Opera,
    "ios_saf" => BrowserId::IosSaf,
    "op_mini" => BrowserId::OpMini,
    "android" => BrowserId::Android,
    "bb" => BrowserId::Bb,
    "op_mob" => BrowserId::OpMob,
    "and_chr" => BrowserId::AndChr,
    "and_ff" => BrowserId::AndFf,
    "ie_mob" => BrowserId::IeMob,
    "and_uc" => BrowserId::AndUc,
    "samsung" => BrowserId::Samsung,
    "and_qq" => BrowserId::AndQq,
    "baidu" => BrowserId::Baidu,
    "kaios" => BrowserId::Kaios,
};

impl BrowserId {
    /// Every identifier, in caniuse agent order.
    pub const ALL: [BrowserId; 19] = [
        BrowserId::Ie,
        BrowserId::Edge,
        BrowserId::Firefox,
        BrowserId::Chrome,
        BrowserId::Safari,
        BrowserId::Opera,
        BrowserId::IosSaf,
        BrowserId::OpMini,
        BrowserId::Android,
        BrowserId::Bb,
        BrowserId::OpMob,
        BrowserId::AndChr,
        BrowserId::AndFf,
        BrowserId::IeMob,
        BrowserId::AndUc,
        BrowserId::Samsung,
        BrowserId::AndQq,
        BrowserId::Baidu,
        BrowserId::Kaios,
    ];

    /// Look up an identifier by its exact (lowercase) agent key.
    pub fn from_key(key: &str) -> Option<Self> {
        BROWSER_IDS.get(key).copied()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BrowserId::Ie => "ie",
            BrowserId::Edge => "edge",
            BrowserId::Firefox => "firefox",
            BrowserId::Chrome => "chrome",
            BrowserId::Safari => "safari",
            BrowserId::Opera => "opera",
            BrowserId::IosSaf => "ios_saf",
            BrowserId::OpMini => "op_mini",
            BrowserId::Android => "android",
            BrowserId::Bb => "bb",
            BrowserId::OpMob => "op_mob",
            BrowserId::AndChr => "and_chr",
            BrowserId::AndFf => "and_ff",
            BrowserId::IeMob => "ie_mob",
            BrowserId::AndUc => "and_uc",
            BrowserId::Samsung => "samsung",
            BrowserId::AndQq => "and_qq",
            BrowserId::Baidu => "baidu",
            BrowserId::Kaios => "kaios",
        }
    }
}

impl std::fmt::Display for BrowserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
