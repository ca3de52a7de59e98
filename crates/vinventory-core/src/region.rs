//! Static registry of inventory keys and their default query fields.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};

/// Per-inventory defaults. `country` is kept apart from the query fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionDefaults {
    pub country: String,
    pub market: String,
    pub language: String,
    pub super_region: String,
}

impl RegionDefaults {
    pub fn new(
        country: impl Into<String>,
        market: impl Into<String>,
        language: impl Into<String>,
        super_region: impl Into<String>,
    ) -> Self {
        Self {
            country: country.into(),
            market: market.into(),
            language: language.into(),
            super_region: super_region.into(),
        }
    }

    /// Default query fields sent to the API (everything except `country`).
    pub fn query_fields(&self) -> Map<String, Value> {
        let mut fields = Map::new();
        fields.insert(String::from("market"), Value::String(self.market.clone()));
        fields.insert(String::from("language"), Value::String(self.language.clone()));
        fields.insert(
            String::from("super_region"),
            Value::String(self.super_region.clone()),
        );
        fields
    }
}

const NORTH_AMERICA: &str = "north america";
const EUROPE: &str = "europe";
const ASIA_PACIFIC: &str = "asia pacific";
const MIDDLE_EAST: &str = "middle east";

// (key, country, market, language, super_region)
const BUILTIN_REGIONS: &[(&str, &str, &str, &str, &str)] = &[
    ("us", "US", "US", "en", NORTH_AMERICA),
    ("ca", "CA", "CA", "en", NORTH_AMERICA),
    ("mx", "MX", "MX", "es", NORTH_AMERICA),
    ("pr", "PR", "PR", "en", NORTH_AMERICA),
    ("at", "AT", "AT", "de", EUROPE),
    ("be", "BE", "BE", "nl", EUROPE),
    ("ch", "CH", "CH", "de", EUROPE),
    ("cz", "CZ", "CZ", "cs", EUROPE),
    ("de", "DE", "DE", "de", EUROPE),
    ("dk", "DK", "DK", "da", EUROPE),
    ("es", "ES", "ES", "es", EUROPE),
    ("fi", "FI", "FI", "fi", EUROPE),
    ("fr", "FR", "FR", "fr", EUROPE),
    ("gb", "GB", "GB", "en", EUROPE),
    ("gr", "GR", "GR", "el", EUROPE),
    ("hr", "HR", "HR", "hr", EUROPE),
    ("hu", "HU", "HU", "hu", EUROPE),
    ("ie", "IE", "IE", "en", EUROPE),
    ("is", "IS", "IS", "is", EUROPE),
    ("it", "IT", "IT", "it", EUROPE),
    ("lu", "LU", "LU", "fr", EUROPE),
    ("nl", "NL", "NL", "nl", EUROPE),
    ("no", "NO", "NO", "no", EUROPE),
    ("pl", "PL", "PL", "pl", EUROPE),
    ("pt", "PT", "PT", "pt", EUROPE),
    ("ro", "RO", "RO", "ro", EUROPE),
    ("se", "SE", "SE", "sv", EUROPE),
    ("si", "SI", "SI", "sl", EUROPE),
    ("au", "AU", "AU", "en", ASIA_PACIFIC),
    ("cn", "CN", "CN", "zh", ASIA_PACIFIC),
    ("hk", "HK", "HK", "zh", ASIA_PACIFIC),
    ("jp", "JP", "JP", "ja", ASIA_PACIFIC),
    ("kr", "KR", "KR", "ko", ASIA_PACIFIC),
    ("mo", "MO", "MO", "zh", ASIA_PACIFIC),
    ("my", "MY", "MY", "en", ASIA_PACIFIC),
    ("nz", "NZ", "NZ", "en", ASIA_PACIFIC),
    ("sg", "SG", "SG", "en", ASIA_PACIFIC),
    ("th", "TH", "TH", "th", ASIA_PACIFIC),
    ("tw", "TW", "TW", "zh", ASIA_PACIFIC),
    ("ae", "AE", "AE", "en", MIDDLE_EAST),
    ("il", "IL", "IL", "he", MIDDLE_EAST),
    ("jo", "JO", "JO", "ar", MIDDLE_EAST),
    ("sa", "SA", "SA", "ar", MIDDLE_EAST),
    ("tr", "TR", "TR", "tr", MIDDLE_EAST),
];

/// Read-only mapping from inventory key to [`RegionDefaults`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionRegistry {
    regions: BTreeMap<String, RegionDefaults>,
}

impl Default for RegionRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl RegionRegistry {
    /// Every market the vendor's inventory search is known to serve.
    pub fn builtin() -> Self {
        Self::from_entries(BUILTIN_REGIONS.iter().map(
            |&(key, country, market, language, super_region)| {
                (key, RegionDefaults::new(country, market, language, super_region))
            },
        ))
    }

    /// Builds a registry from custom entries. Later duplicates replace earlier ones.
    pub fn from_entries<K: AsRef<str>>(
        entries: impl IntoIterator<Item = (K, RegionDefaults)>,
    ) -> Self {
        let regions = entries
            .into_iter()
            .map(|(key, defaults)| (normalize_key(key.as_ref()), defaults))
            .collect();
        Self { regions }
    }

    /// Case-insensitive lookup; absence is the caller's configuration error.
    pub fn lookup(&self, key: &str) -> Option<&RegionDefaults> {
        self.regions.get(&normalize_key(key))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.lookup(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.regions.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RegionDefaults)> {
        self.regions
            .iter()
            .map(|(key, defaults)| (key.as_str(), defaults))
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

pub(crate) fn normalize_key(key: &str) -> String {
    key.trim().to_ascii_lowercase()
}
