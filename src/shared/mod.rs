//! Shared newtypes used across all domain modules.
//!
//! These types are serialization-transparent: they serialize/deserialize identically
//! to the raw format the API uses, so they can be used directly in wire types
//! without conversion overhead.

pub mod serde_util;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::str::FromStr;

// ─── AssetId ─────────────────────────────────────────────────────────────────

/// CoinGecko asset identifier (e.g. `"bitcoin"`), normalized to trimmed lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AssetId(String);

impl AssetId {
    pub fn new(s: impl AsRef<str>) -> Self {
        Self(s.as_ref().trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for AssetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for AssetId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for AssetId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl FromStr for AssetId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(AssetId::new(s))
    }
}

impl Serialize for AssetId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for AssetId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(AssetId::new(s))
    }
}

// ─── RequestKey ──────────────────────────────────────────────────────────────

/// Identity of one logical API call: endpoint path plus resolved query parameters.
///
/// Parameters live in a `BTreeMap`, so two keys built from the same inputs in
/// any order compare, hash and render identically. This is the only criterion
/// the response cache uses for a hit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestKey {
    path: String,
    params: BTreeMap<String, String>,
}

impl RequestKey {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            params: BTreeMap::new(),
        }
    }

    /// Add (or replace) a single-valued parameter.
    pub fn param(mut self, name: &str, value: impl ToString) -> Self {
        self.params.insert(name.to_string(), value.to_string());
        self
    }

    /// Add a multi-valued parameter. Values are sorted and deduplicated before
    /// being comma-joined so `["usd", "brl"]` and `["brl", "usd"]` agree.
    pub fn list_param<I, S>(mut self, name: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut items: Vec<String> = values
            .into_iter()
            .map(|v| v.as_ref().to_string())
            .collect();
        items.sort();
        items.dedup();
        self.params.insert(name.to_string(), items.join(","));
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    pub fn params(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Percent-encoded query string, parameters in key order.
    pub fn query_string(&self) -> String {
        self.params
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Absolute URL for this key against `base_url`.
    pub fn url(&self, base_url: &str) -> String {
        let base = base_url.trim_end_matches('/');
        if self.params.is_empty() {
            format!("{}{}", base, self.path)
        } else {
            format!("{}{}?{}", base, self.path, self.query_string())
        }
    }
}

impl std::fmt::Display for RequestKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.params.is_empty() {
            write!(f, "{}", self.path)
        } else {
            write!(f, "{}?{}", self.path, self.query_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    fn hash_of(key: &RequestKey) -> u64 {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_asset_id_normalizes() {
        assert_eq!(AssetId::new("  Bitcoin "), AssetId::from("bitcoin"));
        assert!(AssetId::new("   ").is_empty());
    }

    #[test]
    fn test_request_key_param_order_is_irrelevant() {
        let a = RequestKey::new("/simple/price")
            .param("ids", "bitcoin")
            .list_param("vs_currencies", ["usd", "brl"])
            .param("include_24hr_change", true);
        let b = RequestKey::new("/simple/price")
            .param("include_24hr_change", true)
            .list_param("vs_currencies", ["brl", "usd"])
            .param("ids", "bitcoin");
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
        assert_eq!(a.to_string(), b.to_string());
    }

    #[test]
    fn test_request_key_distinguishes_params() {
        let a = RequestKey::new("/coins/bitcoin/ohlc").param("days", 30);
        let b = RequestKey::new("/coins/bitcoin/ohlc").param("days", 7);
        assert_ne!(a, b);
    }

    #[test]
    fn test_list_param_dedups() {
        let key = RequestKey::new("/simple/price").list_param("ids", ["eth", "btc", "eth"]);
        assert_eq!(key.get("ids"), Some("btc,eth"));
    }

    #[test]
    fn test_url_encodes_query() {
        let key = RequestKey::new("/simple/price")
            .list_param("ids", ["bitcoin", "ethereum"])
            .param("vs_currencies", "usd");
        assert_eq!(
            key.url("https://api.example.com/v3/"),
            "https://api.example.com/v3/simple/price?ids=bitcoin%2Cethereum&vs_currencies=usd"
        );
    }

    #[test]
    fn test_url_without_params() {
        let key = RequestKey::new("/ping");
        assert_eq!(key.url("https://api.example.com"), "https://api.example.com/ping");
    }
}
