//! Wire types for `/simple/price`.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Response body: asset id → requested fields. Unknown ids are simply absent.
pub type SimplePriceResponse = HashMap<String, SimplePriceEntry>;

/// Fields returned for one asset. Every field is optional upstream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimplePriceEntry {
    #[serde(default)]
    pub usd: Option<f64>,
    #[serde(default)]
    pub brl: Option<f64>,
    #[serde(default)]
    pub usd_24h_change: Option<f64>,
    #[serde(default)]
    pub usd_market_cap: Option<f64>,
    #[serde(default)]
    pub usd_24h_vol: Option<f64>,
}
