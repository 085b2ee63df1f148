//! OHLC domain: candles over an N-day window.

pub mod client;
pub mod wire;

use crate::shared::{AssetId, RequestKey};
use serde::{Deserialize, Serialize};

/// One OHLC candle in USD.
///
/// Values are passed through as received; `high >= low` and similar
/// invariants are not checked here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// Unix timestamp in milliseconds.
    pub time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl From<[f64; 5]> for Candle {
    fn from([time, open, high, low, close]: [f64; 5]) -> Self {
        Self {
            time: time as i64,
            open,
            high,
            low,
            close,
        }
    }
}

/// `/coins/{id}/ohlc` key: USD candles over `days`.
pub fn ohlc_key(asset_id: &AssetId, days: u32) -> RequestKey {
    RequestKey::new(format!("/coins/{}/ohlc", urlencoding::encode(asset_id.as_str())))
        .param("vs_currency", "usd")
        .param("days", days)
}
