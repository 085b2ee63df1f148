//! Market chart domain: N-day price, market cap and volume series.

pub mod client;
pub mod convert;
pub mod wire;

use crate::shared::{AssetId, RequestKey};
use serde::{Deserialize, Serialize};

/// A single `(timestamp, value)` point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    /// Unix timestamp in milliseconds.
    pub time: i64,
    pub value: f64,
}

/// Index-aligned price, market cap and volume series in USD.
///
/// `volumes` may be shorter than `prices`, or empty, when upstream sends a
/// truncated or malformed volume series.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketSeries {
    pub prices: Vec<SeriesPoint>,
    pub market_caps: Vec<SeriesPoint>,
    pub volumes: Vec<SeriesPoint>,
}

impl MarketSeries {
    pub fn has_volumes(&self) -> bool {
        !self.volumes.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("market chart has no price points")]
    EmptyPrices,
}

/// `/coins/{id}/market_chart` key: daily USD series over `days`.
pub fn market_chart_key(asset_id: &AssetId, days: u32) -> RequestKey {
    RequestKey::new(format!(
        "/coins/{}/market_chart",
        urlencoding::encode(asset_id.as_str())
    ))
    .param("vs_currency", "usd")
    .param("days", days)
    .param("interval", "daily")
}
