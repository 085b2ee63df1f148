//! Wire types for `/coins/{id}/market_chart`.

use crate::shared::serde_util::lenient_points;
use serde::{Deserialize, Serialize};

/// Raw `[timestamp_ms, value]` pairs per series.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketChartResponse {
    #[serde(default)]
    pub prices: Vec<[f64; 2]>,
    #[serde(default)]
    pub market_caps: Vec<[f64; 2]>,
    #[serde(default, deserialize_with = "lenient_points::deserialize")]
    pub total_volumes: Vec<[f64; 2]>,
}
