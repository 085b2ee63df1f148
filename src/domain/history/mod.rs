//! Search history domain: the durable log of past price lookups.

pub mod client;
pub mod store;

use crate::shared::AssetId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use store::HistoryStore;

/// One recorded lookup. Ids and timestamps are assigned by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub id: i64,
    pub asset_id: AssetId,
    pub observed_at: DateTime<Utc>,
    pub price_usd: Option<f64>,
    pub price_brl: Option<f64>,
    pub change_24h: Option<f64>,
}
