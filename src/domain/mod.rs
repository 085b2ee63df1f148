//! Domain modules organized as vertical slices.
//!
//! Each sub-module contains:
//! - `mod.rs`: Domain types and request-key builders
//! - `wire.rs`: Raw serde structs matching CoinGecko responses
//! - `convert.rs`: `TryFrom`/`From` conversions with validation
//! - `client.rs`: Sub-client built on the shared fetch client
//!
//! `history` has a `store.rs` (SQLite) in place of wire types.

pub mod history;
pub mod market_chart;
pub mod ohlc;
pub mod price;

use crate::error::QuoteError;
use crate::shared::AssetId;

/// Normalize `asset` and reject empty ids or a zero-day window.
pub(crate) fn validated_asset(asset: &str, days: u32) -> Result<AssetId, QuoteError> {
    let asset_id = AssetId::new(asset);
    if asset_id.is_empty() {
        return Err(QuoteError::Validation("asset id is empty".to_string()));
    }
    if days == 0 {
        return Err(QuoteError::Validation("days must be at least 1".to_string()));
    }
    Ok(asset_id)
}
