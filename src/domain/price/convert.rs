//! Conversion: SimplePriceEntry → PriceQuote (TryFrom + validation).

use super::wire::SimplePriceEntry;
use super::{PriceQuote, ValidationError};
use crate::shared::AssetId;

impl TryFrom<(AssetId, SimplePriceEntry)> for PriceQuote {
    type Error = ValidationError;

    fn try_from((asset_id, entry): (AssetId, SimplePriceEntry)) -> Result<Self, Self::Error> {
        let usd = entry
            .usd
            .ok_or_else(|| ValidationError::MissingCurrency(asset_id.clone(), "usd"))?;
        let brl = entry
            .brl
            .ok_or_else(|| ValidationError::MissingCurrency(asset_id.clone(), "brl"))?;

        Ok(Self {
            asset_id,
            usd,
            brl,
            usd_24h_change: entry.usd_24h_change,
            usd_market_cap: entry.usd_market_cap,
            usd_24h_volume: entry.usd_24h_vol,
        })
    }
}
