//! Price domain: current quotes in USD and BRL.

pub mod client;
pub mod convert;
pub mod wire;

use crate::shared::{AssetId, RequestKey};
use serde::{Deserialize, Serialize};

/// Currencies every quote is requested in.
pub const QUOTE_CURRENCIES: [&str; 2] = ["usd", "brl"];

/// Immutable snapshot of one asset at fetch time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    pub asset_id: AssetId,
    pub usd: f64,
    pub brl: f64,
    /// 24h change of the USD price, in percent.
    pub usd_24h_change: Option<f64>,
    pub usd_market_cap: Option<f64>,
    pub usd_24h_volume: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0}: missing {1} price")]
    MissingCurrency(AssetId, &'static str),
}

/// `/simple/price` key for one or more assets.
pub fn simple_price_key<'a, I>(ids: I) -> RequestKey
where
    I: IntoIterator<Item = &'a AssetId>,
{
    RequestKey::new("/simple/price")
        .list_param("ids", ids.into_iter().map(AssetId::as_str))
        .list_param("vs_currencies", QUOTE_CURRENCIES)
        .param("include_24hr_change", true)
        .param("include_market_cap", true)
        .param("include_24hr_vol", true)
}
