//! OHLC sub-client.

use crate::client::QuoteClient;
use crate::domain::ohlc::wire::OhlcResponse;
use crate::domain::ohlc::{self, Candle};
use crate::error::QuoteError;

/// Sub-client for OHLC candles.
pub struct Ohlc<'a> {
    pub(crate) client: &'a QuoteClient,
}

impl<'a> Ohlc<'a> {
    /// USD candles over `days`, or `None` when the fetch failed.
    pub async fn candles(&self, asset: &str, days: u32) -> Option<Vec<Candle>> {
        match self.try_candles(asset, days).await {
            Ok(candles) => Some(candles),
            Err(e) => {
                tracing::warn!(asset, days, kind = e.kind(), error = %e, "OHLC series unavailable");
                None
            }
        }
    }

    pub async fn try_candles(&self, asset: &str, days: u32) -> Result<Vec<Candle>, QuoteError> {
        let asset_id = crate::domain::validated_asset(asset, days)?;
        let key = ohlc::ohlc_key(&asset_id, days);
        let rows: OhlcResponse = self.client.fetch.fetch(&key).await?;
        Ok(rows.into_iter().map(Candle::from).collect())
    }
}
