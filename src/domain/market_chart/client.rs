//! Market chart sub-client.

use crate::client::QuoteClient;
use crate::domain::market_chart::wire::MarketChartResponse;
use crate::domain::market_chart::{self, MarketSeries};
use crate::error::QuoteError;

/// Sub-client for market chart series.
pub struct MarketCharts<'a> {
    pub(crate) client: &'a QuoteClient,
}

impl<'a> MarketCharts<'a> {
    /// Daily USD series over `days`, or `None` when unavailable or empty.
    pub async fn series(&self, asset: &str, days: u32) -> Option<MarketSeries> {
        match self.try_series(asset, days).await {
            Ok(series) => Some(series),
            Err(e) => {
                tracing::warn!(asset, days, kind = e.kind(), error = %e, "Market series unavailable");
                None
            }
        }
    }

    pub async fn try_series(&self, asset: &str, days: u32) -> Result<MarketSeries, QuoteError> {
        let asset_id = crate::domain::validated_asset(asset, days)?;
        let key = market_chart::market_chart_key(&asset_id, days);
        let resp: MarketChartResponse = self.client.fetch.fetch(&key).await?;
        MarketSeries::try_from(resp).map_err(|e| QuoteError::Validation(e.to_string()))
    }
}
