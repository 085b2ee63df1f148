//! Prices sub-client: current quotes, recorded to the search history.

use crate::client::QuoteClient;
use crate::domain::price::wire::SimplePriceResponse;
use crate::domain::price::{self, PriceQuote};
use crate::error::{FetchError, QuoteError};
use crate::http::Fetched;
use crate::shared::AssetId;

use chrono::Utc;

/// Sub-client for current price operations.
pub struct Prices<'a> {
    pub(crate) client: &'a QuoteClient,
}

impl<'a> Prices<'a> {
    /// Current quote for one asset, or `None` when it is unavailable.
    ///
    /// A successful lookup appends one row to the search history. Failures
    /// are logged by kind and collapsed to `None`.
    pub async fn current(&self, asset: &str) -> Option<PriceQuote> {
        match self.try_current(asset).await {
            Ok(quote) => Some(quote),
            Err(e) => {
                tracing::warn!(asset, kind = e.kind(), error = %e, "Price lookup unavailable");
                None
            }
        }
    }

    /// Like [`Prices::current`], keeping the failure reason.
    pub async fn try_current(&self, asset: &str) -> Result<PriceQuote, QuoteError> {
        let asset_id = AssetId::new(asset);
        if asset_id.is_empty() {
            return Err(QuoteError::Validation("asset id is empty".to_string()));
        }

        let key = price::simple_price_key([&asset_id]);
        let mut resp: SimplePriceResponse = self.client.fetch.fetch(&key).await?;

        let entry = resp
            .remove(asset_id.as_str())
            .ok_or_else(|| FetchError::NotFound(format!("unknown asset: {}", asset_id)))?;
        let quote = PriceQuote::try_from((asset_id, entry))
            .map_err(|e| QuoteError::Validation(e.to_string()))?;

        self.client.history().record_quietly(&quote).await;
        Ok(quote)
    }

    /// Quotes for several assets in a single request. Not recorded in history.
    ///
    /// Ids unknown upstream or lacking a price are skipped; the result follows
    /// the order of `assets`.
    pub async fn many(&self, assets: &[AssetId]) -> Result<Vec<PriceQuote>, QuoteError> {
        self.many_stamped(assets).await.map(|fetched| fetched.value)
    }

    /// Like [`Prices::many`], also reporting when the quotes were fetched
    /// upstream. A cache-served result carries the original fetch time.
    pub async fn many_stamped(
        &self,
        assets: &[AssetId],
    ) -> Result<Fetched<Vec<PriceQuote>>, QuoteError> {
        let wanted: Vec<&AssetId> = assets.iter().filter(|a| !a.is_empty()).collect();
        if wanted.is_empty() {
            return Ok(Fetched {
                value: Vec::new(),
                fetched_at: Utc::now(),
                from_cache: false,
            });
        }

        let key = price::simple_price_key(wanted.iter().copied());
        let fetched = self
            .client
            .fetch
            .fetch_stamped::<SimplePriceResponse>(&key)
            .await?;
        let mut resp = fetched.value;

        let mut quotes = Vec::with_capacity(wanted.len());
        for asset_id in wanted {
            let Some(entry) = resp.remove(asset_id.as_str()) else {
                tracing::debug!(asset = %asset_id, "Asset missing from multi-asset quote");
                continue;
            };
            match PriceQuote::try_from((asset_id.clone(), entry)) {
                Ok(quote) => quotes.push(quote),
                Err(e) => tracing::debug!(asset = %asset_id, error = %e, "Skipping incomplete quote"),
            }
        }
        Ok(Fetched {
            value: quotes,
            fetched_at: fetched.fetched_at,
            from_cache: fetched.from_cache,
        })
    }
}
