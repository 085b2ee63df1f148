//! High-level client: `QuoteClient` with nested sub-client accessors.
//!
//! Each domain has its own sub-client in `domain/<name>/client.rs`.
//! This module keeps the builder, the shared fetch and storage state, and the
//! five calls a front end is expected to depend on.

use crate::config::{QuoteConfig, HISTORY_LIMIT};
use crate::domain::history::client::History;
use crate::domain::history::{HistoryRecord, HistoryStore};
use crate::domain::market_chart::client::MarketCharts;
use crate::domain::market_chart::MarketSeries;
use crate::domain::ohlc::client::Ohlc;
use crate::domain::ohlc::Candle;
use crate::domain::price::client::Prices;
use crate::domain::price::PriceQuote;
use crate::error::QuoteError;
use crate::http::{FetchClient, RateLimiter, ResponseCache, RetryConfig, Transport};
use crate::shared::AssetId;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

// Re-export sub-client types for convenience.
pub use crate::domain::history::client::History as HistoryClient;
pub use crate::domain::market_chart::client::MarketCharts as MarketChartsClient;
pub use crate::domain::ohlc::client::Ohlc as OhlcClient;
pub use crate::domain::price::client::Prices as PricesClient;

/// The primary entry point.
///
/// Owns the fetch client (cache, rate limiter, retry policy, transport) and
/// the search history store. Cloning is cheap and clones share all state.
#[derive(Clone)]
pub struct QuoteClient {
    pub(crate) fetch: FetchClient,
    pub(crate) history: HistoryStore,
    pub(crate) config: Arc<QuoteConfig>,
}

impl QuoteClient {
    pub fn builder() -> QuoteClientBuilder {
        QuoteClientBuilder::default()
    }

    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn prices(&self) -> Prices<'_> {
        Prices { client: self }
    }

    pub fn market_charts(&self) -> MarketCharts<'_> {
        MarketCharts { client: self }
    }

    pub fn ohlc(&self) -> Ohlc<'_> {
        Ohlc { client: self }
    }

    pub fn history(&self) -> History<'_> {
        History { client: self }
    }

    pub fn fetch_client(&self) -> &FetchClient {
        &self.fetch
    }

    pub fn history_store(&self) -> &HistoryStore {
        &self.history
    }

    pub fn config(&self) -> &QuoteConfig {
        &self.config
    }

    /// Assets kept warm by the popular-asset refresh task.
    pub fn popular_assets(&self) -> Vec<AssetId> {
        self.config
            .popular_assets
            .iter()
            .map(AssetId::new)
            .filter(|a| !a.is_empty())
            .collect()
    }

    // ── Front-end surface ────────────────────────────────────────────────

    /// Current USD/BRL quote; records the lookup in the search history.
    pub async fn get_current_price(&self, asset: &str) -> Option<PriceQuote> {
        self.prices().current(asset).await
    }

    /// Daily USD market series over `days`.
    pub async fn get_market_series(&self, asset: &str, days: u32) -> Option<MarketSeries> {
        self.market_charts().series(asset, days).await
    }

    /// USD OHLC candles over `days`.
    pub async fn get_ohlc_series(&self, asset: &str, days: u32) -> Option<Vec<Candle>> {
        self.ohlc().candles(asset, days).await
    }

    /// Most recent lookups, newest first, capped at [`HISTORY_LIMIT`].
    pub async fn recent_history(&self) -> Vec<HistoryRecord> {
        self.history().recent(HISTORY_LIMIT).await
    }

    /// Drop all cached responses and reset the rate limiter.
    pub async fn force_clear_cache(&self) {
        tracing::info!("Clearing response cache");
        self.fetch.clear().await;
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

#[derive(Default)]
pub struct QuoteClientBuilder {
    config: QuoteConfig,
    transport: Option<Arc<dyn Transport>>,
    history: Option<HistoryStore>,
}

impl QuoteClientBuilder {
    /// Replace the whole configuration.
    pub fn config(mut self, config: QuoteConfig) -> Self {
        self.config = config;
        self
    }

    pub fn base_url(mut self, url: &str) -> Self {
        self.config.api_url = url.to_string();
        self
    }

    pub fn db_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.db_path = path.into();
        self
    }

    pub fn freshness_window(mut self, window: Duration) -> Self {
        self.config.freshness_window = window;
        self
    }

    pub fn stale_window(mut self, window: Duration) -> Self {
        self.config.stale_window = window;
        self
    }

    pub fn min_call_spacing(mut self, spacing: Duration) -> Self {
        self.config.min_call_spacing = spacing;
        self
    }

    pub fn retry(mut self, retry: RetryConfig) -> Self {
        self.config.retry = retry;
        self
    }

    pub fn popular_assets<I, S>(mut self, assets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.popular_assets = assets.into_iter().map(Into::into).collect();
        self
    }

    /// Use a custom transport instead of the HTTP one.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Use an already opened history store instead of opening `db_path`.
    pub fn history_store(mut self, store: HistoryStore) -> Self {
        self.history = Some(store);
        self
    }

    pub async fn build(self) -> Result<QuoteClient, QuoteError> {
        let config = self.config;
        if config.stale_window < config.freshness_window {
            return Err(QuoteError::Config(
                "stale window must not be shorter than the freshness window".to_string(),
            ));
        }

        let transport = match self.transport {
            Some(t) => t,
            None => default_transport(&config.api_url)?,
        };

        let history = match self.history {
            Some(store) => store,
            None => HistoryStore::open(&config.db_path).await?,
        };

        let fetch = FetchClient::new(
            transport,
            ResponseCache::new(config.freshness_window, config.stale_window),
            RateLimiter::new(config.min_call_spacing),
            config.retry.clone(),
        );

        Ok(QuoteClient {
            fetch,
            history,
            config: Arc::new(config),
        })
    }
}

#[cfg(feature = "http")]
fn default_transport(api_url: &str) -> Result<Arc<dyn Transport>, QuoteError> {
    let transport = crate::http::HttpTransport::new(api_url)
        .map_err(|e| QuoteError::Config(format!("failed to build HTTP transport: {}", e)))?;
    Ok(Arc::new(transport))
}

#[cfg(not(feature = "http"))]
fn default_transport(_api_url: &str) -> Result<Arc<dyn Transport>, QuoteError> {
    Err(QuoteError::Config(
        "no transport configured and the `http` feature is disabled".to_string(),
    ))
}
