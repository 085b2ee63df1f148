//! # cryptoquote
//!
//! Rate-limited, cached access to CoinGecko prices and chart series, with a
//! local SQLite log of past price lookups.
//!
//! ## Architecture
//!
//! The crate is organized in layers:
//!
//! 1. **Core**: Shared newtypes, domain slices (prices, market charts, OHLC,
//!    search history), errors, configuration
//! 2. **Fetch**: `FetchClient`: response cache → rate limiter → transport with retry
//! 3. **High-Level Client**: `QuoteClient` with nested sub-clients
//! 4. **Scheduler**: Periodic cache sweep and popular-asset refresh
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cryptoquote::prelude::*;
//!
//! let client = QuoteClient::builder()
//!     .db_path("data/search_history.db")
//!     .build()
//!     .await?;
//!
//! if let Some(quote) = client.get_current_price("bitcoin").await {
//!     println!("{} = ${}", quote.asset_id, quote.usd);
//! }
//! let candles = client.get_ohlc_series("bitcoin", 30).await;
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared newtypes used across all domains.
pub mod shared;

/// Domain modules (vertical slices): types, wire types, conversions, sub-clients.
pub mod domain;

/// Unified error types.
pub mod error;

/// Tuning constants and environment-driven configuration.
pub mod config;

/// Network URL constants.
pub mod network;

// ── Layer 2: Fetch ───────────────────────────────────────────────────────────

/// Cache, rate limiter, retry policy and transport.
pub mod http;

// ── Layer 3: High-Level Client ───────────────────────────────────────────────

/// `QuoteClient`, the primary entry point.
pub mod client;

// ── Layer 4: Scheduler ───────────────────────────────────────────────────────

/// Background tasks.
pub mod scheduler;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared newtypes
    pub use crate::shared::{AssetId, RequestKey};

    // Domain types
    pub use crate::domain::history::{HistoryRecord, HistoryStore};
    pub use crate::domain::market_chart::{MarketSeries, SeriesPoint};
    pub use crate::domain::ohlc::Candle;
    pub use crate::domain::price::PriceQuote;

    // Errors
    pub use crate::error::{FetchError, QuoteError, StorageError, TransportError};

    // Configuration
    pub use crate::config::{QuoteConfig, DEFAULT_SERIES_DAYS, HISTORY_LIMIT};
    pub use crate::network::DEFAULT_API_URL;

    // Fetch layer
    #[cfg(feature = "http")]
    pub use crate::http::HttpTransport;
    pub use crate::http::{FetchClient, RateLimiter, ResponseCache, RetryConfig, Transport};

    // Client + sub-clients
    pub use crate::client::{
        HistoryClient, MarketChartsClient, OhlcClient, PricesClient, QuoteClient,
        QuoteClientBuilder,
    };

    // Background tasks
    pub use crate::scheduler::{PopularSnapshot, Scheduler};
}
