//! Tuning constants and environment-driven configuration.

use crate::http::RetryConfig;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Age below which a cached response is served without a network call.
pub const FRESHNESS_WINDOW: Duration = Duration::from_secs(5 * 60);

/// Age above which a cached response is evicted by the sweep.
pub const STALE_WINDOW: Duration = Duration::from_secs(10 * 60);

/// Period of the cache sweep task.
pub const SWEEP_PERIOD: Duration = Duration::from_secs(5 * 60);

/// Minimum spacing between two outbound API calls.
pub const MIN_CALL_SPACING: Duration = Duration::from_millis(500);

/// Transport attempts per fetch, including the first.
pub const MAX_ATTEMPTS: u32 = 2;

/// Fixed wait between two transport attempts.
pub const RETRY_BACKOFF: Duration = Duration::from_millis(500);

/// Hard timeout for a single transport attempt.
pub const ATTEMPT_TIMEOUT: Duration = Duration::from_secs(8);

/// Maximum number of rows returned by a history read.
pub const HISTORY_LIMIT: u32 = 50;

/// Default window, in days, for market chart and OHLC series.
pub const DEFAULT_SERIES_DAYS: u32 = 30;

/// Period of the popular-asset refresh task.
pub const POPULAR_REFRESH_PERIOD: Duration = Duration::from_secs(60);

/// Assets refreshed by the popular-asset task unless overridden.
pub const DEFAULT_POPULAR_ASSETS: &[&str] = &["bitcoin", "ethereum", "solana", "cardano", "ripple"];

/// Default location of the search history database.
pub const DEFAULT_DB_PATH: &str = "data/search_history.db";

/// Client configuration.
///
/// `Default` gives the production values; `from_env` overlays
/// `CRYPTOQUOTE_*` variables on top of them.
#[derive(Debug, Clone)]
pub struct QuoteConfig {
    pub api_url: String,
    pub db_path: PathBuf,
    pub freshness_window: Duration,
    pub stale_window: Duration,
    pub sweep_period: Duration,
    pub min_call_spacing: Duration,
    pub retry: RetryConfig,
    pub popular_assets: Vec<String>,
    pub popular_refresh_period: Duration,
}

impl Default for QuoteConfig {
    fn default() -> Self {
        Self {
            api_url: crate::network::DEFAULT_API_URL.to_string(),
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            freshness_window: FRESHNESS_WINDOW,
            stale_window: STALE_WINDOW,
            sweep_period: SWEEP_PERIOD,
            min_call_spacing: MIN_CALL_SPACING,
            retry: RetryConfig::default(),
            popular_assets: DEFAULT_POPULAR_ASSETS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            popular_refresh_period: POPULAR_REFRESH_PERIOD,
        }
    }
}

impl QuoteConfig {
    /// Read overrides from the environment.
    ///
    /// Recognized variables: `CRYPTOQUOTE_API_URL`, `CRYPTOQUOTE_DB_PATH`,
    /// `CRYPTOQUOTE_REFRESH_SECS`, `CRYPTOQUOTE_POPULAR` (comma-separated ids).
    /// Unset, blank or unparsable values keep the default.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let api_url = env_str("CRYPTOQUOTE_API_URL", &defaults.api_url);
        let db_path = PathBuf::from(env_str(
            "CRYPTOQUOTE_DB_PATH",
            &defaults.db_path.to_string_lossy(),
        ));
        let popular_refresh_period = Duration::from_secs(env_u64(
            "CRYPTOQUOTE_REFRESH_SECS",
            defaults.popular_refresh_period.as_secs(),
        ));
        let popular_assets =
            env_list("CRYPTOQUOTE_POPULAR").unwrap_or_else(|| defaults.popular_assets.clone());

        Self {
            api_url,
            db_path,
            popular_refresh_period,
            popular_assets,
            ..defaults
        }
    }
}

fn env_str(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn env_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .filter(|v| *v > 0)
        .unwrap_or(default)
}

fn env_list(name: &str) -> Option<Vec<String>> {
    let raw = env::var(name).ok()?;
    let items: Vec<String> = raw
        .split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect();
    if items.is_empty() {
        None
    } else {
        Some(items)
    }
}
