//! Network URL constants.

/// Default CoinGecko REST API base URL.
pub const DEFAULT_API_URL: &str = "https://api.coingecko.com/api/v3";
