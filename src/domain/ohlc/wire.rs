//! Wire types for `/coins/{id}/ohlc`.

/// Raw `[timestamp_ms, open, high, low, close]` rows.
pub type OhlcResponse = Vec<[f64; 5]>;
