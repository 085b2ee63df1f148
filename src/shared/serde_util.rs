//! Custom serde helpers for CoinGecko wire formats.

/// Deserializes a `[[timestamp_ms, value], ...]` series, degrading to an empty
/// series when the field is `null` or not shaped like pairs.
///
/// CoinGecko occasionally returns a truncated or malformed `total_volumes`
/// array; callers would rather render without volume than lose the chart.
pub mod lenient_points {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<[f64; 2]>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<Value>::deserialize(deserializer)?;
        let Some(raw) = raw else {
            return Ok(Vec::new());
        };
        match serde_json::from_value::<Vec<[f64; 2]>>(raw) {
            Ok(points) => Ok(points),
            Err(e) => {
                tracing::debug!(error = %e, "Ignoring malformed series");
                Ok(Vec::new())
            }
        }
    }
}
