//! Conversion: MarketChartResponse → MarketSeries.

use super::wire::MarketChartResponse;
use super::{MarketSeries, SeriesPoint, ValidationError};

impl From<[f64; 2]> for SeriesPoint {
    fn from([time, value]: [f64; 2]) -> Self {
        Self {
            time: time as i64,
            value,
        }
    }
}

impl TryFrom<MarketChartResponse> for MarketSeries {
    type Error = ValidationError;

    fn try_from(source: MarketChartResponse) -> Result<Self, Self::Error> {
        if source.prices.is_empty() {
            return Err(ValidationError::EmptyPrices);
        }

        let series = Self {
            prices: source.prices.into_iter().map(SeriesPoint::from).collect(),
            market_caps: source.market_caps.into_iter().map(SeriesPoint::from).collect(),
            volumes: source.total_volumes.into_iter().map(SeriesPoint::from).collect(),
        };
        if series.volumes.len() < series.prices.len() {
            tracing::debug!(
                prices = series.prices.len(),
                volumes = series.volumes.len(),
                "Market series has fewer volume points than prices"
            );
        }
        Ok(series)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aligned_series_convert() {
        let body = r#"{
            "prices": [[1700000000000, 100.0], [1700086400000, 101.5]],
            "market_caps": [[1700000000000, 1e9], [1700086400000, 1.1e9]],
            "total_volumes": [[1700000000000, 5e6], [1700086400000, 6e6]]
        }"#;
        let resp: MarketChartResponse = serde_json::from_str(body).unwrap();
        let series = MarketSeries::try_from(resp).unwrap();

        assert_eq!(series.prices.len(), 2);
        assert_eq!(series.prices[1], SeriesPoint { time: 1700086400000, value: 101.5 });
        assert_eq!(series.market_caps[0].value, 1e9);
        assert_eq!(series.volumes[1].value, 6e6);
        assert!(series.has_volumes());
    }

    #[test]
    fn test_short_or_missing_volumes_are_tolerated() {
        let short = r#"{"prices": [[1, 1.0], [2, 2.0]], "market_caps": [], "total_volumes": [[1, 9.0]]}"#;
        let series = MarketSeries::try_from(serde_json::from_str::<MarketChartResponse>(short).unwrap()).unwrap();
        assert_eq!(series.volumes.len(), 1);

        let missing = r#"{"prices": [[1, 1.0]]}"#;
        let series = MarketSeries::try_from(serde_json::from_str::<MarketChartResponse>(missing).unwrap()).unwrap();
        assert!(!series.has_volumes());

        let malformed = r#"{"prices": [[1, 1.0]], "total_volumes": "n/a"}"#;
        let series = MarketSeries::try_from(serde_json::from_str::<MarketChartResponse>(malformed).unwrap()).unwrap();
        assert!(series.volumes.is_empty());
    }

    #[test]
    fn test_empty_prices_rejected() {
        let resp: MarketChartResponse = serde_json::from_str(r#"{"prices": []}"#).unwrap();
        assert_eq!(MarketSeries::try_from(resp).unwrap_err(), ValidationError::EmptyPrices);

        let resp: MarketChartResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(MarketSeries::try_from(resp).unwrap_err(), ValidationError::EmptyPrices);
    }
}
