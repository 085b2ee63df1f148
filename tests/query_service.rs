//! End-to-end tests for `QuoteClient` over a stub transport.
//!
//! The stub answers by endpoint path and counts calls, so these tests
//! exercise the full cache → limiter → retry → conversion → history path
//! without network access.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tempfile::tempdir;

use cryptoquote::prelude::*;

const BTC_BODY: &str = r#"{"bitcoin": {"usd": 50000, "brl": 250000, "usd_24h_change": 2.5, "usd_market_cap": 1e12, "usd_24h_vol": 3e10}}"#;

/// Replies by endpoint path; unknown paths fail with a 500.
#[derive(Default)]
struct StubTransport {
    bodies: Mutex<HashMap<String, String>>,
    calls: AtomicUsize,
}

impl StubTransport {
    fn with(path: &str, body: &str) -> Arc<Self> {
        let stub = Self::default();
        stub.bodies
            .lock()
            .unwrap()
            .insert(path.to_string(), body.to_string());
        Arc::new(stub)
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for StubTransport {
    async fn get(&self, key: &RequestKey) -> Result<String, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.bodies.lock().unwrap().get(key.path()) {
            Some(body) => Ok(body.clone()),
            None => Err(TransportError::Status {
                status: 500,
                body: "stub has no reply".into(),
            }),
        }
    }
}

async fn client_with(transport: Arc<StubTransport>) -> QuoteClient {
    QuoteClient::builder()
        .transport(transport)
        .history_store(HistoryStore::in_memory().await.unwrap())
        .build()
        .await
        .unwrap()
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn bitcoin_quote_is_returned_and_recorded_once() {
    let transport = StubTransport::with("/simple/price", BTC_BODY);
    let client = client_with(transport.clone()).await;

    let quote = client.get_current_price("bitcoin").await.expect("quote");
    assert_eq!(
        quote,
        PriceQuote {
            asset_id: AssetId::from("bitcoin"),
            usd: 50000.0,
            brl: 250000.0,
            usd_24h_change: Some(2.5),
            usd_market_cap: Some(1e12),
            usd_24h_volume: Some(3e10),
        }
    );

    let history = client.recent_history().await;
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].asset_id.as_str(), "bitcoin");
    assert_eq!(history[0].price_usd, Some(50000.0));
    assert_eq!(history[0].price_brl, Some(250000.0));
    assert_eq!(history[0].change_24h, Some(2.5));
}

#[tokio::test]
async fn unknown_asset_yields_none_and_records_nothing() {
    let transport = StubTransport::with("/simple/price", "{}");
    let client = client_with(transport.clone()).await;

    assert!(client.get_current_price("not-a-real-asset").await.is_none());
    assert_eq!(transport.calls(), 1);
    assert!(client.recent_history().await.is_empty());
}

#[tokio::test]
async fn back_to_back_lookups_hit_transport_once() {
    let transport = StubTransport::with("/simple/price", BTC_BODY);
    let client = client_with(transport.clone()).await;

    let started = Instant::now();
    let first = client.get_current_price("bitcoin").await.unwrap();
    let second = client.get_current_price("Bitcoin").await.unwrap();
    assert!(started.elapsed() < Duration::from_secs(1));

    assert_eq!(first, second);
    assert_eq!(transport.calls(), 1);
    // both are successful lookups
    assert_eq!(client.history_store().count().await.unwrap(), 2);
}

#[tokio::test]
async fn force_clear_cache_forces_refetch_without_waiting() {
    let transport = StubTransport::with("/simple/price", BTC_BODY);
    let client = client_with(transport.clone()).await;

    client.get_current_price("bitcoin").await.unwrap();
    client.force_clear_cache().await;

    let started = Instant::now();
    client.get_current_price("bitcoin").await.unwrap();
    assert!(started.elapsed() < Duration::from_millis(400));
    assert_eq!(transport.calls(), 2);
}

#[tokio::test]
async fn history_write_failure_does_not_fail_lookup() {
    let transport = StubTransport::with("/simple/price", BTC_BODY);
    let store = HistoryStore::in_memory().await.unwrap();
    let client = QuoteClient::builder()
        .transport(transport.clone())
        .history_store(store.clone())
        .build()
        .await
        .unwrap();

    store.close().await;

    let quote = client.get_current_price("bitcoin").await;
    assert_eq!(quote.map(|q| q.usd), Some(50000.0));
    // unreadable history degrades to empty, but is distinguishable on request
    assert!(client.recent_history().await.is_empty());
    assert!(client.history().try_recent(HISTORY_LIMIT).await.is_err());
}

#[tokio::test]
async fn persistent_upstream_failure_is_retried_then_unavailable() {
    let transport = Arc::new(StubTransport::default());
    let client = client_with(transport.clone()).await;

    let started = Instant::now();
    let err = client.prices().try_current("bitcoin").await.unwrap_err();
    assert!(matches!(
        err,
        QuoteError::Fetch(FetchError::Unavailable { attempts: 2, .. })
    ));
    assert_eq!(transport.calls(), 2);
    assert!(started.elapsed() >= Duration::from_millis(500));
    assert!(client.recent_history().await.is_empty());
}

#[tokio::test]
async fn market_series_tolerates_missing_volumes() {
    let transport = StubTransport::with(
        "/coins/bitcoin/market_chart",
        r#"{"prices": [[1700000000000, 100.0], [1700086400000, 101.0]],
            "market_caps": [[1700000000000, 1e9], [1700086400000, 1e9]]}"#,
    );
    let client = client_with(transport.clone()).await;

    let series = client
        .get_market_series("bitcoin", DEFAULT_SERIES_DAYS)
        .await
        .expect("series");
    assert_eq!(series.prices.len(), 2);
    assert_eq!(series.market_caps.len(), 2);
    assert!(series.volumes.is_empty());
    assert!(client.recent_history().await.is_empty());
}

#[tokio::test]
async fn market_series_with_empty_prices_is_unavailable() {
    let transport = StubTransport::with(
        "/coins/bitcoin/market_chart",
        r#"{"prices": [], "market_caps": [], "total_volumes": []}"#,
    );
    let client = client_with(transport).await;

    assert!(client.get_market_series("bitcoin", 30).await.is_none());
}

#[tokio::test]
async fn ohlc_series_converted_in_order() {
    let transport = StubTransport::with(
        "/coins/ethereum/ohlc",
        "[[1700000000000, 1, 2, 0.5, 1.5], [1700345600000, 1.5, 3, 1, 2.5]]",
    );
    let client = client_with(transport).await;

    let candles = client.get_ohlc_series("ethereum", 30).await.expect("candles");
    assert_eq!(candles.len(), 2);
    assert!(candles[0].time < candles[1].time);
    assert_eq!(candles[1].close, 2.5);
}

#[tokio::test]
async fn distinct_windows_are_distinct_cache_entries() {
    let transport = StubTransport::with("/coins/bitcoin/ohlc", "[[1, 1, 1, 1, 1]]");
    let client = client_with(transport.clone()).await;

    client.get_ohlc_series("bitcoin", 30).await.unwrap();
    client.get_ohlc_series("bitcoin", 7).await.unwrap();
    client.get_ohlc_series("bitcoin", 30).await.unwrap();
    assert_eq!(transport.calls(), 2);
}

#[tokio::test]
async fn history_persists_in_file_store() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("data").join("search_history.db");
    let transport = StubTransport::with("/simple/price", BTC_BODY);

    let client = QuoteClient::builder()
        .transport(transport.clone())
        .db_path(&path)
        .build()
        .await
        .unwrap();
    client.get_current_price("bitcoin").await.unwrap();
    client.history_store().close().await;

    let reopened = HistoryStore::open(&path).await.unwrap();
    let records = reopened.recent(HISTORY_LIMIT).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].asset_id.as_str(), "bitcoin");
}
