//! Timer-driven background tasks: cache sweep and popular-asset refresh.
//!
//! Both run as plain tokio tasks owned by a [`Scheduler`] handle, with no tie
//! to any UI event loop. Dropping the handle stops them.

use crate::client::QuoteClient;
use crate::domain::price::PriceQuote;
use crate::http::FetchClient;
use crate::shared::AssetId;

use chrono::{DateTime, Utc};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, warn};

/// Latest result of the popular-asset refresh.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PopularSnapshot {
    pub quotes: Vec<PriceQuote>,
    /// When the quotes were fetched upstream, which for a cache-served tick
    /// is the time of the original call. `None` until the first refresh.
    pub refreshed_at: Option<DateTime<Utc>>,
}

/// Owns the spawned background tasks.
pub struct Scheduler {
    tasks: Vec<(&'static str, JoinHandle<()>)>,
}

impl Scheduler {
    /// Start the cache sweep and the popular-asset refresh for `client`.
    pub fn start(client: &QuoteClient) -> (Self, watch::Receiver<PopularSnapshot>) {
        let config = client.config();
        let sweep = spawn_cache_sweep(client.fetch_client().clone(), config.sweep_period);
        let (refresh, rx) = spawn_popular_refresh(
            client.clone(),
            client.popular_assets(),
            config.popular_refresh_period,
        );

        info!(
            sweep_secs = config.sweep_period.as_secs(),
            refresh_secs = config.popular_refresh_period.as_secs(),
            "Starting background tasks"
        );

        (
            Self {
                tasks: vec![("cache_sweep", sweep), ("popular_refresh", refresh)],
            },
            rx,
        )
    }

    pub fn task_names(&self) -> Vec<&'static str> {
        self.tasks.iter().map(|(name, _)| *name).collect()
    }

    pub fn is_running(&self) -> bool {
        self.tasks.iter().any(|(_, handle)| !handle.is_finished())
    }

    /// Abort every task.
    pub fn shutdown(&mut self) {
        for (name, handle) in self.tasks.drain(..) {
            debug!(task = name, "Stopping background task");
            handle.abort();
        }
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Sweep stale cache entries every `period`.
pub fn spawn_cache_sweep(fetch: FetchClient, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // the first tick completes immediately; nothing can be stale yet
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let removed = fetch.sweep().await;
            debug!(removed, "Cache sweep");
        }
    })
}

/// Refresh quotes for `assets` every `period`, publishing each successful
/// result. The first refresh runs immediately.
pub fn spawn_popular_refresh(
    client: QuoteClient,
    assets: Vec<AssetId>,
    period: Duration,
) -> (JoinHandle<()>, watch::Receiver<PopularSnapshot>) {
    let (tx, rx) = watch::channel(PopularSnapshot::default());

    let handle = tokio::spawn(async move {
        if assets.is_empty() {
            debug!("No popular assets configured, refresh task idle");
            return;
        }

        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            match client.prices().many_stamped(&assets).await {
                Ok(fetched) => {
                    debug!(
                        count = fetched.value.len(),
                        from_cache = fetched.from_cache,
                        "Refreshed popular assets"
                    );
                    let snapshot = PopularSnapshot {
                        quotes: fetched.value,
                        refreshed_at: Some(fetched.fetched_at),
                    };
                    if tx.send(snapshot).is_err() {
                        debug!("No popular-asset subscribers left, stopping refresh");
                        return;
                    }
                }
                Err(e) => warn!(kind = e.kind(), error = %e, "Popular asset refresh failed"),
            }
        }
    });

    (handle, rx)
}
