//! In-memory response cache keyed by [`RequestKey`].

use crate::shared::RequestKey;

use async_lock::RwLock;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

/// One cached response body and the moment it was fetched.
///
/// `fetched_at` drives freshness; `stored_at` is the wall-clock time
/// reported to callers.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub payload: Arc<str>,
    pub fetched_at: Instant,
    pub stored_at: DateTime<Utc>,
}

impl CacheEntry {
    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.fetched_at)
    }
}

/// Short-lived response store.
///
/// Reads never evict: an entry past the freshness window is simply not
/// returned, and stays physically present until [`ResponseCache::sweep`]
/// removes it once it is older than the stale window.
#[derive(Debug)]
pub struct ResponseCache {
    entries: RwLock<HashMap<RequestKey, CacheEntry>>,
    freshness_window: Duration,
    stale_window: Duration,
}

impl ResponseCache {
    pub fn new(freshness_window: Duration, stale_window: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            freshness_window,
            stale_window,
        }
    }

    /// Fresh payload for `key`, if any.
    pub async fn get(&self, key: &RequestKey) -> Option<Arc<str>> {
        self.get_at(key, Instant::now()).await
    }

    pub async fn get_at(&self, key: &RequestKey, now: Instant) -> Option<Arc<str>> {
        self.entry_at(key, now).await.map(|entry| entry.payload)
    }

    /// Fresh entry for `key`, including when it was stored.
    pub async fn entry(&self, key: &RequestKey) -> Option<CacheEntry> {
        self.entry_at(key, Instant::now()).await
    }

    pub async fn entry_at(&self, key: &RequestKey, now: Instant) -> Option<CacheEntry> {
        let entries = self.entries.read().await;
        let entry = entries.get(key)?;
        if entry.age(now) < self.freshness_window {
            Some(entry.clone())
        } else {
            None
        }
    }

    /// Insert or overwrite the entry for `key`, timestamped now. Returns the
    /// wall-clock stamp of the stored entry.
    pub async fn put(&self, key: RequestKey, payload: impl Into<Arc<str>>) -> DateTime<Utc> {
        self.put_at(key, payload, Instant::now()).await
    }

    pub async fn put_at(
        &self,
        key: RequestKey,
        payload: impl Into<Arc<str>>,
        fetched_at: Instant,
    ) -> DateTime<Utc> {
        let stored_at = Utc::now();
        let entry = CacheEntry {
            payload: payload.into(),
            fetched_at,
            stored_at,
        };
        self.entries.write().await.insert(key, entry);
        stored_at
    }

    /// Remove every entry older than the stale window. Returns how many went.
    pub async fn sweep(&self, now: Instant) -> usize {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        let stale_window = self.stale_window;
        entries.retain(|_, entry| entry.age(now) <= stale_window);
        let removed = before - entries.len();
        if removed > 0 {
            tracing::debug!(removed, remaining = entries.len(), "Swept stale cache entries");
        }
        removed
    }

    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }

    /// Whether an entry is physically stored, fresh or not.
    pub async fn contains(&self, key: &RequestKey) -> bool {
        self.entries.read().await.contains_key(key)
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new(crate::config::FRESHNESS_WINDOW, crate::config::STALE_WINDOW)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRESH: Duration = Duration::from_secs(300);
    const STALE: Duration = Duration::from_secs(600);

    fn key(id: &str) -> RequestKey {
        RequestKey::new("/simple/price").param("ids", id)
    }

    #[tokio::test]
    async fn test_put_then_get_returns_payload() {
        let cache = ResponseCache::new(FRESH, STALE);
        cache.put(key("bitcoin"), "{\"bitcoin\":{}}").await;
        assert_eq!(cache.get(&key("bitcoin")).await.as_deref(), Some("{\"bitcoin\":{}}"));
        assert!(cache.get(&key("ethereum")).await.is_none());
    }

    #[tokio::test]
    async fn test_put_overwrites() {
        let cache = ResponseCache::new(FRESH, STALE);
        cache.put(key("bitcoin"), "old").await;
        cache.put(key("bitcoin"), "new").await;
        assert_eq!(cache.get(&key("bitcoin")).await.as_deref(), Some("new"));
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_expired_entry_is_absent_but_retained() {
        let cache = ResponseCache::new(FRESH, STALE);
        let t0 = Instant::now();
        cache.put_at(key("bitcoin"), "v", t0).await;

        assert!(cache.get_at(&key("bitcoin"), t0 + FRESH - Duration::from_secs(1)).await.is_some());
        assert!(cache.get_at(&key("bitcoin"), t0 + FRESH).await.is_none());
        assert!(cache.get_at(&key("bitcoin"), t0 + FRESH + Duration::from_secs(1)).await.is_none());
        assert!(cache.contains(&key("bitcoin")).await);
    }

    #[tokio::test]
    async fn test_sweep_removes_only_stale_entries() {
        let cache = ResponseCache::new(FRESH, STALE);
        let t0 = Instant::now();
        cache.put_at(key("old"), "a", t0).await;
        cache.put_at(key("mid"), "b", t0 + Duration::from_secs(400)).await;
        cache.put_at(key("new"), "c", t0 + Duration::from_secs(700)).await;

        let now = t0 + Duration::from_secs(701);
        assert_eq!(cache.sweep(now).await, 1);
        assert!(!cache.contains(&key("old")).await);
        assert!(cache.contains(&key("mid")).await);
        assert!(cache.contains(&key("new")).await);

        // idempotent for the same `now`
        assert_eq!(cache.sweep(now).await, 0);
        assert_eq!(cache.len().await, 2);
    }

    #[tokio::test]
    async fn test_sweep_keeps_entry_exactly_at_stale_window() {
        let cache = ResponseCache::new(FRESH, STALE);
        let t0 = Instant::now();
        cache.put_at(key("edge"), "a", t0).await;
        assert_eq!(cache.sweep(t0 + STALE).await, 0);
        assert_eq!(cache.sweep(t0 + STALE + Duration::from_millis(1)).await, 1);
    }

    #[tokio::test]
    async fn test_entry_keeps_original_store_time() {
        let cache = ResponseCache::new(FRESH, STALE);
        let t0 = Instant::now();
        let stored_at = cache.put_at(key("bitcoin"), "v", t0).await;

        let entry = cache.entry_at(&key("bitcoin"), t0 + Duration::from_secs(60)).await.unwrap();
        assert_eq!(entry.stored_at, stored_at);
        assert_eq!(entry.fetched_at, t0);
        assert!(cache.entry_at(&key("bitcoin"), t0 + FRESH).await.is_none());
    }

    #[test]
    fn test_default_uses_configured_windows() {
        let cache = ResponseCache::default();
        let t0 = Instant::now();
        tokio_test::block_on(async {
            cache.put_at(key("bitcoin"), "v", t0).await;
            assert!(cache.get_at(&key("bitcoin"), t0 + crate::config::FRESHNESS_WINDOW).await.is_none());
            assert_eq!(cache.sweep(t0 + crate::config::STALE_WINDOW).await, 0);
        });
    }

    #[tokio::test]
    async fn test_clear_empties_cache() {
        let cache = ResponseCache::new(FRESH, STALE);
        cache.put(key("bitcoin"), "a").await;
        cache.put(key("ethereum"), "b").await;
        cache.clear().await;
        assert!(cache.is_empty().await);
    }
}
