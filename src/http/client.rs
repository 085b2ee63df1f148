//! `FetchClient`: the single path for every outbound API call.
//!
//! Cache check, then rate-limit wait, then up to `max_attempts` transport
//! attempts with a per-attempt timeout. Only successful bodies are cached.

use crate::error::{FetchError, TransportError};
use crate::http::cache::ResponseCache;
use crate::http::limiter::RateLimiter;
use crate::http::retry::RetryConfig;
use crate::http::transport::Transport;
use crate::shared::RequestKey;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tokio::time::Instant;

/// A decoded response and the wall-clock time its body was fetched upstream.
///
/// For a cache hit `fetched_at` is the time of the original network call.
#[derive(Debug, Clone)]
pub struct Fetched<T> {
    pub value: T,
    pub fetched_at: DateTime<Utc>,
    pub from_cache: bool,
}

/// Rate-limited, retrying, caching wrapper around a [`Transport`].
#[derive(Clone)]
pub struct FetchClient {
    transport: Arc<dyn Transport>,
    cache: Arc<ResponseCache>,
    limiter: Arc<RateLimiter>,
    retry: RetryConfig,
}

impl FetchClient {
    pub fn new(
        transport: Arc<dyn Transport>,
        cache: ResponseCache,
        limiter: RateLimiter,
        retry: RetryConfig,
    ) -> Self {
        Self {
            transport,
            cache: Arc::new(cache),
            limiter: Arc::new(limiter),
            retry,
        }
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    pub fn limiter(&self) -> &RateLimiter {
        &self.limiter
    }

    /// Fetch and decode the response for `key`.
    ///
    /// A body that does not decode into `T` counts as a failed attempt, so
    /// whatever lands in the cache is known to decode for this key.
    pub async fn fetch<T: DeserializeOwned>(&self, key: &RequestKey) -> Result<T, FetchError> {
        self.fetch_stamped(key).await.map(|fetched| fetched.value)
    }

    /// Like [`FetchClient::fetch`], also reporting when the body was fetched.
    pub async fn fetch_stamped<T: DeserializeOwned>(
        &self,
        key: &RequestKey,
    ) -> Result<Fetched<T>, FetchError> {
        if let Some(entry) = self.cache.entry(key).await {
            match serde_json::from_str::<T>(&entry.payload) {
                Ok(value) => {
                    tracing::debug!(endpoint = key.path(), "Cache hit");
                    return Ok(Fetched {
                        value,
                        fetched_at: entry.stored_at,
                        from_cache: true,
                    });
                }
                Err(e) => {
                    tracing::warn!(endpoint = key.path(), error = %e, "Cached body no longer decodes, refetching");
                }
            }
        }

        self.limiter.await_slot().await;
        self.request_with_retry(key).await
    }

    /// Drop every cached response and let the next call skip the rate-limit wait.
    pub async fn clear(&self) {
        self.cache.clear().await;
        self.limiter.reset().await;
    }

    /// Evict entries past the stale window.
    pub async fn sweep(&self) -> usize {
        self.cache.sweep(Instant::now()).await
    }

    async fn request_with_retry<T: DeserializeOwned>(
        &self,
        key: &RequestKey,
    ) -> Result<Fetched<T>, FetchError> {
        let attempts = self.retry.attempts();
        let mut last_error = None;

        for attempt in 0..attempts {
            match self.do_request::<T>(key).await {
                Ok((value, body)) => {
                    let fetched_at = self.cache.put(key.clone(), body).await;
                    return Ok(Fetched {
                        value,
                        fetched_at,
                        from_cache: false,
                    });
                }
                Err(e) => {
                    tracing::warn!(
                        endpoint = key.path(),
                        attempt = attempt + 1,
                        max = attempts,
                        kind = e.kind(),
                        error = %e,
                        "Fetch attempt failed"
                    );
                    if !e.is_retryable() {
                        return Err(e);
                    }
                    if attempt + 1 < attempts {
                        let delay = self.retry.backoff;
                        tracing::debug!(
                            attempt = attempt + 1,
                            delay_ms = delay.as_millis() as u64,
                            "Retrying request to {}",
                            key
                        );
                        tokio::time::sleep(delay).await;
                    }
                    last_error = Some(e);
                }
            }
        }

        Err(FetchError::Unavailable {
            attempts,
            last_error: last_error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "unknown".to_string()),
        })
    }

    async fn do_request<T: DeserializeOwned>(
        &self,
        key: &RequestKey,
    ) -> Result<(T, String), FetchError> {
        let timeout = self.retry.attempt_timeout;
        let body = match tokio::time::timeout(timeout, self.transport.get(key)).await {
            Ok(result) => result?,
            Err(_) => return Err(TransportError::Timeout(timeout).into()),
        };

        let value = serde_json::from_str::<T>(&body).map_err(|e| FetchError::Parse(e.to_string()))?;
        Ok((value, body))
    }
}
