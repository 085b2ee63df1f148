//! Global spacing between outbound API calls.

use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Enforces a minimum gap between the starts of two permitted calls.
///
/// One instance is shared by every endpoint: the upstream API counts all
/// requests against a single budget. Waiters queue on a FIFO mutex, so slots
/// are handed out in arrival order.
#[derive(Debug)]
pub struct RateLimiter {
    min_spacing: Duration,
    last_call: Mutex<Option<Instant>>,
}

impl RateLimiter {
    pub fn new(min_spacing: Duration) -> Self {
        Self {
            min_spacing,
            last_call: Mutex::new(None),
        }
    }

    /// Wait until a call may start, record it, and return its start time.
    pub async fn await_slot(&self) -> Instant {
        let mut last = self.last_call.lock().await;
        if let Some(prev) = *last {
            let ready_at = prev + self.min_spacing;
            if ready_at > Instant::now() {
                tracing::debug!(
                    wait_ms = (ready_at - Instant::now()).as_millis() as u64,
                    "Rate limiter delaying call"
                );
                tokio::time::sleep_until(ready_at).await;
            }
        }
        let started = Instant::now();
        *last = Some(started);
        started
    }

    /// Forget the previous call so the next one proceeds immediately.
    pub async fn reset(&self) {
        *self.last_call.lock().await = None;
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(crate::config::MIN_CALL_SPACING)
    }
}
