//! Retry configuration for outbound requests.

use std::time::Duration;

/// Configuration for retry behavior.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of attempts, counting the initial request.
    pub max_attempts: u32,
    /// Fixed wait between two attempts.
    pub backoff: Duration,
    /// Hard timeout applied to each individual attempt.
    pub attempt_timeout: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self::fixed(
            crate::config::MAX_ATTEMPTS,
            crate::config::RETRY_BACKOFF,
            crate::config::ATTEMPT_TIMEOUT,
        )
    }
}

impl RetryConfig {
    /// Constant backoff between attempts.
    pub fn fixed(max_attempts: u32, backoff: Duration, attempt_timeout: Duration) -> Self {
        Self {
            max_attempts,
            backoff,
            attempt_timeout,
        }
    }

    /// Single attempt, no retry.
    pub fn none(attempt_timeout: Duration) -> Self {
        Self::fixed(1, Duration::ZERO, attempt_timeout)
    }

    /// Attempts actually made; a zero configuration still tries once.
    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }
}
