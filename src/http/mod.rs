//! Fetch layer: rate limiter, response cache, retry policy and transport.

pub mod cache;
pub mod client;
pub mod limiter;
pub mod retry;
pub mod transport;

pub use cache::{CacheEntry, ResponseCache};
pub use client::{FetchClient, Fetched};
pub use limiter::RateLimiter;
pub use retry::RetryConfig;
#[cfg(feature = "http")]
pub use transport::HttpTransport;
pub use transport::Transport;
