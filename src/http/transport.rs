//! The network seam: one GET per [`RequestKey`], raw body out.

use crate::error::TransportError;
use crate::shared::RequestKey;

use async_trait::async_trait;

/// Performs the actual network exchange for a request key.
///
/// Implementations return the raw response body on a 2xx status and a
/// [`TransportError`] otherwise. Timeouts and retries are applied by the
/// caller, not here.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, key: &RequestKey) -> Result<String, TransportError>;
}

/// reqwest-backed transport for the CoinGecko REST API.
#[cfg(feature = "http")]
#[derive(Debug, Clone)]
pub struct HttpTransport {
    base_url: String,
    client: reqwest::Client,
}

#[cfg(feature = "http")]
impl HttpTransport {
    pub fn new(base_url: &str) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(crate::config::ATTEMPT_TIMEOUT)
            .pool_max_idle_per_host(4)
            .user_agent(concat!("cryptoquote/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }
}

#[cfg(feature = "http")]
#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, key: &RequestKey) -> Result<String, TransportError> {
        let url = key.url(&self.base_url);
        tracing::debug!(%url, "GET");

        let resp = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    TransportError::Connection(e.to_string())
                } else {
                    TransportError::Reqwest(e)
                }
            })?;

        let status = resp.status();
        if status.is_success() {
            return Ok(resp.text().await?);
        }

        let body = resp.text().await.unwrap_or_default();
        Err(TransportError::Status {
            status: status.as_u16(),
            body,
        })
    }
}
