//! History sub-client: reads for the history view, best-effort writes.

use crate::client::QuoteClient;
use crate::domain::history::HistoryRecord;
use crate::domain::price::PriceQuote;
use crate::error::StorageError;

/// Sub-client for the search history.
pub struct History<'a> {
    pub(crate) client: &'a QuoteClient,
}

impl<'a> History<'a> {
    /// Up to `limit` most recent lookups. A read failure is logged and
    /// reported as an empty history.
    pub async fn recent(&self, limit: u32) -> Vec<HistoryRecord> {
        match self.try_recent(limit).await {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(limit, error = %e, "Search history unreadable");
                Vec::new()
            }
        }
    }

    pub async fn try_recent(&self, limit: u32) -> Result<Vec<HistoryRecord>, StorageError> {
        self.client.history.recent(limit).await
    }

    /// Record `quote`, logging and discarding any storage failure.
    pub(crate) async fn record_quietly(&self, quote: &PriceQuote) {
        match self.client.history.record(quote).await {
            Ok(id) => tracing::debug!(asset = %quote.asset_id, id, "Recorded lookup"),
            Err(e) => tracing::warn!(asset = %quote.asset_id, error = %e, "Failed to record lookup"),
        }
    }
}
