//! SQLite-backed search history store.

use super::HistoryRecord;
use crate::domain::price::PriceQuote;
use crate::error::StorageError;
use crate::shared::AssetId;

use chrono::NaiveDateTime;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;
use std::path::Path;
use std::str::FromStr;

const SEARCH_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Append-only log of price lookups.
///
/// The pool is capped at a single connection, so writes from the lookup path
/// and reads from the history view are serialized.
#[derive(Clone)]
pub struct HistoryStore {
    pool: SqlitePool,
}

impl HistoryStore {
    /// Open (creating if needed) the database file at `path`.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        tracing::debug!(path = %path.display(), "Opened search history");
        Self::init(pool).await
    }

    /// Private in-memory database, kept alive for the lifetime of the store.
    pub async fn in_memory() -> Result<Self, StorageError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;
        Self::init(pool).await
    }

    async fn init(pool: SqlitePool) -> Result<Self, StorageError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS search_history (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                crypto_name TEXT NOT NULL,
                search_date TEXT NOT NULL DEFAULT (strftime('%Y-%m-%d %H:%M:%f', 'now')),
                price_usd REAL,
                price_brl REAL,
                change_24h REAL
            );
            "#,
        )
        .execute(&pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_search_history_date ON search_history(search_date);",
        )
        .execute(&pool)
        .await?;

        Ok(Self { pool })
    }

    /// Append one row for `quote`. Returns the assigned id.
    pub async fn record(&self, quote: &PriceQuote) -> Result<i64, StorageError> {
        let result = sqlx::query(
            "INSERT INTO search_history (crypto_name, price_usd, price_brl, change_24h) VALUES (?, ?, ?, ?)",
        )
        .bind(quote.asset_id.as_str())
        .bind(quote.usd)
        .bind(quote.brl)
        .bind(quote.usd_24h_change)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Up to `limit` rows, most recent first.
    pub async fn recent(&self, limit: u32) -> Result<Vec<HistoryRecord>, StorageError> {
        let rows = sqlx::query(
            r#"
            SELECT id, crypto_name, search_date, price_usd, price_brl, change_24h
            FROM search_history
            ORDER BY search_date DESC, id DESC
            LIMIT ?
            "#,
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(record_from_row).collect()
    }

    pub async fn count(&self) -> Result<i64, StorageError> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM search_history")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.try_get("count")?)
    }

    /// Close the underlying pool. Later calls fail with a storage error.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

fn record_from_row(row: &SqliteRow) -> Result<HistoryRecord, StorageError> {
    let search_date: String = row.try_get("search_date")?;
    let observed_at = NaiveDateTime::parse_from_str(&search_date, SEARCH_DATE_FORMAT)
        .map_err(|e| StorageError::Decode(format!("search_date {:?}: {}", search_date, e)))?
        .and_utc();

    Ok(HistoryRecord {
        id: row.try_get("id")?,
        asset_id: AssetId::new(row.try_get::<String, _>("crypto_name")?),
        observed_at,
        price_usd: row.try_get("price_usd")?,
        price_brl: row.try_get("price_brl")?,
        change_24h: row.try_get("change_24h")?,
    })
}
