//! PostgreSQL cache backend.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pulse_core::error::CacheStoreError;
use pulse_core::traits::CacheBackend;
use pulse_core::types::CacheEntry;
use serde_json::Value;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::types::Json;
use sqlx::FromRow;
use std::time::Duration;
use tracing::info;

const CREATE_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS cache (
    key        TEXT PRIMARY KEY,
    data       JSONB NOT NULL,
    fetched_at TIMESTAMPTZ NOT NULL,
    expires_at TIMESTAMPTZ NOT NULL
)
"#;

#[derive(Debug, FromRow)]
struct CacheRow {
    key: String,
    data: Json<Value>,
    fetched_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl From<CacheRow> for CacheEntry {
    fn from(row: CacheRow) -> Self {
        CacheEntry {
            key: row.key,
            payload: row.data.0,
            fetched_at: row.fetched_at,
            expires_at: row.expires_at,
        }
    }
}

/// Cache rows in a shared `cache` table keyed by name.
#[derive(Clone)]
pub struct PgCacheStore {
    pool: PgPool,
}

impl PgCacheStore {
    /// Open a small connection pool against `url`.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, CacheStoreError> {
        info!("Connecting to cache database...");

        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(10))
            .connect(url)
            .await
            .map_err(|e| CacheStoreError::Unavailable(e.to_string()))?;

        info!("Cache database connection established");
        Ok(Self { pool })
    }

    /// Create the cache table when it does not exist yet.
    pub async fn ensure_schema(&self) -> Result<(), CacheStoreError> {
        sqlx::query(CREATE_TABLE)
            .execute(&self.pool)
            .await
            .map_err(|e| CacheStoreError::Unavailable(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl CacheBackend for PgCacheStore {
    async fn select(&self, key: &str) -> Result<Option<CacheEntry>, CacheStoreError> {
        let row = sqlx::query_as::<_, CacheRow>(
            "SELECT key, data, fetched_at, expires_at FROM cache WHERE key = $1",
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| CacheStoreError::Read {
            key: key.to_string(),
            message: e.to_string(),
        })?;

        Ok(row.map(CacheEntry::from))
    }

    async fn upsert(&self, entry: CacheEntry) -> Result<(), CacheStoreError> {
        sqlx::query(
            r#"
            INSERT INTO cache (key, data, fetched_at, expires_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (key) DO UPDATE SET
                data = EXCLUDED.data,
                fetched_at = EXCLUDED.fetched_at,
                expires_at = EXCLUDED.expires_at
            "#,
        )
        .bind(&entry.key)
        .bind(Json(&entry.payload))
        .bind(entry.fetched_at)
        .bind(entry.expires_at)
        .execute(&self.pool)
        .await
        .map_err(|e| CacheStoreError::Write {
            key: entry.key.clone(),
            message: e.to_string(),
        })?;

        Ok(())
    }

    fn name(&self) -> &str {
        "postgres"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, 0).unwrap()
    }

    #[test]
    fn test_row_maps_to_entry() {
        let row = CacheRow {
            key: "etf-data".to_string(),
            data: Json(json!({"items": [{"ticker": "SPY"}]})),
            fetched_at: at(1_700_000_000),
            expires_at: at(1_700_001_800),
        };

        let entry = CacheEntry::from(row);
        assert_eq!(entry.key, "etf-data");
        assert_eq!(entry.payload["items"][0]["ticker"], "SPY");
        assert!(entry.is_fresh(at(1_700_001_799)));
        assert!(!entry.is_fresh(at(1_700_001_800)));
    }

    /// Needs a reachable Postgres in `DATABASE_URL`.
    #[tokio::test]
    #[ignore]
    async fn test_upsert_then_select_round_trip() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL not set");
        let store = PgCacheStore::connect(&url, 1).await.unwrap();
        store.ensure_schema().await.unwrap();

        let key = format!("pulse-test-{}", std::process::id());
        assert!(store.select(&key).await.unwrap().is_none());

        let first = CacheEntry::new(
            key.as_str(),
            json!([1, 2, 3]),
            at(1_700_000_000),
            chrono::Duration::minutes(30),
        );
        store.upsert(first).await.unwrap();

        let second = CacheEntry::new(
            key.as_str(),
            json!({"items": []}),
            at(1_700_000_600),
            chrono::Duration::minutes(15),
        );
        store.upsert(second.clone()).await.unwrap();

        let stored = store.select(&key).await.unwrap().unwrap();
        assert_eq!(stored.payload, second.payload);
        assert_eq!(stored.fetched_at, second.fetched_at);
        assert_eq!(stored.expires_at, second.expires_at);

        sqlx::query("DELETE FROM cache WHERE key = $1")
            .bind(&key)
            .execute(&store.pool)
            .await
            .unwrap();
    }
}
