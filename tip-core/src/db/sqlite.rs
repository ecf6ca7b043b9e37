//! SQLite document store
//!
//! One `documents` table holds every collection; bodies are JSON text and
//! ordering runs through `json_extract`.

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};

use super::{Document, DocumentStore, Query, StoreError, StoreResult};

#[derive(Clone)]
pub struct SqliteDocumentStore {
    pool: SqlitePool,
}

impl SqliteDocumentStore {
    /// Open (or create) the database file in WAL mode and apply migrations
    pub async fn open(db_path: &str) -> StoreResult<Self> {
        let options = SqliteConnectOptions::from_str(&format!("sqlite:{db_path}"))
            .map_err(|e| StoreError::Database(format!("Invalid database path: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .optimize_on_close(true, None);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(|e| StoreError::Database(format!("Failed to open database: {e}")))?;

        // busy_timeout: wait on write contention instead of failing
        sqlx::query("PRAGMA busy_timeout = 5000;")
            .execute(&pool)
            .await?;

        tracing::info!(path = %db_path, "Document store opened (SQLite WAL)");
        Self::from_pool(pool).await
    }

    /// Wrap an existing pool, applying migrations
    pub async fn from_pool(pool: SqlitePool) -> StoreResult<Self> {
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::debug!("Document store migrations applied");
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl DocumentStore for SqliteDocumentStore {
    async fn set(&self, collection: &str, id: &str, document: Document) -> StoreResult<()> {
        let body = serde_json::to_string(&document)?;
        let now = shared::util::now_millis();

        sqlx::query(
            "INSERT INTO documents (collection, id, body, updated_at) VALUES (?1, ?2, ?3, ?4) \
             ON CONFLICT(collection, id) DO UPDATE SET body = excluded.body, updated_at = excluded.updated_at",
        )
        .bind(collection)
        .bind(id)
        .bind(body)
        .bind(now)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn query(&self, collection: &str, query: &Query) -> StoreResult<Vec<Document>> {
        query.validate()?;

        // Invalid JSON bodies order as NULL (lowest) and are dropped below
        let sql = format!(
            "SELECT id, body FROM documents WHERE collection = ?1 \
             ORDER BY CASE WHEN json_valid(body) THEN json_extract(body, ?2) END {} \
             LIMIT ?3",
            query.direction.as_sql()
        );
        let limit = i64::try_from(query.limit).unwrap_or(i64::MAX);

        let rows = sqlx::query_as::<_, (String, String)>(&sql)
            .bind(collection)
            .bind(format!("$.{}", query.order_by))
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        let docs = rows
            .into_iter()
            .filter_map(|(id, body)| match serde_json::from_str::<Document>(&body) {
                Ok(doc) => Some(doc),
                Err(e) => {
                    tracing::warn!(collection = %collection, id = %id, error = %e, "Skipping unreadable document");
                    None
                }
            })
            .collect();
        Ok(docs)
    }
}
