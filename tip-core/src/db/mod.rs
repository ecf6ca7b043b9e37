//! Document Store
//!
//! The payment history lives in an external key/value document store.
//! [`DocumentStore`] is the seam: whole-document writes keyed by
//! `(collection, id)`, and one query shape: order by a single field,
//! limit N.
//!
//! Backends:
//! - [`MemoryDocumentStore`]: in-process, for tests and embedding
//! - [`SqliteDocumentStore`]: SQLite file (WAL), JSON bodies

pub mod memory;
pub mod sqlite;

pub use memory::MemoryDocumentStore;
pub use sqlite::SqliteDocumentStore;

use async_trait::async_trait;
use serde_json::{Map, Value};
use shared::ErrorCode;
use thiserror::Error;

/// A stored document: field name → JSON value
pub type Document = Map<String, Value>;

/// Store error types
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Encode error: {0}")]
    Encode(String),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),
}

impl StoreError {
    pub fn code(&self) -> ErrorCode {
        match self {
            StoreError::Database(_) | StoreError::InvalidQuery(_) => ErrorCode::StoreError,
            StoreError::Encode(_) => ErrorCode::StoreDecodeError,
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Database(err.to_string())
    }
}

impl From<sqlx::migrate::MigrateError> for StoreError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        StoreError::Database(format!("Failed to apply migrations: {err}"))
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Encode(err.to_string())
    }
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

impl Direction {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Direction::Ascending => "ASC",
            Direction::Descending => "DESC",
        }
    }
}

/// Unfiltered query: order by one field, then limit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub order_by: String,
    pub direction: Direction,
    pub limit: usize,
}

impl Query {
    /// Order by `field` with no effective limit
    pub fn order_by(field: impl Into<String>, direction: Direction) -> Self {
        Self {
            order_by: field.into(),
            direction,
            limit: usize::MAX,
        }
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Field names are restricted to `[A-Za-z0-9_]` so backends can embed
    /// them in query paths
    pub fn validate(&self) -> StoreResult<()> {
        let valid = !self.order_by.is_empty()
            && self
                .order_by
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !valid {
            return Err(StoreError::InvalidQuery(format!(
                "unsupported order field: {:?}",
                self.order_by
            )));
        }
        Ok(())
    }
}

/// External document store
///
/// Each call is a single attempt; implementations do not retry and impose
/// no timeouts of their own.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Create or overwrite the document `id` in `collection`
    async fn set(&self, collection: &str, id: &str, document: Document) -> StoreResult<()>;

    /// Run `query` over every document in `collection`
    ///
    /// Documents lacking the order field sort as the smallest value.
    async fn query(&self, collection: &str, query: &Query) -> StoreResult<Vec<Document>>;
}
