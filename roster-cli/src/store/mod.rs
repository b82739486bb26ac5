//! Persistence for validated user records

mod memory;
mod sqlite;

use async_trait::async_trait;
use thiserror::Error;

use crate::records::Record;

pub use memory::MemoryUserStore;
pub use sqlite::SqliteUserStore;

/// Errors raised by a [`UserStore`]
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Storage collaborator for the ingestion pipeline
///
/// `save_batch` writes one upload's records in a single call; whether that
/// call is atomic is up to the implementation. No uniqueness is enforced on
/// `id` or `email`.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn save_batch(&self, records: &[Record]) -> Result<(), StoreError>;

    /// Every stored record, in storage order
    async fn find_all(&self) -> Result<Vec<Record>, StoreError>;
}
