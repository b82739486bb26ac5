//! In-process user store

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::{StoreError, UserStore};
use crate::records::Record;

/// Keeps records in a `Vec` and counts batch writes
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    records: Mutex<Vec<Record>>,
    batches: AtomicUsize,
    failure: Option<String>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose writes always fail with `message`
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::default()
        }
    }

    /// Number of `save_batch` calls received, failed ones included
    pub fn batch_count(&self) -> usize {
        self.batches.load(Ordering::SeqCst)
    }

    pub fn records(&self) -> Vec<Record> {
        self.records
            .lock()
            .map(|records| records.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn save_batch(&self, records: &[Record]) -> Result<(), StoreError> {
        self.batches.fetch_add(1, Ordering::SeqCst);

        if let Some(message) = &self.failure {
            return Err(StoreError::Unavailable(message.clone()));
        }

        let mut stored = self
            .records
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store poisoned".to_string()))?;
        stored.extend_from_slice(records);

        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<Record>, StoreError> {
        self.records
            .lock()
            .map(|records| records.clone())
            .map_err(|_| StoreError::Unavailable("memory store poisoned".to_string()))
    }
}
