//! Read an uploaded workbook, validate it, and persist it as one batch

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::error::IngestError;
use super::validator::Validator;
use crate::records::Record;
use crate::store::UserStore;

pub const SUCCESS_MESSAGE: &str = "File uploaded successfully.";

/// Result of a successful upload, returned to the client as-is
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadSummary {
    pub message: String,
    pub count: usize,
}

impl UploadSummary {
    fn uploaded(count: usize) -> Self {
        Self {
            message: SUCCESS_MESSAGE.to_string(),
            count,
        }
    }
}

/// Knobs for the ingestion pipeline
#[derive(Debug, Clone, Default)]
pub struct IngestOptions {
    /// Remove the uploaded file once it has been processed
    pub delete_uploads: bool,
}

/// Runs read → validate → persist for one upload at a time
#[derive(Clone)]
pub struct Ingestor {
    store: Arc<dyn UserStore>,
    validator: Validator,
    options: IngestOptions,
}

impl Ingestor {
    pub fn new(store: Arc<dyn UserStore>, validator: Validator, options: IngestOptions) -> Self {
        Self {
            store,
            validator,
            options,
        }
    }

    /// Ingestor with the default user schema, fail-fast validation, and no cleanup
    pub fn with_store(store: Arc<dyn UserStore>) -> Self {
        Self::new(store, Validator::default(), IngestOptions::default())
    }

    pub fn validator(&self) -> &Validator {
        &self.validator
    }

    /// Ingest the workbook stored at `upload`
    ///
    /// Nothing is written unless every row validates; the records are then
    /// handed to the store in a single `save_batch` call.
    pub async fn ingest(&self, upload: &Path) -> Result<UploadSummary, IngestError> {
        log::info!("Ingesting upload: {}", upload.display());

        let result = self.read_and_save(upload).await;

        if self.options.delete_uploads {
            if let Err(e) = tokio::fs::remove_file(upload).await {
                log::warn!("Failed to remove upload {}: {}", upload.display(), e);
            }
        }

        match &result {
            Ok(summary) => log::info!(
                "Stored {} users from {}",
                summary.count,
                upload.display()
            ),
            Err(e) => log::info!("Rejected upload {}: {}", upload.display(), e),
        }

        result
    }

    async fn read_and_save(&self, upload: &Path) -> Result<UploadSummary, IngestError> {
        let bytes = tokio::fs::read(upload)
            .await
            .map_err(|source| IngestError::Read {
                path: upload.to_path_buf(),
                source,
            })?;

        let records = self.validator.validate(&bytes)?;
        self.store.save_batch(&records).await?;

        Ok(UploadSummary::uploaded(records.len()))
    }

    /// Every stored record, unfiltered and unpaginated
    pub async fn list_all(&self) -> Result<Vec<Record>, IngestError> {
        Ok(self.store.find_all().await?)
    }
}
