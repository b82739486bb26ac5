//! Spreadsheet user-record ingestion
//!
//! Validates uploaded `.xlsx` workbooks against a fixed column contract and
//! stores their rows as one batch. The [`ingest`] module holds the pipeline;
//! [`server`] and [`cli`] are thin front ends over it.

pub mod cli;
pub mod config;
pub mod ingest;
pub mod records;
pub mod server;
pub mod store;

#[cfg(test)]
mod test_support;

pub use config::Config;
pub use ingest::{IngestError, Ingestor, UploadSummary, ValidationError, validate};
pub use records::{Record, RecordSchema};
pub use store::{MemoryUserStore, SqliteUserStore, StoreError, UserStore};
