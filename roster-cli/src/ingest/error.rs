//! Error types for spreadsheet validation and ingestion

use std::path::PathBuf;

use thiserror::Error;

use crate::store::StoreError;

/// Why an uploaded workbook was rejected
///
/// Every message is shown to the uploader as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("The file has no data.")]
    EmptyFile,

    #[error("Headers must be: {}. Received: {}", quoted(.expected), .received.join(", "))]
    HeaderMismatch {
        expected: Vec<String>,
        received: Vec<String>,
    },

    /// `row` is the 1-based spreadsheet row number
    #[error("Row {row}: Empty value found in one or more required fields.")]
    RowIncomplete { row: usize },

    /// Every incomplete row, reported when validation collects all errors
    #[error("{}", joined_rows(.rows))]
    RowsIncomplete { rows: Vec<usize> },
}

impl ValidationError {
    /// Client-facing messages, one per problem
    pub fn messages(&self) -> Vec<String> {
        match self {
            ValidationError::RowsIncomplete { rows } => {
                rows.iter().map(|r| row_message(*r)).collect()
            }
            other => vec![other.to_string()],
        }
    }
}

fn row_message(row: usize) -> String {
    format!("Row {}: Empty value found in one or more required fields.", row)
}

fn joined_rows(rows: &[usize]) -> String {
    rows.iter()
        .map(|r| row_message(*r))
        .collect::<Vec<_>>()
        .join("; ")
}

fn quoted(labels: &[String]) -> String {
    labels
        .iter()
        .map(|l| format!("'{}'", l))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Failure anywhere in the read → validate → persist chain
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Failed to read upload {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl IngestError {
    /// True for problems with the uploaded content rather than the service
    pub fn is_client_error(&self) -> bool {
        matches!(self, IngestError::Validation(_))
    }

    pub fn messages(&self) -> Vec<String> {
        match self {
            IngestError::Validation(err) => err.messages(),
            other => vec![other.to_string()],
        }
    }
}
