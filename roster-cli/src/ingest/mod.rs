//! Spreadsheet validation and ingestion pipeline
//!
//! Uploads flow through three steps, each aborting the whole upload on error:
//! 1. read the stored file
//! 2. validate the first sheet against the [`crate::records::RecordSchema`]
//! 3. persist every record in one batch

pub mod error;
pub mod orchestrator;
pub mod template;
pub mod validator;
pub mod workbook;

pub use error::{IngestError, ValidationError};
pub use orchestrator::{IngestOptions, Ingestor, SUCCESS_MESSAGE, UploadSummary};
pub use template::{template_bytes, write_template};
pub use validator::{ValidationMode, Validator, validate};
pub use workbook::{Cell, RowSet, SheetRow, read_first_sheet};
