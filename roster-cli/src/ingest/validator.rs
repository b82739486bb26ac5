//! Validate uploaded workbooks against a [`RecordSchema`]

use crate::records::{EMAIL, ID, NAME, Record, RecordSchema};

use super::error::ValidationError;
use super::workbook::{RowSet, SheetRow, read_first_sheet};

/// How incomplete rows are reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationMode {
    /// Stop at the first incomplete row
    #[default]
    FailFast,
    /// Report every incomplete row at once
    CollectAll,
}

/// Stateless workbook validator
#[derive(Debug, Clone, Default)]
pub struct Validator {
    schema: RecordSchema,
    mode: ValidationMode,
}

impl Validator {
    pub fn new(schema: RecordSchema, mode: ValidationMode) -> Self {
        Self { schema, mode }
    }

    pub fn schema(&self) -> &RecordSchema {
        &self.schema
    }

    pub fn mode(&self) -> ValidationMode {
        self.mode
    }

    /// Parse `bytes` and return its records in sheet order
    pub fn validate(&self, bytes: &[u8]) -> Result<Vec<Record>, ValidationError> {
        let rows = match read_first_sheet(bytes) {
            Ok(rows) => rows,
            Err(issue) => {
                log::warn!("Rejecting upload as empty: {}", issue);
                return Err(ValidationError::EmptyFile);
            }
        };

        self.validate_rows(&rows)
    }

    /// Validate rows that were already read from a sheet
    pub fn validate_rows(&self, rows: &RowSet) -> Result<Vec<Record>, ValidationError> {
        if rows.is_empty() {
            return Err(ValidationError::EmptyFile);
        }

        log::debug!("Sheet headers: {:?}", rows.headers);

        if !self.schema.matches_headers(&rows.headers) {
            return Err(ValidationError::HeaderMismatch {
                expected: self.schema.columns().to_vec(),
                received: rows.headers.clone(),
            });
        }

        let mut records = Vec::with_capacity(rows.rows.len());
        let mut incomplete = Vec::new();

        for row in &rows.rows {
            if !self.is_complete(row) {
                match self.mode {
                    ValidationMode::FailFast => {
                        return Err(ValidationError::RowIncomplete { row: row.number });
                    }
                    ValidationMode::CollectAll => {
                        incomplete.push(row.number);
                        continue;
                    }
                }
            }

            records.push(self.to_record(row));
        }

        match incomplete.len() {
            0 => Ok(records),
            1 => Err(ValidationError::RowIncomplete { row: incomplete[0] }),
            _ => Err(ValidationError::RowsIncomplete { rows: incomplete }),
        }
    }

    // Schema columns line up with the leading header positions once the
    // header check has passed.
    fn is_complete(&self, row: &SheetRow) -> bool {
        (0..self.schema.len()).all(|col| row.cell(col).is_present())
    }

    fn to_record(&self, row: &SheetRow) -> Record {
        let value = |column: &str| {
            self.schema
                .columns()
                .iter()
                .position(|c| c == column)
                .map(|col| row.cell(col).text)
                .unwrap_or_default()
        };

        Record::new(value(ID), value(NAME), value(EMAIL))
    }
}

/// Validate `bytes` against the user schema, stopping at the first bad row
pub fn validate(bytes: &[u8]) -> Result<Vec<Record>, ValidationError> {
    Validator::default().validate(bytes)
}
