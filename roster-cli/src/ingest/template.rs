//! Write an empty upload template containing only the header row

use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::{Format, Workbook};

use crate::records::RecordSchema;

const SHEET_NAME: &str = "Users";

/// Build the template workbook in memory
pub fn template_bytes(schema: &RecordSchema) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    let bold = Format::new().set_bold();
    for (col, name) in schema.columns().iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, name, &bold)?;
        worksheet.set_column_width(col as u16, 24)?;
    }

    workbook
        .save_to_buffer()
        .context("Failed to build template workbook")
}

/// Write the template workbook to `path`
pub fn write_template(schema: &RecordSchema, path: &Path) -> Result<()> {
    let bytes = template_bytes(schema)?;
    std::fs::write(path, bytes)
        .with_context(|| format!("Failed to save Excel file: {}", path.display()))?;

    log::info!("Template written to: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::error::ValidationError;
    use crate::ingest::workbook::read_first_sheet;
    use crate::ingest::validate;

    #[test]
    fn test_template_has_schema_headers() {
        let bytes = template_bytes(&RecordSchema::users()).unwrap();
        let rows = read_first_sheet(&bytes).unwrap();
        assert_eq!(rows.headers, vec!["id", "name", "email"]);
        assert!(rows.rows.is_empty());
    }

    #[test]
    fn test_blank_template_has_no_data() {
        let bytes = template_bytes(&RecordSchema::users()).unwrap();
        assert_eq!(validate(&bytes), Err(ValidationError::EmptyFile));
    }
}
