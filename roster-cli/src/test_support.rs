//! Workbook fixtures for unit tests

use rust_xlsxwriter::Workbook;

/// Build `.xlsx` bytes with one sheet; empty strings leave the cell blank
pub fn workbook(rows: &[&[&str]]) -> Vec<u8> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (row, values) in rows.iter().enumerate() {
        for (col, value) in values.iter().enumerate() {
            if value.is_empty() {
                continue;
            }
            worksheet
                .write_string(row as u32, col as u16, *value)
                .unwrap();
        }
    }

    workbook.save_to_buffer().unwrap()
}
