//! Shared fixtures for integration tests

#![allow(dead_code)]

use std::path::PathBuf;

use rust_xlsxwriter::{Workbook, Worksheet};
use tempfile::TempDir;

/// A cell value for fixture sheets
pub enum Cell<'a> {
    Text(&'a str),
    Number(f64),
    Bool(bool),
    Blank,
}

fn write_cell(ws: &mut Worksheet, row: u32, col: u16, cell: &Cell) {
    match cell {
        Cell::Text(s) if s.is_empty() => {}
        Cell::Text(s) => {
            ws.write_string(row, col, *s).unwrap();
        }
        Cell::Number(n) => {
            ws.write_number(row, col, *n).unwrap();
        }
        Cell::Bool(b) => {
            ws.write_boolean(row, col, *b).unwrap();
        }
        Cell::Blank => {}
    }
}

/// `.xlsx` bytes for a single sheet of text cells (empty strings stay blank)
pub fn workbook(rows: &[&[&str]]) -> Vec<u8> {
    let rows: Vec<Vec<Cell>> = rows
        .iter()
        .map(|r| r.iter().map(|s| Cell::Text(*s)).collect())
        .collect();
    workbook_cells(&rows)
}

/// `.xlsx` bytes for a single sheet of mixed cells
pub fn workbook_cells(rows: &[Vec<Cell>]) -> Vec<u8> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (r, cells) in rows.iter().enumerate() {
        for (c, cell) in cells.iter().enumerate() {
            write_cell(worksheet, r as u32, c as u16, cell);
        }
    }

    workbook.save_to_buffer().unwrap()
}

/// Write `bytes` to a fresh temp dir and return the dir guard and file path
pub fn upload(bytes: &[u8]) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("upload.xlsx");
    std::fs::write(&path, bytes).unwrap();
    (dir, path)
}
