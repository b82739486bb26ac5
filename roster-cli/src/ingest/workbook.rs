//! Turn raw `.xlsx` bytes into header-keyed rows
//!
//! Only the first sheet is read. Header labels come from the first row of
//! the sheet's used range and become the keys of every data row below it:
//! - an empty header cell is keyed `__EMPTY`, then `__EMPTY_1`, `__EMPTY_2`, ...
//! - a repeated label `x` is keyed `x_1`, `x_2`, ...
//! - rows where every cell is empty are skipped
//!
//! Data rows are numbered as if the header sat on row 1 and blank rows did
//! not exist: the n-th kept data row (0-based) is row `n + 2`.
//!
//! Missing cells are kept as empty cells so completeness checks see them.

use std::collections::{HashMap, HashSet};
use std::io::Cursor;

use calamine::{Data, Reader, Xlsx};

/// A single cell coerced to text, remembering whether its value was falsy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub text: String,
    falsy: bool,
}

impl Cell {
    pub fn empty() -> Self {
        Self {
            text: String::new(),
            falsy: true,
        }
    }

    /// Present means non-blank text and a value that is not zero/false/empty
    pub fn is_present(&self) -> bool {
        !self.falsy && !self.text.trim().is_empty()
    }
}

impl From<&Data> for Cell {
    fn from(data: &Data) -> Self {
        match data {
            Data::Empty => Cell::empty(),
            Data::String(s) => Cell {
                text: s.clone(),
                falsy: s.is_empty(),
            },
            Data::Int(i) => Cell {
                text: i.to_string(),
                falsy: *i == 0,
            },
            Data::Float(f) => {
                // Whole numbers render without a decimal part, like the sheet shows them
                let text = if f.fract() == 0.0 && f.is_finite() {
                    format!("{:.0}", f)
                } else {
                    f.to_string()
                };
                Cell {
                    text,
                    falsy: *f == 0.0 || f.is_nan(),
                }
            }
            Data::Bool(b) => Cell {
                text: b.to_string(),
                falsy: !*b,
            },
            Data::DateTime(dt) => Cell {
                text: format!("{}", dt),
                falsy: false,
            },
            Data::DateTimeIso(s) | Data::DurationIso(s) => Cell {
                text: s.clone(),
                falsy: s.is_empty(),
            },
            Data::Error(e) => Cell {
                text: format!("#ERROR: {:?}", e),
                falsy: true,
            },
        }
    }
}

/// One data row below the header
#[derive(Debug, Clone, PartialEq)]
pub struct SheetRow {
    /// Data index + 2, the row a client sees with the header on row 1
    pub number: usize,
    /// Cells aligned with [`RowSet::headers`]
    pub cells: Vec<Cell>,
}

impl SheetRow {
    /// Cell under the header at `col`, empty when the row is short
    pub fn cell(&self, col: usize) -> Cell {
        self.cells.get(col).cloned().unwrap_or_else(Cell::empty)
    }
}

/// Header keys plus the data rows of the first sheet
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RowSet {
    pub headers: Vec<String>,
    pub rows: Vec<SheetRow>,
}

impl RowSet {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Why a workbook could not be turned into rows
#[derive(Debug, Clone, PartialEq)]
pub enum WorkbookIssue {
    /// Zero bytes were supplied
    NoContent,
    /// The bytes are not a readable `.xlsx` workbook
    Unreadable(String),
    /// The workbook has no sheets
    NoSheets,
}

impl std::fmt::Display for WorkbookIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorkbookIssue::NoContent => write!(f, "no content"),
            WorkbookIssue::Unreadable(reason) => write!(f, "unreadable workbook: {}", reason),
            WorkbookIssue::NoSheets => write!(f, "workbook has no sheets"),
        }
    }
}

/// Parse `.xlsx` bytes and return the first sheet as a [`RowSet`]
///
/// An empty first sheet yields an empty `RowSet` with no headers.
pub fn read_first_sheet(bytes: &[u8]) -> Result<RowSet, WorkbookIssue> {
    if bytes.is_empty() {
        return Err(WorkbookIssue::NoContent);
    }

    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))
        .map_err(|e| WorkbookIssue::Unreadable(e.to_string()))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or(WorkbookIssue::NoSheets)?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| WorkbookIssue::Unreadable(format!("sheet '{}': {}", sheet_name, e)))?;

    if range.is_empty() {
        return Ok(RowSet::default());
    }

    let mut rows = range.rows();
    let headers = match rows.next() {
        Some(header_row) => header_keys(header_row),
        None => return Ok(RowSet::default()),
    };

    let data_rows = rows
        .filter(|row| !is_blank_row(row))
        .enumerate()
        .map(|(index, row)| SheetRow {
            // +1 for 1-based numbering, +1 for the header row
            number: index + 2,
            cells: (0..headers.len())
                .map(|col| row.get(col).map(Cell::from).unwrap_or_else(Cell::empty))
                .collect(),
        })
        .collect();

    Ok(RowSet {
        headers,
        rows: data_rows,
    })
}

fn is_blank_row(row: &[Data]) -> bool {
    row.iter().all(|cell| match cell {
        Data::Empty => true,
        Data::String(s) => s.is_empty(),
        _ => false,
    })
}

/// Build unique header keys from the header row
fn header_keys(row: &[Data]) -> Vec<String> {
    let mut used: HashSet<String> = HashSet::new();
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut keys = Vec::with_capacity(row.len());

    for cell in row {
        let label = Cell::from(cell).text;
        let base = if label.is_empty() {
            "__EMPTY".to_string()
        } else {
            label
        };

        let mut key = base.clone();
        if used.contains(&key) {
            let count = counts.entry(base.clone()).or_insert(0);
            // A generated suffix may itself be a label seen earlier
            while used.contains(&key) {
                *count += 1;
                key = format!("{}_{}", base, count);
            }
        }

        used.insert(key.clone());
        keys.push(key);
    }

    keys
}
