//! Tabular store collaborators (the sales spreadsheet).
//!
//! Rows and columns are 1-based. Row 1 is the header row; data starts at
//! row 2. There is no batch write: every cell update is its own call, so an
//! interrupted pass leaves the sheet partially updated.

pub mod csv_sheet;
pub mod memory;
pub mod sheets_api;

use crate::config::{SheetBackend, SheetConfig};
use crate::errors::{AppError, AppResult};
use crate::utils::path::expand_tilde;
use std::collections::HashMap;

pub use csv_sheet::CsvSheet;
pub use memory::MemorySheet;
pub use sheets_api::SheetsApi;

/// One data row, keyed by header name.
pub type Record = HashMap<String, String>;

/// First data row number.
pub const FIRST_DATA_ROW: usize = 2;

/// Consistent read of the sheet taken before reconciliation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SheetSnapshot {
    pub headers: Vec<String>,
    pub records: Vec<Record>,
}

impl SheetSnapshot {
    /// Build from raw rows, the first one being the header row.
    pub fn from_rows(rows: &[Vec<String>]) -> Self {
        let Some((header, data)) = rows.split_first() else {
            return Self::default();
        };

        let headers: Vec<String> = header.to_vec();
        let records = data.iter().map(|row| to_record(&headers, row)).collect();

        Self { headers, records }
    }

    /// 1-based index of the column named exactly `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name).map(|i| i + 1)
    }

    /// Sheet row number of the record at `idx` in `records`.
    pub fn row_number(idx: usize) -> usize {
        idx + FIRST_DATA_ROW
    }
}

/// Map a raw row onto the headers. Values are kept verbatim; short rows read
/// as empty cells; with duplicate header names the leftmost column wins.
pub(crate) fn to_record(headers: &[String], row: &[String]) -> Record {
    let mut rec = Record::with_capacity(headers.len());
    for (i, h) in headers.iter().enumerate() {
        if h.is_empty() {
            continue;
        }
        let value = row.get(i).cloned().unwrap_or_default();
        rec.entry(h.clone()).or_insert(value);
    }
    rec
}

pub trait SheetStore {
    /// Header row, in column order.
    fn headers(&mut self) -> AppResult<Vec<String>>;

    /// All data rows, in row order (row 2 first).
    fn records(&mut self) -> AppResult<Vec<Record>>;

    /// Overwrite a single cell.
    fn write_cell(&mut self, row: usize, column: usize, value: &str) -> AppResult<()>;

    fn snapshot(&mut self) -> AppResult<SheetSnapshot> {
        Ok(SheetSnapshot {
            headers: self.headers()?,
            records: self.records()?,
        })
    }
}

pub(crate) fn check_cell(row: usize, column: usize) -> AppResult<()> {
    if row == 0 || column == 0 {
        return Err(AppError::StoreWrite {
            row,
            column,
            reason: "rows and columns are 1-based".to_string(),
        });
    }
    Ok(())
}

/// Open the configured sheet. A `path_override` always selects a local CSV
/// sheet, whatever the configured backend.
pub fn open(cfg: &SheetConfig, path_override: Option<&str>) -> AppResult<Box<dyn SheetStore>> {
    if let Some(p) = path_override {
        return Ok(Box::new(CsvSheet::open(expand_tilde(p))?));
    }

    match cfg.backend {
        SheetBackend::Csv => Ok(Box::new(CsvSheet::open(expand_tilde(&cfg.path))?)),
        SheetBackend::Google => Ok(Box::new(SheetsApi::from_config(cfg)?)),
    }
}
