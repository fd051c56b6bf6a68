//! Local CSV file used as the sales sheet.

use super::{MemorySheet, Record, SheetSnapshot, SheetStore, check_cell};
use crate::errors::{AppError, AppResult};
use std::path::PathBuf;

/// CSV-backed sheet. The file is rewritten after every cell write, so each
/// update is durable on its own.
pub struct CsvSheet {
    path: PathBuf,
    grid: MemorySheet,
}

impl CsvSheet {
    pub fn open(path: impl Into<PathBuf>) -> AppResult<Self> {
        let path = path.into();
        if !path.exists() {
            return Err(AppError::StoreRead(format!(
                "sheet file not found: {}",
                path.display()
            )));
        }

        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(&path)?;

        let mut rows = Vec::new();
        for rec in rdr.records() {
            let rec = rec?;
            rows.push(rec.iter().map(str::to_string).collect());
        }

        Ok(Self {
            path,
            grid: MemorySheet::new(rows),
        })
    }

    pub fn grid(&self) -> &MemorySheet {
        &self.grid
    }

    fn persist(&self) -> Result<(), csv::Error> {
        let mut wtr = csv::WriterBuilder::new()
            .flexible(true)
            .from_path(&self.path)?;
        for row in self.grid.rows() {
            wtr.write_record(row)?;
        }
        wtr.flush()?;
        Ok(())
    }
}

impl SheetStore for CsvSheet {
    fn headers(&mut self) -> AppResult<Vec<String>> {
        self.grid.headers()
    }

    fn records(&mut self) -> AppResult<Vec<Record>> {
        self.grid.records()
    }

    fn write_cell(&mut self, row: usize, column: usize, value: &str) -> AppResult<()> {
        check_cell(row, column)?;
        self.grid.set(row, column, value);
        self.persist().map_err(|e| AppError::StoreWrite {
            row,
            column,
            reason: e.to_string(),
        })
    }

    fn snapshot(&mut self) -> AppResult<SheetSnapshot> {
        self.grid.snapshot()
    }
}
