use super::{Record, SheetSnapshot, SheetStore, check_cell};
use crate::errors::AppResult;

/// Sheet held entirely in memory. Also the grid behind [`super::CsvSheet`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemorySheet {
    rows: Vec<Vec<String>>,
}

impl MemorySheet {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    /// Convenience constructor from string slices.
    pub fn from_strs(rows: &[&[&str]]) -> Self {
        Self::new(
            rows.iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        )
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Cell value at 1-based (row, column); `None` outside the grid.
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        if row == 0 || column == 0 {
            return None;
        }
        self.rows
            .get(row - 1)
            .and_then(|r| r.get(column - 1))
            .map(String::as_str)
    }

    pub(crate) fn set(&mut self, row: usize, column: usize, value: &str) {
        if self.rows.len() < row {
            self.rows.resize_with(row, Vec::new);
        }
        let r = &mut self.rows[row - 1];
        if r.len() < column {
            r.resize(column, String::new());
        }
        r[column - 1] = value.to_string();
    }
}

impl SheetStore for MemorySheet {
    fn headers(&mut self) -> AppResult<Vec<String>> {
        Ok(SheetSnapshot::from_rows(&self.rows).headers)
    }

    fn records(&mut self) -> AppResult<Vec<Record>> {
        Ok(SheetSnapshot::from_rows(&self.rows).records)
    }

    fn write_cell(&mut self, row: usize, column: usize, value: &str) -> AppResult<()> {
        check_cell(row, column)?;
        self.set(row, column, value);
        Ok(())
    }

    fn snapshot(&mut self) -> AppResult<SheetSnapshot> {
        Ok(SheetSnapshot::from_rows(&self.rows))
    }
}
