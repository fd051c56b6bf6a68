// src/export/mod.rs

mod fs_utils;
mod json_csv;
mod xlsx;

use crate::errors::AppResult;
use crate::models::Event;
use crate::ui::messages::success;
use clap::ValueEnum;
use std::path::Path;

/// Shared completion message for every export format.
pub(crate) fn notify_export_success(label: &str, path: &Path) {
    success(format!("{label} export completed: {}", path.display()));
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
    Xlsx,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Xlsx => "xlsx",
        }
    }
}

/// Column headers shared by CSV and XLSX output (same keys as the JSON sink).
pub(crate) fn get_headers() -> Vec<&'static str> {
    vec![
        "title",
        "date",
        "time",
        "sold",
        "available",
        "location",
        "sourceUser",
    ]
}

/// Write scraped events to `path` in the requested format.
///
/// An existing file is only replaced with `force` or after confirmation.
pub fn export_events(
    events: &[Event],
    format: ExportFormat,
    path: &Path,
    force: bool,
) -> AppResult<()> {
    fs_utils::ensure_writable(path, force)?;

    match format {
        ExportFormat::Csv => json_csv::export_csv(events, path),
        ExportFormat::Json => json_csv::export_json(events, path),
        ExportFormat::Xlsx => xlsx::export_xlsx(events, path),
    }
}
