//! Unified application error type.
//! All modules (portal, store, core, cli, db) return AppError to keep the
//! error handling consistent and easy to manage.
//!
//! Per-row extraction problems are NOT part of this enum: they are reported
//! through `core::extract::ExtractionSkipped` and never abort a run.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Run log database
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    // ---------------------------
    // Serialization
    // ---------------------------
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    // ---------------------------
    // Configuration: missing credential, missing sheet column, bad backend
    // ---------------------------
    #[error("Configuration error: {0}")]
    Configuration(String),

    // ---------------------------
    // Portal sessions
    // ---------------------------
    #[error("Session error for {user}: {reason}")]
    Session { user: String, reason: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    // ---------------------------
    // Tabular store
    // ---------------------------
    #[error("Sheet read error: {0}")]
    StoreRead(String),

    #[error("Sheet write error at row {row}, column {column}: {reason}")]
    StoreWrite {
        row: usize,
        column: usize,
        reason: String,
    },

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
