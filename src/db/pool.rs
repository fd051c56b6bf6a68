//! SQLite connection wrapper for the run log (lightweight for CLI usage).

use crate::db::migrate::run_pending_migrations;
use crate::ui::messages::warning;
use rusqlite::{Connection, Result};
use std::path::Path;

pub struct DbPool {
    pub conn: Connection,
}

impl DbPool {
    /// Open the run log, creating tables on first use.
    pub fn new(path: &str) -> Result<Self> {
        if let Some(dir) = Path::new(path).parent()
            && !dir.as_os_str().is_empty()
            && let Err(e) = std::fs::create_dir_all(dir)
        {
            warning(format!("Cannot create {}: {}", dir.display(), e));
        }

        let conn = Connection::open(Path::new(path))?;
        run_pending_migrations(&conn)?;
        Ok(Self { conn })
    }
}
