//! Per-run summaries in the `runs` table.

use crate::errors::AppResult;
use chrono::Local;
use rusqlite::{Connection, Row, params};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub id: i64,
    pub started_at: String,
    pub command: String,
    pub accounts: usize,
    pub scraped: usize,
    pub updated: usize,
    pub unmatched: usize,
    pub dry_run: bool,
}

impl RunSummary {
    pub fn new(command: &str) -> Self {
        Self {
            id: 0,
            started_at: Local::now().to_rfc3339(),
            command: command.to_string(),
            accounts: 0,
            scraped: 0,
            updated: 0,
            unmatched: 0,
            dry_run: false,
        }
    }
}

fn map_run(row: &Row) -> rusqlite::Result<RunSummary> {
    Ok(RunSummary {
        id: row.get(0)?,
        started_at: row.get(1)?,
        command: row.get(2)?,
        accounts: row.get::<_, i64>(3)? as usize,
        scraped: row.get::<_, i64>(4)? as usize,
        updated: row.get::<_, i64>(5)? as usize,
        unmatched: row.get::<_, i64>(6)? as usize,
        dry_run: row.get::<_, i64>(7)? != 0,
    })
}

/// Store a finished run; returns its id.
pub fn insert_run(conn: &Connection, run: &RunSummary) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO runs (started_at, command, accounts, scraped, updated, unmatched, dry_run)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            run.started_at,
            run.command,
            run.accounts as i64,
            run.scraped as i64,
            run.updated as i64,
            run.unmatched as i64,
            run.dry_run as i64,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Most recent runs first.
pub fn load_runs(conn: &Connection, limit: usize) -> AppResult<Vec<RunSummary>> {
    let mut stmt = conn.prepare(
        "SELECT id, started_at, command, accounts, scraped, updated, unmatched, dry_run
         FROM runs ORDER BY id DESC LIMIT ?1",
    )?;

    let runs = stmt
        .query_map([limit as i64], map_run)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(runs)
}
