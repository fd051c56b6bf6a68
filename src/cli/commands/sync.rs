use super::reconcile::{PassOptions, open_checked_sheet, reconcile_into_sheet};
use super::scrape::collect_events;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::header;

/// Scrape every account, then reconcile into the sheet.
///
/// The sheet is opened and its columns checked before the first login.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Sync {
        dry_run,
        sheet,
        json,
    } = cmd
    {
        let mut target = open_checked_sheet(cfg, sheet.as_deref())?;
        let pool = DbPool::new(&cfg.database)?;

        header("Scraping box-office sessions");
        let (accounts, events) = collect_events(cfg, &pool.conn)?;

        reconcile_into_sheet(
            cfg,
            &pool.conn,
            target.as_mut(),
            &events,
            &PassOptions {
                command: "sync",
                accounts,
                dry_run: *dry_run,
                json: *json,
            },
        )?;
    }
    Ok(())
}
