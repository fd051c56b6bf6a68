use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::reconcile::{ColumnIndex, Reconciler};
use crate::core::report::RunReport;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::runs::{RunSummary, insert_run};
use crate::errors::{AppError, AppResult};
use crate::models::Event;
use crate::store::{self, SheetStore};
use crate::ui::messages::{header, info, success, warning};
use rusqlite::Connection;
use std::fs;

/// How a reconciliation pass is recorded and reported.
pub(crate) struct PassOptions<'a> {
    pub command: &'a str,
    pub accounts: usize,
    pub dry_run: bool,
    pub json: bool,
}

/// Open the sheet and check it carries every column the pass writes.
/// Fails before any login or matching work.
pub(crate) fn open_checked_sheet(
    cfg: &Config,
    path_override: Option<&str>,
) -> AppResult<Box<dyn SheetStore>> {
    let mut sheet = store::open(&cfg.sheet, path_override)?;
    ColumnIndex::resolve(&sheet.headers()?, &cfg.reconcile.columns)?;
    Ok(sheet)
}

/// Plan, apply and report one pass of `events` against `sheet`.
///
/// The snapshot is taken here, when the pass starts.
pub(crate) fn reconcile_into_sheet(
    cfg: &Config,
    conn: &Connection,
    sheet: &mut dyn SheetStore,
    events: &[Event],
    opts: &PassOptions<'_>,
) -> AppResult<RunReport> {
    let snapshot = sheet.snapshot()?;

    let reconciler = Reconciler::new(&cfg.reconcile);
    let plan = reconciler.plan(events, &snapshot)?;

    if !opts.dry_run {
        let applied = reconciler.apply(&plan, sheet, |update, event| {
            if let Err(e) = ttlog(
                conn,
                "update",
                &event.title,
                &format!("row {} sold={} ({})", update.row, update.sold, event.date),
            ) {
                warning(format!("Failed to write internal log: {}", e));
            }
        });

        if let Err(e) = applied {
            ttlog(conn, opts.command, "failed", &e.to_string())?;
            return Err(e);
        }
    }

    for ev in &plan.unmatched {
        ttlog(
            conn,
            "unmatched",
            &ev.title,
            &format!("{} {} ({})", ev.date, ev.time, ev.source_user),
        )?;
    }

    let report = RunReport::build(events.len(), &plan);

    let mut run = RunSummary::new(opts.command);
    run.accounts = opts.accounts;
    run.scraped = events.len();
    run.updated = plan.updates.len();
    run.unmatched = plan.unmatched.len();
    run.dry_run = opts.dry_run;
    insert_run(conn, &run)?;

    ttlog(
        conn,
        opts.command,
        if opts.dry_run { "dry-run" } else { "sheet" },
        &format!(
            "{} events, {} rows updated, {} unmatched",
            run.scraped, run.updated, run.unmatched
        ),
    )?;

    if opts.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        header("Reconciliation report");
        print!("{}", report.render());
        if opts.dry_run {
            info("Dry run: the sheet was not modified.");
        } else {
            success(format!("{} rows updated.", plan.updates.len()));
        }
    }

    Ok(report)
}

/// Read events previously exported as JSON.
pub(crate) fn load_events(path: &str) -> AppResult<Vec<Event>> {
    let content = fs::read_to_string(path)
        .map_err(|e| AppError::Other(format!("cannot read events file {path}: {e}")))?;
    Ok(serde_json::from_str(&content)?)
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Reconcile {
        events,
        sheet,
        dry_run,
        json,
    } = cmd
    {
        let mut target = open_checked_sheet(cfg, sheet.as_deref())?;
        let pool = DbPool::new(&cfg.database)?;
        let loaded = load_events(events)?;

        let accounts = {
            let mut users: Vec<&str> = loaded.iter().map(|e| e.source_user.as_str()).collect();
            users.sort_unstable();
            users.dedup();
            users.len()
        };

        reconcile_into_sheet(
            cfg,
            &pool.conn,
            target.as_mut(),
            &loaded,
            &PassOptions {
                command: "reconcile",
                accounts,
                dry_run: *dry_run,
                json: *json,
            },
        )?;
    }
    Ok(())
}
