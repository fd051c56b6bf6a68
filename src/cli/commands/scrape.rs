use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::extract::RowExtractor;
use crate::core::report::events_table;
use crate::core::session::{SessionScraper, all_events};
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::export::export_events;
use crate::models::Event;
use crate::portal::{HttpPortal, Readiness};
use crate::ui::messages::{header, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::Duration;

/// Credentials, sign-in and extraction for every configured account.
/// Returns the number of accounts and the events in account order.
pub(crate) fn collect_events(cfg: &Config, conn: &Connection) -> AppResult<(usize, Vec<Event>)> {
    // Resolve everything that can fail on configuration before logging in
    let credentials = cfg.credentials()?;
    let extractor = RowExtractor::new(&cfg.listing)?;
    let mut portal = HttpPortal::new(&cfg.portal)?;

    let readiness = Readiness::new(
        Duration::from_secs(cfg.portal.ready_timeout_secs),
        Duration::from_millis(cfg.portal.poll_interval_ms),
    );
    let delay = Duration::from_secs(cfg.portal.session_delay_secs);

    let outcomes =
        SessionScraper::new(&mut portal, &extractor, readiness, delay).run(&credentials)?;

    for o in &outcomes {
        let mut message = format!("{} events, {} rows skipped", o.events.len(), o.skipped);
        if !o.ready {
            message.push_str(", listing not ready");
        }
        ttlog(conn, "session", &o.user, &message)?;
    }

    Ok((credentials.len(), all_events(&outcomes)))
}

/// Print events as a table, or as JSON.
pub(crate) fn print_events(events: &[Event], json: bool) -> AppResult<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(events)?);
    } else if events.is_empty() {
        info("No events found.");
    } else {
        print!("{}", events_table(events).render());
    }
    Ok(())
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Scrape {
        json,
        format,
        file,
        force,
    } = cmd
    {
        let pool = DbPool::new(&cfg.database)?;

        header("Scraping box-office sessions");
        let (_, events) = collect_events(cfg, &pool.conn)?;

        print_events(&events, *json)?;

        if let (Some(format), Some(file)) = (format, file) {
            export_events(&events, *format, Path::new(file), *force)?;
            ttlog(
                &pool.conn,
                "export",
                format.as_str(),
                &format!("{} events exported to {}", events.len(), file),
            )?;
        }
    }
    Ok(())
}
