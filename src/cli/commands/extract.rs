use super::scrape::print_events;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::extract::RowExtractor;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::warning;
use scraper::Html;
use std::fs;

/// Offline extraction of a saved listing page; no login, no run log.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Extract { html, user, json } = cmd {
        let content = fs::read_to_string(html)
            .map_err(|e| AppError::Other(format!("cannot read listing {html}: {e}")))?;

        let extractor = RowExtractor::new(&cfg.listing)?;
        let page = Html::parse_document(&content);

        let mut events = Vec::new();
        for (n, result) in extractor.extract_page(&page).into_iter().enumerate() {
            match result {
                Ok(row) => events.push(row.tagged(user)),
                Err(reason) if reason.is_structural() => {}
                Err(reason) => warning(format!("Row {} skipped: {}", n + 1, reason)),
            }
        }

        print_events(&events, *json)?;
    }
    Ok(())
}
