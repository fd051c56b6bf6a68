//! Session scraper: one authenticated session per credential, strictly in
//! sequence, each one turning the listing page into tagged events.

use crate::core::extract::RowExtractor;
use crate::errors::AppResult;
use crate::models::Event;
use crate::portal::{Credential, Portal, Readiness, wait_until};
use crate::ui::messages::{info, warning};
use scraper::Html;
use std::thread;
use std::time::Duration;

/// What one credential's session produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOutcome {
    pub user: String,
    pub events: Vec<Event>,
    /// Rows dropped with a warning (structural header/spacer rows excluded).
    pub skipped: usize,
    /// False when the listing never showed a row before the readiness timeout.
    pub ready: bool,
}

pub struct SessionScraper<'a, P: Portal> {
    portal: &'a mut P,
    extractor: &'a RowExtractor,
    readiness: Readiness,
    session_delay: Duration,
}

impl<'a, P: Portal> SessionScraper<'a, P> {
    pub fn new(
        portal: &'a mut P,
        extractor: &'a RowExtractor,
        readiness: Readiness,
        session_delay: Duration,
    ) -> Self {
        Self {
            portal,
            extractor,
            readiness,
            session_delay,
        }
    }

    /// Scrape every credential in order.
    ///
    /// The first session error aborts the run: results from sessions that
    /// already completed are dropped with it.
    pub fn run(&mut self, credentials: &[Credential]) -> AppResult<Vec<SessionOutcome>> {
        let mut outcomes = Vec::with_capacity(credentials.len());

        for (i, credential) in credentials.iter().enumerate() {
            outcomes.push(self.scrape_one(credential)?);

            if i + 1 < credentials.len() && !self.session_delay.is_zero() {
                info(format!(
                    "Waiting {} seconds before next login...",
                    self.session_delay.as_secs()
                ));
                thread::sleep(self.session_delay);
            }
        }

        Ok(outcomes)
    }

    pub fn scrape_one(&mut self, credential: &Credential) -> AppResult<SessionOutcome> {
        info(format!("Logging in as {}", credential.email));

        let session = self.portal.sign_in(credential)?;

        let portal = &mut *self.portal;
        let extractor = self.extractor;
        let waited = wait_until(
            self.readiness,
            || Ok(Html::parse_document(&portal.fetch_listing(&session)?)),
            |page| !extractor.rows(page).is_empty(),
        )?;

        let ready = waited.is_ready();
        if !ready {
            warning(format!(
                "No listing rows for {} after {}s, continuing with an empty page",
                credential.email,
                self.readiness.timeout.as_secs()
            ));
        }

        let page = waited.into_inner();
        let mut events = Vec::new();
        let mut skipped = 0;

        for (n, result) in self.extractor.extract_page(&page).into_iter().enumerate() {
            match result {
                Ok(row) => events.push(row.tagged(&credential.email)),
                Err(reason) if reason.is_structural() => {}
                Err(reason) => {
                    skipped += 1;
                    warning(format!("Row {} skipped ({}): {}", n + 1, credential.email, reason));
                }
            }
        }

        info(format!(
            "{} events collected for {}",
            events.len(),
            credential.email
        ));

        Ok(SessionOutcome {
            user: credential.email.clone(),
            events,
            skipped,
            ready,
        })
    }
}

/// Concatenate session results in credential order.
pub fn all_events(outcomes: &[SessionOutcome]) -> Vec<Event> {
    outcomes.iter().flat_map(|o| o.events.iter().cloned()).collect()
}
