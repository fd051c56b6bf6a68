//! Human-readable run report.
//!
//! The "updated" section is display-only: it shows dates normalized to
//! `DD/MM/YYYY` and leaves out rows whose date does not parse. Those rows
//! were still written; the report never feeds back into the sheet.

use crate::core::reconcile::Reconciliation;
use crate::models::Event;
use crate::utils::date;
use crate::utils::table::Table;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatedLine {
    pub row: usize,
    pub title: String,
    pub date: String,
    pub time: String,
    pub sold: u32,
    pub source_user: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    pub scraped: usize,
    pub updated: Vec<UpdatedLine>,
    pub unmatched: Vec<Event>,
}

impl RunReport {
    pub fn build(scraped: usize, plan: &Reconciliation) -> Self {
        let updated = plan
            .updates
            .iter()
            .zip(&plan.matched)
            .filter_map(|(u, ev)| {
                let date = date::display_date(&ev.date)?;
                Some(UpdatedLine {
                    row: u.row,
                    title: ev.title.clone(),
                    date,
                    time: ev.time.clone(),
                    sold: u.sold,
                    source_user: ev.source_user.clone(),
                })
            })
            .collect();

        Self {
            scraped,
            updated,
            unmatched: plan.unmatched.clone(),
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();

        out.push_str(&format!("Scraped events : {}\n", self.scraped));
        out.push_str(&format!("Updated rows   : {}\n", self.updated.len()));
        out.push_str(&format!("Unmatched      : {}\n", self.unmatched.len()));

        if !self.updated.is_empty() {
            let mut t =
                Table::with_headers(&["Row", "Production", "Date", "Time", "Sold", "Account"]);
            for l in &self.updated {
                t.add_row(vec![
                    l.row.to_string(),
                    l.title.clone(),
                    l.date.clone(),
                    l.time.clone(),
                    l.sold.to_string(),
                    l.source_user.clone(),
                ]);
            }
            out.push_str("\nUpdated:\n");
            out.push_str(&t.render());
        }

        if !self.unmatched.is_empty() {
            out.push_str("\nNot found in sheet:\n");
            out.push_str(&events_table(&self.unmatched).render());
        }

        out
    }
}

/// Tabular view of events, shared by the report and `scrape`/`extract`.
pub fn events_table(events: &[Event]) -> Table {
    let mut t = Table::with_headers(&[
        "Production",
        "Date",
        "Time",
        "Sold",
        "Available",
        "Location",
        "Account",
    ]);
    for ev in events {
        t.add_row(vec![
            ev.title.clone(),
            ev.date.clone(),
            ev.time.clone(),
            ev.sold.to_string(),
            ev.available.to_string(),
            ev.location.clone(),
            ev.source_user.clone(),
        ]);
    }
    t
}
