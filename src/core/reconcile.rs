//! Reconciliation of scraped events against the sales sheet.
//!
//! Planning works on a [`SheetSnapshot`] taken once; applying writes the
//! planned cells one by one. Rows written during the pass are never re-read,
//! so every matching decision sees the sheet as it was when the pass began.

use crate::config::{ReconcileConfig, SheetColumns};
use crate::errors::{AppError, AppResult};
use crate::models::Event;
use crate::store::{Record, SheetSnapshot, SheetStore};
use crate::utils::date;
use std::collections::HashSet;

/// 1-based positions of the columns the reconciler touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnIndex {
    pub sold: usize,
    /// Resolved so a renamed column fails fast; never written.
    pub received: usize,
    pub last_updated: usize,
}

impl ColumnIndex {
    pub fn resolve(headers: &[String], cols: &SheetColumns) -> AppResult<Self> {
        let find = |name: &str| headers.iter().position(|h| h == name).map(|i| i + 1);

        let mut missing = Vec::new();
        let sold = find(cols.sold.as_str());
        let received = find(cols.received.as_str());
        let last_updated = find(cols.last_updated.as_str());

        for (name, idx) in [
            (&cols.sold, sold),
            (&cols.received, received),
            (&cols.last_updated, last_updated),
        ] {
            if idx.is_none() {
                missing.push(format!("'{name}'"));
            }
        }

        match (sold, received, last_updated) {
            (Some(sold), Some(received), Some(last_updated)) => Ok(Self {
                sold,
                received,
                last_updated,
            }),
            _ => Err(AppError::Configuration(format!(
                "sheet is missing required column(s): {}",
                missing.join(", ")
            ))),
        }
    }
}

/// New values for one sheet row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowUpdate {
    pub row: usize,
    pub sold: u32,
    pub last_updated: String,
}

/// Outcome of planning. `updates[i]` belongs to `matched[i]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    pub columns: ColumnIndex,
    pub updates: Vec<RowUpdate>,
    pub matched: Vec<Event>,
    pub unmatched: Vec<Event>,
}

impl Reconciliation {
    /// Every event lands in exactly one of the two lists.
    pub fn classified(&self) -> usize {
        self.updates.len() + self.unmatched.len()
    }
}

fn cell<'r>(rec: &'r Record, name: &str) -> Option<&'r str> {
    rec.get(name).map(String::as_str)
}

pub struct Reconciler<'a> {
    cfg: &'a ReconcileConfig,
}

impl<'a> Reconciler<'a> {
    pub fn new(cfg: &'a ReconcileConfig) -> Self {
        Self { cfg }
    }

    /// Plan with local wall-clock timestamps.
    pub fn plan(&self, events: &[Event], snapshot: &SheetSnapshot) -> AppResult<Reconciliation> {
        let fmt = self.cfg.timestamp_format.clone();
        self.plan_with_clock(events, snapshot, || date::now_stamp(&fmt))
    }

    /// Plan with an explicit timestamp source, called once per match.
    pub fn plan_with_clock<C>(
        &self,
        events: &[Event],
        snapshot: &SheetSnapshot,
        mut clock: C,
    ) -> AppResult<Reconciliation>
    where
        C: FnMut() -> String,
    {
        let columns = ColumnIndex::resolve(&snapshot.headers, &self.cfg.columns)?;

        let mut updates = Vec::new();
        let mut matched = Vec::new();
        let mut unmatched = Vec::new();
        let mut consumed: HashSet<usize> = HashSet::new();

        for event in events {
            match self.find_row(event, &snapshot.records, &consumed) {
                Some(idx) => {
                    if self.cfg.exclusive_rows {
                        consumed.insert(idx);
                    }
                    updates.push(RowUpdate {
                        row: SheetSnapshot::row_number(idx),
                        sold: event.sold,
                        last_updated: clock(),
                    });
                    matched.push(event.clone());
                }
                None => unmatched.push(event.clone()),
            }
        }

        Ok(Reconciliation {
            columns,
            updates,
            matched,
            unmatched,
        })
    }

    /// Index (into `records`) of the first row matching `event`.
    fn find_row(
        &self,
        event: &Event,
        records: &[Record],
        consumed: &HashSet<usize>,
    ) -> Option<usize> {
        let cols = &self.cfg.columns;
        let (title, raw_date) = event.key();
        let event_date = date::normalize_separators(raw_date);

        records.iter().enumerate().position(|(idx, rec)| {
            !consumed.contains(&idx)
                && cell(rec, &cols.production) == Some(title)
                && cell(rec, &cols.date) == Some(event_date.as_str())
                && cell(rec, &cols.organization) == Some(self.cfg.organization_tag.as_str())
        })
    }

    /// Write the planned cells in plan order: sold, then last-updated, per row.
    ///
    /// The first failing write aborts the pass; earlier writes stay applied.
    /// `on_row` runs after both cells of a row are written.
    pub fn apply<F>(
        &self,
        plan: &Reconciliation,
        store: &mut dyn SheetStore,
        mut on_row: F,
    ) -> AppResult<usize>
    where
        F: FnMut(&RowUpdate, &Event),
    {
        let cols = plan.columns;

        for (update, event) in plan.updates.iter().zip(&plan.matched) {
            store.write_cell(update.row, cols.sold, &update.sold.to_string())?;
            store.write_cell(update.row, cols.last_updated, &update.last_updated)?;
            on_row(update, event);
        }

        Ok(plan.updates.len())
    }
}
