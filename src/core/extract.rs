//! Row extractor: turns one rendered listing `<tr>` into an [`EventRow`].
//!
//! Two layouts are understood:
//! - `labelled`: the title sits in a labelled attribute on a link in the
//!   second cell, next to up to three short fragments (time, date, location);
//!   the sold count lives in a dedicated sub-element that only exists when
//!   something was sold; the available count follows a textual label.
//! - `columns`: the older plain table, one value per cell.
//!
//! A row that cannot be read is skipped with an [`ExtractionSkipped`] reason;
//! it never aborts the page.

use crate::config::{ListingConfig, RowLayout};
use crate::errors::{AppError, AppResult};
use crate::models::EventRow;
use crate::utils::date;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use thiserror::Error;

static NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d[\d,]*").expect("valid number regex"));

const LABELLED_MIN_CELLS: usize = 3;
const COLUMNS_MIN_CELLS: usize = 6;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionSkipped {
    #[error("row has {found} cells, at least {needed} expected")]
    TooFewCells { found: usize, needed: usize },

    #[error("title not found ({0})")]
    MissingTitle(String),
}

impl ExtractionSkipped {
    /// Header and spacer rows: expected on every page, not worth a warning.
    pub fn is_structural(&self) -> bool {
        matches!(self, ExtractionSkipped::TooFewCells { .. })
    }
}

pub struct RowExtractor {
    layout: RowLayout,
    title_attribute: String,
    row: Selector,
    cell: Selector,
    title_link: Selector,
    fragment: Selector,
    sold: Selector,
    available: Regex,
}

fn selector(css: &str) -> AppResult<Selector> {
    Selector::parse(css)
        .map_err(|e| AppError::Configuration(format!("invalid selector '{css}': {e}")))
}

/// Collapse all whitespace runs (including NBSP and newlines) to one space.
fn squash(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn text_of(el: ElementRef<'_>) -> String {
    squash(&el.text().collect::<Vec<_>>().join(" "))
}

/// First integer in `s` (thousands commas allowed), if any.
fn first_number(s: &str) -> Option<u32> {
    let m = NUMBER.find(s)?;
    m.as_str().replace(',', "").parse().ok()
}

impl RowExtractor {
    pub fn new(cfg: &ListingConfig) -> AppResult<Self> {
        let label = cfg.available_label.trim();
        if label.is_empty() {
            return Err(AppError::Configuration(
                "listing.available_label must not be empty".to_string(),
            ));
        }

        let available = Regex::new(&format!(r"{}\s*:?\s*(\d[\d,]*)", regex::escape(label)))
            .map_err(|e| AppError::Configuration(format!("available label: {e}")))?;

        Ok(Self {
            layout: cfg.layout,
            title_attribute: cfg.title_attribute.clone(),
            row: selector(&cfg.row_selector)?,
            cell: selector("td")?,
            title_link: selector(&format!("a[{}]", cfg.title_attribute))?,
            fragment: selector(&cfg.fragment_selector)?,
            sold: selector(&cfg.sold_selector)?,
            available,
        })
    }

    /// All candidate rows currently present in the page.
    pub fn rows<'a>(&self, page: &'a Html) -> Vec<ElementRef<'a>> {
        page.select(&self.row).collect()
    }

    /// Extract every row of a page, in document order.
    pub fn extract_page(&self, page: &Html) -> Vec<Result<EventRow, ExtractionSkipped>> {
        self.rows(page).into_iter().map(|r| self.extract(r)).collect()
    }

    pub fn extract(&self, row: ElementRef<'_>) -> Result<EventRow, ExtractionSkipped> {
        let cells: Vec<ElementRef<'_>> = row.select(&self.cell).collect();

        match self.layout {
            RowLayout::Labelled => self.extract_labelled(row, &cells),
            RowLayout::Columns => self.extract_columns(&cells),
        }
    }

    fn extract_labelled(
        &self,
        row: ElementRef<'_>,
        cells: &[ElementRef<'_>],
    ) -> Result<EventRow, ExtractionSkipped> {
        if cells.len() < LABELLED_MIN_CELLS {
            return Err(ExtractionSkipped::TooFewCells {
                found: cells.len(),
                needed: LABELLED_MIN_CELLS,
            });
        }

        let cell = cells[1];

        let title = cell
            .select(&self.title_link)
            .filter_map(|a| a.value().attr(&self.title_attribute))
            .map(str::trim)
            .find(|t| !t.is_empty())
            .ok_or_else(|| {
                ExtractionSkipped::MissingTitle(format!("no '{}' on a link", self.title_attribute))
            })?
            .to_string();

        // time, date, location; any of them may be missing
        let mut fragments = cell.select(&self.fragment).map(text_of);
        let time = fragments.next().unwrap_or_default();
        let raw_date = fragments.next().unwrap_or_default();
        let location = fragments.next().unwrap_or_default();

        // The sold element is only rendered for non-zero sales.
        let sold = row
            .select(&self.sold)
            .next()
            .and_then(|el| first_number(&text_of(el)))
            .unwrap_or(0);

        let available = self
            .available
            .captures(&text_of(row))
            .and_then(|c| c.get(1))
            .and_then(|m| m.as_str().replace(',', "").parse().ok())
            .unwrap_or(0);

        Ok(EventRow {
            title,
            date: date::normalize_separators(&raw_date),
            time,
            sold,
            available,
            location,
        })
    }

    fn extract_columns(&self, cells: &[ElementRef<'_>]) -> Result<EventRow, ExtractionSkipped> {
        if cells.len() < COLUMNS_MIN_CELLS {
            return Err(ExtractionSkipped::TooFewCells {
                found: cells.len(),
                needed: COLUMNS_MIN_CELLS,
            });
        }

        let title = text_of(cells[1]);
        if title.is_empty() {
            return Err(ExtractionSkipped::MissingTitle("second cell is empty".to_string()));
        }

        // "12 / 300" style: the first token is the sold count
        let sold = text_of(cells[2])
            .split_whitespace()
            .next()
            .and_then(first_number)
            .unwrap_or(0);
        let available = first_number(&text_of(cells[3])).unwrap_or(0);

        let date_time = text_of(cells[4]);
        let (raw_date, time) = match date::split_date_token(&date_time) {
            Some((d, rest)) => (d, rest),
            None => (date_time, String::new()),
        };

        Ok(EventRow {
            title,
            date: date::normalize_separators(&raw_date),
            time,
            sold,
            available,
            location: text_of(cells[5]),
        })
    }
}
