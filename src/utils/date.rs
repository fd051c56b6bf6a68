//! Date utilities: separator normalization for scraped labels and the
//! display-only `DD/MM/YYYY` normalization used by the report.

use chrono::{Local, NaiveDate};
use regex::Regex;
use std::sync::LazyLock;

static DATE_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b\d{1,2}[./]\d{1,2}[./]\d{2,4}\b").expect("valid date token regex")
});

/// Rewrite `.` day/month/year separators to `/` and trim.
///
/// Idempotent: an already `/`-separated date comes back unchanged.
pub fn normalize_separators(s: &str) -> String {
    s.trim().replace('.', "/")
}

/// Parse a `/`-separated date with either a 2-digit or a 4-digit year.
///
/// The year form is picked from the length of the last component so that
/// `01/05/25` is read as 2025 and never as year 25.
pub fn parse_display_date(s: &str) -> Option<NaiveDate> {
    let s = normalize_separators(s);
    let year = s.rsplit('/').next()?;

    let fmt = match year.len() {
        2 => "%d/%m/%y",
        4 => "%d/%m/%Y",
        _ => return None,
    };

    NaiveDate::parse_from_str(&s, fmt).ok()
}

/// Normalize a sheet/portal date for display (`DD/MM/YYYY`).
/// Returns `None` when neither year form parses.
pub fn display_date(s: &str) -> Option<String> {
    parse_display_date(s).map(|d| d.format("%d/%m/%Y").to_string())
}

/// Find the first date-looking token (`D.M.YY`, `DD/MM/YYYY`, ...) in free text.
/// Returns the token and the text with the token removed.
pub fn split_date_token(s: &str) -> Option<(String, String)> {
    let m = DATE_TOKEN.find(s)?;
    let rest = format!("{} {}", &s[..m.start()], &s[m.end()..]);
    let rest = rest.split_whitespace().collect::<Vec<_>>().join(" ");
    Some((m.as_str().to_string(), rest))
}

/// Local wall-clock timestamp formatted with a chrono format string.
pub fn now_stamp(fmt: &str) -> String {
    Local::now().format(fmt).to_string()
}
