#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;
use ticketrecon::models::Event;

pub fn trc() -> Command {
    cargo_bin_cmd!("ticketrecon")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_ticketrecon.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Write `content` to a fresh temp file and return its path
pub fn temp_file(name: &str, ext: &str, content: &str) -> String {
    let p = temp_out(name, ext);
    fs::write(&p, content).expect("write temp file");
    p
}

/// Rendered listing page with the default (labelled) markup.
///
/// Rows, in order: a month spacer, a full row, a row with nothing sold,
/// a row whose link has no title label.
pub const LISTING_HTML: &str = r#"<!doctype html>
<html dir="rtl"><body>
<table class="events">
  <thead><tr><th>#</th><th>אירוע</th><th>מכירות</th></tr></thead>
  <tbody>
    <tr><td colspan="3">מאי 2025</td></tr>
    <tr>
      <td>1</td>
      <td>
        <a href="/manager/events/101" aria-label="Show A">Show A</a>
        <div class="event-meta"><span>20:30</span><span>01.05.2025</span><span>היכל התרבות</span></div>
      </td>
      <td><span class="sold-count">12</span> <span>נותרו: 37</span></td>
    </tr>
    <tr>
      <td>2</td>
      <td>
        <a href="/manager/events/102" aria-label="ערב ג'אז">ערב ג'אז</a>
        <div class="event-meta"><span>21:00</span><span>02/05/25</span><span>בית האופרה</span></div>
      </td>
      <td><span>נותרו 1,200</span></td>
    </tr>
    <tr>
      <td>3</td>
      <td><a href="/manager/events/103">ללא כותרת</a></td>
      <td><span class="sold-count">4</span></td>
    </tr>
  </tbody>
</table>
</body></html>
"#;

/// Header row plus data rows of the sales sheet.
pub const SHEET_HEADER: &str = "Production,Date,Organization,Sold,Received,Last Updated";

pub fn sheet_csv(rows: &[&str]) -> String {
    let mut out = String::from(SHEET_HEADER);
    for r in rows {
        out.push('\n');
        out.push_str(r);
    }
    out.push('\n');
    out
}

pub fn event(title: &str, date: &str, sold: u32, user: &str) -> Event {
    Event {
        title: title.to_string(),
        date: date.to_string(),
        time: "20:30".to_string(),
        sold,
        available: 0,
        location: String::new(),
        source_user: user.to_string(),
    }
}
