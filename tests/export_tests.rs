use std::fs;
use std::path::Path;
use ticketrecon::export::{ExportFormat, export_events};
use ticketrecon::models::Event;

mod common;
use common::{event, temp_out};

fn sample() -> Vec<Event> {
    let mut jazz = event("ערב ג'אז", "02/05/2025", 0, "b@x.com");
    jazz.available = 1200;
    jazz.location = "בית האופרה".to_string();
    vec![event("Show A", "01/05/2025", 12, "a@x.com"), jazz]
}

#[test]
fn test_export_csv_header_and_rows() {
    let out = temp_out("export_events_csv", "csv");

    export_events(&sample(), ExportFormat::Csv, Path::new(&out), false).expect("csv export");

    let content = fs::read_to_string(&out).expect("read csv");
    let mut lines = content.lines();
    assert_eq!(
        lines.next(),
        Some("title,date,time,sold,available,location,sourceUser")
    );
    assert_eq!(lines.next(), Some("Show A,01/05/2025,20:30,12,0,,a@x.com"));
    assert!(content.contains("בית האופרה,b@x.com"));
}

#[test]
fn test_export_csv_empty_keeps_header() {
    let out = temp_out("export_events_csv_empty", "csv");

    export_events(&[], ExportFormat::Csv, Path::new(&out), false).expect("csv export");

    let content = fs::read_to_string(&out).expect("read csv");
    assert_eq!(
        content.trim_end(),
        "title,date,time,sold,available,location,sourceUser"
    );
}

#[test]
fn test_export_json_reads_back_as_events() {
    let out = temp_out("export_events_json", "json");
    let events = sample();

    export_events(&events, ExportFormat::Json, Path::new(&out), false).expect("json export");

    let content = fs::read_to_string(&out).expect("read json");
    assert!(content.contains("\"sourceUser\": \"a@x.com\""));

    let back: Vec<Event> = serde_json::from_str(&content).expect("parse json");
    assert_eq!(back, events);
}

#[test]
fn test_export_xlsx_creates_file() {
    let out = temp_out("export_events_xlsx", "xlsx");

    export_events(&sample(), ExportFormat::Xlsx, Path::new(&out), false).expect("xlsx export");

    let bytes = fs::read(&out).expect("read xlsx");
    // xlsx is a zip container
    assert!(bytes.starts_with(b"PK"));
}

#[test]
fn test_export_force_overwrites_existing_file() {
    let out = temp_out("export_events_force", "json");
    fs::write(&out, "stale").expect("seed file");

    export_events(&sample(), ExportFormat::Json, Path::new(&out), true).expect("forced export");

    let content = fs::read_to_string(&out).expect("read json");
    assert!(!content.contains("stale"));
    assert!(content.contains("Show A"));
}
