use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;
use ticketrecon::models::Event;

mod common;
use common::{LISTING_HTML, event, setup_test_db, sheet_csv, temp_file, temp_out, trc};

/// Config path that does not exist: every run uses the built-in defaults.
fn no_config(name: &str) -> String {
    temp_out(&format!("{name}_noconf"), "conf")
}

fn events_file(name: &str, events: &[Event]) -> String {
    temp_file(
        name,
        "json",
        &serde_json::to_string(events).expect("serialize events"),
    )
}

#[test]
fn test_init_creates_run_log() {
    let db_path = setup_test_db("cli_init");

    trc()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Database initialized"));

    assert!(fs::metadata(&db_path).is_ok());
}

#[test]
fn test_extract_prints_table() {
    let html = temp_file("cli_extract", "html", LISTING_HTML);
    let conf = no_config("cli_extract");

    trc()
        .args(["--config", &conf, "extract", "--html", &html, "--user", "a@x.com"])
        .assert()
        .success()
        .stdout(
            contains("Show A")
                .and(contains("01/05/2025"))
                .and(contains("ערב ג'אז"))
                .and(contains("Row 4 skipped")),
        );
}

#[test]
fn test_extract_json_output() {
    let html = temp_file("cli_extract_json", "html", LISTING_HTML);
    let conf = no_config("cli_extract_json");

    trc()
        .args(["--config", &conf, "extract", "--html", &html, "--json"])
        .assert()
        .success()
        .stdout(contains("\"sold\": 12").and(contains("\"available\": 1200")));
}

#[test]
fn test_extract_missing_file_fails() {
    let conf = no_config("cli_extract_missing");
    let html = temp_out("cli_extract_missing", "html");

    trc()
        .args(["--config", &conf, "extract", "--html", &html])
        .assert()
        .failure()
        .stderr(contains("Error:"));
}

#[test]
fn test_reconcile_updates_csv_sheet() {
    let db_path = setup_test_db("cli_reconcile");
    let conf = no_config("cli_reconcile");
    let sheet = temp_file(
        "cli_reconcile_sheet",
        "csv",
        &sheet_csv(&[
            "Show A,01/05/2025,מבלים,0,1500,",
            "Show B,02/05/2025,מבלים,3,900,",
        ]),
    );
    let events = events_file(
        "cli_reconcile_events",
        &[
            event("Show A", "01.05.2025", 12, "a@x.com"),
            event("Show Z", "09/09/2025", 1, "b@x.com"),
        ],
    );

    trc()
        .args([
            "--db", &db_path, "--config", &conf, "reconcile", "--events", &events, "--sheet",
            &sheet,
        ])
        .assert()
        .success()
        .stdout(
            contains("Updated rows   : 1")
                .and(contains("Not found in sheet"))
                .and(contains("Show Z")),
        );

    let raw = fs::read_to_string(&sheet).expect("read sheet");
    let row2 = raw.lines().nth(1).expect("row 2");
    assert!(row2.starts_with("Show A,01/05/2025,מבלים,12,1500,"));
    assert!(raw.contains("Show B,02/05/2025,מבלים,3,900,"));

    trc()
        .args(["--db", &db_path, "--config", &conf, "log", "--runs"])
        .assert()
        .success()
        .stdout(contains("reconcile"));

    trc()
        .args(["--db", &db_path, "--config", &conf, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("update").and(contains("unmatched")));
}

#[test]
fn test_reconcile_dry_run_leaves_sheet_untouched() {
    let db_path = setup_test_db("cli_dry_run");
    let conf = no_config("cli_dry_run");
    let content = sheet_csv(&["Show A,01/05/2025,מבלים,0,1500,"]);
    let sheet = temp_file("cli_dry_run_sheet", "csv", &content);
    let events = events_file(
        "cli_dry_run_events",
        &[event("Show A", "01/05/2025", 12, "a@x.com")],
    );

    trc()
        .args([
            "--db", &db_path, "--config", &conf, "reconcile", "--events", &events, "--sheet",
            &sheet,
            "--dry-run", "--json",
        ])
        .assert()
        .success()
        .stdout(contains("\"updated\"").and(contains("\"row\": 2")));

    assert_eq!(fs::read_to_string(&sheet).expect("read sheet"), content);
}

#[test]
fn test_reconcile_missing_column_fails_without_writes() {
    let db_path = setup_test_db("cli_missing_col");
    let conf = no_config("cli_missing_col");
    let content = "Production,Date,Organization,Sold\nShow A,01/05/2025,מבלים,0\n";
    let sheet = temp_file("cli_missing_col_sheet", "csv", content);
    let events = events_file(
        "cli_missing_col_events",
        &[event("Show A", "01/05/2025", 12, "a@x.com")],
    );

    trc()
        .args([
            "--db", &db_path, "--config", &conf, "reconcile", "--events", &events, "--sheet",
            &sheet,
        ])
        .assert()
        .failure()
        .stderr(contains("Received").and(contains("Last Updated")));

    assert_eq!(fs::read_to_string(&sheet).expect("read sheet"), content);
}

#[test]
fn test_scrape_without_credentials_fails_early() {
    let db_path = setup_test_db("cli_no_creds");
    let conf = no_config("cli_no_creds");

    trc()
        .args(["--db", &db_path, "--config", &conf, "scrape"])
        .env_remove("EMAIL")
        .env_remove("PASSWORD")
        .env_remove("EMAIL2")
        .env_remove("PASSWORD2")
        .assert()
        .failure()
        .stderr(contains("missing environment variables"));
}

#[test]
fn test_config_print_shows_defaults() {
    let conf = no_config("cli_config_print");

    trc()
        .args(["--config", &conf, "config", "--print"])
        .assert()
        .success()
        .stdout(contains("organization_tag").and(contains("exclusive_rows: false")));
}

/// Config whose portal points at a closed local port.
fn unreachable_portal_config(name: &str) -> String {
    temp_file(
        &format!("{name}_conf"),
        "conf",
        "portal:\n  login_url: http://127.0.0.1:9/auth/sign-in\n  \
         events_url: http://127.0.0.1:9/manager/events\n  \
         request_timeout_secs: 2\n  ready_timeout_secs: 0\n  session_delay_secs: 0\n",
    )
}

#[test]
fn test_sync_checks_sheet_columns_before_login() {
    let db_path = setup_test_db("cli_sync_columns");
    let conf = unreachable_portal_config("cli_sync_columns");
    let content = "Production,Date,Organization,Sold\nShow A,01/05/2025,מבלים,0\n";
    let sheet = temp_file("cli_sync_columns_sheet", "csv", content);

    trc()
        .args(["--db", &db_path, "--config", &conf, "sync", "--sheet", &sheet])
        .env("EMAIL", "a@x.com")
        .env("PASSWORD", "p1")
        .env("EMAIL2", "b@x.com")
        .env("PASSWORD2", "p2")
        .assert()
        .failure()
        .stderr(
            contains("Configuration error")
                .and(contains("Received"))
                .and(contains("Session error").not()),
        )
        .stdout(contains("Logging in").not());

    assert_eq!(fs::read_to_string(&sheet).expect("read sheet"), content);
}

#[test]
fn test_sync_missing_sheet_fails_before_login() {
    let db_path = setup_test_db("cli_sync_no_sheet");
    let conf = unreachable_portal_config("cli_sync_no_sheet");
    let sheet = temp_out("cli_sync_no_sheet_sheet", "csv");

    trc()
        .args(["--db", &db_path, "--config", &conf, "sync", "--sheet", &sheet])
        .env("EMAIL", "a@x.com")
        .env("PASSWORD", "p1")
        .env("EMAIL2", "b@x.com")
        .env("PASSWORD2", "p2")
        .assert()
        .failure()
        .stderr(contains("Sheet read error"))
        .stdout(contains("Logging in").not());
}
