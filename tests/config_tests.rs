use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use ticketrecon::config::{Config, RowLayout};
use ticketrecon::errors::AppError;
use ticketrecon::utils::date::{display_date, normalize_separators, parse_display_date};
use ticketrecon::utils::path::resolve_in;

mod common;
use common::{temp_file, temp_out};

fn env_of(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn test_credentials_resolved_in_account_order() {
    let env = env_of(&[
        ("EMAIL", " a@x.com "),
        ("PASSWORD", "p1"),
        ("EMAIL2", "b@x.com"),
        ("PASSWORD2", "p2"),
    ]);
    let creds = Config::default()
        .credentials_with(|k| env.get(k).cloned())
        .expect("credentials");

    assert_eq!(creds.len(), 2);
    assert_eq!(creds[0].email, "a@x.com");
    assert_eq!(creds[1].password(), "p2");
}

#[test]
fn test_missing_credentials_are_all_reported() {
    let env = env_of(&[("EMAIL", "a@x.com"), ("PASSWORD", "p1"), ("EMAIL2", "")]);
    let err = Config::default()
        .credentials_with(|k| env.get(k).cloned())
        .expect_err("second account incomplete");

    match err {
        AppError::Configuration(msg) => {
            assert!(msg.contains("EMAIL2"));
            assert!(msg.contains("PASSWORD2"));
            assert!(!msg.contains("EMAIL,"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_no_accounts_is_a_configuration_error() {
    let cfg = Config {
        accounts: Vec::new(),
        ..Config::default()
    };
    assert!(matches!(
        cfg.credentials_with(|_| Some("x".to_string())),
        Err(AppError::Configuration(_))
    ));
}

#[test]
fn test_partial_config_file_loads_defaults() {
    let path = temp_file(
        "partial_config",
        "conf",
        "database: /tmp/x.sqlite\nlisting:\n  layout: columns\nreconcile:\n  exclusive_rows: true\n",
    );
    let cfg = Config::load_from(Path::new(&path)).expect("load");

    assert_eq!(cfg.database, "/tmp/x.sqlite");
    assert_eq!(cfg.listing.layout, RowLayout::Columns);
    assert_eq!(cfg.listing.available_label, "נותרו");
    assert!(cfg.reconcile.exclusive_rows);
    assert_eq!(cfg.reconcile.organization_tag, "מבלים");
    assert_eq!(cfg.reconcile.columns.last_updated, "Last Updated");
    assert_eq!(cfg.accounts.len(), 2);
    assert_eq!(cfg.portal.session_delay_secs, 5);
}

#[test]
fn test_missing_config_file_is_default() {
    let path = temp_out("absent_config", "conf");
    let cfg = Config::load_from(Path::new(&path)).expect("defaults");
    assert_eq!(cfg.sheet.worksheet, "Sheet1");
}

#[test]
fn test_init_all_writes_loadable_config() {
    let path = PathBuf::from(temp_out("init_all", "conf"));
    let db = Config::init_all(&path, Some("runs.sqlite".to_string()), false).expect("init");

    assert_eq!(db, path.parent().expect("temp dir").join("runs.sqlite"));
    let cfg = Config::load_from(&path).expect("reload");
    assert_eq!(cfg.database, db.to_string_lossy());
    fs::remove_file(&path).ok();
}

#[test]
fn test_date_normalization_is_idempotent() {
    assert_eq!(normalize_separators("01/05/2025"), "01/05/2025");
    assert_eq!(
        normalize_separators("01.05.2025"),
        normalize_separators("01/05/2025")
    );
    assert_eq!(normalize_separators(" 1.5.25 "), "1/5/25");
}

#[test]
fn test_display_date_year_forms() {
    assert_eq!(display_date("01/05/25").as_deref(), Some("01/05/2025"));
    assert_eq!(display_date("1.5.2025").as_deref(), Some("01/05/2025"));
    assert_eq!(display_date("31/02/2025"), None);
    assert_eq!(display_date("01/05/225"), None);
    assert_eq!(display_date("soon"), None);
    assert!(parse_display_date("").is_none());
}

#[test]
fn test_relative_paths_resolve_in_base() {
    let base = Path::new("/tmp/ticketrecon");
    assert_eq!(resolve_in(base, "runs.sqlite"), base.join("runs.sqlite"));
    assert_eq!(
        resolve_in(base, "/var/x.sqlite"),
        PathBuf::from("/var/x.sqlite")
    );
}
