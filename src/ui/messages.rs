//! Status lines for the terminal.
//!
//! When a command prints machine-readable output (`--json`) the status lines
//! move to stderr so stdout stays parseable.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

/// ANSI colors
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";

const FG_BLUE: &str = "\x1b[34m";
const FG_GREEN: &str = "\x1b[32m";
const FG_YELLOW: &str = "\x1b[33m";
const FG_RED: &str = "\x1b[31m";

/// Icons
const ICON_INFO: &str = "ℹ️";
const ICON_OK: &str = "✅";
const ICON_WARN: &str = "⚠️";
const ICON_ERR: &str = "❌";

static TO_STDERR: AtomicBool = AtomicBool::new(false);

/// Route info/success/warning/header lines to stderr.
pub fn set_machine_output(on: bool) {
    TO_STDERR.store(on, Ordering::Relaxed);
}

fn status(line: String) {
    if TO_STDERR.load(Ordering::Relaxed) {
        eprintln!("{line}");
    } else {
        println!("{line}");
    }
}

pub fn info<T: fmt::Display>(msg: T) {
    status(format!("{FG_BLUE}{BOLD}{ICON_INFO} {RESET}{msg}"));
}

pub fn success<T: fmt::Display>(msg: T) {
    status(format!("{FG_GREEN}{BOLD}{ICON_OK} {RESET}{msg}"));
}

pub fn warning<T: fmt::Display>(msg: T) {
    status(format!("{FG_YELLOW}{BOLD}{ICON_WARN} {RESET}{msg}"));
}

pub fn error<T: fmt::Display>(msg: T) {
    eprintln!("{FG_RED}{BOLD}{ICON_ERR} {RESET}{msg}");
}

/// Section header
pub fn header<T: fmt::Display>(msg: T) {
    status(format!("{FG_BLUE}{BOLD}====================== {msg}\n{RESET}"));
}
