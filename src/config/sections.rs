//! Configuration sections. Every section has serde defaults so that a
//! partially written configuration file still loads.

use serde::{Deserialize, Serialize};

// ---------------------------
// Portal
// ---------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PortalConfig {
    pub login_url: String,
    pub events_url: String,
    pub email_field: String,
    pub password_field: String,
    pub user_agent: String,
    /// Per-request timeout.
    pub request_timeout_secs: u64,
    /// How long to poll the listing before giving up on rows appearing.
    pub ready_timeout_secs: u64,
    pub poll_interval_ms: u64,
    /// Pause between two consecutive credential sessions.
    pub session_delay_secs: u64,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            login_url: "https://tickets.mevalim.co.il/auth/sign-in".to_string(),
            events_url: "https://tickets.mevalim.co.il/manager/events".to_string(),
            email_field: "email".to_string(),
            password_field: "password".to_string(),
            user_agent: format!("ticketrecon/{}", env!("CARGO_PKG_VERSION")),
            request_timeout_secs: 30,
            ready_timeout_secs: 20,
            poll_interval_ms: 1000,
            session_delay_secs: 5,
        }
    }
}

// ---------------------------
// Accounts
// ---------------------------

/// Names of the environment variables holding one credential pair.
/// Secrets never live in the configuration file itself.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccountConfig {
    pub email_env: String,
    pub password_env: String,
}

pub fn default_accounts() -> Vec<AccountConfig> {
    vec![
        AccountConfig {
            email_env: "EMAIL".to_string(),
            password_env: "PASSWORD".to_string(),
        },
        AccountConfig {
            email_env: "EMAIL2".to_string(),
            password_env: "PASSWORD2".to_string(),
        },
    ]
}

// ---------------------------
// Listing markup
// ---------------------------

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RowLayout {
    /// Title in a labelled link attribute, meta fragments inside the same cell.
    Labelled,
    /// Older plain table: one value per column.
    Columns,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingConfig {
    pub layout: RowLayout,
    pub row_selector: String,
    pub title_attribute: String,
    pub fragment_selector: String,
    pub sold_selector: String,
    pub available_label: String,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            layout: RowLayout::Labelled,
            row_selector: "table tbody tr".to_string(),
            title_attribute: "aria-label".to_string(),
            fragment_selector: ".event-meta span".to_string(),
            sold_selector: ".sold-count".to_string(),
            available_label: "נותרו".to_string(),
        }
    }
}

// ---------------------------
// Sheet backend
// ---------------------------

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SheetBackend {
    Csv,
    Google,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetConfig {
    pub backend: SheetBackend,
    /// CSV backend: path of the local sheet (`~` is expanded).
    pub path: String,
    /// Google backend settings.
    pub spreadsheet_id: String,
    pub worksheet: String,
    pub token_env: String,
    pub api_base: String,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            backend: SheetBackend::Csv,
            path: "~/.ticketrecon/sales.csv".to_string(),
            spreadsheet_id: String::new(),
            worksheet: "Sheet1".to_string(),
            token_env: "GOOGLE_SHEETS_TOKEN".to_string(),
            api_base: "https://sheets.googleapis.com".to_string(),
        }
    }
}

// ---------------------------
// Reconciliation
// ---------------------------

/// Header names of the sheet columns the reconciler reads or writes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetColumns {
    pub production: String,
    pub date: String,
    pub organization: String,
    pub sold: String,
    pub received: String,
    pub last_updated: String,
}

impl Default for SheetColumns {
    fn default() -> Self {
        Self {
            production: "Production".to_string(),
            date: "Date".to_string(),
            organization: "Organization".to_string(),
            sold: "Sold".to_string(),
            received: "Received".to_string(),
            last_updated: "Last Updated".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconcileConfig {
    pub columns: SheetColumns,
    /// Only rows whose organization cell equals this tag are candidates.
    pub organization_tag: String,
    /// chrono format string for the last-updated cell.
    pub timestamp_format: String,
    /// When true a sheet row can be matched by at most one event per run.
    pub exclusive_rows: bool,
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            columns: SheetColumns::default(),
            organization_tag: "מבלים".to_string(),
            timestamp_format: "%d/%m/%Y %H:%M:%S".to_string(),
            exclusive_rows: false,
        }
    }
}
