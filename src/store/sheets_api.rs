//! Google Sheets values API backend.
//!
//! Authentication is out of scope: the client sends a pre-issued OAuth bearer
//! token read from the configured environment variable.

use super::{Record, SheetSnapshot, SheetStore, check_cell};
use crate::config::SheetConfig;
use crate::errors::{AppError, AppResult};
use reqwest::Url;
use reqwest::blocking::Client;
use std::time::Duration;

pub struct SheetsApi {
    http: Client,
    api_base: Url,
    spreadsheet_id: String,
    worksheet: String,
    token: String,
}

/// Column number → A1 letters (1 → A, 27 → AA).
pub fn column_letters(mut column: usize) -> String {
    let mut out = Vec::new();
    while column > 0 {
        let rem = (column - 1) % 26;
        out.push(b'A' + rem as u8);
        column = (column - 1) / 26;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

/// A1 reference of a single cell on `worksheet`, quoted for any sheet name.
pub fn a1_cell(worksheet: &str, row: usize, column: usize) -> String {
    format!(
        "'{}'!{}{}",
        worksheet.replace('\'', "''"),
        column_letters(column),
        row
    )
}

fn cell_text(v: &serde_json::Value) -> String {
    match v {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

impl SheetsApi {
    pub fn from_config(cfg: &SheetConfig) -> AppResult<Self> {
        if cfg.spreadsheet_id.trim().is_empty() {
            return Err(AppError::Configuration(
                "sheet.spreadsheet_id is required for the google backend".to_string(),
            ));
        }

        let token = std::env::var(&cfg.token_env)
            .ok()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| {
                AppError::Configuration(format!("missing environment variable: {}", cfg.token_env))
            })?;

        let api_base = Url::parse(&cfg.api_base)
            .map_err(|e| AppError::Configuration(format!("sheet.api_base: {e}")))?;

        let http = Client::builder()
            .user_agent(format!("ticketrecon/{}", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http,
            api_base,
            spreadsheet_id: cfg.spreadsheet_id.trim().to_string(),
            worksheet: cfg.worksheet.clone(),
            token,
        })
    }

    fn values_url(&self, range: &str) -> AppResult<Url> {
        let mut url = self.api_base.clone();
        url.path_segments_mut()
            .map_err(|_| AppError::Configuration("sheet.api_base cannot be a base".to_string()))?
            .pop_if_empty()
            .extend(["v4", "spreadsheets", self.spreadsheet_id.as_str(), "values", range]);
        Ok(url)
    }

    fn read_rows(&self) -> AppResult<Vec<Vec<String>>> {
        let range = format!("'{}'", self.worksheet.replace('\'', "''"));
        let url = self.values_url(&range)?;

        let response = self
            .http
            .get(url)
            .bearer_auth(&self.token)
            .send()
            .map_err(|e| AppError::StoreRead(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(AppError::StoreRead(format!("{status}: {body}")));
        }

        let json: serde_json::Value = response
            .json()
            .map_err(|e| AppError::StoreRead(e.to_string()))?;

        let rows = json["values"]
            .as_array()
            .map(|rows| {
                rows.iter()
                    .map(|r| {
                        r.as_array()
                            .map(|cells| cells.iter().map(cell_text).collect())
                            .unwrap_or_default()
                    })
                    .collect()
            })
            .unwrap_or_default();

        Ok(rows)
    }
}

impl SheetStore for SheetsApi {
    fn headers(&mut self) -> AppResult<Vec<String>> {
        Ok(self.snapshot()?.headers)
    }

    fn records(&mut self) -> AppResult<Vec<Record>> {
        Ok(self.snapshot()?.records)
    }

    fn write_cell(&mut self, row: usize, column: usize, value: &str) -> AppResult<()> {
        check_cell(row, column)?;

        let range = a1_cell(&self.worksheet, row, column);
        let write_error = |reason: String| AppError::StoreWrite {
            row,
            column,
            reason,
        };

        let mut url = self.values_url(&range)?;
        url.query_pairs_mut()
            .append_pair("valueInputOption", "USER_ENTERED");

        let response = self
            .http
            .put(url)
            .bearer_auth(&self.token)
            .json(&serde_json::json!({
                "range": range,
                "majorDimension": "ROWS",
                "values": [[value]],
            }))
            .send()
            .map_err(|e| write_error(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(write_error(format!("{status}: {body}")));
        }

        Ok(())
    }

    /// One GET for headers and records together.
    fn snapshot(&mut self) -> AppResult<SheetSnapshot> {
        Ok(SheetSnapshot::from_rows(&self.read_rows()?))
    }
}
