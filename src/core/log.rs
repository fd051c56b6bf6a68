use crate::db::pool::DbPool;
use crate::db::runs::load_runs;
use crate::errors::AppResult;
use crate::ui::messages::info;
use crate::utils::table::Table;
use ansi_term::Colour;
use regex::Regex;
use std::sync::LazyLock;

static ANSI: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1B\[[0-9;]*[mK]").expect("valid ANSI regex"));

const MAX_OP_WIDTH: usize = 60;

fn strip_ansi(s: &str) -> String {
    ANSI.replace_all(s, "").into_owned()
}

/// ANSI colour per logged operation
fn color_for_operation(op: &str) -> Colour {
    match op {
        "sync" => Colour::Green,
        "reconcile" => Colour::Cyan,
        "update" => Colour::Yellow,
        "session" => Colour::Blue,
        "unmatched" => Colour::Red,
        "init" => Colour::RGB(255, 153, 51), // orange
        _ => Colour::White,
    }
}

pub struct LogLogic;

impl LogLogic {
    pub fn print_log(pool: &mut DbPool) -> AppResult<()> {
        let mut stmt = pool.conn.prepare_cached(
            "SELECT id, date, operation, target, message FROM log ORDER BY id ASC",
        )?;

        let rows = stmt.query_map([], |row| {
            let id: i64 = row.get(0)?;
            let raw_date: String = row.get(1)?;
            let operation: String = row.get(2)?;
            let target: String = row.get(3)?;
            let message: String = row.get(4)?;

            let date = chrono::DateTime::parse_from_rfc3339(&raw_date)
                .map(|dt| dt.format("%FT%T%:z").to_string())
                .unwrap_or(raw_date);

            Ok((id, date, operation, target, message))
        })?;

        let mut entries = Vec::new();
        for r in rows {
            entries.push(r?);
        }

        if entries.is_empty() {
            info("The internal log is empty.");
            return Ok(());
        }

        let op_w = entries
            .iter()
            .map(|(_, _, op, target, _)| op.len() + target.len() + 3)
            .max()
            .unwrap_or(10)
            .min(MAX_OP_WIDTH);
        let id_w = entries
            .iter()
            .map(|(id, ..)| id.to_string().len())
            .max()
            .unwrap_or(1);
        let date_w = entries
            .iter()
            .map(|(_, date, ..)| date.len())
            .max()
            .unwrap_or(10);

        println!("📜 Internal log:\n");

        for (id, date, operation, target, message) in entries {
            let color = color_for_operation(&operation);

            let mut op_target = color.paint(operation.as_str()).to_string();
            if !target.is_empty() {
                op_target.push_str(&format!(" ({target})"));
            }

            // truncate on the visible text, then re-apply the operation colour
            let visible = strip_ansi(&op_target);
            let shown = if visible.chars().count() > MAX_OP_WIDTH {
                let cut: String = visible.chars().take(MAX_OP_WIDTH - 3).collect();
                let cut = format!("{cut}...");
                match cut.split_once(' ') {
                    Some((op, rest)) => format!("{} {}", color.paint(op), rest),
                    None => color.paint(cut.as_str()).to_string(),
                }
            } else {
                op_target
            };

            let padding = " ".repeat(op_w.saturating_sub(strip_ansi(&shown).chars().count()));

            println!(
                "{:>id_w$}: {:<date_w$} | {}{} => {}",
                id,
                date,
                shown,
                padding,
                message,
                id_w = id_w,
                date_w = date_w
            );
        }

        Ok(())
    }

    pub fn print_runs(pool: &mut DbPool, limit: usize) -> AppResult<()> {
        let runs = load_runs(&pool.conn, limit)?;

        if runs.is_empty() {
            info("No runs recorded yet.");
            return Ok(());
        }

        let mut t = Table::with_headers(&[
            "#", "Started", "Command", "Accounts", "Scraped", "Updated", "Unmatched", "Dry run",
        ]);
        for r in runs {
            t.add_row(vec![
                r.id.to_string(),
                r.started_at,
                r.command,
                r.accounts.to_string(),
                r.scraped.to_string(),
                r.updated.to_string(),
                r.unmatched.to_string(),
                if r.dry_run { "yes" } else { "" }.to_string(),
            ]);
        }

        println!("🗂️  Recent runs:\n");
        print!("{}", t.render());
        Ok(())
    }
}
