// src/export/xlsx.rs

use crate::errors::{AppError, AppResult};
use crate::export::{get_headers, notify_export_success};
use crate::models::Event;
use crate::ui::messages::info;
use crate::utils::date::parse_display_date;
use chrono::NaiveDate;
use rust_xlsxwriter::{
    Color, Format, FormatAlign, FormatBorder, FormatPattern, Workbook, Worksheet,
};
use std::path::Path;
use unicode_width::UnicodeWidthStr;

enum Cell<'a> {
    Text(&'a str),
    Number(f64),
    Date(NaiveDate),
}

fn event_cells(ev: &Event) -> Vec<Cell<'_>> {
    let date = match parse_display_date(&ev.date) {
        Some(d) => Cell::Date(d),
        None => Cell::Text(&ev.date),
    };

    vec![
        Cell::Text(&ev.title),
        date,
        Cell::Text(&ev.time),
        Cell::Number(ev.sold as f64),
        Cell::Number(ev.available as f64),
        Cell::Text(&ev.location),
        Cell::Text(&ev.source_user),
    ]
}

/// Excel serial day number (1900 date system).
fn excel_serial(d: NaiveDate) -> f64 {
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30).unwrap_or_default();
    (d - epoch).num_days() as f64
}

/// Export XLSX with a styled header, banded rows and auto column widths.
pub(crate) fn export_xlsx(events: &[Event], path: &Path) -> AppResult<()> {
    info(format!("Exporting to XLSX: {}", path.display()));

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_right_to_left(true);

    // ---------------------------
    // Empty dataset
    // ---------------------------
    if events.is_empty() {
        worksheet
            .write(0, 0, "No data available")
            .map_err(to_export_error)?;
        workbook.save(path).map_err(to_export_error)?;
        notify_export_success("XLSX (empty dataset)", path);
        return Ok(());
    }

    // ---------------------------
    // Header
    // ---------------------------
    let headers = get_headers();

    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0xFFFFFF))
        .set_background_color(Color::RGB(0x2F75B5))
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    for (col, header) in headers.iter().enumerate() {
        worksheet
            .write_with_format(0, col as u16, *header, &header_format)
            .map_err(to_export_error)?;
    }

    worksheet.set_freeze_panes(1, 0).ok();

    let mut col_widths: Vec<usize> = headers.iter().map(|h| UnicodeWidthStr::width(*h)).collect();

    let band1 = Color::RGB(0xEAF3FB);
    let band2 = Color::RGB(0xFFFFFF);

    // ---------------------------
    // Rows
    // ---------------------------
    for (row_index, ev) in events.iter().enumerate() {
        let row = (row_index + 1) as u32;
        let band_color = if row_index % 2 == 0 { band1 } else { band2 };

        for (col, cell) in event_cells(ev).iter().enumerate() {
            let width = write_xlsx_cell(worksheet, row, col as u16, cell, band_color)?;
            col_widths[col] = col_widths[col].max(width);
        }
    }

    for (c, w) in col_widths.iter().enumerate() {
        worksheet
            .set_column_width(c as u16, *w as f64 + 2.0)
            .map_err(to_export_error)?;
    }

    workbook.save(path).map_err(to_export_error)?;

    notify_export_success("XLSX", path);
    Ok(())
}

/// Write one cell; returns its display width.
fn write_xlsx_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    cell: &Cell<'_>,
    bg: Color,
) -> AppResult<usize> {
    let base = Format::new()
        .set_background_color(bg)
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    match cell {
        Cell::Date(d) => {
            let fmt = base.set_num_format("dd/mm/yyyy");
            worksheet
                .write_with_format(row, col, excel_serial(*d), &fmt)
                .map_err(to_export_error)?;
            Ok(10)
        }
        Cell::Number(n) => {
            let fmt = base.set_align(FormatAlign::Right);
            worksheet
                .write_with_format(row, col, *n, &fmt)
                .map_err(to_export_error)?;
            Ok(n.to_string().len())
        }
        Cell::Text(s) => {
            worksheet
                .write_with_format(row, col, *s, &base)
                .map_err(to_export_error)?;
            Ok(UnicodeWidthStr::width(*s))
        }
    }
}

fn to_export_error<E: std::fmt::Display>(e: E) -> AppError {
    AppError::Export(e.to_string())
}
