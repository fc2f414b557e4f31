//! Show command for printing a snapshot offline.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::Result;
use rt_core::{TimeRow, snapshot, time_rows};

use crate::ShowArgs;
use crate::commands::util::format_hours;

pub fn run<W: Write>(writer: &mut W, args: &ShowArgs) -> Result<()> {
    let document = snapshot::read(&args.path)?;
    let output = format_rows(&document.identity.to_string(), &time_rows(&document));
    write!(writer, "{output}")?;
    Ok(())
}

fn format_rows(timesheet: &str, rows: &[TimeRow]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Timesheet {timesheet}");
    if rows.is_empty() {
        let _ = writeln!(out, "No entries.");
        return out;
    }

    let mut entries = 0;
    let mut total = 0.0;
    for row in rows {
        let _ = writeln!(out, "Task {}", row.task);
        for cell in &row.cells {
            let date = cell
                .date
                .map_or_else(|| "????-??-??".to_string(), |date| date.to_string());
            let hours = cell.hours.map_or_else(|| "?".to_string(), format_hours);
            let _ = writeln!(out, "  {date}  {hours}h");
            entries += 1;
            total += cell.hours.unwrap_or_default();
        }
    }
    let _ = writeln!(
        out,
        "{} rows, {entries} entries, {} hours",
        rows.len(),
        format_hours(total)
    );
    out
}
