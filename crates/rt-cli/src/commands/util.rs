//! Shared utilities for CLI commands.

use anyhow::{Result, bail};
use chrono::{Local, NaiveDate};

/// Today's date in the local time zone.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Expands an inclusive date range into individual days.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> Result<Vec<NaiveDate>> {
    if to < from {
        bail!("--to ({to}) is before --from ({from})");
    }
    Ok(from.iter_days().take_while(|day| *day <= to).collect())
}

/// Formats hours with one decimal place, e.g. `4.0`.
pub fn format_hours(hours: f64) -> String {
    format!("{hours:.1}")
}
