//! Resolve command for checking identities without editing anything.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rt_client::{Replicon, Transport};

pub fn run<W: Write, T: Transport>(
    writer: &mut W,
    session: &Replicon<T>,
    date: NaiveDate,
) -> Result<()> {
    let timesheet = session
        .timesheet(date)
        .with_context(|| format!("failed to resolve timesheet for {date}"))?;

    writeln!(writer, "Client:    {}", session.client())?;
    writeln!(writer, "User:      {}", session.user())?;
    writeln!(writer, "Timesheet: {} ({date})", timesheet.identity())?;
    Ok(())
}
