//! Submit command for sending a timesheet for approval.

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
    session
        .execute(&[session.submit_action(timesheet.identity())])
        .with_context(|| format!("failed to submit timesheet {}", timesheet.identity()))?;
    tracing::info!(timesheet = %timesheet.identity(), "timesheet submitted");

    writeln!(writer, "Submitted timesheet {}", timesheet.identity())?;
    Ok(())
}
