//! Send command: execute a timesheet snapshot saved earlier.

use std::io::Write;

use anyhow::{Context, Result};
use rt_client::{Replicon, Transport};
use rt_core::snapshot;

use crate::SendArgs;

pub fn run<W: Write, T: Transport>(
    writer: &mut W,
    session: &Replicon<T>,
    args: &SendArgs,
) -> Result<()> {
    let timesheet = snapshot::load(&args.path, session.client().clone())?;
    let count: usize = timesheet.rows().iter().map(|row| row.cells.len()).sum();

    let mut actions = vec![timesheet.to_action()];
    if args.submit {
        actions.push(session.submit_action(timesheet.identity()));
    }
    session
        .execute(&actions)
        .with_context(|| format!("failed to update timesheet {}", timesheet.identity()))?;
    tracing::info!(timesheet = %timesheet.identity(), count, submitted = args.submit, "snapshot sent");

    writeln!(
        writer,
        "Sent {count} entries on timesheet {}",
        timesheet.identity()
    )?;
    if args.submit {
        writeln!(writer, "Submitted timesheet {}", timesheet.identity())?;
    }
    Ok(())
}
