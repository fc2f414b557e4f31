//! Enter command: fill a timesheet with the same hours for each task and day.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use rt_client::{Replicon, Transport};
use rt_core::{Identity, Timesheet, snapshot};

use crate::commands::util::{days_between, format_hours};
use crate::{Config, EnterArgs, EntryTarget};

/// A validated enter request. Built before any network traffic.
#[derive(Debug, Clone, PartialEq)]
pub struct Plan {
    pub entries: Vec<EntryTarget>,
    pub days: Vec<NaiveDate>,
    pub hours: f64,
    pub save: Option<PathBuf>,
    pub submit: bool,
}

/// Merges arguments with configured defaults.
pub fn plan(args: &EnterArgs, config: &Config, today: NaiveDate) -> Result<Plan> {
    let entries = if args.entries.is_empty() {
        config.entries.clone()
    } else {
        args.entries.clone()
    };
    if entries.is_empty() {
        bail!("no entries given (use --entry PROJECT=TASK or set entries in config.toml)");
    }

    let from = args.from.unwrap_or(today);
    let to = args.to.unwrap_or(from);

    Ok(Plan {
        entries,
        days: days_between(from, to)?,
        hours: args.hours.unwrap_or(config.default_hours),
        save: args.save.clone(),
        submit: args.submit,
    })
}

/// Resolves every entry's task and enters the planned hours, day by day.
fn build<T: Transport>(session: &Replicon<T>, plan: &Plan) -> Result<Timesheet> {
    let mut tasks: Vec<Identity> = Vec::with_capacity(plan.entries.len());
    for entry in &plan.entries {
        let project = session
            .project(&entry.project)
            .with_context(|| format!("failed to resolve project {}", entry.project))?;
        let task = session
            .task(&entry.task, &project)
            .with_context(|| format!("failed to resolve task {:?}", entry.task))?;
        tasks.push(task);
    }

    let Some(&first_day) = plan.days.first() else {
        bail!("no days to enter");
    };
    let mut timesheet = session
        .timesheet(first_day)
        .with_context(|| format!("failed to resolve timesheet for {first_day}"))?;

    for &day in &plan.days {
        for task in &tasks {
            timesheet.enter_time(task, day, plan.hours);
        }
    }
    Ok(timesheet)
}

pub fn run<W: Write, T: Transport>(writer: &mut W, session: &Replicon<T>, plan: &Plan) -> Result<()> {
    let timesheet = build(session, plan)?;
    let count = plan.entries.len() * plan.days.len();
    #[expect(
        clippy::cast_precision_loss,
        reason = "entry counts are far below f64 precision"
    )]
    let total = plan.hours * count as f64;

    if let Some(path) = &plan.save {
        snapshot::save(path, &timesheet)?;
        writeln!(
            writer,
            "Saved {count} entries ({} hours) for timesheet {} to {}",
            format_hours(total),
            timesheet.identity(),
            path.display()
        )?;
        return Ok(());
    }

    let mut actions = vec![timesheet.to_action()];
    if plan.submit {
        actions.push(session.submit_action(timesheet.identity()));
    }
    session
        .execute(&actions)
        .with_context(|| format!("failed to update timesheet {}", timesheet.identity()))?;
    tracing::info!(timesheet = %timesheet.identity(), count, submitted = plan.submit, "timesheet updated");

    writeln!(
        writer,
        "Entered {count} entries ({} hours) on timesheet {}",
        format_hours(total),
        timesheet.identity()
    )?;
    if plan.submit {
        writeln!(writer, "Submitted timesheet {}", timesheet.identity())?;
    }
    Ok(())
}
