//! Command-line argument definitions.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::config::EntryTarget;

/// Replicon timesheet client.
///
/// Resolves clients, projects and tasks by name and fills in timesheets in a
/// single request.
#[derive(Debug, Parser)]
#[command(name = "rt", version, about, long_about = None)]
pub struct Cli {
    /// Log every request and response.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Resolve and print the client, user and timesheet identities.
    Resolve(ResolveArgs),

    /// Enter time for one or more tasks over a range of days.
    Enter(EnterArgs),

    /// Send a saved timesheet snapshot.
    Send(SendArgs),

    /// Submit the timesheet covering a date for approval.
    Submit(SubmitArgs),

    /// Print the entries of a saved timesheet snapshot.
    Show(ShowArgs),
}

#[derive(Debug, Args)]
pub struct ResolveArgs {
    /// Date whose timesheet to resolve (YYYY-MM-DD, default today).
    #[arg(long)]
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Args)]
pub struct EnterArgs {
    /// Project code and task name, as PROJECT=TASK. Repeatable.
    #[arg(long = "entry", value_name = "PROJECT=TASK")]
    pub entries: Vec<EntryTarget>,

    /// First day to fill in (YYYY-MM-DD, default today).
    #[arg(long)]
    pub from: Option<NaiveDate>,

    /// Last day to fill in, inclusive (default: same as --from).
    #[arg(long)]
    pub to: Option<NaiveDate>,

    /// Hours per task and day (default from config).
    #[arg(long, allow_negative_numbers = true)]
    pub hours: Option<f64>,

    /// Save a snapshot to this path instead of sending.
    #[arg(long, value_name = "PATH", conflicts_with = "submit")]
    pub save: Option<PathBuf>,

    /// Submit the timesheet in the same request.
    #[arg(long)]
    pub submit: bool,
}

#[derive(Debug, Args)]
pub struct SendArgs {
    /// Snapshot file written by `rt enter --save`.
    pub path: PathBuf,

    /// Submit the timesheet in the same request.
    #[arg(long)]
    pub submit: bool,
}

#[derive(Debug, Args)]
pub struct SubmitArgs {
    /// A date inside the timesheet period (YYYY-MM-DD, default today).
    #[arg(long)]
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Snapshot file to print.
    pub path: PathBuf,
}
