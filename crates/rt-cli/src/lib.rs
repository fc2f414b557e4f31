//! Replicon timesheet CLI library.
//!
//! This crate provides the CLI interface for the timesheet client.

mod cli;
pub mod commands;
mod config;
pub mod session;

pub use cli::{Cli, Commands, EnterArgs, ResolveArgs, SendArgs, ShowArgs, SubmitArgs};
pub use config::{Config, DEFAULT_ENDPOINT, EntryTarget};
