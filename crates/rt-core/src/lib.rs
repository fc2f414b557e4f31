//! Core protocol model for the Replicon timesheet client.
//!
//! This crate contains the pure, I/O-free pieces:
//! - Actions and the edit-operation tree sent to the remote API
//! - Query shapes for resolving names into identities
//! - The timesheet builder that merges time entries into rows
//! - Snapshot files for offline editing

mod action;
mod identity;
pub mod query;
pub mod snapshot;
mod timesheet;
mod value;

pub use action::{Action, Edit, Load, Operation, Query};
pub use identity::Identity;
pub use snapshot::SnapshotError;
pub use timesheet::{CELLS, Cell, RestoreError, TIME_ROWS, TimeRow, Timesheet, time_rows};
pub use value::{Reference, TypedValue, domain};
