//! Timesheet edit builder.
//!
//! A [`Timesheet`] owns one `Edit` document whose root operations always
//! start with `CollectionClear("TimeRows")`. Each later root operation is a
//! `CollectionAdd("TimeRows")` holding exactly one row per task, and each row
//! collects one `CollectionAdd("Cells")` per time entry.
//!
//! The server rebuilds the whole timesheet from this document, so the clear
//! must stay first: without it rows would be appended to whatever the
//! timesheet already holds.

use chrono::NaiveDate;
use thiserror::Error;

use crate::{Action, Edit, Identity, Operation, TypedValue, domain};

/// Collection holding the per-task rows of a timesheet.
pub const TIME_ROWS: &str = "TimeRows";
/// Collection holding the entries of a row.
pub const CELLS: &str = "Cells";

/// Calculation mode assigned to every cell.
const CALCULATE_IN_OUT_TIME: &str = "CalculateInOutTime";

/// Position of the clearing operation in the root operations.
const CLEAR_INDEX: usize = 0;
/// Position of the task/client assignment within a row's operations.
const ROW_HEADER_INDEX: usize = 0;

/// Errors restoring a timesheet from an existing document.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RestoreError {
    #[error("timesheet document must begin with CollectionClear(\"TimeRows\")")]
    MissingClear,
}

/// An in-progress edit of one server timesheet.
#[derive(Debug, Clone, PartialEq)]
pub struct Timesheet {
    client: Identity,
    document: Edit,
}

/// Read-only view of one row, in document order.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeRow {
    pub task: Identity,
    pub cells: Vec<Cell>,
}

/// Read-only view of one time entry.
///
/// Fields are optional because restored documents are not re-validated.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub date: Option<NaiveDate>,
    pub hours: Option<f64>,
}

impl Timesheet {
    /// Starts an empty edit of a timesheet resolved from the server.
    pub fn new(client: Identity, timesheet: Identity) -> Self {
        Self {
            client,
            document: Edit {
                type_name: domain::TIMESHEET.to_string(),
                identity: timesheet,
                operations: vec![Operation::clear(TIME_ROWS)],
            },
        }
    }

    /// Resumes editing a previously saved document.
    ///
    /// The document's identity is kept as-is; `client` is only used for rows
    /// added from now on.
    pub fn restore(client: Identity, document: Edit) -> Result<Self, RestoreError> {
        let starts_with_clear = document
            .operations
            .get(CLEAR_INDEX)
            .is_some_and(|op| op.is_clear_of(TIME_ROWS));
        if !starts_with_clear {
            return Err(RestoreError::MissingClear);
        }
        Ok(Self { client, document })
    }

    pub const fn identity(&self) -> &Identity {
        &self.document.identity
    }

    pub const fn client(&self) -> &Identity {
        &self.client
    }

    /// Records `hours` against `task` on `date`.
    ///
    /// The entry joins the task's existing row, or starts a new row at the end
    /// when the task has none yet. Hours are not validated.
    pub fn enter_time(&mut self, task: &Identity, date: NaiveDate, hours: f64) {
        let rows = &mut self.document.operations;
        let existing = rows
            .iter()
            .enumerate()
            .skip(CLEAR_INDEX + 1)
            .find(|(_, op)| row_task(op).as_ref() == Some(task))
            .map(|(index, _)| index);

        let index = existing.unwrap_or_else(|| {
            rows.push(new_row(task, &self.client));
            rows.len() - 1
        });

        if let Operation::CollectionAdd { operations, .. } = &mut rows[index] {
            operations.push(new_cell(date, hours));
        }
        tracing::trace!(task = %task, %date, hours, row = index, "entered time");
    }

    /// Returns the edit document. Ownership stays with the timesheet.
    pub const fn to_document(&self) -> &Edit {
        &self.document
    }

    /// Returns the document as an action ready for execution.
    pub fn to_action(&self) -> Action {
        Action::Edit(self.document.clone())
    }

    /// Lists the rows entered so far.
    pub fn rows(&self) -> Vec<TimeRow> {
        time_rows(&self.document)
    }
}

/// Lists the rows of a timesheet edit document, in document order.
///
/// Root operations that are not task rows are skipped.
pub fn time_rows(document: &Edit) -> Vec<TimeRow> {
    document
        .operations
        .iter()
        .skip(CLEAR_INDEX + 1)
        .filter_map(|op| {
            let task = row_task(op)?;
            let cells = op
                .added_to(TIME_ROWS)?
                .iter()
                .filter_map(|child| child.added_to(CELLS))
                .map(read_cell)
                .collect();
            Some(TimeRow { task, cells })
        })
        .collect()
}

fn row_task(op: &Operation) -> Option<Identity> {
    op.added_to(TIME_ROWS)?
        .get(ROW_HEADER_INDEX)?
        .property("Task")?
        .identity()
}

fn new_row(task: &Identity, client: &Identity) -> Operation {
    Operation::add(
        TIME_ROWS,
        vec![Operation::set([
            ("Task", TypedValue::reference(domain::TASK, task.clone())),
            (
                "Client",
                TypedValue::reference(domain::PROJECT_CLIENT, client.clone()),
            ),
        ])],
    )
}

fn new_cell(date: NaiveDate, hours: f64) -> Operation {
    Operation::add(
        CELLS,
        vec![
            Operation::set([(
                "CalculationModeObject",
                TypedValue::reference(
                    domain::CALCULATION_MODE,
                    Identity::from(CALCULATE_IN_OUT_TIME),
                ),
            )]),
            Operation::set([
                ("EntryDate", TypedValue::Date(date)),
                ("Duration", TypedValue::Timespan { hours }),
            ]),
        ],
    )
}

fn read_cell(operations: &[Operation]) -> Cell {
    let date = operations
        .iter()
        .find_map(|op| op.property("EntryDate"))
        .and_then(TypedValue::as_date);
    let hours = operations
        .iter()
        .find_map(|op| op.property("Duration"))
        .and_then(TypedValue::as_hours);
    Cell { date, hours }
}
