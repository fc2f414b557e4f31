//! Query shapes used to resolve names into identities.
//!
//! Each helper builds one `Query` action with a fixed query type and domain
//! type. Executing them is the client's job.

use chrono::NaiveDate;

use crate::{Action, Edit, Identity, Load, Operation, Query, TypedValue, domain};

fn query(query_type: &str, domain_type: &str, args: Vec<TypedValue>) -> Query {
    Query {
        query_type: query_type.to_string(),
        domain_type: domain_type.to_string(),
        args,
        load: Vec::new(),
    }
}

/// Looks up a client by its display name.
pub fn client_by_name(name: &str) -> Action {
    Action::Query(query("ClientByName", domain::CLIENT, vec![name.into()]))
}

/// Looks up a user by login name.
pub fn user_by_login_name(login: &str) -> Action {
    Action::Query(query("UserByLoginName", domain::USER, vec![login.into()]))
}

/// Looks up a project by its project code.
pub fn project_by_code(code: &str) -> Action {
    Action::Query(query("ProjectByCode", domain::PROJECT, vec![code.into()]))
}

/// Finds the timesheet covering `date` for `user`, expanding its rows.
pub fn timesheet_by_user_date(user: &Identity, date: NaiveDate) -> Action {
    let mut query = query(
        "TimesheetByUserDate",
        domain::TIMESHEET,
        vec![
            TypedValue::reference(domain::USER, user.clone()),
            TypedValue::Date(date),
        ],
    );
    query.load = vec![
        Load::new("TimeRows")
            .with(Load::new("Activity"))
            .with(Load::new("Cells")),
    ];
    Action::Query(query)
}

/// Lists every open task of `project` that `user` may book time against.
pub fn open_tasks_by_user_and_project(user: &Identity, project: &Identity) -> Action {
    Action::Query(query(
        "AllOpenTasksByUserAndProject",
        domain::TASK,
        vec![
            TypedValue::reference(domain::USER, user.clone()),
            TypedValue::reference(domain::PROJECT, project.clone()),
        ],
    ))
}

/// Submits a timesheet for approval.
///
/// Submission is an ordinary edit, so it can share an envelope with the
/// edit that fills the timesheet in.
pub fn submit_timesheet(timesheet: &Identity) -> Action {
    Action::Edit(Edit {
        type_name: domain::TIMESHEET.to_string(),
        identity: timesheet.clone(),
        operations: vec![Operation::Submit],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    #[test]
    fn timesheet_query_requests_row_expansion() {
        let user = Identity::from("U1");
        let action = timesheet_by_user_date(&user, NaiveDate::from_ymd_opt(2015, 8, 3).unwrap());
        assert_eq!(
            serde_json::to_value(&action).unwrap(),
            json!({
                "Action": "Query",
                "QueryType": "TimesheetByUserDate",
                "DomainType": "Replicon.TimeSheet.Domain.Timesheet",
                "Args": [
                    {"__type": "Replicon.Domain.User", "Identity": "U1"},
                    {"__type": "Date", "Year": 2015, "Month": 8, "Day": 3},
                ],
                "Load": [{
                    "Relationship": "TimeRows",
                    "Load": [{"Relationship": "Activity"}, {"Relationship": "Cells"}],
                }],
            })
        );
    }

    #[test]
    fn task_query_references_user_and_project() {
        let action = open_tasks_by_user_and_project(&Identity::from("U1"), &Identity::from(77));
        assert_eq!(
            serde_json::to_value(&action).unwrap(),
            json!({
                "Action": "Query",
                "QueryType": "AllOpenTasksByUserAndProject",
                "DomainType": "Replicon.Project.Domain.Task",
                "Args": [
                    {"__type": "Replicon.Domain.User", "Identity": "U1"},
                    {"__type": "Replicon.Project.Domain.Project", "Identity": 77},
                ],
            })
        );
    }

    #[test]
    fn name_queries_pass_literal_args() {
        let value = serde_json::to_value(client_by_name("OWW")).unwrap();
        assert_eq!(value["QueryType"], "ClientByName");
        assert_eq!(value["DomainType"], "Replicon.Domain.Client");
        assert_eq!(value["Args"], json!(["OWW"]));

        let value = serde_json::to_value(user_by_login_name("jdoe")).unwrap();
        assert_eq!(value["QueryType"], "UserByLoginName");
        assert_eq!(value["Args"], json!(["jdoe"]));
    }

    #[test]
    fn submit_is_single_operation_edit() {
        assert_eq!(
            serde_json::to_value(submit_timesheet(&Identity::from("TS1"))).unwrap(),
            json!({
                "Action": "Edit",
                "Type": "Replicon.TimeSheet.Domain.Timesheet",
                "Identity": "TS1",
                "Operations": [{"__operation": "Submit"}],
            })
        );
    }
}
