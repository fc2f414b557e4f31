//! Session envelopes and response classification.
//!
//! Every exchange with the server is one POST whose body is the array
//! `[BeginSession, ...actions, EndSession]`. The response's `Value` array is
//! aligned with that request: index 0 acknowledges `BeginSession`, so the
//! result of the first supplied action sits at index 1.

use std::iter;

use rt_core::{Action, Identity, query};
use serde_json::Value;

use crate::{ClientError, RawResponse, Transport};

/// HTTP status of a successful exchange.
const SUCCESS_STATUS: u16 = 200;
/// `Status` value the server uses to report a failed batch.
const STATUS_EXCEPTION: &str = "Exception";
/// Index in `Value` of the first supplied action's result.
const FIRST_RESULT_INDEX: usize = 1;

/// A successful, parsed server response.
#[derive(Debug, Clone, PartialEq)]
pub struct Response(Value);

impl Response {
    pub fn status(&self) -> Option<&str> {
        self.0.get("Status")?.as_str()
    }

    pub fn message(&self) -> Option<&str> {
        self.0.get("Message")?.as_str()
    }

    fn is_exception(&self) -> bool {
        self.status() == Some(STATUS_EXCEPTION)
    }

    /// Results of the supplied actions, in request order.
    pub fn results(&self) -> &[Value] {
        self.0
            .get("Value")
            .and_then(Value::as_array)
            .and_then(|values| values.get(FIRST_RESULT_INDEX..))
            .unwrap_or_default()
    }

    /// Result of the first supplied action.
    pub fn first_result(&self) -> Option<&Value> {
        self.results().first()
    }

    pub const fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

/// Wraps actions in session envelopes and sends them.
#[derive(Debug)]
pub struct SessionExecutor<T> {
    transport: T,
}

impl<T: Transport> SessionExecutor<T> {
    pub const fn new(transport: T) -> Self {
        Self { transport }
    }

    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Sends `actions` in one session envelope.
    ///
    /// Fails with [`ClientError::Protocol`] when the server reports an
    /// exception or answers with a non-success HTTP status.
    pub fn execute(&self, actions: &[Action]) -> Result<Response, ClientError> {
        let (begin, end) = (Action::BeginSession, Action::EndSession);
        let envelope: Vec<&Action> = iter::once(&begin)
            .chain(actions)
            .chain(iter::once(&end))
            .collect();
        let request = serde_json::to_value(&envelope).map_err(ClientError::Encode)?;

        tracing::debug!(actions = actions.len(), request = %pretty(&request), "sending request");
        let raw = self.transport.post(&request.to_string())?;
        classify(&request, raw)
    }

    /// Runs a single query and returns the identity of its result.
    pub fn query_for_identity(&self, query: &Action) -> Result<Identity, ClientError> {
        let response = self.execute(std::slice::from_ref(query))?;
        response
            .first_result()
            .and_then(|result| result.get("Identity"))
            .and_then(Identity::from_value)
            .ok_or_else(|| ClientError::LookupNotFound {
                kind: "identity",
                name: describe(query),
            })
    }

    /// Finds the open task named `task_name` in `project`.
    pub fn lookup_task(
        &self,
        task_name: &str,
        user: &Identity,
        project: &Identity,
    ) -> Result<Identity, ClientError> {
        let response = self.execute(&[query::open_tasks_by_user_and_project(user, project)])?;
        find_task(response.results(), task_name).ok_or_else(|| ClientError::LookupNotFound {
            kind: "task",
            name: task_name.to_string(),
        })
    }
}

fn find_task(results: &[Value], task_name: &str) -> Option<Identity> {
    results
        .iter()
        .find(|task| {
            task.pointer("/Properties/Name").and_then(Value::as_str) == Some(task_name)
        })
        .and_then(|task| task.get("Identity"))
        .and_then(Identity::from_value)
}

fn classify(request: &Value, raw: RawResponse) -> Result<Response, ClientError> {
    let success = raw.status == SUCCESS_STATUS;
    let value = match serde_json::from_str::<Value>(&raw.body) {
        Ok(value) => value,
        Err(err) if success => return Err(ClientError::InvalidResponse(err.to_string())),
        Err(_) => Value::String(raw.body),
    };
    tracing::debug!(status = raw.status, response = %pretty(&value), "received response");

    let response = Response(value);
    if success && !response.is_exception() {
        return Ok(response);
    }

    let message = response
        .message()
        .map_or_else(|| format!("server returned HTTP {}", raw.status), str::to_string);
    Err(ClientError::Protocol {
        message,
        status: raw.status,
        request: pretty(request),
        response: pretty(response.as_value()),
    })
}

fn describe(action: &Action) -> String {
    match action {
        Action::Query(query) => {
            let args = serde_json::to_string(&query.args).unwrap_or_default();
            format!("{} {args}", query.query_type)
        }
        other => format!("{other:?}"),
    }
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::cell::RefCell;
    use std::collections::VecDeque;

    use chrono::NaiveDate;
    use rt_core::Timesheet;
    use serde_json::json;

    use crate::TransportError;

    /// Replays canned responses and records request bodies.
    struct Scripted {
        responses: RefCell<VecDeque<RawResponse>>,
        requests: RefCell<Vec<Value>>,
    }

    impl Scripted {
        fn new(responses: impl IntoIterator<Item = (u16, Value)>) -> Self {
            Self {
                responses: RefCell::new(
                    responses
                        .into_iter()
                        .map(|(status, body)| RawResponse {
                            status,
                            body: body.to_string(),
                        })
                        .collect(),
                ),
                requests: RefCell::new(Vec::new()),
            }
        }
    }

    impl Transport for Scripted {
        fn post(&self, body: &str) -> Result<RawResponse, TransportError> {
            self.requests
                .borrow_mut()
                .push(serde_json::from_str(body).unwrap());
            Ok(self
                .responses
                .borrow_mut()
                .pop_front()
                .expect("unexpected request"))
        }
    }

    fn ok(values: Value) -> (u16, Value) {
        (200, json!({"Status": "OK", "Value": values}))
    }

    #[test]
    fn envelope_wraps_actions_in_order() {
        let executor = SessionExecutor::new(Scripted::new([ok(json!([{}, {}, {}, {}]))]));

        let mut sheet = Timesheet::new(Identity::from("C1"), Identity::from("TS1"));
        sheet.enter_time(
            &Identity::from("T1"),
            NaiveDate::from_ymd_opt(2015, 8, 3).unwrap(),
            4.0,
        );
        let actions = [
            sheet.to_action(),
            query::submit_timesheet(sheet.identity()),
        ];
        executor.execute(&actions).unwrap();

        let requests = executor.transport().requests.borrow();
        let body = requests[0].as_array().unwrap();
        assert_eq!(body.len(), 4);
        assert_eq!(body[0], json!({"Action": "BeginSession"}));
        assert_eq!(body[1], serde_json::to_value(&actions[0]).unwrap());
        assert_eq!(body[2]["Operations"], json!([{"__operation": "Submit"}]));
        assert_eq!(body[3], json!({"Action": "EndSession"}));
    }

    #[test]
    fn empty_batch_still_opens_and_closes_session() {
        let executor = SessionExecutor::new(Scripted::new([ok(json!([{}, {}]))]));
        executor.execute(&[]).unwrap();

        assert_eq!(
            executor.transport().requests.borrow()[0],
            json!([{"Action": "BeginSession"}, {"Action": "EndSession"}])
        );
    }

    #[test]
    fn query_for_identity_reads_first_result() {
        let executor =
            SessionExecutor::new(Scripted::new([ok(json!([{}, {"Identity": "X123"}, {}]))]));

        let identity = executor
            .query_for_identity(&query::client_by_name("OWW"))
            .unwrap();
        assert_eq!(identity, Identity::from("X123"));
    }

    #[test]
    fn query_for_identity_reports_null_result() {
        let executor = SessionExecutor::new(Scripted::new([ok(json!([{}, null]))]));

        let err = executor
            .query_for_identity(&query::project_by_code("404"))
            .unwrap_err();
        assert!(matches!(
            err,
            ClientError::LookupNotFound {
                kind: "identity",
                ..
            }
        ));
        assert!(err.to_string().contains("ProjectByCode"));
    }

    #[test]
    fn exception_status_carries_server_message() {
        let executor = SessionExecutor::new(Scripted::new([(
            200,
            json!({"Status": "Exception", "Message": "Invalid date"}),
        )]));

        let err = executor.execute(&[query::client_by_name("OWW")]).unwrap_err();
        let ClientError::Protocol {
            message,
            request,
            response,
            ..
        } = err
        else {
            panic!("expected protocol error");
        };
        assert_eq!(message, "Invalid date");
        assert!(request.contains("ClientByName"));
        assert!(response.contains("Exception"));
    }

    #[test]
    fn non_success_http_status_is_protocol_error() {
        let executor = SessionExecutor::new(Scripted::new([(
            500,
            json!({"Status": "OK", "Value": []}),
        )]));
        let err = executor
            .execute(&[query::client_by_name("OWW")])
            .unwrap_err();
        assert!(matches!(
            err,
            ClientError::Protocol { status: 500, ref message, .. }
                if message == "server returned HTTP 500"
        ));
    }

    #[test]
    fn non_json_error_page_is_protocol_error() {
        let transport = |_: &str| -> Result<RawResponse, TransportError> {
            Ok(RawResponse {
                status: 401,
                body: "<html>Unauthorized</html>".to_string(),
            })
        };
        let err = SessionExecutor::new(transport).execute(&[]).unwrap_err();
        let ClientError::Protocol { response, .. } = err else {
            panic!("expected protocol error");
        };
        assert!(response.contains("Unauthorized"));
    }

    #[test]
    fn non_json_success_body_is_invalid_response() {
        let transport = |_: &str| -> Result<RawResponse, TransportError> {
            Ok(RawResponse {
                status: 200,
                body: "not json".to_string(),
            })
        };
        let err = SessionExecutor::new(transport).execute(&[]).unwrap_err();
        assert!(matches!(err, ClientError::InvalidResponse(_)));
    }

    #[test]
    fn lookup_task_matches_name_after_session_ack() {
        let executor = SessionExecutor::new(Scripted::new([ok(json!([
            {"Properties": {"Name": "Develop"}, "Identity": "ACK"},
            {"Properties": {"Name": "Initiate/Expense"}, "Identity": "T1"},
            {"Identity": "T-no-props"},
            {"Properties": {"Name": "Develop"}, "Identity": "T2"},
        ]))]));

        let task = executor
            .lookup_task("Develop", &Identity::from("U1"), &Identity::from("P1"))
            .unwrap();
        assert_eq!(task, Identity::from("T2"));

        let request = &executor.transport().requests.borrow()[0];
        assert_eq!(request[1]["QueryType"], "AllOpenTasksByUserAndProject");
    }

    #[test]
    fn lookup_task_reports_missing_name() {
        let executor = SessionExecutor::new(Scripted::new([ok(json!([
            {},
            {"Properties": {"Name": "Develop"}},
        ]))]));

        let err = executor
            .lookup_task("Test", &Identity::from("U1"), &Identity::from("P1"))
            .unwrap_err();
        assert!(matches!(
            err,
            ClientError::LookupNotFound { kind: "task", ref name } if name == "Test"
        ));
    }

    #[test]
    fn results_skip_session_ack() {
        let response = Response(json!({"Status": "OK", "Value": ["ack", 1, 2]}));
        assert_eq!(response.results(), &[json!(1), json!(2)]);
        assert_eq!(Response(json!({"Status": "OK"})).results(), &[] as &[Value]);
    }
}
