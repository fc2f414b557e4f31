//! Scripted sessions for command tests.

use std::cell::RefCell;
use std::rc::Rc;

use rt_client::{RawResponse, Replicon, SessionExecutor, Transport, TransportError};
use serde_json::{Value, json};

/// Request bodies seen by a scripted session, in order.
pub type Requests = Rc<RefCell<Vec<Value>>>;

/// Connects a session whose client resolves to `C1` and user to `U1`.
///
/// Each later request is answered with the next entry of `results` as its
/// first action result, then with `{}` once they run out.
pub fn session(results: Vec<Value>) -> (Replicon<impl Transport>, Requests) {
    let requests = Requests::default();
    let seen = Rc::clone(&requests);
    let queue = RefCell::new(
        [json!({"Identity": "C1"}), json!({"Identity": "U1"})]
            .into_iter()
            .chain(results)
            .collect::<Vec<_>>()
            .into_iter(),
    );

    let transport = move |body: &str| -> Result<RawResponse, TransportError> {
        seen.borrow_mut().push(serde_json::from_str(body).unwrap());
        let result = queue.borrow_mut().next().unwrap_or_else(|| json!({}));
        Ok(RawResponse {
            status: 200,
            body: json!({"Status": "OK", "Value": [{}, result]}).to_string(),
        })
    };

    let session = Replicon::connect(SessionExecutor::new(transport), "OWW", "jdoe").unwrap();
    (session, requests)
}
