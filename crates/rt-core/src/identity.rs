//! Opaque server-assigned identities.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A reference to a server-side entity (client, user, project, task, timesheet).
///
/// Identities are only ever obtained from query results; the wire form is
/// preserved exactly, so a numeric identity stays numeric.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Identity {
    Text(String),
    Number(i64),
}

impl Identity {
    /// Reads an identity from a JSON value, if it has an identity shape.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Self::Text(s.clone())),
            Value::Number(n) => n.as_i64().map(Self::Number),
            _ => None,
        }
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => write!(f, "{s}"),
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for Identity {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Identity {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for Identity {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    #[test]
    fn numeric_identity_stays_numeric_on_the_wire() {
        let id = Identity::from(42);
        assert_eq!(serde_json::to_value(&id).unwrap(), json!(42));

        let parsed: Identity = serde_json::from_value(json!(42)).unwrap();
        assert_eq!(parsed, Identity::Number(42));
    }

    #[test]
    fn from_value_rejects_non_identity_shapes() {
        assert_eq!(Identity::from_value(&json!("X1")), Some(Identity::from("X1")));
        assert_eq!(Identity::from_value(&json!(null)), None);
        assert_eq!(Identity::from_value(&json!({"Identity": "X1"})), None);
        assert_eq!(Identity::from_value(&json!(1.5)), None);
    }

    #[test]
    fn display_is_bare_value() {
        assert_eq!(Identity::from("abc").to_string(), "abc");
        assert_eq!(Identity::from(7).to_string(), "7");
    }
}
