//! Typed property values carried by queries and `SetProperties` operations.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::Identity;

/// Vendor domain type names.
pub mod domain {
    pub const CLIENT: &str = "Replicon.Domain.Client";
    pub const USER: &str = "Replicon.Domain.User";
    pub const PROJECT: &str = "Replicon.Project.Domain.Project";
    pub const PROJECT_CLIENT: &str = "Replicon.Project.Domain.Client";
    pub const TASK: &str = "Replicon.Project.Domain.Task";
    pub const TIMESHEET: &str = "Replicon.TimeSheet.Domain.Timesheet";
    pub const CALCULATION_MODE: &str = "Replicon.TimeSheet.Domain.CalculationModeObject";
}

const TYPE_KEY: &str = "__type";
const DATE_TYPE: &str = "Date";
const TIMESPAN_TYPE: &str = "Timespan";

/// A typed reference to a server entity: `{"__type": ..., "Identity": ...}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub type_name: String,
    pub identity: Identity,
}

impl Reference {
    pub fn new(type_name: impl Into<String>, identity: Identity) -> Self {
        Self {
            type_name: type_name.into(),
            identity,
        }
    }
}

/// A property or query argument value.
///
/// Values the protocol types explicitly (dates, timespans, references) are
/// decoded into their own variants; anything else is carried verbatim so a
/// restored document re-serializes unchanged.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedValue {
    Date(NaiveDate),
    /// Hours are stored as given, including zero and negative values.
    Timespan { hours: f64 },
    Reference(Reference),
    Other(Value),
}

impl TypedValue {
    pub fn reference(type_name: impl Into<String>, identity: Identity) -> Self {
        Self::Reference(Reference::new(type_name, identity))
    }

    pub const fn as_reference(&self) -> Option<&Reference> {
        match self {
            Self::Reference(reference) => Some(reference),
            _ => None,
        }
    }

    /// Returns the referenced identity.
    ///
    /// Reference-shaped objects carrying extra keys (such as `DisplayText`)
    /// are kept as `Other` and still yield their `Identity`.
    pub fn identity(&self) -> Option<Identity> {
        match self {
            Self::Reference(reference) => Some(reference.identity.clone()),
            Self::Other(Value::Object(map)) => map.get("Identity").and_then(Identity::from_value),
            _ => None,
        }
    }

    pub const fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(date) => Some(*date),
            _ => None,
        }
    }

    pub const fn as_hours(&self) -> Option<f64> {
        match self {
            Self::Timespan { hours } => Some(*hours),
            _ => None,
        }
    }

    fn to_json(&self) -> Value {
        match self {
            Self::Date(date) => json!({
                TYPE_KEY: DATE_TYPE,
                "Year": date.year(),
                "Month": date.month(),
                "Day": date.day(),
            }),
            Self::Timespan { hours } => json!({ TYPE_KEY: TIMESPAN_TYPE, "Hours": hours }),
            Self::Reference(reference) => json!({
                TYPE_KEY: reference.type_name,
                "Identity": reference.identity,
            }),
            Self::Other(value) => value.clone(),
        }
    }

    fn from_json(value: Value) -> Self {
        let Value::Object(map) = value else {
            return Self::Other(value);
        };
        decode_object(&map).unwrap_or_else(|| Self::Other(Value::Object(map)))
    }
}

fn has_exact_keys(map: &Map<String, Value>, keys: &[&str]) -> bool {
    map.len() == keys.len() && keys.iter().all(|key| map.contains_key(*key))
}

fn decode_object(map: &Map<String, Value>) -> Option<TypedValue> {
    let type_name = map.get(TYPE_KEY)?.as_str()?;
    match type_name {
        DATE_TYPE if has_exact_keys(map, &[TYPE_KEY, "Year", "Month", "Day"]) => {
            let year = i32::try_from(map["Year"].as_i64()?).ok()?;
            let month = u32::try_from(map["Month"].as_u64()?).ok()?;
            let day = u32::try_from(map["Day"].as_u64()?).ok()?;
            NaiveDate::from_ymd_opt(year, month, day).map(TypedValue::Date)
        }
        TIMESPAN_TYPE if has_exact_keys(map, &[TYPE_KEY, "Hours"]) => {
            let hours = map["Hours"].as_f64()?;
            Some(TypedValue::Timespan { hours })
        }
        _ if has_exact_keys(map, &[TYPE_KEY, "Identity"]) => {
            let identity = Identity::from_value(&map["Identity"])?;
            Some(TypedValue::reference(type_name, identity))
        }
        _ => None,
    }
}

impl From<&str> for TypedValue {
    fn from(value: &str) -> Self {
        Self::Other(Value::String(value.to_string()))
    }
}

impl From<NaiveDate> for TypedValue {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

impl From<Reference> for TypedValue {
    fn from(value: Reference) -> Self {
        Self::Reference(value)
    }
}

impl Serialize for TypedValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.to_json().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for TypedValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(Self::from_json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn date_serializes_as_year_month_day() {
        let value = TypedValue::Date(date(2015, 8, 3));
        assert_eq!(
            serde_json::to_value(&value).unwrap(),
            json!({"__type": "Date", "Year": 2015, "Month": 8, "Day": 3})
        );
    }

    #[test]
    fn reference_decodes_from_type_and_identity() {
        let parsed: TypedValue = serde_json::from_value(json!({
            "__type": domain::TASK,
            "Identity": "T1",
        }))
        .unwrap();
        assert_eq!(
            parsed,
            TypedValue::reference(domain::TASK, Identity::from("T1"))
        );
    }

    #[test]
    fn negative_timespan_passes_through() {
        let parsed: TypedValue =
            serde_json::from_value(json!({"__type": "Timespan", "Hours": -2})).unwrap();
        assert_eq!(parsed.as_hours(), Some(-2.0));
    }

    #[test]
    fn unknown_shapes_are_kept_verbatim() {
        let raw = json!({"__type": "Timespan", "Hours": 1, "Minutes": 30});
        let parsed: TypedValue = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(parsed, TypedValue::Other(raw.clone()));
        assert_eq!(serde_json::to_value(&parsed).unwrap(), raw);

        let invalid_date = json!({"__type": "Date", "Year": 2015, "Month": 2, "Day": 30});
        let parsed: TypedValue = serde_json::from_value(invalid_date.clone()).unwrap();
        assert_eq!(parsed, TypedValue::Other(invalid_date));
    }

    #[test]
    fn identity_reads_decorated_references() {
        let raw = json!({"__type": domain::TASK, "Identity": "T1", "DisplayText": "Develop"});
        let parsed: TypedValue = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(parsed, TypedValue::Other(raw));
        assert_eq!(parsed.identity(), Some(Identity::from("T1")));

        let typed = TypedValue::reference(domain::TASK, Identity::from(7));
        assert_eq!(typed.identity(), Some(Identity::from(7)));
        assert_eq!(TypedValue::from("OWW").identity(), None);
    }

    #[test]
    fn plain_strings_are_scalars() {
        let value = TypedValue::from("OWW");
        assert_eq!(serde_json::to_value(&value).unwrap(), json!("OWW"));
    }
}
