//! Heterogeneous cell values shared by request payloads and decoded rows.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// One column value: the only shapes a submitted field or a decoded cell can take.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

/// Column name -> value. Used both for sanitized payloads and for decoded rows.
pub type FieldMap = BTreeMap<String, FieldValue>;

/// A decoded row.
pub type Record = FieldMap;

impl FieldValue {
    /// Convert a JSON value into the field domain. Arrays and objects have no counterpart.
    pub fn from_json(v: &Value) -> Option<Self> {
        Some(match v {
            Value::Null => FieldValue::Null,
            Value::Bool(b) => FieldValue::Bool(*b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    FieldValue::Int(i)
                } else {
                    FieldValue::Float(n.as_f64()?)
                }
            }
            Value::String(s) => FieldValue::String(s.clone()),
            Value::Array(_) | Value::Object(_) => return None,
        })
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => f.write_str("null"),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Int(n) => write!(f, "{}", n),
            FieldValue::Float(n) => write!(f, "{}", n),
            FieldValue::String(s) => f.write_str(s),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Int(n)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_scalars_map_into_domain() {
        assert_eq!(FieldValue::from_json(&json!(null)), Some(FieldValue::Null));
        assert_eq!(FieldValue::from_json(&json!(true)), Some(FieldValue::Bool(true)));
        assert_eq!(FieldValue::from_json(&json!(42)), Some(FieldValue::Int(42)));
        assert_eq!(FieldValue::from_json(&json!(1.5)), Some(FieldValue::Float(1.5)));
        assert_eq!(FieldValue::from_json(&json!("x")), Some(FieldValue::String("x".into())));
    }

    #[test]
    fn containers_are_rejected() {
        assert_eq!(FieldValue::from_json(&json!([1, 2])), None);
        assert_eq!(FieldValue::from_json(&json!({"a": 1})), None);
    }

    #[test]
    fn serializes_untagged() {
        let mut record = Record::new();
        record.insert("id".into(), FieldValue::Int(1));
        record.insert("title".into(), FieldValue::Null);
        record.insert("done".into(), FieldValue::Bool(false));
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({"id": 1, "title": null, "done": false})
        );
    }
}
