//! Payload validation against a table's discovered columns.

use crate::error::AppError;
use crate::schema::ColumnDescriptor;
use crate::value::{FieldMap, FieldValue};
use serde_json::{Map, Value};

/// How primary keys and missing columns are treated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ValidationOptions {
    /// Drop a submitted primary key instead of rejecting it.
    pub ignore_primary_key: bool,
    /// Skip columns absent from the submission (partial update).
    pub ignore_missing_fields: bool,
    /// Give missing non-nullable columns a type default instead of failing.
    pub substitute_defaults: bool,
}

impl ValidationOptions {
    pub const CREATE: ValidationOptions = ValidationOptions {
        ignore_primary_key: true,
        ignore_missing_fields: false,
        substitute_defaults: true,
    };

    pub const UPDATE: ValidationOptions = ValidationOptions {
        ignore_primary_key: false,
        ignore_missing_fields: true,
        substitute_defaults: false,
    };
}

pub struct FieldValidator;

impl FieldValidator {
    /// Walk the table's columns (not the submitted keys) and build the sanitized field map.
    /// Submitted keys with no matching column are ignored.
    pub fn validate(
        submitted: &Map<String, Value>,
        columns: &[ColumnDescriptor],
        primary_key: &str,
        options: ValidationOptions,
    ) -> Result<FieldMap, AppError> {
        let mut out = FieldMap::new();
        for column in columns {
            let name = column.name.as_str();
            let value = submitted.get(name);

            if name == primary_key {
                if value.is_some() && !options.ignore_primary_key {
                    return Err(invalid(column));
                }
                continue;
            }

            match value {
                Some(v) => {
                    let v = FieldValue::from_json(v).ok_or_else(|| invalid(column))?;
                    if !column.accepts(&v) {
                        return Err(invalid(column));
                    }
                    out.insert(column.name.clone(), v);
                }
                None if options.ignore_missing_fields => {}
                None if column.nullable => {
                    out.insert(column.name.clone(), FieldValue::Null);
                }
                None if options.substitute_defaults => {
                    out.insert(column.name.clone(), column.semantic_type.default_value());
                }
                None => return Err(invalid(column)),
            }
        }
        Ok(out)
    }
}

fn invalid(column: &ColumnDescriptor) -> AppError {
    AppError::InvalidField(column.name.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn columns() -> Vec<ColumnDescriptor> {
        vec![
            ColumnDescriptor::new("id", "INT4", false),
            ColumnDescriptor::new("title", "VARCHAR", false),
            ColumnDescriptor::new("qty", "INT4", false),
            ColumnDescriptor::new("description", "TEXT", true),
            ColumnDescriptor::new("done", "BOOL", false),
        ]
    }

    fn body(v: Value) -> Map<String, Value> {
        match v {
            Value::Object(m) => m,
            _ => unreachable!(),
        }
    }

    fn field_err(r: Result<FieldMap, AppError>) -> String {
        match r {
            Err(AppError::InvalidField(f)) => f,
            other => panic!("expected invalid field, got {:?}", other),
        }
    }

    #[test]
    fn create_fills_defaults_and_nulls() {
        let out = FieldValidator::validate(
            &body(json!({"title": "a"})),
            &columns(),
            "id",
            ValidationOptions::CREATE,
        )
        .unwrap();
        assert_eq!(out.get("title"), Some(&FieldValue::String("a".into())));
        assert_eq!(out.get("qty"), Some(&FieldValue::Int(0)));
        assert_eq!(out.get("description"), Some(&FieldValue::Null));
        assert_eq!(out.get("done"), Some(&FieldValue::Bool(false)));
        assert!(!out.contains_key("id"));
    }

    #[test]
    fn create_drops_primary_key_and_extra_fields() {
        let out = FieldValidator::validate(
            &body(json!({"id": 99, "title": "a", "unknown": "zzz"})),
            &columns(),
            "id",
            ValidationOptions::CREATE,
        )
        .unwrap();
        assert!(!out.contains_key("id"));
        assert!(!out.contains_key("unknown"));
    }

    #[test]
    fn without_defaults_missing_required_fails() {
        let options = ValidationOptions {
            substitute_defaults: false,
            ..ValidationOptions::CREATE
        };
        let r = FieldValidator::validate(&body(json!({"title": "a"})), &columns(), "id", options);
        assert_eq!(field_err(r), "qty");
    }

    #[test]
    fn update_rejects_primary_key() {
        let r = FieldValidator::validate(&body(json!({"id": 4})), &columns(), "id", ValidationOptions::UPDATE);
        assert_eq!(field_err(r), "id");
    }

    #[test]
    fn update_is_partial() {
        let out = FieldValidator::validate(
            &body(json!({"description": null})),
            &columns(),
            "id",
            ValidationOptions::UPDATE,
        )
        .unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out.get("description"), Some(&FieldValue::Null));
    }

    #[test]
    fn type_mismatches() {
        let cases = [
            (json!({"title": 1}), "title"),
            (json!({"qty": "1"}), "qty"),
            (json!({"title": null}), "title"),
            (json!({"done": 1}), "done"),
            (json!({"description": ["a"]}), "description"),
        ];
        for (payload, field) in cases {
            let r = FieldValidator::validate(&body(payload), &columns(), "id", ValidationOptions::UPDATE);
            assert_eq!(field_err(r), field);
        }
    }

    #[test]
    fn failure_names_first_column_in_catalog_order() {
        let r = FieldValidator::validate(
            &body(json!({"done": "x", "title": 5})),
            &columns(),
            "id",
            ValidationOptions::UPDATE,
        );
        assert_eq!(field_err(r), "title");
    }
}
