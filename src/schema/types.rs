//! Column metadata as reported by the engine, tagged with a semantic type.

use crate::value::FieldValue;

const NUMERIC_TYPES: &[&str] = &[
    "INT2", "INT4", "INT8", "SMALLINT", "INTEGER", "BIGINT", "FLOAT4", "FLOAT8", "REAL",
    "DOUBLE PRECISION", "NUMERIC", "DECIMAL", "OID",
];

const STRING_TYPES: &[&str] = &["VARCHAR", "TEXT", "NVARCHAR", "BPCHAR", "CHAR", "NAME", "CITEXT"];

/// Types outside Numeric/String that rows decode without a text cast.
const NATIVE_OTHER_TYPES: &[&str] = &["BOOL", "UUID", "TIMESTAMPTZ", "TIMESTAMP", "DATE", "TIME", "JSON", "JSONB"];

/// Type name usable after `::` in SQL. sqlx reports `bpchar` as `CHAR`, which would cast to `char(1)`.
pub fn sql_cast_type(db_type_name: &str) -> String {
    let (base, array) = match db_type_name.strip_suffix("[]") {
        Some(base) => (base, "[]"),
        None => (db_type_name, ""),
    };
    let base = match base {
        "CHAR" => "bpchar",
        "\"CHAR\"" => "\"char\"",
        other => other,
    };
    format!("{}{}", base, array)
}

/// Coarse classification of a database type name. Drives validation, defaults and row decoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SemanticType {
    Numeric,
    String,
    Other,
}

impl SemanticType {
    pub fn from_db_type(name: &str) -> Self {
        let upper = name.trim().to_ascii_uppercase();
        if NUMERIC_TYPES.contains(&upper.as_str()) {
            SemanticType::Numeric
        } else if STRING_TYPES.contains(&upper.as_str()) {
            SemanticType::String
        } else {
            SemanticType::Other
        }
    }

    /// Value substituted for a missing non-nullable column on create.
    pub fn default_value(self) -> FieldValue {
        match self {
            SemanticType::Numeric => FieldValue::Int(0),
            SemanticType::String => FieldValue::String(String::new()),
            SemanticType::Other => FieldValue::Bool(false),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ColumnDescriptor {
    pub name: String,
    /// Type name as the driver reports it (e.g. "INT4", "VARCHAR").
    pub db_type_name: String,
    /// `db_type_name` spelled for placeholder casts.
    pub sql_type: String,
    pub nullable: bool,
    pub semantic_type: SemanticType,
}

impl ColumnDescriptor {
    pub fn new(name: impl Into<String>, db_type_name: impl Into<String>, nullable: bool) -> Self {
        let db_type_name = db_type_name.into();
        let semantic_type = SemanticType::from_db_type(&db_type_name);
        ColumnDescriptor {
            name: name.into(),
            sql_type: sql_cast_type(&db_type_name),
            db_type_name,
            nullable,
            semantic_type,
        }
    }

    pub fn is_string_like(&self) -> bool {
        self.semantic_type == SemanticType::String
    }

    /// Whether rows can decode this column as projected, without a text cast.
    pub fn decodes_natively(&self) -> bool {
        match self.semantic_type {
            SemanticType::Numeric | SemanticType::String => true,
            SemanticType::Other => NATIVE_OTHER_TYPES.contains(&self.db_type_name.to_ascii_uppercase().as_str()),
        }
    }

    /// Whether a submitted value's kind fits this column.
    pub fn accepts(&self, value: &FieldValue) -> bool {
        match value {
            FieldValue::Null => self.nullable,
            FieldValue::Int(_) | FieldValue::Float(_) => self.semantic_type == SemanticType::Numeric,
            FieldValue::String(_) => self.semantic_type == SemanticType::String,
            FieldValue::Bool(_) => self.semantic_type == SemanticType::Other,
        }
    }
}
