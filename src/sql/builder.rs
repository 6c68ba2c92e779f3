//! Builds parameterized SELECT, INSERT, UPDATE, DELETE from a discovered column catalog.

use crate::schema::{ColumnDescriptor, SemanticType};
use crate::value::{FieldMap, FieldValue};

/// Quote identifier for PostgreSQL.
pub fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

#[derive(Clone, Debug, PartialEq)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<FieldValue>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: FieldValue) -> u32 {
        let n = self.params.len() as u32 + 1;
        self.params.push(v);
        n
    }

    /// Push a value and return its placeholder, cast to the column type when known.
    fn placeholder(&mut self, v: FieldValue, column: Option<&ColumnDescriptor>) -> String {
        let n = self.push_param(v);
        match column {
            Some(c) => format!("${}::{}", n, c.sql_type),
            None => format!("${}", n),
        }
    }
}

fn find<'a>(columns: &'a [ColumnDescriptor], name: &str) -> Option<&'a ColumnDescriptor> {
    columns.iter().find(|c| c.name == name)
}

/// Projection of one column. NUMERIC is read back as float8 and OID as int8 so both decode
/// as numbers; types rows cannot decode natively are read back as their text form.
fn select_expr(c: &ColumnDescriptor) -> String {
    let q = quoted(&c.name);
    let cast = match c.semantic_type {
        SemanticType::Numeric => match c.db_type_name.to_ascii_uppercase().as_str() {
            "NUMERIC" | "DECIMAL" => Some("float8"),
            "OID" => Some("int8"),
            _ => None,
        },
        _ if !c.decodes_natively() => Some("text"),
        _ => None,
    };
    match cast {
        Some(t) => format!("{}::{} AS {}", q, t, q),
        None => q,
    }
}

/// SELECT list in catalog order.
fn select_column_list(columns: &[ColumnDescriptor]) -> String {
    if columns.is_empty() {
        return "*".to_string();
    }
    columns.iter().map(select_expr).collect::<Vec<_>>().join(", ")
}

/// RETURNING projection for the primary key, decoded like any listed column.
fn returning(columns: &[ColumnDescriptor], pk: &str) -> String {
    match find(columns, pk) {
        Some(c) => select_expr(c),
        None => quoted(pk),
    }
}

/// SELECT a window of rows in the table's natural order.
pub fn select_list(table: &str, columns: &[ColumnDescriptor], limit: u32, offset: u32) -> QueryBuf {
    let mut q = QueryBuf::new();
    let limit_ph = q.push_param(FieldValue::Int(i64::from(limit)));
    let offset_ph = q.push_param(FieldValue::Int(i64::from(offset)));
    q.sql = format!(
        "SELECT {} FROM {} LIMIT ${} OFFSET ${}",
        select_column_list(columns),
        quoted(table),
        limit_ph,
        offset_ph
    );
    q
}

/// SELECT one row by primary key.
pub fn select_by_id(table: &str, columns: &[ColumnDescriptor], pk: &str, id: &str) -> QueryBuf {
    let mut q = QueryBuf::new();
    let ph = q.placeholder(FieldValue::String(id.to_string()), find(columns, pk));
    q.sql = format!(
        "SELECT {} FROM {} WHERE {} = {}",
        select_column_list(columns),
        quoted(table),
        quoted(pk),
        ph
    );
    q
}

/// INSERT the catalog columns present in `fields`, in catalog order, returning the primary key.
pub fn insert(table: &str, fields: &FieldMap, columns: &[ColumnDescriptor], pk: &str) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut cols = Vec::new();
    let mut placeholders = Vec::new();
    for column in columns {
        if let Some(value) = fields.get(&column.name) {
            placeholders.push(q.placeholder(value.clone(), Some(column)));
            cols.push(quoted(&column.name));
        }
    }
    if cols.is_empty() {
        q.sql = format!("INSERT INTO {} DEFAULT VALUES RETURNING {}", quoted(table), returning(columns, pk));
        return q;
    }
    q.sql = format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
        quoted(table),
        cols.join(", "),
        placeholders.join(", "),
        returning(columns, pk)
    );
    q
}

/// UPDATE by id: one assignment per field. Returns None when there is nothing to set.
pub fn update(
    table: &str,
    fields: &FieldMap,
    columns: &[ColumnDescriptor],
    pk: &str,
    id: &str,
) -> Option<QueryBuf> {
    if fields.is_empty() {
        return None;
    }
    let mut q = QueryBuf::new();
    let sets: Vec<String> = fields
        .iter()
        .map(|(k, v)| format!("{} = {}", quoted(k), q.placeholder(v.clone(), find(columns, k))))
        .collect();
    let id_ph = q.placeholder(FieldValue::String(id.to_string()), find(columns, pk));
    q.sql = format!(
        "UPDATE {} SET {} WHERE {} = {}",
        quoted(table),
        sets.join(", "),
        quoted(pk),
        id_ph
    );
    Some(q)
}

/// DELETE by id.
pub fn delete(table: &str, columns: &[ColumnDescriptor], pk: &str, id: &str) -> QueryBuf {
    let mut q = QueryBuf::new();
    let ph = q.placeholder(FieldValue::String(id.to_string()), find(columns, pk));
    q.sql = format!("DELETE FROM {} WHERE {} = {}", quoted(table), quoted(pk), ph);
    q
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns() -> Vec<ColumnDescriptor> {
        vec![
            ColumnDescriptor::new("id", "INT4", false),
            ColumnDescriptor::new("title", "VARCHAR", false),
            ColumnDescriptor::new("price", "NUMERIC", true),
            ColumnDescriptor::new("updated", "TEXT", true),
        ]
    }

    #[test]
    fn quotes_identifiers() {
        assert_eq!(quoted("items"), "\"items\"");
        assert_eq!(quoted("we\"ird"), "\"we\"\"ird\"");
    }

    #[test]
    fn list_window() {
        let q = select_list("items", &columns(), 5, 10);
        assert_eq!(
            q.sql,
            "SELECT \"id\", \"title\", \"price\"::float8 AS \"price\", \"updated\" FROM \"items\" LIMIT $1 OFFSET $2"
        );
        assert_eq!(q.params, vec![FieldValue::Int(5), FieldValue::Int(10)]);
    }

    #[test]
    fn select_one_casts_id_to_pk_type() {
        let q = select_by_id("items", &columns(), "id", "7");
        assert!(q.sql.ends_with("FROM \"items\" WHERE \"id\" = $1::INT4"));
        assert_eq!(q.params, vec![FieldValue::String("7".into())]);
    }

    #[test]
    fn insert_in_catalog_order() {
        let mut fields = FieldMap::new();
        fields.insert("updated".into(), FieldValue::Null);
        fields.insert("title".into(), FieldValue::String("x".into()));
        let q = insert("items", &fields, &columns(), "id");
        assert_eq!(
            q.sql,
            "INSERT INTO \"items\" (\"title\", \"updated\") VALUES ($1::VARCHAR, $2::TEXT) RETURNING \"id\""
        );
        assert_eq!(q.params, vec![FieldValue::String("x".into()), FieldValue::Null]);
    }

    #[test]
    fn insert_skips_keys_outside_the_catalog() {
        let mut fields = FieldMap::new();
        fields.insert("title".into(), FieldValue::String("x".into()));
        fields.insert("ghost".into(), FieldValue::Int(1));
        let q = insert("items", &fields, &columns(), "id");
        assert_eq!(q.sql, "INSERT INTO \"items\" (\"title\") VALUES ($1::VARCHAR) RETURNING \"id\"");
        assert_eq!(q.params.len(), 1);
    }

    #[test]
    fn fixed_width_char_casts_keep_their_length() {
        let cols = vec![
            ColumnDescriptor::new("code", "CHAR", false),
            ColumnDescriptor::new("flag", "\"CHAR\"", true),
        ];
        let mut fields = FieldMap::new();
        fields.insert("code".into(), FieldValue::String("ABC".into()));
        let q = insert("countries", &fields, &cols, "code");
        assert_eq!(
            q.sql,
            "INSERT INTO \"countries\" (\"code\") VALUES ($1::bpchar) RETURNING \"code\""
        );
        let q = select_by_id("countries", &cols, "code", "ABC");
        assert!(q.sql.ends_with("WHERE \"code\" = $1::bpchar"));
        assert!(q.sql.contains("\"flag\"::text AS \"flag\""));
    }

    #[test]
    fn projection_reads_other_types_as_text() {
        let cols = vec![
            ColumnDescriptor::new("id", "OID", false),
            ColumnDescriptor::new("span", "INTERVAL", true),
            ColumnDescriptor::new("addr", "INET", true),
            ColumnDescriptor::new("tags", "TEXT[]", true),
            ColumnDescriptor::new("done", "BOOL", false),
            ColumnDescriptor::new("at", "TIMESTAMPTZ", true),
            ColumnDescriptor::new("meta", "JSONB", true),
        ];
        let q = select_list("events", &cols, 5, 0);
        assert_eq!(
            q.sql,
            "SELECT \"id\"::int8 AS \"id\", \"span\"::text AS \"span\", \"addr\"::text AS \"addr\", \
             \"tags\"::text AS \"tags\", \"done\", \"at\", \"meta\" FROM \"events\" LIMIT $1 OFFSET $2"
        );
    }

    #[test]
    fn returning_projects_the_key_like_a_listed_column() {
        let cols = vec![
            ColumnDescriptor::new("id", "INTERVAL", false),
            ColumnDescriptor::new("label", "TEXT", true),
        ];
        let q = insert("spans", &FieldMap::new(), &cols, "id");
        assert_eq!(q.sql, "INSERT INTO \"spans\" DEFAULT VALUES RETURNING \"id\"::text AS \"id\"");
    }

    #[test]
    fn insert_without_fields_uses_defaults() {
        let q = insert("items", &FieldMap::new(), &columns(), "id");
        assert_eq!(q.sql, "INSERT INTO \"items\" DEFAULT VALUES RETURNING \"id\"");
        assert!(q.params.is_empty());
    }

    #[test]
    fn update_assigns_every_field() {
        let mut fields = FieldMap::new();
        fields.insert("title".into(), FieldValue::String("new".into()));
        fields.insert("updated".into(), FieldValue::Null);
        let q = update("items", &fields, &columns(), "id", "3").unwrap();
        assert_eq!(
            q.sql,
            "UPDATE \"items\" SET \"title\" = $1::VARCHAR, \"updated\" = $2::TEXT WHERE \"id\" = $3::INT4"
        );
        assert_eq!(q.params.len(), 3);
        assert_eq!(q.params[2], FieldValue::String("3".into()));
    }

    #[test]
    fn update_with_nothing_to_set() {
        assert!(update("items", &FieldMap::new(), &columns(), "id", "3").is_none());
    }

    #[test]
    fn delete_by_id() {
        let q = delete("items", &columns(), "id", "3");
        assert_eq!(q.sql, "DELETE FROM \"items\" WHERE \"id\" = $1::INT4");
    }
}
