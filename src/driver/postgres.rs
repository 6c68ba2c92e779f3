//! `Driver` over a sqlx PostgreSQL pool.

use crate::driver::Driver;
use crate::schema::ColumnDescriptor;
use crate::sql::{bind_params, quoted, QueryBuf};
use crate::value::{FieldValue, Record};
use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{Column, Executor, PgPool, Row, TypeInfo, ValueRef};

const LIST_TABLES: &str = r#"
    SELECT table_name::text
    FROM information_schema.tables
    WHERE table_schema = current_schema()
      AND table_type = 'BASE TABLE'
    ORDER BY table_name
"#;

const PRIMARY_KEY: &str = r#"
    SELECT kcu.column_name::text
    FROM information_schema.table_constraints tc
    JOIN information_schema.key_column_usage kcu
      ON tc.constraint_name = kcu.constraint_name
     AND tc.table_schema = kcu.table_schema
     AND tc.table_name = kcu.table_name
    WHERE tc.constraint_type = 'PRIMARY KEY'
      AND tc.table_schema = current_schema()
      AND tc.table_name = $1
    ORDER BY kcu.ordinal_position
"#;

#[derive(Clone)]
pub struct PgDriver {
    pool: PgPool,
}

impl PgDriver {
    pub fn new(pool: PgPool) -> Self {
        PgDriver { pool }
    }
}

#[async_trait]
impl Driver for PgDriver {
    async fn list_tables(&self) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(LIST_TABLES)
            .fetch_all(&self.pool)
            .await
    }

    async fn describe_table(&self, table: &str) -> Result<Vec<ColumnDescriptor>, sqlx::Error> {
        let sql = format!("SELECT * FROM {} LIMIT 0", quoted(table));
        let described = (&self.pool).describe(&sql).await?;
        let columns = described
            .columns()
            .iter()
            .enumerate()
            .map(|(i, c)| {
                // Unknown nullability (computed columns) is treated as nullable.
                let nullable = described.nullable(i).unwrap_or(true);
                ColumnDescriptor::new(c.name(), c.type_info().name(), nullable)
            })
            .collect();
        Ok(columns)
    }

    async fn primary_key_columns(&self, table: &str) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(PRIMARY_KEY)
            .bind(table)
            .fetch_all(&self.pool)
            .await
    }

    async fn fetch_rows(&self, q: &QueryBuf, columns: &[ColumnDescriptor]) -> Result<Vec<Record>, sqlx::Error> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let rows = bind_params(sqlx::query(&q.sql), &q.params)
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(|row| decode_row(row, columns)).collect()
    }

    async fn fetch_value(&self, q: &QueryBuf, column: &ColumnDescriptor) -> Result<FieldValue, sqlx::Error> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let row = bind_params(sqlx::query(&q.sql), &q.params)
            .fetch_one(&self.pool)
            .await?;
        decode_cell(&row, 0, column)
    }

    async fn execute(&self, q: &QueryBuf) -> Result<u64, sqlx::Error> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "exec");
        let done = bind_params(sqlx::query(&q.sql), &q.params)
            .execute(&self.pool)
            .await?;
        Ok(done.rows_affected())
    }
}

fn decode_row(row: &PgRow, columns: &[ColumnDescriptor]) -> Result<Record, sqlx::Error> {
    let mut record = Record::new();
    for (i, column) in columns.iter().enumerate() {
        record.insert(column.name.clone(), decode_cell(row, i, column)?);
    }
    Ok(record)
}

/// String-like columns go through a nullable-string capture; everything else through the
/// typed cascade. The SELECT list casts types outside the cascade to text, so a non-null cell
/// that still fails every decoder is an error, never a silent null.
fn decode_cell(row: &PgRow, i: usize, column: &ColumnDescriptor) -> Result<FieldValue, sqlx::Error> {
    if column.is_string_like() {
        let v: Option<String> = row.try_get(i)?;
        return Ok(v.map(FieldValue::String).unwrap_or(FieldValue::Null));
    }
    if row.try_get_raw(i)?.is_null() {
        return Ok(FieldValue::Null);
    }
    decode_untyped(row, i)
}

fn decode_untyped(row: &PgRow, i: usize) -> Result<FieldValue, sqlx::Error> {
    if let Ok(n) = row.try_get::<i16, _>(i) {
        return Ok(FieldValue::Int(n.into()));
    }
    if let Ok(n) = row.try_get::<i32, _>(i) {
        return Ok(FieldValue::Int(n.into()));
    }
    if let Ok(n) = row.try_get::<i64, _>(i) {
        return Ok(FieldValue::Int(n));
    }
    if let Ok(n) = row.try_get::<f32, _>(i) {
        return Ok(FieldValue::Float(n.into()));
    }
    if let Ok(n) = row.try_get::<f64, _>(i) {
        return Ok(FieldValue::Float(n));
    }
    if let Ok(b) = row.try_get::<bool, _>(i) {
        return Ok(FieldValue::Bool(b));
    }
    if let Ok(u) = row.try_get::<uuid::Uuid, _>(i) {
        return Ok(FieldValue::String(u.to_string()));
    }
    if let Ok(d) = row.try_get::<chrono::DateTime<chrono::Utc>, _>(i) {
        return Ok(FieldValue::String(d.to_rfc3339()));
    }
    if let Ok(d) = row.try_get::<chrono::NaiveDateTime, _>(i) {
        return Ok(FieldValue::String(d.format("%Y-%m-%dT%H:%M:%S%.f").to_string()));
    }
    if let Ok(d) = row.try_get::<chrono::NaiveDate, _>(i) {
        return Ok(FieldValue::String(d.format("%Y-%m-%d").to_string()));
    }
    if let Ok(t) = row.try_get::<chrono::NaiveTime, _>(i) {
        return Ok(FieldValue::String(t.format("%H:%M:%S%.f").to_string()));
    }
    if let Ok(s) = row.try_get::<String, _>(i) {
        return Ok(FieldValue::String(s));
    }
    if let Ok(j) = row.try_get::<serde_json::Value, _>(i) {
        return Ok(FieldValue::from_json(&j).unwrap_or_else(|| FieldValue::String(j.to_string())));
    }
    let type_name = row.column(i).type_info().name().to_string();
    tracing::warn!(column = i, db_type = %type_name, "no decoder for non-null cell");
    Err(sqlx::Error::ColumnDecode {
        index: i.to_string(),
        source: format!("no decoder for type {}", type_name).into(),
    })
}
