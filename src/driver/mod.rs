//! The engine seam: metadata discovery plus query/exec over built statements.

mod postgres;

pub use postgres::PgDriver;

use crate::schema::ColumnDescriptor;
use crate::sql::QueryBuf;
use crate::value::{FieldValue, Record};
use async_trait::async_trait;

#[async_trait]
pub trait Driver: Send + Sync {
    /// Names of every user table, in the engine's listing order.
    async fn list_tables(&self) -> Result<Vec<String>, sqlx::Error>;

    /// Column metadata read back from a zero-row projection of the table.
    async fn describe_table(&self, table: &str) -> Result<Vec<ColumnDescriptor>, sqlx::Error>;

    /// Primary-key column names from constraint metadata, in key order.
    async fn primary_key_columns(&self, table: &str) -> Result<Vec<String>, sqlx::Error>;

    /// Run a query and decode every row against `columns` (projection order).
    async fn fetch_rows(&self, q: &QueryBuf, columns: &[ColumnDescriptor]) -> Result<Vec<Record>, sqlx::Error>;

    /// Run a query returning one row and decode its first cell as `column`.
    async fn fetch_value(&self, q: &QueryBuf, column: &ColumnDescriptor) -> Result<FieldValue, sqlx::Error>;

    /// Run a statement and return the number of rows affected.
    async fn execute(&self, q: &QueryBuf) -> Result<u64, sqlx::Error>;
}
