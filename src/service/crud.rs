//! Generic CRUD execution over any discovered table.

use crate::driver::Driver;
use crate::error::AppError;
use crate::pagination::Pagination;
use crate::schema::ColumnDescriptor;
use crate::sql::{delete, insert, select_by_id, select_list, update};
use crate::value::{FieldMap, FieldValue, Record};

pub struct CrudService;

impl CrudService {
    /// Window of rows in the table's natural order.
    pub async fn list(
        driver: &dyn Driver,
        table: &str,
        columns: &[ColumnDescriptor],
        pagination: Pagination,
    ) -> Result<Vec<Record>, sqlx::Error> {
        let q = select_list(table, columns, pagination.limit, pagination.offset);
        driver.fetch_rows(&q, columns).await
    }

    /// Fetch one row by primary key. `None` when no row matches.
    pub async fn read(
        driver: &dyn Driver,
        table: &str,
        columns: &[ColumnDescriptor],
        pk: &str,
        id: &str,
    ) -> Result<Option<Record>, sqlx::Error> {
        let q = select_by_id(table, columns, pk, id);
        let rows = driver.fetch_rows(&q, columns).await?;
        Ok(rows.into_iter().next())
    }

    /// Insert the sanitized fields. Returns the engine-assigned primary key.
    pub async fn create(
        driver: &dyn Driver,
        table: &str,
        fields: &FieldMap,
        columns: &[ColumnDescriptor],
        pk: &str,
    ) -> Result<FieldValue, sqlx::Error> {
        let q = insert(table, fields, columns, pk);
        let pk_column = columns
            .iter()
            .find(|c| c.name == pk)
            .cloned()
            .unwrap_or_else(|| ColumnDescriptor::new(pk, "", true));
        driver.fetch_value(&q, &pk_column).await
    }

    /// Update one row by id. Returns rows affected; an empty field map touches nothing.
    pub async fn update(
        driver: &dyn Driver,
        table: &str,
        fields: &FieldMap,
        columns: &[ColumnDescriptor],
        pk: &str,
        id: &str,
    ) -> Result<u64, sqlx::Error> {
        match update(table, fields, columns, pk, id) {
            Some(q) => driver.execute(&q).await,
            None => Ok(0),
        }
    }

    /// Delete one row by id. Returns rows affected.
    pub async fn delete(
        driver: &dyn Driver,
        table: &str,
        columns: &[ColumnDescriptor],
        pk: &str,
        id: &str,
    ) -> Result<u64, sqlx::Error> {
        let q = delete(table, columns, pk, id);
        driver.execute(&q).await
    }

    /// The table's sole primary-key column. Not cached: looked up on every call.
    pub async fn resolve_primary_key(driver: &dyn Driver, table: &str) -> Result<String, AppError> {
        let mut keys = driver.primary_key_columns(table).await?;
        if keys.len() != 1 {
            return Err(AppError::PrimaryKey {
                table: table.to_string(),
                found: keys.len(),
            });
        }
        Ok(keys.remove(0))
    }
}
