//! Shared state for every request. The catalog is read-only after startup.

use crate::driver::Driver;
use crate::error::AppError;
use crate::schema::{ColumnDescriptor, SchemaCatalog};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub driver: Arc<dyn Driver>,
    pub catalog: Arc<SchemaCatalog>,
}

impl AppState {
    /// Columns of a table named in a request path.
    pub fn table_columns(&self, table: &str) -> Result<&[ColumnDescriptor], AppError> {
        if !self.catalog.is_known_table(table) {
            return Err(AppError::UnknownTable);
        }
        self.catalog
            .columns_of(table)
            .ok_or_else(|| AppError::MissingColumns(table.to_string()))
    }
}
