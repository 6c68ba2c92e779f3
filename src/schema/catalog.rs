//! Table names and per-table columns, discovered once at startup and read-only afterwards.

use crate::driver::Driver;
use crate::error::StartupError;
use crate::schema::ColumnDescriptor;
use std::collections::{HashMap, HashSet};

#[derive(Clone, Debug, Default)]
pub struct SchemaCatalog {
    tables: Vec<String>,
    columns: HashMap<String, Vec<ColumnDescriptor>>,
}

impl SchemaCatalog {
    /// Build the catalog from already discovered tables. Duplicate table names keep their first entry.
    pub fn new<I>(tables: I) -> Self
    where
        I: IntoIterator<Item = (String, Vec<ColumnDescriptor>)>,
    {
        let mut catalog = SchemaCatalog::default();
        for (table, columns) in tables {
            if catalog.columns.contains_key(&table) {
                continue;
            }
            catalog.tables.push(table.clone());
            catalog.columns.insert(table, columns);
        }
        catalog
    }

    /// Discover every table and its columns. Any unreadable table aborts the whole load.
    pub async fn load(driver: &dyn Driver) -> Result<Self, StartupError> {
        let names = driver.list_tables().await.map_err(StartupError::ListTables)?;
        let mut seen = HashSet::new();
        let mut tables = Vec::with_capacity(names.len());
        for table in names {
            if !seen.insert(table.clone()) {
                continue;
            }
            let columns = driver
                .describe_table(&table)
                .await
                .map_err(|source| StartupError::Columns {
                    table: table.clone(),
                    source,
                })?;
            tracing::debug!(table = %table, columns = columns.len(), "discovered table");
            tables.push((table, columns));
        }
        let catalog = SchemaCatalog::new(tables);
        tracing::info!(tables = catalog.tables.len(), "schema catalog loaded");
        Ok(catalog)
    }

    pub fn tables(&self) -> &[String] {
        &self.tables
    }

    pub fn columns_of(&self, table: &str) -> Option<&[ColumnDescriptor]> {
        self.columns.get(table).map(Vec::as_slice)
    }

    pub fn is_known_table(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }
}
