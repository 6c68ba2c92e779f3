//! Table handlers: list tables, list, read, create, update, delete records.

use crate::error::AppError;
use crate::pagination::Pagination;
use crate::response::{
    affected_flag, success, CreatedPayload, DeletedPayload, RecordPayload, RecordsPayload, TablesPayload,
    UpdatedPayload,
};
use crate::service::{CrudService, FieldValidator, ValidationOptions};
use crate::state::AppState;
use axum::response::{IntoResponse, Response};
use serde_json::{Map, Value};
use std::collections::HashMap;

fn parse_body(body: &[u8]) -> Result<Map<String, Value>, AppError> {
    serde_json::from_slice(body).map_err(|e| AppError::MalformedPayload(e.to_string()))
}

pub async fn list_tables(state: &AppState) -> Result<Response, AppError> {
    Ok(success(TablesPayload {
        tables: state.catalog.tables(),
    })
    .into_response())
}

pub async fn list_records(
    state: &AppState,
    table: &str,
    query: &HashMap<String, String>,
) -> Result<Response, AppError> {
    let columns = state.table_columns(table)?;
    let pagination = Pagination::from_query(query);
    let records = CrudService::list(state.driver.as_ref(), table, columns, pagination).await?;
    Ok(success(RecordsPayload { records }).into_response())
}

pub async fn read_record(state: &AppState, table: &str, id: &str) -> Result<Response, AppError> {
    let columns = state.table_columns(table)?;
    let pk = CrudService::resolve_primary_key(state.driver.as_ref(), table).await?;
    let record = match CrudService::read(state.driver.as_ref(), table, columns, &pk, id).await {
        Ok(record) => record,
        Err(e) => {
            tracing::debug!(table = %table, id = %id, error = %e, "read failed");
            None
        }
    };
    let record = record.ok_or(AppError::NotFound)?;
    Ok(success(RecordPayload { record }).into_response())
}

pub async fn create_record(state: &AppState, table: &str, body: &[u8]) -> Result<Response, AppError> {
    let columns = state.table_columns(table)?;
    let submitted = parse_body(body)?;
    let pk = CrudService::resolve_primary_key(state.driver.as_ref(), table).await?;
    let fields = FieldValidator::validate(&submitted, columns, &pk, ValidationOptions::CREATE)?;
    let id = CrudService::create(state.driver.as_ref(), table, &fields, columns, &pk)
        .await
        .map_err(AppError::Execution)?;
    tracing::info!(table = %table, id = %id, "record created");
    let payload: CreatedPayload = [(pk, id)].into_iter().collect();
    Ok(success(payload).into_response())
}

pub async fn update_record(state: &AppState, table: &str, id: &str, body: &[u8]) -> Result<Response, AppError> {
    let columns = state.table_columns(table)?;
    let submitted = parse_body(body)?;
    let pk = CrudService::resolve_primary_key(state.driver.as_ref(), table).await?;
    let fields = FieldValidator::validate(&submitted, columns, &pk, ValidationOptions::UPDATE)?;
    let affected = CrudService::update(state.driver.as_ref(), table, &fields, columns, &pk, id)
        .await
        .map_err(AppError::Execution)?;
    Ok(success(UpdatedPayload {
        updated: affected_flag(affected),
    })
    .into_response())
}

pub async fn delete_record(state: &AppState, table: &str, id: &str) -> Result<Response, AppError> {
    let columns = state.table_columns(table)?;
    let pk = CrudService::resolve_primary_key(state.driver.as_ref(), table).await?;
    let affected = CrudService::delete(state.driver.as_ref(), table, columns, &pk, id).await?;
    Ok(success(DeletedPayload {
        deleted: affected_flag(affected),
    })
    .into_response())
}
