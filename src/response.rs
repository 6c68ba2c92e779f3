//! Response envelopes: `{"response": ...}` on success, `{"error": ...}` on failure.

use crate::value::{FieldValue, Record};
use axum::Json;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Serialize)]
pub struct Envelope<T> {
    pub response: T,
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Serialize)]
pub struct TablesPayload<'a> {
    pub tables: &'a [String],
}

#[derive(Serialize)]
pub struct RecordsPayload {
    pub records: Vec<Record>,
}

#[derive(Serialize)]
pub struct RecordPayload {
    pub record: Record,
}

#[derive(Serialize)]
pub struct UpdatedPayload {
    pub updated: u8,
}

#[derive(Serialize)]
pub struct DeletedPayload {
    pub deleted: u8,
}

/// `{<primary key name>: <new id>}`
pub type CreatedPayload = BTreeMap<String, FieldValue>;

pub fn success<T: Serialize>(response: T) -> Json<Envelope<T>> {
    Json(Envelope { response })
}

pub fn error_body(message: String) -> Json<ErrorBody> {
    Json(ErrorBody { error: message })
}

/// Rows affected collapsed to the 0/1 flag exposed by update and delete.
pub fn affected_flag(rows: u64) -> u8 {
    u8::from(rows > 0)
}
