//! The fixed route set for table CRUD.

use crate::routes::Router;
use axum::http::Method;

/// Which handler a matched route dispatches to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endpoint {
    ListTables,
    ListRecords,
    GetRecord,
    CreateRecord,
    DeleteRecord,
    UpdateRecord,
}

const ROOT: &str = "/";
const TABLE: &str = "/([^/]+)";
const TABLE_SLASH: &str = "/([^/]+)/";
const ITEM: &str = "/([^/]+)/([^/]+)";

/// Routes in precedence order. Captures: table name, then record id.
pub fn table_routes() -> Result<Router<Endpoint>, regex::Error> {
    let mut router = Router::new();
    router
        .handle(Method::GET, ROOT, Endpoint::ListTables)?
        .handle(Method::GET, TABLE, Endpoint::ListRecords)?
        .handle(Method::GET, ITEM, Endpoint::GetRecord)?
        .handle(Method::PUT, TABLE_SLASH, Endpoint::CreateRecord)?
        .handle(Method::DELETE, ITEM, Endpoint::DeleteRecord)?
        .handle(Method::POST, ITEM, Endpoint::UpdateRecord)?;
    Ok(router)
}
