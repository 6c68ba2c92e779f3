//! The service object: catalog, driver and router, plus the axum entry point.

use crate::driver::Driver;
use crate::error::{AppError, StartupError};
use crate::handlers;
use crate::routes::{table_routes, Endpoint, Router};
use crate::schema::SchemaCatalog;
use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, FromRequest, Query, Request, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::collections::HashMap;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::limit::RequestBodyLimitLayer;

pub const DEFAULT_BODY_LIMIT: usize = 1024 * 1024;

pub struct Explorer {
    state: AppState,
    router: Router<Endpoint>,
    body_limit: usize,
}

impl Explorer {
    /// Discover the schema through `driver` and build the route table.
    pub async fn new(driver: Arc<dyn Driver>) -> Result<Self, StartupError> {
        let catalog = SchemaCatalog::load(driver.as_ref()).await?;
        Self::with_catalog(driver, catalog)
    }

    pub fn with_catalog(driver: Arc<dyn Driver>, catalog: SchemaCatalog) -> Result<Self, StartupError> {
        Ok(Explorer {
            state: AppState {
                driver,
                catalog: Arc::new(catalog),
            },
            router: table_routes()?,
            body_limit: DEFAULT_BODY_LIMIT,
        })
    }

    pub fn with_body_limit(mut self, limit: usize) -> Self {
        self.body_limit = limit;
        self
    }

    pub fn catalog(&self) -> &SchemaCatalog {
        &self.state.catalog
    }

    /// Dispatch one request through the route table. Unmatched requests get a bare 404.
    pub async fn handle(&self, request: Request) -> Response {
        let method = request.method().clone();
        let uri = request.uri().clone();
        let Some(matched) = self.router.resolve(&method, uri.path()) else {
            tracing::debug!(method = %method, path = %uri.path(), "no route");
            return StatusCode::NOT_FOUND.into_response();
        };
        let table = matched.param(0);
        let id = matched.param(1);
        let state = &self.state;

        let result = match matched.handler {
            Endpoint::ListTables => handlers::list_tables(state).await,
            Endpoint::ListRecords => {
                let query = Query::<HashMap<String, String>>::try_from_uri(&uri)
                    .map(|Query(q)| q)
                    .unwrap_or_default();
                handlers::list_records(state, table, &query).await
            }
            Endpoint::GetRecord => handlers::read_record(state, table, id).await,
            Endpoint::CreateRecord => match read_body(request).await {
                Ok(bytes) => handlers::create_record(state, table, &bytes).await,
                Err(e) => Err(e),
            },
            Endpoint::UpdateRecord => match read_body(request).await {
                Ok(bytes) => handlers::update_record(state, table, id, &bytes).await,
                Err(e) => Err(e),
            },
            Endpoint::DeleteRecord => handlers::delete_record(state, table, id).await,
        };
        result.unwrap_or_else(IntoResponse::into_response)
    }

    /// axum app serving every request through [`Explorer::handle`]. `body_limit` is the only cap
    /// on request bodies.
    pub fn into_router(self) -> axum::Router {
        let limit = self.body_limit;
        axum::Router::new()
            .fallback(dispatch)
            .with_state(Arc::new(self))
            .layer(
                ServiceBuilder::new()
                    .layer(DefaultBodyLimit::disable())
                    .layer(RequestBodyLimitLayer::new(limit)),
            )
    }
}

async fn dispatch(State(explorer): State<Arc<Explorer>>, request: Request) -> Response {
    explorer.handle(request).await
}

/// Buffer the request body. Streams cut off by the body limit map to 413.
async fn read_body(request: Request) -> Result<Bytes, AppError> {
    Bytes::from_request(request, &()).await.map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge
        } else {
            AppError::MalformedPayload(rejection.body_text())
        }
    })
}
