//! Serves every table of the configured PostgreSQL database as a CRUD API.
//!
//! Run from repo root: `cargo run -p db-explorer-server`

use db_explorer::{Explorer, PgDriver, Settings};
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("db_explorer=info,db_explorer_server=info")),
        )
        .init();

    let settings = Settings::from_env();
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .connect(&settings.database_url)
        .await?;

    let explorer = Explorer::new(Arc::new(PgDriver::new(pool))).await?;
    tracing::info!(tables = explorer.catalog().tables().len(), "schema discovered");
    let app = explorer.with_body_limit(settings.body_limit).into_router();

    let listener = TcpListener::bind(&settings.bind_addr).await?;
    tracing::info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
