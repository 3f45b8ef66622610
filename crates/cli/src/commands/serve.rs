use anyhow::Result;
use fauna_http::{AppState, cors_origins_from_env, create_router};
use std::sync::Arc;

use crate::open_store;

pub(crate) async fn run(port: u16, host: String) -> Result<()> {
    let store = open_store().await?;
    let origins = cors_origins_from_env();
    tracing::info!(origins = ?origins, "CORS allow-list");

    let router = create_router(Arc::new(AppState::new(store)), &origins);
    let addr = format!("{host}:{port}");
    tracing::info!("Starting HTTP server on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
