//! HTTP API for flight lookups and invite downloads.

mod routes;
mod state;

use std::net::SocketAddr;

use anyhow::{Context, Result};
use axum::{Router, routing::get};
use tower_http::cors::{Any, CorsLayer};

pub use state::AppState;

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .merge(routes::flights::router())
        .with_state(state)
        .layer(cors)
}

pub async fn serve(state: AppState, port: u16) -> Result<()> {
    let addr = SocketAddr::from(([127, 0, 0, 1], port));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Could not bind to {addr}"))?;
    log::info!("flight2ics listening on http://{}", addr);

    axum::serve(listener, router(state)).await?;

    Ok(())
}
