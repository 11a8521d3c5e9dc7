// ABOUTME: HTTP server assembly and lifecycle for the routine coach
// ABOUTME: Merges route groups, adds request tracing, and serves until shutdown
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::resources::ServerResources;
use crate::routes::{ApiRoutes, HealthRoutes, RoutineRoutes};

/// Build the application router
pub fn router(resources: Arc<ServerResources>) -> Router {
    Router::new()
        .merge(RoutineRoutes::routes(Arc::clone(&resources)))
        .merge(ApiRoutes::routes(Arc::clone(&resources)))
        .merge(HealthRoutes::routes(resources))
        .layer(TraceLayer::new_for_http())
}

/// Serve on `port` until Ctrl+C
///
/// # Errors
///
/// Returns an error if the port cannot be bound or the server fails.
pub async fn run(resources: Arc<ServerResources>, port: u16) -> Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind HTTP listener on {addr}"))?;

    info!("Routine Coach listening on http://{addr}");

    axum::serve(listener, router(resources))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server terminated with error")
}

async fn shutdown_signal() {
    if signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
