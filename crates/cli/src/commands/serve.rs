use anyhow::Result;
use std::sync::Arc;
use teleprompter_http::{AppState, create_router};
use teleprompter_storage::Storage;

use super::{build_service, drain_propagation};

pub(crate) async fn run(storage: Storage, host: String, port: u16) -> Result<()> {
    let service = Arc::new(build_service(storage)?);
    let state = Arc::new(AppState::new(Arc::clone(&service)));

    let router = create_router(state);
    let addr = format!("{host}:{port}");
    tracing::info!("Starting HTTP server on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router).with_graceful_shutdown(shutdown_signal()).await?;

    tracing::info!(
        in_flight = service.propagator().in_flight().await,
        "HTTP server stopped, draining propagation"
    );
    drain_propagation(&service).await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
