//! Router assembly and shutdown handling.

use axum::{
    routing::{get, post},
    Router,
};
use tokio::signal;

use crate::{handlers, AppState};

pub const INVENTORY_ROUTE: &str = "/api/PipelineInventory";
pub const PIPELINE_STATUS_ROUTE: &str = "/api/pipeline-status";

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route(INVENTORY_ROUTE, post(handlers::ingest_inventory))
        .route(PIPELINE_STATUS_ROUTE, post(handlers::ingest_pipeline_status))
        .layer(tower_http::cors::CorsLayer::permissive())
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
