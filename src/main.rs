use std::sync::Arc;

use pipeline_ingest::{
    config::Config,
    server::{create_router, shutdown_signal},
    services::EventHubProducerFactory,
    AppState,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    let config = Config::from_env()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "pipeline_ingest=debug,tower_http=debug".into());
    if config.json_logs {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    let settings = config.event_hub();
    info!(
        hub = %settings.hub_name,
        credential_configured = settings.connection_string.is_some(),
        "Starting pipeline ingest server..."
    );
    if settings.connection_string.is_none() {
        tracing::warn!("EH__ConnectionString is not set; every publish will fail");
    }

    let addr = config.bind_addr();
    let state = AppState::new(config, Arc::new(EventHubProducerFactory::new()));
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}
