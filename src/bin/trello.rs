//! Trello intake service binary.
//!
//! Standalone HTTP service that creates Trello cards from JSON requests.

use anyhow::{Context, Result};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use trello_intake::{config::Config, secrets, server};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("trello_intake=info".parse()?))
        .init();

    info!("Starting Trello intake service...");

    // Load configuration once; handlers never touch the environment
    let config = Config::from_env();

    let store = secrets::build_store(&config);
    info!(backend = store.name(), "Secret backend selected");
    if !store.configured() {
        warn!("VAULT_ADDRESS or VAULT_TOKEN is not set. Card requests will be rejected.");
    }

    // Build application state
    let state = server::AppState {
        config: config.clone(),
        secrets: store,
    };

    // Build router
    let app = server::build_router(state);

    // Bind and serve
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    info!(port = config.port, "Trello intake service listening");

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
