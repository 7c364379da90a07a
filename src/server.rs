//! HTTP server for the Trello intake service.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::{get, post};
use axum::Router;
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::handlers::cards::create_card;
use crate::secrets::SecretStore;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Configuration.
    pub config: Config,
    /// Secret backend.
    pub secrets: Arc<dyn SecretStore>,
}

/// Build the HTTP router for the intake service.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/cards", post(create_card))
        // Health check
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

/// Readiness check endpoint.
async fn readiness_check(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    if !state.secrets.configured() {
        return Err(StatusCode::SERVICE_UNAVAILABLE);
    }
    Ok(Json(json!({
        "status": "ready",
        "secret_backend": state.secrets.name()
    })))
}
