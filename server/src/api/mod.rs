//! API Router and Application State
//!
//! Central routing configuration and shared state.

use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, State},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_http::trace::TraceLayer;

use crate::{config::Config, interactions};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Verifies and routes inbound interactions
    pub dispatcher: interactions::Dispatcher,
    /// Server configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(dispatcher: interactions::Dispatcher, config: Config) -> Self {
        Self {
            dispatcher,
            config: Arc::new(config),
        }
    }
}

/// Create the main application router.
pub fn create_router(state: AppState) -> Router {
    let max_body_bytes = state.config.max_body_bytes;

    Router::new()
        .route("/health", get(health_check))
        .route(
            "/interactions",
            post(interactions::handlers::receive_interaction),
        )
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .with_state(state)
}

/// Health check response.
#[derive(Serialize)]
struct HealthResponse {
    /// Service status
    status: &'static str,
    /// Routable command paths
    commands: usize,
    /// Routable component ids
    components: usize,
}

/// Health check endpoint.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let registry = state.dispatcher.registry();
    Json(HealthResponse {
        status: "ok",
        commands: registry.command_count(),
        components: registry.component_count(),
    })
}
