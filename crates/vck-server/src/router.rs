use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handler;
use crate::state::AppState;

/// Build the axum router: the slash-command endpoint plus a health check.
pub fn build_router(state: AppState) -> Router {
    let endpoint = state.config.endpoint.clone();
    Router::new()
        .route("/health", get(handler::health_handler))
        .route(&endpoint, post(handler::slash_command))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
