pub mod health;
pub mod ideas;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use ideas_handler::UpdateIdeaHandler;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub handler: Arc<UpdateIdeaHandler>,
}

/// Build the Axum router with all routes and middleware.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/v1/ideas/update", post(ideas::update_idea))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
