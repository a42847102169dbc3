//! Web server module for the inbound ticket webhook.
//!
//! Routes:
//! - `POST /` relays a `{"tickets": [...]}` payload to Jira
//! - `GET /health` liveness probe

pub mod handlers;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

pub use handlers::{health, ticket_webhook, AppState, HealthResponse};

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", post(ticket_webhook))
        .route("/health", get(health))
        .layer(DefaultBodyLimit::disable())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
