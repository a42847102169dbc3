//! HTTP endpoint handlers.
//!
//! The relay endpoint answers 200 OK for every outcome. Whether the tickets
//! reached Jira is reported only through the envelope's `status` field.

use axum::{body::Bytes, extract::State, Json};
use serde::Serialize;
use tracing::info;

use crate::relay::{Relay, ResultEnvelope};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub relay: Relay,
}

impl AppState {
    pub fn new(relay: Relay) -> Self {
        Self { relay }
    }
}

// =============================================================================
// Health Check
// =============================================================================

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

// =============================================================================
// Ticket Webhook
// =============================================================================

/// Ticket webhook endpoint.
///
/// The body is taken as raw bytes so empty and malformed payloads reach the
/// relay and get a proper envelope instead of an extractor rejection. The
/// router lifts axum's default body limit for the same reason.
pub async fn ticket_webhook(State(state): State<AppState>, body: Bytes) -> Json<ResultEnvelope> {
    let envelope = state.relay.handle(&body).await;
    let outcome = if envelope.is_success() { "success" } else { "error" };

    info!(
        outcome = outcome,
        envelope_message = %envelope.message,
        "ticket_webhook_complete"
    );

    Json(envelope)
}
