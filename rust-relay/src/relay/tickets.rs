//! Inbound body parsing and ticket sampling.
//!
//! The inbound body must be a JSON object carrying a non-empty `tickets`
//! array. Ticket values are opaque and forwarded untouched.

use rand::seq::SliceRandom;
use rand::Rng;
use serde_json::Value;
use thiserror::Error;

use super::envelope::{MSG_EMPTY_BODY, MSG_INVALID_JSON, MSG_INVALID_TICKETS};

/// Maximum number of tickets forwarded per request.
pub const MAX_SELECTED_TICKETS: usize = 5;

/// Reasons an inbound body is rejected before anything is sent.
///
/// The `Display` text is the message reported back to the caller.
#[derive(Debug, Error)]
pub enum TicketsError {
    #[error("{}", MSG_EMPTY_BODY)]
    EmptyBody,

    #[error("{}", MSG_INVALID_JSON)]
    InvalidJson(#[source] serde_json::Error),

    #[error("{}", MSG_INVALID_TICKETS)]
    InvalidTickets,
}

/// Parse a raw request body into the decoded document and its ticket list.
///
/// A body consisting of the single character `0` counts as empty.
pub fn parse_body(raw: &[u8]) -> Result<(Value, Vec<Value>), TicketsError> {
    if raw.is_empty() || raw == b"0" {
        return Err(TicketsError::EmptyBody);
    }

    let document: Value =
        serde_json::from_slice(trim_body(raw)).map_err(TicketsError::InvalidJson)?;

    let tickets = extract_tickets(&document)?;
    Ok((document, tickets))
}

/// Pull a non-empty `tickets` array out of a decoded document.
pub fn extract_tickets(document: &Value) -> Result<Vec<Value>, TicketsError> {
    match document.get("tickets") {
        Some(Value::Array(tickets)) if !tickets.is_empty() => Ok(tickets.clone()),
        _ => Err(TicketsError::InvalidTickets),
    }
}

/// Shuffle the tickets and keep the first [`MAX_SELECTED_TICKETS`].
pub fn select_tickets<R: Rng + ?Sized>(mut tickets: Vec<Value>, rng: &mut R) -> Vec<Value> {
    tickets.shuffle(rng);
    tickets.truncate(MAX_SELECTED_TICKETS);
    tickets
}

/// Strip surrounding whitespace, including NUL and vertical tab.
fn trim_body(raw: &[u8]) -> &[u8] {
    let is_space = |b: &u8| matches!(b, b' ' | b'\t' | b'\n' | b'\r' | b'\0' | b'\x0B');

    let start = raw.iter().position(|b| !is_space(b)).unwrap_or(raw.len());
    let end = raw.iter().rposition(|b| !is_space(b)).map_or(start, |i| i + 1);
    &raw[start..end]
}
