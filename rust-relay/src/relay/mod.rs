//! Ticket relay: inbound webhook body in, Jira webhook call out.
//!
//! ## Processing Flow
//!
//! ```text
//! raw body → parse_body() → select_tickets() → JiraWebhookClient::send_issues() → ResultEnvelope
//! ```
//!
//! Every step that can fail ends the request with an error envelope.
//! Nothing is retried.

pub mod envelope;
pub mod tickets;

use tracing::{error, info};

use crate::jira::{DeliveryError, JiraWebhookClient};
use crate::Config;

pub use envelope::{decode_body, EnvelopeDetail, EnvelopeStatus, ResultEnvelope};
pub use tickets::{parse_body, select_tickets, TicketsError, MAX_SELECTED_TICKETS};

/// Handles one inbound webhook body at a time.
#[derive(Clone)]
pub struct Relay {
    jira: JiraWebhookClient,
}

impl Relay {
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        Ok(Self {
            jira: JiraWebhookClient::new(config)?,
        })
    }

    /// Validate the body, sample its tickets and forward them to Jira.
    pub async fn handle(&self, raw_body: &[u8]) -> ResultEnvelope {
        info!(
            body = %String::from_utf8_lossy(raw_body),
            body_length = raw_body.len(),
            "relay_request_received"
        );

        let (document, tickets) = match parse_body(raw_body) {
            Ok(parsed) => parsed,
            Err(e) => {
                match &e {
                    TicketsError::InvalidJson(cause) => {
                        error!(error = %cause, "relay_invalid_json")
                    }
                    _ => error!(reason = %e, "relay_request_rejected"),
                }
                return ResultEnvelope::error(e.to_string());
            }
        };

        info!(document = %document, ticket_count = tickets.len(), "relay_payload_decoded");

        let selected = select_tickets(tickets, &mut rand::thread_rng());

        info!(
            issues = %serde_json::Value::Array(selected.clone()),
            selected_count = selected.len(),
            "jira_payload_outgoing"
        );

        match self.jira.send_issues(&selected).await {
            Ok(delivered) => {
                info!(
                    status_code = delivered.status.as_u16(),
                    body = %String::from_utf8_lossy(&delivered.body),
                    "jira_response_received"
                );
                ResultEnvelope::sent(decode_body(&delivered.body))
            }
            Err(DeliveryError::Rejected { status, body }) => {
                error!(
                    status_code = status.as_u16(),
                    body = %String::from_utf8_lossy(&body),
                    "jira_error_response"
                );
                ResultEnvelope::jira_rejected(decode_body(&body))
            }
            Err(e @ DeliveryError::Transport(_)) => {
                error!(error = %e, "jira_request_failed");
                ResultEnvelope::request_failed(e.to_string())
            }
        }
    }
}
