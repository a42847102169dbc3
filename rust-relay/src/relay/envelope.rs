//! Result envelope returned to the webhook caller.
//!
//! Every outcome, success or failure, is reported with the same shape:
//!
//! ```text
//! {"status": "success" | "error", "message": "...", <detail>}
//! ```
//!
//! where `<detail>` is at most one of `response`, `jira_response` or `error`.

use serde::Serialize;
use serde_json::Value;

pub const MSG_EMPTY_BODY: &str = "Request body is empty";
pub const MSG_INVALID_JSON: &str = "Invalid JSON format";
pub const MSG_INVALID_TICKETS: &str = "Missing or invalid 'tickets' field";
pub const MSG_SENT: &str = "Data sent to Jira";
pub const MSG_JIRA_REJECTED: &str = "Failed to send data to Jira";
pub const MSG_REQUEST_FAILED: &str = "Request failed";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvelopeStatus {
    Success,
    Error,
}

/// Extra payload attached to an envelope.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvelopeDetail {
    /// Decoded body of a successful Jira response
    Response(Value),
    /// Decoded body of a Jira error response
    JiraResponse(Value),
    /// Transport error description
    Error(String),
}

/// Uniform JSON response wrapper.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultEnvelope {
    pub status: EnvelopeStatus,
    pub message: String,
    #[serde(flatten)]
    pub detail: Option<EnvelopeDetail>,
}

impl ResultEnvelope {
    /// Error envelope with no detail.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: EnvelopeStatus::Error,
            message: message.into(),
            detail: None,
        }
    }

    /// Jira accepted the issues.
    pub fn sent(response: Value) -> Self {
        Self {
            status: EnvelopeStatus::Success,
            message: MSG_SENT.to_string(),
            detail: Some(EnvelopeDetail::Response(response)),
        }
    }

    /// Jira answered with an error status.
    pub fn jira_rejected(jira_response: Value) -> Self {
        Self {
            status: EnvelopeStatus::Error,
            message: MSG_JIRA_REJECTED.to_string(),
            detail: Some(EnvelopeDetail::JiraResponse(jira_response)),
        }
    }

    /// The outbound call never produced a response.
    pub fn request_failed(error: impl Into<String>) -> Self {
        Self {
            status: EnvelopeStatus::Error,
            message: MSG_REQUEST_FAILED.to_string(),
            detail: Some(EnvelopeDetail::Error(error.into())),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == EnvelopeStatus::Success
    }
}

/// Decode a response body as JSON, yielding `null` when it is not valid JSON.
pub fn decode_body(body: &[u8]) -> Value {
    serde_json::from_slice(body).unwrap_or(Value::Null)
}
