//! Ticket Relay - samples inbound tickets and forwards them to Jira Automation.
//!
//! ## Architecture
//!
//! ```text
//! Webhook → Web Server → Relay (validate, sample ≤5) → Jira Automation webhook
//! ```
//!
//! The caller always receives HTTP 200 with a JSON [`ResultEnvelope`].

pub mod config;
pub mod jira;
pub mod relay;
pub mod web;

// Re-export commonly used types
pub use config::Config;
pub use jira::{DeliveryError, JiraWebhookClient};
pub use relay::{Relay, ResultEnvelope};
pub use web::AppState;
