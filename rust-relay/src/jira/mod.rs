//! Outbound side: delivery of selected tickets to Jira Automation.

pub mod client;

pub use client::{Delivered, DeliveryError, JiraWebhookClient, WEBHOOK_TOKEN_HEADER};
