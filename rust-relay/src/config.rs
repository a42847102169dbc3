//! Configuration module for environment variable parsing.
//!
//! All settings are read once at startup. The Jira credentials default to an
//! empty string when unset and are never validated before use.

use std::env;
use std::time::Duration;
use tracing::warn;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Jira Automation incoming-webhook URL
    pub jira_webhook_url: String,

    /// Shared secret sent as `X-Automation-Webhook-Token`
    pub jira_webhook_secret: String,

    /// Account email for Basic authentication
    pub jira_api_email: String,

    /// API token for Basic authentication
    pub jira_api_token: String,

    /// Optional timeout for the outbound Jira call, in milliseconds.
    /// Unset means the HTTP client default (no timeout).
    pub request_timeout_ms: Option<u64>,

    /// Port for the web server to listen on
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Config {
            jira_webhook_url: env_or_empty("JIRA_WEBHOOK_URL"),

            jira_webhook_secret: env_or_empty("JIRA_WEBHOOK_SECRET"),

            jira_api_email: env_or_empty("JIRA_API_EMAIL"),

            jira_api_token: env_or_empty("JIRA_API_TOKEN"),

            request_timeout_ms: parse_optional_u64("JIRA_REQUEST_TIMEOUT_MS"),

            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),
        }
    }

    /// Outbound request timeout, if one is configured.
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_ms.map(Duration::from_millis)
    }
}

/// Read a variable, falling back to an empty string.
fn env_or_empty(name: &str) -> String {
    env::var(name).unwrap_or_default()
}

/// Parse an optional unsigned integer, ignoring (and logging) garbage.
fn parse_optional_u64(name: &str) -> Option<u64> {
    let raw = env::var(name).ok()?;

    match raw.trim().parse::<u64>() {
        Ok(v) if v > 0 => Some(v),
        _ => {
            warn!(env_var = name, value = %raw, "Invalid timeout value, ignoring");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_or_empty_unset() {
        assert_eq!(env_or_empty("TICKET_RELAY_TEST_UNSET_VAR"), "");
    }

    #[test]
    fn test_env_or_empty_set() {
        env::set_var("TICKET_RELAY_TEST_EMAIL", "bot@example.com");
        assert_eq!(env_or_empty("TICKET_RELAY_TEST_EMAIL"), "bot@example.com");
        env::remove_var("TICKET_RELAY_TEST_EMAIL");
    }

    #[test]
    fn test_parse_optional_u64() {
        env::set_var("TICKET_RELAY_TEST_TIMEOUT", "2500");
        assert_eq!(parse_optional_u64("TICKET_RELAY_TEST_TIMEOUT"), Some(2500));

        env::set_var("TICKET_RELAY_TEST_TIMEOUT", "soon");
        assert_eq!(parse_optional_u64("TICKET_RELAY_TEST_TIMEOUT"), None);

        env::set_var("TICKET_RELAY_TEST_TIMEOUT", "0");
        assert_eq!(parse_optional_u64("TICKET_RELAY_TEST_TIMEOUT"), None);

        env::remove_var("TICKET_RELAY_TEST_TIMEOUT");
        assert_eq!(parse_optional_u64("TICKET_RELAY_TEST_TIMEOUT"), None);
    }

    #[test]
    fn test_request_timeout() {
        let mut config = Config {
            jira_webhook_url: String::new(),
            jira_webhook_secret: String::new(),
            jira_api_email: String::new(),
            jira_api_token: String::new(),
            request_timeout_ms: None,
            port: 8080,
        };
        assert_eq!(config.request_timeout(), None);

        config.request_timeout_ms = Some(1500);
        assert_eq!(config.request_timeout(), Some(Duration::from_millis(1500)));
    }
}
