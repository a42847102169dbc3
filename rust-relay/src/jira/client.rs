//! Jira Automation incoming-webhook client.
//!
//! Jira Automation rules triggered by an "Incoming webhook" accept a JSON
//! body with an `issues` array. Requests are authenticated with Basic auth
//! (account email + API token) plus the rule's webhook secret.

use reqwest::{header, Client, StatusCode};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{error, info};

use crate::Config;

/// Header carrying the Jira Automation webhook secret.
pub const WEBHOOK_TOKEN_HEADER: &str = "X-Automation-Webhook-Token";

/// Body posted to the Jira webhook.
#[derive(Debug, Clone, Serialize)]
pub struct IssuesPayload<'a> {
    pub issues: &'a [Value],
}

/// Outbound delivery failures.
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// Jira answered, but with an error status.
    #[error("HTTP {status}")]
    Rejected { status: StatusCode, body: Vec<u8> },

    /// No response was obtained at all.
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
}

/// A response Jira accepted.
#[derive(Debug, Clone)]
pub struct Delivered {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

/// Client for one configured Jira webhook.
#[derive(Clone)]
pub struct JiraWebhookClient {
    client: Client,
    url: String,
    secret: String,
    email: String,
    token: String,
}

impl JiraWebhookClient {
    /// Build a client from the relay configuration.
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            url: config.jira_webhook_url.clone(),
            secret: config.jira_webhook_secret.clone(),
            email: config.jira_api_email.clone(),
            token: config.jira_api_token.clone(),
        })
    }

    /// POST the selected issues to the webhook.
    ///
    /// Statuses below 400 count as delivered; anything else is reported as
    /// [`DeliveryError::Rejected`] together with the response body.
    pub async fn send_issues(&self, issues: &[Value]) -> Result<Delivered, DeliveryError> {
        let response = self
            .client
            .post(&self.url)
            .header(header::CONTENT_TYPE, "application/json")
            .basic_auth(&self.email, Some(&self.token))
            .header(WEBHOOK_TOKEN_HEADER, &self.secret)
            .json(&IssuesPayload { issues })
            .send()
            .await?;

        let status = response.status();

        if status.is_client_error() || status.is_server_error() {
            let body = match response.bytes().await {
                Ok(bytes) => bytes.to_vec(),
                Err(e) => {
                    error!(
                        status_code = status.as_u16(),
                        error = %e,
                        "jira_error_body_read_failed"
                    );
                    Vec::new()
                }
            };
            return Err(DeliveryError::Rejected { status, body });
        }

        let body = response.bytes().await?.to_vec();

        info!(
            status_code = status.as_u16(),
            body_length = body.len(),
            "jira_webhook_delivered"
        );

        Ok(Delivered { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header as header_eq, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(url: String) -> Config {
        Config {
            jira_webhook_url: url,
            jira_webhook_secret: "s3cret".to_string(),
            jira_api_email: "bot@example.com".to_string(),
            jira_api_token: "api-token".to_string(),
            request_timeout_ms: Some(5000),
            port: 0,
        }
    }

    #[tokio::test]
    async fn unset_credentials_still_send_basic_auth() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(header_eq("authorization", "Basic Og=="))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let mut config = test_config(server.uri());
        config.jira_webhook_secret = String::new();
        config.jira_api_email = String::new();
        config.jira_api_token = String::new();

        let client = JiraWebhookClient::new(&config).unwrap();
        client.send_issues(&[json!("A-1")]).await.unwrap();
    }

    #[tokio::test]
    async fn sends_issues_with_auth_headers() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/automation/webhook"))
            .and(header_eq("content-type", "application/json"))
            .and(header_eq(
                "authorization",
                "Basic Ym90QGV4YW1wbGUuY29tOmFwaS10b2tlbg==",
            ))
            .and(header_eq("x-automation-webhook-token", "s3cret"))
            .and(body_json(json!({"issues": ["A-1", "A-2"]})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
            .expect(1)
            .mount(&server)
            .await;

        let client =
            JiraWebhookClient::new(&test_config(format!("{}/automation/webhook", server.uri())))
                .unwrap();

        let delivered = client
            .send_issues(&[json!("A-1"), json!("A-2")])
            .await
            .unwrap();

        assert_eq!(delivered.status, StatusCode::OK);
        assert_eq!(delivered.body, br#"{"ok":true}"#.to_vec());
    }

    #[tokio::test]
    async fn error_status_is_rejected_with_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("unauthorized"))
            .mount(&server)
            .await;

        let client = JiraWebhookClient::new(&test_config(server.uri())).unwrap();
        let err = client.send_issues(&[json!("A-1")]).await.unwrap_err();

        match err {
            DeliveryError::Rejected { status, body } => {
                assert_eq!(status, StatusCode::UNAUTHORIZED);
                assert_eq!(body, b"unauthorized".to_vec());
            }
            other => panic!("expected Rejected, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn redirect_status_without_location_is_delivered() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(304))
            .mount(&server)
            .await;

        let client = JiraWebhookClient::new(&test_config(server.uri())).unwrap();
        let delivered = client.send_issues(&[json!("A-1")]).await.unwrap();

        assert_eq!(delivered.status, StatusCode::NOT_MODIFIED);
        assert!(delivered.body.is_empty());
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_transport_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = JiraWebhookClient::new(&test_config(format!("http://{}", addr))).unwrap();
        let err = client.send_issues(&[json!("A-1")]).await.unwrap_err();

        assert!(matches!(err, DeliveryError::Transport(_)));
        assert!(!err.to_string().is_empty());
    }
}
