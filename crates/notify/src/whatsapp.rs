//! WhatsApp message delivery through a configured webhook.
//!
//! [`WhatsappClient`] POSTs a JSON payload to the webhook URL stored in
//! the notification settings, authenticated with a bearer token. One
//! attempt per message; timeouts are delegated to the HTTP client.

use std::time::Duration;

use async_trait::async_trait;

use crate::pipeline::WhatsappSender;
use crate::NotifyError;

/// HTTP request timeout for a single delivery attempt.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for WhatsApp delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum WhatsappError {
    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The webhook returned a non-2xx status code.
    #[error("Webhook returned HTTP {0}")]
    HttpStatus(u16),
}

// ---------------------------------------------------------------------------
// WhatsappClient
// ---------------------------------------------------------------------------

/// Delivers templated WhatsApp messages to a webhook endpoint.
pub struct WhatsappClient {
    client: reqwest::Client,
}

impl WhatsappClient {
    /// Create a new client with a pre-configured HTTP client.
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self { client }
    }
}

impl Default for WhatsappClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WhatsappSender for WhatsappClient {
    async fn send(
        &self,
        api_url: &str,
        api_token: &str,
        to: &str,
        message: &str,
    ) -> Result<(), NotifyError> {
        let payload = serde_json::json!({
            "to": to,
            "message": message,
        });

        let response = self
            .client
            .post(api_url)
            .bearer_auth(api_token)
            .json(&payload)
            .send()
            .await
            .map_err(WhatsappError::Request)?;

        if !response.status().is_success() {
            return Err(WhatsappError::HttpStatus(response.status().as_u16()).into());
        }

        tracing::info!(to, "WhatsApp message sent");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
