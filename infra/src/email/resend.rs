//! Resend email notifier
//!
//! POSTs the rendered reset email to the Resend API with the configured
//! bearer key. Server errors and rate limiting are retried with exponential
//! backoff; client errors are not.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, info, warn};

use folio_core::services::reset::EmailNotifier;
use folio_shared::config::EmailConfig;

use super::template::render_reset_email;
use crate::InfrastructureError;

/// Attempts per message, including the first
const MAX_ATTEMPTS: u32 = 3;

/// Delay before the first retry
const INITIAL_RETRY_DELAY: Duration = Duration::from_millis(500);

/// Request body accepted by the Resend `emails` endpoint
#[derive(Debug, Clone, Serialize)]
pub struct ResendMessage {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub html: String,
}

#[derive(Debug, Deserialize)]
struct ResendResponse {
    id: String,
}

/// Resend HTTP API notifier
pub struct ResendEmailNotifier {
    client: reqwest::Client,
    api_key: String,
    config: EmailConfig,
}

impl ResendEmailNotifier {
    /// Create a new notifier
    ///
    /// # Errors
    /// * `InfrastructureError::Config` - No API key configured
    /// * `InfrastructureError::Http` - The HTTP client could not be built
    pub fn new(config: EmailConfig) -> Result<Self, InfrastructureError> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| InfrastructureError::Config("RESEND_API_KEY not set".to_string()))?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_key,
            config,
        })
    }

    /// Build the request body for a reset email
    pub fn build_message(&self, to: &str, code: &str, display_name: &str) -> ResendMessage {
        let email = render_reset_email(code, display_name, &self.config.login_url());
        ResendMessage {
            from: self.config.from_address.clone(),
            to: vec![to.to_string()],
            subject: email.subject,
            html: email.html,
        }
    }

    async fn send_with_retry(&self, message: &ResendMessage) -> Result<String, InfrastructureError> {
        let mut attempts = 0;
        let mut delay = INITIAL_RETRY_DELAY;

        loop {
            attempts += 1;
            debug!(attempt = attempts, max = MAX_ATTEMPTS, "Sending reset email via Resend");

            let outcome = self
                .client
                .post(&self.config.api_url)
                .bearer_auth(&self.api_key)
                .json(message)
                .send()
                .await;

            let retryable = match outcome {
                Ok(response) if response.status().is_success() => {
                    let body: ResendResponse = response.json().await?;
                    return Ok(body.id);
                }
                Ok(response) => {
                    let status = response.status();
                    let detail = response.text().await.unwrap_or_default();
                    error!(status = %status, detail = %detail, "Resend API rejected reset email");
                    if !(status.is_server_error() || status.as_u16() == 429) {
                        return Err(InfrastructureError::Email(format!(
                            "Resend API returned {}",
                            status
                        )));
                    }
                    format!("Resend API returned {}", status)
                }
                Err(e) => {
                    error!(error = %e, "Resend request failed");
                    if !(e.is_timeout() || e.is_connect()) {
                        return Err(InfrastructureError::Http(e));
                    }
                    e.to_string()
                }
            };

            if attempts >= MAX_ATTEMPTS {
                return Err(InfrastructureError::Email(format!(
                    "Failed to send email after {} attempts: {}",
                    MAX_ATTEMPTS, retryable
                )));
            }

            warn!(delay = ?delay, "Retrying reset email");
            tokio::time::sleep(delay).await;
            delay *= 2;
        }
    }
}

#[async_trait]
impl EmailNotifier for ResendEmailNotifier {
    async fn send_reset_code(
        &self,
        to: &str,
        code: &str,
        display_name: &str,
    ) -> Result<String, String> {
        let message = self.build_message(to, code, display_name);

        match self.send_with_retry(&message).await {
            Ok(id) => {
                info!(to = %to, message_id = %id, "Reset email sent via Resend");
                Ok(id)
            }
            Err(e) => Err(e.to_string()),
        }
    }
}
