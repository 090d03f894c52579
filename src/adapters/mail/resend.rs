use crate::domain::email::OutboundEmail;
use crate::services::mail::{DeliveryError, EmailProvider};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    reply_to: &'a str,
    subject: &'a str,
    html: &'a str,
    text: &'a str,
}

#[derive(Deserialize)]
struct SendEmailResponse {
    id: Option<String>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    message: Option<String>,
}

/// Delivers email through the Resend HTTP API.
#[derive(Clone)]
pub struct ResendProvider {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl std::fmt::Debug for ResendProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResendProvider").field("base_url", &self.base_url).finish_non_exhaustive()
    }
}

impl ResendProvider {
    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(api_key: impl Into<String>, base_url: &str, timeout: Duration) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("homifi-server/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, api_key: api_key.into(), base_url: base_url.trim_end_matches('/').to_string() })
    }
}

#[async_trait]
impl EmailProvider for ResendProvider {
    #[tracing::instrument(skip_all, fields(subject = %email.subject()), err(level = "warn"))]
    async fn send(&self, email: &OutboundEmail) -> Result<Option<String>, DeliveryError> {
        let body = SendEmailRequest {
            from: email.sender(),
            to: [email.to()],
            reply_to: email.reply_to(),
            subject: email.subject(),
            html: email.html(),
            text: email.text(),
        };

        let response = self
            .client
            .post(format!("{}/emails", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| DeliveryError::Transport(e.to_string()))?;

        let status = response.status();
        let payload = response.text().await.map_err(|e| DeliveryError::Transport(e.to_string()))?;

        if status.is_success() {
            let id = serde_json::from_str::<SendEmailResponse>(&payload).ok().and_then(|r| r.id);
            tracing::debug!(message_id = ?id, "Email accepted by Resend");
            return Ok(id);
        }

        let message = serde_json::from_str::<ErrorResponse>(&payload)
            .ok()
            .and_then(|e| e.message)
            .unwrap_or(payload);

        Err(DeliveryError::classify(Some(status.as_u16()), message))
    }
}
