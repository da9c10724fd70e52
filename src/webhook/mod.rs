use atdigital_chat_core::webhook::ChatPayload;
use tracing::{debug, error, warn};

use crate::errors::AppError;

/// Forwards chat payloads to the configured webhook.
///
/// No timeout is set beyond the transport's own; the widget waits for a single
/// answer and never retries.
#[derive(Clone)]
pub struct WebhookClient {
    http: reqwest::Client,
    url: String,
}

impl WebhookClient {
    pub fn new(url: &str) -> Self {
        Self { http: reqwest::Client::new(), url: url.to_string() }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Posts `payload` and returns the raw response body on a 2xx status.
    pub async fn forward(&self, payload: &ChatPayload) -> Result<String, AppError> {
        debug!("Forwarding message for session {} to webhook", payload.session_id);

        let response = self
            .http
            .post(&self.url)
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                error!("Webhook request for session {} failed: {e}", payload.session_id);
                AppError::WebhookUnavailable { url: self.url.clone(), source: e }
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!("Webhook answered session {} with {status}", payload.session_id);
            return Err(AppError::WebhookStatus { status: status.as_u16() });
        }

        response.text().await.map_err(|e| {
            error!("Failed to read webhook response for session {}: {e}", payload.session_id);
            AppError::WebhookUnavailable { url: self.url.clone(), source: e }
        })
    }
}
