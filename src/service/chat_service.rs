use atdigital_chat_core::webhook::{ChatPayload, SEND_MESSAGE_ACTION};

use crate::errors::AppError;
use crate::webhook::WebhookClient;

const MAX_MESSAGE_LENGTH: usize = 8000;

#[derive(Clone)]
pub struct ChatService {
    webhook: WebhookClient,
}

impl ChatService {
    pub fn new(webhook: WebhookClient) -> Self {
        Self { webhook }
    }

    /// Validates a widget payload and relays it, returning the webhook's body.
    pub async fn relay(&self, payload: ChatPayload) -> Result<String, AppError> {
        // ── Validation ────────────────────────────────────────────────────────
        if payload.action != SEND_MESSAGE_ACTION {
            return Err(AppError::invalid_payload(format!(
                "unsupported action '{}'",
                payload.action
            )));
        }
        if payload.session_id.trim().is_empty() {
            return Err(AppError::EmptyField { field_name: "sessionId".to_string() });
        }
        if payload.chat_input.trim().is_empty() {
            return Err(AppError::EmptyField { field_name: "chatInput".to_string() });
        }
        let length = payload.chat_input.chars().count();
        if length > MAX_MESSAGE_LENGTH {
            return Err(AppError::FieldTooLong {
                field_name: "chatInput".to_string(),
                max_length: MAX_MESSAGE_LENGTH,
                actual_length: length,
            });
        }

        // ── Relay ─────────────────────────────────────────────────────────────
        self.webhook.forward(&payload).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> ChatService {
        ChatService::new(WebhookClient::new("http://127.0.0.1:9/hook"))
    }

    #[tokio::test]
    async fn only_send_message_is_relayed() {
        let mut payload = ChatPayload::send_message("s-1", "general", "hi");
        payload.action = "loadPreviousSession".to_string();

        let err = service().relay(payload).await.expect_err("rejected");
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "Invalid chat payload: unsupported action 'loadPreviousSession'");
    }

    #[tokio::test]
    async fn blank_session_is_rejected() {
        let err = service()
            .relay(ChatPayload::send_message(" ", "general", "hi"))
            .await
            .expect_err("rejected");
        assert!(matches!(err, AppError::EmptyField { ref field_name } if field_name == "sessionId"));
    }

    #[tokio::test]
    async fn oversized_input_is_rejected_before_forwarding() {
        let input = "é".repeat(MAX_MESSAGE_LENGTH + 1);
        let err = service()
            .relay(ChatPayload::send_message("s-1", "general", input))
            .await
            .expect_err("rejected");
        assert!(matches!(
            err,
            AppError::FieldTooLong { actual_length, .. } if actual_length == MAX_MESSAGE_LENGTH + 1
        ));
    }
}
