use thiserror::Error;

/// Top-level server error. Every variant carries a message fit for the
/// `{ "error": ... }` body the proxy returns.
#[derive(Debug, Error)]
pub enum AppError {
    // ── Configuration errors ─────────────────────────────────────────────────
    #[error("Environment variable {name} must be set")]
    MissingConfig { name: String },

    #[error("Invalid value for {name}: '{value}'")]
    InvalidConfig { name: String, value: String },

    // ── Validation errors ────────────────────────────────────────────────────
    #[error("Invalid chat payload: {message}")]
    InvalidPayload { message: String },

    #[error("Field '{field_name}' cannot be empty")]
    EmptyField { field_name: String },

    #[error("Field '{field_name}' exceeds max length of {max_length} (actual: {actual_length})")]
    FieldTooLong { field_name: String, max_length: usize, actual_length: usize },

    // ── Webhook errors ───────────────────────────────────────────────────────
    #[error("Webhook unreachable at {url}")]
    WebhookUnavailable {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Webhook responded with status {status}")]
    WebhookStatus { status: u16 },
}

impl AppError {
    pub fn invalid_payload(message: impl Into<String>) -> Self {
        AppError::InvalidPayload { message: message.into() }
    }

    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            AppError::InvalidPayload { .. } | AppError::EmptyField { .. } | AppError::FieldTooLong { .. }
        )
    }

    pub fn is_webhook_failure(&self) -> bool {
        matches!(self, AppError::WebhookUnavailable { .. } | AppError::WebhookStatus { .. })
    }
}
