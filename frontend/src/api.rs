use atdigital_chat_core::{ChatPayload, TransportError};
use gloo_net::http::Request;

/// Posts one message to the chat proxy and returns the raw response body.
///
/// Error statuses are logged and their body returned like any other; it
/// carries no reply, so the conversation types its fallback.
pub async fn post_chat(endpoint: &str, payload: &ChatPayload) -> Result<String, TransportError> {
    let resp = Request::post(endpoint)
        .json(payload)
        .map_err(|e| TransportError::Encode(e.to_string()))?
        .send()
        .await
        .map_err(|e| TransportError::Network(e.to_string()))?;

    if !resp.ok() {
        log::warn!("Chat proxy answered {}", resp.status());
    }

    resp.text()
        .await
        .map_err(|e| TransportError::Network(e.to_string()))
}
