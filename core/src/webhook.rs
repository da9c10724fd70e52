//! Wire format between the widget, the proxy and the chat webhook.

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const SEND_MESSAGE_ACTION: &str = "sendMessage";

/// Request body posted for every user message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatPayload {
    pub action: String,
    pub session_id: String,
    pub route: String,
    pub chat_input: String,
    #[serde(default)]
    pub metadata: Metadata,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    #[serde(default)]
    pub user_id: String,
}

impl ChatPayload {
    pub fn send_message(
        session_id: impl Into<String>,
        route: impl Into<String>,
        chat_input: impl Into<String>,
    ) -> Self {
        Self {
            action: SEND_MESSAGE_ACTION.to_string(),
            session_id: session_id.into(),
            route: route.into(),
            chat_input: chat_input.into(),
            metadata: Metadata::default(),
        }
    }
}

/// Collapses whitespace, trims, and drops trailing `.`, `!`, `?` and `…`.
pub fn normalize_input(text: &str) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.trim_end_matches(['.', '!', '?', '…']).to_string()
}

/// Pulls the reply out of a webhook response body.
///
/// Accepts `{ "output": "..." }` or `[{ "output": "..." }, ...]`; anything
/// else, including invalid JSON, is no reply.
pub fn reply_from_body(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    let reply = match &value {
        Value::Array(items) => items.first()?,
        other => other,
    };
    reply.get("output")?.as_str().map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn input_is_normalized_for_the_webhook() {
        assert_eq!(normalize_input("  Hello   there?? "), "Hello there");
        assert_eq!(normalize_input("Wait…!"), "Wait");
        assert_eq!(normalize_input("?!."), "");
        assert_eq!(normalize_input("v1.2 rocks"), "v1.2 rocks");
    }

    #[test]
    fn payload_serializes_in_camel_case() {
        let payload = ChatPayload::send_message("abc", "general", "Hello there");
        assert_eq!(
            serde_json::to_value(&payload).expect("serializable"),
            json!({
                "action": "sendMessage",
                "sessionId": "abc",
                "route": "general",
                "chatInput": "Hello there",
                "metadata": { "userId": "" }
            })
        );
    }

    #[test]
    fn replies_are_read_from_objects_and_arrays() {
        assert_eq!(reply_from_body(r#"{"output":"Hi"}"#), Some("Hi".to_string()));
        assert_eq!(reply_from_body(r#"[{"output":"First"},{"output":"Second"}]"#), Some("First".to_string()));
    }

    #[test]
    fn other_shapes_are_no_reply() {
        for body in ["", "not json", "[]", r#"{"text":"Hi"}"#, r#"{"output":42}"#, r#"[1,2]"#, "null"] {
            assert_eq!(reply_from_body(body), None, "{body}");
        }
    }
}
