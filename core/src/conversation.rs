//! One widget conversation: transcript, send state and the typewriter.

use log::{debug, warn};

use crate::config::{QuickReply, WidgetConfig};
use crate::display::{render_message, sanitize_typing, Segment};
use crate::errors::{SendError, TransportError};
use crate::labels::make_label;
use crate::models::{Message, MessageRole, Transcript};
use crate::typewriter::{Scheduler, Tick, Typewriter, Viewport};
use crate::webhook::{normalize_input, reply_from_body, ChatPayload};

/// Typed when the webhook answered but gave no usable reply.
pub const NO_REPLY_FALLBACK: &str = "Hi! I'm here to help you.";
/// Shown when the request itself failed.
pub const SEND_FAILURE_APOLOGY: &str = "Sorry, there was a problem sending your message.";

/// A call-to-action button for one extracted link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CtaButton {
    pub label: String,
    pub url: String,
}

/// How a message body should be drawn right now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageBody {
    /// Still being revealed; plain text with `\n` line breaks.
    Typing(String),
    Final(Vec<Segment>),
}

pub struct Conversation<S: Scheduler> {
    config: WidgetConfig,
    session_id: Option<String>,
    transcript: Transcript,
    typewriter: Typewriter<S>,
    sending: bool,
}

impl<S: Scheduler> Conversation<S> {
    pub fn new(config: WidgetConfig, scheduler: S) -> Self {
        let typewriter = Typewriter::new(scheduler, config.typing_interval(), config.link_extractor());
        Self {
            config,
            session_id: None,
            transcript: Transcript::new(),
            typewriter,
            sending: false,
        }
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    pub fn is_started(&self) -> bool {
        self.session_id.is_some()
    }

    pub fn is_sending(&self) -> bool {
        self.sending
    }

    pub fn messages(&self) -> &[Message] {
        self.transcript.messages()
    }

    pub fn typewriter(&self) -> &Typewriter<S> {
        &self.typewriter
    }

    /// Opens the conversation with a fresh session id and types the welcome
    /// message. Returns `false` if it was already started.
    pub fn start(&mut self) -> bool {
        if self.is_started() {
            return false;
        }
        let session_id = uuid::Uuid::new_v4().to_string();
        debug!("starting conversation {session_id}");
        self.session_id = Some(session_id);
        self.sending = false;
        let welcome = self.config.welcome_message();
        self.typewriter.begin(&mut self.transcript, &welcome);
        true
    }

    /// Records what the user typed and builds the request for it.
    pub fn begin_send(&mut self, input: &str) -> Result<ChatPayload, SendError> {
        self.begin_send_as(input, input)
    }

    pub fn begin_quick_reply(&mut self, reply: &QuickReply) -> Result<ChatPayload, SendError> {
        self.begin_send_as(&reply.label, &reply.send)
    }

    /// Shows `display` in the transcript but sends the normalized `send_text`.
    fn begin_send_as(&mut self, display: &str, send_text: &str) -> Result<ChatPayload, SendError> {
        let session_id = self.session_id.clone().ok_or(SendError::NotStarted)?;
        if self.sending {
            return Err(SendError::AlreadySending);
        }
        let chat_input = normalize_input(send_text);
        if chat_input.is_empty() {
            return Err(SendError::EmptyMessage);
        }

        self.transcript.push(Message::user(display.trim()));
        self.sending = true;
        Ok(ChatPayload::send_message(session_id, self.config.webhook.route.clone(), chat_input))
    }

    /// Handles the proxy's answer to the pending send.
    ///
    /// Returns the id of the bot message created, if any.
    pub fn finish_send(&mut self, outcome: Result<String, TransportError>) -> Option<String> {
        self.sending = false;
        match outcome {
            Err(e) => {
                warn!("sending message failed: {e}");
                Some(self.transcript.push(Message::bot(SEND_FAILURE_APOLOGY)))
            }
            Ok(body) => {
                let reply = reply_from_body(&body)
                    .filter(|r| !r.is_empty())
                    .unwrap_or_else(|| {
                        debug!("webhook gave no reply, using fallback");
                        NO_REPLY_FALLBACK.to_string()
                    });
                self.typewriter.begin(&mut self.transcript, &reply)
            }
        }
    }

    pub fn tick(&mut self, viewport: &mut dyn Viewport) -> Tick {
        self.typewriter.tick(&mut self.transcript, viewport)
    }

    /// Stops any running typewriter timer; call when the widget goes away.
    pub fn teardown(&mut self) {
        self.typewriter.cancel();
    }

    pub fn is_typing(&self, message_id: &str) -> bool {
        self.typewriter.streaming_id() == Some(message_id)
    }

    pub fn body(&self, message: &Message) -> MessageBody {
        if self.is_typing(&message.id) {
            MessageBody::Typing(sanitize_typing(&message.text))
        } else {
            MessageBody::Final(render_message(&message.text))
        }
    }

    /// Buttons for a bot message's links, hidden while it is still typing.
    pub fn cta_buttons(&self, message_id: &str) -> Vec<CtaButton> {
        if self.is_typing(message_id) {
            return Vec::new();
        }
        self.transcript
            .get(message_id)
            .filter(|m| m.role == MessageRole::Bot)
            .map(|m| {
                m.links
                    .iter()
                    .map(|link| CtaButton { label: make_label(link), url: link.url.clone() })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Quick replies are offered until the user sends something.
    pub fn show_quick_replies(&self) -> bool {
        self.transcript.count_role(MessageRole::User) == 0
    }

    pub fn quick_replies(&self) -> Vec<QuickReply> {
        self.config.quick_replies()
    }
}
