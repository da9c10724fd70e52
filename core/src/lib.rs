//! The chat widget's message pipeline.
//!
//! Bot replies flow through [`links`] (call-to-action extraction), the
//! [`typewriter`] (timed reveal) and [`display`] (what is visible at each
//! step). [`conversation::Conversation`] ties them to the send flow.

pub mod config;
pub mod conversation;
pub mod display;
pub mod errors;
pub mod labels;
pub mod links;
pub mod models;
mod patterns;
pub mod typewriter;
pub mod webhook;

pub use config::{QuickReply, WidgetConfig};
pub use conversation::{Conversation, CtaButton, MessageBody};
pub use display::{render_message, sanitize_typing, Segment};
pub use errors::{SendError, TransportError};
pub use labels::make_label;
pub use links::{AllowedDomains, LinkExtractor, PromotionPolicy};
pub use models::{Link, Message, MessageRole, Transcript};
pub use typewriter::{Scheduler, Tick, Typewriter, Viewport};
pub use webhook::ChatPayload;
