use thiserror::Error;

/// Why a send was refused before anything went over the wire.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SendError {
    #[error("Conversation has not been started")]
    NotStarted,

    #[error("A message is already being sent")]
    AlreadySending,

    #[error("Message is empty after normalization")]
    EmptyMessage,
}

/// Failure delivering a payload to the proxy. The widget answers any of these
/// with an apology bubble.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Failed to encode request: {0}")]
    Encode(String),

    #[error("Network error: {0}")]
    Network(String),
}
