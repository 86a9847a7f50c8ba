use thiserror::Error;

/// Everything that can go wrong turning bytes on a socket into a method call or a method call
/// into bytes. Distinct from [`players::player::PlayerApiError`] so a proxy can report exactly
/// which validation stage failed before it gets funneled into the referee-facing error type.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("malformed JSON value on the wire: {0}")]
    Json(#[from] serde_json::Error),
    #[error("connection closed before a complete value arrived")]
    Closed,
    #[error("expected {expected}, got something else")]
    UnexpectedArguments { expected: &'static str },
    #[error("expected a {expected} result, got something else")]
    UnexpectedResult { expected: &'static str },
}
