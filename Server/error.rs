use thiserror::Error;

/// Failures that can end a single connection's admission before it joins the roster.
#[derive(Debug, Error)]
pub enum SignupError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("malformed or non-conforming name on the wire: {0}")]
    Handshake(#[from] serde_json::Error),
    #[error("handshake did not complete before its deadline")]
    Timeout,
    #[error("handshake task failed unexpectedly")]
    TaskFailed,
}
