use thiserror::Error;

/// Error for chat completion operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ChatError {
    #[error("Message cannot be empty")]
    EmptyMessage,

    #[error("Upstream request failed: {0}")]
    Upstream(String),

    #[error("Upstream response could not be read: {0}")]
    InvalidResponse(String),
}
