use thiserror::Error;

/// Reasons a presented token is rejected.
///
/// The variants are for logging and tests only. Callers facing end clients
/// must collapse all of them into a single "unauthorized" outcome.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Token is malformed")]
    Malformed,

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token is expired")]
    Expired,

    #[error("Token is missing required claims")]
    MissingClaims,
}

/// Error type for token issuance.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IssueError {
    #[error("Token subject must not be empty")]
    EmptySubject,

    #[error("Token role must not be empty")]
    EmptyRole,

    #[error("Token lifetime must be positive")]
    NonPositiveTtl,

    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),
}
