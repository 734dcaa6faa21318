use auth::AuthError;
use auth::IssueError;
use auth::PasswordError;
use thiserror::Error;

/// Error for Username validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UsernameError {
    #[error("Username too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("Username too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },

    #[error(
        "Username contains invalid characters (only alphanumeric, underscore, and hyphen allowed)"
    )]
    InvalidCharacters,
}

/// Error for Role validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RoleError {
    #[error("Role must not be empty")]
    Empty,

    #[error("Role too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },

    #[error("Role contains invalid characters (only lowercase alphanumeric, underscore, and hyphen allowed)")]
    InvalidCharacters,
}

/// Top-level error for credential and session operations
#[derive(Debug, Clone, Error)]
pub enum CredentialError {
    // Value object validation errors (automatically converted via #[from])
    #[error("Invalid username: {0}")]
    InvalidUsername(#[from] UsernameError),

    #[error("Invalid role: {0}")]
    InvalidRole(#[from] RoleError),

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    // Domain-level errors
    #[error("Username already exists: {0}")]
    DuplicateUsername(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    // Session errors, never shown to clients in detail
    #[error("Token rejected: {0}")]
    Unauthorized(#[from] AuthError),

    #[error("Token subject does not exist")]
    UnknownSubject,

    #[error("Token role does not match stored role")]
    RoleMismatch,

    #[error("Token issuance failed: {0}")]
    TokenIssue(#[from] IssueError),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}
