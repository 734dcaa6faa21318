use chrono::Duration;

use crate::jwt::AuthError;
use crate::jwt::Claims;
use crate::jwt::Identity;
use crate::jwt::IssueError;
use crate::jwt::JwtHandler;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and JWT issuance.
///
/// Password operations are CPU-bound and intentionally slow. Async callers
/// should run them on a blocking thread.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
    decoy_hash: Option<String>,
}

/// Result of successful authentication.
pub struct AuthenticationResult {
    /// JWT access token
    pub access_token: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token issuance failed: {0}")]
    Issue(#[from] IssueError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for JWT signing
    ///
    /// # Returns
    /// Authenticator with the default password hasher and a 30 minute token lifetime
    pub fn new(jwt_secret: &[u8]) -> Self {
        Self::with_hasher(jwt_secret, PasswordHasher::new())
    }

    /// Create an authenticator around a specific password hasher.
    ///
    /// Hashes the decoy password up front, so the first unknown-user login
    /// costs no more than later ones.
    pub fn with_hasher(jwt_secret: &[u8], password_hasher: PasswordHasher) -> Self {
        let decoy_hash = match password_hasher.hash("decoy-password") {
            Ok(hash) => Some(hash),
            Err(e) => {
                tracing::error!(error = %e, "Failed to hash decoy password");
                None
            }
        };

        Self {
            password_hasher,
            jwt_handler: JwtHandler::new(jwt_secret),
            decoy_hash,
        }
    }

    pub fn with_token_ttl(mut self, ttl: Duration) -> Self {
        self.jwt_handler = self.jwt_handler.with_default_ttl(ttl);
        self
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Spend the same work as a real verification, for unknown usernames.
    ///
    /// Keeps login latency from revealing whether an account exists.
    pub fn verify_decoy(&self, password: &str) {
        if let Some(hash) = &self.decoy_hash {
            let _ = self.password_hasher.verify(password, hash);
        }
    }

    /// True when `stored_hash` should be replaced with a default-scheme hash.
    pub fn needs_rehash(&self, stored_hash: &str) -> bool {
        self.password_hasher.needs_rehash(stored_hash)
    }

    /// Verify credentials and generate JWT token.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `identity` - Subject and role to encode in the token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `Issue` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        identity: &Identity,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_hash) {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.jwt_handler.issue(identity)?;

        Ok(AuthenticationResult { access_token })
    }

    /// Generate a token without password verification.
    pub fn generate_token(&self, identity: &Identity) -> Result<String, IssueError> {
        self.jwt_handler.issue(identity)
    }

    /// Validate and decode JWT token.
    ///
    /// # Errors
    /// * `AuthError` - Token is malformed, forged, expired or incomplete
    pub fn validate_token(&self, token: &str) -> Result<Claims, AuthError> {
        self.jwt_handler.verify(token)
    }

    pub fn token_ttl(&self) -> Duration {
        self.jwt_handler.default_ttl()
    }
}
