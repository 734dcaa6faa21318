use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::claims::Identity;
use super::claims::WireClaims;
use super::errors::AuthError;
use super::errors::IssueError;

/// Lifetime of a token when the caller does not ask for one.
pub const DEFAULT_TOKEN_TTL_MINUTES: i64 = 30;

/// JWT token handler for issuing and verifying access tokens.
///
/// Signs with HS256 (HMAC with SHA-256) only. Tokens carrying any other
/// `alg` header are rejected.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    default_ttl: Duration,
}

impl JwtHandler {
    /// Create a new JWT handler with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens
    ///
    /// # Returns
    /// JwtHandler configured with HS256 and a 30 minute default lifetime
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - A new secret invalidates every outstanding token
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            default_ttl: Duration::minutes(DEFAULT_TOKEN_TTL_MINUTES),
        }
    }

    /// Override the lifetime used by [`issue`](Self::issue).
    pub fn with_default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = ttl;
        self
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Issue a token with the default lifetime.
    ///
    /// # Errors
    /// * `EmptySubject` / `EmptyRole` - Identity is incomplete
    /// * `NonPositiveTtl` - Configured lifetime is zero or negative
    /// * `EncodingFailed` - Signing failed
    pub fn issue(&self, identity: &Identity) -> Result<String, IssueError> {
        self.issue_with_ttl(identity, self.default_ttl)
    }

    /// Issue a token expiring `ttl` from now.
    pub fn issue_with_ttl(&self, identity: &Identity, ttl: Duration) -> Result<String, IssueError> {
        self.issue_at(identity, ttl, Utc::now())
    }

    /// Issue a token as if the current time were `now`.
    ///
    /// Output is fully determined by the arguments and the secret.
    pub fn issue_at(
        &self,
        identity: &Identity,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> Result<String, IssueError> {
        if identity.subject.is_empty() {
            return Err(IssueError::EmptySubject);
        }
        if identity.role.is_empty() {
            return Err(IssueError::EmptyRole);
        }
        if ttl <= Duration::zero() {
            return Err(IssueError::NonPositiveTtl);
        }

        let expiry = now
            .checked_add_signed(ttl)
            .ok_or_else(|| IssueError::EncodingFailed("expiry out of range".to_string()))?;

        let claims = Claims {
            sub: identity.subject.clone(),
            role: identity.role.clone(),
            exp: expiry.timestamp(),
        };

        let token = encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| IssueError::EncodingFailed(e.to_string()))?;

        tracing::debug!(subject = %claims.sub, role = %claims.role, exp = claims.exp, "Token issued");

        Ok(token)
    }

    /// Verify a token and return its claims.
    ///
    /// # Errors
    /// * `Malformed` - Token is not a parseable JWT
    /// * `InvalidSignature` - Wrong key or an algorithm other than HS256
    /// * `Expired` - Current time is past `exp`
    /// * `MissingClaims` - `sub`, `role` or `exp` absent or empty
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp"]);

        let token_data =
            decode::<WireClaims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::InvalidSignature
                    | ErrorKind::InvalidAlgorithm
                    | ErrorKind::MissingAlgorithm => AuthError::InvalidSignature,
                    ErrorKind::ExpiredSignature => AuthError::Expired,
                    ErrorKind::MissingRequiredClaim(_) => AuthError::MissingClaims,
                    _ => AuthError::Malformed,
                }
            })?;

        token_data
            .claims
            .into_claims()
            .ok_or(AuthError::MissingClaims)
    }
}
