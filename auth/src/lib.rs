//! Authentication core
//!
//! Provides the session-integrity building blocks of the gateway:
//! - Password hashing with an allow-list of schemes (Argon2id default, PBKDF2 and bcrypt accepted)
//! - HS256 token issuance and verification
//! - Authentication coordination
//!
//! Storage is not part of this crate. The service defines its own credential
//! store port and composes it with these implementations.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! ```
//!
//! ## Tokens
//! ```
//! use auth::{Identity, JwtHandler};
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!");
//! let token = handler.issue(&Identity::new("alice", "user")).unwrap();
//! let claims = handler.verify(&token).unwrap();
//! assert_eq!(claims.sub, "alice");
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, Identity};
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!");
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and generate token
//! let identity = Identity::new("alice", "user");
//! let result = auth.authenticate("password123", &hash, &identity).unwrap();
//!
//! // Validate token
//! let claims = auth.validate_token(&result.access_token).unwrap();
//! assert_eq!(claims.role, "user");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use jwt::AuthError;
pub use jwt::Claims;
pub use jwt::Identity;
pub use jwt::IssueError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use password::PasswordScheme;
