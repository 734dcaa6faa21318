use async_trait::async_trait;

use crate::domain::user::models::AuthenticatedUser;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::LoginOutcome;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::User;
use crate::user::errors::CredentialError;
use crate::user::models::Username;

/// Port for the authentication operations consumed by the HTTP layer.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new user.
    ///
    /// # Arguments
    /// * `command` - Validated username, plaintext password and role
    ///
    /// # Returns
    /// Created user entity
    ///
    /// # Errors
    /// * `DuplicateUsername` - Username is already taken
    /// * `Password` - Hashing failed
    /// * `DatabaseError` - Database operation failed
    async fn register(&self, command: RegisterCommand) -> Result<User, CredentialError>;

    /// Exchange username and password for an access token.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown username or wrong password, indistinguishably
    /// * `TokenIssue` - Token generation failed
    /// * `DatabaseError` - Database operation failed
    async fn login(&self, command: LoginCommand) -> Result<LoginOutcome, CredentialError>;

    /// Resolve a bearer token to the caller it belongs to.
    ///
    /// # Errors
    /// * `Unauthorized` - Token is malformed, forged, expired or incomplete
    /// * `UnknownSubject` - Token subject is not a stored user
    /// * `RoleMismatch` - Token role differs from the stored role
    /// * `DatabaseError` - Database operation failed
    async fn authenticate(&self, token: &str) -> Result<AuthenticatedUser, CredentialError>;
}

/// Credential store.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user to storage.
    ///
    /// Uniqueness of the username is enforced by the store itself: of several
    /// concurrent calls with one username exactly one succeeds.
    ///
    /// # Errors
    /// * `DuplicateUsername` - Username is already taken
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: User) -> Result<User, CredentialError>;

    /// Retrieve user by username.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_username(&self, username: &Username)
        -> Result<Option<User>, CredentialError>;
}
