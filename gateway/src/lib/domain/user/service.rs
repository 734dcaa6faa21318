use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use auth::Identity;
use tokio::task::JoinError;

use crate::domain::user::models::AuthenticatedUser;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::LoginOutcome;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::user::errors::CredentialError;
use crate::user::ports::AuthServicePort;
use crate::user::ports::UserRepository;

/// Domain service implementation for authentication operations.
///
/// Password work runs on the blocking thread pool so slow hashing never
/// stalls unrelated requests on the async workers.
pub struct AuthService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> AuthService<UR>
where
    UR: UserRepository,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Credential store implementation
    /// * `authenticator` - Password hasher and token handler
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }
}

fn blocking_task_failed(e: JoinError) -> CredentialError {
    CredentialError::Unknown(format!("Password task failed: {}", e))
}

#[async_trait]
impl<UR> AuthServicePort for AuthService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: RegisterCommand) -> Result<User, CredentialError> {
        let authenticator = Arc::clone(&self.authenticator);
        let password = command.password;
        let password_hash =
            tokio::task::spawn_blocking(move || authenticator.hash_password(&password))
                .await
                .map_err(blocking_task_failed)??;

        let user = User {
            id: UserId::new(),
            username: command.username,
            password_hash,
            role: command.role,
        };

        let created_user = self.repository.create(user).await?;

        tracing::info!(
            user_id = %created_user.id,
            username = %created_user.username,
            role = %created_user.role,
            "User registered"
        );

        Ok(created_user)
    }

    async fn login(&self, command: LoginCommand) -> Result<LoginOutcome, CredentialError> {
        let stored = self.repository.find_by_username(&command.username).await?;
        let authenticator = Arc::clone(&self.authenticator);
        let password = command.password;

        let Some(user) = stored else {
            tokio::task::spawn_blocking(move || authenticator.verify_decoy(&password))
                .await
                .map_err(blocking_task_failed)?;
            tracing::warn!(username = %command.username, "Login attempt for unknown username");
            return Err(CredentialError::InvalidCredentials);
        };

        let identity = Identity::new(user.username.as_str(), user.role.as_str());
        let stored_hash = user.password_hash.clone();
        let result = tokio::task::spawn_blocking(move || {
            authenticator.authenticate(&password, &stored_hash, &identity)
        })
        .await
        .map_err(blocking_task_failed)?
        .map_err(|e| match e {
            AuthenticationError::InvalidCredentials => {
                tracing::warn!(user_id = %user.id, "Login attempt with wrong password");
                CredentialError::InvalidCredentials
            }
            AuthenticationError::Issue(err) => CredentialError::TokenIssue(err),
        })?;

        if self.authenticator.needs_rehash(&user.password_hash) {
            tracing::info!(user_id = %user.id, "Stored password hash uses a legacy scheme");
        }

        tracing::info!(user_id = %user.id, role = %user.role, "User logged in");

        Ok(LoginOutcome {
            access_token: result.access_token,
            role: user.role,
        })
    }

    async fn authenticate(&self, token: &str) -> Result<AuthenticatedUser, CredentialError> {
        let claims = self.authenticator.validate_token(token)?;

        let username = Username::new(claims.sub).map_err(|_| CredentialError::UnknownSubject)?;
        let user = self
            .repository
            .find_by_username(&username)
            .await?
            .ok_or(CredentialError::UnknownSubject)?;

        // Role changes only take effect once the old token is gone
        if user.role.as_str() != claims.role {
            return Err(CredentialError::RoleMismatch);
        }

        Ok(AuthenticatedUser {
            username: user.username,
            role: user.role,
        })
    }
}
