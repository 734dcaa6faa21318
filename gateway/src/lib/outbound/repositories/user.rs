use async_trait::async_trait;
use sqlx::FromRow;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::user::models::Role;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::CredentialError;

const USERNAME_UNIQUE_CONSTRAINT: &str = "users_username_key";

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct UserRow {
    id: Uuid,
    username: String,
    hashed_password: String,
    role: String,
}

impl TryFrom<UserRow> for User {
    type Error = CredentialError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: UserId(row.id),
            username: Username::new(row.username)?,
            password_hash: row.hashed_password,
            role: Role::new(row.role)?,
        })
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: User) -> Result<User, CredentialError> {
        let mut transaction = self
            .pool
            .begin()
            .await
            .map_err(|e| CredentialError::DatabaseError(e.to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO users (id, username, hashed_password, role)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(user.id.0)
        .bind(user.username.as_str())
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .execute(&mut *transaction)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation()
                    && db_err.constraint() == Some(USERNAME_UNIQUE_CONSTRAINT)
                {
                    return CredentialError::DuplicateUsername(user.username.as_str().to_string());
                }
            }
            CredentialError::DatabaseError(e.to_string())
        })?;

        transaction
            .commit()
            .await
            .map_err(|e| CredentialError::DatabaseError(e.to_string()))?;

        Ok(user)
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, CredentialError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, hashed_password, role
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| CredentialError::DatabaseError(e.to_string()))?;

        row.map(User::try_from).transpose()
    }
}
