use std::sync::Arc;

use auth::PasswordHasher;
use clap::Parser;
use gateway::config::DatabaseConfig;
use gateway::domain::user::models::Role;
use gateway::domain::user::models::User;
use gateway::domain::user::models::UserId;
use gateway::domain::user::models::Username;
use gateway::domain::user::ports::UserRepository;
use gateway::outbound::repositories::PostgresUserRepository;
use gateway::user::errors::CredentialError;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Create a user directly in the credential store.
#[derive(Debug, Parser)]
#[command(name = "create-user", version)]
struct Cli {
    /// Username, 3-50 characters
    username: String,

    /// Plaintext password, hashed before it is stored
    password: String,

    /// Role to assign
    #[arg(long, default_value = Role::USER)]
    role: String,
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gateway=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let username = Username::new(cli.username)?;
    let role = Role::new(cli.role)?;

    let database = DatabaseConfig::load()?;
    let pg_pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&database.url)
        .await?;
    sqlx::migrate!("./migrations").run(&pg_pool).await?;

    let password = cli.password;
    let password_hash =
        tokio::task::spawn_blocking(move || PasswordHasher::new().hash(&password)).await??;

    let repository = Arc::new(PostgresUserRepository::new(pg_pool));
    let user = User {
        id: UserId::new(),
        username,
        password_hash,
        role,
    };

    match repository.create(user).await {
        Ok(user) => {
            tracing::info!(user_id = %user.id, role = %user.role, "User created");
            println!("User '{}' created with role '{}'", user.username, user.role);
        }
        Err(CredentialError::DuplicateUsername(name)) => {
            println!("User '{}' already exists", name);
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
