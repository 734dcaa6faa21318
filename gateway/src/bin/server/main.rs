use std::sync::Arc;

use auth::Authenticator;
use gateway::config::Config;
use gateway::domain::user::service::AuthService;
use gateway::inbound::http::router::create_router;
use gateway::outbound::completions::OpenAiCompatibleClient;
use gateway::outbound::repositories::PostgresUserRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gateway=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "gateway",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        cors_allowed_origins = ?config.server.cors_allowed_origins,
        token_ttl_minutes = config.jwt.expiration_minutes,
        upstream_base_url = %config.upstream.base_url,
        upstream_model = %config.upstream.model,
        "Configuration loaded"
    );
    if config.upstream.api_key.is_empty() {
        tracing::warn!("No upstream API key configured, chat requests will be rejected upstream");
    }

    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = 5,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let authenticator = Arc::new(
        Authenticator::new(config.jwt.secret.as_bytes())
            .with_token_ttl(chrono::Duration::minutes(config.jwt.expiration_minutes)),
    );
    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool));
    let auth_service = Arc::new(AuthService::new(user_repository, authenticator));
    let chat_client = Arc::new(OpenAiCompatibleClient::new(&config.upstream)?);

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(
        auth_service,
        chat_client,
        &config.server.cors_allowed_origins,
    );

    if let Err(e) = axum::serve(http_listener, http_application).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }
    tracing::info!("Server exited successfully");

    Ok(())
}
