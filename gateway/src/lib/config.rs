use std::env;
use std::fmt;

use config::Config as ConfigBuilder;
use config::Environment;
use config::File;
use serde::Deserialize;
use serde::Deserializer;
use thiserror::Error;

const DEFAULT_HTTP_PORT: i64 = 8000;
const DEFAULT_TOKEN_TTL_MINUTES: i64 = 30;
/// One year
pub const MAX_TOKEN_TTL_MINUTES: i64 = 525_600;
const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";
const DEFAULT_UPSTREAM_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/openai";
const DEFAULT_UPSTREAM_MODEL: &str = "gemini-2.5-pro";
const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant.";
const DEFAULT_UPSTREAM_TIMEOUT_SECONDS: i64 = 60;

/// Startup configuration failures. All of them are fatal.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Token signing secret is not configured (set JWT__SECRET or SECRET_KEY)")]
    MissingSecret,

    #[error("Database connection string is not configured (set DATABASE__URL or DATABASE_URL)")]
    MissingConnectionString,

    #[error(
        "Token lifetime must be between 1 and {max} minutes, got {0}",
        max = MAX_TOKEN_TTL_MINUTES
    )]
    InvalidTokenTtl(i64),

    #[error(transparent)]
    Source(#[from] config::ConfigError),
}

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub upstream: UpstreamConfig,
}

#[derive(Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
    #[serde(deserialize_with = "origin_list")]
    pub cors_allowed_origins: Vec<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OriginList {
    Many(Vec<String>),
    One(String),
}

/// TOML arrays come through as lists, environment variables as one
/// comma-separated string.
fn origin_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let origins = match OriginList::deserialize(deserializer)? {
        OriginList::Many(origins) => origins,
        OriginList::One(joined) => joined.split(',').map(str::to_string).collect(),
    };

    Ok(origins
        .into_iter()
        .map(|origin| origin.trim().to_string())
        .filter(|origin| !origin.is_empty())
        .collect())
}

#[derive(Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiration_minutes: i64,
}

#[derive(Deserialize, Clone)]
pub struct UpstreamConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub system_prompt: String,
    pub timeout_seconds: u64,
}

// Credentials may sit in the connection string
impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &"<redacted>")
            .finish()
    }
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("expiration_minutes", &self.expiration_minutes)
            .finish()
    }
}

impl fmt::Debug for UpstreamConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpstreamConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("system_prompt", &self.system_prompt)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, JWT__SECRET, SERVER__HTTP_PORT, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    /// 4. Flat variables DATABASE_URL, SECRET_KEY, API_KEY and BASE_URL
    /// 5. Built-in defaults
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .set_default("database.url", flat_var("DATABASE_URL"))?
            .set_default("server.http_port", DEFAULT_HTTP_PORT)?
            .set_default("server.cors_allowed_origins", vec![DEFAULT_CORS_ORIGIN])?
            .set_default("jwt.secret", flat_var("SECRET_KEY"))?
            .set_default("jwt.expiration_minutes", DEFAULT_TOKEN_TTL_MINUTES)?
            .set_default(
                "upstream.base_url",
                env::var("BASE_URL").unwrap_or_else(|_| DEFAULT_UPSTREAM_BASE_URL.to_string()),
            )?
            .set_default("upstream.api_key", flat_var("API_KEY"))?
            .set_default("upstream.model", DEFAULT_UPSTREAM_MODEL)?
            .set_default("upstream.system_prompt", DEFAULT_SYSTEM_PROMPT)?
            .set_default("upstream.timeout_seconds", DEFAULT_UPSTREAM_TIMEOUT_SECONDS)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Values stay strings so secrets are never coerced into numbers.
            // Example: SERVER__CORS_ALLOWED_ORIGINS=http://a.test,http://b.test
            .add_source(Environment::default().separator("__"))
            .build()?;

        let mut config: Config = configuration.try_deserialize()?;
        config.database.url = normalize_database_url(&config.database.url);
        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.database.validate()?;
        if self.jwt.secret.is_empty() {
            return Err(ConfigError::MissingSecret);
        }
        if !(1..=MAX_TOKEN_TTL_MINUTES).contains(&self.jwt.expiration_minutes) {
            return Err(ConfigError::InvalidTokenTtl(self.jwt.expiration_minutes));
        }
        Ok(())
    }
}

impl DatabaseConfig {
    /// Load only the database section, for tools that never serve HTTP.
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .set_default("database.url", flat_var("DATABASE_URL"))?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            .add_source(Environment::default().separator("__"))
            .build()?;

        let url: String = configuration.get("database.url")?;
        let config = DatabaseConfig {
            url: normalize_database_url(&url),
        };
        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.url.is_empty() {
            return Err(ConfigError::MissingConnectionString);
        }
        Ok(())
    }
}

fn flat_var(name: &str) -> String {
    env::var(name).unwrap_or_default()
}

/// Strip surrounding whitespace and quotes left over from `.env` files.
pub fn normalize_database_url(url: &str) -> String {
    url.trim()
        .trim_matches(|c| c == '"' || c == '\'')
        .to_string()
}
