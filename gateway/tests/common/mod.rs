#![allow(dead_code)]

use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use async_trait::async_trait;
use auth::password::Argon2Scheme;
use auth::Authenticator;
use auth::JwtHandler;
use auth::PasswordHasher;
use gateway::chat::errors::ChatError;
use gateway::chat::models::ChatPrompt;
use gateway::chat::models::ChatReply;
use gateway::chat::ports::ChatCompletionPort;
use gateway::domain::user::service::AuthService;
use gateway::inbound::http::router::create_router;
use gateway::outbound::repositories::InMemoryUserRepository;
use serde_json::json;
use serde_json::Value;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Message that makes the fake provider fail
pub const UPSTREAM_FAILURE: &str = "please fail upstream";

/// Stand-in provider that echoes the prompt
#[derive(Default)]
pub struct EchoChatClient {
    calls: AtomicUsize,
}

impl EchoChatClient {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChatCompletionPort for EchoChatClient {
    async fn complete(&self, prompt: &ChatPrompt) -> Result<ChatReply, ChatError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if prompt.as_str() == UPSTREAM_FAILURE {
            return Err(ChatError::Upstream("connection reset".to_string()));
        }
        Ok(ChatReply {
            content: format!("echo: {}", prompt.as_str()),
        })
    }
}

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub repository: Arc<InMemoryUserRepository>,
    pub chat_client: Arc<EchoChatClient>,
    pub api_client: reqwest::Client,
    pub jwt_handler: JwtHandler,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let repository = Arc::new(InMemoryUserRepository::new());
        let chat_client = Arc::new(EchoChatClient::default());

        // Cheap hashing parameters keep the suite fast
        let authenticator = Arc::new(Authenticator::with_hasher(
            TEST_SECRET,
            PasswordHasher::with_default_scheme(
                Argon2Scheme::with_cost(1024, 1, 1).expect("valid argon2 parameters"),
            ),
        ));
        let auth_service = Arc::new(AuthService::new(Arc::clone(&repository), authenticator));

        let router = create_router(
            auth_service,
            Arc::clone(&chat_client) as Arc<dyn ChatCompletionPort>,
            &["http://localhost:3000".to_string()],
        );

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            port,
            repository,
            chat_client,
            api_client: reqwest::Client::new(),
            jwt_handler: JwtHandler::new(TEST_SECRET),
        }
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    pub async fn register(&self, username: &str, password: &str) -> reqwest::Response {
        self.post("/register")
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn login(&self, username: &str, password: &str) -> reqwest::Response {
        self.post("/login")
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Register and log in, returning the access token
    pub async fn token_for(&self, username: &str, password: &str) -> String {
        self.register(username, password).await;
        let body: Value = self
            .login(username, password)
            .await
            .json()
            .await
            .expect("Failed to parse response");
        body["data"]["access_token"]
            .as_str()
            .expect("access token in login response")
            .to_string()
    }

    pub async fn chat(&self, token: &str, message: &str) -> reqwest::Response {
        self.post_authenticated("/chat", token)
            .json(&json!({ "message": message }))
            .send()
            .await
            .expect("Failed to execute request")
    }
}
