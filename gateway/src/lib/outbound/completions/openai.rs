use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde::Serialize;

use crate::chat::errors::ChatError;
use crate::chat::models::ChatPrompt;
use crate::chat::models::ChatReply;
use crate::chat::ports::ChatCompletionPort;
use crate::config::UpstreamConfig;

/// Client for providers exposing the OpenAI `chat/completions` API.
pub struct OpenAiCompatibleClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
    system_prompt: String,
}

impl OpenAiCompatibleClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self, ChatError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| ChatError::Upstream(e.to_string()))?;

        Ok(Self {
            http,
            endpoint: format!("{}/chat/completions", config.base_url.trim_end_matches('/')),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            system_prompt: config.system_prompt.clone(),
        })
    }
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: [CompletionMessage<'a>; 2],
    stream: bool,
}

#[derive(Debug, Serialize)]
struct CompletionMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: Option<ChoiceMessage>,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl CompletionResponse {
    // Chat models answer in `message.content`, legacy completion models in `text`
    fn into_reply(self) -> Result<ChatReply, ChatError> {
        let choice = self
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ChatError::InvalidResponse("no choices returned".to_string()))?;

        choice
            .message
            .and_then(|message| message.content)
            .or(choice.text)
            .map(|content| ChatReply { content })
            .ok_or_else(|| ChatError::InvalidResponse("choice carries no content".to_string()))
    }
}

#[async_trait]
impl ChatCompletionPort for OpenAiCompatibleClient {
    async fn complete(&self, prompt: &ChatPrompt) -> Result<ChatReply, ChatError> {
        let request = CompletionRequest {
            model: &self.model,
            messages: [
                CompletionMessage {
                    role: "system",
                    content: &self.system_prompt,
                },
                CompletionMessage {
                    role: "user",
                    content: prompt.as_str(),
                },
            ],
            stream: false,
        };

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ChatError::Upstream(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), model = %self.model, "Upstream rejected completion request");
            return Err(ChatError::Upstream(format!("status {}", status)));
        }

        let body: CompletionResponse = response
            .json()
            .await
            .map_err(|e| ChatError::InvalidResponse(e.to_string()))?;

        let reply = body.into_reply()?;
        tracing::debug!(model = %self.model, reply_chars = reply.content.chars().count(), "Completion received");

        Ok(reply)
    }
}
