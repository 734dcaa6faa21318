use async_trait::async_trait;

use crate::chat::errors::ChatError;
use crate::chat::models::ChatPrompt;
use crate::chat::models::ChatReply;

/// Upstream language model provider.
#[async_trait]
pub trait ChatCompletionPort: Send + Sync + 'static {
    /// Send one user message and wait for the complete answer.
    ///
    /// # Errors
    /// * `Upstream` - Provider unreachable or returned a non-success status
    /// * `InvalidResponse` - Provider answered without any usable content
    async fn complete(&self, prompt: &ChatPrompt) -> Result<ChatReply, ChatError>;
}
