use crate::chat::errors::ChatError;

/// User message forwarded to the completion provider
///
/// Never blank: whitespace-only input is rejected on construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatPrompt(String);

impl ChatPrompt {
    /// # Errors
    /// * `EmptyMessage` - Message is empty or whitespace only
    pub fn new(message: String) -> Result<Self, ChatError> {
        if message.trim().is_empty() {
            return Err(ChatError::EmptyMessage);
        }
        Ok(Self(message))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Assistant answer returned by the provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatReply {
    pub content: String,
}
