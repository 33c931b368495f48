//! Generative text source trait definitions.

use crate::error::NewsError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// A chat-completion request.
#[derive(Debug, Clone, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_recency_filter: Option<String>,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// Generated text plus the source URLs its `[N]` markers refer to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Completion {
    /// Untrusted free text
    pub content: String,
    /// Citation URLs, in marker order (marker `[1]` is index 0)
    pub citations: Vec<String>,
}

/// Trait for chat-completion style text generators.
#[async_trait]
pub trait CompletionSource: Send + Sync {
    /// Run one completion.
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, NewsError>;

    /// Get the source name.
    fn name(&self) -> &str;
}
