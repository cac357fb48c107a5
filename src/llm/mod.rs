//! Remote text generation for summaries and flashcards.
//!
//! One narrow trait over the chat-completion service so the workflow can be
//! tested with deterministic fakes.

mod generate;

pub use generate::{generate_flashcards, generate_summary};

use crate::error::{LeseError, Result};
use crate::openai::create_client_with_timeout;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, instrument};

/// Trait for single-turn text completion.
#[async_trait]
pub trait Completer: Send + Sync {
    /// Send a two-message conversation (system + user) and return the first
    /// completion choice's text, trimmed.
    async fn complete(&self, system: &str, user: &str) -> Result<String>;
}

/// Chat-completion client for the OpenAI API.
///
/// Holds the credential explicitly; nothing in this type reads the
/// environment.
pub struct OpenAICompleter {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
}

impl OpenAICompleter {
    /// Create a completer for the given API key and chat model.
    pub fn new(api_key: &str, model: &str, timeout: Duration) -> Self {
        Self {
            client: create_client_with_timeout(api_key, timeout),
            model: model.to_string(),
        }
    }
}

#[async_trait]
impl Completer for OpenAICompleter {
    #[instrument(skip(self, system, user), fields(model = %self.model))]
    async fn complete(&self, system: &str, user: &str) -> Result<String> {
        let messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(system)
                .build()
                .map_err(|e| LeseError::OpenAI(e.to_string()))?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(user)
                .build()
                .map_err(|e| LeseError::OpenAI(e.to_string()))?
                .into(),
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .build()
            .map_err(|e| LeseError::OpenAI(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| LeseError::OpenAI(format!("Chat API error: {}", e)))?;

        let text = response
            .choices
            .first()
            .and_then(|c| c.message.content.as_ref())
            .ok_or_else(|| LeseError::OpenAI("Empty response from model".to_string()))?;

        debug!("Received {} characters", text.len());
        Ok(text.trim().to_string())
    }
}
