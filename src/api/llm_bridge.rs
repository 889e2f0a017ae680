//! Bridge between the chain and the `llm` crate.

use async_trait::async_trait;
use llm::chat::ChatMessage;
use llm::LLMProvider;

use super::error::CompletionError;
use crate::core::config::{ConfigError, ProviderSettings};

/// A stateless text-completion endpoint.
///
/// The chain only ever needs one operation: send a prompt, get text back.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError>;
}

#[async_trait]
impl<C: CompletionClient + ?Sized> CompletionClient for &C {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        (**self).complete(prompt).await
    }
}

#[async_trait]
impl<C: CompletionClient + ?Sized> CompletionClient for Box<C> {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        (**self).complete(prompt).await
    }
}

/// [`CompletionClient`] backed by an `llm` provider.
///
/// Each call is a single user message with no history, system prompt or
/// tools. Temperature is fixed at build time by [`ProviderSettings::build_provider`].
pub struct LlmClient {
    provider: Box<dyn LLMProvider>,
}

impl LlmClient {
    pub fn new(provider: Box<dyn LLMProvider>) -> Self {
        Self { provider }
    }

    /// Builds the provider described by `settings`, reading its credential
    /// from the environment.
    pub fn from_settings(settings: &ProviderSettings) -> Result<Self, ConfigError> {
        Ok(Self::new(settings.build_provider()?))
    }
}

impl From<Box<dyn LLMProvider>> for LlmClient {
    fn from(provider: Box<dyn LLMProvider>) -> Self {
        Self::new(provider)
    }
}

#[async_trait]
impl CompletionClient for LlmClient {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        if prompt.trim().is_empty() {
            return Err(CompletionError::EmptyPrompt);
        }

        let req = ChatMessage::user().content(prompt).build();
        let resp = self.provider.chat(&[req]).await?;
        resp.text()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or(CompletionError::EmptyResponse)
    }
}
