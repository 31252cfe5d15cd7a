//! Rig LLM client adapter.
//!
//! Wraps Rig's Agent for integration with our LlmClient trait.

use async_trait::async_trait;
use std::str::FromStr;

use slide_intent_core::{
    config::LlmConfig,
    traits::{ChatMessage, LlmClient, LlmResponse, LlmUsage},
    Error, Result,
};

// Import required Rig traits
use rig::client::{CompletionClient, ProviderClient};
use rig::completion::Prompt;

/// Provider type for Rig clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RigProvider {
    OpenAI,
    Anthropic,
}

impl RigProvider {
    /// Environment variable holding the provider's API key.
    pub fn key_var(&self) -> &'static str {
        match self {
            Self::OpenAI => "OPENAI_API_KEY",
            Self::Anthropic => "ANTHROPIC_API_KEY",
        }
    }
}

impl FromStr for RigProvider {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(Self::OpenAI),
            "anthropic" => Ok(Self::Anthropic),
            other => Err(Error::invalid_config(format!("unsupported LLM provider: {other}"))),
        }
    }
}

/// Configuration for Rig client.
#[derive(Debug, Clone)]
pub struct RigConfig {
    pub provider: RigProvider,
    pub model: String,
    pub temperature: Option<f64>,
    pub max_tokens: Option<u64>,
}

impl RigConfig {
    /// Create config for OpenAI.
    pub fn openai(model: impl Into<String>) -> Self {
        Self {
            provider: RigProvider::OpenAI,
            model: model.into(),
            temperature: None,
            max_tokens: None,
        }
    }

    /// Create config for Anthropic.
    pub fn anthropic(model: impl Into<String>) -> Self {
        Self {
            provider: RigProvider::Anthropic,
            ..Self::openai(model)
        }
    }

    /// Build from the `llm` configuration section.
    pub fn from_llm_config(config: &LlmConfig) -> Result<Self> {
        let provider: RigProvider = config.provider.parse()?;
        Ok(Self {
            provider,
            model: config.model.clone(),
            temperature: Some(config.temperature),
            max_tokens: Some(config.max_tokens),
        })
    }

    pub fn with_temperature(mut self, temp: f64) -> Self {
        self.temperature = Some(temp);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u64) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

/// Rig-based LLM client.
///
/// System messages become the agent preamble; everything else is sent as
/// one prompt.
pub struct RigLlmClient {
    config: RigConfig,
}

impl RigLlmClient {
    pub fn new(config: RigConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RigConfig {
        &self.config
    }

    /// Split messages into preamble and prompt.
    fn build_prompt(messages: &[ChatMessage]) -> (Option<String>, String) {
        let mut preamble: Vec<&str> = Vec::new();
        let mut prompt = String::new();

        for msg in messages {
            match msg.role.as_str() {
                "system" => preamble.push(&msg.content),
                "user" => prompt.push_str(&format!("{}\n\n", msg.content)),
                "assistant" => prompt.push_str(&format!("Assistant: {}\n\n", msg.content)),
                _ => prompt.push_str(&format!("{}: {}\n\n", msg.role, msg.content)),
            }
        }

        let preamble = (!preamble.is_empty()).then(|| preamble.join("\n\n"));
        (preamble, prompt.trim_end().to_string())
    }

    fn ensure_key(&self) -> Result<()> {
        let var = self.config.provider.key_var();
        // Rig's from_env panics without the key.
        if std::env::var(var).is_err() {
            return Err(Error::model_provider(format!("{var} not set")));
        }
        Ok(())
    }

    async fn call(&self, preamble: Option<&str>, prompt: &str) -> Result<LlmResponse> {
        self.ensure_key()?;

        let response = match self.config.provider {
            RigProvider::OpenAI => {
                use rig::providers::openai;
                let client = openai::Client::from_env();
                let mut builder = client.agent(&self.config.model);
                if let Some(system) = preamble {
                    builder = builder.preamble(system);
                }
                if let Some(t) = self.config.temperature {
                    builder = builder.temperature(t);
                }
                if let Some(n) = self.config.max_tokens {
                    builder = builder.max_tokens(n);
                }
                builder
                    .build()
                    .prompt(prompt)
                    .await
                    .map_err(|e| Error::model_provider(format!("OpenAI error: {e}")))?
            }
            RigProvider::Anthropic => {
                use rig::providers::anthropic;
                let client = anthropic::Client::from_env();
                let mut builder = client.agent(&self.config.model);
                if let Some(system) = preamble {
                    builder = builder.preamble(system);
                }
                if let Some(t) = self.config.temperature {
                    builder = builder.temperature(t);
                }
                // Anthropic requires max_tokens on every request.
                builder = builder.max_tokens(self.config.max_tokens.unwrap_or(2048));
                builder
                    .build()
                    .prompt(prompt)
                    .await
                    .map_err(|e| Error::model_provider(format!("Anthropic error: {e}")))?
            }
        };

        let prompt_len = prompt.len() + preamble.map_or(0, str::len);
        Ok(LlmResponse {
            usage: LlmUsage {
                prompt_tokens: (prompt_len / 4) as u64,
                completion_tokens: (response.len() / 4) as u64,
                total_tokens: ((prompt_len + response.len()) / 4) as u64,
            },
            content: response,
            finish_reason: "stop".to_string(),
        })
    }
}

#[async_trait]
impl LlmClient for RigLlmClient {
    async fn complete(&self, prompt: &str) -> Result<LlmResponse> {
        tracing::debug!(
            provider = ?self.config.provider,
            model = %self.config.model,
            prompt_len = prompt.len(),
            "Calling LLM"
        );
        self.call(None, prompt).await
    }

    async fn chat(&self, messages: &[ChatMessage]) -> Result<LlmResponse> {
        let (preamble, prompt) = Self::build_prompt(messages);
        tracing::debug!(
            provider = ?self.config.provider,
            model = %self.config.model,
            messages = messages.len(),
            prompt_len = prompt.len(),
            "Calling LLM"
        );
        self.call(preamble.as_deref(), &prompt).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_section() {
        let mut section = slide_intent_core::config::AppConfig::default().llm;
        section.provider = "Anthropic".into();
        section.model = "claude-3-5-haiku-latest".into();

        let config = RigConfig::from_llm_config(&section).unwrap();
        assert_eq!(config.provider, RigProvider::Anthropic);
        assert_eq!(config.model, "claude-3-5-haiku-latest");
        assert_eq!(config.temperature, Some(0.3));
        assert_eq!(config.max_tokens, Some(2048));
    }

    #[test]
    fn test_unknown_provider() {
        assert!(matches!("mistral".parse::<RigProvider>(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_build_prompt() {
        let messages = vec![
            ChatMessage::system("You are an intent parser"),
            ChatMessage::user("User message: add a table"),
        ];

        let (preamble, prompt) = RigLlmClient::build_prompt(&messages);
        assert_eq!(preamble.as_deref(), Some("You are an intent parser"));
        assert_eq!(prompt, "User message: add a table");
    }
}
