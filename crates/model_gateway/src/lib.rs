#![deny(unused)]
//! Model gateway for the slide intent engine.
//!
//! This crate provides:
//! - Rig LLM client adapter (OpenAI, Anthropic)
//! - Circuit breaker so a failing provider falls through to heuristics fast

pub mod circuit;
pub mod rig_client;

use std::sync::Arc;

use slide_intent_core::{config::LlmConfig, traits::LlmClient, Result};

pub use circuit::{CircuitBreakerClient, ProviderHealth, ProviderStatus};
pub use rig_client::{RigConfig, RigLlmClient, RigProvider};

/// Create the LLM client described by the `llm` configuration section.
///
/// Returns `None` when the LLM is disabled. A missing API key is not an
/// error here; calls fail at request time and the resolver falls back.
pub fn create_client(config: &LlmConfig) -> Result<Option<Arc<dyn LlmClient>>> {
    if !config.enabled {
        tracing::info!("LLM disabled, resolving with keyword heuristics only");
        return Ok(None);
    }

    let rig = RigConfig::from_llm_config(config)?;
    if std::env::var(rig.provider.key_var()).is_err() {
        tracing::warn!(
            provider = ?rig.provider,
            key = rig.provider.key_var(),
            "API key not set, LLM calls will fail over to heuristics"
        );
    }

    let name = format!("{:?}:{}", rig.provider, rig.model).to_lowercase();
    tracing::info!(client = %name, timeout_ms = config.timeout_ms, "LLM client configured");

    let inner: Arc<dyn LlmClient> = Arc::new(RigLlmClient::new(rig));
    Ok(Some(Arc::new(CircuitBreakerClient::new(inner, name, &config.circuit))))
}
