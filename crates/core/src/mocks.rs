//! Mock implementations of core traits for testing.
//!
//! These are scripted stand-ins for the collaborators around the router:
//! the LLM, the generation backend, and the router itself.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use crate::{
    traits::{ChatMessage, GenerationBackend, IntentRouter, LlmClient, LlmResponse, LlmUsage, RenderedElement},
    types::{GenerationRequest, IntentRequest, Resolution},
    Error, Result,
};

// =============================================================================
// Mock LLM Client
// =============================================================================

/// One scripted LLM behavior.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Return this text.
    Text(String),
    /// Fail with a provider error.
    Fail(String),
    /// Never answer within any sane timeout.
    Stall,
}

/// Scripted mock LLM. Replies are consumed in order; the last one repeats.
pub struct MockLlm {
    replies: Mutex<VecDeque<MockReply>>,
    prompts: Mutex<Vec<String>>,
}

impl MockLlm {
    /// Create a mock LLM with a queue of text responses.
    pub fn new(responses: Vec<String>) -> Self {
        Self::scripted(responses.into_iter().map(MockReply::Text).collect())
    }

    /// Create a mock from arbitrary scripted behaviors.
    pub fn scripted(replies: Vec<MockReply>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Create a mock that always returns the same response.
    pub fn constant(response: &str) -> Self {
        Self::new(vec![response.to_string()])
    }

    /// Create a mock whose every call fails.
    pub fn failing(message: &str) -> Self {
        Self::scripted(vec![MockReply::Fail(message.to_string())])
    }

    /// Create a mock whose every call hangs.
    pub fn stalled() -> Self {
        Self::scripted(vec![MockReply::Stall])
    }

    /// Get the number of calls made to this mock.
    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    /// Every prompt received, system and user text joined.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    fn next_reply(&self) -> Option<MockReply> {
        let mut replies = self.replies.lock().unwrap();
        if replies.len() > 1 {
            replies.pop_front()
        } else {
            replies.front().cloned()
        }
    }
}

#[async_trait]
impl LlmClient for MockLlm {
    async fn complete(&self, prompt: &str) -> Result<LlmResponse> {
        self.prompts.lock().unwrap().push(prompt.to_string());

        match self.next_reply() {
            Some(MockReply::Text(content)) => Ok(LlmResponse {
                content,
                finish_reason: "stop".to_string(),
                usage: LlmUsage {
                    prompt_tokens: 10,
                    completion_tokens: 20,
                    total_tokens: 30,
                },
            }),
            Some(MockReply::Fail(message)) => Err(Error::model_provider(message)),
            Some(MockReply::Stall) => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Err(Error::Timeout("mock stall elapsed".into()))
            }
            None => Err(Error::model_provider("no scripted reply")),
        }
    }

    async fn chat(&self, messages: &[ChatMessage]) -> Result<LlmResponse> {
        let joined = messages
            .iter()
            .map(|m| m.content.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");
        self.complete(&joined).await
    }
}

// =============================================================================
// Mock Generation Backend
// =============================================================================

/// Backend that records requests and renders a stub element.
#[derive(Default)]
pub struct MockBackend {
    requests: Mutex<Vec<GenerationRequest>>,
    failure: Option<String>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend whose every call fails.
    pub fn failing(message: &str) -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            failure: Some(message.to_string()),
        }
    }

    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerationBackend for MockBackend {
    async fn generate(&self, request: &GenerationRequest) -> Result<RenderedElement> {
        self.requests.lock().unwrap().push(request.clone());

        if let Some(message) = &self.failure {
            return Err(Error::backend(message.clone()));
        }

        Ok(RenderedElement {
            html: format!(
                "<div data-kind=\"{}\" data-count=\"{}\"></div>",
                request.component_type, request.count
            ),
            presentation_id: Some("mock-presentation".to_string()),
            variants_used: Vec::new(),
        })
    }
}

// =============================================================================
// Mock Intent Router
// =============================================================================

/// Mock router that returns a fixed resolution.
pub struct MockRouter {
    resolution: Resolution,
}

impl MockRouter {
    pub fn new(resolution: Resolution) -> Self {
        Self { resolution }
    }
}

#[async_trait]
impl IntentRouter for MockRouter {
    async fn resolve(&self, _request: &IntentRequest) -> Resolution {
        self.resolution.clone()
    }
}
