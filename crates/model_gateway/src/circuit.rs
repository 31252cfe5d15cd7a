//! Circuit breaker around an LLM client.
//!
//! A dead or slow provider should fail fast so the resolver drops to its
//! keyword heuristics without waiting out a timeout on every message. A call
//! whose future is dropped before it finishes, as a caller's timeout does,
//! counts as a failure.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;

use slide_intent_core::{
    config::CircuitConfig,
    traits::{ChatMessage, LlmClient, LlmResponse},
    Error, Result,
};

/// Provider health as seen by the breaker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderHealth {
    Healthy,
    Degraded,
    CircuitOpen,
}

/// Request outcomes since the circuit last closed.
#[derive(Debug)]
pub struct ProviderStatus {
    pub health: ProviderHealth,
    pub total_requests: u64,
    pub failed_requests: u64,
    pub circuit_open_until: Option<Instant>,
    /// Cool-down elapsed; the next failure reopens the circuit at once.
    pub half_open: bool,
}

impl ProviderStatus {
    fn new() -> Self {
        Self {
            health: ProviderHealth::Healthy,
            total_requests: 0,
            failed_requests: 0,
            circuit_open_until: None,
            half_open: false,
        }
    }

    /// Get failure rate.
    pub fn failure_rate(&self) -> f64 {
        if self.total_requests == 0 {
            0.0
        } else {
            self.failed_requests as f64 / self.total_requests as f64
        }
    }

    fn is_open(&self, now: Instant) -> bool {
        self.circuit_open_until.is_some_and(|until| now < until)
    }
}

/// Wraps a client; opens after `failure_rate` is exceeded over at least
/// `min_requests` calls and stays open for the cool-down.
pub struct CircuitBreakerClient {
    inner: Arc<dyn LlmClient>,
    name: String,
    min_requests: u64,
    failure_rate: f64,
    cooldown: Duration,
    status: Mutex<ProviderStatus>,
}

impl CircuitBreakerClient {
    pub fn new(inner: Arc<dyn LlmClient>, name: impl Into<String>, config: &CircuitConfig) -> Self {
        Self {
            inner,
            name: name.into(),
            min_requests: config.min_requests.max(1),
            failure_rate: config.failure_rate,
            cooldown: Duration::from_secs(config.cooldown_secs),
            status: Mutex::new(ProviderStatus::new()),
        }
    }

    /// Current health.
    pub fn health(&self) -> ProviderHealth {
        self.lock().health
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ProviderStatus> {
        // A poisoned lock only means another call panicked mid-update.
        self.status.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn check_health(&self) -> Result<()> {
        let now = Instant::now();
        let mut status = self.lock();
        if status.is_open(now) {
            return Err(Error::model_provider(format!("Circuit breaker open for {}", self.name)));
        }
        if status.circuit_open_until.take().is_some() {
            tracing::info!(name = %self.name, "Circuit breaker half-open, retrying provider");
            *status = ProviderStatus {
                health: ProviderHealth::Degraded,
                half_open: true,
                ..ProviderStatus::new()
            };
        }
        Ok(())
    }

    fn record_success(&self) {
        let mut status = self.lock();
        status.total_requests += 1;
        status.half_open = false;
        status.health = ProviderHealth::Healthy;
    }

    fn record_failure(&self) {
        let mut status = self.lock();
        status.total_requests += 1;
        status.failed_requests += 1;

        let tripped = status.total_requests >= self.min_requests && status.failure_rate() > self.failure_rate;
        if status.half_open || tripped {
            status.health = ProviderHealth::CircuitOpen;
            status.circuit_open_until = Some(Instant::now() + self.cooldown);
            tracing::warn!(
                name = %self.name,
                failures = status.failed_requests,
                total = status.total_requests,
                half_open = status.half_open,
                cooldown_secs = self.cooldown.as_secs(),
                "Circuit breaker OPENED"
            );
            status.half_open = false;
        } else {
            status.health = ProviderHealth::Degraded;
        }
    }

    fn record(&self, result: Result<LlmResponse>) -> Result<LlmResponse> {
        match &result {
            Ok(_) => self.record_success(),
            Err(e) if e.is_transport() => self.record_failure(),
            Err(_) => {}
        }
        result
    }
}

/// Records a failure if dropped before the call completes.
struct PendingCall<'a> {
    breaker: &'a CircuitBreakerClient,
    finished: bool,
}

impl<'a> PendingCall<'a> {
    fn start(breaker: &'a CircuitBreakerClient) -> Self {
        Self { breaker, finished: false }
    }

    fn finish(mut self, result: Result<LlmResponse>) -> Result<LlmResponse> {
        self.finished = true;
        self.breaker.record(result)
    }
}

impl Drop for PendingCall<'_> {
    fn drop(&mut self) {
        if !self.finished {
            tracing::warn!(name = %self.breaker.name, "LLM call abandoned before completion");
            self.breaker.record_failure();
        }
    }
}

#[async_trait]
impl LlmClient for CircuitBreakerClient {
    async fn complete(&self, prompt: &str) -> Result<LlmResponse> {
        self.check_health()?;
        let call = PendingCall::start(self);
        let result = self.inner.complete(prompt).await;
        call.finish(result)
    }

    async fn chat(&self, messages: &[ChatMessage]) -> Result<LlmResponse> {
        self.check_health()?;
        let call = PendingCall::start(self);
        let result = self.inner.chat(messages).await;
        call.finish(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slide_intent_core::mocks::{MockLlm, MockReply};

    fn config() -> CircuitConfig {
        CircuitConfig {
            min_requests: 4,
            failure_rate: 0.5,
            cooldown_secs: 60,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_circuit_opens_and_recovers() {
        let mock = Arc::new(MockLlm::scripted(vec![
            MockReply::Fail("boom".into()),
            MockReply::Fail("boom".into()),
            MockReply::Fail("boom".into()),
            MockReply::Fail("boom".into()),
            MockReply::Text("{}".into()),
        ]));
        let client = CircuitBreakerClient::new(mock.clone(), "openai:test", &config());

        for _ in 0..4 {
            assert!(client.complete("x").await.is_err());
        }
        assert_eq!(client.health(), ProviderHealth::CircuitOpen);

        let result = client.complete("fail fast").await;
        assert!(matches!(result, Err(Error::ModelProvider(msg)) if msg.contains("Circuit breaker open")));
        assert_eq!(mock.call_count(), 4);

        tokio::time::advance(Duration::from_secs(61)).await;
        assert!(client.complete("retry").await.is_ok());
        assert_eq!(client.health(), ProviderHealth::Healthy);
    }

    #[tokio::test(start_paused = true)]
    async fn test_abandoned_calls_open_circuit() {
        let mock = Arc::new(MockLlm::stalled());
        let config = CircuitConfig {
            min_requests: 2,
            ..config()
        };
        let client = CircuitBreakerClient::new(mock.clone(), "p", &config);

        for _ in 0..2 {
            let attempt = tokio::time::timeout(Duration::from_secs(8), client.complete("x")).await;
            assert!(attempt.is_err());
        }
        assert_eq!(client.health(), ProviderHealth::CircuitOpen);

        let result = client.complete("fail fast").await;
        assert!(matches!(result, Err(Error::ModelProvider(_))));
        assert_eq!(mock.call_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_half_open_trial_reopens() {
        let mock = Arc::new(MockLlm::failing("down"));
        let client = CircuitBreakerClient::new(mock.clone(), "p", &config());

        for _ in 0..4 {
            let _ = client.complete("x").await;
        }
        assert_eq!(client.health(), ProviderHealth::CircuitOpen);

        tokio::time::advance(Duration::from_secs(61)).await;
        assert!(client.complete("trial").await.is_err());
        assert_eq!(client.health(), ProviderHealth::CircuitOpen);
        assert_eq!(mock.call_count(), 5);

        let result = client.complete("still open").await;
        assert!(matches!(result, Err(Error::ModelProvider(msg)) if msg.contains("Circuit breaker open")));
        assert_eq!(mock.call_count(), 5);
    }

    #[tokio::test]
    async fn test_below_min_requests_stays_closed() {
        let client = CircuitBreakerClient::new(Arc::new(MockLlm::failing("down")), "p", &config());
        for _ in 0..3 {
            let _ = client.complete("x").await;
        }
        assert_eq!(client.health(), ProviderHealth::Degraded);
    }
}
