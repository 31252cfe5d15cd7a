use async_trait::async_trait;
use crate::types::{IntentRequest, Resolution};

/// Turns one message into a finalized intent.
///
/// Infallible by contract: every extraction failure is absorbed by a
/// fallback, and an unresolvable ADD comes back as a clarification intent.
#[async_trait]
pub trait IntentRouter: Send + Sync {
    async fn resolve(&self, request: &IntentRequest) -> Resolution;
}
