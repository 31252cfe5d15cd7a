#![deny(unused)]
//! Intent resolution for the slide builder.
//!
//! This crate turns a chat message (plus any caller-fixed kind or
//! configuration) into a fully specified intent: the deterministic router,
//! LLM extraction with keyword fallbacks, the three-tier configuration
//! merge, and the chat service that applies intents to a session.

pub mod classifier;
pub mod extraction;
pub mod inference;
pub mod merge;
pub mod prompts;
pub mod router;
pub mod service;

pub use classifier::{classify, Classification, RULE_BASED_CONFIDENCE};
pub use extraction::{extract_json_block, Attempt, LlmExtractor};
pub use inference::{infer, Inferable};
pub use router::DeterministicRouter;
pub use service::{ChatReply, ChatService};
