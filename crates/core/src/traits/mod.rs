//! Core traits for the slide intent engine.
//!
//! Traits sit at each collaborator seam:
//! - `llm`: text completion (LlmClient)
//! - `router`: message to intent (IntentRouter)
//! - `session`: canvas and transcript persistence (SessionStore)
//! - `backend`: element rendering (GenerationBackend)

pub mod backend;
pub mod llm;
pub mod router;
pub mod session;

pub use backend::*;
pub use llm::*;
pub use router::*;
pub use session::*;
