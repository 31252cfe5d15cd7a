#![deny(unused)]
//! Session storage for the slide builder.
//!
//! Sessions hold the canvas (placed elements), the chat transcript and the
//! presentation id. Only an in-process store ships; anything durable plugs
//! in behind the same trait.

pub mod memory;

pub use memory::InMemorySessionStore;
pub use slide_intent_core::traits::SessionStore;
