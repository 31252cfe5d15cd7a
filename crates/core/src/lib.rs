#![deny(unused)]
//! Core types, traits, and error definitions for the slide intent engine.
//!
//! This crate holds the component registry, the per-kind configuration
//! schema, the intent model and the collaborator traits shared by the
//! resolver, the model gateway and the session store.

pub mod config;
pub mod error;
pub mod mocks;
pub mod traits;
pub mod types;

pub use error::{Error, Result};
pub use traits::*;
pub use types::*;
