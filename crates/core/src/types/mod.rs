//! Core type definitions for the slide intent engine.

pub mod component;
pub mod debug;
pub mod generation;
pub mod intent;
pub mod request;
pub mod session;
pub mod settings;

pub use component::*;
pub use debug::*;
pub use generation::*;
pub use intent::*;
pub use request::*;
pub use session::*;
pub use settings::*;
