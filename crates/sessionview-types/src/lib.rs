//! Shared types for the sessionview engine.

mod display;
mod event;
mod search;
mod tree;

pub use display::*;
pub use event::*;
pub use search::*;
pub use tree::*;
