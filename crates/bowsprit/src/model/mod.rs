//! The in-memory diagram model
//!
//! Leaf entities, their classifier kinds, display text, and the repository
//! that owns them.

mod diagram;
mod display;
mod entity;
mod kind;

pub use diagram::*;
pub use display::*;
pub use entity::*;
pub use kind::*;
