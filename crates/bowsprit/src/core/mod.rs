//! Core abstractions for class diagram processing
//!
//! Error types, the command trait that statement handlers implement, logging
//! setup, and shared parser combinators.

pub mod chumsky_utils;
mod command;
mod error;
pub mod logging;

pub use command::*;
pub use error::*;
pub use logging::*;
