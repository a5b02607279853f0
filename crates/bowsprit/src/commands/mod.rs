//! Commands of the class diagram language and the line processor that
//! drives them

pub mod grammar;

mod create_class;
mod processor;

pub use create_class::CreateClassCommand;
pub use processor::LineProcessor;
