//! Core error types for diagram processing
//!
//! A single error enum covers the whole pipeline: command execution failures
//! raised by this crate, and failures reported by the color / URL
//! collaborators, which propagate unchanged.

use thiserror::Error;

/// Errors produced while processing class diagram source
#[derive(Error, Debug)]
pub enum DiagramError {
    #[error("{message} at line {line}")]
    CommandError { message: String, line: usize },

    #[error("Syntax error at line {line}: {snippet}")]
    SyntaxError { line: usize, snippet: String },

    #[error("Unknown color: {name}")]
    UnknownColor { name: String },

    #[error("Malformed url: {url}")]
    MalformedUrl { url: String },

    #[error("IO error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },
}

impl DiagramError {
    /// Create a command execution failure for the given source line
    pub fn command_error(message: impl Into<String>, line: usize) -> Self {
        Self::CommandError {
            message: message.into(),
            line,
        }
    }

    /// Create a syntax error for a line no command could handle
    pub fn syntax_error(line: usize, snippet: impl Into<String>) -> Self {
        Self::SyntaxError {
            line,
            snippet: snippet.into(),
        }
    }

    /// Create an unknown-color error
    pub fn unknown_color(name: impl Into<String>) -> Self {
        Self::UnknownColor { name: name.into() }
    }

    /// Create a malformed-url error
    pub fn malformed_url(url: impl Into<String>) -> Self {
        Self::MalformedUrl { url: url.into() }
    }
}
