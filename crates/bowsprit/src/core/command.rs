//! Command abstraction for single-line diagram statements
//!
//! Each statement form of the class diagram language is a [`Command`]. The
//! line processor probes commands in registration order and hands the line to
//! the first one whose grammar accepts it.

use crate::core::error::DiagramError;
use crate::model::ClassDiagram;
use std::fmt;

/// Position of a source line, stamped on entities for diagnostics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineLocation {
    /// Source name, when processing came from a file
    pub source: Option<String>,
    /// 1-based line number
    pub line: usize,
}

impl LineLocation {
    pub fn new(line: usize) -> Self {
        Self { source: None, line }
    }

    pub fn in_source(source: impl Into<String>, line: usize) -> Self {
        Self {
            source: Some(source.into()),
            line,
        }
    }
}

impl fmt::Display for LineLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            Some(source) => write!(f, "{}:{}", source, self.line),
            None => write!(f, "line {}", self.line),
        }
    }
}

/// A single-line command of the class diagram language
///
/// `matches` is a pure grammar check; `execute` is only called on lines that
/// already matched, and mutates the shared diagram repository in place.
pub trait Command: Send + Sync {
    /// Stable command name, used in logs
    fn name(&self) -> &'static str;

    /// Whether this command's grammar accepts the line
    fn matches(&self, line: &str) -> bool;

    /// Apply the line to the diagram
    fn execute(
        &self,
        diagram: &mut ClassDiagram,
        location: LineLocation,
        line: &str,
    ) -> Result<(), DiagramError>;
}
