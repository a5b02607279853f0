//! Line-by-line driver for class diagram source
//!
//! Splits input into lines, skips passive lines (blanks, comments, the
//! `@startuml` / `@enduml` frame), and dispatches each remaining line to the
//! first registered command whose grammar accepts it. Processing stops at the
//! first error; lines before it have already been applied.

use crate::commands::create_class::CreateClassCommand;
use crate::core::{Command, DiagramError, LineLocation};
use crate::model::{AddressingMode, ClassDiagram};
use tracing::{debug, instrument, trace};

/// Dispatches source lines to registered commands
pub struct LineProcessor {
    commands: Vec<Box<dyn Command>>,
}

impl LineProcessor {
    pub fn new() -> Self {
        Self {
            commands: vec![Box::new(CreateClassCommand)],
        }
    }

    /// Process source into a fresh diagram under the default addressing mode
    pub fn process(&self, input: &str) -> Result<ClassDiagram, DiagramError> {
        self.process_with_mode(input, AddressingMode::default())
    }

    /// Process source into a fresh diagram under an explicit addressing mode
    #[instrument(skip(self, input), fields(bytes = input.len()))]
    pub fn process_with_mode(
        &self,
        input: &str,
        mode: AddressingMode,
    ) -> Result<ClassDiagram, DiagramError> {
        let mut diagram = ClassDiagram::new(mode);
        self.process_into(&mut diagram, None, input)?;
        Ok(diagram)
    }

    /// Process source into an existing diagram, tagging locations with an
    /// optional source name
    pub fn process_into(
        &self,
        diagram: &mut ClassDiagram,
        source: Option<&str>,
        input: &str,
    ) -> Result<(), DiagramError> {
        for (index, raw) in input.lines().enumerate() {
            let number = index + 1;
            let line = raw.trim();
            if Self::is_passive(line) {
                trace!(line = number, "skipping passive line");
                continue;
            }
            let location = match source {
                Some(name) => LineLocation::in_source(name, number),
                None => LineLocation::new(number),
            };
            match self.commands.iter().find(|c| c.matches(line)) {
                Some(command) => {
                    debug!(command = command.name(), line = number, "executing");
                    command.execute(diagram, location, line)?;
                }
                None => return Err(DiagramError::syntax_error(number, line)),
            }
        }
        Ok(())
    }

    // Blank lines, quote comments and the diagram frame carry no commands.
    fn is_passive(line: &str) -> bool {
        line.is_empty()
            || line.starts_with('\'')
            || line.starts_with("@startuml")
            || line.starts_with("@enduml")
    }
}

impl Default for LineProcessor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ClassifierKind;

    #[test]
    fn test_processes_multiple_declarations() {
        let diagram = LineProcessor::new()
            .process("@startuml\nclass Foo\ninterface Bar\n@enduml\n")
            .unwrap();
        assert_eq!(diagram.leaf_count(), 2);
        assert_eq!(diagram.leaf("Bar").unwrap().kind(), ClassifierKind::Interface);
    }

    #[test]
    fn test_skips_blanks_and_comments() {
        let diagram = LineProcessor::new()
            .process("\n  \n' a comment\nclass Foo\n")
            .unwrap();
        assert_eq!(diagram.leaf_count(), 1);
    }

    #[test]
    fn test_unmatched_line_is_syntax_error() {
        let err = LineProcessor::new()
            .process("class Foo\nclazz Bar\n")
            .unwrap_err();
        match err {
            DiagramError::SyntaxError { line, snippet } => {
                assert_eq!(line, 2);
                assert_eq!(snippet, "clazz Bar");
            }
            other => panic!("expected syntax error, got {}", other),
        }
    }

    #[test]
    fn test_error_reports_one_based_line_number() {
        let err = LineProcessor::new()
            .process("class Foo\ncircle C\nclass C\n")
            .unwrap_err();
        assert!(format!("{}", err).contains("line 3"));
    }

    #[test]
    fn test_process_into_tags_source_name() {
        let processor = LineProcessor::new();
        let mut diagram = ClassDiagram::default();
        processor
            .process_into(&mut diagram, Some("model.puml"), "class Foo\n")
            .unwrap();
        let location = diagram.leaf("Foo").unwrap().location().unwrap();
        assert_eq!(location.source.as_deref(), Some("model.puml"));
        assert_eq!(format!("{}", location), "model.puml:1");
    }

    #[test]
    fn test_leading_whitespace_is_trimmed() {
        let diagram = LineProcessor::new().process("   class Foo\n").unwrap();
        assert!(diagram.leaf_exists("Foo"));
    }
}
