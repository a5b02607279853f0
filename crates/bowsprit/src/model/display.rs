//! Display text for diagram entities
//!
//! Source text may carry `\n` markers that expand to real line breaks.

use std::fmt;
use unicode_width::UnicodeWidthStr;

/// The (possibly multi-line) display text of an entity
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Display {
    lines: Vec<String>,
}

impl Display {
    /// Build display text from source, expanding `\n` markers
    pub fn from_source(text: &str) -> Self {
        Self {
            lines: text.split("\\n").map(|s| s.to_string()).collect(),
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Rendered width in terminal columns (widest line)
    pub fn width(&self) -> usize {
        self.lines.iter().map(|l| l.as_str().width()).max().unwrap_or(0)
    }

    /// The text with markers expanded, joined by real newlines
    pub fn as_text(&self) -> String {
        self.lines.join("\n")
    }
}

impl fmt::Display for Display {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_line() {
        let d = Display::from_source("My Display");
        assert_eq!(d.line_count(), 1);
        assert_eq!(d.as_text(), "My Display");
    }

    #[test]
    fn test_newline_markers_expand() {
        let d = Display::from_source("first\\nsecond\\nthird");
        assert_eq!(d.line_count(), 3);
        assert_eq!(d.lines()[1], "second");
        assert_eq!(d.as_text(), "first\nsecond\nthird");
    }

    #[test]
    fn test_width_is_widest_line() {
        let d = Display::from_source("ab\\nlonger line\\nc");
        assert_eq!(d.width(), "longer line".len());
    }

    #[test]
    fn test_width_counts_wide_glyphs() {
        let d = Display::from_source("日本");
        assert_eq!(d.width(), 4);
    }
}
