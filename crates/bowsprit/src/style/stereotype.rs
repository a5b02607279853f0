//! Stereotype parsing
//!
//! A stereotype clause is the raw `<<...>>` source text. Building a
//! structured stereotype snapshots the diagram's circled-character radius and
//! font so later skin changes do not retroactively restyle earlier entities.

use crate::core::DiagramError;
use crate::style::{Color, ColorPalette, FontConfiguration, Theme};

/// The circled-character part of a stereotype, e.g. `(C,#ADD1B2)`
#[derive(Debug, Clone, PartialEq)]
pub struct CircledCharacter {
    pub character: char,
    pub color: Color,
    pub radius: u32,
    pub font: FontConfiguration,
}

/// A structured stereotype built from raw `<<...>>` text
#[derive(Debug, Clone, PartialEq)]
pub struct Stereotype {
    raw: String,
    label: Option<String>,
    circled: Option<CircledCharacter>,
}

impl Stereotype {
    /// Parse raw stereotype text into its structured form
    ///
    /// `raw` includes the `<<` / `>>` delimiters. The inner text is an
    /// optional circled-character spec `(C,#color)` followed by an optional
    /// label. An unknown circle color is an error.
    pub fn build(
        raw: &str,
        radius: u32,
        font: FontConfiguration,
        palette: &ColorPalette,
        theme: Theme,
    ) -> Result<Self, DiagramError> {
        let inner = raw
            .trim()
            .trim_start_matches('<')
            .trim_end_matches('>')
            .trim();

        let (circled, rest) = match Self::split_circled_spec(inner) {
            Some((spec, rest)) => {
                let (character, color_spec) = spec;
                let color = palette.resolve(theme, &color_spec)?;
                (
                    Some(CircledCharacter {
                        character,
                        color,
                        radius,
                        font,
                    }),
                    rest,
                )
            }
            None => (None, inner.to_string()),
        };

        let label = rest.trim();
        Ok(Self {
            raw: raw.to_string(),
            label: if label.is_empty() {
                None
            } else {
                Some(label.to_string())
            },
            circled,
        })
    }

    // `(C,#ADD1B2) rest` -> ((char, color spec), rest)
    fn split_circled_spec(inner: &str) -> Option<((char, String), String)> {
        let body = inner.strip_prefix('(')?;
        let close = body.find(')')?;
        let spec = &body[..close];
        let rest = body[close + 1..].to_string();
        let (ch, color) = spec.split_once(',')?;
        let character = ch.trim().chars().next()?;
        Some(((character, color.trim().to_string()), rest))
    }

    /// The raw `<<...>>` source text
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn circled(&self) -> Option<&CircledCharacter> {
        self.circled.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(raw: &str) -> Stereotype {
        Stereotype::build(
            raw,
            11,
            FontConfiguration::new("Monospaced", 17),
            &ColorPalette::new(),
            Theme::Light,
        )
        .unwrap()
    }

    #[test]
    fn test_plain_label() {
        let s = build("<<entity>>");
        assert_eq!(s.raw(), "<<entity>>");
        assert_eq!(s.label(), Some("entity"));
        assert!(s.circled().is_none());
    }

    #[test]
    fn test_circled_character_with_label() {
        let s = build("<<(C,#ADD1B2) table>>");
        let circled = s.circled().unwrap();
        assert_eq!(circled.character, 'C');
        assert_eq!(circled.color.as_hex(), "#ADD1B2");
        assert_eq!(circled.radius, 11);
        assert_eq!(s.label(), Some("table"));
    }

    #[test]
    fn test_circled_character_only() {
        let s = build("<<(E,orange)>>");
        assert_eq!(s.circled().unwrap().character, 'E');
        assert!(s.label().is_none());
    }

    #[test]
    fn test_unknown_circle_color_fails() {
        let result = Stereotype::build(
            "<<(C,#nocolor) x>>",
            11,
            FontConfiguration::new("Monospaced", 17),
            &ColorPalette::new(),
            Theme::Light,
        );
        assert!(matches!(result, Err(DiagramError::UnknownColor { .. })));
    }

    #[test]
    fn test_malformed_circle_spec_degrades_to_label() {
        // No comma inside the parens: treated as ordinary label text
        let s = build("<<(weird)>>");
        assert!(s.circled().is_none());
        assert_eq!(s.label(), Some("(weird)"));
    }
}
