//! Color specifications and the mergeable entity color set
//!
//! A color clause on a declaration line touches one channel (fill or line),
//! plus the legacy stroke-style keyword. Channels merge in a fixed order and
//! later merges override earlier ones on the same channel only.

use crate::core::DiagramError;
use crate::style::Theme;
use std::fmt;
use std::str::FromStr;

/// A resolved color, canonical `#RRGGBB` form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Color {
    hex: String,
    name: Option<&'static str>,
}

impl Color {
    fn named(name: &'static str, hex: &str) -> Self {
        Self {
            hex: hex.to_string(),
            name: Some(name),
        }
    }

    fn hex(hex: String) -> Self {
        Self { hex, name: None }
    }

    /// Canonical `#RRGGBB` value
    pub fn as_hex(&self) -> &str {
        &self.hex
    }

    /// The palette name this color resolved from, if any
    pub fn name(&self) -> Option<&'static str> {
        self.name
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name {
            Some(name) => write!(f, "{}", name),
            None => write!(f, "{}", self.hex),
        }
    }
}

/// The channel a color applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorChannel {
    /// Fill / background
    Back,
    /// Outline
    Line,
}

/// Legacy stroke-style keyword from the `##[style]color` clause
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrokeStyle {
    Dotted,
    Dashed,
    Bold,
}

impl FromStr for StrokeStyle {
    type Err = DiagramError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dotted" => Ok(StrokeStyle::Dotted),
            "dashed" => Ok(StrokeStyle::Dashed),
            "bold" => Ok(StrokeStyle::Bold),
            other => Err(DiagramError::unknown_color(format!(
                "unsupported stroke style: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for StrokeStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrokeStyle::Dotted => write!(f, "dotted"),
            StrokeStyle::Dashed => write!(f, "dashed"),
            StrokeStyle::Bold => write!(f, "bold"),
        }
    }
}

/// Ordered, mergeable channel -> color collection for one entity
///
/// Stored as the applied override sequence, not a map, so precedence stays
/// explicit: `get` answers with the latest entry for a channel.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Colors {
    entries: Vec<(ColorChannel, Color)>,
    stroke: Option<StrokeStyle>,
}

impl Colors {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Append a channel override; later entries win on the same channel
    pub fn add(mut self, channel: ColorChannel, color: Color) -> Self {
        self.entries.push((channel, color));
        self
    }

    /// Record the legacy stroke-style keyword
    pub fn add_legacy_stroke(mut self, style: StrokeStyle) -> Self {
        self.stroke = Some(style);
        self
    }

    /// Latest color for a channel, if any
    pub fn get(&self, channel: ColorChannel) -> Option<&Color> {
        self.entries
            .iter()
            .rev()
            .find(|(c, _)| *c == channel)
            .map(|(_, color)| color)
    }

    pub fn stroke(&self) -> Option<StrokeStyle> {
        self.stroke
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.stroke.is_none()
    }
}

/// Named color table plus hex parsing
///
/// Unknown names are reported as errors and propagate out of the command
/// unchanged.
#[derive(Debug, Clone, Default)]
pub struct ColorPalette;

const NAMED_COLORS: &[(&str, &str)] = &[
    ("black", "#000000"),
    ("white", "#FFFFFF"),
    ("red", "#FF0000"),
    ("green", "#008000"),
    ("blue", "#0000FF"),
    ("yellow", "#FFFF00"),
    ("orange", "#FFA500"),
    ("pink", "#FFC0CB"),
    ("purple", "#800080"),
    ("brown", "#A52A2A"),
    ("cyan", "#00FFFF"),
    ("magenta", "#FF00FF"),
    ("gray", "#808080"),
    ("grey", "#808080"),
    ("lightgray", "#D3D3D3"),
    ("lightgrey", "#D3D3D3"),
    ("lightblue", "#ADD8E6"),
    ("lightgreen", "#90EE90"),
    ("lightyellow", "#FFFFE0"),
    ("gold", "#FFD700"),
    ("silver", "#C0C0C0"),
    ("navy", "#000080"),
    ("teal", "#008080"),
    ("olive", "#808000"),
    ("maroon", "#800000"),
    ("violet", "#EE82EE"),
    ("salmon", "#FA8072"),
    ("khaki", "#F0E68C"),
];

impl ColorPalette {
    pub fn new() -> Self {
        Self
    }

    /// Resolve a color spec: a palette name or a `RRGGBB` / `RGB` hex value,
    /// with or without a leading `#`.
    ///
    /// Dark themes swap black and white so legacy monochrome diagrams stay
    /// readable.
    pub fn resolve(&self, theme: Theme, spec: &str) -> Result<Color, DiagramError> {
        let bare = spec.strip_prefix('#').unwrap_or(spec);
        if bare.is_empty() {
            return Err(DiagramError::unknown_color(spec));
        }
        if bare.chars().all(|c| c.is_ascii_hexdigit()) && (bare.len() == 6 || bare.len() == 3) {
            return Ok(Color::hex(Self::canonical_hex(bare)));
        }
        let mut lookup = bare.to_lowercase();
        if theme == Theme::Dark {
            lookup = match lookup.as_str() {
                "black" => "white".to_string(),
                "white" => "black".to_string(),
                other => other.to_string(),
            };
        }
        NAMED_COLORS
            .iter()
            .find(|(name, _)| *name == lookup)
            .map(|(name, hex)| Color::named(name, hex))
            .ok_or_else(|| DiagramError::unknown_color(bare))
    }

    fn canonical_hex(bare: &str) -> String {
        let upper = bare.to_uppercase();
        if upper.len() == 3 {
            let mut out = String::with_capacity(7);
            out.push('#');
            for c in upper.chars() {
                out.push(c);
                out.push(c);
            }
            out
        } else {
            format!("#{}", upper)
        }
    }
}
