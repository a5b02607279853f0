//! Style parameters for a diagram instance
//!
//! A [`SkinParam`] travels with every diagram: fonts, theme, the
//! circled-character radius used by stereotype rendering, the color palette,
//! and free-form configuration values such as `topurl`.

mod color;
mod stereotype;

pub use color::*;
pub use stereotype::*;

use std::collections::HashMap;

/// Color theme of the diagram
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Which element a font configuration applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontParam {
    /// The single character inside a stereotype circle
    CircledCharacter,
    /// Entity display names
    ClassName,
    /// Generic parameter suffixes
    Generic,
}

/// A concrete font choice
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontConfiguration {
    pub family: String,
    pub size: u32,
    pub bold: bool,
    pub italic: bool,
}

impl FontConfiguration {
    pub fn new(family: impl Into<String>, size: u32) -> Self {
        Self {
            family: family.into(),
            size,
            bold: false,
            italic: false,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }
}

/// Per-diagram style parameters
#[derive(Debug, Clone)]
pub struct SkinParam {
    values: HashMap<String, String>,
    fonts: HashMap<FontParam, FontConfiguration>,
    theme: Theme,
    circled_character_radius: u32,
    palette: ColorPalette,
}

impl SkinParam {
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
            fonts: HashMap::new(),
            theme: Theme::Light,
            circled_character_radius: 11,
            palette: ColorPalette::new(),
        }
    }

    /// Free-form configuration value (e.g. `topurl`)
    pub fn value(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn set_value(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Font for an element, falling back to the built-in defaults
    pub fn font(&self, param: FontParam) -> FontConfiguration {
        if let Some(font) = self.fonts.get(&param) {
            return font.clone();
        }
        match param {
            FontParam::CircledCharacter => FontConfiguration::new("Monospaced", 17).bold(),
            FontParam::ClassName => FontConfiguration::new("SansSerif", 14),
            FontParam::Generic => FontConfiguration::new("SansSerif", 11).italic(),
        }
    }

    pub fn set_font(&mut self, param: FontParam, font: FontConfiguration) {
        self.fonts.insert(param, font);
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    pub fn circled_character_radius(&self) -> u32 {
        self.circled_character_radius
    }

    pub fn set_circled_character_radius(&mut self, radius: u32) {
        self.circled_character_radius = radius;
    }

    pub fn palette(&self) -> &ColorPalette {
        &self.palette
    }
}

impl Default for SkinParam {
    fn default() -> Self {
        Self::new()
    }
}
