//! Hyperlink construction for diagram entities
//!
//! A `[[...]]` clause attaches a link to an entity. The inner text supports
//! `link`, `link{tooltip}` and `link label` forms. Relative links are
//! prefixed with the diagram's configured `topurl` base.

use crate::core::DiagramError;

/// A hyperlink attached to a diagram element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Url {
    link: String,
    tooltip: Option<String>,
    label: Option<String>,
}

impl Url {
    pub fn link(&self) -> &str {
        &self.link
    }

    pub fn tooltip(&self) -> Option<&str> {
        self.tooltip.as_deref()
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

/// How strictly url text is validated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlMode {
    /// The link part must be a single non-empty token
    Strict,
    /// Whatever text is present becomes the link
    Relaxed,
}

/// Builds [`Url`] values honoring a configured base url
#[derive(Debug, Clone)]
pub struct UrlBuilder {
    top_url: Option<String>,
    mode: UrlMode,
}

impl UrlBuilder {
    pub fn new(top_url: Option<&str>, mode: UrlMode) -> Self {
        Self {
            top_url: top_url.map(|s| s.to_string()),
            mode,
        }
    }

    /// Build a url from the inner text of a `[[...]]` clause
    pub fn build(&self, raw: &str) -> Result<Url, DiagramError> {
        let text = raw.trim();
        if text.is_empty() {
            return Err(DiagramError::malformed_url(raw));
        }

        // link{tooltip} label
        let (head, tooltip, tail) = match (text.find('{'), text.find('}')) {
            (Some(open), Some(close)) if open < close => (
                text[..open].trim_end().to_string(),
                Some(text[open + 1..close].to_string()),
                text[close + 1..].trim().to_string(),
            ),
            (None, None) => (text.to_string(), None, String::new()),
            _ => return Err(DiagramError::malformed_url(raw)),
        };

        let (link, label) = if tooltip.is_some() {
            (head, tail)
        } else {
            match head.split_once(char::is_whitespace) {
                Some((link, label)) => (link.to_string(), label.trim().to_string()),
                None => (head, String::new()),
            }
        };

        if link.is_empty() || (self.mode == UrlMode::Strict && link.contains(char::is_whitespace)) {
            return Err(DiagramError::malformed_url(raw));
        }

        Ok(Url {
            link: self.qualify(&link),
            tooltip,
            label: if label.is_empty() { None } else { Some(label) },
        })
    }

    // Prefix relative links with the configured base
    fn qualify(&self, link: &str) -> String {
        let absolute = link.contains("://") || link.starts_with('/') || link.starts_with('#');
        match (&self.top_url, absolute) {
            (Some(base), false) => format!("{}{}", base, link),
            _ => link.to_string(),
        }
    }
}
