//! Leaf entities: the atomic nodes of a class diagram

use crate::core::LineLocation;
use crate::model::{ClassifierKind, Display};
use crate::style::{Colors, Stereotype};
use crate::url::Url;
use std::collections::BTreeSet;
use std::fmt;

/// Kind of a directed relationship edge recorded on an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationKind {
    Extends,
    Implements,
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelationKind::Extends => write!(f, "extends"),
            RelationKind::Implements => write!(f, "implements"),
        }
    }
}

/// An outgoing relationship edge from an entity to a target code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relation {
    pub kind: RelationKind,
    pub target: String,
}

/// An atomic (non-composite) diagram node
///
/// Created on first declaration of its identity; every later declaration of
/// the same identity mutates it in place. Decorations accumulate; the kind
/// may only change through [`LeafEntity::mute_to_kind`].
#[derive(Debug, Clone)]
pub struct LeafEntity {
    ident: String,
    code: String,
    display: Display,
    kind: ClassifierKind,
    stereotype: Option<Stereotype>,
    stereostyle: Option<String>,
    generic: Option<String>,
    urls: Vec<Url>,
    location: Option<LineLocation>,
    colors: Colors,
    tags: BTreeSet<String>,
    relations: Vec<Relation>,
}

impl LeafEntity {
    pub fn new(
        ident: impl Into<String>,
        code: impl Into<String>,
        display: Display,
        kind: ClassifierKind,
    ) -> Self {
        Self {
            ident: ident.into(),
            code: code.into(),
            display,
            kind,
            stereotype: None,
            stereostyle: None,
            generic: None,
            urls: Vec::new(),
            location: None,
            colors: Colors::empty(),
            tags: BTreeSet::new(),
            relations: Vec::new(),
        }
    }

    /// Long identifier
    pub fn ident(&self) -> &str {
        &self.ident
    }

    /// Storage code (equals the ident under modern addressing)
    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn display(&self) -> &Display {
        &self.display
    }

    pub fn kind(&self) -> ClassifierKind {
        self.kind
    }

    /// Attempt to retype this entity in place
    ///
    /// Returns false (and leaves the entity untouched) when the pair fails
    /// the compatibility table.
    pub fn mute_to_kind(&mut self, kind: ClassifierKind) -> bool {
        if self.kind.can_mute_to(kind) {
            self.kind = kind;
            true
        } else {
            false
        }
    }

    pub fn stereotype(&self) -> Option<&Stereotype> {
        self.stereotype.as_ref()
    }

    pub fn set_stereotype(&mut self, stereotype: Stereotype) {
        self.stereotype = Some(stereotype);
    }

    /// Raw stereotype style text, stored separately from the parsed form
    pub fn stereostyle(&self) -> Option<&str> {
        self.stereostyle.as_deref()
    }

    pub fn set_stereostyle(&mut self, raw: impl Into<String>) {
        self.stereostyle = Some(raw.into());
    }

    pub fn generic(&self) -> Option<&str> {
        self.generic.as_deref()
    }

    pub fn set_generic(&mut self, generic: impl Into<String>) {
        self.generic = Some(generic.into());
    }

    pub fn urls(&self) -> &[Url] {
        &self.urls
    }

    pub fn add_url(&mut self, url: Url) {
        self.urls.push(url);
    }

    pub fn location(&self) -> Option<&LineLocation> {
        self.location.as_ref()
    }

    pub fn set_location(&mut self, location: LineLocation) {
        self.location = Some(location);
    }

    pub fn colors(&self) -> &Colors {
        &self.colors
    }

    pub fn set_colors(&mut self, colors: Colors) {
        self.colors = colors;
    }

    pub fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    /// Register a free-form tag; tags accumulate across declarations
    pub fn add_tag(&mut self, tag: impl Into<String>) {
        self.tags.insert(tag.into());
    }

    pub fn relations(&self) -> &[Relation] {
        &self.relations
    }

    pub fn add_relation(&mut self, kind: RelationKind, target: impl Into<String>) {
        self.relations.push(Relation {
            kind,
            target: target.into(),
        });
    }

    /// Targets of outgoing edges of one relation kind
    pub fn relation_targets(&self, kind: RelationKind) -> impl Iterator<Item = &str> {
        self.relations
            .iter()
            .filter(move |r| r.kind == kind)
            .map(|r| r.target.as_str())
    }
}
