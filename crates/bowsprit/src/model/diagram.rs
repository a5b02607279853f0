//! The class diagram repository
//!
//! Holds leaf entities in insertion order, keyed by an identity derived from
//! the declared short code under one of two addressing modes. The mode is
//! fixed for the lifetime of the diagram; commands select the derivation
//! strategy once and never branch on the mode themselves.

use crate::model::{ClassifierKind, Display, LeafEntity};
use crate::style::SkinParam;
use std::collections::HashMap;

/// How short codes are turned into storage keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AddressingMode {
    /// The long identifier derived from the short code is both lookup key
    /// and stored identity: `a.b.Foo` and `Foo` are distinct entities.
    #[default]
    Modern,
    /// Historical scheme: a separate code, the short code with any dotted
    /// namespace path collapsed to its last segment, is the lookup key.
    /// `a.b.Foo` and `Foo` address the same entity.
    Legacy,
}

impl AddressingMode {
    /// Derive the mode-specific storage key from a short code
    pub fn key_for(&self, diagram: &ClassDiagram, short_code: &str) -> String {
        match self {
            AddressingMode::Modern => diagram.build_leaf_ident(short_code),
            AddressingMode::Legacy => diagram.build_code(short_code),
        }
    }
}

/// Repository of leaf entities plus per-diagram configuration
#[derive(Debug, Default)]
pub struct ClassDiagram {
    mode: AddressingMode,
    leaves: Vec<LeafEntity>,
    index: HashMap<String, usize>,
    skin: SkinParam,
}

impl ClassDiagram {
    pub fn new(mode: AddressingMode) -> Self {
        Self {
            mode,
            leaves: Vec::new(),
            index: HashMap::new(),
            skin: SkinParam::new(),
        }
    }

    pub fn mode(&self) -> AddressingMode {
        self.mode
    }

    pub fn skin(&self) -> &SkinParam {
        &self.skin
    }

    pub fn skin_mut(&mut self) -> &mut SkinParam {
        &mut self.skin
    }

    /// The long identifier for a short code: the code as written
    pub fn build_leaf_ident(&self, short_code: &str) -> String {
        short_code.to_string()
    }

    /// The legacy code for a short code: dotted paths collapse to the bare
    /// trailing segment
    pub fn build_code(&self, short_code: &str) -> String {
        match short_code.rsplit_once('.') {
            Some((_, last)) if !last.is_empty() => last.to_string(),
            _ => short_code.to_string(),
        }
    }

    /// The storage key for a short code under this diagram's addressing mode
    pub fn resolve_key(&self, short_code: &str) -> String {
        self.mode.key_for(self, short_code)
    }

    /// Whether an entity exists at a storage key
    pub fn leaf_exists(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn leaf(&self, key: &str) -> Option<&LeafEntity> {
        self.index.get(key).map(|&i| &self.leaves[i])
    }

    pub fn leaf_mut(&mut self, key: &str) -> Option<&mut LeafEntity> {
        self.index.get(key).copied().map(|i| &mut self.leaves[i])
    }

    /// Create a new entity at a key; the key must be vacant
    pub fn create_leaf(
        &mut self,
        key: impl Into<String>,
        ident: impl Into<String>,
        display: Display,
        kind: ClassifierKind,
    ) -> &mut LeafEntity {
        let key = key.into();
        let position = *self.index.entry(key.clone()).or_insert_with(|| {
            self.leaves
                .push(LeafEntity::new(ident.into(), key, display, kind));
            self.leaves.len() - 1
        });
        &mut self.leaves[position]
    }

    /// Fetch the entity at a key, creating it with the given kind and the
    /// short code as display text when absent
    pub fn get_or_create_leaf(
        &mut self,
        key: &str,
        ident: &str,
        kind: ClassifierKind,
    ) -> &mut LeafEntity {
        if !self.leaf_exists(key) {
            let display = Display::from_source(ident);
            return self.create_leaf(key.to_string(), ident.to_string(), display, kind);
        }
        // Key is present, the index lookup cannot miss
        let position = self.index[key];
        &mut self.leaves[position]
    }

    /// Leaves in insertion order
    pub fn leaves(&self) -> impl Iterator<Item = &LeafEntity> {
        self.leaves.iter()
    }

    pub fn leaf_count(&self) -> usize {
        self.leaves.len()
    }

    /// Total outgoing relationship edges across all leaves
    pub fn relation_count(&self) -> usize {
        self.leaves.iter().map(|l| l.relations().len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modern_key_is_long_ident() {
        let diagram = ClassDiagram::new(AddressingMode::Modern);
        assert_eq!(diagram.resolve_key("a.b.Foo"), "a.b.Foo");
        assert_eq!(diagram.resolve_key("Foo"), "Foo");
    }

    #[test]
    fn test_legacy_key_collapses_dotted_path() {
        let diagram = ClassDiagram::new(AddressingMode::Legacy);
        assert_eq!(diagram.resolve_key("a.b.Foo"), "Foo");
        assert_eq!(diagram.resolve_key("Foo"), "Foo");
    }

    #[test]
    fn test_create_and_lookup() {
        let mut diagram = ClassDiagram::new(AddressingMode::Modern);
        diagram.create_leaf(
            "Foo",
            "Foo",
            Display::from_source("Foo"),
            ClassifierKind::Class,
        );
        assert!(diagram.leaf_exists("Foo"));
        assert!(!diagram.leaf_exists("Bar"));
        assert_eq!(diagram.leaf("Foo").unwrap().kind(), ClassifierKind::Class);
        assert_eq!(diagram.leaf_count(), 1);
    }

    #[test]
    fn test_get_or_create_is_idempotent() {
        let mut diagram = ClassDiagram::new(AddressingMode::Modern);
        diagram.get_or_create_leaf("Foo", "Foo", ClassifierKind::Interface);
        diagram.get_or_create_leaf("Foo", "Foo", ClassifierKind::Class);
        assert_eq!(diagram.leaf_count(), 1);
        // The second call must not retype
        assert_eq!(
            diagram.leaf("Foo").unwrap().kind(),
            ClassifierKind::Interface
        );
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut diagram = ClassDiagram::new(AddressingMode::Modern);
        for name in ["C", "A", "B"] {
            diagram.get_or_create_leaf(name, name, ClassifierKind::Class);
        }
        let order: Vec<_> = diagram.leaves().map(|l| l.code().to_string()).collect();
        assert_eq!(order, vec!["C", "A", "B"]);
    }
}
