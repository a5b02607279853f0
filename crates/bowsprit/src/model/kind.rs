//! Classifier kinds and the retype compatibility table

use std::fmt;

/// The declared UML element category of a leaf entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassifierKind {
    Interface,
    Enum,
    Annotation,
    AbstractClass,
    Class,
    Entity,
    Circle,
    Diamond,
    Protocol,
    Struct,
}

impl ClassifierKind {
    /// All kinds, in grammar keyword order
    pub const ALL: [ClassifierKind; 10] = [
        ClassifierKind::Interface,
        ClassifierKind::Enum,
        ClassifierKind::Annotation,
        ClassifierKind::AbstractClass,
        ClassifierKind::Class,
        ClassifierKind::Entity,
        ClassifierKind::Circle,
        ClassifierKind::Diamond,
        ClassifierKind::Protocol,
        ClassifierKind::Struct,
    ];

    /// The source keyword for this kind
    pub fn keyword(self) -> &'static str {
        match self {
            ClassifierKind::Interface => "interface",
            ClassifierKind::Enum => "enum",
            ClassifierKind::Annotation => "annotation",
            ClassifierKind::AbstractClass => "abstract class",
            ClassifierKind::Class => "class",
            ClassifierKind::Entity => "entity",
            ClassifierKind::Circle => "circle",
            ClassifierKind::Diamond => "diamond",
            ClassifierKind::Protocol => "protocol",
            ClassifierKind::Struct => "struct",
        }
    }

    /// Normalize a kind token to its enumeration value
    ///
    /// Case-insensitive; internal whitespace in `abstract class` may be any
    /// run of blanks. A bare `abstract` maps to [`ClassifierKind::AbstractClass`].
    pub fn from_token(token: &str) -> Option<Self> {
        let lowered = token.to_lowercase();
        let mut words = lowered.split_whitespace();
        let first = words.next()?;
        let second = words.next();
        if words.next().is_some() {
            return None;
        }
        match (first, second) {
            ("interface", None) => Some(ClassifierKind::Interface),
            ("enum", None) => Some(ClassifierKind::Enum),
            ("annotation", None) => Some(ClassifierKind::Annotation),
            ("abstract", None) => Some(ClassifierKind::AbstractClass),
            ("abstract", Some("class")) => Some(ClassifierKind::AbstractClass),
            ("class", None) => Some(ClassifierKind::Class),
            ("entity", None) => Some(ClassifierKind::Entity),
            ("circle", None) => Some(ClassifierKind::Circle),
            ("diamond", None) => Some(ClassifierKind::Diamond),
            ("protocol", None) => Some(ClassifierKind::Protocol),
            ("struct", None) => Some(ClassifierKind::Struct),
            _ => None,
        }
    }

    /// Whether an entity of this kind may be retyped to `target`
    ///
    /// The relation is an explicit table so every pair is auditable. The
    /// class family (class, abstract class, interface, enum, annotation,
    /// entity, protocol, struct) is freely interchangeable: a later
    /// declaration refines an earlier one. Circle and diamond carry
    /// relationship-marker semantics and accept no kind change at all.
    pub fn can_mute_to(self, target: ClassifierKind) -> bool {
        use ClassifierKind::*;
        match (self, target) {
            (a, b) if a == b => true,
            (Circle, _) | (_, Circle) => false,
            (Diamond, _) | (_, Diamond) => false,
            (
                Class | AbstractClass | Interface | Enum | Annotation | Entity | Protocol | Struct,
                Class | AbstractClass | Interface | Enum | Annotation | Entity | Protocol | Struct,
            ) => true,
        }
    }
}

impl fmt::Display for ClassifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.keyword())
    }
}
