//! bowsprit: a class diagram declaration parser and model builder
//!
//! Parses single-line classifier declarations (`class Foo extends Bar`,
//! `interface "Display" as I1 <<entity>>`, ...) and applies them to an
//! in-memory diagram model. Declarations are idempotent on identity:
//! redeclaring a name mutates the existing entity in place, accumulating
//! decorations and retyping it when the kind pair is compatible.
//!
//! # Quick start
//!
//! ```
//! let diagram = bowsprit::process("class Foo extends Bar")?;
//! assert_eq!(diagram.leaf_count(), 2);
//!
//! let foo = diagram.leaf("Foo").unwrap();
//! assert_eq!(foo.kind(), bowsprit::model::ClassifierKind::Class);
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! The [`commands::LineProcessor`] drives multi-line input; [`process`] and
//! [`process_with_mode`] are the convenience entry points.

pub mod commands;
pub mod core;
pub mod model;
pub mod style;
pub mod url;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

use anyhow::Context;

pub use crate::core::DiagramError;
pub use crate::model::{AddressingMode, ClassDiagram};

/// Process class diagram source under the default (modern) addressing mode
pub fn process(input: &str) -> anyhow::Result<ClassDiagram> {
    process_with_mode(input, AddressingMode::default())
}

/// Process class diagram source under an explicit addressing mode
pub fn process_with_mode(input: &str, mode: AddressingMode) -> anyhow::Result<ClassDiagram> {
    commands::LineProcessor::new()
        .process_with_mode(input, mode)
        .context("failed to process class diagram source")
}

/// Convenience re-exports for library consumers
pub mod prelude {
    pub use crate::commands::LineProcessor;
    pub use crate::core::{Command, DiagramError, LineLocation};
    pub use crate::model::{
        AddressingMode, ClassDiagram, ClassifierKind, Display, LeafEntity, Relation, RelationKind,
    };
    pub use crate::style::{ColorChannel, Colors, SkinParam, Stereotype, StrokeStyle, Theme};
    pub use crate::url::{Url, UrlBuilder, UrlMode};
    pub use crate::{process, process_with_mode};
}
