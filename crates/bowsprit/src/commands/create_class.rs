//! The classifier declaration command
//!
//! Applies one matched declaration line to the diagram: creates or retypes
//! the named entity, then layers decorations on it in a fixed order, then
//! registers `extends` / `implements` targets, forward-declaring any target
//! not yet seen.

use crate::commands::grammar::{
    parse_declaration, split_code_list, strip_code_markers, ClassDeclaration,
};
use crate::core::{Command, DiagramError, LineLocation};
use crate::model::{ClassDiagram, ClassifierKind, Display, RelationKind};
use crate::style::{ColorChannel, Colors, FontParam, Stereotype, StrokeStyle};
use crate::url::{Url, UrlBuilder, UrlMode};
use tracing::debug;

pub struct CreateClassCommand;

impl Command for CreateClassCommand {
    fn name(&self) -> &'static str {
        "create_class"
    }

    fn matches(&self, line: &str) -> bool {
        parse_declaration(line).is_some()
    }

    fn execute(
        &self,
        diagram: &mut ClassDiagram,
        location: LineLocation,
        line: &str,
    ) -> Result<(), DiagramError> {
        // matches() ran first; a non-declaration line here is a processor bug
        let decl = parse_declaration(line).ok_or_else(|| {
            DiagramError::command_error("declaration grammar rejected line", location.line)
        })?;
        let fields = decl.fields();

        // Resolve every skin-dependent input before touching the entity, so
        // a bad color or url leaves the diagram unchanged.
        let stereotype = self.build_stereotype(diagram, &decl)?;
        let url = self.build_url(diagram, &decl)?;
        let colors = self.build_colors(diagram, &decl)?;

        let key = diagram.resolve_key(&fields.code);
        let ident = diagram.build_leaf_ident(&fields.code);

        if diagram.leaf_exists(&key) {
            // leaf_exists holds, the lookup cannot miss
            if let Some(entity) = diagram.leaf_mut(&key) {
                let existing = entity.kind();
                if !entity.mute_to_kind(decl.kind) {
                    return Err(DiagramError::command_error(
                        format!(
                            "cannot redeclare {} as {}: incompatible with existing {}",
                            fields.code, decl.kind, existing
                        ),
                        location.line,
                    ));
                }
                debug!(code = %fields.code, from = %existing, to = %decl.kind, "retyped entity");
            }
        } else {
            diagram.create_leaf(
                key.clone(),
                ident.clone(),
                Display::from_source(&fields.display),
                decl.kind,
            );
            debug!(code = %fields.code, kind = %decl.kind, "created entity");
        }

        self.decorate(
            diagram,
            &key,
            &ident,
            &decl,
            &fields.generic,
            stereotype,
            url,
            colors,
            location,
        );

        if let Some(raw) = &decl.extends {
            self.register_targets(diagram, &key, decl.kind, RelationKind::Extends, raw);
        }
        if let Some(raw) = &decl.implements {
            self.register_targets(diagram, &key, decl.kind, RelationKind::Implements, raw);
        }
        Ok(())
    }
}

impl CreateClassCommand {
    fn build_stereotype(
        &self,
        diagram: &ClassDiagram,
        decl: &ClassDeclaration,
    ) -> Result<Option<Stereotype>, DiagramError> {
        let skin = diagram.skin();
        decl.stereotype
            .as_deref()
            .map(|raw| {
                Stereotype::build(
                    raw,
                    skin.circled_character_radius(),
                    skin.font(FontParam::CircledCharacter),
                    skin.palette(),
                    skin.theme(),
                )
            })
            .transpose()
    }

    fn build_url(
        &self,
        diagram: &ClassDiagram,
        decl: &ClassDeclaration,
    ) -> Result<Option<Url>, DiagramError> {
        let builder = UrlBuilder::new(diagram.skin().value("topurl"), UrlMode::Strict);
        decl.url.as_deref().map(|raw| builder.build(raw)).transpose()
    }

    // Merge order: fill, then line, then the legacy stroke keyword.
    fn build_colors(
        &self,
        diagram: &ClassDiagram,
        decl: &ClassDeclaration,
    ) -> Result<Colors, DiagramError> {
        let skin = diagram.skin();
        let palette = skin.palette();
        let theme = skin.theme();
        let mut colors = Colors::empty();
        if let Some(spec) = &decl.back_color {
            colors = colors.add(ColorChannel::Back, palette.resolve(theme, spec)?);
        }
        if let Some(clause) = &decl.line_color {
            if let Some(spec) = &clause.color {
                colors = colors.add(ColorChannel::Line, palette.resolve(theme, spec)?);
            }
            if let Some(style) = &clause.style {
                colors = colors.add_legacy_stroke(style.parse::<StrokeStyle>()?);
            }
        }
        Ok(colors)
    }

    // Decoration order is observable through later overrides and must not
    // change: stereotype, stereostyle, generic, url, location, colors, tags.
    #[allow(clippy::too_many_arguments)]
    fn decorate(
        &self,
        diagram: &mut ClassDiagram,
        key: &str,
        ident: &str,
        decl: &ClassDeclaration,
        generic: &Option<String>,
        stereotype: Option<Stereotype>,
        url: Option<Url>,
        colors: Colors,
        location: LineLocation,
    ) {
        let entity = diagram.get_or_create_leaf(key, ident, decl.kind);
        if let Some(stereotype) = stereotype {
            entity.set_stereotype(stereotype);
        }
        if let Some(raw) = &decl.stereotype {
            entity.set_stereostyle(raw.clone());
        }
        if let Some(generic) = generic {
            entity.set_generic(generic.clone());
        }
        if let Some(url) = url {
            entity.add_url(url);
        }
        entity.set_location(location);
        if !colors.is_empty() {
            entity.set_colors(colors);
        }
        for tag in &decl.tags {
            entity.add_tag(tag.clone());
        }
    }

    // Forward-declare relationship targets so they exist before any later
    // line mentions them. An implements target is an interface; an extends
    // target takes the source's family: interface for interfaces, class
    // otherwise.
    fn register_targets(
        &self,
        diagram: &mut ClassDiagram,
        source_key: &str,
        source_kind: ClassifierKind,
        relation: RelationKind,
        raw: &str,
    ) {
        let target_kind = match relation {
            RelationKind::Implements => ClassifierKind::Interface,
            RelationKind::Extends => {
                if source_kind == ClassifierKind::Interface {
                    ClassifierKind::Interface
                } else {
                    ClassifierKind::Class
                }
            }
        };
        for target in split_code_list(raw) {
            let code = strip_code_markers(&target);
            let key = diagram.resolve_key(code);
            let ident = diagram.build_leaf_ident(code);
            diagram.get_or_create_leaf(&key, &ident, target_kind);
            debug!(source = %source_key, %relation, target = %key, "registered relation");
            if let Some(source) = diagram.leaf_mut(source_key) {
                source.add_relation(relation, key);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AddressingMode;

    fn apply(diagram: &mut ClassDiagram, line: &str) -> Result<(), DiagramError> {
        CreateClassCommand.execute(diagram, LineLocation::new(1), line)
    }

    fn diagram() -> ClassDiagram {
        ClassDiagram::new(AddressingMode::Modern)
    }

    #[test]
    fn test_creates_entity() {
        let mut d = diagram();
        apply(&mut d, "class Foo").unwrap();
        let e = d.leaf("Foo").unwrap();
        assert_eq!(e.kind(), ClassifierKind::Class);
        assert_eq!(e.display().as_text(), "Foo");
        assert_eq!(e.location().unwrap().line, 1);
    }

    #[test]
    fn test_redeclaration_retypes_and_accumulates() {
        let mut d = diagram();
        apply(&mut d, "class Foo $one").unwrap();
        apply(&mut d, "interface Foo $two").unwrap();
        assert_eq!(d.leaf_count(), 1);
        let e = d.leaf("Foo").unwrap();
        assert_eq!(e.kind(), ClassifierKind::Interface);
        assert_eq!(e.tags().len(), 2);
    }

    #[test]
    fn test_incompatible_retype_fails_and_preserves_kind() {
        let mut d = diagram();
        apply(&mut d, "circle Foo").unwrap();
        let err = apply(&mut d, "class Foo").unwrap_err();
        assert!(matches!(err, DiagramError::CommandError { .. }));
        assert_eq!(d.leaf("Foo").unwrap().kind(), ClassifierKind::Circle);
    }

    #[test]
    fn test_decorations_applied() {
        let mut d = diagram();
        apply(
            &mut d,
            "class Foo<T> <<entity>> $tag [[https://doc]] #red ##[dotted]blue",
        )
        .unwrap();
        let e = d.leaf("Foo").unwrap();
        assert_eq!(e.generic(), Some("T"));
        assert_eq!(e.stereotype().unwrap().label(), Some("entity"));
        assert_eq!(e.stereostyle(), Some("<<entity>>"));
        assert_eq!(e.urls()[0].link(), "https://doc");
        assert!(e.tags().contains("tag"));
        let colors = e.colors();
        assert_eq!(colors.get(ColorChannel::Back).unwrap().as_hex(), "#FF0000");
        assert_eq!(colors.get(ColorChannel::Line).unwrap().as_hex(), "#0000FF");
        assert_eq!(colors.stroke(), Some(StrokeStyle::Dotted));
    }

    #[test]
    fn test_unknown_color_leaves_diagram_unchanged() {
        let mut d = diagram();
        let err = apply(&mut d, "class Foo #notacolor").unwrap_err();
        assert!(matches!(err, DiagramError::UnknownColor { .. }));
        assert_eq!(d.leaf_count(), 0);
    }

    #[test]
    fn test_extends_forward_declares_class_target() {
        let mut d = diagram();
        apply(&mut d, "class Foo extends Bar, Baz").unwrap();
        assert_eq!(d.leaf_count(), 3);
        assert_eq!(d.leaf("Bar").unwrap().kind(), ClassifierKind::Class);
        let targets: Vec<_> = d
            .leaf("Foo")
            .unwrap()
            .relation_targets(RelationKind::Extends)
            .collect();
        assert_eq!(targets, vec!["Bar", "Baz"]);
    }

    #[test]
    fn test_interface_extends_interface_targets() {
        let mut d = diagram();
        apply(&mut d, "interface I1 extends I2").unwrap();
        assert_eq!(d.leaf("I2").unwrap().kind(), ClassifierKind::Interface);
    }

    #[test]
    fn test_implements_forward_declares_interface_targets() {
        let mut d = diagram();
        apply(&mut d, "class Foo implements I1").unwrap();
        assert_eq!(d.leaf("I1").unwrap().kind(), ClassifierKind::Interface);
    }

    #[test]
    fn test_forward_declared_target_keeps_later_declaration() {
        let mut d = diagram();
        apply(&mut d, "class Foo extends Bar").unwrap();
        apply(&mut d, "abstract class Bar").unwrap();
        assert_eq!(d.leaf_count(), 2);
        assert_eq!(d.leaf("Bar").unwrap().kind(), ClassifierKind::AbstractClass);
    }

    #[test]
    fn test_legacy_mode_merges_dotted_paths() {
        let mut d = ClassDiagram::new(AddressingMode::Legacy);
        apply(&mut d, "class a.b.Foo").unwrap();
        apply(&mut d, "interface Foo").unwrap();
        assert_eq!(d.leaf_count(), 1);
        assert_eq!(d.leaf("Foo").unwrap().kind(), ClassifierKind::Interface);
    }

    #[test]
    fn test_modern_mode_keeps_dotted_paths_distinct() {
        let mut d = diagram();
        apply(&mut d, "class a.b.Foo").unwrap();
        apply(&mut d, "interface Foo").unwrap();
        assert_eq!(d.leaf_count(), 2);
    }

    #[test]
    fn test_topurl_prefixes_relative_urls() {
        let mut d = diagram();
        d.skin_mut().set_value("topurl", "https://wiki/");
        apply(&mut d, "class Foo [[Page]]").unwrap();
        assert_eq!(d.leaf("Foo").unwrap().urls()[0].link(), "https://wiki/Page");
    }

    #[test]
    fn test_quoted_display_splits_generic() {
        let mut d = diagram();
        apply(&mut d, "class \"List<T>\" as L<T2>").unwrap();
        let e = d.leaf("L").unwrap();
        assert_eq!(e.display().as_text(), "List");
        assert_eq!(e.generic(), Some("T"));
    }
}
