//! Property-based tests over generated declaration lines

use bowsprit::prelude::*;
use proptest::prelude::*;

fn code_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9_]{0,15}"
}

fn kind_strategy() -> impl Strategy<Value = ClassifierKind> {
    prop::sample::select(ClassifierKind::ALL.to_vec())
}

proptest! {
    #[test]
    fn any_bare_declaration_creates_one_entity(code in code_strategy(), kind in kind_strategy()) {
        // `as` is the infix keyword of the name grammar, not a usable code
        prop_assume!(code != "as");
        let line = format!("{} {}", kind.keyword(), code);
        let diagram = process(&line).unwrap();
        prop_assert_eq!(diagram.leaf_count(), 1);
        let entity = diagram.leaf(&code).unwrap();
        prop_assert_eq!(entity.kind(), kind);
        prop_assert_eq!(entity.display().as_text(), code.clone());
    }

    #[test]
    fn redeclaration_never_duplicates(code in code_strategy(), a in kind_strategy(), b in kind_strategy()) {
        prop_assume!(code != "as");
        let source = format!("{} {}\n{} {}", a.keyword(), code, b.keyword(), code);
        match process(&source) {
            Ok(diagram) => {
                prop_assert_eq!(diagram.leaf_count(), 1);
                prop_assert_eq!(diagram.leaf(&code).unwrap().kind(), b);
            }
            Err(_) => {
                // rejected retype: the first declaration must still hold
                let diagram = process(&format!("{} {}", a.keyword(), code)).unwrap();
                prop_assert_eq!(diagram.leaf(&code).unwrap().kind(), a);
                prop_assert!(!a.can_mute_to(b));
            }
        }
    }

    #[test]
    fn retype_table_is_symmetric_for_the_class_family(a in kind_strategy(), b in kind_strategy()) {
        // markers reject both directions, family pairs accept both
        prop_assert_eq!(a.can_mute_to(b), b.can_mute_to(a));
    }

    #[test]
    fn extends_always_registers_every_target(
        code in code_strategy(),
        targets in prop::collection::vec(code_strategy(), 1..4),
    ) {
        prop_assume!(code != "as" && targets.iter().all(|t| t != "as" && *t != code));
        let mut unique = targets.clone();
        unique.sort();
        unique.dedup();
        let line = format!("class {} extends {}", code, targets.join(", "));
        let diagram = process(&line).unwrap();
        prop_assert_eq!(diagram.leaf_count(), 1 + unique.len());
        let edges: Vec<_> = diagram
            .leaf(&code)
            .unwrap()
            .relation_targets(RelationKind::Extends)
            .map(|t| t.to_string())
            .collect();
        prop_assert_eq!(edges, targets.clone());
    }

    #[test]
    fn display_round_trips_through_quoting(code in code_strategy(), display in "[A-Za-z][A-Za-z0-9 ]{0,20}[A-Za-z]") {
        prop_assume!(code != "as");
        let line = format!("class \"{}\" as {}", display, code);
        let diagram = process(&line).unwrap();
        prop_assert_eq!(diagram.leaf(&code).unwrap().display().as_text(), display.clone());
    }
}
