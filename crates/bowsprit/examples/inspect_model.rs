//! Process a small diagram and walk the resulting model.
//!
//! Run with: cargo run --example inspect_model

use bowsprit::prelude::*;

fn main() -> anyhow::Result<()> {
    let source = r#"
@startuml
interface Repository <<boundary>>
abstract class BaseRepo implements Repository
class UserRepo<User> extends BaseRepo $core #lightblue
class "Audit Log" as AuditLog <<(S,#ADD1B2) service>>
@enduml
"#;

    let diagram = process(source)?;
    println!(
        "{} entities, {} relations\n",
        diagram.leaf_count(),
        diagram.relation_count()
    );

    for leaf in diagram.leaves() {
        println!("{} {}", leaf.kind(), leaf.code());
        if leaf.display().as_text() != leaf.code() {
            println!("  display   {}", leaf.display());
        }
        if let Some(generic) = leaf.generic() {
            println!("  generic   {}", generic);
        }
        if let Some(stereotype) = leaf.stereotype() {
            println!("  stereo    {}", stereotype.raw());
        }
        for tag in leaf.tags() {
            println!("  tag       {}", tag);
        }
        if let Some(back) = leaf.colors().get(ColorChannel::Back) {
            println!("  fill      {}", back.as_hex());
        }
        for relation in leaf.relations() {
            println!("  {} {}", relation.kind, relation.target);
        }
    }
    Ok(())
}
