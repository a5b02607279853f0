//! WebAssembly bindings
//!
//! Browser-friendly wrappers around diagram processing. Errors surface as
//! JavaScript exceptions; the processed model is returned as a JSON summary
//! since the entity graph itself cannot cross the boundary.

use crate::commands::LineProcessor;
use crate::model::{AddressingMode, LeafEntity};
use wasm_bindgen::prelude::*;

/// Set up panic hooks and console logging for the browser
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    let _ = crate::core::logging::init_logging(Some("info"), None);
}

/// Process class diagram source and return a JSON model summary
///
/// Throws a JavaScript error when a line fails to parse or execute.
#[wasm_bindgen]
pub fn process_source(input: &str) -> Result<String, JsValue> {
    process_source_with_mode(input, false)
}

/// Process with the legacy addressing mode toggled on
#[wasm_bindgen]
pub fn process_source_with_mode(input: &str, legacy: bool) -> Result<String, JsValue> {
    let mode = if legacy {
        AddressingMode::Legacy
    } else {
        AddressingMode::Modern
    };
    let diagram = LineProcessor::new()
        .process_with_mode(input, mode)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    let entities: Vec<_> = diagram.leaves().map(entity_summary).collect();
    let summary = serde_json::json!({
        "entity_count": diagram.leaf_count(),
        "relation_count": diagram.relation_count(),
        "entities": entities,
    });
    serde_json::to_string(&summary).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn entity_summary(leaf: &LeafEntity) -> serde_json::Value {
    serde_json::json!({
        "code": leaf.code(),
        "kind": leaf.kind().to_string(),
        "display": leaf.display().as_text(),
        "generic": leaf.generic(),
        "stereotype": leaf.stereotype().map(|s| s.raw()),
        "tags": leaf.tags().iter().collect::<Vec<_>>(),
        "urls": leaf.urls().iter().map(|u| u.link()).collect::<Vec<_>>(),
        "relations": leaf
            .relations()
            .iter()
            .map(|r| serde_json::json!({ "kind": r.kind.to_string(), "target": r.target }))
            .collect::<Vec<_>>(),
    })
}
