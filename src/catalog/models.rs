//! Picker Catalog Domain Models
//!
//! This module contains the fixture data served by the `pick_value` tool:
//! a fixed catalog of ten labeled entries and the schemas describing the
//! tool's argument and result contracts.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

// =============================================================================
// Catalog Domain Models
// =============================================================================

/// One selectable entry in the picker catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogEntry {
    /// Stable identifier the model is asked to echo back
    pub id: String,

    /// Display label shown in the view
    pub label: String,

    /// Short description, distinct per entry so transcripts show which one
    /// flowed through the host
    pub description: String,
}

/// UI-only structured payload of the `pick_value` tool
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PickValueOutput {
    /// The full catalog, in fixed order
    pub values: Vec<CatalogEntry>,

    /// Usage hint rendered above the list in the view
    pub instruction: String,
}

/// Model-visible text returned by every `pick_value` call.
///
/// The wording is part of the wire contract under test: downstream checks
/// depend on the model following it verbatim, so it must never be shortened.
pub const MODEL_PREAMBLE: &str = "This is a debug and test tool used to verify MCP Apps host \
integration. It shows the user a fixed catalog of ten values inside an embedded picker view. \
Do not pick, suggest, or guess a value yourself. After the user picks one, the host will \
inject a context update naming the selected value; when that happens, and only then, report \
back the selected value's id exactly as received, with no additions.";

/// Usage hint delivered only on the UI channel
pub const UI_INSTRUCTION: &str =
    "Pick one of the ten entries below. Your choice goes to the host, which relays it onward.";

const CATALOG: [(&str, &str, &str); 10] = [
    ("alpha", "Alpha Protocol", "Handshake sequence that opens every exchange."),
    ("beta", "Beta Framework", "Scaffolding layer the other entries hang off."),
    ("gamma", "Gamma Pipeline", "Streaming stage chain with built-in backpressure."),
    ("delta", "Delta Archive", "Append-only store of every change ever made."),
    ("epsilon", "Epsilon Registry", "Lookup table for vanishingly small margins."),
    ("zeta", "Zeta Channel", "Side channel reserved for out-of-band chatter."),
    ("eta", "Eta Cache", "Keeps answers warm until they are wanted again."),
    ("theta", "Theta Index", "Angle-indexed directory of everything above."),
    ("iota", "Iota Beacon", "Smallest possible signal that still gets noticed."),
    ("kappa", "Kappa Ledger", "Double-entry record nobody has ever balanced."),
];

/// Returns the fixed ten-entry catalog, identical on every call.
pub fn catalog() -> Vec<CatalogEntry> {
    CATALOG
        .iter()
        .map(|(id, label, description)| CatalogEntry {
            id: (*id).to_string(),
            label: (*label).to_string(),
            description: (*description).to_string(),
        })
        .collect()
}

/// Builds the structured payload handed to the view.
pub fn pick_value_output() -> PickValueOutput {
    PickValueOutput {
        values: catalog(),
        instruction: UI_INSTRUCTION.to_string(),
    }
}

/// Argument schema for `pick_value`: no parameters are accepted, and any
/// caller-supplied property is rejected by validation rather than ignored.
pub fn input_schema() -> Value {
    json!({
        "type": "object",
        "properties": {},
        "additionalProperties": false
    })
}

/// Result schema for the structured payload.
pub fn output_schema() -> Value {
    json!({
        "type": "object",
        "required": ["values", "instruction"],
        "properties": {
            "values": {
                "type": "array",
                "items": {
                    "type": "object",
                    "required": ["id", "label", "description"],
                    "properties": {
                        "id": { "type": "string" },
                        "label": { "type": "string" },
                        "description": { "type": "string" }
                    },
                    "additionalProperties": false
                }
            },
            "instruction": { "type": "string" }
        },
        "additionalProperties": false
    })
}
