//! Presentation state of the picker view
//!
//! Pure data describing what the view would render. The projector mutates
//! it from host context snapshots; the session mutates selection,
//! cancellation, and status.

use super::bridge::{FontFace, SafeAreaInsets};
use std::collections::BTreeMap;

/// Notice surfaced when the host reports a cancelled invocation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CancellationNotice {
    pub reason: Option<String>,
}

/// Observable presentation state of the view
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Presentation {
    /// Color-scheme directive derived from the host theme
    pub color_scheme: Option<String>,

    /// Style variables applied as presentation tokens
    pub tokens: BTreeMap<String, String>,

    /// Declared font faces
    pub font_faces: Vec<FontFace>,

    /// Safe-area spacing on the root container
    pub insets: Option<SafeAreaInsets>,

    /// Identifier of the visually highlighted entry
    pub selected: Option<String>,

    /// Set when the host reports the invocation was cancelled
    pub cancelled: Option<CancellationNotice>,

    /// Status line for the last settled selection exchange
    pub status: Option<String>,
}
