//! Picker Catalog Domain Module
//!
//! This module contains the fixture side of the probe, including:
//! - Domain models (the fixed ten-entry catalog and its schemas)
//! - The picker view markup served as a `ui://` resource

pub mod markup;
pub mod models;

// Re-export commonly used items for convenience
pub use markup::render_picker_markup;
pub use models::{catalog, pick_value_output, CatalogEntry, PickValueOutput};
