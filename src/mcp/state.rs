//! Probe Application State
//!
//! This module owns the per-server registries and wires the fixture tool
//! and picker resource into them at startup.

use super::models::{
    InvocationResult, ToolDescriptor, TOOL_NAME, VIEW_MIME_TYPE, VIEW_TEMPLATE_URI,
};
use super::resources::{ResourceDescriptor, ResourceRegistry};
use super::tools::ToolRegistry;
use crate::catalog;
use futures_util::FutureExt;
use std::sync::Arc;

// =============================================================================
// Application State
// =============================================================================

/// Shared application state that can be safely passed between threads
pub type SharedState = Arc<AppState>;

/// Core application state holding the tool and resource registries
pub struct AppState {
    pub tools: ToolRegistry,
    pub resources: ResourceRegistry,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// Creates the state with the `pick_value` fixture already registered.
    pub fn new() -> Self {
        let state = Self {
            tools: ToolRegistry::new(),
            resources: ResourceRegistry::new(),
        };
        state.register_fixture();
        state
    }

    fn register_fixture(&self) {
        let descriptor = ToolDescriptor {
            name: TOOL_NAME.to_string(),
            title: "Pick a value".to_string(),
            description: "Presents a fixed catalog of ten values in an embedded picker view. \
                          Debug/test tool: wait for the user's pick to arrive as a context \
                          update, then report the received id back."
                .to_string(),
            input_schema: catalog::models::input_schema(),
            output_schema: Some(catalog::models::output_schema()),
            view_uri: Some(VIEW_TEMPLATE_URI.to_string()),
        };

        // The handler is pure: a fixed preamble for the model, the catalog
        // for the view. The two channels intentionally share no payload.
        let registered = self.tools.register(
            descriptor,
            Arc::new(|_args| {
                async {
                    let structured = serde_json::to_value(catalog::pick_value_output())?;
                    Ok(InvocationResult::text(catalog::models::MODEL_PREAMBLE)
                        .with_structured(structured))
                }
                .boxed()
            }),
        );
        if let Err(e) = registered {
            tracing::error!("fixture tool registration failed: {}", e);
        }

        self.resources.register(
            ResourceDescriptor {
                uri: VIEW_TEMPLATE_URI.to_string(),
                name: "Value picker".to_string(),
                mime_type: VIEW_MIME_TYPE.to_string(),
            },
            Arc::new(|| async { Ok(catalog::render_picker_markup()) }.boxed()),
        );
    }
}
