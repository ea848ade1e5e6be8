//! MCP Protocol Models and Constants
//!
//! This module contains the data structures and constants shared by the
//! probe's Model Context Protocol (MCP) surface: the JSON-RPC envelope,
//! tool descriptors, and the dual-channel invocation result.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

// =============================================================================
// MCP Constants
// =============================================================================

/// Name of the fixture tool exercised by conformance runs
pub const TOOL_NAME: &str = "pick_value";
/// URI scheme reserved for view resources
pub const UI_SCHEME: &str = "ui";
/// URI of the picker view resource
pub const VIEW_TEMPLATE_URI: &str = "ui://apps-host-probe/picker.html";
/// MIME type marking a resource as an interactive view, not a plain document
pub const VIEW_MIME_TYPE: &str = "text/html;profile=mcp-app";
/// Server identifier
pub const SERVER_NAME: &str = "apps-host-probe";
/// Server version reported during the handshake
pub const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");
/// Protocol version for MCP
pub const PROTOCOL_VERSION: &str = "2025-03-26";
/// Response header carrying the minted session identifier in HTTP mode
pub const SESSION_ID_HEADER: &str = "Mcp-Session-Id";

// =============================================================================
// MCP Protocol Models
// =============================================================================

/// Standard JSON-RPC 2.0 Request envelope
#[derive(Debug, Deserialize)]
pub struct JsonRpcRequest {
    /// Protocol version (should be "2.0")
    #[allow(dead_code)]
    pub jsonrpc: Option<String>,

    /// Method name to invoke
    pub method: String,

    /// Parameters for the method
    pub params: Option<Value>,

    /// Request identifier
    pub id: Option<Value>,
}

/// A single block of model-visible content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentBlock {
    Text { text: String },
}

impl ContentBlock {
    pub fn text(text: impl Into<String>) -> Self {
        ContentBlock::Text { text: text.into() }
    }
}

/// Dual-channel result of a tool invocation.
///
/// The model-visible channel (`content`) is required at construction; the
/// UI-only channel (`structured`) is genuinely optional. The two channels
/// may diverge arbitrarily: the view can receive rich structured data the
/// model never sees.
#[derive(Debug, Clone)]
pub struct InvocationResult {
    content: Vec<ContentBlock>,
    structured: Option<Value>,
}

impl InvocationResult {
    /// Creates a result with a single model-visible text block.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ContentBlock::text(text)],
            structured: None,
        }
    }

    /// Attaches the UI-only structured payload.
    pub fn with_structured(mut self, structured: Value) -> Self {
        self.structured = Some(structured);
        self
    }

    /// Model-visible content blocks.
    pub fn content(&self) -> &[ContentBlock] {
        &self.content
    }

    /// UI-only structured payload, if any.
    pub fn structured(&self) -> Option<&Value> {
        self.structured.as_ref()
    }

    /// Shapes the result as a `tools/call` response payload.
    ///
    /// # Arguments
    ///
    /// * `meta` - The `_meta` block linking the call to its view resource.
    pub fn into_payload(self, meta: Value) -> Value {
        let mut payload = json!({
            "content": self.content,
            "_meta": meta,
        });
        if let Some(structured) = self.structured {
            payload["structuredContent"] = structured;
        }
        payload
    }
}

/// Descriptor for a callable tool, immutable once registered
#[derive(Debug, Clone)]
pub struct ToolDescriptor {
    /// Unique tool name within the server instance
    pub name: String,
    /// Short display title
    pub title: String,
    /// Human-readable description; may embed machine-readable test instructions
    pub description: String,
    /// JSON Schema for the tool's arguments
    pub input_schema: Value,
    /// JSON Schema for the structured result, when declared
    pub output_schema: Option<Value>,
    /// URI of the view resource this tool renders into, when it has one
    pub view_uri: Option<String>,
}
