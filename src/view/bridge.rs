//! Bridge protocol between an embedded view and its host
//!
//! Defines the JSON-RPC 2.0 message types exchanged across the view/host
//! boundary: the handshake, the host-originated notifications that feed a
//! session, and the view-originated requests a session issues back.

use crate::mcp::error::AppsError;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;

/// Bridge protocol version negotiated during `ui/initialize`
pub const APPS_PROTOCOL_VERSION: &str = "2025-06-18";

/// All bridge method names as constants
pub mod methods {
    // Requests (require response)
    pub const INITIALIZE: &str = "ui/initialize";
    pub const MESSAGE: &str = "ui/message";
    pub const UPDATE_MODEL_CONTEXT: &str = "ui/update-model-context";
    pub const RESOURCE_TEARDOWN: &str = "ui/resource-teardown";

    // Notifications (fire-and-forget)
    pub const INITIALIZED: &str = "ui/notifications/initialized";
    pub const TOOL_INPUT: &str = "ui/notifications/tool-input";
    pub const TOOL_RESULT: &str = "ui/notifications/tool-result";
    pub const TOOL_CANCELLED: &str = "ui/notifications/tool-cancelled";
    pub const HOST_CONTEXT_CHANGED: &str = "ui/notifications/host-context-changed";
    pub const SIZE_CHANGED: &str = "ui/notifications/size-changed";
}

/// Identity of one side of the bridge
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppInfo {
    pub name: String,
    pub version: String,
}

/// View -> Host: initialize the bridge connection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiInitializeParams {
    pub protocol_version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_info: Option<AppInfo>,
}

/// Host -> View: response to ui/initialize
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiInitializeResult {
    pub protocol_version: String,
    #[serde(default)]
    pub host_capabilities: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_info: Option<AppInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_context: Option<HostContext>,
}

/// Presentation parameters the host supplies about its environment.
///
/// Replaced wholesale by each `host-context-changed` notification; a
/// session holds at most one live snapshot and keeps no history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostContext {
    /// Semantic color-scheme identifier, e.g. "dark"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    /// Style variables, name to value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub styles: Option<BTreeMap<String, String>>,
    /// Font declarations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fonts: Option<Vec<FontFace>>,
    /// Safe-area inset quartet
    #[serde(skip_serializing_if = "Option::is_none")]
    pub safe_area_insets: Option<SafeAreaInsets>,
}

/// One declared font face
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontFace {
    pub family: String,
    pub src: String,
}

/// Safe-area spacing in pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SafeAreaInsets {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

/// Host -> View: complete tool arguments
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInputParams {
    pub arguments: Value,
}

/// Host -> View: tool execution result
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolResultParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structured_content: Option<Value>,
}

/// Host -> View: tool was cancelled
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolCancelledParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Host -> View: replacement context snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostContextChangedParams {
    pub host_context: HostContext,
}

/// Host -> View: graceful teardown request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResourceTeardownParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// View -> Host: acknowledgment of a teardown request, always sent
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TeardownAck {}

/// View -> Host: update model context for the next turn
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateModelContextParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structured_content: Option<Value>,
}

/// View -> Host: inject a message into the conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageParams {
    pub role: String,
    pub content: Vec<Value>,
}

/// View -> Host: content size changed
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SizeChangedParams {
    pub width: u32,
    pub height: u32,
}

/// Typed union of host-to-view traffic, parsed once at the transport edge
#[derive(Debug, Clone)]
pub enum HostNotification {
    Initialized,
    ToolInput(ToolInputParams),
    ToolResult(ToolResultParams),
    ToolCancelled(ToolCancelledParams),
    HostContextChanged(HostContextChangedParams),
    ResourceTeardown(ResourceTeardownParams),
}

impl HostNotification {
    /// Parses a wire notification into its typed form. Absent params are
    /// treated as the empty object.
    pub fn from_wire(method: &str, params: Value) -> Result<Self, AppsError> {
        let params = if params.is_null() { json!({}) } else { params };
        match method {
            methods::INITIALIZED => Ok(HostNotification::Initialized),
            methods::TOOL_INPUT => Ok(HostNotification::ToolInput(serde_json::from_value(params)?)),
            methods::TOOL_RESULT => {
                Ok(HostNotification::ToolResult(serde_json::from_value(params)?))
            }
            methods::TOOL_CANCELLED => Ok(HostNotification::ToolCancelled(
                serde_json::from_value(params)?,
            )),
            methods::HOST_CONTEXT_CHANGED => Ok(HostNotification::HostContextChanged(
                serde_json::from_value(params)?,
            )),
            methods::RESOURCE_TEARDOWN => Ok(HostNotification::ResourceTeardown(
                serde_json::from_value(params)?,
            )),
            other => Err(AppsError::UnknownMethod(other.to_string())),
        }
    }
}
