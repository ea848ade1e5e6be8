//! MCP Protocol Helpers
//!
//! This module contains helper functions for JSON-RPC communication
//! and view-resource metadata construction.

use serde_json::{json, Value};

/// Constructs the `_meta` block linking a tool or result to its view resource.
///
/// # Arguments
///
/// * `resource_uri` - URI of the `ui://` resource the host should render.
pub fn view_meta(resource_uri: &str) -> Value {
    json!({
        "ui": {
            "resourceUri": resource_uri,
        }
    })
}

/// Builds a JSON-RPC 2.0 success response.
///
/// # Arguments
///
/// * `id` – The request identifier that must be echoed back.
/// * `result` – The payload representing the successful outcome.
///
/// # Returns
///
/// A `serde_json::Value` shaped as a JSON-RPC success envelope.
pub fn rpc_success(id: Value, result: Value) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "result": result,
    })
}

/// Builds a JSON-RPC 2.0 error response.
///
/// # Arguments
///
/// * `id` – The request identifier (or `null` if unavailable).
/// * `code` – The JSON-RPC error code (e.g., -32601 for method not found).
/// * `message` – Human-readable description of the error.
///
/// # Returns
///
/// A `serde_json::Value` shaped as a JSON-RPC error envelope.
pub fn rpc_error(id: Value, code: i32, message: impl Into<String>) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "error": {
            "code": code,
            "message": message.into(),
        }
    })
}
