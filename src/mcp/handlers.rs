//! MCP (Model Context Protocol) route handlers
//!
//! This module implements the server side of the probe's MCP surface. The
//! method dispatcher is shared by both transports; the axum routes wrap it
//! for HTTP mode and mint the session header during the handshake.

use super::error::AppsError;
use super::state::{AppState, SharedState};
use super::{helpers::*, models::*};
use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::post, Json, Router};
use serde_json::{json, Value};
use uuid::Uuid;

/// Creates routes for MCP-related operations
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/", post(handle_mcp).get(handle_mcp_sse))
        .route("/mcp", post(handle_mcp).get(handle_mcp_sse)) // Standard endpoint
        .route("/mcp/", post(handle_mcp).get(handle_mcp_sse)) // Trailing slash safety
}

/// Handle SSE (Server-Sent Events) handshake for GET requests
async fn handle_mcp_sse() -> impl IntoResponse {
    (
        [("content-type", "text/event-stream")],
        "event: endpoint\ndata: /mcp\n\n",
    )
}

/// Endpoint: POST /mcp
/// Handles the Model Context Protocol communication for POST requests.
async fn handle_mcp(
    State(state): State<SharedState>,
    body: Result<Json<JsonRpcRequest>, axum::extract::rejection::JsonRejection>,
) -> impl IntoResponse {
    // Parse JSON-RPC Request (POST)
    let req = match body {
        Ok(Json(r)) => r,
        Err(e) => {
            tracing::warn!("json parse error: {}", e.body_text());
            return (
                StatusCode::BAD_REQUEST,
                Json(rpc_error(Value::Null, -32700, "Parse error")),
            )
                .into_response();
        }
    };

    let minted_session = req.method == "initialize";
    let response_body = dispatch(&state, req).await;

    if minted_session {
        let session_id = Uuid::new_v4().to_string();
        return ([(SESSION_ID_HEADER, session_id)], Json(response_body)).into_response();
    }
    Json(response_body).into_response()
}

/// Dispatches one JSON-RPC request to its method handler.
///
/// Both transports funnel through here, so behavior is identical whether
/// the request arrived over HTTP or a stdio pipe.
pub async fn dispatch(state: &AppState, req: JsonRpcRequest) -> Value {
    let id = req.id.unwrap_or(Value::Null);
    let method_name = req.method.as_str();
    let params = req.params.unwrap_or(Value::Null);

    tracing::debug!(method = method_name, "mcp call");

    match method_name {
        "initialize" => rpc_success(id, handle_initialize()),
        "notifications/initialized" => rpc_success(id, json!({})),
        "tools/list" => rpc_success(id, handle_tools_list(state)),
        "resources/list" => rpc_success(id, handle_resources_list(state)),
        "resources/read" => match handle_resources_read(state, &params).await {
            Ok(result) => rpc_success(id, result),
            Err(e) => rpc_error(id, e.rpc_code(), e.to_string()),
        },
        "tools/call" => match handle_tool_call(state, &params).await {
            Ok(result) => rpc_success(id, result),
            Err(e) => rpc_error(id, e.rpc_code(), e.to_string()),
        },
        "ping" => rpc_success(id, json!({})), // Optional but good for health checks
        _ => {
            tracing::warn!(method = method_name, "unknown method");
            rpc_error(id, -32601, "Method not found")
        }
    }
}

// =============================================================================
// MCP Method Handlers
// =============================================================================

/// Handles `initialize` request (Handshake).
fn handle_initialize() -> Value {
    json!({
        "protocolVersion": PROTOCOL_VERSION,
        "capabilities": {
            "tools": { "listChanged": false },
            "resources": { "listChanged": false }
        },
        "serverInfo": {
            "name": SERVER_NAME,
            "version": SERVER_VERSION
        }
    })
}

/// Handles `tools/list` request.
fn handle_tools_list(state: &AppState) -> Value {
    let tools: Vec<Value> = state
        .tools
        .descriptors()
        .iter()
        .map(tool_entry)
        .collect();
    json!({ "tools": tools })
}

/// Shapes one descriptor as a `tools/list` entry, attaching the view link.
fn tool_entry(descriptor: &ToolDescriptor) -> Value {
    let mut entry = json!({
        "name": descriptor.name,
        "title": descriptor.title,
        "description": descriptor.description,
        "inputSchema": descriptor.input_schema,
    });
    if let Some(schema) = &descriptor.output_schema {
        entry["outputSchema"] = schema.clone();
    }
    if let Some(uri) = &descriptor.view_uri {
        entry["_meta"] = view_meta(uri);
    }
    entry
}

/// Handles `resources/list` request.
fn handle_resources_list(state: &AppState) -> Value {
    let resources: Vec<Value> = state
        .resources
        .descriptors()
        .into_iter()
        .map(|r| {
            json!({
                "name": r.name,
                "uri": r.uri,
                "mimeType": r.mime_type,
            })
        })
        .collect();
    json!({ "resources": resources })
}

/// Handles `resources/read` request.
async fn handle_resources_read(state: &AppState, params: &Value) -> Result<Value, AppsError> {
    let uri = params
        .get("uri")
        .and_then(|u| u.as_str())
        .ok_or_else(|| AppsError::InvalidArguments("resources/read requires a uri".to_string()))?;

    let contents = state.resources.resolve(uri).await?;
    Ok(json!({
        "contents": [{
            "uri": contents.uri,
            "mimeType": contents.mime_type,
            "text": contents.text,
        }]
    }))
}

/// Handles `tools/call` request.
async fn handle_tool_call(state: &AppState, params: &Value) -> Result<Value, AppsError> {
    let tool_name = params.get("name").and_then(|n| n.as_str()).unwrap_or("");
    let args = params.get("arguments").cloned().unwrap_or(Value::Null);

    let result = state.tools.invoke(tool_name, args).await?;
    let meta = state
        .tools
        .view_uri(tool_name)
        .map(|uri| view_meta(&uri))
        .unwrap_or_else(|| json!({}));

    Ok(result.into_payload(meta))
}
