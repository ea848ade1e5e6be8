//! Error types for the probe's protocol surface

use thiserror::Error;

/// Error type for registry, invocation, and bridge operations
#[derive(Error, Debug)]
pub enum AppsError {
    /// Caller-supplied arguments did not satisfy the declared schema
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// Tool name is not registered
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// Resource URI was never registered
    #[error("Unknown resource: {0}")]
    UnknownResource(String),

    /// Registration collision on a tool name
    #[error("Duplicate tool: {0}")]
    DuplicateTool(String),

    /// Tool handler failed or produced a result violating its declared contract
    #[error("Tool execution failed: {0}")]
    ToolExecution(String),

    /// Method name not handled by the dispatcher
    #[error("Method not found")]
    UnknownMethod(String),

    /// Protocol misuse (bad envelope, request invalid for the current state)
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Host declined a view-originated request
    #[error("Request rejected by host: {message}")]
    RequestRejected { code: i32, message: String },

    /// Channel-level failure, opaque to the protocol core
    #[error("Transport error: {0}")]
    Transport(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AppsError {
    /// JSON-RPC error code for this error when it crosses the wire.
    pub fn rpc_code(&self) -> i32 {
        match self {
            AppsError::InvalidArguments(_) | AppsError::UnknownTool(_) => -32602,
            AppsError::UnknownResource(_) => -32002,
            AppsError::UnknownMethod(_) => -32601,
            AppsError::Protocol(_) => -32600,
            AppsError::RequestRejected { code, .. } => *code,
            AppsError::DuplicateTool(_)
            | AppsError::ToolExecution(_)
            | AppsError::Transport(_)
            | AppsError::Serialization(_) => -32603,
        }
    }
}
