//! Model Context Protocol (MCP) Module
//!
//! This module contains the probe's MCP server surface, including:
//! - Protocol models (JsonRpcRequest, constants, the dual-channel result)
//! - The error taxonomy shared across registries and the bridge
//! - Tool and view-resource registries
//! - RPC helpers (success/error envelopes, view metadata)
//! - Method handlers (initialize, tools/list, tools/call, etc.)

pub mod error;
pub mod handlers;
pub mod helpers;
pub mod models;
pub mod resources;
pub mod state;
pub mod tools;

// Re-export commonly used types and functions
pub use error::AppsError;
pub use handlers::{dispatch, routes};
pub use state::{AppState, SharedState};
