//! Apps Host Probe Library
//!
//! This library provides the core functionality for a host-conformance
//! probe built on MCP (Model Context Protocol) with the Apps extension:
//! a fixture server plus the view-side session logic exercised against
//! embedding hosts.

// Domain modules
pub mod catalog;
pub mod mcp;
pub mod view;

// Infrastructure
pub mod router;
pub mod transport;
