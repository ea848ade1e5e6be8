//! Transport selection
//!
//! The server speaks the same protocol over two transports:
//! - `Http` - axum server with POST dispatch and an SSE handshake endpoint
//! - `Stdio` - newline-delimited JSON-RPC frames on stdin/stdout

pub mod stdio;

use clap::ValueEnum;
use std::io::IsTerminal;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TransportKind {
    /// HTTP POST + SSE on a local port
    Http,
    /// Newline-delimited JSON-RPC on stdin/stdout
    Stdio,
}

impl TransportKind {
    /// Picks a transport when none was requested explicitly. A piped stdin
    /// means an embedding client sits on the other end; a terminal means a
    /// developer does.
    pub fn detect() -> Self {
        if std::io::stdin().is_terminal() {
            TransportKind::Http
        } else {
            TransportKind::Stdio
        }
    }
}

/// Where diagnostics go. Stdout is never an option: under the stdio
/// transport it carries nothing but protocol frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogMode {
    /// Structured logs on stderr
    Stderr,
    /// No subscriber installed at all
    Silent,
}
