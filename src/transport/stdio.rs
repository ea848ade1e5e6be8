//! Newline-delimited JSON-RPC over stdin/stdout
//!
//! One request per line in, one response per line out. Notifications
//! produce no output line. Diagnostics go to stderr only.

use crate::mcp::dispatch;
use crate::mcp::error::AppsError;
use crate::mcp::helpers::rpc_error;
use crate::mcp::models::JsonRpcRequest;
use crate::mcp::state::SharedState;
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Stdout};

/// Serves the protocol on stdin/stdout until stdin closes.
pub async fn serve(state: SharedState) -> Result<(), AppsError> {
    let stdin = tokio::io::stdin();
    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(stdin).lines();

    while let Some(line) = lines
        .next_line()
        .await
        .map_err(|e| AppsError::Transport(e.to_string()))?
    {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let request: JsonRpcRequest = match serde_json::from_str(line) {
            Ok(req) => req,
            Err(e) => {
                tracing::warn!("unparseable frame: {}", e);
                write_frame(&mut stdout, &rpc_error(Value::Null, -32700, "Parse error")).await?;
                continue;
            }
        };

        // Notifications carry no id and get no response line
        let respond = request.id.is_some();
        let response = dispatch(&state, request).await;
        if respond {
            write_frame(&mut stdout, &response).await?;
        }
    }

    tracing::info!("stdin closed, shutting down");
    Ok(())
}

async fn write_frame(stdout: &mut Stdout, frame: &Value) -> Result<(), AppsError> {
    let encoded = serde_json::to_vec(frame)?;
    stdout
        .write_all(&encoded)
        .await
        .map_err(|e| AppsError::Transport(e.to_string()))?;
    stdout
        .write_all(b"\n")
        .await
        .map_err(|e| AppsError::Transport(e.to_string()))?;
    stdout
        .flush()
        .await
        .map_err(|e| AppsError::Transport(e.to_string()))?;
    Ok(())
}
