//! Host connection seam for the protocol core
//!
//! A session talks to its embedding host only through this trait, so
//! conformance tests can script host behavior without any transport.

use super::bridge::{
    MessageParams, SizeChangedParams, UiInitializeParams, UiInitializeResult,
    UpdateModelContextParams,
};
use crate::mcp::error::AppsError;
use async_trait::async_trait;

/// View-to-host request surface required by a running session
#[async_trait]
pub trait HostConnection: Send + Sync {
    /// Performs the `ui/initialize` handshake.
    async fn initialize(&self, params: UiInitializeParams)
        -> Result<UiInitializeResult, AppsError>;

    /// Issues `ui/update-model-context`; resolves once the host settles it.
    async fn update_model_context(&self, params: UpdateModelContextParams)
        -> Result<(), AppsError>;

    /// Issues `ui/message`; resolves once the host settles it.
    async fn send_message(&self, params: MessageParams) -> Result<(), AppsError>;

    /// Fire-and-forget `ui/notifications/size-changed`.
    async fn notify_size_changed(&self, params: SizeChangedParams) -> Result<(), AppsError>;
}
