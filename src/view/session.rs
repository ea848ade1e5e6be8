//! View Session (protocol core)
//!
//! State machine for one embedded view's lifetime, from the initialization
//! handshake through selection exchanges to teardown:
//!
//! - `Uninitialized -> Initializing -> Ready -> (Selecting) -> Ready`
//! - `TornDown` is terminal and reachable from every other phase
//!
//! Host notifications are applied synchronously in arrival order. The only
//! suspension points are the outbound handshake and the two requests of a
//! selection exchange.

use super::bridge::{
    AppInfo, HostContext, HostContextChangedParams, HostNotification, ResourceTeardownParams,
    SizeChangedParams, TeardownAck, ToolCancelledParams, ToolInputParams, ToolResultParams,
    UiInitializeParams, APPS_PROTOCOL_VERSION,
};
use super::host::HostConnection;
use super::presentation::{CancellationNotice, Presentation};
use super::projector;
use super::saga::{SelectionSaga, SelectionStatus};
use crate::catalog::{CatalogEntry, PickValueOutput};
use crate::mcp::error::AppsError;
use crate::mcp::models::{SERVER_NAME, SERVER_VERSION};
use serde_json::Value;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Lifecycle phase of a view session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Uninitialized,
    Initializing,
    Ready,
    Selecting,
    TornDown,
}

struct SessionState {
    phase: SessionPhase,
    /// Latest host context snapshot, replaced wholesale on change
    context: Option<HostContext>,
    presentation: Presentation,
    /// Catalog unpacked from the tool result's structured channel
    catalog: Vec<CatalogEntry>,
    last_tool_input: Option<Value>,
    /// Currently chosen entry id; superseded, never merged
    selection: Option<String>,
    /// Selection exchanges currently in flight; overlaps race freely
    in_flight: usize,
}

/// One view's protocol session against its embedding host
pub struct ViewSession<H: HostConnection> {
    host: H,
    state: Mutex<SessionState>,
}

impl<H: HostConnection> ViewSession<H> {
    pub fn new(host: H) -> Self {
        Self {
            host,
            state: Mutex::new(SessionState {
                phase: SessionPhase::Uninitialized,
                context: None,
                presentation: Presentation::default(),
                catalog: Vec::new(),
                last_tool_input: None,
                selection: None,
                in_flight: 0,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn phase(&self) -> SessionPhase {
        self.lock().phase
    }

    /// Snapshot of what the view would currently render.
    pub fn presentation(&self) -> Presentation {
        self.lock().presentation.clone()
    }

    pub fn selection(&self) -> Option<String> {
        self.lock().selection.clone()
    }

    pub fn catalog(&self) -> Vec<CatalogEntry> {
        self.lock().catalog.clone()
    }

    pub fn last_tool_input(&self) -> Option<Value> {
        self.lock().last_tool_input.clone()
    }

    /// Runs the `ui/initialize` handshake.
    ///
    /// On acknowledgment any initial host context is projected and the
    /// session becomes `Ready`. A host that never answers leaves the
    /// session in `Initializing`; no implicit timeout is imposed here, so
    /// callers wrap this in their own.
    pub async fn initialize(&self) -> Result<(), AppsError> {
        {
            let mut state = self.lock();
            match state.phase {
                SessionPhase::Uninitialized => state.phase = SessionPhase::Initializing,
                SessionPhase::TornDown => {
                    return Err(AppsError::Protocol("session is torn down".to_string()))
                }
                _ => {
                    return Err(AppsError::Protocol(
                        "handshake already performed".to_string(),
                    ))
                }
            }
        }

        let ack = self
            .host
            .initialize(UiInitializeParams {
                protocol_version: APPS_PROTOCOL_VERSION.to_string(),
                client_info: Some(AppInfo {
                    name: format!("{} picker", SERVER_NAME),
                    version: SERVER_VERSION.to_string(),
                }),
            })
            .await;

        match ack {
            Ok(result) => {
                let mut state = self.lock();
                if state.phase == SessionPhase::TornDown {
                    // Teardown raced the acknowledgment; stay down
                    return Ok(());
                }
                if let Some(snapshot) = result.host_context {
                    projector::apply(&snapshot, &mut state.presentation);
                    state.context = Some(snapshot);
                }
                state.phase = SessionPhase::Ready;
                Ok(())
            }
            Err(e) => {
                tracing::warn!("handshake not acknowledged: {}", e);
                Err(e)
            }
        }
    }

    /// Applies one host notification. Processing is synchronous, so
    /// notifications take effect in arrival order.
    pub fn handle_notification(&self, notification: HostNotification) {
        match notification {
            HostNotification::Initialized => self.handle_initialized(),
            HostNotification::ToolInput(params) => self.handle_tool_input(params),
            HostNotification::ToolResult(params) => self.handle_tool_result(params),
            HostNotification::ToolCancelled(params) => self.handle_tool_cancelled(params),
            HostNotification::HostContextChanged(params) => {
                self.handle_host_context_changed(params)
            }
            HostNotification::ResourceTeardown(params) => {
                self.handle_teardown(params);
            }
        }
    }

    fn handle_initialized(&self) {
        let mut state = self.lock();
        if state.phase == SessionPhase::Initializing {
            state.phase = SessionPhase::Ready;
        }
    }

    /// Informational for a zero-parameter tool; stored, nothing more.
    fn handle_tool_input(&self, params: ToolInputParams) {
        let mut state = self.lock();
        if state.phase == SessionPhase::TornDown {
            return;
        }
        tracing::debug!("tool input received");
        state.last_tool_input = Some(params.arguments);
    }

    /// Unpacks the structured channel into the rendered catalog. This is
    /// the sole path by which the view learns what to display; the
    /// model-visible text channel is never consulted.
    fn handle_tool_result(&self, params: ToolResultParams) {
        let mut state = self.lock();
        if state.phase == SessionPhase::TornDown {
            return;
        }
        let Some(structured) = params.structured_content else {
            tracing::warn!("tool result carried no structured content; nothing to render");
            return;
        };
        match serde_json::from_value::<PickValueOutput>(structured) {
            Ok(output) => state.catalog = output.values,
            Err(e) => tracing::warn!("unrenderable structured content: {}", e),
        }
    }

    /// No formal phase change; surfaces the notice and keeps the reason.
    fn handle_tool_cancelled(&self, params: ToolCancelledParams) {
        let mut state = self.lock();
        if state.phase == SessionPhase::TornDown {
            return;
        }
        state.presentation.cancelled = Some(CancellationNotice {
            reason: params.reason,
        });
    }

    /// Replaces the snapshot wholesale and re-projects the presentation.
    /// Legal at any point in the session lifetime.
    fn handle_host_context_changed(&self, params: HostContextChangedParams) {
        let mut state = self.lock();
        if state.phase == SessionPhase::TornDown {
            return;
        }
        projector::apply(&params.host_context, &mut state.presentation);
        state.context = Some(params.host_context);
    }

    /// Tears the session down from any phase.
    ///
    /// Infallible and idempotent: view-held state is released synchronously
    /// and the acknowledgment is returned unconditionally, even when there
    /// is nothing left to release.
    pub fn handle_teardown(&self, params: ResourceTeardownParams) -> TeardownAck {
        let mut state = self.lock();
        if let Some(reason) = &params.reason {
            tracing::debug!("teardown requested: {}", reason);
        }
        state.phase = SessionPhase::TornDown;
        state.context = None;
        state.catalog.clear();
        state.last_tool_input = None;
        state.selection = None;
        state.presentation = Presentation::default();
        TeardownAck {}
    }

    /// Handles the user picking `id`.
    ///
    /// The selection state and visual indicator update synchronously and
    /// unconditionally; the two-step exchange follows. Overlapping calls
    /// race deliberately: neither is serialized or aborted, the indicator
    /// reflects the latest pick, and the status line reflects whichever
    /// exchange settles last. Returns `None` when the session phase does
    /// not accept selections.
    pub async fn select(&self, id: &str) -> Option<SelectionStatus> {
        let saga = {
            let mut state = self.lock();
            match state.phase {
                SessionPhase::Ready | SessionPhase::Selecting => {}
                _ => return None,
            }
            state.selection = Some(id.to_string());
            state.presentation.selected = Some(id.to_string());
            state.presentation.status = None;
            state.phase = SessionPhase::Selecting;
            state.in_flight += 1;

            match state.catalog.iter().find(|entry| entry.id == id) {
                Some(entry) => SelectionSaga::for_entry(entry),
                None => SelectionSaga::for_unknown_id(id),
            }
        };

        let status = saga.run(&self.host).await;

        let mut state = self.lock();
        state.in_flight = state.in_flight.saturating_sub(1);
        if state.phase == SessionPhase::Selecting && state.in_flight == 0 {
            state.phase = SessionPhase::Ready;
        }
        if state.phase != SessionPhase::TornDown {
            state.presentation.status = Some(status.status_line().to_string());
        }
        Some(status)
    }

    /// Reports a content size change to the host. Failures are logged and
    /// swallowed; sizing is advisory.
    pub async fn report_size(&self, width: u32, height: u32) {
        if self.phase() == SessionPhase::TornDown {
            return;
        }
        if let Err(e) = self
            .host
            .notify_size_changed(SizeChangedParams { width, height })
            .await
        {
            tracing::debug!("size-changed not delivered: {}", e);
        }
    }
}
