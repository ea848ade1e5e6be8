//! Integration tests for the view-side session state machine
//!
//! These tests script an in-process host behind the `HostConnection` seam
//! and drive a `ViewSession` through its lifecycle:
//! - Initialization handshake and initial host context
//! - Selection exchanges, including partial failure and overlap
//! - Host context changes and cancellation notices
//! - Teardown from every phase, including mid-exchange

use async_trait::async_trait;
use serde_json::json;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

use apps_host_probe::catalog::pick_value_output;
use apps_host_probe::mcp::error::AppsError;
use apps_host_probe::view::bridge::{
    HostContext, HostContextChangedParams, HostNotification, MessageParams,
    ResourceTeardownParams, SizeChangedParams, ToolCancelledParams, ToolInputParams,
    ToolResultParams, UiInitializeParams, UiInitializeResult, UpdateModelContextParams,
    APPS_PROTOCOL_VERSION,
};
use apps_host_probe::view::{
    HostConnection, PartialFailure, SelectionStatus, SessionPhase, ViewSession,
};

// =============================================================================
// Scripted host
// =============================================================================

#[derive(Default)]
struct MockInner {
    reject_context: AtomicBool,
    reject_message: AtomicBool,
    hold_context: AtomicBool,
    initial_context: Mutex<Option<HostContext>>,
    log: Mutex<Vec<String>>,
    context_texts: Mutex<Vec<String>>,
    messages: Mutex<Vec<MessageParams>>,
    release_context: Notify,
}

/// In-process host double. Clones share the script and the recordings.
#[derive(Clone, Default)]
struct MockHost {
    inner: Arc<MockInner>,
}

impl MockHost {
    fn new() -> Self {
        Self::default()
    }

    fn rejecting_context(self) -> Self {
        self.inner.reject_context.store(true, Ordering::SeqCst);
        self
    }

    fn rejecting_message(self) -> Self {
        self.inner.reject_message.store(true, Ordering::SeqCst);
        self
    }

    /// Parks every `ui/update-model-context` until the test releases it.
    fn holding_context_updates(self) -> Self {
        self.inner.hold_context.store(true, Ordering::SeqCst);
        self
    }

    fn with_initial_context(self, context: HostContext) -> Self {
        *self.inner.initial_context.lock().unwrap() = Some(context);
        self
    }

    fn release_all_context_updates(&self) {
        self.inner.release_context.notify_waiters();
    }

    fn log(&self, entry: impl Into<String>) {
        self.inner.log.lock().unwrap().push(entry.into());
    }

    fn calls(&self) -> Vec<String> {
        self.inner.log.lock().unwrap().clone()
    }

    fn call_count(&self, entry: &str) -> usize {
        self.calls().iter().filter(|e| e.as_str() == entry).count()
    }

    fn context_texts(&self) -> Vec<String> {
        self.inner.context_texts.lock().unwrap().clone()
    }

    fn messages(&self) -> Vec<MessageParams> {
        self.inner.messages.lock().unwrap().clone()
    }

    fn rejected() -> AppsError {
        AppsError::RequestRejected {
            code: -32600,
            message: "declined by script".to_string(),
        }
    }
}

#[async_trait]
impl HostConnection for MockHost {
    async fn initialize(
        &self,
        _params: UiInitializeParams,
    ) -> Result<UiInitializeResult, AppsError> {
        self.log("ui/initialize");
        Ok(UiInitializeResult {
            protocol_version: APPS_PROTOCOL_VERSION.to_string(),
            host_capabilities: json!({}),
            host_info: None,
            host_context: self.inner.initial_context.lock().unwrap().clone(),
        })
    }

    async fn update_model_context(
        &self,
        params: UpdateModelContextParams,
    ) -> Result<(), AppsError> {
        // Log and record on arrival so tests can observe a held request
        self.log("ui/update-model-context");
        if let Some(text) = params
            .content
            .as_ref()
            .and_then(|content| content.first())
            .and_then(|block| block["text"].as_str())
        {
            self.inner
                .context_texts
                .lock()
                .unwrap()
                .push(text.to_string());
        }

        if self.inner.hold_context.load(Ordering::SeqCst) {
            self.inner.release_context.notified().await;
        }

        if self.inner.reject_context.load(Ordering::SeqCst) {
            return Err(Self::rejected());
        }
        Ok(())
    }

    async fn send_message(&self, params: MessageParams) -> Result<(), AppsError> {
        self.log("ui/message");
        self.inner.messages.lock().unwrap().push(params);
        if self.inner.reject_message.load(Ordering::SeqCst) {
            return Err(Self::rejected());
        }
        Ok(())
    }

    async fn notify_size_changed(&self, params: SizeChangedParams) -> Result<(), AppsError> {
        self.log(format!(
            "ui/notifications/size-changed {}x{}",
            params.width, params.height
        ));
        Ok(())
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn catalog_result() -> ToolResultParams {
    ToolResultParams {
        content: None,
        structured_content: Some(serde_json::to_value(pick_value_output()).unwrap()),
    }
}

/// Session taken through the handshake with the catalog already rendered.
async fn ready_session(host: MockHost) -> ViewSession<MockHost> {
    let session = ViewSession::new(host);
    session.initialize().await.unwrap();
    session.handle_notification(HostNotification::ToolResult(catalog_result()));
    session
}

/// Yields until the host has seen `entry` at least `count` times.
async fn wait_for_calls(host: &MockHost, entry: &str, count: usize) {
    for _ in 0..1000 {
        if host.call_count(entry) >= count {
            return;
        }
        tokio::task::yield_now().await;
    }
    panic!("host never observed {count}x {entry}");
}

// =============================================================================
// Handshake
// =============================================================================

#[tokio::test]
async fn test_handshake_reaches_ready_and_applies_initial_context() {
    let mut styles = std::collections::BTreeMap::new();
    styles.insert("--accent".to_string(), "#ff0088".to_string());

    let host = MockHost::new().with_initial_context(HostContext {
        theme: Some("dark".to_string()),
        styles: Some(styles),
        fonts: None,
        safe_area_insets: None,
    });

    let session = ViewSession::new(host.clone());
    assert_eq!(session.phase(), SessionPhase::Uninitialized);

    session.initialize().await.unwrap();
    assert_eq!(session.phase(), SessionPhase::Ready);
    assert_eq!(host.calls(), vec!["ui/initialize"]);

    let presentation = session.presentation();
    assert_eq!(presentation.color_scheme.as_deref(), Some("dark"));
    assert_eq!(
        presentation.tokens.get("--accent").map(String::as_str),
        Some("#ff0088")
    );
}

#[tokio::test]
async fn test_second_handshake_is_a_protocol_error() {
    let session = ready_session(MockHost::new()).await;

    let err = session.initialize().await.unwrap_err();
    assert!(matches!(err, AppsError::Protocol(_)));
    assert_eq!(session.phase(), SessionPhase::Ready);
}

#[tokio::test]
async fn test_tool_result_populates_the_catalog() {
    let session = ready_session(MockHost::new()).await;

    let catalog = session.catalog();
    assert_eq!(catalog.len(), 10);
    assert_eq!(catalog[0].id, "alpha");
    assert_eq!(catalog[0].label, "Alpha Protocol");
}

#[tokio::test]
async fn test_tool_input_is_recorded() {
    let session = ready_session(MockHost::new()).await;

    session.handle_notification(HostNotification::ToolInput(ToolInputParams {
        arguments: json!({}),
    }));
    assert_eq!(session.last_tool_input(), Some(json!({})));
}

// =============================================================================
// Selection exchanges
// =============================================================================

#[tokio::test]
async fn test_selection_delivers_context_then_message() {
    let host = MockHost::new();
    let session = ready_session(host.clone()).await;

    let status = session.select("beta").await;
    assert_eq!(status, Some(SelectionStatus::Success));

    // Step one carried the full entry
    let texts = host.context_texts();
    assert_eq!(texts.len(), 1);
    assert!(texts[0].contains("Beta Framework"));
    assert!(texts[0].contains("(id: beta)"));

    // Step two carried the fixed user-role text
    let messages = host.messages();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].role, "user");
    assert_eq!(
        messages[0].content[0]["text"],
        "I have picked a value, can you tell me what it is?"
    );

    // Strict order on the wire
    assert_eq!(
        host.calls(),
        vec!["ui/initialize", "ui/update-model-context", "ui/message"]
    );

    let presentation = session.presentation();
    assert_eq!(presentation.selected.as_deref(), Some("beta"));
    assert_eq!(
        presentation.status.as_deref(),
        Some("Selection delivered: context updated and message sent.")
    );
    assert_eq!(session.phase(), SessionPhase::Ready);
}

#[tokio::test]
async fn test_message_rejection_is_partial_not_fatal() {
    let host = MockHost::new().rejecting_message();
    let session = ready_session(host.clone()).await;

    let status = session.select("gamma").await;
    assert_eq!(
        status,
        Some(SelectionStatus::Partial(PartialFailure::MessageRejected))
    );

    // Step one landed, step two was attempted
    assert_eq!(host.context_texts().len(), 1);
    assert_eq!(host.call_count("ui/message"), 1);

    assert_eq!(
        session.presentation().status.as_deref(),
        Some("Context updated, message rejected.")
    );

    // The session survives and accepts further picks
    assert_eq!(session.phase(), SessionPhase::Ready);
    assert!(session.select("alpha").await.is_some());
}

#[tokio::test]
async fn test_context_rejection_still_sends_the_message() {
    let host = MockHost::new().rejecting_context();
    let session = ready_session(host.clone()).await;

    let status = session.select("delta").await;
    assert_eq!(
        status,
        Some(SelectionStatus::Partial(PartialFailure::ContextRejected))
    );

    // Step two still went out after step one settled with a rejection
    assert_eq!(
        host.calls(),
        vec!["ui/initialize", "ui/update-model-context", "ui/message"]
    );
    assert_eq!(
        session.presentation().status.as_deref(),
        Some("Context rejected, message delivered.")
    );
}

#[tokio::test]
async fn test_both_rejections_fail_the_selection() {
    let host = MockHost::new().rejecting_context().rejecting_message();
    let session = ready_session(host.clone()).await;

    let status = session.select("epsilon").await;
    assert_eq!(status, Some(SelectionStatus::Failed));
    assert_eq!(
        session.presentation().status.as_deref(),
        Some("Context update and message both rejected.")
    );
    assert_eq!(session.phase(), SessionPhase::Ready);
}

#[tokio::test]
async fn test_message_waits_for_context_update_to_settle() {
    let host = MockHost::new().holding_context_updates();
    let session = Arc::new(ready_session(host.clone()).await);

    let exchange = tokio::spawn({
        let session = session.clone();
        async move { session.select("zeta").await }
    });

    // The context update is in flight and held; no message may exist yet
    wait_for_calls(&host, "ui/update-model-context", 1).await;
    assert_eq!(host.call_count("ui/message"), 0);
    assert_eq!(session.phase(), SessionPhase::Selecting);

    host.release_all_context_updates();
    let status = exchange.await.unwrap();

    assert_eq!(status, Some(SelectionStatus::Success));
    assert_eq!(
        host.calls(),
        vec!["ui/initialize", "ui/update-model-context", "ui/message"]
    );
}

#[tokio::test]
async fn test_overlapping_selections_both_run_to_completion() {
    let host = MockHost::new().holding_context_updates();
    let session = Arc::new(ready_session(host.clone()).await);

    let first = tokio::spawn({
        let session = session.clone();
        async move { session.select("alpha").await }
    });
    wait_for_calls(&host, "ui/update-model-context", 1).await;

    let second = tokio::spawn({
        let session = session.clone();
        async move { session.select("beta").await }
    });
    wait_for_calls(&host, "ui/update-model-context", 2).await;

    // The indicator already shows the latest pick while both are in flight
    assert_eq!(session.presentation().selected.as_deref(), Some("beta"));
    assert_eq!(session.phase(), SessionPhase::Selecting);

    host.release_all_context_updates();
    assert_eq!(first.await.unwrap(), Some(SelectionStatus::Success));
    assert_eq!(second.await.unwrap(), Some(SelectionStatus::Success));

    // Neither exchange was aborted or serialized away
    let texts = host.context_texts();
    assert!(texts.iter().any(|t| t.contains("Alpha Protocol")));
    assert!(texts.iter().any(|t| t.contains("Beta Framework")));
    assert_eq!(host.messages().len(), 2);

    assert_eq!(session.phase(), SessionPhase::Ready);
    assert_eq!(session.presentation().selected.as_deref(), Some("beta"));
}

#[tokio::test]
async fn test_unknown_id_still_yields_a_conforming_exchange() {
    let host = MockHost::new();
    let session = ready_session(host.clone()).await;

    let status = session.select("omega").await;
    assert_eq!(status, Some(SelectionStatus::Success));

    let texts = host.context_texts();
    assert!(texts[0].contains("id: omega"));
    assert!(!texts[0].contains("Description:"));
}

// =============================================================================
// Host context and cancellation
// =============================================================================

#[tokio::test]
async fn test_theme_change_preserves_unrelated_styles() {
    let session = ready_session(MockHost::new()).await;

    let mut styles = std::collections::BTreeMap::new();
    styles.insert("--surface".to_string(), "#ffffff".to_string());
    session.handle_notification(HostNotification::HostContextChanged(
        HostContextChangedParams {
            host_context: HostContext {
                theme: Some("light".to_string()),
                styles: Some(styles),
                fonts: None,
                safe_area_insets: None,
            },
        },
    ));

    // Second snapshot names only the theme
    session.handle_notification(HostNotification::HostContextChanged(
        HostContextChangedParams {
            host_context: HostContext {
                theme: Some("dark".to_string()),
                styles: None,
                fonts: None,
                safe_area_insets: None,
            },
        },
    ));

    let presentation = session.presentation();
    assert_eq!(presentation.color_scheme.as_deref(), Some("dark"));
    assert_eq!(
        presentation.tokens.get("--surface").map(String::as_str),
        Some("#ffffff")
    );
}

#[tokio::test]
async fn test_cancellation_notice_is_surfaced() {
    let session = ready_session(MockHost::new()).await;

    session.handle_notification(HostNotification::ToolCancelled(ToolCancelledParams {
        reason: Some("user aborted".to_string()),
    }));

    let presentation = session.presentation();
    let notice = presentation.cancelled.expect("notice should be present");
    assert_eq!(notice.reason.as_deref(), Some("user aborted"));

    // Cancellation is informational; the session still accepts picks
    assert!(session.select("alpha").await.is_some());
}

// =============================================================================
// Teardown
// =============================================================================

#[tokio::test]
async fn test_teardown_acks_from_every_phase() {
    // Before any handshake
    let fresh = ViewSession::new(MockHost::new());
    fresh.handle_teardown(ResourceTeardownParams::default());
    assert_eq!(fresh.phase(), SessionPhase::TornDown);

    // From a ready session, twice over
    let session = ready_session(MockHost::new()).await;
    session.handle_teardown(ResourceTeardownParams {
        reason: Some("navigation".to_string()),
    });
    session.handle_teardown(ResourceTeardownParams::default());
    assert_eq!(session.phase(), SessionPhase::TornDown);

    // Everything view-held is gone
    assert!(session.catalog().is_empty());
    assert_eq!(session.selection(), None);
    assert_eq!(session.presentation(), Default::default());
}

#[tokio::test]
async fn test_torn_down_session_refuses_new_work() {
    let host = MockHost::new();
    let session = ViewSession::new(host.clone());
    session.handle_teardown(ResourceTeardownParams::default());

    assert_eq!(session.select("alpha").await, None);
    assert!(matches!(
        session.initialize().await,
        Err(AppsError::Protocol(_))
    ));

    session.report_size(640, 480).await;
    assert!(host.calls().is_empty());
}

#[tokio::test]
async fn test_teardown_mid_exchange_does_not_resurrect_the_view() {
    let host = MockHost::new().holding_context_updates();
    let session = Arc::new(ready_session(host.clone()).await);

    let exchange = tokio::spawn({
        let session = session.clone();
        async move { session.select("eta").await }
    });
    wait_for_calls(&host, "ui/update-model-context", 1).await;

    session.handle_teardown(ResourceTeardownParams::default());
    assert_eq!(session.phase(), SessionPhase::TornDown);

    // The stale exchange settles without touching the dismantled view
    host.release_all_context_updates();
    let status = exchange.await.unwrap();
    assert_eq!(status, Some(SelectionStatus::Success));

    assert_eq!(session.phase(), SessionPhase::TornDown);
    assert_eq!(session.presentation(), Default::default());
    assert_eq!(session.selection(), None);
}

// =============================================================================
// Sizing
// =============================================================================

#[tokio::test]
async fn test_size_reports_are_forwarded() {
    let host = MockHost::new();
    let session = ready_session(host.clone()).await;

    session.report_size(480, 320).await;
    assert_eq!(host.call_count("ui/notifications/size-changed 480x320"), 1);
}
