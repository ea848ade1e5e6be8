//! Selection Saga
//!
//! The two-step exchange a selection triggers: `ui/update-model-context`
//! settles first, then `ui/message` goes out regardless of how step one
//! fared. Modeled as its own object so the ordering and partial-failure
//! contract stays testable without a full session.

use super::bridge::{MessageParams, UpdateModelContextParams};
use super::host::HostConnection;
use crate::catalog::CatalogEntry;
use serde_json::json;

/// Fixed user-role text sent after every selection
pub const SELECTION_MESSAGE_TEXT: &str = "I have picked a value, can you tell me what it is?";

/// Which half of a partially failed exchange was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartialFailure {
    /// Context update settled, message was rejected
    MessageRejected,
    /// Context update was rejected, message settled
    ContextRejected,
}

/// Outcome of one selection exchange, always exactly one of three
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionStatus {
    Success,
    Partial(PartialFailure),
    Failed,
}

impl SelectionStatus {
    /// Status line shown in the view. Every outcome reads differently.
    pub fn status_line(&self) -> &'static str {
        match self {
            SelectionStatus::Success => "Selection delivered: context updated and message sent.",
            SelectionStatus::Partial(PartialFailure::MessageRejected) => {
                "Context updated, message rejected."
            }
            SelectionStatus::Partial(PartialFailure::ContextRejected) => {
                "Context rejected, message delivered."
            }
            SelectionStatus::Failed => "Context update and message both rejected.",
        }
    }
}

/// One selection's two-step exchange, fully built before any wire traffic
#[derive(Debug, Clone)]
pub struct SelectionSaga {
    context: UpdateModelContextParams,
    message: MessageParams,
}

impl SelectionSaga {
    /// Builds the exchange for a catalog entry.
    pub fn for_entry(entry: &CatalogEntry) -> Self {
        Self::with_context_text(format!(
            "The user has selected \"{}\" (id: {}) in the picker view. Description: {}",
            entry.label, entry.id, entry.description
        ))
    }

    /// Builds the exchange for an identifier missing from the catalog.
    pub fn for_unknown_id(id: &str) -> Self {
        Self::with_context_text(format!(
            "The user has selected an entry with id: {} in the picker view.",
            id
        ))
    }

    fn with_context_text(text: String) -> Self {
        Self {
            context: UpdateModelContextParams {
                content: Some(vec![json!({ "type": "text", "text": text })]),
                structured_content: None,
            },
            message: MessageParams {
                role: "user".to_string(),
                content: vec![json!({ "type": "text", "text": SELECTION_MESSAGE_TEXT })],
            },
        }
    }

    /// Runs the exchange. Step two is issued only after step one settles,
    /// and is issued no matter how step one fared. Never returns an error;
    /// every run lands on one of the three statuses.
    pub async fn run<H: HostConnection + ?Sized>(self, host: &H) -> SelectionStatus {
        let context_settled = host.update_model_context(self.context).await;
        if let Err(e) = &context_settled {
            tracing::debug!("update-model-context rejected: {}", e);
        }

        let message_settled = host.send_message(self.message).await;
        if let Err(e) = &message_settled {
            tracing::debug!("message rejected: {}", e);
        }

        match (context_settled, message_settled) {
            (Ok(()), Ok(())) => SelectionStatus::Success,
            (Ok(()), Err(_)) => SelectionStatus::Partial(PartialFailure::MessageRejected),
            (Err(_), Ok(())) => SelectionStatus::Partial(PartialFailure::ContextRejected),
            (Err(_), Err(_)) => SelectionStatus::Failed,
        }
    }
}
