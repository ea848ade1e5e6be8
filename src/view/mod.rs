//! View-side protocol support
//!
//! Everything the embedded picker view needs to talk to its host:
//! - `bridge` - wire types for the view<->host JSON-RPC bridge
//! - `host` - the outbound connection trait
//! - `presentation` - what the view renders, derived state only
//! - `projector` - host context snapshot -> presentation
//! - `saga` - the two-step selection exchange
//! - `session` - the per-view lifecycle state machine

pub mod bridge;
pub mod host;
pub mod presentation;
pub mod projector;
pub mod saga;
pub mod session;

pub use bridge::{HostContext, HostNotification, APPS_PROTOCOL_VERSION};
pub use host::HostConnection;
pub use presentation::Presentation;
pub use saga::{PartialFailure, SelectionSaga, SelectionStatus};
pub use session::{SessionPhase, ViewSession};
