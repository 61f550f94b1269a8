//! Screen selection as data.
//!
//! The presentation layer consumes [`ScreenSelection`] values; which screen
//! is current is a pure function of the session state and host, computed by
//! [`screen_for`]. No presentation type appears here, so the mapping is
//! testable in isolation.

use crate::session::{SessionHost, SessionState};

/// Top-level screen requested from the presentation layer.
///
/// Exactly one selection is current at any time. `SessionState::Error` maps
/// to no screen: it is an escalation to the session owner, not a render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenSelection {
    /// Connection in progress.
    Loading,
    /// Chain sync progress.
    SyncProgress,
    /// The main wallet shell.
    MainShell {
        /// A deferred navigation intent will be replayed right after this
        /// presentation.
        resume_intent: bool,
    },
    /// Password prompt for a remotely-hosted node.
    UnlockPrompt {
        /// Endpoint identity of the node to unlock.
        host: String,
    },
}

/// Screen presented over the current top-level selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalScreen {
    /// Camera scanner for payment addresses.
    Scanner,
    /// On-chain send form for a resolved payment URI.
    SendOnChain {
        /// The resolved payment URI.
        uri: String,
    },
    /// Lightning send form for a resolved invoice.
    SendInvoice {
        /// The resolved invoice.
        invoice: String,
    },
    /// Payment request (receive) form.
    RequestPayment,
}

/// Map a session state to the screen it selects, if any.
///
/// `pending_intent` reports whether a deferred intent is waiting; it only
/// affects the `MainShell` context. Returns `None` for `Error` (escalation,
/// no screen) and for `Locked` on a locally-hosted session, where an unlock
/// prompt would be meaningless.
pub fn screen_for(
    state: SessionState,
    host: &SessionHost,
    pending_intent: bool,
) -> Option<ScreenSelection> {
    match state {
        SessionState::Connecting => Some(ScreenSelection::Loading),
        SessionState::Syncing => Some(ScreenSelection::SyncProgress),
        SessionState::Running => Some(ScreenSelection::MainShell { resume_intent: pending_intent }),
        SessionState::Locked => match host {
            SessionHost::Remote { host } => {
                Some(ScreenSelection::UnlockPrompt { host: host.clone() })
            },
            SessionHost::Local => None,
        },
        SessionState::Error => None,
    }
}
