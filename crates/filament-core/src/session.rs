//! Session lifecycle state.
//!
//! The connectivity subsystem emits an ordered stream of [`SessionState`]
//! values describing one session of a backend node connection. The states do
//! not form a strict linear progression:
//!
//! ```text
//! ┌────────────┐      ┌─────────┐      ┌─────────┐
//! │ Connecting │─────>│ Syncing │─────>│ Running │
//! └────────────┘      └─────────┘      └─────────┘
//!       │                  │             ↑     │
//!       │                  │             │     ↓
//!       │                  │           ┌────────┐
//!       │                  │           │ Locked │
//!       │                  │           └────────┘
//!       ↓                  ↓                │
//!     ┌──────────────────────────────────────┐
//!     │                Error                 │  (terminal)
//!     └──────────────────────────────────────┘
//! ```
//!
//! `Locked <-> Running` and `Syncing -> Running` are both valid; `Error` is
//! reachable from any state and terminal for the session. A new session must
//! be constructed by the owner after an `Error`.

use serde::{Deserialize, Serialize};

/// State of one backend node session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionState {
    /// Establishing the connection to the node.
    Connecting,
    /// Connected, chain sync in progress.
    Syncing,
    /// Fully operational.
    Running,
    /// The node requires an unlock before it can serve requests.
    Locked,
    /// The session failed. Terminal; the owner must tear down.
    Error,
}

impl SessionState {
    /// Whether this state ends the session.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Error)
    }
}

/// Where the backend node of a session runs.
///
/// Only remotely-hosted nodes can be interactively unlocked, and only
/// locally-hosted nodes need force-close expiry reminders (a remote node
/// keeps watching the chain while the app is gone).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionHost {
    /// Node runs on this device.
    Local,
    /// Node is reached over RPC.
    Remote {
        /// Endpoint identity shown on the unlock prompt.
        host: String,
    },
}

impl SessionHost {
    /// Whether the session talks to a remotely-hosted node.
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Remote { .. })
    }
}
