//! Pending navigation intent slot.

use filament_core::Intent;

/// Holds at most one navigation intent until the session can execute it.
///
/// There is deliberately no queue: a user following a second deep link
/// before the first one ran has changed their mind, so the newer intent
/// wins.
#[derive(Debug, Default)]
pub struct Router {
    pending: Option<Intent>,
}

impl Router {
    /// Create a router with no pending intent.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an intent, overwriting any unreplayed one.
    pub fn submit(&mut self, intent: Intent) {
        if let Some(previous) = self.pending.replace(intent) {
            tracing::debug!(?previous, "overwrote pending intent");
        }
    }

    /// Return and clear the pending intent.
    ///
    /// The coordinator calls this exactly once per transition into
    /// `Running`; a taken intent can never be replayed again.
    pub fn take_pending(&mut self) -> Option<Intent> {
        self.pending.take()
    }

    /// Whether an intent is waiting for replay.
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }
}
