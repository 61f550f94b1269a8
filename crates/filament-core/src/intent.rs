//! Externally-requested navigation intents.

use serde::{Deserialize, Serialize};

/// A navigation request originating outside normal in-app interaction,
/// typically a parsed deep link.
///
/// At most one intent is pending at a time; a newly arriving intent
/// overwrites an unreplayed one (last write wins, no queue).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    /// Open the send flow.
    SendPayment {
        /// Pre-supplied address or invoice. `None` means the user wants to
        /// scan one.
        address: Option<String>,
    },
    /// Open the payment request (receive) flow.
    RequestPayment,
    /// Connect to a node. Owned by the session owner, not the in-session
    /// coordinator.
    Connect,
}

/// Outcome of classifying a raw address string.
///
/// A raw string resolves to either an on-chain payment URI or a Lightning
/// invoice; each leads to a distinct send screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentKind {
    /// On-chain payment.
    OnChain {
        /// Normalized payment URI.
        uri: String,
    },
    /// Lightning payment.
    Invoice {
        /// The invoice to pay.
        invoice: String,
    },
}
