//! Coordinator input events.
//!
//! This module defines [`CoordEvent`], the set of inputs that drive the
//! [`crate::StateCoordinator`] state machine.
//!
//! Events originate from three distinct sources:
//! - The connectivity subsystem's state stream.
//! - External navigation requests (deep links, scanner screens).
//! - Completions of the asynchronous classification the runtime runs on the
//!   coordinator's behalf.

use filament_core::{ClassifyError, Intent, PaymentKind, SessionState};

/// Events processed by the coordinator state machine.
#[derive(Debug, Clone)]
pub enum CoordEvent {
    /// The connectivity subsystem emitted a session state.
    StateChanged(SessionState),

    /// An externally parsed navigation intent arrived.
    IntentSubmitted(Intent),

    /// A scanner screen resolved an address.
    AddressScanned(String),

    /// The runtime finished classifying an address.
    ClassificationResolved(Result<PaymentKind, ClassifyError>),
}
