//! Session coordinator state machine.
//!
//! This module defines [`StateCoordinator`], which decides what the
//! presentation layer shows for each observed session state, completely
//! decoupled from I/O and from the connectivity subsystem.
//!
//! This is a pure state machine: it consumes [`crate::CoordEvent`] inputs
//! and produces [`crate::CoordAction`] instructions for the runtime to
//! execute.
//!
//! # Responsibilities
//!
//! - Maps session states to screen selections, suppressing consecutive
//!   duplicates.
//! - Gates navigation intents: executes immediately while `Running`,
//!   otherwise defers exactly one into the [`Router`] for replay on the next
//!   `Running` transition.
//! - Rejects immediately repeated scanner input via [`ScanDeduplicator`].
//! - Escalates `Error` to the owner exactly once and goes silent afterwards.

use filament_core::{
    ClassifyError, Intent, ModalScreen, PaymentKind, SessionHost, SessionState, screen_for,
};

use crate::{CoordAction, CoordEvent, Router, ScanDeduplicator};

/// Session coordinator state machine.
///
/// Pure state machine that processes events and produces actions. No I/O
/// dependencies, fully testable without a presentation layer. One instance
/// per session; destroyed with it.
#[derive(Debug)]
pub struct StateCoordinator {
    /// Where the session's node runs.
    host: SessionHost,
    /// Last observed state. `None` until the first observation.
    observed: Option<SessionState>,
    /// Pending navigation intent.
    router: Router,
    /// Scanner input gate.
    scans: ScanDeduplicator,
    /// Fatal state was escalated; the machine is silent forever after.
    torn_down: bool,
    /// `stop()` was called.
    stopped: bool,
}

impl StateCoordinator {
    /// Create a coordinator for a session hosted at `host`.
    pub fn new(host: SessionHost) -> Self {
        Self {
            host,
            observed: None,
            router: Router::new(),
            scans: ScanDeduplicator::new(),
            torn_down: false,
            stopped: false,
        }
    }

    /// Process an event and return actions.
    pub fn handle(&mut self, event: CoordEvent) -> Vec<CoordAction> {
        match event {
            CoordEvent::StateChanged(state) => self.observe_state(state),
            CoordEvent::IntentSubmitted(intent) => self.handle_intent(intent),
            CoordEvent::AddressScanned(address) => self.observe_scan(address),
            CoordEvent::ClassificationResolved(outcome) => self.observe_classification(outcome),
        }
    }

    /// Process one emitted session state.
    ///
    /// States arrive in emission order on the serialized runtime loop.
    /// A state equal to the previously observed one is suppressed entirely;
    /// non-consecutive repeats (`Running -> Locked -> Running`) are not.
    pub fn observe_state(&mut self, state: SessionState) -> Vec<CoordAction> {
        if self.is_silent() {
            return Vec::new();
        }
        if self.observed == Some(state) {
            tracing::debug!(?state, "suppressed duplicate state");
            return Vec::new();
        }
        self.observed = Some(state);
        tracing::info!(?state, "session state changed");

        if state.is_terminal() {
            self.torn_down = true;
            return vec![CoordAction::SignalTeardown];
        }

        let pending = match state {
            SessionState::Running => self.router.take_pending(),
            _ => None,
        };

        let Some(screen) = screen_for(state, &self.host, pending.is_some()) else {
            // Locked on a locally-hosted session; nothing to unlock
            tracing::debug!(?state, "state selects no screen");
            return Vec::new();
        };

        let mut actions = vec![CoordAction::Present(screen)];
        if let Some(intent) = pending {
            tracing::info!(?intent, "replaying deferred intent");
            actions.extend(self.execute(intent));
        }
        actions
    }

    /// Process an externally submitted navigation intent.
    ///
    /// Executed immediately while the session is `Running`; otherwise
    /// deferred into the router (overwriting any unreplayed intent) and
    /// evaluated no earlier than the next `Running` transition.
    pub fn handle_intent(&mut self, intent: Intent) -> Vec<CoordAction> {
        if self.is_silent() {
            return Vec::new();
        }
        if self.observed == Some(SessionState::Running) {
            return self.execute(intent);
        }
        tracing::debug!(?intent, state = ?self.observed, "deferring intent until running");
        self.router.submit(intent);
        Vec::new()
    }

    /// Process an address resolved by a scanner screen.
    ///
    /// The same code held in front of the camera resolves many times in a
    /// row; only the immediately repeated address is dropped.
    pub fn observe_scan(&mut self, address: String) -> Vec<CoordAction> {
        if self.is_silent() {
            return Vec::new();
        }
        if !self.scans.accept(&address) {
            tracing::debug!("rejected repeated scan");
            return Vec::new();
        }
        vec![CoordAction::Classify { address }]
    }

    /// Process the outcome of an address classification.
    ///
    /// Success presents the matching send screen; failure surfaces a
    /// message and changes nothing. The runtime has already discarded
    /// outcomes that were superseded or arrived after `stop()`.
    pub fn observe_classification(
        &mut self,
        outcome: Result<PaymentKind, ClassifyError>,
    ) -> Vec<CoordAction> {
        if self.is_silent() {
            return Vec::new();
        }
        match outcome {
            Ok(PaymentKind::OnChain { uri }) => {
                vec![CoordAction::PresentModal(ModalScreen::SendOnChain { uri })]
            },
            Ok(PaymentKind::Invoice { invoice }) => {
                vec![CoordAction::PresentModal(ModalScreen::SendInvoice { invoice })]
            },
            Err(error) => {
                tracing::warn!(%error, "address classification failed");
                vec![CoordAction::ShowError { message: error.to_string() }]
            },
        }
    }

    /// Stop the coordinator. Idempotent; no actions are produced afterward.
    pub fn stop(&mut self) {
        self.stopped = true;
    }

    /// Last observed session state.
    pub fn observed_state(&self) -> Option<SessionState> {
        self.observed
    }

    /// Whether fatal state was escalated.
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Whether an intent is waiting for the next `Running` transition.
    pub fn has_pending_intent(&self) -> bool {
        self.router.has_pending()
    }

    fn is_silent(&self) -> bool {
        self.stopped || self.torn_down
    }

    /// Turn an intent into actions. Only called while `Running`.
    fn execute(&mut self, intent: Intent) -> Vec<CoordAction> {
        match intent {
            Intent::SendPayment { address: Some(address) } => {
                vec![CoordAction::Classify { address }]
            },
            Intent::SendPayment { address: None } => {
                vec![CoordAction::PresentModal(ModalScreen::Scanner)]
            },
            Intent::RequestPayment => {
                vec![CoordAction::PresentModal(ModalScreen::RequestPayment)]
            },
            Intent::Connect => {
                // Routed by the session owner, not the in-session coordinator
                tracing::debug!("ignoring connect intent");
                Vec::new()
            },
        }
    }
}
