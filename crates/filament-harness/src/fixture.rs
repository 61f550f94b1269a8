//! Full-runtime test fixture.

use std::{sync::Arc, time::Duration};

use filament_app::{Runtime, SessionConfig, SessionStreams};
use filament_core::{AddressClassifier, ChannelUpdate, Intent, SessionState};
use tokio::sync::{mpsc, oneshot, watch};

use crate::{
    sim_driver::{DriverCall, SimDriver, SimDriverError},
    sim_env::SimEnv,
};

/// How long [`SessionFixture::settle`] yields to the runtime. Instant under
/// a paused clock.
const SETTLE: Duration = Duration::from_millis(1);

/// A running [`Runtime`] over in-memory channels.
///
/// Tests feed scripted inputs through the channel handles and assert on the
/// driver record. Each feeding method settles before returning, so the
/// runtime has fully processed the input; state emissions overwritten
/// faster than the loop can observe them would otherwise coalesce, exactly
/// as the replay-latest stream does in production.
pub struct SessionFixture {
    driver: SimDriver,
    state_tx: watch::Sender<SessionState>,
    intent_tx: mpsc::Sender<Intent>,
    scan_tx: mpsc::Sender<String>,
    channel_tx: mpsc::Sender<ChannelUpdate>,
    shutdown_tx: watch::Sender<bool>,
    teardown_rx: oneshot::Receiver<()>,
    task: tokio::task::JoinHandle<Result<(), SimDriverError>>,
}

impl SessionFixture {
    /// Spawn a runtime with the given configuration and classifier; the
    /// state stream starts at `initial`.
    pub fn spawn(
        config: SessionConfig,
        classifier: Arc<dyn AddressClassifier>,
        initial: SessionState,
    ) -> Self {
        let driver = SimDriver::new();
        let (state_tx, states) = watch::channel(initial);
        let (intent_tx, intents) = mpsc::channel(16);
        let (scan_tx, scans) = mpsc::channel(16);
        let (channel_tx, channels) = mpsc::channel(16);
        let (shutdown_tx, shutdown) = watch::channel(false);
        let (teardown_tx, teardown_rx) = oneshot::channel();

        let runtime = Runtime::new(
            driver.clone(),
            SimEnv::new(),
            classifier,
            config,
            SessionStreams { states, intents, scans, channels },
            shutdown,
            teardown_tx,
        );
        let task = tokio::spawn(runtime.run());

        Self {
            driver,
            state_tx,
            intent_tx,
            scan_tx,
            channel_tx,
            shutdown_tx,
            teardown_rx,
            task,
        }
    }

    /// Let the runtime drain everything currently pending.
    pub async fn settle(&self) {
        tokio::time::sleep(SETTLE).await;
    }

    /// Wait out `duration` on the (virtual) clock.
    pub async fn advance(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }

    /// Emit a session state and wait for it to be processed.
    pub async fn set_state(&self, state: SessionState) {
        let _ = self.state_tx.send(state);
        self.settle().await;
    }

    /// Submit a navigation intent and wait for it to be processed.
    pub async fn submit_intent(&self, intent: Intent) {
        let _ = self.intent_tx.send(intent).await;
        self.settle().await;
    }

    /// Report a scanned address and wait for it to be processed.
    pub async fn scan(&self, address: impl Into<String>) {
        let _ = self.scan_tx.send(address.into()).await;
        self.settle().await;
    }

    /// Emit a channel update and wait for it to be processed.
    pub async fn channel_update(&self, update: ChannelUpdate) {
        let _ = self.channel_tx.send(update).await;
        self.settle().await;
    }

    /// Signal shutdown and wait for the loop to wind down.
    pub async fn stop(&self) {
        let _ = self.shutdown_tx.send(true);
        self.settle().await;
    }

    /// Whether the teardown escalation has fired.
    pub fn teardown_fired(&mut self) -> bool {
        self.teardown_rx.try_recv().is_ok()
    }

    /// The recording driver.
    pub fn driver(&self) -> &SimDriver {
        &self.driver
    }

    /// All recorded driver calls, in order.
    pub fn calls(&self) -> Vec<DriverCall> {
        self.driver.calls()
    }

    /// Take the recorded driver calls, clearing the record.
    pub fn take_calls(&self) -> Vec<DriverCall> {
        self.driver.take_calls()
    }

    /// Wait for the runtime to finish and return its result.
    pub async fn join(self) -> Result<(), SimDriverError> {
        self.task.await.expect("runtime task panicked")
    }
}
