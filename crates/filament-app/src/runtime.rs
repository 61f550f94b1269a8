//! Generic runtime for session orchestration.
//!
//! The Runtime drives the session event loop, coordinating between:
//! - [`StateCoordinator`]: screen-selection and intent state machine
//! - [`ReminderScheduler`]: force-close reminders (local sessions only)
//! - [`Driver`]: platform-specific presentation and notification I/O
//!
//! All inputs are serialized onto one task; concurrent delivery from the
//! connectivity subsystem is the boundary adapter's problem, solved by
//! marshaling events into the channels of [`SessionStreams`]. The only
//! suspension point is address classification, which runs on a spawned task
//! and re-enters the loop as a tagged completion so that a slow classifier
//! never blocks state transitions.

use std::{sync::Arc, time::Duration};

use filament_core::{
    AddressClassifier, ChannelUpdate, ClassifyError, Environment, Intent, PaymentKind,
    ReminderConfiguration, SessionHost, SessionState,
};
use tokio::sync::{mpsc, oneshot, watch};

use crate::{CoordAction, CoordEvent, Driver, ReminderAction, ReminderScheduler, StateCoordinator};

/// Default average block interval used for countdown arithmetic.
pub const DEFAULT_BLOCK_INTERVAL: Duration = Duration::from_secs(600);

/// Default bound on one address classification.
pub const DEFAULT_CLASSIFY_TIMEOUT: Duration = Duration::from_secs(10);

/// Per-session configuration, passed in at construction.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Where the session's node runs.
    pub host: SessionHost,
    /// Average block interval for force-close countdown arithmetic.
    pub block_interval: Duration,
    /// Bound on one address classification; exceeding it counts as a
    /// resolution failure.
    pub classify_timeout: Duration,
    /// Reminder thresholds. Only used for locally-hosted sessions.
    pub reminders: ReminderConfiguration,
}

impl SessionConfig {
    /// Configuration with defaults for a session hosted at `host`.
    pub fn new(host: SessionHost) -> Self {
        Self {
            host,
            block_interval: DEFAULT_BLOCK_INTERVAL,
            classify_timeout: DEFAULT_CLASSIFY_TIMEOUT,
            reminders: ReminderConfiguration::default(),
        }
    }

    /// Override the average block interval.
    #[must_use]
    pub fn with_block_interval(mut self, block_interval: Duration) -> Self {
        self.block_interval = block_interval;
        self
    }

    /// Override the classification bound.
    #[must_use]
    pub fn with_classify_timeout(mut self, classify_timeout: Duration) -> Self {
        self.classify_timeout = classify_timeout;
        self
    }

    /// Set the reminder thresholds.
    #[must_use]
    pub fn with_reminders(mut self, reminders: ReminderConfiguration) -> Self {
        self.reminders = reminders;
        self
    }
}

/// Input streams of one session, marshaled by the boundary adapter.
#[derive(Debug)]
pub struct SessionStreams {
    /// Session state stream. Replay-latest: the value current at
    /// subscription time is delivered first, exactly once.
    pub states: watch::Receiver<SessionState>,
    /// Externally parsed navigation intents.
    pub intents: mpsc::Receiver<Intent>,
    /// Addresses resolved by scanner screens.
    pub scans: mpsc::Receiver<String>,
    /// Channel set changes from the backend.
    pub channels: mpsc::Receiver<ChannelUpdate>,
}

/// Completion of a spawned classification, tagged so superseded results can
/// be discarded.
#[derive(Debug)]
struct ClassificationOutcome {
    generation: u64,
    result: Result<PaymentKind, ClassifyError>,
}

/// Generic runtime that orchestrates the session state machines and a
/// Driver.
///
/// # Type Parameters
///
/// - `D`: Platform-specific I/O driver
/// - `E`: Environment for time
pub struct Runtime<D, E>
where
    D: Driver,
    E: Environment,
{
    driver: D,
    env: E,
    classifier: Arc<dyn AddressClassifier>,
    coordinator: StateCoordinator,
    reminders: Option<ReminderScheduler>,
    block_interval: Duration,
    classify_timeout: Duration,
    streams: SessionStreams,
    shutdown: watch::Receiver<bool>,
    teardown: Option<oneshot::Sender<()>>,
    outcome_tx: mpsc::Sender<ClassificationOutcome>,
    outcome_rx: mpsc::Receiver<ClassificationOutcome>,
    generation: u64,
    in_flight: Option<tokio::task::JoinHandle<()>>,
}

impl<D, E> Runtime<D, E>
where
    D: Driver,
    E: Environment,
{
    /// Create a runtime for one session.
    ///
    /// `teardown` is the owner's escalation callback: it fires at most once,
    /// on fatal session state. `shutdown` is the owner's stop signal;
    /// flipping it to `true` is idempotent and guarantees no further
    /// screen-selection requests, including from classifications still in
    /// flight.
    pub fn new(
        driver: D,
        env: E,
        classifier: Arc<dyn AddressClassifier>,
        config: SessionConfig,
        streams: SessionStreams,
        shutdown: watch::Receiver<bool>,
        teardown: oneshot::Sender<()>,
    ) -> Self {
        let SessionConfig { host, block_interval, classify_timeout, reminders } = config;
        let reminders = match &host {
            SessionHost::Local if !reminders.is_empty() => {
                Some(ReminderScheduler::new(reminders))
            },
            SessionHost::Remote { .. } if !reminders.is_empty() => {
                // A remote node keeps watching the chain without us
                tracing::debug!("remotely-hosted session, reminder thresholds unused");
                None
            },
            _ => None,
        };
        let coordinator = StateCoordinator::new(host);
        let (outcome_tx, outcome_rx) = mpsc::channel(8);
        Self {
            driver,
            env,
            classifier,
            coordinator,
            reminders,
            block_interval,
            classify_timeout,
            streams,
            shutdown,
            teardown: Some(teardown),
            outcome_tx,
            outcome_rx,
            generation: 0,
            in_flight: None,
        }
    }

    /// Run the session event loop until shutdown, teardown, or the end of
    /// the state stream.
    ///
    /// The state stream's current value is evaluated immediately; the
    /// corresponding screen selection is issued before any other event is
    /// processed.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver loses the presentation layer.
    pub async fn run(mut self) -> Result<(), D::Error> {
        let result = self.run_inner().await;
        self.finish();
        result
    }

    async fn run_inner(&mut self) -> Result<(), D::Error> {
        let initial = *self.streams.states.borrow_and_update();
        tracing::info!(state = ?initial, "session runtime started");
        let actions = self.coordinator.handle(CoordEvent::StateChanged(initial));
        let mut done = self.process(actions).await?;

        while !done {
            done = self.step().await?;
        }
        Ok(())
    }

    /// Process one event from whichever input is ready.
    ///
    /// Returns `true` when the loop should end.
    async fn step(&mut self) -> Result<bool, D::Error> {
        tokio::select! {
            changed = self.streams.states.changed() => match changed {
                Ok(()) => {
                    let state = *self.streams.states.borrow_and_update();
                    let actions = self.coordinator.handle(CoordEvent::StateChanged(state));
                    self.process(actions).await
                },
                Err(_) => {
                    tracing::debug!("state stream ended");
                    Ok(true)
                },
            },
            Some(intent) = self.streams.intents.recv() => {
                let actions = self.coordinator.handle(CoordEvent::IntentSubmitted(intent));
                self.process(actions).await
            },
            Some(address) = self.streams.scans.recv() => {
                let actions = self.coordinator.handle(CoordEvent::AddressScanned(address));
                self.process(actions).await
            },
            Some(update) = self.streams.channels.recv() => {
                self.observe_channels(&update).await
            },
            Some(outcome) = self.outcome_rx.recv() => {
                if outcome.generation == self.generation {
                    self.in_flight = None;
                    let actions = self
                        .coordinator
                        .handle(CoordEvent::ClassificationResolved(outcome.result));
                    self.process(actions).await
                } else {
                    tracing::debug!(
                        generation = outcome.generation,
                        "discarded superseded classification"
                    );
                    Ok(false)
                }
            },
            changed = self.shutdown.changed() => match changed {
                Ok(()) if !*self.shutdown.borrow() => Ok(false),
                _ => {
                    tracing::info!("session runtime stopping");
                    Ok(true)
                },
            },
        }
    }

    /// Execute coordinator actions through the driver.
    ///
    /// Returns `true` when teardown was escalated and the loop should end.
    async fn process(&mut self, actions: Vec<CoordAction>) -> Result<bool, D::Error> {
        for action in actions {
            match action {
                CoordAction::Present(screen) => {
                    tracing::info!(?screen, "presenting screen");
                    self.driver.present(&screen)?;
                },
                CoordAction::PresentModal(modal) => {
                    tracing::info!(?modal, "presenting modal");
                    self.driver.present_modal(&modal)?;
                },
                CoordAction::ShowError { message } => {
                    self.driver.show_error(&message)?;
                },
                CoordAction::Classify { address } => self.begin_classification(address),
                CoordAction::SignalTeardown => {
                    if let Some(teardown) = self.teardown.take() {
                        tracing::info!("escalating session teardown");
                        let _ = teardown.send(());
                    }
                    return Ok(true);
                },
            }
        }
        Ok(false)
    }

    /// Spawn a bounded classification off the serialized loop.
    ///
    /// A newer classification supersedes an in-flight one, mirroring the
    /// last-write-wins pending-intent slot: the old task is aborted and its
    /// completion, should it still arrive, carries a stale generation.
    fn begin_classification(&mut self, address: String) {
        self.generation += 1;
        let generation = self.generation;
        if let Some(task) = self.in_flight.take() {
            tracing::debug!("superseding in-flight classification");
            task.abort();
        }

        let classifier = Arc::clone(&self.classifier);
        let env = self.env.clone();
        let timeout = self.classify_timeout;
        let outcome_tx = self.outcome_tx.clone();
        self.in_flight = Some(tokio::spawn(async move {
            let started = env.now();
            let result = tokio::select! {
                outcome = classifier.classify(&address) => outcome,
                () = env.sleep(timeout) => Err(ClassifyError::Timeout { elapsed: timeout }),
            };
            tracing::debug!(
                elapsed = ?(env.now() - started),
                ok = result.is_ok(),
                "classification finished"
            );
            if outcome_tx.send(ClassificationOutcome { generation, result }).await.is_err() {
                tracing::debug!("runtime ended before classification completed");
            }
        }));
    }

    /// Feed a channel update to the reminder scheduler and execute the
    /// resulting notification requests.
    ///
    /// Scheduling failures are recoverable-local: surfaced, never fatal.
    async fn observe_channels(&mut self, update: &ChannelUpdate) -> Result<bool, D::Error> {
        let Some(scheduler) = self.reminders.as_mut() else {
            tracing::debug!("channel update ignored, session has no reminder scheduler");
            return Ok(false);
        };
        let actions = scheduler.observe(update, self.block_interval);
        for action in actions {
            match action {
                ReminderAction::Schedule(request) => {
                    tracing::info!(
                        channel = %request.channel_id,
                        days = request.days_remaining,
                        "scheduling force-close reminder"
                    );
                    if let Err(error) = self.driver.schedule_reminder(&request).await {
                        tracing::warn!(
                            %error,
                            channel = %request.channel_id,
                            "failed to schedule reminder"
                        );
                        self.driver
                            .show_error(&format!("could not schedule reminder: {error}"))?;
                    }
                },
                ReminderAction::Cancel { channel_id, days_remaining } => {
                    if let Err(error) =
                        self.driver.cancel_reminder(channel_id, days_remaining).await
                    {
                        tracing::warn!(%error, %channel_id, "failed to cancel reminder");
                    }
                },
            }
        }
        Ok(false)
    }

    /// Stop the coordinator, abort any in-flight classification, and
    /// release the driver.
    fn finish(&mut self) {
        self.coordinator.stop();
        if let Some(task) = self.in_flight.take() {
            tracing::debug!("aborting in-flight classification");
            task.abort();
        }
        self.driver.stop();
    }

    /// Get a reference to the coordinator state machine.
    pub fn coordinator(&self) -> &StateCoordinator {
        &self.coordinator
    }
}
