//! Simulation driver implementing the Driver trait.
//!
//! `SimDriver` records every presentation and notification call so tests
//! can assert on the exact sequence of driver effects. It implements
//! [`Driver`] so the same [`filament_app::Runtime`] orchestration code runs
//! in both production and simulation.

#![allow(clippy::disallowed_types, reason = "Synchronous locking operations only")]

use std::sync::{Arc, Mutex};

use filament_app::Driver;
use filament_core::{ChannelId, ModalScreen, ReminderRequest, ScreenSelection};

/// Error type for simulation driver.
#[derive(Debug, Clone)]
pub struct SimDriverError(pub String);

impl std::fmt::Display for SimDriverError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SimDriverError: {}", self.0)
    }
}

impl std::error::Error for SimDriverError {}

/// One recorded driver effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriverCall {
    /// A top-level screen was requested.
    Present(ScreenSelection),
    /// A modal was presented.
    PresentModal(ModalScreen),
    /// A recoverable failure was surfaced.
    ShowError(String),
    /// A reminder was scheduled.
    Schedule(ReminderRequest),
    /// A reminder was cancelled.
    Cancel {
        /// Channel the reminder belonged to.
        channel_id: ChannelId,
        /// Threshold that produced the reminder.
        days_remaining: u32,
    },
}

/// Shared recording state. Cloned handles observe the same record.
#[derive(Debug, Default)]
struct SharedState {
    calls: Vec<DriverCall>,
    fail_scheduling: bool,
    stopped: bool,
}

/// Simulation driver for deterministic testing.
///
/// Clone the driver before handing it to the runtime; both clones observe
/// the same call record.
#[derive(Debug, Clone, Default)]
pub struct SimDriver {
    state: Arc<Mutex<SharedState>>,
}

impl SimDriver {
    /// Create a new simulation driver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make all subsequent `schedule_reminder` calls fail.
    pub fn fail_scheduling(&self, fail: bool) {
        self.state.lock().unwrap().fail_scheduling = fail;
    }

    /// All recorded calls, in order.
    pub fn calls(&self) -> Vec<DriverCall> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Take the recorded calls, clearing the record.
    pub fn take_calls(&self) -> Vec<DriverCall> {
        std::mem::take(&mut self.state.lock().unwrap().calls)
    }

    /// All recorded top-level screen requests, in order.
    pub fn screens(&self) -> Vec<ScreenSelection> {
        self.state
            .lock()
            .unwrap()
            .calls
            .iter()
            .filter_map(|call| match call {
                DriverCall::Present(screen) => Some(screen.clone()),
                _ => None,
            })
            .collect()
    }

    /// Whether the runtime released the driver.
    pub fn is_stopped(&self) -> bool {
        self.state.lock().unwrap().stopped
    }

    fn record(&self, call: DriverCall) {
        self.state.lock().unwrap().calls.push(call);
    }
}

impl Driver for SimDriver {
    type Error = SimDriverError;

    fn present(&mut self, screen: &ScreenSelection) -> Result<(), Self::Error> {
        self.record(DriverCall::Present(screen.clone()));
        Ok(())
    }

    fn present_modal(&mut self, modal: &ModalScreen) -> Result<(), Self::Error> {
        self.record(DriverCall::PresentModal(modal.clone()));
        Ok(())
    }

    fn show_error(&mut self, message: &str) -> Result<(), Self::Error> {
        self.record(DriverCall::ShowError(message.to_owned()));
        Ok(())
    }

    async fn schedule_reminder(&mut self, request: &ReminderRequest) -> Result<(), Self::Error> {
        if self.state.lock().unwrap().fail_scheduling {
            return Err(SimDriverError("notification permission denied".into()));
        }
        self.record(DriverCall::Schedule(request.clone()));
        Ok(())
    }

    async fn cancel_reminder(
        &mut self,
        channel_id: ChannelId,
        days_remaining: u32,
    ) -> Result<(), Self::Error> {
        self.record(DriverCall::Cancel { channel_id, days_remaining });
        Ok(())
    }

    fn stop(&mut self) {
        self.state.lock().unwrap().stopped = true;
    }
}
