//! Coordinator side-effects.
//!
//! This module defines [`CoordAction`] and [`ReminderAction`], the
//! instructions produced by the state machines for the runtime to execute.
//! The machines themselves perform no I/O.

use filament_core::{ChannelId, ModalScreen, ReminderRequest, ScreenSelection};

/// Actions produced by the coordinator state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoordAction {
    /// Request a top-level screen from the presentation layer.
    Present(ScreenSelection),

    /// Present a modal over the current screen.
    PresentModal(ModalScreen),

    /// Start classifying an address. The runtime runs the classifier off the
    /// serialized loop and feeds the outcome back as
    /// [`crate::CoordEvent::ClassificationResolved`].
    Classify {
        /// Raw address or invoice string.
        address: String,
    },

    /// Surface a recoverable failure to the user.
    ShowError {
        /// Human-readable message.
        message: String,
    },

    /// Escalate fatal session state to the owner. Fired at most once per
    /// session.
    SignalTeardown,
}

/// Actions produced by the reminder scheduler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReminderAction {
    /// Schedule a reminder with the OS notification collaborator.
    Schedule(ReminderRequest),

    /// Cancel a previously scheduled reminder.
    Cancel {
        /// Channel the reminder belongs to.
        channel_id: ChannelId,
        /// Threshold that produced the reminder.
        days_remaining: u32,
    },
}
