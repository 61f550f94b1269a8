//! Driver trait for abstracting presentation and notification I/O.
//!
//! The [`Driver`] trait decouples the session runtime from specific
//! platform implementations. Each frontend implements the trait to provide
//! platform-specific I/O, while the generic [`crate::Runtime`] handles all
//! orchestration.

use std::future::Future;

use filament_core::{ChannelId, ModalScreen, ReminderRequest, ScreenSelection};

/// Abstracts presentation and notification I/O for the session runtime.
///
/// Implementations provide platform-specific I/O while the generic
/// [`Runtime`](crate::Runtime) handles orchestration logic. This ensures
/// the same orchestration code runs in production and in simulation.
///
/// Screen and modal presentation are synchronous marshaling calls into the
/// presentation layer; reminder scheduling talks to the OS notification
/// collaborator and may suspend. Both reminder methods are idempotent per
/// `(channel, days_remaining)`: scheduling the same reminder twice before
/// delivery must not produce duplicate deliveries, and cancelling an
/// unknown reminder is a no-op.
pub trait Driver: Send {
    /// Platform-specific error type.
    type Error: std::error::Error + Send + 'static;

    /// Request a top-level screen from the presentation layer.
    ///
    /// # Errors
    ///
    /// Returns an error if the presentation layer is gone; this ends the
    /// session runtime.
    fn present(&mut self, screen: &ScreenSelection) -> Result<(), Self::Error>;

    /// Present a modal over the current top-level screen.
    ///
    /// # Errors
    ///
    /// Returns an error if the presentation layer is gone.
    fn present_modal(&mut self, modal: &ModalScreen) -> Result<(), Self::Error>;

    /// Surface a recoverable failure as a user-visible message.
    ///
    /// # Errors
    ///
    /// Returns an error if the presentation layer is gone.
    fn show_error(&mut self, message: &str) -> Result<(), Self::Error>;

    /// Schedule a reminder with the OS notification collaborator.
    ///
    /// # Errors
    ///
    /// A failure here is recoverable-local: the runtime surfaces it and
    /// keeps going.
    fn schedule_reminder(
        &mut self,
        request: &ReminderRequest,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Cancel a previously scheduled reminder.
    ///
    /// # Errors
    ///
    /// A failure here is recoverable-local.
    fn cancel_reminder(
        &mut self,
        channel_id: ChannelId,
        days_remaining: u32,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Release platform resources. Called once when the runtime ends.
    fn stop(&mut self);
}
