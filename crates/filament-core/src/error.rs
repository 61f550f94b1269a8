//! Error taxonomy for the session coordination layer.
//!
//! Two kinds of failure exist here and they never mix: recoverable-local
//! failures (classification, reminder configuration) are surfaced to the
//! user and leave the coordinator untouched; the fatal session failure is
//! not an error value at all but the `SessionState::Error` state, escalated
//! once through the teardown signal.

use std::time::Duration;

use thiserror::Error;

/// Failure to resolve a raw address string into a payment kind.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClassifyError {
    /// The address belongs to no supported payment form.
    #[error("unsupported address: {0}")]
    Unsupported(String),

    /// The address could not be parsed at all.
    #[error("malformed address: {0}")]
    Malformed(String),

    /// Classification did not finish within the caller's bound.
    #[error("address classification timed out after {elapsed:?}")]
    Timeout {
        /// How long we waited.
        elapsed: Duration,
    },
}

impl ClassifyError {
    /// Returns true if this failure is transient and the same input may
    /// succeed on retry.
    ///
    /// A timeout says nothing about the address; malformed or unsupported
    /// input will never classify differently.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

/// Invalid reminder configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReminderConfigError {
    /// Two thresholds share the same `days_remaining` value.
    #[error("duplicate reminder threshold for {days} days remaining")]
    DuplicateThreshold {
        /// The duplicated value.
        days: u32,
    },
}
