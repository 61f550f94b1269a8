//! Payment channel snapshots and reminder configuration.

use std::{fmt, time::Duration};

use serde::{Deserialize, Serialize};

use crate::error::ReminderConfigError;

/// Stable identifier of a backend-managed payment channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ChannelId(pub u64);

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "channel-{}", self.0)
    }
}

/// Emitted whenever the backend's channel set changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelUpdate {
    /// Which channel changed.
    pub channel_id: ChannelId,
    /// `false` while a force close is pending and the dispute window counts
    /// down.
    pub is_active: bool,
    /// Dispute delay of the channel, in blocks.
    pub csv_delay_blocks: u32,
}

/// One reminder threshold: fire when this many days remain until the
/// channel's force-close window elapses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderThreshold {
    /// Remaining days at which the reminder is delivered.
    pub days_remaining: u32,
    /// Notification title.
    pub title: String,
    /// Notification body.
    pub body: String,
}

/// Ordered set of reminder thresholds, fixed at scheduler construction.
///
/// Thresholds are kept sorted by descending `days_remaining`, so a shrinking
/// countdown crosses them in iteration order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReminderConfiguration {
    thresholds: Vec<ReminderThreshold>,
}

impl ReminderConfiguration {
    /// Build a configuration from thresholds with distinct `days_remaining`
    /// values.
    pub fn new(mut thresholds: Vec<ReminderThreshold>) -> Result<Self, ReminderConfigError> {
        thresholds.sort_by(|a, b| b.days_remaining.cmp(&a.days_remaining));
        for pair in thresholds.windows(2) {
            if pair[0].days_remaining == pair[1].days_remaining {
                return Err(ReminderConfigError::DuplicateThreshold {
                    days: pair[0].days_remaining,
                });
            }
        }
        Ok(Self { thresholds })
    }

    /// Thresholds in descending `days_remaining` order.
    pub fn thresholds(&self) -> &[ReminderThreshold] {
        &self.thresholds
    }

    /// Whether no thresholds are configured.
    pub fn is_empty(&self) -> bool {
        self.thresholds.is_empty()
    }
}

/// A reminder to be scheduled with the OS notification collaborator.
///
/// `(channel_id, days_remaining)` identifies the reminder; scheduling the
/// same pair twice before delivery must not produce duplicate deliveries,
/// and cancellation uses the same pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderRequest {
    /// Channel the reminder belongs to.
    pub channel_id: ChannelId,
    /// Threshold that produced the reminder.
    pub days_remaining: u32,
    /// Notification title.
    pub title: String,
    /// Notification body.
    pub body: String,
    /// Delivery delay from now. Zero means deliver immediately.
    pub delay: Duration,
}
