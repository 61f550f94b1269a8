//! Force-close expiry reminders.
//!
//! When a channel leaves the active set its dispute window starts counting
//! down: `csv_delay_blocks` worth of blocks until the remote side may
//! force-close unilaterally. The scheduler converts that countdown into
//! local reminders at configured remaining-days thresholds.

use std::{
    collections::{BTreeSet, HashMap},
    time::Duration,
};

use filament_core::{ChannelId, ChannelUpdate, ReminderConfiguration, ReminderRequest};

use crate::action::ReminderAction;

const SECONDS_PER_DAY: u64 = 86_400;

/// Schedules and cancels force-close reminders per channel.
///
/// Each `(channel, days_remaining)` pair fires at most once per arming
/// cycle; a channel returning to the active set clears its fired set so the
/// countdown can re-arm after e.g. dispute resolution.
///
/// Only constructed for locally-hosted sessions: a remote node keeps
/// watching the chain while the app is gone, so it needs no reminders.
#[derive(Debug)]
pub struct ReminderScheduler {
    configuration: ReminderConfiguration,
    fired: HashMap<ChannelId, BTreeSet<u32>>,
}

impl ReminderScheduler {
    /// Create a scheduler for the given thresholds.
    pub fn new(configuration: ReminderConfiguration) -> Self {
        Self { configuration, fired: HashMap::new() }
    }

    /// Process one channel update.
    ///
    /// For an inactive channel, computes the time until force-close
    /// eligibility (`csv_delay_blocks * block_interval`) and emits a
    /// [`ReminderAction::Schedule`] for every configured threshold at or
    /// above the current remaining-days value that has not yet fired for
    /// this channel. The delivery delay places the reminder at the moment
    /// the countdown reaches the threshold; a threshold already passed
    /// schedules immediately.
    ///
    /// For an active channel, clears the fired set and cancels everything
    /// previously scheduled, re-arming the thresholds.
    ///
    /// Re-observing an unchanged update emits nothing.
    pub fn observe(
        &mut self,
        update: &ChannelUpdate,
        block_interval: Duration,
    ) -> Vec<ReminderAction> {
        if update.is_active {
            return self.rearm(update.channel_id);
        }

        let time_left = block_interval * update.csv_delay_blocks;
        let days_left = (time_left.as_secs() / SECONDS_PER_DAY) as u32;
        tracing::debug!(channel = %update.channel_id, days_left, "force-close countdown observed");

        let fired = self.fired.entry(update.channel_id).or_default();
        let mut actions = Vec::new();
        for threshold in self.configuration.thresholds() {
            if threshold.days_remaining < days_left {
                // Thresholds are sorted descending; the rest are further out
                break;
            }
            if !fired.insert(threshold.days_remaining) {
                continue;
            }
            let delay = time_left
                .saturating_sub(Duration::from_secs(
                    u64::from(threshold.days_remaining) * SECONDS_PER_DAY,
                ));
            actions.push(ReminderAction::Schedule(ReminderRequest {
                channel_id: update.channel_id,
                days_remaining: threshold.days_remaining,
                title: threshold.title.clone(),
                body: threshold.body.clone(),
                delay,
            }));
        }
        actions
    }

    /// Clear the fired set for a reactivated channel and cancel its
    /// scheduled reminders.
    fn rearm(&mut self, channel_id: ChannelId) -> Vec<ReminderAction> {
        let Some(fired) = self.fired.remove(&channel_id) else {
            return Vec::new();
        };
        tracing::debug!(channel = %channel_id, "channel active again, re-arming reminders");
        fired
            .into_iter()
            .map(|days_remaining| ReminderAction::Cancel { channel_id, days_remaining })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use filament_core::ReminderThreshold;

    use super::*;

    const TEN_MINUTES: Duration = Duration::from_secs(600);

    fn threshold(days: u32) -> ReminderThreshold {
        ReminderThreshold {
            days_remaining: days,
            title: format!("{days} days left"),
            body: "your channel is closing".into(),
        }
    }

    fn scheduler() -> ReminderScheduler {
        let config =
            ReminderConfiguration::new(vec![threshold(2), threshold(1), threshold(0)]).unwrap();
        ReminderScheduler::new(config)
    }

    fn inactive(csv_delay_blocks: u32) -> ChannelUpdate {
        ChannelUpdate { channel_id: ChannelId(7), is_active: false, csv_delay_blocks }
    }

    fn scheduled_days(actions: &[ReminderAction]) -> Vec<u32> {
        actions
            .iter()
            .filter_map(|action| match action {
                ReminderAction::Schedule(request) => Some(request.days_remaining),
                ReminderAction::Cancel { .. } => None,
            })
            .collect()
    }

    #[test]
    fn schedules_only_the_reached_threshold() {
        let mut scheduler = scheduler();

        // 2 days = 288 blocks at 10 minutes; 300 blocks ~ 2.08 days
        let actions = scheduler.observe(&inactive(300), TEN_MINUTES);

        assert_eq!(scheduled_days(&actions), vec![2]);
    }

    #[test]
    fn later_update_fires_next_threshold_without_refiring() {
        let mut scheduler = scheduler();
        let _ = scheduler.observe(&inactive(300), TEN_MINUTES);

        // 200 blocks ~ 1.39 days: threshold 2 already fired, threshold 1 new
        let actions = scheduler.observe(&inactive(200), TEN_MINUTES);

        assert_eq!(scheduled_days(&actions), vec![1]);
    }

    #[test]
    fn repeated_update_is_silent() {
        let mut scheduler = scheduler();
        let _ = scheduler.observe(&inactive(300), TEN_MINUTES);

        assert!(scheduler.observe(&inactive(300), TEN_MINUTES).is_empty());
    }

    #[test]
    fn delay_targets_the_threshold_crossing() {
        let mut scheduler = scheduler();

        let actions = scheduler.observe(&inactive(300), TEN_MINUTES);

        let [ReminderAction::Schedule(request)] = actions.as_slice() else {
            panic!("expected one schedule action, got {actions:?}");
        };
        // 300 blocks * 600s = 180_000s; threshold at 2 days = 172_800s
        assert_eq!(request.delay, Duration::from_secs(7_200));
    }

    #[test]
    fn passed_threshold_schedules_immediately() {
        let mut scheduler = scheduler();

        // 100 blocks ~ 0.69 days: thresholds 2, 1 and 0 are all at or past
        let actions = scheduler.observe(&inactive(100), TEN_MINUTES);

        assert_eq!(scheduled_days(&actions), vec![2, 1, 0]);
        let delays: Vec<Duration> = actions
            .iter()
            .filter_map(|action| match action {
                ReminderAction::Schedule(request) => Some(request.delay),
                ReminderAction::Cancel { .. } => None,
            })
            .collect();
        assert_eq!(delays[0], Duration::ZERO);
        assert_eq!(delays[1], Duration::ZERO);
        assert_eq!(delays[2], Duration::from_secs(60_000));
    }

    #[test]
    fn reactivation_cancels_and_rearms() {
        let mut scheduler = scheduler();
        let _ = scheduler.observe(&inactive(300), TEN_MINUTES);

        let active = ChannelUpdate { channel_id: ChannelId(7), is_active: true, csv_delay_blocks: 300 };
        let cancellations = scheduler.observe(&active, TEN_MINUTES);
        assert_eq!(
            cancellations,
            vec![ReminderAction::Cancel { channel_id: ChannelId(7), days_remaining: 2 }]
        );

        // Countdown restarts from a clean slate
        let actions = scheduler.observe(&inactive(300), TEN_MINUTES);
        assert_eq!(scheduled_days(&actions), vec![2]);
    }

    #[test]
    fn reactivation_of_untracked_channel_is_silent() {
        let mut scheduler = scheduler();

        let active = ChannelUpdate { channel_id: ChannelId(9), is_active: true, csv_delay_blocks: 144 };
        assert!(scheduler.observe(&active, TEN_MINUTES).is_empty());
    }

    #[test]
    fn channels_are_tracked_independently() {
        let mut scheduler = scheduler();
        let _ = scheduler.observe(&inactive(300), TEN_MINUTES);

        let other = ChannelUpdate { channel_id: ChannelId(8), is_active: false, csv_delay_blocks: 300 };
        let actions = scheduler.observe(&other, TEN_MINUTES);

        assert_eq!(scheduled_days(&actions), vec![2]);
    }
}
