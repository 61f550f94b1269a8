//! Integration tests for force-close reminder scheduling.

use std::{sync::Arc, time::Duration};

use filament_app::SessionConfig;
use filament_core::{
    ChannelId, ChannelUpdate, PaymentKind, ReminderConfiguration, ReminderThreshold, SessionHost,
    SessionState,
};
use filament_harness::{DriverCall, FixedClassifier, SessionFixture};

const TEN_MINUTES: Duration = Duration::from_secs(600);

fn thresholds() -> ReminderConfiguration {
    ReminderConfiguration::new(vec![
        ReminderThreshold {
            days_remaining: 2,
            title: "Channel closing".into(),
            body: "Two days until your channel can be force closed".into(),
        },
        ReminderThreshold {
            days_remaining: 1,
            title: "Channel closing".into(),
            body: "One day until your channel can be force closed".into(),
        },
        ReminderThreshold {
            days_remaining: 0,
            title: "Channel closing".into(),
            body: "Your channel can now be force closed".into(),
        },
    ])
    .unwrap()
}

fn local_with_reminders() -> SessionConfig {
    SessionConfig::new(SessionHost::Local)
        .with_block_interval(TEN_MINUTES)
        .with_reminders(thresholds())
}

fn classifier() -> Arc<FixedClassifier> {
    Arc::new(FixedClassifier::resolving(PaymentKind::Invoice { invoice: "lnbc1...".into() }))
}

fn inactive(csv_delay_blocks: u32) -> ChannelUpdate {
    ChannelUpdate { channel_id: ChannelId(7), is_active: false, csv_delay_blocks }
}

fn scheduled_days(calls: &[DriverCall]) -> Vec<u32> {
    calls
        .iter()
        .filter_map(|call| match call {
            DriverCall::Schedule(request) => Some(request.days_remaining),
            _ => None,
        })
        .collect()
}

#[tokio::test(start_paused = true)]
async fn countdown_schedules_thresholds_as_they_are_reached() {
    let session =
        SessionFixture::spawn(local_with_reminders(), classifier(), SessionState::Running);
    session.settle().await;

    // 300 blocks at 10 minutes ~ 2.08 days: only the 2-day threshold
    session.channel_update(inactive(300)).await;
    assert_eq!(scheduled_days(&session.calls()), vec![2]);

    // 200 blocks ~ 1.39 days: 1-day threshold fires, 2-day does not re-fire
    session.channel_update(inactive(200)).await;
    assert_eq!(scheduled_days(&session.calls()), vec![2, 1]);

    // Unchanged update is silent
    session.channel_update(inactive(200)).await;
    assert_eq!(scheduled_days(&session.calls()), vec![2, 1]);
}

#[tokio::test(start_paused = true)]
async fn reactivated_channel_cancels_and_rearms() {
    let session =
        SessionFixture::spawn(local_with_reminders(), classifier(), SessionState::Running);
    session.settle().await;

    session.channel_update(inactive(300)).await;
    session
        .channel_update(ChannelUpdate {
            channel_id: ChannelId(7),
            is_active: true,
            csv_delay_blocks: 300,
        })
        .await;

    assert!(
        session
            .calls()
            .contains(&DriverCall::Cancel { channel_id: ChannelId(7), days_remaining: 2 })
    );

    // Countdown restarts from a clean slate
    session.channel_update(inactive(300)).await;
    assert_eq!(scheduled_days(&session.calls()), vec![2, 2]);
}

#[tokio::test(start_paused = true)]
async fn remote_sessions_schedule_no_reminders() {
    let config = SessionConfig::new(SessionHost::Remote { host: "node.example:10009".into() })
        .with_block_interval(TEN_MINUTES)
        .with_reminders(thresholds());
    let session = SessionFixture::spawn(config, classifier(), SessionState::Running);
    session.settle().await;

    session.channel_update(inactive(100)).await;

    assert!(scheduled_days(&session.calls()).is_empty());
}

#[tokio::test(start_paused = true)]
async fn scheduling_failure_is_surfaced_and_not_fatal() {
    let session =
        SessionFixture::spawn(local_with_reminders(), classifier(), SessionState::Running);
    session.settle().await;
    session.driver().fail_scheduling(true);

    session.channel_update(inactive(300)).await;

    assert!(
        session
            .calls()
            .iter()
            .any(|call| matches!(call, DriverCall::ShowError(message) if message.contains("reminder")))
    );

    // The runtime keeps serving state transitions afterwards
    session.set_state(SessionState::Syncing).await;
    assert!(
        session
            .calls()
            .contains(&DriverCall::Present(filament_core::ScreenSelection::SyncProgress))
    );
}

#[tokio::test(start_paused = true)]
async fn delays_target_the_threshold_crossings() {
    let session =
        SessionFixture::spawn(local_with_reminders(), classifier(), SessionState::Running);
    session.settle().await;

    // 100 blocks * 600s = 60 000s ~ 0.69 days: every threshold is at or past
    session.channel_update(inactive(100)).await;

    let delays: Vec<(u32, Duration)> = session
        .calls()
        .iter()
        .filter_map(|call| match call {
            DriverCall::Schedule(request) => Some((request.days_remaining, request.delay)),
            _ => None,
        })
        .collect();
    assert_eq!(delays, vec![
        (2, Duration::ZERO),
        (1, Duration::ZERO),
        (0, Duration::from_secs(60_000)),
    ]);
}
