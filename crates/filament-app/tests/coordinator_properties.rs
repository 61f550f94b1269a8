//! Property-based tests for the coordinator state machine.
//!
//! Tests verify that invariants hold under arbitrary event sequences.
//! This ensures behavioral correctness across all possible execution paths.

use filament_app::{CoordAction, StateCoordinator};
use filament_core::{Intent, ScreenSelection, SessionHost, SessionState, screen_for};
use proptest::prelude::*;

/// Generate random session states, fatal state underweighted.
fn state_strategy() -> impl Strategy<Value = SessionState> {
    prop_oneof![
        3 => Just(SessionState::Connecting),
        3 => Just(SessionState::Syncing),
        3 => Just(SessionState::Running),
        3 => Just(SessionState::Locked),
        1 => Just(SessionState::Error),
    ]
}

/// Reference model: consecutive-duplicate removal, cut at the first fatal
/// state, mapped through the pure screen function.
fn expected_screens(states: &[SessionState], host: &SessionHost) -> Vec<ScreenSelection> {
    let mut last = None;
    let mut screens = Vec::new();
    for &state in states {
        if last == Some(state) {
            continue;
        }
        last = Some(state);
        if state.is_terminal() {
            break;
        }
        if let Some(screen) = screen_for(state, host, false) {
            screens.push(screen);
        }
    }
    screens
}

fn presented(actions: &[CoordAction]) -> Vec<ScreenSelection> {
    actions
        .iter()
        .filter_map(|action| match action {
            CoordAction::Present(screen) => Some(screen.clone()),
            _ => None,
        })
        .collect()
}

proptest! {
    #[test]
    fn prop_screen_sequence_matches_pure_mapping(
        states in prop::collection::vec(state_strategy(), 0..50),
        remote in any::<bool>(),
    ) {
        let host = if remote {
            SessionHost::Remote { host: "node.example:10009".into() }
        } else {
            SessionHost::Local
        };
        let mut coordinator = StateCoordinator::new(host.clone());

        let mut screens = Vec::new();
        let mut teardowns = 0usize;
        for &state in &states {
            let actions = coordinator.observe_state(state);
            screens.extend(presented(&actions));
            teardowns +=
                actions.iter().filter(|a| matches!(a, CoordAction::SignalTeardown)).count();
        }

        prop_assert_eq!(screens, expected_screens(&states, &host));

        let saw_fatal = states.contains(&SessionState::Error);
        prop_assert_eq!(teardowns, usize::from(saw_fatal));
    }

    #[test]
    fn prop_deferred_intent_replays_at_most_once(
        prefix in prop::collection::vec(state_strategy(), 0..10),
        suffix in prop::collection::vec(state_strategy(), 0..20),
    ) {
        // Keep the prefix non-fatal so the intent is actually accepted
        let prefix: Vec<SessionState> =
            prefix.into_iter().filter(|s| !s.is_terminal()).collect();

        let mut coordinator = StateCoordinator::new(SessionHost::Local);
        let mut last = None;
        for &state in &prefix {
            let _ = coordinator.observe_state(state);
            last = Some(state);
        }

        let mut executed = 0usize;
        let actions = coordinator.handle_intent(Intent::RequestPayment);
        executed += request_modals(&actions);

        // Reference model of the replay gate over the suffix
        let mut expected = executed;
        let mut pending = executed == 0;
        let mut model_last = last;
        for &state in &suffix {
            let actions = coordinator.observe_state(state);
            executed += request_modals(&actions);

            if model_last == Some(state) {
                continue;
            }
            model_last = Some(state);
            if state.is_terminal() {
                break;
            }
            if state == SessionState::Running && pending {
                expected += 1;
                pending = false;
            }
        }

        prop_assert!(executed <= 1);
        prop_assert_eq!(executed, expected);
    }

    #[test]
    fn prop_scan_gate_matches_immediate_repeat_rule(
        scans in prop::collection::vec("[abc]", 0..40),
    ) {
        let mut coordinator = StateCoordinator::new(SessionHost::Local);
        let _ = coordinator.observe_state(SessionState::Running);

        let mut last_accepted: Option<String> = None;
        for address in scans {
            let actions = coordinator.observe_scan(address.clone());
            let accepted = !actions.is_empty();

            let expected = last_accepted.as_deref() != Some(address.as_str());
            prop_assert_eq!(accepted, expected);
            if expected {
                last_accepted = Some(address);
            }
        }
    }
}

fn request_modals(actions: &[CoordAction]) -> usize {
    actions
        .iter()
        .filter(|action| {
            matches!(
                action,
                CoordAction::PresentModal(filament_core::ModalScreen::RequestPayment)
            )
        })
        .count()
}
