// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::outcome::Outcome;
use chrono::TimeZone;

fn at(hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, hour, 0, 0).unwrap()
}

#[test]
fn status_update_overwrites_lifecycle_fields() {
    let mut snapshot = StatusSnapshot::default();
    snapshot.apply(&Event::StatusUpdate {
        bot_state: BotState::Waiting,
        credential_count: 2,
        next_cycle_at: Some(at(8)),
    });
    snapshot.apply(&Event::StatusUpdate {
        bot_state: BotState::Idle,
        credential_count: 2,
        next_cycle_at: None,
    });

    assert_eq!(snapshot.bot_state, BotState::Idle);
    assert_eq!(snapshot.credential_count, 2);
    assert_eq!(snapshot.next_cycle_at, None);
}

#[test]
fn credential_status_sets_state_and_mask() {
    let mut snapshot = StatusSnapshot::default();
    snapshot.apply(&Event::CredentialStatus {
        index: 1,
        masked_identifier: "abcdef…wxyz".to_string(),
        state: CredentialState::Valid,
    });

    let view = &snapshot.per_credential[&1];
    assert_eq!(view.state, CredentialState::Valid);
    assert_eq!(view.masked_identifier.as_deref(), Some("abcdef…wxyz"));
    assert!(view.last_result.is_none());
}

#[test]
fn checkin_result_records_outcome() {
    let mut snapshot = StatusSnapshot::default();
    snapshot.apply(&Event::attempted(0, &Outcome::rewarded(10)));

    let view = &snapshot.per_credential[&0];
    assert_eq!(view.state, CredentialState::Valid);
    let result = view.last_result.as_ref().unwrap();
    assert!(result.accepted);
    assert_eq!(result.reward_amount, 10);
    assert!(!result.skipped);
}

#[test]
fn skipped_result_marks_credential_unusable() {
    let mut snapshot = StatusSnapshot::default();
    snapshot.apply(&Event::skipped(0, CredentialState::Expired));
    snapshot.apply(&Event::skipped(1, CredentialState::Invalid));

    assert_eq!(snapshot.per_credential[&0].state, CredentialState::Expired);
    assert_eq!(snapshot.per_credential[&1].state, CredentialState::Invalid);
}

#[test]
fn skipped_state_comes_from_the_event_not_its_wording() {
    let mut snapshot = StatusSnapshot::default();
    snapshot.apply(&Event::CheckinResult {
        index: 0,
        accepted: false,
        detail: "token refused before sending".to_string(),
        reward_amount: 0,
        already_done: false,
        skipped: true,
        credential_state: CredentialState::Expired,
    });

    let view = &snapshot.per_credential[&0];
    assert_eq!(view.state, CredentialState::Expired);
    assert_eq!(
        view.last_result.as_ref().unwrap().detail,
        "token refused before sending"
    );
}

#[test]
fn cycle_complete_counts_cycles() {
    let mut snapshot = StatusSnapshot::default();
    let summary = CycleSummary {
        total: 1,
        accepted: 1,
        reward_total: 5,
        ..Default::default()
    };
    snapshot.apply(&Event::CycleComplete {
        summary: summary.clone(),
    });
    snapshot.apply(&Event::CycleComplete {
        summary: summary.clone(),
    });

    assert_eq!(snapshot.cycles_completed, 2);
    assert_eq!(snapshot.last_cycle, Some(summary));
}

#[test]
fn log_events_leave_snapshot_untouched() {
    let mut snapshot = StatusSnapshot::default();
    snapshot.apply(&Event::warn("noise"));
    assert_eq!(snapshot, StatusSnapshot::default());
}

#[test]
fn time_until_next_cycle_clamps_at_zero() {
    let snapshot = StatusSnapshot {
        next_cycle_at: Some(at(8)),
        ..Default::default()
    };
    assert_eq!(
        snapshot.time_until_next_cycle(at(6)),
        Some(std::time::Duration::from_secs(2 * 3600))
    );
    assert_eq!(
        snapshot.time_until_next_cycle(at(9)),
        Some(std::time::Duration::ZERO)
    );
    assert_eq!(StatusSnapshot::default().time_until_next_cycle(at(9)), None);
}

mod proptests {
    use super::*;
    use crate::event::LogLevel;
    use proptest::prelude::*;

    fn arb_state() -> impl Strategy<Value = CredentialState> {
        prop_oneof![
            Just(CredentialState::Unknown),
            Just(CredentialState::Valid),
            Just(CredentialState::Expired),
            Just(CredentialState::Invalid),
        ]
    }

    fn arb_bot_state() -> impl Strategy<Value = BotState> {
        prop_oneof![
            Just(BotState::Idle),
            Just(BotState::Initializing),
            Just(BotState::Running),
            Just(BotState::Waiting),
            Just(BotState::Error),
        ]
    }

    fn arb_event() -> impl Strategy<Value = Event> {
        prop_oneof![
            "[a-z ]{0,12}".prop_map(|m| Event::log(LogLevel::Info, m)),
            (arb_bot_state(), 0usize..5, proptest::option::of(0i64..2_000_000_000)).prop_map(
                |(bot_state, credential_count, secs)| Event::StatusUpdate {
                    bot_state,
                    credential_count,
                    next_cycle_at: secs.and_then(|s| DateTime::from_timestamp(s, 0)),
                }
            ),
            (0usize..5, arb_state()).prop_map(|(index, state)| Event::CredentialStatus {
                index,
                masked_identifier: "***".to_string(),
                state,
            }),
            (0usize..5, 0u64..50).prop_map(|(i, reward)| Event::attempted(i, &Outcome::rewarded(reward))),
            (0usize..5, arb_state()).prop_map(|(i, state)| Event::skipped(i, state)),
            (0usize..5).prop_map(|total| Event::CycleComplete {
                summary: CycleSummary { total, ..Default::default() },
            }),
        ]
    }

    proptest! {
        #[test]
        fn replay_is_deterministic(events in proptest::collection::vec(arb_event(), 0..40)) {
            let first = StatusSnapshot::replay(&events);
            let second = StatusSnapshot::replay(&events);
            prop_assert_eq!(
                serde_json::to_vec(&first).unwrap(),
                serde_json::to_vec(&second).unwrap()
            );
            prop_assert_eq!(first, second);
        }
    }
}
