//! End-to-end orchestrator tests: the check-in/out scenarios, the state
//! alternation invariant, and same-user concurrency.

use std::sync::Arc;

use chrono::Utc;
use punchclock_bot::commands::attendance::logic::{
    begin_flow, confirm, elapsed, perform_transition, pin_media,
};
use punchclock_bot::database::attendance::MemoryAttendanceStore;
use punchclock_bot::database::media::MemoryMediaStore;
use punchclock_bot::database::models::{Direction, MediaItem, MediaKind, Workload};
use punchclock_bot::error::EngineError;
use punchclock_bot::interactions::ids::MediaPick;
use punchclock_bot::model::AppState;
use punchclock_bot::services::attendance::AttendanceService;
use punchclock_bot::services::library::LibraryService;

const USER: u64 = 100;
const NAME: &str = "sam";

fn empty_state() -> AppState {
    AppState::new(
        LibraryService::new(Arc::new(MemoryMediaStore::default())),
        AttendanceService::new(Arc::new(MemoryAttendanceStore::default())),
        "!".to_string(),
    )
}

async fn seeded_state() -> AppState {
    let state = empty_state();
    for (direction, names) in [
        (Direction::CheckIn, ["hello", "rise and shine"]),
        (Direction::CheckOut, ["bye", "good night"]),
    ] {
        for name in names {
            state
                .library
                .append(direction, MediaItem::new(MediaKind::Text, name, ""))
                .await;
        }
    }
    state
}

async fn check_in(state: &AppState, user: u64, workload: Option<Workload>) -> Result<(), EngineError> {
    perform_transition(state, user, NAME, Direction::CheckIn, 0, workload)
        .await
        .map(|_| ())
}

async fn check_out(state: &AppState, user: u64) -> Result<(), EngineError> {
    perform_transition(state, user, NAME, Direction::CheckOut, 0, None)
        .await
        .map(|_| ())
}

#[tokio::test]
async fn empty_library_blocks_the_flow_and_creates_no_record() {
    let state = empty_state();
    let err = begin_flow(&state, USER, Direction::CheckIn).await.unwrap_err();
    assert!(matches!(
        err,
        EngineError::EmptyLibrary {
            direction: Direction::CheckIn
        }
    ));
    assert!(state.attendance.get(USER).await.is_none());
    assert!(state.attendance.team_view().await.is_empty());
}

#[tokio::test]
async fn full_shift_via_the_menus() {
    let state = seeded_state().await;

    // Check-in: pick media 1, tag medium.
    let menu = begin_flow(&state, USER, Direction::CheckIn).await.unwrap();
    assert_eq!(menu.items.len(), 2);
    let (index, _) = pin_media(&state, USER, Direction::CheckIn, MediaPick::Index(1))
        .await
        .unwrap();
    assert_eq!(index, 1);
    let report = confirm(&state, USER, NAME, Some(Workload::Medium)).await.unwrap();
    assert!(report.record.active);
    assert_eq!(report.record.workload, Some(Workload::Medium));
    assert_eq!(report.media.as_ref().map(|m| m.content.as_str()), Some("rise and shine"));
    assert!(report.duration.is_none());

    let record = state.attendance.get(USER).await.unwrap();
    assert!(record.active);
    assert!(elapsed(&record, Utc::now()).is_some_and(|d| d.num_seconds() >= 0));

    // Check-out: confirm without a new tag.
    begin_flow(&state, USER, Direction::CheckOut).await.unwrap();
    pin_media(&state, USER, Direction::CheckOut, MediaPick::Index(0))
        .await
        .unwrap();
    let report = confirm(&state, USER, NAME, None).await.unwrap();
    assert!(!report.record.active);
    assert!(report.duration.is_some_and(|d| d.num_seconds() >= 0));
    // The tag set at check-in is retained for the team view.
    assert_eq!(report.record.workload, Some(Workload::Medium));
    assert!(report.record.checked_out_at.is_some());
}

#[tokio::test]
async fn check_in_while_active_is_rejected_without_mutation() {
    let state = seeded_state().await;
    check_in(&state, USER, Some(Workload::High)).await.unwrap();
    let before = state.attendance.get(USER).await.unwrap();

    let err = check_in(&state, USER, Some(Workload::Low)).await.unwrap_err();
    assert!(matches!(err, EngineError::InvalidTransition { active: true }));
    assert_eq!(state.attendance.get(USER).await.unwrap(), before);

    // The menu layer refuses even earlier.
    let err = begin_flow(&state, USER, Direction::CheckIn).await.unwrap_err();
    assert!(matches!(err, EngineError::InvalidTransition { active: true }));
}

#[tokio::test]
async fn check_out_without_check_in_is_rejected() {
    let state = seeded_state().await;
    let err = check_out(&state, USER).await.unwrap_err();
    assert!(matches!(err, EngineError::InvalidTransition { active: false }));
    assert!(state.attendance.get(USER).await.is_none());
}

#[tokio::test]
async fn transitions_must_alternate() {
    let state = seeded_state().await;
    assert!(check_in(&state, USER, None).await.is_ok());
    assert!(check_in(&state, USER, None).await.is_err());
    assert!(check_out(&state, USER).await.is_ok());
    assert!(check_out(&state, USER).await.is_err());
    assert!(check_in(&state, USER, None).await.is_ok());
}

#[tokio::test]
async fn concurrent_same_user_check_ins_admit_exactly_one() {
    let state = seeded_state().await;
    let (a, b) = tokio::join!(
        check_in(&state, USER, Some(Workload::Low)),
        check_in(&state, USER, Some(Workload::High)),
    );
    assert!(
        a.is_ok() != b.is_ok(),
        "exactly one of the two racing check-ins must win"
    );
    let loser = if a.is_ok() { b } else { a };
    assert!(matches!(
        loser.unwrap_err(),
        EngineError::InvalidTransition { active: true }
    ));
    let active_records = state
        .attendance
        .team_view()
        .await
        .into_iter()
        .filter(|(_, r)| r.active)
        .count();
    assert_eq!(active_records, 1);
}

#[tokio::test]
async fn different_users_never_contend() {
    let state = seeded_state().await;
    let (a, b) = tokio::join!(check_in(&state, 1, None), check_in(&state, 2, None));
    assert!(a.is_ok() && b.is_ok());
    assert_eq!(state.attendance.team_view().await.len(), 2);
}

#[tokio::test]
async fn workload_choice_without_a_pinned_selection_is_stale() {
    let state = seeded_state().await;
    let err = confirm(&state, USER, NAME, Some(Workload::Low)).await.unwrap_err();
    assert!(matches!(err, EngineError::StaleSession));
    assert!(state.attendance.get(USER).await.is_none());
}

#[tokio::test]
async fn out_of_range_pick_is_rejected() {
    let state = seeded_state().await;
    let err = pin_media(&state, USER, Direction::CheckIn, MediaPick::Index(9))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::IndexError { index: 9, len: 2, .. }));
}

#[tokio::test]
async fn stale_index_at_dispatch_falls_back_to_no_media() {
    let state = seeded_state().await;
    pin_media(&state, USER, Direction::CheckIn, MediaPick::Index(1))
        .await
        .unwrap();
    // The library shrinks between the pick and the confirmation.
    state.library.remove_at(Direction::CheckIn, 0).await.unwrap();
    state.library.remove_at(Direction::CheckIn, 0).await.unwrap();

    let report = confirm(&state, USER, NAME, None).await.unwrap();
    // The transition itself still lands; only the reaction is dropped.
    assert!(report.record.active);
    assert!(report.media.is_none());
}

#[tokio::test]
async fn random_pick_draws_from_the_current_list() {
    let state = seeded_state().await;
    let (index, item) = pin_media(&state, USER, Direction::CheckIn, MediaPick::Random)
        .await
        .unwrap();
    assert!(index < 2);
    assert_eq!(
        state.library.resolve(Direction::CheckIn, index).await,
        Some(item)
    );
}

#[tokio::test]
async fn records_survive_a_service_restart_via_the_store() {
    let store = Arc::new(MemoryAttendanceStore::default());
    let state = AppState::new(
        LibraryService::new(Arc::new(MemoryMediaStore::default())),
        AttendanceService::new(store.clone()),
        "!".to_string(),
    );
    state
        .library
        .append(Direction::CheckIn, MediaItem::new(MediaKind::Text, "hi", ""))
        .await;
    check_in(&state, USER, Some(Workload::Low)).await.unwrap();

    // A fresh service over the same store still sees the record.
    let fresh = AttendanceService::new(store);
    let record = fresh.get(USER).await.unwrap();
    assert!(record.active);
    assert_eq!(record.workload, Some(Workload::Low));
}
