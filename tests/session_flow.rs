//! Transition tests for the per-user session machine: pinning, staleness,
//! the ingestion loop, and the cancel paths.

use punchclock_bot::database::models::{Direction, MediaKind};
use punchclock_bot::session::{MediaDraft, SessionMap, SessionState};

const USER: u64 = 42;

fn draft() -> MediaDraft {
    MediaDraft {
        kind: MediaKind::Photo,
        content: "https://cdn.example.com/a/b/pic.png".to_string(),
    }
}

#[tokio::test]
async fn fresh_user_is_idle() {
    let sessions = SessionMap::new();
    assert_eq!(sessions.state(USER).await, SessionState::Idle);
    assert!(!sessions.state(USER).await.in_ingestion());
}

#[tokio::test]
async fn pinned_selection_is_consumed_once() {
    let sessions = SessionMap::new();
    sessions.begin_workload(USER, Direction::CheckIn, 2).await;
    assert_eq!(
        sessions.take_workload(USER).await,
        Some((Direction::CheckIn, 2))
    );
    // Second confirm on the same menu: the session already went Idle.
    assert_eq!(sessions.take_workload(USER).await, None);
    assert_eq!(sessions.state(USER).await, SessionState::Idle);
}

#[tokio::test]
async fn workload_without_pin_is_stale() {
    let sessions = SessionMap::new();
    assert_eq!(sessions.take_workload(USER).await, None);
    // An ingestion state is just as stale for the workload step.
    sessions.begin_ingestion(USER, Direction::CheckIn).await;
    assert_eq!(sessions.take_workload(USER).await, None);
}

#[tokio::test]
async fn new_flow_start_overwrites_the_previous_session() {
    let sessions = SessionMap::new();
    sessions.begin_workload(USER, Direction::CheckIn, 0).await;
    sessions.begin_ingestion(USER, Direction::CheckOut).await;
    assert_eq!(
        sessions.state(USER).await,
        SessionState::AwaitingMedia {
            direction: Direction::CheckOut
        }
    );
    // The pinned check-in selection is gone.
    assert_eq!(sessions.take_workload(USER).await, None);
}

#[tokio::test]
async fn naming_loops_back_to_awaiting_media() {
    let sessions = SessionMap::new();
    sessions.begin_ingestion(USER, Direction::CheckIn).await;
    sessions.begin_naming(USER, Direction::CheckIn, draft()).await;
    assert!(sessions.state(USER).await.in_ingestion());

    let taken = sessions.take_draft(USER).await;
    assert_eq!(taken, Some((Direction::CheckIn, draft())));
    // Ready for the next item, not Idle.
    assert_eq!(
        sessions.state(USER).await,
        SessionState::AwaitingMedia {
            direction: Direction::CheckIn
        }
    );
}

#[tokio::test]
async fn take_draft_without_one_is_none() {
    let sessions = SessionMap::new();
    assert_eq!(sessions.take_draft(USER).await, None);
    sessions.begin_ingestion(USER, Direction::CheckIn).await;
    assert_eq!(sessions.take_draft(USER).await, None);
}

#[tokio::test]
async fn finish_only_ends_ingestion_states() {
    let sessions = SessionMap::new();
    // Not in ingestion: nothing to finish.
    assert_eq!(sessions.finish_ingestion(USER).await, None);

    // A pinned check-in selection survives a stray `done`.
    sessions.begin_workload(USER, Direction::CheckIn, 1).await;
    assert_eq!(sessions.finish_ingestion(USER).await, None);
    assert_eq!(
        sessions.take_workload(USER).await,
        Some((Direction::CheckIn, 1))
    );

    // Mid-naming, finish reports the discarded state.
    sessions.begin_naming(USER, Direction::CheckOut, draft()).await;
    let prior = sessions.finish_ingestion(USER).await;
    assert!(matches!(prior, Some(SessionState::AwaitingName { .. })));
    assert_eq!(sessions.state(USER).await, SessionState::Idle);
}

#[tokio::test]
async fn reset_ends_any_flow_and_reports_what_it_dropped() {
    let sessions = SessionMap::new();
    assert_eq!(sessions.reset(USER).await, SessionState::Idle);

    sessions.begin_workload(USER, Direction::CheckOut, 0).await;
    let dropped = sessions.reset(USER).await;
    assert!(matches!(dropped, SessionState::AwaitingWorkload { .. }));
    assert_eq!(sessions.state(USER).await, SessionState::Idle);

    sessions.begin_naming(USER, Direction::CheckIn, draft()).await;
    let dropped = sessions.reset(USER).await;
    assert!(matches!(dropped, SessionState::AwaitingName { .. }));
}

#[tokio::test]
async fn sessions_are_independent_per_user() {
    let sessions = SessionMap::new();
    sessions.begin_workload(1, Direction::CheckIn, 0).await;
    sessions.begin_ingestion(2, Direction::CheckOut).await;
    assert_eq!(sessions.take_workload(1).await, Some((Direction::CheckIn, 0)));
    assert!(sessions.state(2).await.in_ingestion());
}
