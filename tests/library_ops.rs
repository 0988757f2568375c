//! Shared-library behavior: positional identity under removal, write-through
//! round-trips, the ingestion loop, and degraded no-store operation.

use std::sync::Arc;

use async_trait::async_trait;
use punchclock_bot::commands::library::logic::{self, IngestReply};
use punchclock_bot::database::media::{MediaStore, MemoryMediaStore};
use punchclock_bot::database::models::{Direction, MediaItem, MediaKind, MediaLibrary};
use punchclock_bot::error::{EngineError, StoreError};
use punchclock_bot::model::AppState;
use punchclock_bot::services::attendance::AttendanceService;
use punchclock_bot::services::library::LibraryService;
use punchclock_bot::session::classify::RawSubmission;

const USER: u64 = 7;

fn item(name: &str) -> MediaItem {
    MediaItem::new(MediaKind::Text, format!("content of {name}"), name)
}

fn app_state_with(store: Arc<dyn MediaStore>) -> AppState {
    AppState::new(
        LibraryService::new(store),
        AttendanceService::new(Arc::new(
            punchclock_bot::database::attendance::MemoryAttendanceStore::default(),
        )),
        "!".to_string(),
    )
}

fn app_state() -> AppState {
    app_state_with(Arc::new(MemoryMediaStore::default()))
}

fn text_submission(s: &str) -> RawSubmission {
    RawSubmission {
        text: s.to_string(),
        ..Default::default()
    }
}

fn photo_submission() -> RawSubmission {
    RawSubmission {
        text: String::new(),
        attachment_url: Some("https://cdn.example.com/a/b/monday.png".to_string()),
        attachment_content_type: Some("image/png".to_string()),
    }
}

#[test]
fn append_reports_the_new_index() {
    let mut library = MediaLibrary::default();
    assert_eq!(library.append(Direction::CheckIn, item("a")), 0);
    assert_eq!(library.append(Direction::CheckIn, item("b")), 1);
    assert_eq!(library.append(Direction::CheckOut, item("c")), 0);
}

#[test]
fn remove_at_shifts_and_never_removes_twice() {
    let mut library = MediaLibrary::default();
    for name in ["a", "b", "c"] {
        library.append(Direction::CheckIn, item(name));
    }
    // First removal takes "b"; "c" shifts into position 1.
    let removed = library.remove_at(Direction::CheckIn, 1).unwrap();
    assert_eq!(removed.name, "b");
    let removed = library.remove_at(Direction::CheckIn, 1).unwrap();
    assert_eq!(removed.name, "c");
    // The list is now shorter than index 1 allows.
    let err = library.remove_at(Direction::CheckIn, 1).unwrap_err();
    assert!(matches!(
        err,
        EngineError::IndexError {
            list: Direction::CheckIn,
            index: 1,
            len: 1
        }
    ));
    assert_eq!(library.list(Direction::CheckIn), &[item("a")]);
}

#[test]
fn remove_at_leaves_the_other_list_alone() {
    let mut library = MediaLibrary::default();
    library.append(Direction::CheckIn, item("a"));
    library.append(Direction::CheckOut, item("b"));
    library.remove_at(Direction::CheckIn, 0).unwrap();
    assert_eq!(library.len(Direction::CheckOut), 1);
}

#[tokio::test]
async fn mutations_round_trip_through_the_store() {
    let store = Arc::new(MemoryMediaStore::default());
    let service = LibraryService::new(store.clone());
    service.append(Direction::CheckIn, item("a")).await;
    service.append(Direction::CheckIn, item("b")).await;
    service.append(Direction::CheckOut, item("c")).await;
    service.remove_at(Direction::CheckIn, 0).await.unwrap();

    // A fresh service over the same store sees exactly the persisted state,
    // order preserved.
    let reloaded = LibraryService::new(store).snapshot().await;
    assert_eq!(reloaded.list(Direction::CheckIn), &[item("b")]);
    assert_eq!(reloaded.list(Direction::CheckOut), &[item("c")]);
}

struct UnreachableStore;

#[async_trait]
impl MediaStore for UnreachableStore {
    async fn load(&self) -> Result<MediaLibrary, StoreError> {
        Err(StoreError::Decode("store is down".to_string()))
    }
    async fn save(&self, _library: &MediaLibrary) -> Result<(), StoreError> {
        Err(StoreError::Decode("store is down".to_string()))
    }
}

#[tokio::test]
async fn unreachable_store_degrades_to_an_empty_working_library() {
    let service = LibraryService::new(Arc::new(UnreachableStore));
    assert_eq!(service.snapshot().await, MediaLibrary::default());
    // Mutations still work against the in-memory copy.
    let index = service.append(Direction::CheckIn, item("a")).await;
    assert_eq!(index, 0);
    assert_eq!(service.resolve(Direction::CheckIn, 0).await, Some(item("a")));
}

#[tokio::test]
async fn text_items_store_immediately_and_stay_in_the_loop() {
    let state = app_state();
    logic::begin(&state, USER, Direction::CheckIn).await;

    let reply = logic::receive_message(&state, USER, text_submission("have a nice day")).await;
    let IngestReply::Stored { direction, index, item } = reply else {
        panic!("expected Stored");
    };
    assert_eq!(direction, Direction::CheckIn);
    assert_eq!(index, 0);
    assert_eq!(item.kind, MediaKind::Text);
    assert!(item.name.is_empty());
    // Still in the loop: a second item lands right behind the first.
    let reply = logic::receive_message(&state, USER, text_submission("see you tomorrow")).await;
    assert!(matches!(reply, IngestReply::Stored { index: 1, .. }));
}

#[tokio::test]
async fn photo_then_name_grows_the_checkin_list_by_one() {
    let state = app_state();
    logic::begin(&state, USER, Direction::CheckIn).await;

    let reply = logic::receive_message(&state, USER, photo_submission()).await;
    assert!(matches!(reply, IngestReply::NamePrompt { kind: MediaKind::Photo }));

    let reply = logic::receive_message(&state, USER, text_submission("Monday vibes")).await;
    assert!(matches!(reply, IngestReply::Stored { .. }));

    let library = state.library.snapshot().await;
    assert_eq!(library.len(Direction::CheckIn), 1);
    let stored = library.get(Direction::CheckIn, 0).unwrap();
    assert_eq!(stored.kind, MediaKind::Photo);
    assert_eq!(stored.name, "Monday vibes");
}

#[tokio::test]
async fn skip_stores_the_draft_unnamed() {
    let state = app_state();
    logic::begin(&state, USER, Direction::CheckOut).await;
    logic::receive_message(&state, USER, photo_submission()).await;

    let reply = logic::receive_message(&state, USER, text_submission("skip")).await;
    let IngestReply::Stored { item, .. } = reply else {
        panic!("expected Stored");
    };
    assert_eq!(item.kind, MediaKind::Photo);
    assert!(item.name.is_empty());
}

#[tokio::test]
async fn done_discards_a_pending_draft_without_storing_it() {
    let state = app_state();
    logic::begin(&state, USER, Direction::CheckIn).await;
    logic::receive_message(&state, USER, photo_submission()).await;

    let reply = logic::receive_message(&state, USER, text_submission("done")).await;
    assert!(matches!(reply, IngestReply::Finished { dropped_draft: true }));
    assert_eq!(state.library.snapshot().await, MediaLibrary::default());
}

#[tokio::test]
async fn cancelling_with_zero_items_leaves_the_library_unchanged() {
    let state = app_state();
    state.library.append(Direction::CheckIn, item("kept")).await;
    let before = state.library.snapshot().await;

    logic::begin(&state, USER, Direction::CheckIn).await;
    let reply = logic::receive_message(&state, USER, text_submission("cancel")).await;
    assert!(matches!(reply, IngestReply::Cancelled { dropped_draft: false }));
    assert_eq!(state.library.snapshot().await, before);

    // Cancel with nothing running is a quiet no-op.
    let reply = logic::cancel(&state, USER).await;
    assert!(matches!(reply, IngestReply::Idle));
}

#[tokio::test]
async fn empty_submission_is_rejected_without_state_change() {
    let state = app_state();
    logic::begin(&state, USER, Direction::CheckIn).await;
    let reply = logic::receive_message(&state, USER, text_submission("   ")).await;
    assert!(matches!(reply, IngestReply::Rejected { .. }));
    // The loop is still open.
    assert!(state.sessions.state(USER).await.in_ingestion());
}

#[tokio::test]
async fn service_remove_at_reports_the_actual_item() {
    let state = app_state();
    state.library.append(Direction::CheckIn, item("a")).await;
    state.library.append(Direction::CheckIn, item("b")).await;

    let removed = state.library.remove_at(Direction::CheckIn, 0).await.unwrap();
    assert_eq!(removed.name, "a");
    // The index is stale now; position 1 no longer exists.
    let err = state.library.remove_at(Direction::CheckIn, 1).await.unwrap_err();
    assert!(matches!(err, EngineError::IndexError { .. }));
}
