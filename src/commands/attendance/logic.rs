//! Contains the core logic for the check-in / check-out flows.
//!
//! The sequence is: open the flow (validate both the attendance side and the
//! library side), pin a media choice, then complete on the workload choice.
//! The completing step re-validates everything under the user's lock, so a
//! menu that sat around for an hour can still only produce a legal
//! transition or a polite error.

use chrono::{DateTime, Duration, Utc};
use rand::{Rng, rng};
use tracing::info;

use crate::database::models::{AttendanceRecord, Direction, MediaItem, Workload};
use crate::error::EngineError;
use crate::interactions::ids::MediaPick;
use crate::model::AppState;

/// Everything the menu layer needs to render the media pick step.
#[derive(Debug)]
pub struct MediaMenu {
    pub direction: Direction,
    pub items: Vec<MediaItem>,
}

/// Outcome of a completed transition, ready for rendering and dispatch.
#[derive(Debug)]
pub struct TransitionReport {
    pub direction: Direction,
    pub record: AttendanceRecord,
    /// The reaction re-resolved from the live library at dispatch time.
    /// `None` means the pinned index went stale and the caller falls back
    /// to a plain text notice.
    pub media: Option<MediaItem>,
    /// Elapsed shift time, present on check-out when the record carries a
    /// check-in timestamp.
    pub duration: Option<Duration>,
}

/// Opens the selection flow. Nothing is pinned yet; this only validates
/// that the transition could succeed and that there is something to pick.
pub async fn begin_flow(
    app_state: &AppState,
    user_id: u64,
    direction: Direction,
) -> Result<MediaMenu, EngineError> {
    let record = app_state.attendance.get(user_id).await;
    if !AttendanceRecord::permits(record.as_ref(), direction) {
        return Err(EngineError::InvalidTransition {
            active: record.map(|r| r.active).unwrap_or(false),
        });
    }
    let items = app_state.library.snapshot().await.list(direction).to_vec();
    if items.is_empty() {
        return Err(EngineError::EmptyLibrary { direction });
    }
    Ok(MediaMenu { direction, items })
}

/// Validates a pick against the current library snapshot and pins it in the
/// user's session. A `Random` pick draws from the live list length at click
/// time. Returns the pinned index and a copy of the item for display; the
/// copy may go stale before confirmation, which is fine, dispatch re-resolves.
pub async fn pin_media(
    app_state: &AppState,
    user_id: u64,
    direction: Direction,
    pick: MediaPick,
) -> Result<(usize, MediaItem), EngineError> {
    let snapshot = app_state.library.snapshot().await;
    let list = snapshot.list(direction);
    let len = list.len();
    if len == 0 {
        return Err(EngineError::EmptyLibrary { direction });
    }
    let index = match pick {
        MediaPick::Index(i) if i < len => i,
        MediaPick::Index(i) => {
            return Err(EngineError::IndexError {
                list: direction,
                index: i,
                len,
            });
        }
        MediaPick::Random => {
            let mut r = rng();
            r.random_range(0..len)
        }
    };
    let item = list[index].clone();
    app_state
        .sessions
        .begin_workload(user_id, direction, index)
        .await;
    Ok((index, item))
}

/// Completes the flow when the workload choice (or skip) arrives. A missing
/// pinned selection means the menu outlived its session.
pub async fn confirm(
    app_state: &AppState,
    user_id: u64,
    username: &str,
    workload: Option<Workload>,
) -> Result<TransitionReport, EngineError> {
    let Some((direction, media_index)) = app_state.sessions.take_workload(user_id).await else {
        return Err(EngineError::StaleSession);
    };
    perform_transition(app_state, user_id, username, direction, media_index, workload).await
}

/// Runs the transition sequence: re-validate, mutate, persist, then resolve
/// the reaction from the live library. Serialized per user, so two menus
/// confirmed at once cannot both win.
pub async fn perform_transition(
    app_state: &AppState,
    user_id: u64,
    username: &str,
    direction: Direction,
    media_index: usize,
    workload: Option<Workload>,
) -> Result<TransitionReport, EngineError> {
    let _guard = app_state.attendance.lock_user(user_id).await;

    let previous = app_state.attendance.get(user_id).await;
    if !AttendanceRecord::permits(previous.as_ref(), direction) {
        return Err(EngineError::InvalidTransition {
            active: previous.map(|r| r.active).unwrap_or(false),
        });
    }

    let now = Utc::now();
    let record = match (direction, previous) {
        (Direction::CheckIn, _) => AttendanceRecord {
            active: true,
            username: username.to_string(),
            workload,
            checked_in_at: Some(now),
            checked_out_at: None,
        },
        (Direction::CheckOut, Some(mut prev)) => {
            // The workload tag set at check-in rides along unchanged as the
            // finished session's self-assessment.
            prev.active = false;
            prev.username = username.to_string();
            prev.checked_out_at = Some(now);
            prev
        }
        // Unreachable past the permits gate; keep the transition total.
        (Direction::CheckOut, None) => AttendanceRecord {
            active: false,
            username: username.to_string(),
            workload: None,
            checked_in_at: None,
            checked_out_at: Some(now),
        },
    };

    app_state.attendance.set(user_id, record.clone()).await;
    info!(
        target = "attendance",
        user_id,
        direction = %direction,
        "transition complete"
    );

    let media = app_state.library.resolve(direction, media_index).await;
    let duration = match direction {
        Direction::CheckOut => record.checked_in_at.map(|start| now - start),
        Direction::CheckIn => None,
    };
    Ok(TransitionReport {
        direction,
        record,
        media,
        duration,
    })
}

/// Elapsed time since check-in, for the status views.
pub fn elapsed(record: &AttendanceRecord, now: DateTime<Utc>) -> Option<Duration> {
    if !record.active {
        return None;
    }
    record.checked_in_at.map(|start| now - start)
}
