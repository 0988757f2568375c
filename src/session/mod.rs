//! Per-user, in-memory session state for the two multi-step dialogs: the
//! check-in/out selection flow and the media-ingestion flow.
//!
//! Sessions are transient by design: they live only in this process, get
//! overwritten whenever a new flow starts, and silently reset to `Idle` on
//! restart. Abandoned sessions are never expired; the next flow start for
//! that user replaces them.

pub mod classify;

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::database::models::{Direction, MediaKind};

/// A media item mid-ingestion: classified but not yet named.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaDraft {
    pub kind: MediaKind,
    pub content: String,
}

/// Where a user currently stands in a multi-step dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Idle,
    /// Check-in/out flow: a media index is pinned; the workload choice (or
    /// an explicit skip) confirms and completes the transition.
    AwaitingWorkload {
        direction: Direction,
        media_index: usize,
    },
    /// Ingestion flow: the user's next message is a media submission.
    AwaitingMedia { direction: Direction },
    /// Ingestion flow: a non-text draft is held until a name (or skip)
    /// arrives.
    AwaitingName {
        direction: Direction,
        draft: MediaDraft,
    },
}

impl SessionState {
    /// Whether free-form messages should be routed into the ingestion flow.
    pub fn in_ingestion(&self) -> bool {
        matches!(
            self,
            SessionState::AwaitingMedia { .. } | SessionState::AwaitingName { .. }
        )
    }
}

/// All live sessions, keyed by user id. At most one entry per user; a new
/// flow start overwrites whatever was there.
#[derive(Clone, Default)]
pub struct SessionMap {
    inner: Arc<RwLock<HashMap<u64, SessionState>>>,
}

impl SessionMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn state(&self, user_id: u64) -> SessionState {
        self.inner
            .read()
            .await
            .get(&user_id)
            .cloned()
            .unwrap_or_default()
    }

    async fn set(&self, user_id: u64, state: SessionState) {
        self.inner.write().await.insert(user_id, state);
    }

    /// Pins a chosen media index for the check-in/out flow, replacing any
    /// previous session outright.
    pub async fn begin_workload(&self, user_id: u64, direction: Direction, media_index: usize) {
        self.set(
            user_id,
            SessionState::AwaitingWorkload {
                direction,
                media_index,
            },
        )
        .await;
    }

    /// Consumes the pinned selection when the workload choice arrives and
    /// returns the session to `Idle`. `None` means the user is not at the
    /// workload step (an old menu clicked after a restart or a finished
    /// flow); the caller reports the stale session and the user restarts.
    pub async fn take_workload(&self, user_id: u64) -> Option<(Direction, usize)> {
        let mut sessions = self.inner.write().await;
        match sessions.get(&user_id) {
            Some(SessionState::AwaitingWorkload {
                direction,
                media_index,
            }) => {
                let pinned = (*direction, *media_index);
                sessions.insert(user_id, SessionState::Idle);
                Some(pinned)
            }
            _ => None,
        }
    }

    /// Starts the ingestion flow for a direction.
    pub async fn begin_ingestion(&self, user_id: u64, direction: Direction) {
        self.set(user_id, SessionState::AwaitingMedia { direction })
            .await;
    }

    /// Holds a classified non-text draft until its name arrives.
    pub async fn begin_naming(&self, user_id: u64, direction: Direction, draft: MediaDraft) {
        self.set(user_id, SessionState::AwaitingName { direction, draft })
            .await;
    }

    /// Consumes the held draft when its name (or a skip) arrives; the
    /// session moves back to `AwaitingMedia`, ready for the next item.
    /// `None` when no draft is pending.
    pub async fn take_draft(&self, user_id: u64) -> Option<(Direction, MediaDraft)> {
        let mut sessions = self.inner.write().await;
        match sessions.get(&user_id) {
            Some(SessionState::AwaitingName { direction, draft }) => {
                let held = (*direction, draft.clone());
                sessions.insert(
                    user_id,
                    SessionState::AwaitingMedia { direction: held.0 },
                );
                Some(held)
            }
            _ => None,
        }
    }

    /// Ends the ingestion loop if one is running, returning the state that
    /// was discarded. Leaves non-ingestion sessions untouched, so a stray
    /// `done` cannot eat a pinned check-in selection.
    pub async fn finish_ingestion(&self, user_id: u64) -> Option<SessionState> {
        let mut sessions = self.inner.write().await;
        let prior = match sessions.get(&user_id) {
            Some(s) if s.in_ingestion() => s.clone(),
            _ => return None,
        };
        sessions.insert(user_id, SessionState::Idle);
        Some(prior)
    }

    /// Ends whatever flow is running and returns the state that was
    /// discarded, so callers can mention a dropped draft. Durable stores
    /// are never touched from here.
    pub async fn reset(&self, user_id: u64) -> SessionState {
        self.inner
            .write()
            .await
            .insert(user_id, SessionState::Idle)
            .unwrap_or_default()
    }
}
