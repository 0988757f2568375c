//! Contains the core logic for the ingestion loop.
//!
//! While a user is in the loop, every plain message of theirs is treated as
//! a submission. The words `done`, `skip` and `cancel` (bare, attachment-
//! free) steer the loop instead of being stored.

use crate::constants::MAX_ITEM_NAME_LEN;
use crate::database::models::{Direction, MediaItem, MediaKind};
use crate::model::AppState;
use crate::session::classify::{RawSubmission, classify};
use crate::session::{MediaDraft, SessionState};

/// What the loop wants said back to the user after a message.
pub enum IngestReply {
    /// Item appended; `index` is the 0-based library position.
    Stored {
        direction: Direction,
        index: usize,
        item: MediaItem,
    },
    /// A non-text item was classified and now waits on its name.
    NamePrompt { kind: MediaKind },
    /// Submission was unusable; re-prompt without changing state.
    Rejected { reason: &'static str },
    /// Loop closed deliberately.
    Finished { dropped_draft: bool },
    /// Loop (or any other flow) aborted.
    Cancelled { dropped_draft: bool },
    /// No flow was in progress.
    Idle,
}

enum Control {
    Done,
    Skip,
    Cancel,
}

fn control_word(raw: &RawSubmission) -> Option<Control> {
    if raw.attachment_url.is_some() {
        return None;
    }
    match raw.text.trim().to_ascii_lowercase().as_str() {
        "done" => Some(Control::Done),
        "skip" => Some(Control::Skip),
        "cancel" => Some(Control::Cancel),
        _ => None,
    }
}

/// Starts (or re-targets) the ingestion loop. Any previous flow is replaced.
pub async fn begin(app_state: &AppState, user_id: u64, direction: Direction) {
    app_state.sessions.begin_ingestion(user_id, direction).await;
}

/// Routes one chat message from a user who is inside the ingestion loop.
pub async fn receive_message(
    app_state: &AppState,
    user_id: u64,
    raw: RawSubmission,
) -> IngestReply {
    match control_word(&raw) {
        Some(Control::Done) => return finish(app_state, user_id).await,
        Some(Control::Cancel) => return cancel(app_state, user_id).await,
        Some(Control::Skip) => {
            return match app_state.sessions.state(user_id).await {
                SessionState::AwaitingName { .. } => skip_name(app_state, user_id).await,
                _ => IngestReply::Rejected {
                    reason: "Nothing is waiting for a name. Send an item, or `done` to wrap up.",
                },
            };
        }
        None => {}
    }

    match app_state.sessions.state(user_id).await {
        SessionState::AwaitingMedia { direction } => {
            submit_item(app_state, user_id, direction, &raw).await
        }
        SessionState::AwaitingName { .. } => submit_name(app_state, user_id, &raw).await,
        _ => IngestReply::Idle,
    }
}

async fn submit_item(
    app_state: &AppState,
    user_id: u64,
    direction: Direction,
    raw: &RawSubmission,
) -> IngestReply {
    let (kind, content) = classify(raw);
    if content.is_empty() {
        return IngestReply::Rejected {
            reason: "There was nothing in that message I can store. Send text, a link, or an attachment.",
        };
    }
    if kind.needs_name() {
        app_state
            .sessions
            .begin_naming(user_id, direction, MediaDraft { kind, content })
            .await;
        IngestReply::NamePrompt { kind }
    } else {
        let item = MediaItem::new(kind, content, "");
        let index = app_state.library.append(direction, item.clone()).await;
        IngestReply::Stored {
            direction,
            index,
            item,
        }
    }
}

async fn submit_name(app_state: &AppState, user_id: u64, raw: &RawSubmission) -> IngestReply {
    if raw.attachment_url.is_some() || raw.text.trim().is_empty() {
        return IngestReply::Rejected {
            reason: "Give the item a short text name, or `skip` to store it unnamed.",
        };
    }
    let name: String = raw.text.trim().chars().take(MAX_ITEM_NAME_LEN).collect();
    match app_state.sessions.take_draft(user_id).await {
        Some((direction, draft)) => {
            let item = MediaItem::new(draft.kind, draft.content, name);
            let index = app_state.library.append(direction, item.clone()).await;
            IngestReply::Stored {
                direction,
                index,
                item,
            }
        }
        None => IngestReply::Idle,
    }
}

/// Explicit `done`: closes the loop, discarding an unnamed draft if one was
/// still pending. A pinned check-in/out selection is left alone.
pub async fn finish(app_state: &AppState, user_id: u64) -> IngestReply {
    match app_state.sessions.finish_ingestion(user_id).await {
        Some(SessionState::AwaitingName { .. }) => IngestReply::Finished {
            dropped_draft: true,
        },
        Some(_) => IngestReply::Finished {
            dropped_draft: false,
        },
        None => IngestReply::Idle,
    }
}

/// Explicit `skip` while a draft waits on its name: stores it unnamed.
pub async fn skip_name(app_state: &AppState, user_id: u64) -> IngestReply {
    match app_state.sessions.take_draft(user_id).await {
        Some((direction, draft)) => {
            let item = MediaItem::new(draft.kind, draft.content, "");
            let index = app_state.library.append(direction, item.clone()).await;
            IngestReply::Stored {
                direction,
                index,
                item,
            }
        }
        None => IngestReply::Idle,
    }
}

/// Explicit cancel: ends whatever flow is running, from any state, without
/// touching durable data. Cancelling with nothing in progress is a no-op.
pub async fn cancel(app_state: &AppState, user_id: u64) -> IngestReply {
    match app_state.sessions.reset(user_id).await {
        SessionState::Idle => IngestReply::Idle,
        SessionState::AwaitingName { .. } => IngestReply::Cancelled {
            dropped_draft: true,
        },
        _ => IngestReply::Cancelled {
            dropped_draft: false,
        },
    }
}
