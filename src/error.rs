//! Error taxonomy for the session/library engine.
//!
//! None of these are fatal to the process: every variant is rendered as a
//! user-visible notice by the command layer and otherwise swallowed with a
//! log line. Store failures never propagate past the service layer; the
//! services log them and keep serving the in-memory view.

use thiserror::Error;

use crate::database::models::Direction;

/// Failures raised by the durable stores (Postgres unreachable, bad rows).
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("corrupt row: {0}")]
    Decode(String),
}

/// User-recoverable failures of the interactive engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The library holds no items for the requested direction; the flow
    /// never starts and no attendance record is touched.
    #[error("the {direction} media list is empty")]
    EmptyLibrary { direction: Direction },
    /// The acted-on menu does not match the user's current session state
    /// (old menu clicked after a restart or a completed flow).
    #[error("that menu is no longer active, start the flow again")]
    StaleSession,
    /// Check-in while already active, or check-out while inactive.
    #[error("transition rejected: record active={active}")]
    InvalidTransition { active: bool },
    /// A positional index no longer fits the list it was captured against.
    #[error("no item at position {index} in the {list} list ({len} items)")]
    IndexError {
        list: Direction,
        index: usize,
        len: usize,
    },
}
