//! Centralized custom_id string constants for interaction components.
//! Consolidating here reduces typos and enables future refactors (renaming / prefix changes).

use crate::database::models::{Direction, Workload};

// Attendance menu actions
pub const ATT_MENU_CHECKIN: &str = "att_checkin";
pub const ATT_MENU_CHECKOUT: &str = "att_checkout";
pub const ATT_MENU_STATUS: &str = "att_status";
pub const ATT_CANCEL: &str = "att_cancel";

// Media pick buttons
pub const ATT_PICK_PREFIX: &str = "att_pick_"; // followed by direction + _ + index (or "rand")
pub const ATT_PICK_RANDOM_SUFFIX: &str = "rand";

// Workload confirmation buttons
pub const ATT_LOAD_PREFIX: &str = "att_load_"; // followed by a workload level or "skip"
pub const ATT_LOAD_SKIP: &str = "att_load_skip";

// Library ingestion target buttons
pub const LIB_ADD_PREFIX: &str = "lib_add_"; // followed by direction

/// A media selection from the pick menu: a concrete library position or a
/// random draw resolved at click time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaPick {
    Index(usize),
    Random,
}

pub fn pick_id(direction: Direction, pick: MediaPick) -> String {
    match pick {
        MediaPick::Index(i) => format!("{}{}_{}", ATT_PICK_PREFIX, direction.as_str(), i),
        MediaPick::Random => format!(
            "{}{}_{}",
            ATT_PICK_PREFIX,
            direction.as_str(),
            ATT_PICK_RANDOM_SUFFIX
        ),
    }
}

pub fn load_id(workload: Workload) -> String {
    format!("{}{}", ATT_LOAD_PREFIX, workload.as_str())
}

pub fn lib_add_id(direction: Direction) -> String {
    format!("{}{}", LIB_ADD_PREFIX, direction.as_str())
}

/// Parse a media pick custom_id into (direction, pick).
/// Expected form: `att_pick_<direction>_<index|rand>`.
pub fn parse_pick_id(id: &str) -> Option<(Direction, MediaPick)> {
    let rest = id.strip_prefix(ATT_PICK_PREFIX)?;
    let (direction_str, tail) = rest.split_once('_')?;
    let direction = direction_str.parse::<Direction>().ok()?;
    if tail == ATT_PICK_RANDOM_SUFFIX {
        return Some((direction, MediaPick::Random));
    }
    let index = tail.parse::<usize>().ok()?;
    Some((direction, MediaPick::Index(index)))
}

/// Parse a workload confirmation custom_id. The outer `None` means the id is
/// not from this family; the inner `None` is the explicit skip/confirm button.
pub fn parse_load_id(id: &str) -> Option<Option<Workload>> {
    let rest = id.strip_prefix(ATT_LOAD_PREFIX)?;
    if rest == "skip" {
        return Some(None);
    }
    rest.parse::<Workload>().ok().map(Some)
}

/// Parse an ingestion target custom_id into its direction.
/// Expected form: `lib_add_<direction>`.
pub fn parse_lib_add_id(id: &str) -> Option<Direction> {
    id.strip_prefix(LIB_ADD_PREFIX)?.parse::<Direction>().ok()
}
