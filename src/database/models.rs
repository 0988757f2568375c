//! Domain models shared across the bot: the media library, attendance
//! records, and the enumerations both are built from. String round-trips
//! (`as_str` / `parse`) back the database columns and the component
//! `custom_id` tokens, so they must stay stable.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::EngineError;

/// What a stored reaction actually is. Decides how it gets dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaKind {
    Text,
    Photo,
    Animation,
    Video,
}

impl MediaKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MediaKind::Text => "text",
            MediaKind::Photo => "photo",
            MediaKind::Animation => "animation",
            MediaKind::Video => "video",
        }
    }

    /// Marker used in list views.
    pub fn emoji(self) -> &'static str {
        match self {
            MediaKind::Text => "💬",
            MediaKind::Photo => "🖼️",
            MediaKind::Animation => "🎞️",
            MediaKind::Video => "📹",
        }
    }

    /// Text items carry their whole payload inline and never need a name
    /// prompt during ingestion.
    pub fn needs_name(self) -> bool {
        !matches!(self, MediaKind::Text)
    }
}

impl FromStr for MediaKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(MediaKind::Text),
            "photo" => Ok(MediaKind::Photo),
            "animation" => Ok(MediaKind::Animation),
            "video" => Ok(MediaKind::Video),
            _ => Err(()),
        }
    }
}

/// One reaction in the shared library. Identity is the positional index
/// within its list: removals shift every later item down one slot, so a
/// captured index is only trustworthy against a fresh snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaItem {
    pub kind: MediaKind,
    /// Opaque reference: a URL, an attachment URL, or the literal text.
    pub content: String,
    /// Display label; empty string means unnamed.
    pub name: String,
}

impl MediaItem {
    pub fn new(kind: MediaKind, content: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind,
            content: content.into(),
            name: name.into(),
        }
    }

    pub fn is_named(&self) -> bool {
        !self.name.is_empty()
    }

    /// Label for menus and list views: the given name, or a positional
    /// placeholder for unnamed items.
    pub fn label(&self, index: usize) -> String {
        if self.is_named() {
            self.name.clone()
        } else {
            format!("{} #{}", self.kind.emoji(), index + 1)
        }
    }
}

/// Which half of the flow (and of the library) an action targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    CheckIn,
    CheckOut,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::CheckIn => "checkin",
            Direction::CheckOut => "checkout",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "checkin" => Ok(Direction::CheckIn),
            "checkout" => Ok(Direction::CheckOut),
            _ => Err(()),
        }
    }
}

/// Self-reported task load, tagged at check-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Workload {
    Low,
    Medium,
    High,
}

impl Workload {
    pub fn as_str(self) -> &'static str {
        match self {
            Workload::Low => "low",
            Workload::Medium => "medium",
            Workload::High => "high",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Workload::Low => "🟢 Low",
            Workload::Medium => "🟡 Medium",
            Workload::High => "🔴 High",
        }
    }
}

impl FromStr for Workload {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Workload::Low),
            "medium" => Ok(Workload::Medium),
            "high" => Ok(Workload::High),
            _ => Err(()),
        }
    }
}

/// The whole shared library: one ordered list per direction. A single
/// global instance lives behind `services::library::LibraryService`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaLibrary {
    pub checkin: Vec<MediaItem>,
    pub checkout: Vec<MediaItem>,
}

impl MediaLibrary {
    pub fn list(&self, direction: Direction) -> &[MediaItem] {
        match direction {
            Direction::CheckIn => &self.checkin,
            Direction::CheckOut => &self.checkout,
        }
    }

    fn list_mut(&mut self, direction: Direction) -> &mut Vec<MediaItem> {
        match direction {
            Direction::CheckIn => &mut self.checkin,
            Direction::CheckOut => &mut self.checkout,
        }
    }

    pub fn len(&self, direction: Direction) -> usize {
        self.list(direction).len()
    }

    pub fn is_empty(&self, direction: Direction) -> bool {
        self.list(direction).is_empty()
    }

    pub fn get(&self, direction: Direction, index: usize) -> Option<&MediaItem> {
        self.list(direction).get(index)
    }

    /// Appends preserving insertion order; returns the new item's index.
    pub fn append(&mut self, direction: Direction, item: MediaItem) -> usize {
        let list = self.list_mut(direction);
        list.push(item);
        list.len() - 1
    }

    /// Removes the item at `index`, shifting every later item down one
    /// position. The removed item is always handed back so callers can
    /// report what actually got deleted.
    pub fn remove_at(
        &mut self,
        direction: Direction,
        index: usize,
    ) -> Result<MediaItem, EngineError> {
        let list = self.list_mut(direction);
        if index >= list.len() {
            return Err(EngineError::IndexError {
                list: direction,
                index,
                len: list.len(),
            });
        }
        Ok(list.remove(index))
    }
}

/// Per-user attendance state. Created on first check-in, never deleted,
/// mutated on every transition. `workload` survives check-out so the team
/// view can still report the last session's self-assessed load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub active: bool,
    /// Display name captured at the most recent check-in.
    pub username: String,
    pub workload: Option<Workload>,
    pub checked_in_at: Option<DateTime<Utc>>,
    pub checked_out_at: Option<DateTime<Utc>>,
}

impl AttendanceRecord {
    /// Whether the record (or its absence, for first-time users) permits a
    /// transition in the given direction.
    pub fn permits(record: Option<&AttendanceRecord>, direction: Direction) -> bool {
        let active = record.map(|r| r.active).unwrap_or(false);
        match direction {
            Direction::CheckIn => !active,
            Direction::CheckOut => active,
        }
    }
}
