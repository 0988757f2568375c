//! Builds the library listing, ingestion prompts, and loop replies.

use serenity::builder::{CreateActionRow, CreateEmbed};

use super::logic::IngestReply;
use crate::database::models::{Direction, MediaItem, MediaKind, MediaLibrary};
use crate::error::EngineError;
use crate::interactions::ids;
use crate::ui::buttons::Btn;
use crate::ui::style::COLOR_LIBRARY;

fn item_line(index: usize, item: &MediaItem) -> String {
    let shown = if item.is_named() {
        item.name.clone()
    } else {
        let content = &item.content;
        if content.chars().count() <= 40 {
            content.clone()
        } else {
            let cut: String = content.chars().take(40).collect();
            format!("{cut}…")
        }
    };
    format!("`{}` {} {}", index + 1, item.kind.emoji(), shown)
}

fn list_block(items: &[MediaItem]) -> String {
    if items.is_empty() {
        return "*(empty)*".to_string();
    }
    items
        .iter()
        .enumerate()
        .map(|(i, item)| item_line(i, item))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Both lists, numbered the way `removemedia` expects positions.
pub fn create_library_embed(library: &MediaLibrary) -> CreateEmbed {
    CreateEmbed::new()
        .title("🗂️ Reaction library")
        .field(
            format!("✅ Check-in ({})", library.checkin.len()),
            list_block(&library.checkin),
            false,
        )
        .field(
            format!("🚪 Check-out ({})", library.checkout.len()),
            list_block(&library.checkout),
            false,
        )
        .color(COLOR_LIBRARY)
}

/// Asks which list new items should land in.
pub fn create_target_menu() -> (CreateEmbed, Vec<CreateActionRow>) {
    let embed = CreateEmbed::new()
        .title("Which list are we filling?")
        .description("New items go to one of the two reaction lists.")
        .color(COLOR_LIBRARY);
    let row = CreateActionRow::Buttons(vec![
        Btn::success(&ids::lib_add_id(Direction::CheckIn), "✅ Check-in list"),
        Btn::secondary(&ids::lib_add_id(Direction::CheckOut), "🚪 Check-out list"),
    ]);
    (embed, vec![row])
}

/// Opening prompt of the ingestion loop.
pub fn ingest_prompt_text(direction: Direction) -> String {
    format!(
        "📥 Adding to the **{}** list. Send text, a link, or an attachment. \
        Type `done` when you're finished, `cancel` to abort.",
        direction.as_str()
    )
}

fn kind_word(kind: MediaKind) -> &'static str {
    match kind {
        MediaKind::Text => "text",
        MediaKind::Photo => "photo",
        MediaKind::Animation => "animation",
        MediaKind::Video => "video",
    }
}

/// One reply line per loop event.
pub fn ingest_reply_text(reply: &IngestReply) -> String {
    match reply {
        IngestReply::Stored {
            direction,
            index,
            item,
        } => format!(
            "➕ Stored {} **{}** at position `{}` of the {} list. Send another, or `done`.",
            item.kind.emoji(),
            item.label(*index),
            index + 1,
            direction.as_str()
        ),
        IngestReply::NamePrompt { kind } => format!(
            "🏷️ Got a {} item. What should it be called? (`skip` stores it unnamed)",
            kind_word(*kind)
        ),
        IngestReply::Rejected { reason } => format!("🤔 {reason}"),
        IngestReply::Finished { dropped_draft } => {
            let mut text = "👍 Library updated.".to_string();
            if *dropped_draft {
                text.push_str(" The unnamed draft was discarded.");
            }
            text
        }
        IngestReply::Cancelled { dropped_draft } => {
            let mut text = "🚫 Cancelled. Nothing else was changed.".to_string();
            if *dropped_draft {
                text.push_str(" The pending draft was discarded.");
            }
            text
        }
        IngestReply::Idle => "Nothing is in progress right now.".to_string(),
    }
}

/// Removal confirmation, echoing what actually went away.
pub fn removed_text(direction: Direction, position: usize, item: &MediaItem) -> String {
    format!(
        "🗑️ Removed {} **{}** from position `{}` of the {} list. Later items moved up one slot.",
        item.kind.emoji(),
        item.label(position.saturating_sub(1)),
        position,
        direction.as_str()
    )
}

/// Removal failures, phrased around the 1-based positions users see.
pub fn remove_error_text(err: &EngineError) -> String {
    match err {
        EngineError::IndexError { list, index, len } if *len == 0 => format!(
            "❌ The {} list is empty; there's nothing to remove. (asked for position {})",
            list.as_str(),
            index + 1
        ),
        EngineError::IndexError { list, index, len } => format!(
            "❌ The {} list has {} item(s); there's no position {}.",
            list.as_str(),
            len,
            index + 1
        ),
        other => format!("❌ {other}"),
    }
}
