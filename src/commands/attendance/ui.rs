//! Builds the menus and messages for the check-in / check-out flows.

use serenity::builder::{CreateActionRow, CreateEmbed, CreateInteractionResponseFollowup};

use super::logic::TransitionReport;
use crate::constants::MEDIA_MENU_MAX_BUTTONS;
use crate::database::models::{Direction, MediaItem, MediaKind, Workload};
use crate::error::EngineError;
use crate::interactions::ids::{self, MediaPick};
use crate::ui::buttons::Btn;
use crate::ui::style::{COLOR_CHECKIN, COLOR_CHECKOUT, COLOR_MENU};
use crate::util::format_duration;

fn flow_color(direction: Direction) -> u32 {
    match direction {
        Direction::CheckIn => COLOR_CHECKIN,
        Direction::CheckOut => COLOR_CHECKOUT,
    }
}

fn snippet(content: &str) -> String {
    const MAX: usize = 40;
    if content.chars().count() <= MAX {
        content.to_string()
    } else {
        let cut: String = content.chars().take(MAX).collect();
        format!("{cut}…")
    }
}

fn item_line(index: usize, item: &MediaItem) -> String {
    let shown = if item.is_named() {
        item.name.clone()
    } else {
        snippet(&item.content)
    };
    format!("`{}` {} {}", index + 1, item.kind.emoji(), shown)
}

/// The media pick step: numbered buttons over a listing embed.
pub fn create_media_menu(
    direction: Direction,
    items: &[MediaItem],
) -> (CreateEmbed, Vec<CreateActionRow>) {
    let title = match direction {
        Direction::CheckIn => "✅ Checking in: pick a reaction",
        Direction::CheckOut => "🚪 Checking out: pick a reaction",
    };
    let shown = items.len().min(MEDIA_MENU_MAX_BUTTONS);
    let mut lines: Vec<String> = items
        .iter()
        .take(shown)
        .enumerate()
        .map(|(i, item)| item_line(i, item))
        .collect();
    if items.len() > shown {
        lines.push(format!(
            "…and {} more (buttons cover the first {}).",
            items.len() - shown,
            shown
        ));
    }
    let embed = CreateEmbed::new()
        .title(title)
        .description(lines.join("\n"))
        .color(COLOR_MENU);

    let mut rows: Vec<CreateActionRow> = Vec::new();
    let indices: Vec<usize> = (0..shown).collect();
    for chunk in indices.chunks(5) {
        let buttons = chunk
            .iter()
            .map(|&i| {
                Btn::secondary(
                    &ids::pick_id(direction, MediaPick::Index(i)),
                    &format!("{}", i + 1),
                )
            })
            .collect();
        rows.push(CreateActionRow::Buttons(buttons));
    }
    rows.push(CreateActionRow::Buttons(vec![
        Btn::primary(&ids::pick_id(direction, MediaPick::Random), "🎲 Surprise me"),
        Btn::danger(ids::ATT_CANCEL, "Cancel"),
    ]));
    (embed, rows)
}

/// The confirmation step. Check-in offers the workload tags; check-out only
/// confirms, since the tag set at check-in rides along unchanged.
pub fn create_workload_menu(
    direction: Direction,
    picked: &MediaItem,
    index: usize,
) -> (CreateEmbed, Vec<CreateActionRow>) {
    let title = match direction {
        Direction::CheckIn => "How loaded are you today?",
        Direction::CheckOut => "Wrap up the day?",
    };
    let embed = CreateEmbed::new()
        .title(title)
        .description(format!(
            "Reaction: {} **{}**",
            picked.kind.emoji(),
            picked.label(index)
        ))
        .color(COLOR_MENU);
    let row = match direction {
        Direction::CheckIn => CreateActionRow::Buttons(vec![
            Btn::success(&ids::load_id(Workload::Low), Workload::Low.label()),
            Btn::primary(&ids::load_id(Workload::Medium), Workload::Medium.label()),
            Btn::danger(&ids::load_id(Workload::High), Workload::High.label()),
            Btn::secondary(ids::ATT_LOAD_SKIP, "Skip"),
            Btn::danger(ids::ATT_CANCEL, "Cancel"),
        ]),
        Direction::CheckOut => CreateActionRow::Buttons(vec![
            Btn::success(ids::ATT_LOAD_SKIP, "Confirm check-out"),
            Btn::danger(ids::ATT_CANCEL, "Cancel"),
        ]),
    };
    (embed, vec![row])
}

/// Summary embed edited into the menu message once the transition lands.
pub fn transition_embed(report: &TransitionReport) -> CreateEmbed {
    let description = match report.direction {
        Direction::CheckIn => {
            let load = report
                .record
                .workload
                .map(|w| format!(" Workload: {}.", w.label()))
                .unwrap_or_default();
            format!(
                "✅ **{}** checked in.{} Have a good one!",
                report.record.username, load
            )
        }
        Direction::CheckOut => {
            let shift = report
                .duration
                .map(|d| format!(" Shift length: **{}**.", format_duration(d)))
                .unwrap_or_default();
            format!("🚪 **{}** checked out.{}", report.record.username, shift)
        }
    };
    CreateEmbed::new()
        .description(description)
        .color(flow_color(report.direction))
}

/// The reaction message itself. Photos ride an embed so they render inline;
/// URLs are left bare for the platform's own preview; text goes verbatim.
pub fn media_followup(item: &MediaItem) -> CreateInteractionResponseFollowup {
    match item.kind {
        MediaKind::Photo => CreateInteractionResponseFollowup::new()
            .embed(CreateEmbed::new().image(item.content.clone()).color(COLOR_MENU)),
        MediaKind::Animation | MediaKind::Video | MediaKind::Text => {
            CreateInteractionResponseFollowup::new().content(item.content.clone())
        }
    }
}

/// Plain-text stand-in when the media message bounces or the pinned index
/// no longer resolves.
pub fn media_fallback_text(item: Option<&MediaItem>) -> String {
    match item {
        Some(item) if item.is_named() => format!("(reaction: {})", item.name),
        Some(item) => format!("(reaction: a {} item)", item.kind.as_str()),
        None => "(the picked reaction left the library in the meantime, carrying on without it)"
            .to_string(),
    }
}

/// User-facing phrasing for engine failures. Every variant is recoverable;
/// the wording tells the user what to do next.
pub fn engine_error_text(err: &EngineError) -> String {
    match err {
        EngineError::EmptyLibrary { direction } => format!(
            "📭 The {} library is empty. Add something with `/addmedia` first.",
            direction.as_str()
        ),
        EngineError::StaleSession => {
            "⌛ That menu is no longer active. Start over with `/checkin` or `/checkout`."
                .to_string()
        }
        EngineError::InvalidTransition { active: true } => {
            "⚠️ You're already checked in. Check out first.".to_string()
        }
        EngineError::InvalidTransition { active: false } => {
            "⚠️ You're not checked in right now.".to_string()
        }
        EngineError::IndexError { .. } => {
            "❌ That item just left the library. Pick another one.".to_string()
        }
    }
}
