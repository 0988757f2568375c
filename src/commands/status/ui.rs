//! Builds the personal-status and team-status embeds.

use chrono::{DateTime, Utc};
use serenity::builder::CreateEmbed;

use crate::commands::attendance::logic::elapsed;
use crate::database::models::AttendanceRecord;
use crate::ui::style::{COLOR_CHECKIN, COLOR_MENU};
use crate::util::format_duration;

/// Personal status: current state, elapsed time, last finished shift.
pub fn create_status_embed(
    username: &str,
    record: Option<&AttendanceRecord>,
    now: DateTime<Utc>,
) -> CreateEmbed {
    let Some(record) = record else {
        return CreateEmbed::new()
            .title(format!("📊 {username}"))
            .description("No attendance yet. `/checkin` starts your first shift.")
            .color(COLOR_MENU);
    };
    if record.active {
        let mut lines = Vec::new();
        match record.checked_in_at {
            Some(start) => lines.push(format!(
                "🟢 On the clock since <t:{}:t>.",
                start.timestamp()
            )),
            None => lines.push("🟢 On the clock.".to_string()),
        }
        if let Some(d) = elapsed(record, now) {
            lines.push(format!("Elapsed: **{}**.", format_duration(d)));
        }
        if let Some(w) = record.workload {
            lines.push(format!("Workload: {}.", w.label()));
        }
        CreateEmbed::new()
            .title(format!("📊 {username}"))
            .description(lines.join("\n"))
            .color(COLOR_CHECKIN)
    } else {
        let mut lines = vec!["⚪ Off the clock.".to_string()];
        if let (Some(start), Some(end)) = (record.checked_in_at, record.checked_out_at) {
            lines.push(format!(
                "Last shift: <t:{}:t> → <t:{}:t> (**{}**).",
                start.timestamp(),
                end.timestamp(),
                format_duration(end - start)
            ));
        }
        if let Some(w) = record.workload {
            lines.push(format!("Last workload: {}.", w.label()));
        }
        CreateEmbed::new()
            .title(format!("📊 {username}"))
            .description(lines.join("\n"))
            .color(COLOR_MENU)
    }
}

/// Team roster split into on-the-clock and off-the-clock sections.
pub fn create_team_embed(rows: &[(u64, AttendanceRecord)], now: DateTime<Utc>) -> CreateEmbed {
    if rows.is_empty() {
        return CreateEmbed::new()
            .title("👥 Team status")
            .description("Nobody has checked in yet.")
            .color(COLOR_MENU);
    }
    let mut online = Vec::new();
    let mut offline = Vec::new();
    for (_, record) in rows {
        if record.active {
            let mut line = format!("**{}**", record.username);
            if let Some(start) = record.checked_in_at {
                line.push_str(&format!(" since <t:{}:t>", start.timestamp()));
            }
            if let Some(d) = elapsed(record, now) {
                line.push_str(&format!(" ({})", format_duration(d)));
            }
            if let Some(w) = record.workload {
                line.push_str(&format!(" {}", w.label()));
            }
            online.push(line);
        } else {
            let mut line = format!("**{}**", record.username);
            if let Some(end) = record.checked_out_at {
                line.push_str(&format!(" out <t:{}:R>", end.timestamp()));
            }
            offline.push(line);
        }
    }
    let mut embed = CreateEmbed::new().title("👥 Team status").color(COLOR_MENU);
    if !online.is_empty() {
        embed = embed.field(
            format!("🟢 On the clock ({})", online.len()),
            online.join("\n"),
            false,
        );
    }
    if !offline.is_empty() {
        embed = embed.field(
            format!("⚪ Off the clock ({})", offline.len()),
            offline.join("\n"),
            false,
        );
    }
    embed
}
