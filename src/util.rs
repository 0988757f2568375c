//! Misc small utilities shared across modules.
use chrono::Duration;

/// Formats a `chrono::Duration` into a compact shift-length string.
/// Negative inputs (skewed timestamps across restarts) clamp to zero.
pub fn format_duration(dur: Duration) -> String {
    let dur = if dur < Duration::zero() {
        Duration::zero()
    } else {
        dur
    };
    let hours = dur.num_hours();
    let minutes = dur.num_minutes() % 60;
    let seconds = dur.num_seconds() % 60;

    let mut parts = Vec::new();
    if hours > 0 {
        parts.push(format!("{}h", hours));
    }
    if minutes > 0 {
        parts.push(format!("{}m", minutes));
    }
    if seconds > 0 && hours == 0 {
        parts.push(format!("{}s", seconds));
    }

    if parts.is_empty() {
        "less than a second".to_string()
    } else {
        parts.join(" ")
    }
}
