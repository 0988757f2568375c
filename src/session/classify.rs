//! Deterministic classification of raw chat submissions into media kinds.
//!
//! Every submission classifies to something; anything unrecognized lands on
//! `Text`. The rules run in a fixed order so the same input always yields
//! the same kind: URL markers first, then the attachment's reported content
//! type, then the bare-URL default.

use crate::database::models::MediaKind;

/// A raw inbound submission as the chat transport hands it over: free text
/// plus at most one attachment (URL and content type as reported).
#[derive(Debug, Clone, Default)]
pub struct RawSubmission {
    pub text: String,
    pub attachment_url: Option<String>,
    pub attachment_content_type: Option<String>,
}

const ANIMATION_MARKERS: &[&str] = &[".gif", "giphy.com", "tenor.com"];
const VIDEO_MARKERS: &[&str] = &[".mp4", ".mov", ".webm", ".avi"];
const PHOTO_MARKERS: &[&str] = &[".png", ".jpg", ".jpeg", ".webp"];

/// Classifies a submission and picks the content string to store. The
/// attachment wins over the message text when both are present.
pub fn classify(raw: &RawSubmission) -> (MediaKind, String) {
    if let Some(url) = &raw.attachment_url {
        if let Some(kind) = kind_from_url_markers(url) {
            return (kind, url.clone());
        }
        if let Some(kind) = kind_from_content_type(raw.attachment_content_type.as_deref()) {
            return (kind, url.clone());
        }
        // Unrecognized attachment: keep the reference but store it as text.
        return (MediaKind::Text, url.clone());
    }

    let text = raw.text.trim();
    if is_url(text) {
        let kind = kind_from_url_markers(text).unwrap_or(MediaKind::Animation);
        return (kind, text.to_string());
    }
    (MediaKind::Text, text.to_string())
}

fn is_url(s: &str) -> bool {
    (s.starts_with("http://") || s.starts_with("https://"))
        && !s.contains(char::is_whitespace)
}

fn kind_from_url_markers(url: &str) -> Option<MediaKind> {
    let lower = url.to_lowercase();
    if ANIMATION_MARKERS.iter().any(|m| lower.contains(m)) {
        return Some(MediaKind::Animation);
    }
    if VIDEO_MARKERS.iter().any(|m| lower.contains(m)) {
        return Some(MediaKind::Video);
    }
    if PHOTO_MARKERS.iter().any(|m| lower.contains(m)) {
        return Some(MediaKind::Photo);
    }
    None
}

fn kind_from_content_type(content_type: Option<&str>) -> Option<MediaKind> {
    let ct = content_type?;
    if ct.eq_ignore_ascii_case("image/gif") {
        return Some(MediaKind::Animation);
    }
    if ct.starts_with("image/") {
        return Some(MediaKind::Photo);
    }
    if ct.starts_with("video/") {
        return Some(MediaKind::Video);
    }
    None
}
