//! Classification must be deterministic and total: every submission maps to
//! exactly one kind, URL markers first, then the attachment's content type,
//! then the bare-URL default.

use punchclock_bot::database::models::MediaKind;
use punchclock_bot::session::classify::{RawSubmission, classify};

fn text(s: &str) -> RawSubmission {
    RawSubmission {
        text: s.to_string(),
        ..Default::default()
    }
}

fn attachment(url: &str, content_type: Option<&str>) -> RawSubmission {
    RawSubmission {
        text: String::new(),
        attachment_url: Some(url.to_string()),
        attachment_content_type: content_type.map(str::to_string),
    }
}

#[test]
fn plain_text_is_text() {
    let (kind, content) = classify(&text("good morning everyone"));
    assert_eq!(kind, MediaKind::Text);
    assert_eq!(content, "good morning everyone");
}

#[test]
fn url_markers_decide_the_kind() {
    let cases = [
        ("https://example.com/cat.gif", MediaKind::Animation),
        ("https://giphy.com/clips/xyz", MediaKind::Animation),
        ("https://tenor.com/view/hello", MediaKind::Animation),
        ("https://example.com/clip.mp4", MediaKind::Video),
        ("https://example.com/clip.webm", MediaKind::Video),
        ("https://example.com/pic.png", MediaKind::Photo),
        ("https://example.com/pic.JPEG", MediaKind::Photo),
    ];
    for (url, expected) in cases {
        let (kind, content) = classify(&text(url));
        assert_eq!(kind, expected, "wrong kind for {url}");
        assert_eq!(content, url);
    }
}

#[test]
fn bare_url_defaults_to_animation() {
    let (kind, _) = classify(&text("https://example.com/something"));
    assert_eq!(kind, MediaKind::Animation);
}

#[test]
fn url_with_whitespace_is_not_a_url() {
    let (kind, _) = classify(&text("https://example.com is where it lives"));
    assert_eq!(kind, MediaKind::Text);
}

#[test]
fn attachment_content_type_sniffing() {
    let cases = [
        (Some("image/gif"), MediaKind::Animation),
        (Some("image/png"), MediaKind::Photo),
        (Some("video/mp4"), MediaKind::Video),
    ];
    for (ct, expected) in cases {
        let raw = attachment("https://cdn.example.com/a/b/file", ct);
        let (kind, content) = classify(&raw);
        assert_eq!(kind, expected, "wrong kind for content type {ct:?}");
        assert_eq!(content, "https://cdn.example.com/a/b/file");
    }
}

#[test]
fn attachment_url_marker_beats_content_type() {
    // A .gif filename wins even when the platform reports a generic type.
    let raw = attachment("https://cdn.example.com/a/b/reaction.gif", Some("image/png"));
    let (kind, _) = classify(&raw);
    assert_eq!(kind, MediaKind::Animation);
}

#[test]
fn unrecognized_attachment_keeps_the_reference_as_text() {
    let raw = attachment("https://cdn.example.com/a/b/notes.pdf", Some("application/pdf"));
    let (kind, content) = classify(&raw);
    assert_eq!(kind, MediaKind::Text);
    assert_eq!(content, "https://cdn.example.com/a/b/notes.pdf");
}

#[test]
fn attachment_wins_over_message_text() {
    let raw = RawSubmission {
        text: "look at this".to_string(),
        attachment_url: Some("https://cdn.example.com/a/b/pic.png".to_string()),
        attachment_content_type: Some("image/png".to_string()),
    };
    let (kind, content) = classify(&raw);
    assert_eq!(kind, MediaKind::Photo);
    assert_eq!(content, "https://cdn.example.com/a/b/pic.png");
}

#[test]
fn classification_is_deterministic() {
    let raw = text("https://example.com/cat.gif");
    assert_eq!(classify(&raw), classify(&raw));
}
