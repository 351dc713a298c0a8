//! # Media References
//!
//! Images and videos are plain strings in the sheet. Images are shown as-is;
//! videos are either direct file references or links to a hosted video
//! platform, which get rewritten to an embeddable URL.

use std::sync::LazyLock;

use regex_lite::Regex;

const EMBED_PREFIX: &str = "https://www.youtube.com/embed/";

/// Matches the usual share/watch/embed URL shapes and captures the 11-char id.
static VIDEO_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?:youtube\.com/(?:[^/]+/.+/|(?:v|e(?:mbed)?)/|.*[?&]v=)|youtu\.be/)([^"&?/\s]{11})"#)
        .expect("video id pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    pub fn label(self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
        }
    }
}

/// Fullscreen media mode of the detail overlay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MediaView {
    #[default]
    None,
    Image,
    Video,
}

impl From<MediaKind> for MediaView {
    fn from(kind: MediaKind) -> Self {
        match kind {
            MediaKind::Image => MediaView::Image,
            MediaKind::Video => MediaView::Video,
        }
    }
}

/// A resolved video reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoRef {
    /// A file or URL played directly.
    Direct(String),
    /// An embeddable hosted-player URL.
    Embed(String),
    /// A hosted-platform link no video id could be extracted from.
    Unresolvable(String),
}

impl VideoRef {
    /// The URL to hand to an external player, if there is one.
    pub fn playable_url(&self) -> Option<&str> {
        match self {
            VideoRef::Direct(url) | VideoRef::Embed(url) => Some(url),
            VideoRef::Unresolvable(_) => None,
        }
    }
}

pub fn is_hosted_video(url: &str) -> bool {
    url.contains("youtube.com") || url.contains("youtu.be")
}

/// Extracts the 11-character video id from a hosted-platform URL.
pub fn video_id(url: &str) -> Option<&str> {
    VIDEO_ID
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

pub fn resolve_video(url: &str) -> VideoRef {
    if !is_hosted_video(url) {
        return VideoRef::Direct(url.to_string());
    }
    if url.contains("embed") {
        return VideoRef::Embed(url.to_string());
    }
    match video_id(url) {
        Some(id) => VideoRef::Embed(format!("{EMBED_PREFIX}{id}")),
        None => {
            log::warn!("No video id found in hosted video link: {}", url);
            VideoRef::Unresolvable(url.to_string())
        }
    }
}
