//! Link sanitization and photo URL normalization
//!
//! This module is the single gate against malformed link values: raw user
//! input is either parsed into a canonical absolute URL or reduced to the
//! empty string, which every downstream consumer treats as "no link"
//! rather than as an error.
//!
//! It also rewrites Google Drive share links into direct-thumbnail URLs
//! so that shared photos render as plain images.

use regex::Regex;
use std::sync::OnceLock;
use url::Url;

/// Thumbnail width requested from the Drive thumbnail endpoint
const DRIVE_THUMB_SIZE: &str = "w1000";

fn drive_file_path_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // Share links look like /file/d/<id>/view; ids are at least 10
        // characters of [A-Za-z0-9_-].
        Regex::new(r"/file/d/([A-Za-z0-9_-]{10,})").expect("drive path pattern is valid")
    })
}

/// Sanitize a raw link value into a canonical absolute URL
///
/// Returns the canonical string form of the parsed URL, or the empty
/// string when the input is empty or not an absolute URL. The empty
/// string means "no link" downstream, never an error.
///
/// # Examples
/// ```
/// use pinmark::weblink::sanitize;
/// assert_eq!(sanitize("https://example.com/a"), "https://example.com/a");
/// assert_eq!(sanitize("not a url"), "");
/// ```
#[must_use]
pub fn sanitize(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }
    match Url::parse(raw) {
        Ok(url) => url.to_string(),
        Err(_) => String::new(),
    }
}

/// Extract a Google Drive file id from a sanitized URL
///
/// Recognizes hosts ending in `drive.google.com` and pulls the id either
/// from the `/file/d/<id>` path segment or from the `id` query parameter.
/// Returns `None` for non-Drive URLs or when no id is present.
#[must_use]
pub fn extract_drive_id(sanitized: &str) -> Option<String> {
    let url = Url::parse(sanitized).ok()?;
    let host = url.host_str()?;
    if host != "drive.google.com" && !host.ends_with(".drive.google.com") {
        return None;
    }

    if let Some(captures) = drive_file_path_re().captures(url.path()) {
        return Some(captures[1].to_string());
    }

    url.query_pairs()
        .find(|(key, _)| key == "id")
        .map(|(_, value)| value.into_owned())
}

/// Normalize a raw photo value into a directly embeddable image URL
///
/// Sanitizes first; a Drive share link with a resolvable file id is
/// rewritten to the direct-thumbnail endpoint, anything else passes
/// through unchanged. Absence of a resolvable id is a graceful fallback
/// to the sanitized URL, not an error.
#[must_use]
pub fn normalize_photo(raw: &str) -> String {
    let clean = sanitize(raw);
    if clean.is_empty() {
        return clean;
    }
    match extract_drive_id(&clean) {
        Some(id) => {
            let encoded: String =
                url::form_urlencoded::byte_serialize(id.as_bytes()).collect();
            format!("https://drive.google.com/thumbnail?id={encoded}&sz={DRIVE_THUMB_SIZE}")
        }
        None => clean,
    }
}
