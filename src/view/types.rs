//! Structured content handed to the presentation surfaces
//!
//! Surfaces never see raw `Place` records. The builders here turn a
//! record into display-ready content: links are sanitized, photo URLs
//! are normalized, coordinates are formatted, and action availability
//! (open-link enabled or not) is already decided. How a surface draws
//! the content is its own business.

use crate::weblink::{normalize_photo, sanitize};
use crate::Place;
use chrono::{DateTime, Local};

/// Zoom level used when flying to a place
pub const FOCUS_ZOOM: u8 = 7;

/// A link action with its open-in-new-tab preference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub url: String,
    pub new_tab: bool,
}

/// Full-detail popup content bound to a marker
#[derive(Debug, Clone, PartialEq)]
pub struct Popup {
    pub title: String,
    /// Normalized photo URL, if the record has one that sanitizes
    pub photo: Option<String>,
    /// Sanitized link; `None` renders as "no link"
    pub link: Option<Link>,
    pub note: Option<String>,
    /// Coordinates fixed to six decimals, e.g. `(59.913900, 10.752200)`
    pub coords: String,
}

/// Small hover tooltip content: title plus photo or a placeholder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tooltip {
    pub title: String,
    /// `None` renders the "no photo" placeholder
    pub photo: Option<String>,
}

/// One map marker with its bound popup and tooltip
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub id: String,
    pub lat: f64,
    pub lng: f64,
    pub popup: Popup,
    pub tooltip: Tooltip,
}

/// One list card for the filtered view
#[derive(Debug, Clone, PartialEq)]
pub struct ListCard {
    pub id: String,
    pub title: String,
    /// Coordinates plus creation date, the card's meta line
    pub meta: String,
    pub note: Option<String>,
    pub thumb: Option<String>,
    /// Open-link action is disabled when the record has no valid link
    pub open_link_enabled: bool,
}

/// Full detail of the selected record for the preview surface
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewDetail {
    pub id: String,
    pub title: String,
    pub meta: String,
    /// `None` renders the "no image" state
    pub photo: Option<String>,
    pub note: Option<String>,
    /// Sanitized link; open-link is disabled when `None`
    pub link: Option<Link>,
}

/// Format a coordinate fixed to six decimal places
#[must_use]
pub fn format_coord(value: f64) -> String {
    format!("{value:.6}")
}

/// Format a stored ISO 8601 timestamp for display, local time
///
/// Unparsable timestamps format as the empty string.
#[must_use]
pub fn format_date(iso: &str) -> String {
    DateTime::parse_from_rfc3339(iso)
        .map(|dt| dt.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default()
}

fn meta_line(place: &Place) -> String {
    let coords = format!("{}, {}", format_coord(place.lat), format_coord(place.lng));
    let date = format_date(&place.created_at);
    if date.is_empty() {
        coords
    } else {
        format!("{coords} · {date}")
    }
}

fn link_of(place: &Place) -> Option<Link> {
    let url = sanitize(&place.url);
    if url.is_empty() {
        None
    } else {
        Some(Link {
            url,
            new_tab: place.open_new_tab,
        })
    }
}

fn photo_of(place: &Place) -> Option<String> {
    let photo = normalize_photo(&place.photo);
    if photo.is_empty() {
        None
    } else {
        Some(photo)
    }
}

fn note_of(place: &Place) -> Option<String> {
    if place.note.is_empty() {
        None
    } else {
        Some(place.note.clone())
    }
}

/// Build the marker (popup + tooltip) for a record
#[must_use]
pub fn marker_for(place: &Place) -> Marker {
    Marker {
        id: place.id.clone(),
        lat: place.lat,
        lng: place.lng,
        popup: Popup {
            title: place.title.clone(),
            photo: photo_of(place),
            link: link_of(place),
            note: note_of(place),
            coords: format!(
                "({}, {})",
                format_coord(place.lat),
                format_coord(place.lng)
            ),
        },
        tooltip: Tooltip {
            title: place.title.clone(),
            photo: photo_of(place),
        },
    }
}

/// Build the list card for a record
#[must_use]
pub fn card_for(place: &Place) -> ListCard {
    ListCard {
        id: place.id.clone(),
        title: place.title.clone(),
        meta: meta_line(place),
        note: note_of(place),
        thumb: photo_of(place),
        open_link_enabled: link_of(place).is_some(),
    }
}

/// Build the preview detail for a record
#[must_use]
pub fn detail_for(place: &Place) -> PreviewDetail {
    PreviewDetail {
        id: place.id.clone(),
        title: place.title.clone(),
        meta: meta_line(place),
        photo: photo_of(place),
        note: note_of(place),
        link: link_of(place),
    }
}
