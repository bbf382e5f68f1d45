//! Import/export codec for the place collection
//!
//! Export produces a pretty-printed JSON array of the full canonical
//! collection. Import accepts raw text and normalizes each element into
//! a valid place record, dropping anything that cannot be repaired:
//! titles are truncated rather than rejected, links are sanitized,
//! coordinates are coerced to numbers, but an element with an empty
//! title or non-finite coordinates is discarded. The caller decides
//! whether accepted records replace or extend the existing collection.

use crate::weblink::sanitize;
use crate::{fresh_id, now_timestamp, Place, NOTE_MAX_LEN, TITLE_MAX_LEN};
use serde_json::Value;

pub mod error;

pub use error::CodecError;

/// How imported records are combined with the existing collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImportMode {
    /// Discard the current collection and install the imported one
    Replace,
    /// Keep the current collection and append the imported records
    #[default]
    Append,
}

/// Serialize the collection as a pretty-printed JSON array
///
/// Field-for-field the same format the store persists, so an export can
/// be re-imported losslessly.
///
/// # Errors
///
/// Returns `CodecError` if serialization fails.
pub fn export_json(places: &[Place]) -> Result<String, CodecError> {
    Ok(serde_json::to_string_pretty(places)?)
}

/// Parse and normalize externally supplied JSON into place records
///
/// The text must parse as a JSON array. Each non-null-object element is
/// normalized per the record schema; elements that still lack a title or
/// finite coordinates afterwards are dropped.
///
/// # Errors
///
/// Returns `CodecError::ParseError` for unparsable text,
/// `CodecError::NotAnArray` for a non-array payload, and
/// `CodecError::NoValidPlaces` when zero elements survive normalization.
pub fn import(text: &str) -> Result<Vec<Place>, CodecError> {
    let value: Value = serde_json::from_str(text)?;
    let Value::Array(elements) = value else {
        return Err(CodecError::NotAnArray);
    };

    let places: Vec<Place> = elements
        .iter()
        .filter_map(normalize_element)
        .collect();

    if places.is_empty() {
        return Err(CodecError::NoValidPlaces);
    }
    Ok(places)
}

/// Normalize one imported element into a place record
///
/// Returns `None` for non-objects and for objects whose normalized form
/// violates the record invariants (empty title, non-finite coordinates).
fn normalize_element(element: &Value) -> Option<Place> {
    let obj = element.as_object()?;

    let title: String = string_field(obj.get("title"))
        .chars()
        .take(TITLE_MAX_LEN)
        .collect();
    if title.is_empty() {
        return None;
    }

    let lat = number_field(obj.get("lat"))?;
    let lng = number_field(obj.get("lng"))?;
    if !lat.is_finite() || !lng.is_finite() {
        return None;
    }

    let id = match string_field(obj.get("id")) {
        s if s.is_empty() => fresh_id(),
        s => s,
    };

    Some(Place {
        id,
        title,
        url: sanitize(&string_field(obj.get("url"))),
        // Photo values stay raw; normalization happens at render time.
        photo: string_field(obj.get("photo")),
        note: string_field(obj.get("note")).chars().take(NOTE_MAX_LEN).collect(),
        open_new_tab: obj.get("openNewTab") != Some(&Value::Bool(false)),
        lat,
        lng,
        created_at: match string_field(obj.get("createdAt")) {
            s if s.is_empty() => now_timestamp(),
            s => s,
        },
        updated_at: match string_field(obj.get("updatedAt")) {
            s if s.is_empty() => None,
            s => Some(s),
        },
    })
}

/// Coerce an optional JSON value to a string
///
/// Strings pass through; numbers and booleans are stringified; null,
/// absent values and structured values become the empty string.
fn string_field(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

/// Coerce an optional JSON value to a number
///
/// Accepts JSON numbers and numeric strings; anything else is `None`.
fn number_field(value: Option<&Value>) -> Option<f64> {
    match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::place;

    #[test]
    fn test_import_rejects_non_array() {
        let err = import("\"not an array\"").unwrap_err();
        assert!(matches!(err, CodecError::NotAnArray));
    }

    #[test]
    fn test_import_rejects_unparsable_text() {
        let err = import("{oops").unwrap_err();
        assert!(matches!(err, CodecError::ParseError(_)));
    }

    #[test]
    fn test_import_rejects_empty_array() {
        let err = import("[]").unwrap_err();
        assert!(matches!(err, CodecError::NoValidPlaces));
    }

    #[test]
    fn test_import_drops_invalid_elements() {
        let text = r#"[
            {"title":"A","lat":1,"lng":2},
            {"title":"","lat":1,"lng":2},
            {"title":"B","lat":"x","lng":2}
        ]"#;
        let places = import(text).unwrap();
        assert_eq!(places.len(), 1);
        assert_eq!(places[0].title, "A");
        assert_eq!(places[0].lat, 1.0);
        assert_eq!(places[0].lng, 2.0);
    }

    #[test]
    fn test_import_generates_missing_ids_and_timestamps() {
        let places = import(r#"[{"title":"A","lat":1,"lng":2}]"#).unwrap();
        assert!(places[0].id.starts_with("p_"));
        assert!(!places[0].created_at.is_empty());
        assert!(places[0].updated_at.is_none());
    }

    #[test]
    fn test_import_preserves_existing_id_and_created_at() {
        let text = r#"[{"id":"p_keep","title":"A","lat":1,"lng":2,"createdAt":"2020-01-01T00:00:00Z"}]"#;
        let places = import(text).unwrap();
        assert_eq!(places[0].id, "p_keep");
        assert_eq!(places[0].created_at, "2020-01-01T00:00:00Z");
    }

    #[test]
    fn test_import_truncates_title_and_note() {
        let text = format!(
            r#"[{{"title":"{}","note":"{}","lat":1,"lng":2}}]"#,
            "t".repeat(100),
            "n".repeat(600)
        );
        let places = import(&text).unwrap();
        assert_eq!(places[0].title.chars().count(), TITLE_MAX_LEN);
        assert_eq!(places[0].note.chars().count(), NOTE_MAX_LEN);
    }

    #[test]
    fn test_import_sanitizes_url_and_keeps_photo_raw() {
        let text = r#"[{"title":"A","lat":1,"lng":2,"url":"not a url","photo":"also not a url"}]"#;
        let places = import(text).unwrap();
        assert_eq!(places[0].url, "");
        assert_eq!(places[0].photo, "also not a url");
    }

    #[test]
    fn test_import_open_new_tab_defaults_true() {
        let text = r#"[
            {"title":"A","lat":1,"lng":2},
            {"title":"B","lat":1,"lng":2,"openNewTab":false},
            {"title":"C","lat":1,"lng":2,"openNewTab":"nope"}
        ]"#;
        let places = import(text).unwrap();
        assert!(places[0].open_new_tab);
        assert!(!places[1].open_new_tab);
        // Only an explicit boolean false disables it.
        assert!(places[2].open_new_tab);
    }

    #[test]
    fn test_import_coerces_numeric_strings() {
        let places = import(r#"[{"title":"A","lat":"1.5","lng":" -2.25 "}]"#).unwrap();
        assert_eq!(places[0].lat, 1.5);
        assert_eq!(places[0].lng, -2.25);
    }

    #[test]
    fn test_import_skips_non_object_elements() {
        let places = import(r#"[null, 7, "x", {"title":"A","lat":1,"lng":2}]"#).unwrap();
        assert_eq!(places.len(), 1);
    }

    #[test]
    fn test_export_then_import_roundtrips() {
        let mut original = vec![
            place("p_1", "Harbor", 59.91, 10.75),
            place("p_2", "Bridge", 48.2, 16.37),
        ];
        original[1].url = "https://example.com/bridge".into();
        original[1].note = "stone arches".into();
        original[1].open_new_tab = false;

        let exported = export_json(&original).unwrap();
        let imported = import(&exported).unwrap();
        assert_eq!(imported, original);
    }
}
