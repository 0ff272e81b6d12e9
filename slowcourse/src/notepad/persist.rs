//! Saved notes format
//!
//! One JSON record per track under the key `notepad_<trackId>`:
//!
//! ```json
//! { "content": { "text": "...", "styles": [...], "images": [...], "drawing": "<base64 png>" },
//!   "savedAt": "2026-01-01T12:00:00.000Z" }
//! ```
//!
//! Binary payloads (embedded image files, the drawing raster) are base64.

use std::sync::Arc;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use slowcore::storage::{LocalStore, StorageError};
use thiserror::Error;

use super::document::{CharStyle, EmbeddedImage, RichDocument};
use super::drawing::DrawingLayer;
use super::images::decode_image;
use super::NoteDocument;

#[derive(Error, Debug)]
pub enum NotepadError {
    #[error("storage: {0}")]
    Storage(#[from] StorageError),
    #[error("IO: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("image: {0}")]
    Image(#[from] image::ImageError),
    #[error("base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("bad timestamp: {0}")]
    Timestamp(#[from] chrono::ParseError),
    #[error("corrupt notes: {0}")]
    Corrupt(String),
}

#[derive(Debug, Serialize, Deserialize)]
struct SavedNotes {
    content: NotepadContent,
    #[serde(rename = "savedAt")]
    saved_at: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct NotepadContent {
    #[serde(default)]
    text: String,
    #[serde(default)]
    styles: Vec<CharStyle>,
    #[serde(default)]
    images: Vec<StoredImage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    drawing: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredImage {
    data: String,
    width: f32,
    height: f32,
}

/// Storage key for a track. ASCII letters, digits and `-` pass through;
/// every other byte, `_` included, becomes `_` plus two hex digits, so
/// distinct ids never share a key.
pub fn storage_key(track_id: &str) -> String {
    let mut key = String::from("notepad_");
    for byte in track_id.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'-' {
            key.push(byte as char);
        } else {
            key.push_str(&format!("_{byte:02x}"));
        }
    }
    key
}

pub fn encode(doc: &NoteDocument, saved_at: DateTime<Utc>) -> Result<String, NotepadError> {
    let images = doc
        .rich
        .images()
        .iter()
        .map(|img| StoredImage {
            data: BASE64.encode(img.encoded.as_slice()),
            width: img.display_size[0],
            height: img.display_size[1],
        })
        .collect();
    let drawing = doc.drawing.to_png()?.map(|png| BASE64.encode(png));
    let record = SavedNotes {
        content: NotepadContent {
            text: doc.rich.text().to_string(),
            styles: doc.rich.styles().to_vec(),
            images,
            drawing,
        },
        saved_at: saved_at.to_rfc3339_opts(SecondsFormat::Millis, true),
    };
    Ok(serde_json::to_string(&record)?)
}

pub fn decode(json: &str) -> Result<(NoteDocument, DateTime<Utc>), NotepadError> {
    let record: SavedNotes = serde_json::from_str(json)?;
    let saved_at = DateTime::parse_from_rfc3339(&record.saved_at)?.with_timezone(&Utc);
    let content = record.content;

    let mut images = Vec::with_capacity(content.images.len());
    for stored in content.images {
        let bytes = BASE64.decode(stored.data.as_bytes())?;
        let pixels = decode_image(&bytes)?;
        images.push(EmbeddedImage::new(
            Arc::new(bytes),
            Arc::new(pixels),
            [stored.width, stored.height],
        ));
    }
    let rich = RichDocument::from_parts(content.text, content.styles, images)
        .map_err(NotepadError::Corrupt)?;

    let drawing = match content.drawing {
        Some(b64) => DrawingLayer::from_png(&BASE64.decode(b64.as_bytes())?)?,
        None => DrawingLayer::default(),
    };
    Ok((NoteDocument { rich, drawing }, saved_at))
}

/// Write the document for `track_id`. Returns the timestamp recorded.
pub fn save(store: &LocalStore, track_id: &str, doc: &NoteDocument) -> Result<DateTime<Utc>, NotepadError> {
    let now = Utc::now();
    let json = encode(doc, now)?;
    store.set(&storage_key(track_id), &json)?;
    Ok(now)
}

/// Read the document for `track_id`. `Ok(None)` when nothing was saved.
pub fn load(store: &LocalStore, track_id: &str) -> Result<Option<(NoteDocument, DateTime<Utc>)>, NotepadError> {
    match store.get(&storage_key(track_id))? {
        Some(json) => decode(&json).map(Some),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notepad::document::Mark;
    use crate::notepad::drawing::Tool;

    fn sample() -> NoteDocument {
        let mut doc = NoteDocument::default();
        doc.rich.insert_str(0, "grid systems\nmargins", CharStyle::default());
        doc.rich.apply_mark(0..4, Mark::Bold);
        doc.rich.apply_mark(5..12, Mark::Highlight);
        doc.drawing.ensure_covers(120, 80);
        doc.drawing.stroke(&[[4.0, 4.0], [100.0, 60.0]], Tool::Pen.brush([0, 0, 255]).unwrap());
        doc
    }

    #[test]
    fn test_storage_key() {
        assert_eq!(storage_key("design-101"), "notepad_design-101");
        assert_eq!(storage_key("a/b c"), "notepad_a_2fb_20c");
        assert_eq!(storage_key("a_b"), "notepad_a_5fb");
        assert_ne!(storage_key("a/b"), storage_key("a_b"));
        assert_eq!(storage_key("café"), "notepad_caf_c3_a9");
    }

    #[test]
    fn test_similar_ids_keep_separate_notes() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path());
        save(&store, "a/b", &sample()).unwrap();
        assert!(load(&store, "a_b").unwrap().is_none());
        assert!(load(&store, "a/b").unwrap().is_some());
    }

    #[test]
    fn test_record_shape() {
        let json = encode(&sample(), Utc::now()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value["content"]["text"].is_string());
        assert!(value["content"]["drawing"].is_string());
        let saved_at = value["savedAt"].as_str().unwrap();
        assert!(saved_at.ends_with('Z'));
        assert!(DateTime::parse_from_rfc3339(saved_at).is_ok());
    }

    #[test]
    fn test_save_then_load_reproduces_document() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path());
        let doc = sample();
        save(&store, "intro", &doc).unwrap();
        let (loaded, _) = load(&store, "intro").unwrap().unwrap();
        assert_eq!(loaded, doc);
    }

    #[test]
    fn test_tracks_are_separate() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path());
        save(&store, "one", &sample()).unwrap();
        assert!(load(&store, "two").unwrap().is_none());
    }

    #[test]
    fn test_corrupt_record_is_an_error() {
        assert!(decode("not json").is_err());
        let mismatched = r#"{"content":{"text":"ab","styles":[]},"savedAt":"2026-01-01T00:00:00.000Z"}"#;
        assert!(matches!(decode(mismatched), Err(NotepadError::Corrupt(_))));
        let bad_time = r#"{"content":{"text":"","styles":[]},"savedAt":"yesterday"}"#;
        assert!(matches!(decode(bad_time), Err(NotepadError::Timestamp(_))));
    }
}
