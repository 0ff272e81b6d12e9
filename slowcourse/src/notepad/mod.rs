//! Notepad: rich text with a freehand drawing layer over it
//!
//! `NotepadEngine` owns the document, the editing cursor, the active tool and
//! the undo history. Every mutation goes through it so that a snapshot can be
//! recorded; the view only translates input into engine calls.

pub mod document;
pub mod drawing;
pub mod history;
pub mod images;
pub mod layout;
pub mod persist;
pub mod view;

use std::ops::Range;

use chrono::{DateTime, Utc};
use slowcore::storage::LocalStore;

pub use document::{CharStyle, EmbeddedImage, Mark, RichDocument, Segment, FONT_SIZES};
pub use drawing::{Brush, DrawingLayer, Tool, PEN_COLORS};
pub use images::ImageSource;
pub use persist::NotepadError;

use history::History;
use images::DecodeQueue;

/// Everything that is undoable and saved: the text and the drawing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NoteDocument {
    pub rich: RichDocument,
    pub drawing: DrawingLayer,
}

impl NoteDocument {
    pub fn is_empty(&self) -> bool {
        self.rich.is_empty() && self.drawing.is_blank()
    }
}

/// Outcome of the last user-visible operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Status {
    Saved(DateTime<Utc>),
    Error(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EditKind {
    Typing,
    Other,
}

pub struct NotepadEngine {
    track_id: String,
    store: LocalStore,
    doc: NoteDocument,
    history: History<NoteDocument>,
    last_edit: Option<EditKind>,
    /// Largest surface the view has asked for. Snapshots may be smaller;
    /// they are padded to this on restore.
    canvas_extent: (u32, u32),

    tool: Tool,
    pen_color: [u8; 3],
    typing_style: CharStyle,

    cursor: usize,
    anchor: Option<usize>,

    stroke: Option<Vec<[f32; 2]>>,
    decodes: DecodeQueue,
    clear_requested: bool,
    status: Option<Status>,
    saved_at: Option<DateTime<Utc>>,
}

impl NotepadEngine {
    /// Open the notes saved for `track_id`. A missing or unreadable record
    /// gives an empty document.
    pub fn load_for_track(store: LocalStore, track_id: &str) -> Self {
        let (doc, saved_at) = match persist::load(&store, track_id) {
            Ok(Some((doc, saved_at))) => {
                tracing::info!(track = track_id, %saved_at, "loaded notes");
                (doc, Some(saved_at))
            }
            Ok(None) => (NoteDocument::default(), None),
            Err(e) => {
                tracing::warn!(track = track_id, error = %e, "failed to load notes, starting empty");
                (NoteDocument::default(), None)
            }
        };
        let cursor = doc.rich.char_count();
        Self {
            track_id: track_id.to_string(),
            store,
            history: History::new(doc.clone()),
            doc,
            last_edit: None,
            canvas_extent: (0, 0),
            tool: Tool::Text,
            pen_color: PEN_COLORS[0].1,
            typing_style: CharStyle::default(),
            cursor,
            anchor: None,
            stroke: None,
            decodes: DecodeQueue::default(),
            clear_requested: false,
            status: None,
            saved_at,
        }
    }

    pub fn track_id(&self) -> &str {
        &self.track_id
    }

    pub fn document(&self) -> &NoteDocument {
        &self.doc
    }

    pub fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }

    pub fn dismiss_status(&mut self) {
        self.status = None;
    }

    pub fn saved_at(&self) -> Option<DateTime<Utc>> {
        self.saved_at
    }

    // ---------------------------------------------------------------
    // History
    // ---------------------------------------------------------------

    fn commit(&mut self, kind: EditKind) {
        if kind == EditKind::Typing && self.last_edit == Some(EditKind::Typing) {
            self.history.replace_current(self.doc.clone());
        } else {
            self.history.record(self.doc.clone());
        }
        self.last_edit = Some(kind);
    }

    fn restore(&mut self, snapshot: NoteDocument) {
        self.doc = snapshot;
        let (width, height) = self.canvas_extent;
        if width > 0 {
            self.doc.drawing.ensure_covers(width, height);
        }
        self.cursor = self.cursor.min(self.doc.rich.char_count());
        self.anchor = None;
        self.stroke = None;
        self.last_edit = None;
    }

    pub fn undo(&mut self) -> bool {
        match self.history.undo().cloned() {
            Some(snapshot) => {
                self.restore(snapshot);
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.history.redo().cloned() {
            Some(snapshot) => {
                self.restore(snapshot);
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // ---------------------------------------------------------------
    // Rich text
    // ---------------------------------------------------------------

    pub fn content(&self) -> &RichDocument {
        &self.doc.rich
    }

    /// Replace the text layer wholesale as one undo step.
    pub fn set_content(&mut self, rich: RichDocument) {
        self.doc.rich = rich;
        self.cursor = self.cursor.min(self.doc.rich.char_count());
        self.anchor = None;
        self.commit(EditKind::Other);
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Selected char range, if any.
    pub fn selection(&self) -> Option<Range<usize>> {
        let anchor = self.anchor?;
        if anchor == self.cursor {
            return None;
        }
        Some(anchor.min(self.cursor)..anchor.max(self.cursor))
    }

    /// Move the cursor. With `extend`, the selection grows from where it was.
    pub fn set_cursor(&mut self, pos: usize, extend: bool) {
        let pos = pos.min(self.doc.rich.char_count());
        if extend {
            if self.anchor.is_none() {
                self.anchor = Some(self.cursor);
            }
        } else {
            self.anchor = None;
        }
        self.cursor = pos;
        self.last_edit = None;
    }

    pub fn select_all(&mut self) {
        self.anchor = Some(0);
        self.cursor = self.doc.rich.char_count();
    }

    pub fn selected_text(&self) -> Option<String> {
        self.selection().map(|r| {
            self.doc
                .rich
                .slice(r)
                .chars()
                .filter(|&c| c != document::OBJECT_MARKER)
                .collect()
        })
    }

    /// Style new keystrokes will get.
    pub fn typing_style(&self) -> CharStyle {
        self.typing_style
    }

    /// Insert `text` at `position` in `style`. Returns chars inserted.
    pub fn insert_text_at(&mut self, position: usize, text: &str, style: CharStyle) -> usize {
        let position = position.min(self.doc.rich.char_count());
        let n = self.doc.rich.insert_str(position, text, style);
        if n > 0 {
            if self.cursor >= position {
                self.cursor += n;
            }
            self.anchor = None;
            let kind = if text.contains('\n') { EditKind::Other } else { EditKind::Typing };
            self.commit(kind);
        }
        n
    }

    /// Type at the cursor, replacing the selection.
    pub fn insert_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if let Some(range) = self.selection() {
            self.doc.rich.delete_range(range.clone());
            self.cursor = range.start;
            self.anchor = None;
            self.last_edit = None;
        }
        let style = self.typing_style;
        let at = self.cursor;
        self.insert_text_at(at, text, style);
    }

    pub fn delete_backward(&mut self) {
        if self.delete_selection() {
            return;
        }
        if self.cursor == 0 {
            return;
        }
        self.doc.rich.delete_range(self.cursor - 1..self.cursor);
        self.cursor -= 1;
        self.commit(EditKind::Typing);
    }

    pub fn delete_forward(&mut self) {
        if self.delete_selection() {
            return;
        }
        if self.cursor >= self.doc.rich.char_count() {
            return;
        }
        self.doc.rich.delete_range(self.cursor..self.cursor + 1);
        self.commit(EditKind::Typing);
    }

    /// Delete the selection if there is one.
    pub fn delete_selection(&mut self) -> bool {
        let Some(range) = self.selection() else {
            return false;
        };
        self.doc.rich.delete_range(range.clone());
        self.cursor = range.start;
        self.anchor = None;
        self.commit(EditKind::Other);
        true
    }

    /// Format the selection. Without one, the mark applies to what is typed
    /// next.
    pub fn apply_mark(&mut self, mark: Mark) {
        match self.selection() {
            Some(range) => {
                if self.doc.rich.apply_mark(range, mark) {
                    self.commit(EditKind::Other);
                }
            }
            None => RichDocument::toggle_on(&mut self.typing_style, mark),
        }
    }

    /// Whether the mark is active for the selection or, without one, for
    /// typing.
    pub fn mark_active(&self, mark: Mark) -> bool {
        match self.selection() {
            Some(range) => self.doc.rich.has_mark(range, mark),
            None => mark.is_set(&self.typing_style),
        }
    }

    pub fn set_font_size(&mut self, size: f32) {
        self.typing_style.font_size = size;
        if self.selection().is_some() {
            self.apply_mark(Mark::Size(size));
        }
    }

    // ---------------------------------------------------------------
    // Images
    // ---------------------------------------------------------------

    /// Queue an image; it is inserted once decoded on the next pump.
    pub fn request_image(&mut self, source: ImageSource) {
        self.decodes.push(source);
    }

    pub fn has_pending_images(&self) -> bool {
        !self.decodes.is_empty()
    }

    /// Decode queued images and insert each at the cursor. Returns how many
    /// were inserted.
    pub fn pump_decodes(&mut self) -> usize {
        let mut inserted = 0;
        for (label, result) in self.decodes.drain() {
            match result {
                Ok(image) => {
                    self.insert_image(image);
                    inserted += 1;
                }
                Err(e) => {
                    tracing::warn!(source = %label, error = %e, "could not insert image");
                    self.status = Some(Status::Error(format!("could not insert image: {e}")));
                }
            }
        }
        inserted
    }

    /// Place a decoded image at the cursor, replacing the selection.
    pub fn insert_image(&mut self, image: EmbeddedImage) {
        if let Some(range) = self.selection() {
            self.doc.rich.delete_range(range.clone());
            self.cursor = range.start;
            self.anchor = None;
        }
        self.doc.rich.insert_image(self.cursor, image, self.typing_style);
        self.cursor += 1;
        self.commit(EditKind::Other);
    }

    // ---------------------------------------------------------------
    // Drawing
    // ---------------------------------------------------------------

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn set_tool(&mut self, tool: Tool) {
        if tool != self.tool {
            self.stroke = None;
            self.tool = tool;
        }
    }

    pub fn pen_color(&self) -> [u8; 3] {
        self.pen_color
    }

    pub fn set_pen_color(&mut self, color: [u8; 3]) {
        self.pen_color = color;
    }

    /// Grow the drawing surface to cover the text. Not an undo step and
    /// history is left alone: undo and redo pad their snapshot to the
    /// largest size asked for so far.
    pub fn ensure_canvas(&mut self, width: u32, height: u32) {
        self.canvas_extent.0 = self.canvas_extent.0.max(width);
        self.canvas_extent.1 = self.canvas_extent.1.max(height);
        self.doc.drawing.ensure_covers(width, height);
    }

    pub fn begin_stroke(&mut self, at: [f32; 2]) {
        if self.tool.is_drawing() {
            self.stroke = Some(vec![at]);
        }
    }

    pub fn extend_stroke(&mut self, at: [f32; 2]) {
        if let Some(points) = self.stroke.as_mut() {
            if points.last() != Some(&at) {
                points.push(at);
            }
        }
    }

    /// Points of the stroke being drawn, for live preview.
    pub fn stroke_in_progress(&self) -> Option<&[[f32; 2]]> {
        self.stroke.as_deref()
    }

    /// Finish the stroke and paint it with the current tool.
    pub fn end_stroke(&mut self) -> bool {
        let Some(points) = self.stroke.take() else {
            return false;
        };
        match self.tool.brush(self.pen_color) {
            Some(brush) => self.draw(&points, brush),
            None => false,
        }
    }

    /// Paint a stroke into the drawing layer as one undo step.
    pub fn draw(&mut self, points: &[[f32; 2]], brush: Brush) -> bool {
        if points.is_empty() {
            return false;
        }
        let max_x = points.iter().map(|p| p[0]).fold(0.0f32, f32::max);
        let max_y = points.iter().map(|p| p[1]).fold(0.0f32, f32::max);
        if self.doc.drawing.size().is_none() {
            self.doc.drawing.ensure_covers(max_x.ceil() as u32 + 1, max_y.ceil() as u32 + 1);
        }
        if self.doc.drawing.stroke(points, brush) {
            self.commit(EditKind::Other);
            true
        } else {
            false
        }
    }

    /// Wipe the drawing, keep the text. Undoable.
    pub fn clear_drawing(&mut self) {
        if !self.doc.drawing.is_blank() {
            self.doc.drawing.clear();
            self.commit(EditKind::Other);
        }
    }

    // ---------------------------------------------------------------
    // Clear / save
    // ---------------------------------------------------------------

    /// Ask to clear everything. Nothing changes until confirmed.
    pub fn request_clear(&mut self) {
        self.clear_requested = true;
    }

    pub fn clear_pending(&self) -> bool {
        self.clear_requested
    }

    /// Answer the clear prompt. Confirming records the empty document as a
    /// new history entry; declining leaves everything as it was.
    pub fn confirm_clear(&mut self, confirmed: bool) {
        if !std::mem::take(&mut self.clear_requested) || !confirmed {
            return;
        }
        self.doc.drawing.clear();
        self.stroke = None;
        self.set_content(RichDocument::new());
    }

    /// Write the document under the track key.
    pub fn save(&mut self) -> Result<DateTime<Utc>, NotepadError> {
        match persist::save(&self.store, &self.track_id, &self.doc) {
            Ok(at) => {
                tracing::info!(track = %self.track_id, "notes saved");
                self.saved_at = Some(at);
                self.status = Some(Status::Saved(at));
                Ok(at)
            }
            Err(e) => {
                tracing::error!(track = %self.track_id, error = %e, "failed to save notes");
                self.status = Some(Status::Error(format!("notes not saved: {e}")));
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notepad::images::png_bytes;

    fn engine() -> (tempfile::TempDir, NotepadEngine) {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path());
        let engine = NotepadEngine::load_for_track(store, "intro");
        (dir, engine)
    }

    fn pen(engine: &NotepadEngine) -> Brush {
        Tool::Pen.brush(engine.pen_color()).unwrap()
    }

    #[test]
    fn test_starts_empty_without_record() {
        let (_dir, engine) = engine();
        assert!(engine.document().is_empty());
        assert!(!engine.can_undo());
        assert!(!engine.can_redo());
    }

    #[test]
    fn test_corrupt_record_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path());
        store.set(&persist::storage_key("intro"), "{ not json").unwrap();
        let engine = NotepadEngine::load_for_track(store, "intro");
        assert!(engine.document().is_empty());
        assert!(engine.saved_at().is_none());
    }

    #[test]
    fn test_redo_after_undo_restores_document() {
        let (_dir, mut e) = engine();
        e.insert_text("hello");
        e.insert_text("\n");
        let brush = pen(&e);
        e.draw(&[[5.0, 5.0], [50.0, 50.0]], brush);
        let d = e.document().clone();
        assert!(e.undo());
        assert_ne!(e.document(), &d);
        assert!(e.redo());
        assert_eq!(e.document(), &d);
    }

    #[test]
    fn test_new_draw_after_undo_drops_redo() {
        let (_dir, mut e) = engine();
        let brush = pen(&e);
        e.draw(&[[5.0, 5.0], [50.0, 5.0]], brush);
        e.draw(&[[5.0, 20.0], [50.0, 20.0]], brush);
        assert!(e.undo());
        e.draw(&[[5.0, 40.0], [50.0, 40.0]], brush);
        let before = e.document().clone();
        assert!(!e.redo());
        assert_eq!(e.document(), &before);
    }

    #[test]
    fn test_undo_redo_noop_at_boundaries() {
        let (_dir, mut e) = engine();
        assert!(!e.undo());
        e.insert_text("a");
        assert!(!e.redo());
        assert!(e.undo());
        assert!(!e.undo());
        assert!(e.document().is_empty());
    }

    #[test]
    fn test_typing_coalesces_into_one_step() {
        let (_dir, mut e) = engine();
        for c in ["a", "b", "c"] {
            e.insert_text(c);
        }
        assert_eq!(e.content().text(), "abc");
        assert!(e.undo());
        assert_eq!(e.content().text(), "");
    }

    #[test]
    fn test_typing_after_undo_starts_new_step() {
        let (_dir, mut e) = engine();
        e.insert_text("ab");
        e.apply_mark(Mark::Bold);
        e.set_cursor(2, false);
        e.insert_text("\n");
        e.insert_text("cd");
        e.undo();
        assert_eq!(e.content().text(), "ab\n");
        e.insert_text("x");
        e.undo();
        assert_eq!(e.content().text(), "ab\n");
    }

    #[test]
    fn test_mark_applies_to_selection() {
        let (_dir, mut e) = engine();
        e.insert_text("hello world");
        e.set_cursor(0, false);
        e.set_cursor(5, true);
        assert_eq!(e.selection(), Some(0..5));
        e.apply_mark(Mark::Underline);
        assert!(e.content().has_mark(0..5, Mark::Underline));
        assert!(!e.content().has_mark(5..11, Mark::Underline));
        assert!(e.mark_active(Mark::Underline));
    }

    #[test]
    fn test_mark_without_selection_sets_typing_style() {
        let (_dir, mut e) = engine();
        e.apply_mark(Mark::Italic);
        e.set_font_size(24.0);
        e.insert_text("hi");
        let style = e.content().style_at(0).unwrap();
        assert!(style.italic);
        assert_eq!(style.font_size, 24.0);
    }

    #[test]
    fn test_typing_replaces_selection() {
        let (_dir, mut e) = engine();
        e.insert_text("grid system");
        e.select_all();
        assert_eq!(e.selected_text().as_deref(), Some("grid system"));
        e.insert_text("x");
        assert_eq!(e.content().text(), "x");
        assert_eq!(e.cursor(), 1);
    }

    #[test]
    fn test_deletes() {
        let (_dir, mut e) = engine();
        e.insert_text("abc");
        e.delete_backward();
        assert_eq!(e.content().text(), "ab");
        e.set_cursor(0, false);
        e.delete_forward();
        assert_eq!(e.content().text(), "b");
        e.delete_backward();
        assert_eq!(e.content().text(), "b");
    }

    #[test]
    fn test_insert_text_at_position() {
        let (_dir, mut e) = engine();
        e.insert_text("ad");
        let bold = CharStyle { bold: true, ..Default::default() };
        assert_eq!(e.insert_text_at(1, "bc", bold), 2);
        assert_eq!(e.content().text(), "abcd");
        assert!(e.content().has_mark(1..3, Mark::Bold));
        assert_eq!(e.cursor(), 4);
    }

    #[test]
    fn test_insert_past_end_moves_cursor() {
        let (_dir, mut e) = engine();
        e.insert_text("ab");
        assert_eq!(e.cursor(), 2);
        assert_eq!(e.insert_text_at(100, "cd", CharStyle::default()), 2);
        assert_eq!(e.content().text(), "abcd");
        assert_eq!(e.cursor(), 4);
    }

    #[test]
    fn test_image_inserted_after_decode() {
        let (_dir, mut e) = engine();
        e.insert_text("ab");
        e.set_cursor(1, false);
        e.request_image(ImageSource::Bytes(png_bytes(1000, 500)));
        assert!(e.content().images().is_empty());
        assert!(e.has_pending_images());

        assert_eq!(e.pump_decodes(), 1);
        assert_eq!(e.content().images().len(), 1);
        assert_eq!(e.content().images()[0].display_size, [400.0, 200.0]);
        assert_eq!(e.content().segments()[1], Segment::Image { at: 1, index: 0 });
        assert_eq!(e.cursor(), 2);
        assert!(e.undo());
        assert!(e.content().images().is_empty());
    }

    #[test]
    fn test_failed_decode_leaves_document() {
        let (_dir, mut e) = engine();
        e.insert_text("a");
        let before = e.document().clone();
        e.request_image(ImageSource::Bytes(vec![0, 1, 2]));
        assert_eq!(e.pump_decodes(), 0);
        assert_eq!(e.document(), &before);
        assert!(matches!(e.status(), Some(Status::Error(_))));
    }

    #[test]
    fn test_stroke_uses_active_tool() {
        let (_dir, mut e) = engine();
        e.ensure_canvas(200, 200);
        e.begin_stroke([10.0, 10.0]);
        assert!(e.stroke_in_progress().is_none(), "text tool does not draw");

        e.set_tool(Tool::Highlighter);
        e.begin_stroke([10.0, 10.0]);
        e.extend_stroke([80.0, 10.0]);
        e.extend_stroke([80.0, 10.0]);
        assert_eq!(e.stroke_in_progress().map(|s| s.len()), Some(2));
        assert!(e.end_stroke());
        assert!(!e.document().drawing.is_blank());
        assert!(!e.end_stroke());
    }

    #[test]
    fn test_canvas_growth_survives_undo() {
        let (_dir, mut e) = engine();
        e.ensure_canvas(300, 100);
        let brush = pen(&e);
        e.draw(&[[1.0, 1.0], [20.0, 20.0]], brush);
        e.ensure_canvas(600, 2400);
        let grown = e.document().clone();
        e.undo();
        e.redo();
        assert_eq!(e.document(), &grown);
        assert_eq!(e.document().drawing.size(), Some((600, 2400)));
    }

    #[test]
    fn test_canvas_growth_between_undo_and_redo_keeps_redo() {
        let (_dir, mut e) = engine();
        e.ensure_canvas(300, 100);
        let brush = pen(&e);
        e.draw(&[[1.0, 1.0], [20.0, 20.0]], brush);
        e.draw(&[[1.0, 40.0], [20.0, 40.0]], brush);
        e.ensure_canvas(600, 2400);
        let d = e.document().clone();
        assert!(e.undo());
        e.ensure_canvas(600, 2400);
        e.ensure_canvas(640, 2600);
        assert!(e.can_redo());
        assert!(e.redo());
        assert_eq!(e.document().drawing.size(), Some((640, 2600)));
        let mut expected = d;
        expected.drawing.ensure_covers(640, 2600);
        assert_eq!(e.document(), &expected);
    }

    #[test]
    fn test_clear_declined_is_noop() {
        let (_dir, mut e) = engine();
        e.insert_text("keep me");
        let before = e.document().clone();
        e.request_clear();
        assert!(e.clear_pending());
        e.confirm_clear(false);
        assert!(!e.clear_pending());
        assert_eq!(e.document(), &before);
    }

    #[test]
    fn test_clear_confirmed_is_undoable() {
        let (_dir, mut e) = engine();
        e.insert_text("notes");
        let brush = pen(&e);
        e.draw(&[[1.0, 1.0], [9.0, 9.0]], brush);
        let before = e.document().clone();
        e.request_clear();
        e.confirm_clear(true);
        assert!(e.document().is_empty());
        assert!(e.undo());
        assert_eq!(e.document(), &before);
    }

    #[test]
    fn test_confirm_without_request_is_noop() {
        let (_dir, mut e) = engine();
        e.insert_text("x");
        e.confirm_clear(true);
        assert_eq!(e.content().text(), "x");
    }

    #[test]
    fn test_clear_drawing_keeps_text() {
        let (_dir, mut e) = engine();
        e.insert_text("text");
        let brush = pen(&e);
        e.draw(&[[1.0, 1.0], [9.0, 9.0]], brush);
        e.clear_drawing();
        assert!(e.document().drawing.is_blank());
        assert_eq!(e.content().text(), "text");
        e.undo();
        assert!(!e.document().drawing.is_blank());
    }

    #[test]
    fn test_save_then_reload() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path());
        let mut e = NotepadEngine::load_for_track(store.clone(), "grid-101");
        e.insert_text("columns and gutters");
        e.select_all();
        e.apply_mark(Mark::Highlight);
        e.set_cursor(7, false);
        e.request_image(ImageSource::Bytes(png_bytes(40, 30)));
        e.pump_decodes();
        e.set_tool(Tool::Pen);
        e.ensure_canvas(320, 200);
        let brush = pen(&e);
        e.draw(&[[3.0, 3.0], [120.0, 90.0]], brush);

        let saved_at = e.save().unwrap();
        assert_eq!(e.status(), Some(&Status::Saved(saved_at)));

        let reloaded = NotepadEngine::load_for_track(store, "grid-101");
        assert_eq!(reloaded.document(), e.document());
        assert!(reloaded.saved_at().is_some());
    }

    #[test]
    fn test_save_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, b"").unwrap();
        // the store root is a regular file, so writing must fail
        let mut e = NotepadEngine::load_for_track(LocalStore::new(&blocker), "intro");
        e.insert_text("x");
        assert!(e.save().is_err());
        assert!(matches!(e.status(), Some(Status::Error(_))));
    }
}
