//! Rich text model for the notepad: per-character styling plus embedded
//! images.
//!
//! Text and styles are parallel: `styles.len() == text.chars().count()`.
//! Each embedded image occupies one U+FFFC character in the text; the n-th
//! marker belongs to `images[n]`. All positions are char indices.

use std::ops::Range;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use slowcore::safety::char_to_byte;

/// Placeholder character that anchors an embedded image in the text.
pub const OBJECT_MARKER: char = '\u{FFFC}';

pub const DEFAULT_FONT_SIZE: f32 = 16.0;

/// Sizes offered in the toolbar.
pub const FONT_SIZES: [f32; 7] = [12.0, 14.0, 16.0, 18.0, 20.0, 24.0, 32.0];

/// Style properties for a single character
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CharStyle {
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
    #[serde(default)]
    pub underline: bool,
    #[serde(default)]
    pub highlight: bool,
    #[serde(default = "default_font_size")]
    pub font_size: f32,
}

fn default_font_size() -> f32 {
    DEFAULT_FONT_SIZE
}

impl Default for CharStyle {
    fn default() -> Self {
        Self {
            bold: false,
            italic: false,
            underline: false,
            highlight: false,
            font_size: DEFAULT_FONT_SIZE,
        }
    }
}

/// A formatting command applied to a range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Mark {
    Bold,
    Italic,
    Underline,
    Highlight,
    Size(f32),
}

impl Mark {
    /// Apply to a single style. Toggles are resolved by the caller.
    fn set(self, style: &mut CharStyle, on: bool) {
        match self {
            Mark::Bold => style.bold = on,
            Mark::Italic => style.italic = on,
            Mark::Underline => style.underline = on,
            Mark::Highlight => style.highlight = on,
            Mark::Size(size) => style.font_size = size,
        }
    }

    pub fn is_set(self, style: &CharStyle) -> bool {
        match self {
            Mark::Bold => style.bold,
            Mark::Italic => style.italic,
            Mark::Underline => style.underline,
            Mark::Highlight => style.highlight,
            Mark::Size(size) => style.font_size == size,
        }
    }
}

static NEXT_IMAGE_ID: AtomicU64 = AtomicU64::new(1);

/// A decoded image placed in the text flow.
///
/// `encoded` keeps the original file bytes for saving; `pixels` is the
/// decoded bitmap used for display.
#[derive(Debug, Clone)]
pub struct EmbeddedImage {
    id: u64,
    pub encoded: Arc<Vec<u8>>,
    pub pixels: Arc<image::RgbaImage>,
    /// Display size in points, aspect preserved
    pub display_size: [f32; 2],
}

impl EmbeddedImage {
    pub fn new(encoded: Arc<Vec<u8>>, pixels: Arc<image::RgbaImage>, display_size: [f32; 2]) -> Self {
        Self {
            id: NEXT_IMAGE_ID.fetch_add(1, Ordering::Relaxed),
            encoded,
            pixels,
            display_size,
        }
    }

    /// Stable identity across snapshot clones, used to cache textures.
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn natural_size(&self) -> [u32; 2] {
        [self.pixels.width(), self.pixels.height()]
    }
}

impl PartialEq for EmbeddedImage {
    fn eq(&self, other: &Self) -> bool {
        self.display_size == other.display_size
            && (Arc::ptr_eq(&self.encoded, &other.encoded) || self.encoded == other.encoded)
    }
}

/// A run of the document between embedded objects.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// Char range of plain styled text
    Text(Range<usize>),
    /// Char position of the marker and the image it anchors
    Image { at: usize, index: usize },
}

/// A rich text document: text + per-character styles + embedded images
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RichDocument {
    text: String,
    styles: Vec<CharStyle>,
    images: Vec<EmbeddedImage>,
}

impl RichDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from stored parts. Fails when the parts disagree with each other.
    pub fn from_parts(
        text: String,
        styles: Vec<CharStyle>,
        images: Vec<EmbeddedImage>,
    ) -> Result<Self, String> {
        let chars = text.chars().count();
        if styles.len() != chars {
            return Err(format!("{} styles for {} characters", styles.len(), chars));
        }
        let markers = text.chars().filter(|&c| c == OBJECT_MARKER).count();
        if markers != images.len() {
            return Err(format!("{} images for {} markers", images.len(), markers));
        }
        Ok(Self { text, styles, images })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn styles(&self) -> &[CharStyle] {
        &self.styles
    }

    pub fn images(&self) -> &[EmbeddedImage] {
        &self.images
    }

    pub fn char_count(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn word_count(&self) -> usize {
        self.text
            .split(|c: char| c.is_whitespace() || c == OBJECT_MARKER)
            .filter(|w| !w.is_empty())
            .count()
    }

    pub fn style_at(&self, idx: usize) -> Option<&CharStyle> {
        self.styles.get(idx)
    }

    /// Number of image markers strictly before char `idx`.
    fn markers_before(&self, idx: usize) -> usize {
        self.text.chars().take(idx).filter(|&c| c == OBJECT_MARKER).count()
    }

    /// Insert `text` at char `at` in `style`. Returns the number of chars
    /// inserted. Stray object markers in the input are dropped.
    pub fn insert_str(&mut self, at: usize, text: &str, style: CharStyle) -> usize {
        let clean: String = text.chars().filter(|&c| c != OBJECT_MARKER && c != '\r').collect();
        if clean.is_empty() {
            return 0;
        }
        let at = at.min(self.char_count());
        let byte = char_to_byte(&self.text, at);
        self.text.insert_str(byte, &clean);
        let count = clean.chars().count();
        self.styles.splice(at..at, std::iter::repeat(style).take(count));
        count
    }

    /// Remove the chars in `range` along with any images anchored there.
    pub fn delete_range(&mut self, range: Range<usize>) {
        let end = range.end.min(self.char_count());
        let start = range.start.min(end);
        if start == end {
            return;
        }
        let first_image = self.markers_before(start);
        let removed_images = self
            .text
            .chars()
            .skip(start)
            .take(end - start)
            .filter(|&c| c == OBJECT_MARKER)
            .count();
        self.images.drain(first_image..first_image + removed_images);

        let byte_start = char_to_byte(&self.text, start);
        let byte_end = char_to_byte(&self.text, end);
        self.text.replace_range(byte_start..byte_end, "");
        self.styles.drain(start..end);
    }

    /// Anchor `image` at char `at`.
    pub fn insert_image(&mut self, at: usize, image: EmbeddedImage, style: CharStyle) {
        let at = at.min(self.char_count());
        let index = self.markers_before(at);
        let byte = char_to_byte(&self.text, at);
        self.text.insert(byte, OBJECT_MARKER);
        self.styles.insert(at, style);
        self.images.insert(index, image);
    }

    /// Apply a mark over `range`. Boolean marks toggle: if every char in the
    /// range already has the mark it is removed, otherwise it is set.
    /// Returns false when the range is empty.
    pub fn apply_mark(&mut self, range: Range<usize>, mark: Mark) -> bool {
        let end = range.end.min(self.char_count());
        let start = range.start.min(end);
        if start == end {
            return false;
        }
        let on = match mark {
            Mark::Size(_) => true,
            _ => !self.styles[start..end].iter().all(|s| mark.is_set(s)),
        };
        for style in &mut self.styles[start..end] {
            mark.set(style, on);
        }
        true
    }

    /// Whether every char in `range` carries `mark`.
    pub fn has_mark(&self, range: Range<usize>, mark: Mark) -> bool {
        let end = range.end.min(self.char_count());
        let start = range.start.min(end);
        start < end && self.styles[start..end].iter().all(|s| mark.is_set(s))
    }

    /// Apply a mark to a style that will be used for typing.
    pub fn toggle_on(style: &mut CharStyle, mark: Mark) {
        let on = match mark {
            Mark::Size(_) => true,
            _ => !mark.is_set(style),
        };
        mark.set(style, on);
    }

    /// Split the document into text runs and images in reading order.
    pub fn segments(&self) -> Vec<Segment> {
        let mut out = Vec::new();
        let mut run_start = 0;
        let mut index = 0;
        for (i, c) in self.text.chars().enumerate() {
            if c == OBJECT_MARKER {
                if run_start < i {
                    out.push(Segment::Text(run_start..i));
                }
                out.push(Segment::Image { at: i, index });
                index += 1;
                run_start = i + 1;
            }
        }
        let n = self.char_count();
        if run_start < n || out.is_empty() {
            out.push(Segment::Text(run_start..n));
        }
        out
    }

    /// The substring for a char range.
    pub fn slice(&self, range: Range<usize>) -> &str {
        let start = char_to_byte(&self.text, range.start);
        let end = char_to_byte(&self.text, range.end);
        &self.text[start..end.max(start)]
    }
}
