//! Character layout for the notepad editor.
//!
//! Positions are in content space: (0, 0) is the top-left of the note page,
//! the same space the drawing layer uses. Lines wrap at the page width and
//! are bottom-aligned so mixed font sizes share a baseline. An embedded image
//! sits on a line of its own.

use std::ops::Range;

use egui::{pos2, vec2, Pos2, Rect};

use super::document::{CharStyle, RichDocument, OBJECT_MARKER};

pub const PAD_X: f32 = 16.0;
pub const PAD_Y: f32 = 12.0;
const IMAGE_GAP: f32 = 4.0;

/// Where one character landed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharBox {
    pub rect: Rect,
    /// Caret position just after this char
    pub caret_after: Pos2,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub top: f32,
    pub height: f32,
    /// Chars on this line, including a trailing newline or image marker
    pub range: Range<usize>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layout {
    pub boxes: Vec<CharBox>,
    pub lines: Vec<Line>,
    pub default_row: f32,
}

impl Layout {
    /// Lay out `doc` in a page `width` wide. `measure` returns the advance
    /// width and row height of a char in a style.
    pub fn compute(
        doc: &RichDocument,
        width: f32,
        default_row: f32,
        measure: impl Fn(char, &CharStyle) -> (f32, f32),
    ) -> Self {
        let right = (width - PAD_X).max(PAD_X + 1.0);
        let default_style = CharStyle::default();
        let mut builder = Builder {
            boxes: Vec::with_capacity(doc.char_count()),
            lines: Vec::new(),
            pending: Vec::new(),
            line_start: 0,
            top: PAD_Y,
            default_row,
        };
        let mut x = PAD_X;
        let mut image_index = 0;

        for (i, c) in doc.text().chars().enumerate() {
            let style = doc.style_at(i).unwrap_or(&default_style);
            if c == OBJECT_MARKER {
                if !builder.pending.is_empty() {
                    builder.close_line(i, None);
                }
                let size = doc
                    .images()
                    .get(image_index)
                    .map(|img| img.display_size)
                    .unwrap_or([0.0, 0.0]);
                image_index += 1;
                builder.pending.push((PAD_X, size[0], size[1] + IMAGE_GAP));
                builder.close_line(i + 1, Some(i));
                x = PAD_X;
                continue;
            }
            let (w, h) = measure(c, style);
            if c == '\n' {
                builder.pending.push((x, 0.0, h));
                builder.close_line(i + 1, Some(i));
                x = PAD_X;
                continue;
            }
            if x + w > right && x > PAD_X {
                builder.close_line(i, None);
                x = PAD_X;
            }
            builder.pending.push((x, w, h));
            x += w;
        }
        let end = doc.char_count();
        if !builder.pending.is_empty() || builder.lines.is_empty() || builder.line_start < end {
            builder.close_line(end, None);
        } else {
            // trailing newline or image: the caret line after it
            builder.lines.push(Line {
                top: builder.top,
                height: default_row,
                range: end..end,
            });
        }
        Layout {
            boxes: builder.boxes,
            lines: builder.lines,
            default_row,
        }
    }

    /// Total content height including bottom padding.
    pub fn height(&self) -> f32 {
        self.lines
            .last()
            .map_or(PAD_Y, |l| l.top + l.height)
            + PAD_Y
    }

    /// Caret rectangle for char position `pos`.
    pub fn caret(&self, pos: usize) -> Rect {
        let height = self.line_for(pos).map_or(self.default_row, |l| l.height);
        let top_left = if pos == 0 || self.boxes.is_empty() {
            pos2(PAD_X, self.lines.first().map_or(PAD_Y, |l| l.top))
        } else {
            let idx = (pos - 1).min(self.boxes.len() - 1);
            self.boxes[idx].caret_after
        };
        Rect::from_min_size(top_left, vec2(1.0, height))
    }

    fn line_for(&self, pos: usize) -> Option<&Line> {
        self.lines
            .iter()
            .find(|l| l.range.contains(&pos))
            .or_else(|| self.lines.last())
    }

    /// Char position nearest to content-space point `p`.
    pub fn hit(&self, p: Pos2) -> usize {
        let Some(line) = self
            .lines
            .iter()
            .find(|l| p.y < l.top + l.height)
            .or_else(|| self.lines.last())
        else {
            return 0;
        };
        let mut end = line.range.end;
        for i in line.range.clone() {
            let b = &self.boxes[i];
            if b.rect.width() == 0.0 {
                // newline: the caret goes before it
                end = i;
                break;
            }
            if p.x < b.rect.center().x {
                return i;
            }
        }
        end
    }

    /// Start and end positions of the line holding `pos`.
    pub fn line_bounds(&self, pos: usize) -> (usize, usize) {
        match self.lines.iter().find(|l| l.range.contains(&pos)) {
            Some(line) => {
                let mut end = line.range.end;
                if let Some(last) = end.checked_sub(1) {
                    if last >= line.range.start && self.boxes[last].rect.width() == 0.0 {
                        end = last;
                    }
                }
                (line.range.start, end)
            }
            None => (pos, pos),
        }
    }

    /// Position one line up (`dir < 0`) or down from `pos`, same x.
    pub fn vertical(&self, pos: usize, dir: i32) -> usize {
        let caret = self.caret(pos);
        let y = if dir < 0 {
            caret.top() - 1.0
        } else {
            caret.bottom() + 1.0
        };
        if y < self.lines.first().map_or(0.0, |l| l.top) {
            return 0;
        }
        if y > self.lines.last().map_or(0.0, |l| l.top + l.height) {
            return self.boxes.len();
        }
        self.hit(pos2(caret.left(), y))
    }
}

struct Builder {
    boxes: Vec<CharBox>,
    lines: Vec<Line>,
    /// (x, width, height) of chars on the open line
    pending: Vec<(f32, f32, f32)>,
    line_start: usize,
    top: f32,
    default_row: f32,
}

impl Builder {
    /// Finish the open line, which ends before char `end`. `breaks` is the
    /// char that forced the break; the caret after it goes to the next line.
    fn close_line(&mut self, end: usize, breaks: Option<usize>) {
        let height = self
            .pending
            .iter()
            .map(|&(_, _, h)| h)
            .fold(0.0f32, f32::max)
            .max(if self.pending.is_empty() { self.default_row } else { 0.0 });
        let top = self.top;
        for (x, w, h) in self.pending.drain(..) {
            let rect = Rect::from_min_size(pos2(x, top + height - h), vec2(w, h));
            self.boxes.push(CharBox {
                rect,
                caret_after: pos2(x + w, top),
            });
        }
        if let Some(i) = breaks {
            if let Some(b) = self.boxes.get_mut(i) {
                b.caret_after = pos2(PAD_X, top + height);
            }
        }
        self.lines.push(Line {
            top,
            height,
            range: self.line_start..end,
        });
        self.line_start = end;
        self.top = top + height;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notepad::document::EmbeddedImage;
    use std::sync::Arc;

    /// Every char is 10 wide; the row is the font size plus 4.
    fn measure(_c: char, style: &CharStyle) -> (f32, f32) {
        (10.0, style.font_size + 4.0)
    }

    fn doc(text: &str) -> RichDocument {
        let mut d = RichDocument::new();
        d.insert_str(0, text, CharStyle::default());
        d
    }

    #[test]
    fn test_empty_document_has_one_line() {
        let layout = Layout::compute(&RichDocument::new(), 300.0, 20.0, measure);
        assert_eq!(layout.lines.len(), 1);
        assert_eq!(layout.caret(0).min, pos2(PAD_X, PAD_Y));
        assert_eq!(layout.hit(pos2(100.0, 100.0)), 0);
    }

    #[test]
    fn test_wraps_at_width() {
        // 100 wide page leaves room for 6 chars between the paddings
        let layout = Layout::compute(&doc("abcdefghij"), 100.0, 20.0, measure);
        assert_eq!(layout.lines.len(), 2);
        assert_eq!(layout.lines[0].range, 0..6);
        assert_eq!(layout.boxes[6].rect.min.x, PAD_X);
        assert!(layout.boxes[6].rect.min.y > layout.boxes[0].rect.min.y);
    }

    #[test]
    fn test_newline_moves_caret_down() {
        let layout = Layout::compute(&doc("ab\n"), 300.0, 20.0, measure);
        assert_eq!(layout.lines.len(), 2);
        let caret = layout.caret(3);
        assert_eq!(caret.min.x, PAD_X);
        assert_eq!(caret.min.y, PAD_Y + 20.0);
    }

    #[test]
    fn test_hit_testing() {
        let layout = Layout::compute(&doc("abc\ndef"), 300.0, 20.0, measure);
        // left half of 'b'
        assert_eq!(layout.hit(pos2(PAD_X + 12.0, PAD_Y + 5.0)), 1);
        // right half of 'b'
        assert_eq!(layout.hit(pos2(PAD_X + 18.0, PAD_Y + 5.0)), 2);
        // past the end of the first line lands before the newline
        assert_eq!(layout.hit(pos2(250.0, PAD_Y + 5.0)), 3);
        // second line
        assert_eq!(layout.hit(pos2(PAD_X + 1.0, PAD_Y + 25.0)), 4);
        // below everything
        assert_eq!(layout.hit(pos2(PAD_X + 500.0, 900.0)), 7);
    }

    #[test]
    fn test_mixed_sizes_share_bottom() {
        let mut d = doc("ab");
        d.apply_mark(1..2, crate::notepad::document::Mark::Size(32.0));
        let layout = Layout::compute(&d, 300.0, 20.0, measure);
        assert_eq!(layout.boxes[0].rect.bottom(), layout.boxes[1].rect.bottom());
        assert_eq!(layout.lines[0].height, 36.0);
    }

    #[test]
    fn test_image_on_own_line() {
        let mut d = doc("ab");
        let img = EmbeddedImage::new(
            Arc::new(vec![]),
            Arc::new(image::RgbaImage::new(1, 1)),
            [120.0, 60.0],
        );
        d.insert_image(1, img, CharStyle::default());
        let layout = Layout::compute(&d, 300.0, 20.0, measure);
        assert_eq!(layout.lines.len(), 3);
        let image_box = layout.boxes[1].rect;
        assert_eq!(image_box.size(), vec2(120.0, 64.0));
        assert_eq!(image_box.min.x, PAD_X);
        assert_eq!(layout.boxes[2].rect.min.x, PAD_X);
        assert!(layout.boxes[2].rect.min.y >= image_box.max.y);
    }

    #[test]
    fn test_line_bounds_and_vertical_moves() {
        let layout = Layout::compute(&doc("abc\ndefg"), 300.0, 20.0, measure);
        assert_eq!(layout.line_bounds(1), (0, 3));
        assert_eq!(layout.line_bounds(5), (4, 8));
        assert_eq!(layout.vertical(2, 1), 6);
        assert_eq!(layout.vertical(6, -1), 2);
        assert_eq!(layout.vertical(1, -1), 0);
        assert_eq!(layout.vertical(6, 1), 8);
    }

    #[test]
    fn test_height_grows_with_lines() {
        let short = Layout::compute(&doc("a"), 300.0, 20.0, measure);
        let long = Layout::compute(&doc("a\nb\nc\nd"), 300.0, 20.0, measure);
        assert!(long.height() > short.height());
        assert_eq!(long.height(), PAD_Y + 4.0 * 20.0 + PAD_Y);
    }
}
