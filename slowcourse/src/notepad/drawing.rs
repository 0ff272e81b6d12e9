//! Freehand drawing layer
//!
//! One persistent RGBA raster laid over the text. Strokes are rasterised with
//! tiny-skia when the pointer is released, so a highlighter stroke has a
//! uniform alpha along its whole length.

use std::io::Cursor;
use std::sync::Arc;

use tiny_skia::{
    BlendMode, FillRule, IntSize, LineCap, LineJoin, Paint, PathBuilder, Pixmap, PixmapPaint,
    Stroke, Transform,
};

use super::persist::NotepadError;

/// The raster never gets shorter than this.
pub const MIN_CANVAS_HEIGHT: u32 = 2000;

pub const PEN_WIDTH: f32 = 3.0;
pub const ERASER_WIDTH: f32 = 30.0;
pub const HIGHLIGHTER_WIDTH: f32 = 20.0;
pub const HIGHLIGHTER_COLOR: [u8; 4] = [0xff, 0xeb, 0x3b, 128];

/// Pen colours offered in the toolbar.
pub const PEN_COLORS: [(&str, [u8; 3]); 5] = [
    ("black", [0x00, 0x00, 0x00]),
    ("red", [0xdc, 0x26, 0x26]),
    ("blue", [0x25, 0x63, 0xeb]),
    ("green", [0x16, 0xa3, 0x4a]),
    ("purple", [0x93, 0x33, 0xea]),
];

/// What pointer input on the notepad does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    #[default]
    Text,
    Pen,
    Eraser,
    Highlighter,
}

impl Tool {
    pub const ALL: [Tool; 4] = [Tool::Text, Tool::Pen, Tool::Eraser, Tool::Highlighter];

    /// Drawing-family tools take pointer input away from the text.
    pub fn is_drawing(self) -> bool {
        !matches!(self, Tool::Text)
    }

    pub fn label(self) -> &'static str {
        match self {
            Tool::Text => "text",
            Tool::Pen => "pen",
            Tool::Eraser => "eraser",
            Tool::Highlighter => "highlight",
        }
    }

    /// The brush this tool paints with, `None` for text.
    pub fn brush(self, pen_color: [u8; 3]) -> Option<Brush> {
        match self {
            Tool::Text => None,
            Tool::Pen => Some(Brush {
                color: [pen_color[0], pen_color[1], pen_color[2], 255],
                width: PEN_WIDTH,
                erase: false,
            }),
            Tool::Eraser => Some(Brush {
                color: [0, 0, 0, 255],
                width: ERASER_WIDTH,
                erase: true,
            }),
            Tool::Highlighter => Some(Brush {
                color: HIGHLIGHTER_COLOR,
                width: HIGHLIGHTER_WIDTH,
                erase: false,
            }),
        }
    }
}

/// Colour and width for one stroke. An erasing brush clears pixels back to
/// transparent, which shows the page background through.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Brush {
    pub color: [u8; 4],
    pub width: f32,
    pub erase: bool,
}

impl Brush {
    fn paint(&self) -> Paint<'static> {
        let mut paint = Paint::default();
        paint.anti_alias = true;
        let [r, g, b, a] = self.color;
        paint.set_color_rgba8(r, g, b, a);
        if self.erase {
            paint.blend_mode = BlendMode::Clear;
        }
        paint
    }
}

/// The raster surface. Cheap to clone: pixels are shared until written.
#[derive(Debug, Clone, Default)]
pub struct DrawingLayer {
    pixmap: Option<Arc<Pixmap>>,
    revision: u64,
}

impl PartialEq for DrawingLayer {
    fn eq(&self, other: &Self) -> bool {
        match (&self.pixmap, &other.pixmap) {
            (None, None) => true,
            (Some(a), Some(b)) => {
                Arc::ptr_eq(a, b)
                    || (a.width() == b.width() && a.height() == b.height() && a.data() == b.data())
            }
            _ => false,
        }
    }
}

impl DrawingLayer {
    pub fn size(&self) -> Option<(u32, u32)> {
        self.pixmap.as_ref().map(|p| (p.width(), p.height()))
    }

    /// Changes whenever the pixels might have: the view re-uploads its
    /// texture when this differs from the last upload.
    pub fn fingerprint(&self) -> Option<(usize, u64)> {
        self.pixmap
            .as_ref()
            .map(|p| (Arc::as_ptr(p) as usize, self.revision))
    }

    pub fn pixmap(&self) -> Option<&Pixmap> {
        self.pixmap.as_deref()
    }

    /// True when no pixel has any coverage.
    pub fn is_blank(&self) -> bool {
        self.pixmap
            .as_ref()
            .map_or(true, |p| p.data().iter().all(|&b| b == 0))
    }

    /// Grow the raster to at least `width` x `max(height, MIN_CANVAS_HEIGHT)`,
    /// keeping existing pixels at their position. Never shrinks.
    /// Returns whether the size changed.
    pub fn ensure_covers(&mut self, width: u32, height: u32) -> bool {
        let height = height.max(MIN_CANVAS_HEIGHT);
        let (old_w, old_h) = self.size().unwrap_or((0, 0));
        let new_w = old_w.max(width);
        let new_h = old_h.max(height);
        if new_w == old_w && new_h == old_h {
            return false;
        }
        let Some(mut grown) = Pixmap::new(new_w.max(1), new_h) else {
            tracing::warn!(new_w, new_h, "cannot allocate drawing layer");
            return false;
        };
        if let Some(old) = &self.pixmap {
            let paint = PixmapPaint {
                blend_mode: BlendMode::Source,
                ..PixmapPaint::default()
            };
            grown.draw_pixmap(0, 0, Pixmap::as_ref(old), &paint, Transform::identity(), None);
        }
        self.pixmap = Some(Arc::new(grown));
        self.revision += 1;
        true
    }

    /// Paint one stroke. A single point paints a dot. Returns false when
    /// there is nothing to paint or no surface to paint on.
    pub fn stroke(&mut self, points: &[[f32; 2]], brush: Brush) -> bool {
        let Some(first) = points.first() else {
            return false;
        };
        let Some(pixmap) = self.pixmap.as_mut() else {
            return false;
        };
        let pixmap = Arc::make_mut(pixmap);
        let paint = brush.paint();

        if points.len() == 1 {
            let Some(dot) = PathBuilder::from_circle(first[0], first[1], brush.width / 2.0) else {
                return false;
            };
            pixmap.fill_path(&dot, &paint, FillRule::Winding, Transform::identity(), None);
        } else {
            let mut pb = PathBuilder::new();
            pb.move_to(first[0], first[1]);
            for p in &points[1..] {
                pb.line_to(p[0], p[1]);
            }
            let Some(path) = pb.finish() else {
                return false;
            };
            let stroke = Stroke {
                width: brush.width,
                line_cap: LineCap::Round,
                line_join: LineJoin::Round,
                ..Stroke::default()
            };
            pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
        }
        self.revision += 1;
        true
    }

    /// Wipe every pixel, keeping the size.
    pub fn clear(&mut self) {
        if let Some(pixmap) = self.pixmap.as_mut() {
            Arc::make_mut(pixmap).fill(tiny_skia::Color::TRANSPARENT);
            self.revision += 1;
        }
    }

    /// Encode the raw raster bytes as PNG. The bytes are stored as-is
    /// (premultiplied), so decoding gives back the identical raster.
    pub fn to_png(&self) -> Result<Option<Vec<u8>>, NotepadError> {
        let Some(pixmap) = &self.pixmap else {
            return Ok(None);
        };
        let img = image::RgbaImage::from_raw(pixmap.width(), pixmap.height(), pixmap.data().to_vec())
            .ok_or_else(|| NotepadError::Corrupt("drawing buffer size mismatch".into()))?;
        let mut out = Vec::new();
        img.write_to(&mut Cursor::new(&mut out), image::ImageFormat::Png)?;
        Ok(Some(out))
    }

    pub fn from_png(bytes: &[u8]) -> Result<Self, NotepadError> {
        let img = image::load_from_memory_with_format(bytes, image::ImageFormat::Png)?.into_rgba8();
        let (w, h) = img.dimensions();
        let size = IntSize::from_wh(w, h)
            .ok_or_else(|| NotepadError::Corrupt(format!("drawing size {w}x{h}")))?;
        let pixmap = Pixmap::from_vec(img.into_raw(), size)
            .ok_or_else(|| NotepadError::Corrupt("drawing buffer size mismatch".into()))?;
        Ok(Self {
            pixmap: Some(Arc::new(pixmap)),
            revision: 0,
        })
    }

    /// RGBA bytes for uploading as a texture. Premultiplied.
    pub fn premultiplied_rgba(&self) -> Option<(usize, usize, &[u8])> {
        self.pixmap
            .as_ref()
            .map(|p| (p.width() as usize, p.height() as usize, p.data()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel(layer: &DrawingLayer, x: u32, y: u32) -> [u8; 4] {
        let p = layer.pixmap().unwrap();
        let i = ((y * p.width() + x) * 4) as usize;
        let d = p.data();
        [d[i], d[i + 1], d[i + 2], d[i + 3]]
    }

    fn pen() -> Brush {
        Tool::Pen.brush([0, 0, 0]).unwrap()
    }

    #[test]
    fn test_tool_brushes() {
        assert!(Tool::Text.brush([0, 0, 0]).is_none());
        assert!(!Tool::Text.is_drawing());
        let pen = pen();
        let eraser = Tool::Eraser.brush([0, 0, 0]).unwrap();
        let hl = Tool::Highlighter.brush([0, 0, 0]).unwrap();
        assert!(eraser.erase && eraser.width > pen.width);
        assert!(hl.width > pen.width);
        assert!(hl.color[3] < 255);
    }

    #[test]
    fn test_ensure_covers_minimum_and_growth() {
        let mut layer = DrawingLayer::default();
        assert!(layer.ensure_covers(400, 300));
        assert_eq!(layer.size(), Some((400, MIN_CANVAS_HEIGHT)));
        assert!(!layer.ensure_covers(300, 1000));
        assert!(layer.ensure_covers(500, 2500));
        assert_eq!(layer.size(), Some((500, 2500)));
    }

    #[test]
    fn test_growth_preserves_pixels() {
        let mut layer = DrawingLayer::default();
        layer.ensure_covers(100, 100);
        layer.stroke(&[[10.0, 10.0], [50.0, 10.0]], pen());
        let before = pixel(&layer, 30, 10);
        assert_eq!(before[3], 255);
        layer.ensure_covers(300, 2400);
        assert_eq!(pixel(&layer, 30, 10), before);
    }

    #[test]
    fn test_eraser_clears_pixels() {
        let mut layer = DrawingLayer::default();
        layer.ensure_covers(100, 100);
        layer.stroke(&[[10.0, 20.0], [90.0, 20.0]], pen());
        assert!(!layer.is_blank());
        let eraser = Tool::Eraser.brush([0, 0, 0]).unwrap();
        layer.stroke(&[[0.0, 20.0], [100.0, 20.0]], eraser);
        assert!(layer.is_blank());
    }

    #[test]
    fn test_highlighter_is_translucent() {
        let mut layer = DrawingLayer::default();
        layer.ensure_covers(100, 100);
        let hl = Tool::Highlighter.brush([0, 0, 0]).unwrap();
        layer.stroke(&[[10.0, 50.0], [60.0, 50.0], [90.0, 50.0]], hl);
        let a = pixel(&layer, 40, 50)[3];
        assert!(a > 100 && a < 160, "alpha {a}");
    }

    #[test]
    fn test_single_point_is_a_dot() {
        let mut layer = DrawingLayer::default();
        layer.ensure_covers(50, 50);
        assert!(layer.stroke(&[[25.0, 25.0]], pen()));
        assert!(pixel(&layer, 25, 25)[3] > 0);
        assert!(!layer.stroke(&[], pen()));
    }

    #[test]
    fn test_clone_is_copy_on_write() {
        let mut layer = DrawingLayer::default();
        layer.ensure_covers(50, 50);
        let snapshot = layer.clone();
        layer.stroke(&[[5.0, 5.0], [40.0, 40.0]], pen());
        assert!(snapshot.is_blank());
        assert_ne!(snapshot, layer);
    }

    #[test]
    fn test_png_roundtrip_is_exact() {
        let mut layer = DrawingLayer::default();
        layer.ensure_covers(64, 64);
        let hl = Tool::Highlighter.brush([0, 0, 0]).unwrap();
        layer.stroke(&[[0.0, 10.0], [64.0, 40.0]], hl);
        let png = layer.to_png().unwrap().unwrap();
        let back = DrawingLayer::from_png(&png).unwrap();
        assert_eq!(back, layer);
    }
}
