//! Image insertion: decoding, display sizing and the deferred decode queue
//!
//! Requests are queued when the user picks a file, drops one or pastes from
//! the clipboard, and decoded at the start of the next frame. The document is
//! only touched once a decode has succeeded.

use std::collections::VecDeque;
use std::io::Cursor;
use std::path::PathBuf;
use std::sync::Arc;

use super::document::EmbeddedImage;
use super::persist::NotepadError;

/// The longer side of an inserted image is capped at this many points.
pub const MAX_IMAGE_SIDE: f32 = 400.0;

/// Extensions the insert-image dialog lists.
pub const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "gif", "bmp"];

/// Decode any supported format into RGBA pixels.
pub fn decode_image(bytes: &[u8]) -> Result<image::RgbaImage, image::ImageError> {
    Ok(image::load_from_memory(bytes)?.into_rgba8())
}

/// Display size for natural size `w` x `h`: aspect preserved, longer side at
/// most [`MAX_IMAGE_SIDE`], never enlarged.
pub fn display_size(w: u32, h: u32) -> [f32; 2] {
    let (w, h) = (w as f32, h as f32);
    let longer = w.max(h);
    if longer <= 0.0 {
        return [0.0, 0.0];
    }
    let scale = (MAX_IMAGE_SIDE / longer).min(1.0);
    [w * scale, h * scale]
}

/// Where the bytes for an image come from.
#[derive(Debug, Clone)]
pub enum ImageSource {
    /// A file on disk (open dialog or drag-and-drop)
    File(PathBuf),
    /// Encoded bytes already in memory
    Bytes(Vec<u8>),
    /// Raw RGBA pixels, as handed over by the system clipboard
    Pixels { width: u32, height: u32, rgba: Vec<u8> },
}

impl ImageSource {
    pub fn describe(&self) -> String {
        match self {
            ImageSource::File(path) => path.display().to_string(),
            ImageSource::Bytes(bytes) => format!("{} bytes", bytes.len()),
            ImageSource::Pixels { width, height, .. } => format!("clipboard {width}x{height}"),
        }
    }

    /// Decode into an embeddable image.
    pub fn decode(self) -> Result<EmbeddedImage, NotepadError> {
        let (encoded, pixels) = match self {
            ImageSource::File(path) => {
                let bytes = std::fs::read(&path)?;
                let pixels = decode_image(&bytes)?;
                (bytes, pixels)
            }
            ImageSource::Bytes(bytes) => {
                let pixels = decode_image(&bytes)?;
                (bytes, pixels)
            }
            ImageSource::Pixels { width, height, rgba } => {
                let pixels = image::RgbaImage::from_raw(width, height, rgba)
                    .ok_or_else(|| NotepadError::Corrupt("clipboard image size mismatch".into()))?;
                // the clipboard has no file format; keep a PNG for saving
                let mut png = Vec::new();
                pixels.write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)?;
                (png, pixels)
            }
        };
        let size = display_size(pixels.width(), pixels.height());
        Ok(EmbeddedImage::new(Arc::new(encoded), Arc::new(pixels), size))
    }
}

/// Image requests waiting for the next frame.
#[derive(Debug, Default)]
pub struct DecodeQueue {
    pending: VecDeque<ImageSource>,
}

impl DecodeQueue {
    pub fn push(&mut self, source: ImageSource) {
        self.pending.push_back(source);
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Decode everything queued, in request order.
    pub fn drain(&mut self) -> Vec<(String, Result<EmbeddedImage, NotepadError>)> {
        self.pending
            .drain(..)
            .map(|source| {
                let label = source.describe();
                (label, source.decode())
            })
            .collect()
    }
}

#[cfg(test)]
pub(crate) fn png_bytes(w: u32, h: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba([200, 10, 10, 255]));
    let mut out = Vec::new();
    img.write_to(&mut Cursor::new(&mut out), image::ImageFormat::Png).unwrap();
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_size_caps_longer_side() {
        assert_eq!(display_size(800, 400), [400.0, 200.0]);
        assert_eq!(display_size(300, 1200), [100.0, 400.0]);
    }

    #[test]
    fn test_display_size_never_enlarges() {
        assert_eq!(display_size(120, 80), [120.0, 80.0]);
        assert_eq!(display_size(0, 0), [0.0, 0.0]);
    }

    #[test]
    fn test_decode_bytes() {
        let img = ImageSource::Bytes(png_bytes(800, 200)).decode().unwrap();
        assert_eq!(img.natural_size(), [800, 200]);
        assert_eq!(img.display_size, [400.0, 100.0]);
    }

    #[test]
    fn test_decode_clipboard_pixels() {
        let rgba = vec![255u8; 10 * 5 * 4];
        let img = ImageSource::Pixels { width: 10, height: 5, rgba }.decode().unwrap();
        assert_eq!(img.natural_size(), [10, 5]);
        // stored bytes are a real PNG
        assert!(decode_image(&img.encoded).is_ok());
    }

    #[test]
    fn test_decode_failures() {
        assert!(ImageSource::Bytes(b"definitely not an image".to_vec()).decode().is_err());
        let short = ImageSource::Pixels { width: 10, height: 10, rgba: vec![0; 3] };
        assert!(matches!(short.decode(), Err(NotepadError::Corrupt(_))));
        let missing = ImageSource::File(PathBuf::from("/nonexistent/slowcourse.png"));
        assert!(matches!(missing.decode(), Err(NotepadError::Io(_))));
    }

    #[test]
    fn test_queue_drains_in_order() {
        let mut queue = DecodeQueue::default();
        queue.push(ImageSource::Bytes(png_bytes(2, 2)));
        queue.push(ImageSource::Bytes(vec![1, 2, 3]));
        assert_eq!(queue.len(), 2);
        let results = queue.drain();
        assert!(queue.is_empty());
        assert!(results[0].1.is_ok());
        assert!(results[1].1.is_err());
    }
}
