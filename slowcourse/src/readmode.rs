//! Read mode: fullscreen lesson view with in-place zoom
//!
//! Entering asks the platform for fullscreen and shows the read-mode chrome
//! right away; the platform confirms (or not) later, and loss of fullscreen
//! is reported back through [`FullscreenZoomController::on_fullscreen_change`].
//! Zoom comes from the wheel with a modifier held (stepped, applied on the
//! next frame) or from a two-finger pinch (continuous, applied immediately).

use std::collections::BTreeMap;

use egui::{Pos2, TouchPhase};
use slowcore::repaint::FrameSlot;
use thiserror::Error;

pub const MIN_ZOOM: f32 = 1.0;
pub const MAX_ZOOM: f32 = 2.0;
/// Zoom change per wheel event
pub const WHEEL_STEP: f32 = 0.03;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlatformError {
    #[error("fullscreen is not supported here")]
    Unsupported,
    #[error("fullscreen request rejected: {0}")]
    Rejected(String),
}

/// Whatever can put the window into fullscreen.
pub trait FullscreenPlatform {
    fn request_fullscreen(&mut self) -> Result<(), PlatformError>;
    fn exit_fullscreen(&mut self) -> Result<(), PlatformError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadState {
    #[default]
    Normal,
    Fullscreen,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Pinch {
    distance: f32,
    zoom: f32,
}

fn round_hundredths(v: f32) -> f32 {
    (v * 100.0).round() / 100.0
}

fn clamp_zoom(v: f32) -> f32 {
    v.clamp(MIN_ZOOM, MAX_ZOOM)
}

fn touch_distance(touches: &[Pos2]) -> Option<f32> {
    match touches {
        [a, b] => Some(a.distance(*b)),
        _ => None,
    }
}

#[derive(Debug, Default)]
pub struct FullscreenZoomController {
    state: ReadState,
    zoom: f32,
    pending_zoom: FrameSlot<f32>,
    pinch: Option<Pinch>,
}

impl FullscreenZoomController {
    pub fn new() -> Self {
        Self {
            zoom: MIN_ZOOM,
            ..Default::default()
        }
    }

    pub fn state(&self) -> ReadState {
        self.state
    }

    pub fn is_fullscreen(&self) -> bool {
        self.state == ReadState::Fullscreen
    }

    /// Scale applied to the lesson content.
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// The floating read-mode toolbar is shown exactly while in fullscreen.
    pub fn chrome_visible(&self) -> bool {
        self.is_fullscreen()
    }

    pub fn pinch_active(&self) -> bool {
        self.pinch.is_some()
    }

    pub fn has_pending(&self) -> bool {
        self.pending_zoom.is_pending()
    }

    pub fn enter(&mut self, platform: &mut dyn FullscreenPlatform) {
        if self.is_fullscreen() {
            return;
        }
        self.state = ReadState::Fullscreen;
        if let Err(e) = platform.request_fullscreen() {
            tracing::warn!(error = %e, "fullscreen request failed, staying in read mode");
        }
    }

    pub fn exit(&mut self, platform: &mut dyn FullscreenPlatform) {
        if !self.is_fullscreen() {
            return;
        }
        if let Err(e) = platform.exit_fullscreen() {
            tracing::warn!(error = %e, "exiting fullscreen failed");
        }
        self.reset();
    }

    /// The platform reports whether the window is fullscreen now. Losing
    /// fullscreen while in read mode leaves it.
    pub fn on_fullscreen_change(&mut self, fullscreen: bool) {
        if !fullscreen && self.is_fullscreen() {
            tracing::debug!(zoom = self.zoom, "fullscreen lost, leaving read mode");
            self.reset();
        }
    }

    fn reset(&mut self) {
        self.state = ReadState::Normal;
        self.zoom = MIN_ZOOM;
        self.pending_zoom.clear();
        self.pinch = None;
    }

    /// One wheel event. `delta_y > 0` scrolls down, which zooms out.
    /// Ignored unless the zoom modifier is held in read mode.
    pub fn on_wheel(&mut self, delta_y: f32, modifier: bool) {
        if !self.is_fullscreen() || !modifier || delta_y == 0.0 {
            return;
        }
        let step = if delta_y > 0.0 { -WHEEL_STEP } else { WHEEL_STEP };
        let base = self.pending_zoom.peek().copied().unwrap_or(self.zoom);
        self.pending_zoom.set(clamp_zoom(round_hundredths(base + step)));
    }

    /// Apply the queued wheel zoom. Returns true if the zoom changed.
    pub fn on_frame(&mut self) -> bool {
        match self.pending_zoom.take() {
            Some(z) if self.is_fullscreen() && z != self.zoom => {
                self.zoom = z;
                true
            }
            _ => false,
        }
    }

    pub fn on_touch_start(&mut self, touches: &[Pos2]) {
        if !self.is_fullscreen() {
            return;
        }
        if let Some(distance) = touch_distance(touches) {
            self.pinch = Some(Pinch {
                distance,
                zoom: self.zoom,
            });
        }
    }

    pub fn on_touch_move(&mut self, touches: &[Pos2]) {
        if !self.is_fullscreen() {
            return;
        }
        let (Some(pinch), Some(current)) = (self.pinch, touch_distance(touches)) else {
            return;
        };
        if pinch.distance > 0.0 {
            self.zoom = clamp_zoom(pinch.zoom * current / pinch.distance);
        }
    }

    pub fn on_touch_end(&mut self) {
        self.pinch = None;
    }
}

/// Turns the per-frame "is the window fullscreen" flag into change
/// notifications.
#[derive(Debug, Default)]
pub struct FullscreenWatcher {
    last: Option<bool>,
}

impl FullscreenWatcher {
    /// Returns the new value when it differs from the last one seen. The
    /// first observation only records.
    pub fn observe(&mut self, fullscreen: bool) -> Option<bool> {
        let previous = self.last.replace(fullscreen);
        match previous {
            Some(was) if was != fullscreen => Some(fullscreen),
            _ => None,
        }
    }
}

/// What the fingers on the screen are doing, in terms the zoom
/// controller understands.
#[derive(Debug, Clone, PartialEq)]
pub enum TouchGesture {
    Start(Vec<Pos2>),
    Move(Vec<Pos2>),
    End,
}

/// Tracks live touches across frames.
#[derive(Debug, Default)]
pub struct TouchTracker {
    touches: BTreeMap<u64, Pos2>,
}

impl TouchTracker {
    pub fn active(&self) -> usize {
        self.touches.len()
    }

    fn points(&self) -> Vec<Pos2> {
        self.touches.values().copied().collect()
    }

    /// Feed one raw touch event.
    pub fn update(&mut self, id: u64, phase: TouchPhase, pos: Pos2) -> TouchGesture {
        match phase {
            TouchPhase::Start => {
                self.touches.insert(id, pos);
                TouchGesture::Start(self.points())
            }
            TouchPhase::Move => {
                self.touches.insert(id, pos);
                TouchGesture::Move(self.points())
            }
            TouchPhase::End | TouchPhase::Cancel => {
                self.touches.remove(&id);
                TouchGesture::End
            }
        }
    }
}

impl FullscreenZoomController {
    pub fn on_gesture(&mut self, gesture: &TouchGesture) {
        match gesture {
            TouchGesture::Start(points) => self.on_touch_start(points),
            TouchGesture::Move(points) => self.on_touch_move(points),
            TouchGesture::End => self.on_touch_end(),
        }
    }
}
