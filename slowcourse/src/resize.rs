//! Drag-to-resize for the right panel
//!
//! The panel sits against the right edge of the window; its width is the
//! distance from the pointer to that edge minus a margin. Pointer moves are
//! coalesced into a [`FrameSlot`] so the width changes at most once per
//! frame. While a drag is active the window style is suppressed through a
//! [`DragStyleGuard`]; the guard lives inside the drag session, so ending the
//! session in any way puts selection and cursor back.

use egui::Pos2;
use slowcore::drag::{CursorKind, DragStyleGuard, StyleHandle};
use slowcore::repaint::FrameSlot;

pub const DEFAULT_PANEL_WIDTH: f32 = 480.0;
pub const MIN_PANEL_WIDTH: f32 = 280.0;
pub const MAX_PANEL_WIDTH: f32 = 900.0;
/// Gap between the panel and the window edge
pub const EDGE_MARGIN: f32 = 12.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelBounds {
    pub min: f32,
    pub max: f32,
}

impl Default for PanelBounds {
    fn default() -> Self {
        Self {
            min: MIN_PANEL_WIDTH,
            max: MAX_PANEL_WIDTH,
        }
    }
}

impl PanelBounds {
    pub fn contains(&self, width: f32) -> bool {
        width >= self.min && width <= self.max
    }

    pub fn clamp(&self, width: f32) -> f32 {
        width.clamp(self.min, self.max)
    }
}

/// Pointer input relevant to a drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Move(Pos2),
    Up,
    /// Pointer left the window; handled like `Up`
    Leave,
}

#[derive(Debug)]
struct DragSession {
    origin: Pos2,
    _style: DragStyleGuard,
}

#[derive(Debug)]
pub struct ResizeController {
    width: f32,
    bounds: PanelBounds,
    style: StyleHandle,
    drag: Option<DragSession>,
    pending: FrameSlot<f32>,
}

impl ResizeController {
    pub fn new(style: StyleHandle) -> Self {
        Self::with_width(style, DEFAULT_PANEL_WIDTH)
    }

    /// Start at `width`, clamped into the default bounds.
    pub fn with_width(style: StyleHandle, width: f32) -> Self {
        let bounds = PanelBounds::default();
        Self {
            width: bounds.clamp(width),
            bounds,
            style,
            drag: None,
            pending: FrameSlot::new(),
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn bounds(&self) -> PanelBounds {
        self.bounds
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Where the pointer was when the drag started.
    pub fn drag_origin(&self) -> Option<Pos2> {
        self.drag.as_ref().map(|d| d.origin)
    }

    /// A width update is waiting for the next frame.
    pub fn has_pending(&self) -> bool {
        self.pending.is_pending()
    }

    /// Change the lower bound for the hosted feature. A width below the new
    /// floor is raised to it.
    pub fn set_min_width(&mut self, min: f32) {
        self.bounds.min = min.min(self.bounds.max);
        if self.width < self.bounds.min {
            tracing::debug!(from = self.width, to = self.bounds.min, "panel raised to new minimum");
            self.width = self.bounds.min;
        }
    }

    /// Set the width outside a drag, e.g. when a feature opens with a
    /// preferred size. Clamped.
    pub fn set_width(&mut self, width: f32) {
        self.width = self.bounds.clamp(width);
    }

    /// Start dragging. Ignored if a drag is already running.
    pub fn begin_drag(&mut self, pointer: Pos2) {
        if self.drag.is_some() {
            return;
        }
        let guard = self.style.suppress(CursorKind::ResizeHorizontal);
        self.drag = Some(DragSession {
            origin: pointer,
            _style: guard,
        });
    }

    /// Feed a pointer event. Does nothing unless a drag is active.
    pub fn on_pointer(&mut self, event: PointerEvent, viewport_width: f32) {
        if self.drag.is_none() {
            return;
        }
        match event {
            PointerEvent::Move(pos) => {
                let candidate = viewport_width - pos.x - EDGE_MARGIN;
                if self.bounds.contains(candidate) {
                    self.pending.set(candidate);
                }
            }
            PointerEvent::Up | PointerEvent::Leave => self.end_drag(),
        }
    }

    /// Apply the last width queued this frame. Returns true if it changed.
    pub fn on_frame(&mut self) -> bool {
        let Some(width) = self.pending.take() else {
            return false;
        };
        if self.drag.is_none() {
            return false;
        }
        let changed = width != self.width;
        self.width = width;
        changed
    }

    /// Stop dragging. Safe to call any number of times.
    pub fn end_drag(&mut self) {
        self.pending.clear();
        self.drag = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;
    use slowcore::drag::DocumentStyle;

    const VIEWPORT: f32 = 1400.0;

    /// Pointer x that asks for `width`.
    fn x_for(width: f32) -> f32 {
        VIEWPORT - width - EDGE_MARGIN
    }

    fn drag_to(c: &mut ResizeController, width: f32) {
        c.on_pointer(PointerEvent::Move(pos2(x_for(width), 300.0)), VIEWPORT);
        c.on_frame();
    }

    #[test]
    fn test_drag_updates_width_once_per_frame() {
        let mut c = ResizeController::new(StyleHandle::new());
        c.begin_drag(pos2(x_for(480.0), 300.0));
        c.on_pointer(PointerEvent::Move(pos2(x_for(500.0), 300.0)), VIEWPORT);
        c.on_pointer(PointerEvent::Move(pos2(x_for(520.0), 300.0)), VIEWPORT);
        assert_eq!(c.width(), 480.0);
        assert!(c.on_frame());
        assert_eq!(c.width(), 520.0);
        assert!(!c.on_frame());
    }

    #[test]
    fn test_out_of_range_candidates_are_ignored() {
        let mut c = ResizeController::new(StyleHandle::new());
        c.begin_drag(pos2(0.0, 0.0));
        drag_to(&mut c, 700.0);
        drag_to(&mut c, 950.0);
        assert_eq!(c.width(), 700.0);
        drag_to(&mut c, 100.0);
        assert_eq!(c.width(), 700.0);
        drag_to(&mut c, 900.0);
        assert_eq!(c.width(), 900.0);
    }

    #[test]
    fn test_notepad_minimum_holds_during_drag() {
        let mut c = ResizeController::new(StyleHandle::new());
        assert_eq!(c.width(), 480.0);
        c.set_min_width(600.0);
        assert_eq!(c.width(), 600.0);
        c.begin_drag(pos2(x_for(600.0), 300.0));
        drag_to(&mut c, 250.0);
        assert_eq!(c.width(), 600.0);
        drag_to(&mut c, 599.0);
        assert_eq!(c.width(), 600.0);
        c.end_drag();
        assert_eq!(c.width(), 600.0);
    }

    #[test]
    fn test_lowering_minimum_keeps_width() {
        let mut c = ResizeController::new(StyleHandle::new());
        c.set_min_width(600.0);
        c.set_min_width(MIN_PANEL_WIDTH);
        assert_eq!(c.width(), 600.0);
        assert_eq!(c.bounds().min, MIN_PANEL_WIDTH);
    }

    #[test]
    fn test_style_suppressed_while_dragging() {
        let style = StyleHandle::new();
        let mut c = ResizeController::new(style.clone());
        c.begin_drag(pos2(10.0, 10.0));
        let during = style.current();
        assert!(!during.text_selection);
        assert!(!during.root_selectable);
        assert_eq!(during.cursor, Some(CursorKind::ResizeHorizontal));
    }

    #[test]
    fn test_up_and_leave_restore_style() {
        for end in [PointerEvent::Up, PointerEvent::Leave] {
            let style = StyleHandle::new();
            let mut c = ResizeController::new(style.clone());
            c.begin_drag(pos2(10.0, 10.0));
            c.on_pointer(end, VIEWPORT);
            assert!(!c.is_dragging());
            assert_eq!(style.current(), DocumentStyle::default());
            // repeated ends are harmless
            c.on_pointer(end, VIEWPORT);
            c.end_drag();
            c.end_drag();
            assert_eq!(style.current(), DocumentStyle::default());
            assert_eq!(style.active_guards(), 0);
        }
    }

    #[test]
    fn test_second_begin_is_ignored() {
        let style = StyleHandle::new();
        let mut c = ResizeController::new(style.clone());
        c.begin_drag(pos2(10.0, 10.0));
        c.begin_drag(pos2(99.0, 99.0));
        assert_eq!(c.drag_origin(), Some(pos2(10.0, 10.0)));
        assert_eq!(style.active_guards(), 1);
        c.end_drag();
        assert_eq!(style.active_guards(), 0);
    }

    #[test]
    fn test_events_without_drag_do_nothing() {
        let mut c = ResizeController::new(StyleHandle::new());
        c.on_pointer(PointerEvent::Move(pos2(x_for(700.0), 0.0)), VIEWPORT);
        assert!(!c.has_pending());
        assert!(!c.on_frame());
        assert_eq!(c.width(), 480.0);
    }

    #[test]
    fn test_end_cancels_pending_update() {
        let mut c = ResizeController::new(StyleHandle::new());
        c.begin_drag(pos2(0.0, 0.0));
        c.on_pointer(PointerEvent::Move(pos2(x_for(800.0), 0.0)), VIEWPORT);
        assert!(c.has_pending());
        c.on_pointer(PointerEvent::Up, VIEWPORT);
        assert!(!c.on_frame());
        assert_eq!(c.width(), 480.0);
    }

    #[test]
    fn test_rapid_cycles_leak_nothing() {
        let style = StyleHandle::new();
        let mut c = ResizeController::new(style.clone());
        for i in 0..500 {
            c.begin_drag(pos2(i as f32, 0.0));
            if i % 2 == 0 {
                c.on_pointer(PointerEvent::Leave, VIEWPORT);
            } else {
                c.end_drag();
            }
        }
        assert_eq!(style.active_guards(), 0);
        assert_eq!(style.current(), DocumentStyle::default());
    }

    #[test]
    fn test_initial_width_is_clamped() {
        let c = ResizeController::with_width(StyleHandle::new(), 2000.0);
        assert_eq!(c.width(), MAX_PANEL_WIDTH);
    }
}
