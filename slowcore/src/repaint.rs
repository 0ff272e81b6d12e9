//! Repaint scheduling for slowOS
//!
//! egui redraws on input. Anything that changes state outside an input event
//! (a deferred decode finishing, a frame-coalesced width update, a periodic
//! check) has to ask for another frame itself. `RepaintController` collects
//! those requests and issues at most one repaint per frame.
//!
//! `FrameSlot` is the "pending update, apply at the next tick" primitive:
//! producers overwrite it as events arrive, the frame drains it once.

use std::time::Duration;

/// Default interval for timed repaints (e-ink friendly ~4 Hz).
const DEFAULT_REPAINT_INTERVAL: Duration = Duration::from_millis(250);

/// Why this frame is being painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepaintReason {
    /// First frame
    Init,
    /// User input (mouse move, key press, scroll)
    Input,
    /// Internal state changed
    StateChange,
    /// Periodic wake-up
    Timer,
}

/// Controls when the egui context should request repaints.
///
/// Call [`begin_frame`](Self::begin_frame) at the top of `update()` and
/// [`end_frame`](Self::end_frame) at the bottom.
#[derive(Debug)]
pub struct RepaintController {
    needs_repaint: bool,
    wake_after: Option<Duration>,
    frame: u64,
    reason: RepaintReason,
}

impl Default for RepaintController {
    fn default() -> Self {
        Self::new()
    }
}

impl RepaintController {
    pub fn new() -> Self {
        Self {
            needs_repaint: false,
            wake_after: None,
            frame: 0,
            reason: RepaintReason::Init,
        }
    }

    /// Request one more frame as soon as possible.
    pub fn mark_needs_repaint(&mut self) {
        self.needs_repaint = true;
    }

    /// Request a frame no later than `after`. The shortest request wins.
    pub fn wake_within(&mut self, after: Duration) {
        self.wake_after = Some(match self.wake_after {
            Some(current) => current.min(after),
            None => after,
        });
    }

    /// Keep ticking at the e-ink friendly default rate.
    pub fn tick(&mut self) {
        self.wake_within(DEFAULT_REPAINT_INTERVAL);
    }

    pub fn needs_repaint(&self) -> bool {
        self.needs_repaint
    }

    pub fn reason(&self) -> RepaintReason {
        self.reason
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn begin_frame(&mut self, ctx: &egui::Context) {
        let had_input = ctx.input(|i| {
            !i.events.is_empty()
                || i.pointer.any_pressed()
                || i.pointer.any_released()
                || i.raw_scroll_delta != egui::Vec2::ZERO
                || i.pointer.is_moving()
        });
        self.reason = Self::classify(self.frame, had_input, self.needs_repaint);
        self.needs_repaint = false;
        self.wake_after = None;
    }

    fn classify(frame: u64, had_input: bool, needs_repaint: bool) -> RepaintReason {
        if frame == 0 {
            RepaintReason::Init
        } else if had_input {
            RepaintReason::Input
        } else if needs_repaint {
            RepaintReason::StateChange
        } else {
            RepaintReason::Timer
        }
    }

    pub fn end_frame(&mut self, ctx: &egui::Context) {
        self.frame += 1;
        if self.needs_repaint {
            ctx.request_repaint();
        } else if let Some(after) = self.wake_after {
            ctx.request_repaint_after(after);
        }
    }
}

/// A single pending value, overwritten by each producer and drained once
/// per frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSlot<T> {
    pending: Option<T>,
}

impl<T> Default for FrameSlot<T> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<T> FrameSlot<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value`, replacing anything not yet applied.
    pub fn set(&mut self, value: T) {
        self.pending = Some(value);
    }

    pub fn take(&mut self) -> Option<T> {
        self.pending.take()
    }

    pub fn clear(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn peek(&self) -> Option<&T> {
        self.pending.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_last_write_wins() {
        let mut slot = FrameSlot::new();
        slot.set(300.0);
        slot.set(320.0);
        slot.set(310.0);
        assert!(slot.is_pending());
        assert_eq!(slot.take(), Some(310.0));
        assert_eq!(slot.take(), None);
        assert!(!slot.is_pending());
    }

    #[test]
    fn test_slot_clear() {
        let mut slot = FrameSlot::new();
        slot.set(1u32);
        slot.clear();
        assert_eq!(slot.peek(), None);
    }

    #[test]
    fn test_shortest_wake_wins() {
        let mut rc = RepaintController::new();
        rc.wake_within(Duration::from_secs(2));
        rc.tick();
        assert_eq!(rc.wake_after, Some(DEFAULT_REPAINT_INTERVAL));
        rc.wake_within(Duration::from_secs(5));
        assert_eq!(rc.wake_after, Some(DEFAULT_REPAINT_INTERVAL));
    }

    #[test]
    fn test_classify() {
        assert_eq!(RepaintController::classify(0, true, true), RepaintReason::Init);
        assert_eq!(RepaintController::classify(3, true, false), RepaintReason::Input);
        assert_eq!(RepaintController::classify(3, false, true), RepaintReason::StateChange);
        assert_eq!(RepaintController::classify(3, false, false), RepaintReason::Timer);
    }
}
