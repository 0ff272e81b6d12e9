//! egui side of the controllers: viewport fullscreen, window style and raw
//! input translation

use egui::{Context, CursorIcon, Event, PointerButton, ViewportCommand, ViewportId};
use slowcore::drag::{CursorKind, DocumentStyle};

use crate::readmode::{FullscreenPlatform, PlatformError, TouchGesture, TouchTracker};
use crate::resize::PointerEvent;

/// Fullscreen through viewport commands. The result shows up in the
/// viewport info on a later frame.
pub struct ViewportFullscreen<'a> {
    ctx: &'a Context,
}

impl<'a> ViewportFullscreen<'a> {
    pub fn new(ctx: &'a Context) -> Self {
        Self { ctx }
    }

    fn send(&self, fullscreen: bool) -> Result<(), PlatformError> {
        if self.ctx.viewport_id() != ViewportId::ROOT {
            return Err(PlatformError::Unsupported);
        }
        self.ctx.send_viewport_cmd(ViewportCommand::Fullscreen(fullscreen));
        Ok(())
    }
}

impl FullscreenPlatform for ViewportFullscreen<'_> {
    fn request_fullscreen(&mut self) -> Result<(), PlatformError> {
        self.send(true)
    }

    fn exit_fullscreen(&mut self) -> Result<(), PlatformError> {
        self.send(false)
    }
}

/// Whether the window is fullscreen right now, if the backend says.
pub fn is_fullscreen(ctx: &Context) -> Option<bool> {
    ctx.input(|i| i.viewport().fullscreen)
}

pub fn cursor_icon(kind: CursorKind) -> CursorIcon {
    match kind {
        CursorKind::Default => CursorIcon::Default,
        CursorKind::ResizeHorizontal => CursorIcon::ResizeHorizontal,
        CursorKind::Grabbing => CursorIcon::Grabbing,
        CursorKind::Crosshair => CursorIcon::Crosshair,
    }
}

/// Push the document style into egui: pinned cursor and whether labels can
/// be selected.
pub fn apply_document_style(ctx: &Context, style: DocumentStyle) {
    if let Some(kind) = style.cursor {
        ctx.set_cursor_icon(cursor_icon(kind));
    }
    let selectable = style.text_selection && style.root_selectable;
    if ctx.style().interaction.selectable_labels != selectable {
        let mut egui_style = (*ctx.style()).clone();
        egui_style.interaction.selectable_labels = selectable;
        ctx.set_style(egui_style);
    }
}

/// Pointer events of this frame that matter to a resize drag, in arrival
/// order.
pub fn drag_pointer_events(ctx: &Context) -> Vec<PointerEvent> {
    ctx.input(|i| {
        i.events
            .iter()
            .filter_map(|event| match event {
                Event::PointerMoved(pos) => Some(PointerEvent::Move(*pos)),
                Event::PointerButton {
                    button: PointerButton::Primary,
                    pressed: false,
                    ..
                } => Some(PointerEvent::Up),
                Event::PointerGone | Event::WindowFocused(false) => Some(PointerEvent::Leave),
                _ => None,
            })
            .collect()
    })
}

/// Zoom wheel input for this frame, one DOM-style `delta_y` per event in
/// arrival order (positive zooms out). Covers modifier+wheel and trackpad
/// pinch, which arrives as a zoom factor.
pub fn zoom_wheel(ctx: &Context) -> Vec<f32> {
    ctx.input(|i| {
        let touching = i.multi_touch().is_some();
        i.events
            .iter()
            .filter_map(|event| match event {
                Event::MouseWheel { delta, modifiers, .. }
                    if (modifiers.command || modifiers.ctrl) && delta.y != 0.0 =>
                {
                    Some(-delta.y)
                }
                Event::Zoom(factor) if *factor != 1.0 && !touching => {
                    Some(if *factor > 1.0 { -1.0 } else { 1.0 })
                }
                _ => None,
            })
            .collect()
    })
}

/// Feed raw touch events into `tracker`, returning the gestures they form.
pub fn touch_gestures(ctx: &Context, tracker: &mut TouchTracker) -> Vec<TouchGesture> {
    let touches: Vec<_> = ctx.input(|i| {
        i.events
            .iter()
            .filter_map(|event| match event {
                Event::Touch { id, phase, pos, .. } => Some((id.0, *phase, *pos)),
                _ => None,
            })
            .collect()
    });
    touches
        .into_iter()
        .map(|(id, phase, pos)| tracker.update(id, phase, pos))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{pos2, RawInput};

    fn frame_with(events: Vec<Event>, f: impl FnOnce(&Context)) {
        let ctx = Context::default();
        let raw = RawInput {
            events,
            ..Default::default()
        };
        let _ = ctx.run(raw, |ctx| f(ctx));
    }

    #[test]
    fn test_pointer_events_in_order() {
        let events = vec![
            Event::PointerMoved(pos2(10.0, 5.0)),
            Event::PointerMoved(pos2(12.0, 5.0)),
            Event::PointerGone,
        ];
        let mut got = Vec::new();
        frame_with(events, |ctx| got = drag_pointer_events(ctx));
        assert_eq!(
            got,
            vec![
                PointerEvent::Move(pos2(10.0, 5.0)),
                PointerEvent::Move(pos2(12.0, 5.0)),
                PointerEvent::Leave,
            ]
        );
    }

    #[test]
    fn test_primary_release_is_up() {
        let events = vec![Event::PointerButton {
            pos: pos2(1.0, 1.0),
            button: PointerButton::Primary,
            pressed: false,
            modifiers: Default::default(),
        }];
        let mut got = Vec::new();
        frame_with(events, |ctx| got = drag_pointer_events(ctx));
        assert_eq!(got, vec![PointerEvent::Up]);
    }

    #[test]
    fn test_each_wheel_event_is_a_step() {
        let ctrl = egui::Modifiers {
            ctrl: true,
            command: true,
            ..Default::default()
        };
        let wheel = |y: f32, modifiers| Event::MouseWheel {
            unit: egui::MouseWheelUnit::Line,
            delta: egui::vec2(0.0, y),
            modifiers,
        };
        let events = vec![
            wheel(1.0, ctrl),
            wheel(1.0, ctrl),
            wheel(-1.0, Default::default()),
            Event::Zoom(0.9),
            wheel(-2.0, ctrl),
        ];
        let mut got = Vec::new();
        frame_with(events, |ctx| got = zoom_wheel(ctx));
        assert_eq!(got, vec![-1.0, -1.0, 1.0, 2.0]);
    }

    #[test]
    fn test_style_toggles_label_selection() {
        frame_with(Vec::new(), |ctx| {
            let suppressed = DocumentStyle {
                text_selection: false,
                cursor: Some(CursorKind::ResizeHorizontal),
                root_selectable: false,
            };
            apply_document_style(ctx, suppressed);
            assert!(!ctx.style().interaction.selectable_labels);
            apply_document_style(ctx, DocumentStyle::default());
            assert!(ctx.style().interaction.selectable_labels);
        });
    }

    #[test]
    fn test_cursor_mapping() {
        assert_eq!(cursor_icon(CursorKind::ResizeHorizontal), CursorIcon::ResizeHorizontal);
        assert_eq!(cursor_icon(CursorKind::Default), CursorIcon::Default);
    }
}
