//! Document style suppression while dragging
//!
//! While the user drags a splitter or a resize handle, text selection has to
//! be switched off and the cursor pinned to the drag cursor, otherwise the
//! pointer sweeps a selection across the whole window. `StyleHandle` holds the
//! window-wide style; `suppress` hands out a guard that puts the previous
//! values back when it is dropped, on whatever path the drag ends.

use std::cell::RefCell;
use std::rc::Rc;

/// Cursor shapes the document can be pinned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorKind {
    #[default]
    Default,
    ResizeHorizontal,
    Grabbing,
    Crosshair,
}

/// The parts of the window style a drag can take over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentStyle {
    pub text_selection: bool,
    pub cursor: Option<CursorKind>,
    pub root_selectable: bool,
}

impl Default for DocumentStyle {
    fn default() -> Self {
        Self {
            text_selection: true,
            cursor: None,
            root_selectable: true,
        }
    }
}

#[derive(Debug, Default)]
struct Shared {
    style: DocumentStyle,
    guards: usize,
}

/// Cloneable handle to the window style. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct StyleHandle(Rc<RefCell<Shared>>);

impl StyleHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> DocumentStyle {
        self.0.borrow().style
    }

    /// Number of guards currently alive.
    pub fn active_guards(&self) -> usize {
        self.0.borrow().guards
    }

    /// Turn off selection and pin the cursor until the guard is dropped.
    pub fn suppress(&self, cursor: CursorKind) -> DragStyleGuard {
        let mut shared = self.0.borrow_mut();
        let saved = shared.style;
        shared.style = DocumentStyle {
            text_selection: false,
            cursor: Some(cursor),
            root_selectable: false,
        };
        shared.guards += 1;
        DragStyleGuard {
            handle: self.clone(),
            saved,
        }
    }
}

/// Restores the style captured by [`StyleHandle::suppress`] on drop.
#[derive(Debug)]
#[must_use = "dropping the guard immediately restores the style"]
pub struct DragStyleGuard {
    handle: StyleHandle,
    saved: DocumentStyle,
}

impl DragStyleGuard {
    pub fn saved(&self) -> DocumentStyle {
        self.saved
    }
}

impl Drop for DragStyleGuard {
    fn drop(&mut self) {
        let mut shared = self.handle.0.borrow_mut();
        shared.style = self.saved;
        shared.guards = shared.guards.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_restores_on_drop() {
        let handle = StyleHandle::new();
        let before = handle.current();
        {
            let _guard = handle.suppress(CursorKind::ResizeHorizontal);
            let during = handle.current();
            assert!(!during.text_selection);
            assert!(!during.root_selectable);
            assert_eq!(during.cursor, Some(CursorKind::ResizeHorizontal));
            assert_eq!(handle.active_guards(), 1);
        }
        assert_eq!(handle.current(), before);
        assert_eq!(handle.active_guards(), 0);
    }

    #[test]
    fn test_restores_exact_prior_values() {
        let handle = StyleHandle::new();
        let outer = handle.suppress(CursorKind::Crosshair);
        let inner = handle.suppress(CursorKind::ResizeHorizontal);
        assert_eq!(inner.saved().cursor, Some(CursorKind::Crosshair));
        drop(inner);
        assert_eq!(handle.current().cursor, Some(CursorKind::Crosshair));
        drop(outer);
        assert_eq!(handle.current(), DocumentStyle::default());
    }

    #[test]
    fn test_restores_on_panic_unwind() {
        let handle = StyleHandle::new();
        let h = handle.clone();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(move || {
            let _guard = h.suppress(CursorKind::Grabbing);
            panic!("drag handler blew up");
        }));
        assert!(result.is_err());
        assert_eq!(handle.current(), DocumentStyle::default());
        assert_eq!(handle.active_guards(), 0);
    }

    #[test]
    fn test_rapid_cycles_leak_nothing() {
        let handle = StyleHandle::new();
        for _ in 0..1000 {
            let guard = handle.suppress(CursorKind::ResizeHorizontal);
            drop(guard);
        }
        assert_eq!(handle.active_guards(), 0);
        assert_eq!(handle.current(), DocumentStyle::default());
    }
}
