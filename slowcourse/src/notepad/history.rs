//! Bounded snapshot history for undo/redo

/// Oldest entries are dropped past this many.
pub const HISTORY_LIMIT: usize = 20;

/// A list of snapshots with a cursor. `index` always points at the snapshot
/// matching the live state.
#[derive(Debug, Clone)]
pub struct History<T> {
    entries: Vec<T>,
    index: usize,
    limit: usize,
}

impl<T: Clone> History<T> {
    pub fn new(initial: T) -> Self {
        Self::with_limit(initial, HISTORY_LIMIT)
    }

    pub fn with_limit(initial: T, limit: usize) -> Self {
        Self {
            entries: vec![initial],
            index: 0,
            limit: limit.max(1),
        }
    }

    /// Push a new state. Anything that could have been redone is discarded.
    pub fn record(&mut self, state: T) {
        self.entries.truncate(self.index + 1);
        self.entries.push(state);
        if self.entries.len() > self.limit {
            let overflow = self.entries.len() - self.limit;
            self.entries.drain(..overflow);
        }
        self.index = self.entries.len() - 1;
    }

    /// Overwrite the current entry in place, e.g. to fold consecutive
    /// keystrokes into one undo step. Entries after it stay redoable.
    pub fn replace_current(&mut self, state: T) {
        if let Some(entry) = self.entries.get_mut(self.index) {
            *entry = state;
        }
    }

    /// Step back. `None` at the oldest entry.
    pub fn undo(&mut self) -> Option<&T> {
        if self.index == 0 {
            return None;
        }
        self.index -= 1;
        self.entries.get(self.index)
    }

    /// Step forward. `None` at the newest entry.
    pub fn redo(&mut self) -> Option<&T> {
        if self.index + 1 >= self.entries.len() {
            return None;
        }
        self.index += 1;
        self.entries.get(self.index)
    }

    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn index(&self) -> usize {
        self.index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undo_redo_walks_entries() {
        let mut h = History::new(0);
        h.record(1);
        h.record(2);
        assert_eq!(h.undo(), Some(&1));
        assert_eq!(h.undo(), Some(&0));
        assert_eq!(h.undo(), None);
        assert_eq!(h.index(), 0);
        assert_eq!(h.redo(), Some(&1));
        assert_eq!(h.redo(), Some(&2));
        assert_eq!(h.redo(), None);
    }

    #[test]
    fn test_record_truncates_redo_tail() {
        let mut h = History::new("a");
        h.record("b");
        h.record("c");
        h.undo();
        h.record("d");
        assert!(!h.can_redo());
        assert_eq!(h.redo(), None);
        assert_eq!(h.len(), 3);
        assert_eq!(h.undo(), Some(&"b"));
        assert_eq!(h.redo(), Some(&"d"));
    }

    #[test]
    fn test_limit_drops_oldest() {
        let mut h = History::with_limit(0, 3);
        for i in 1..=5 {
            h.record(i);
        }
        assert_eq!(h.len(), 3);
        assert_eq!(h.index(), 2);
        assert_eq!(h.undo(), Some(&4));
        assert_eq!(h.undo(), Some(&3));
        assert_eq!(h.undo(), None);
    }

    #[test]
    fn test_replace_current() {
        let mut h = History::new(String::from("h"));
        h.record("he".into());
        h.replace_current("hel".into());
        assert_eq!(h.len(), 2);
        assert_eq!(h.undo().map(String::as_str), Some("h"));
        assert_eq!(h.redo().map(String::as_str), Some("hel"));
    }

    #[test]
    fn test_replace_after_undo_keeps_redo_tail() {
        let mut h = History::new(0);
        h.record(1);
        h.record(2);
        h.undo();
        h.replace_current(10);
        assert_eq!(h.len(), 3);
        assert_eq!(h.redo(), Some(&2));
        assert_eq!(h.undo(), Some(&10));
    }

    #[test]
    fn test_index_stays_in_bounds() {
        let mut h = History::new(0);
        for _ in 0..5 {
            h.undo();
            h.redo();
            assert!(h.index() < h.len());
        }
    }
}
