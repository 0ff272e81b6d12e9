//! Safety utilities for crash-proof slowOS applications.
//!
//! Helpers for the usual panic sources: slicing a string at a char index
//! that is not a byte index, and a panic inside one frame's rendering.

/// Byte offset of the `char_idx`-th character, or `s.len()` past the end.
pub fn char_to_byte(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

/// Run a closure, catching any panic. Returns the closure result on success,
/// or `fallback` on panic. Used to isolate per-frame rendering.
pub fn catch_or<T>(fallback: T, f: impl FnOnce() -> T) -> T {
    match std::panic::catch_unwind(std::panic::AssertUnwindSafe(f)) {
        Ok(val) => val,
        Err(payload) => {
            let msg = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            tracing::error!(panic = %msg, "caught panic in frame, recovered");
            fallback
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_to_byte() {
        let s = "café!";
        assert_eq!(char_to_byte(s, 0), 0);
        assert_eq!(char_to_byte(s, 3), 3);
        assert_eq!(char_to_byte(s, 4), 5); // 'é' is 2 bytes
        assert_eq!(char_to_byte(s, 99), s.len());
    }

    #[test]
    fn test_catch_or_returns_fallback() {
        assert_eq!(catch_or(7, || 3), 3);
        assert_eq!(catch_or(7, || -> i32 { panic!("boom") }), 7);
    }
}
