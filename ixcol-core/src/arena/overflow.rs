//! Address-stable storage for moved-in byte strings.

use super::RawView;
use std::collections::VecDeque;

/// Append-only store of independently owned byte strings.
///
/// Each entry keeps its own heap buffer. Growing the deque moves the `Vec`
/// headers but never the buffers they point to, so views issued for earlier
/// entries stay valid when new entries are pushed.
#[derive(Debug, Default)]
pub struct OverflowStore {
    entries: VecDeque<Vec<u8>>,
}

impl OverflowStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of `value` and return a view over its bytes.
    ///
    /// The buffer is not copied.
    pub fn push(&mut self, value: Vec<u8>) -> RawView {
        let view = RawView::from_slice(&value);
        self.entries.push_back(value);
        view
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total bytes held by all entries.
    #[must_use]
    pub fn total_bytes(&self) -> usize {
        self.entries.iter().map(Vec::len).sum()
    }

    /// Drop every entry and release the deque's own allocation.
    pub fn clear(&mut self) {
        self.entries = VecDeque::new();
    }
}
