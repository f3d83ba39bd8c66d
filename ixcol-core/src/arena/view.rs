//! Non-owning views into column memory.

use std::fmt;
use std::ptr::NonNull;

/// A non-owning `(pointer, length)` reference to bytes owned elsewhere.
///
/// A `RawView` is what the column's view index stores for every row. It is
/// only ever created over memory the column owns (a [`Block`](super::Block)
/// or an [`OverflowStore`](super::OverflowStore) entry) or over memory the
/// caller promised to keep alive. Dereferencing it is therefore `unsafe`;
/// the column is responsible for tying the resulting slice to its own
/// borrow.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct RawView {
    ptr: NonNull<u8>,
    len: usize,
}

impl RawView {
    /// Create a view over an existing slice.
    ///
    /// The view does not borrow `bytes`; the caller tracks how long the
    /// memory stays valid.
    #[must_use]
    pub fn from_slice(bytes: &[u8]) -> Self {
        Self {
            ptr: NonNull::from(bytes).cast::<u8>(),
            len: bytes.len(),
        }
    }

    /// Create a view from a raw pointer and a length.
    ///
    /// # Safety
    /// `ptr` must be valid for reads of `len` bytes for as long as the view
    /// is dereferenced.
    #[must_use]
    pub(crate) const unsafe fn from_raw_parts(ptr: NonNull<u8>, len: usize) -> Self {
        Self { ptr, len }
    }

    /// Get the bytes behind the view.
    ///
    /// # Safety
    /// The memory the view was created over must still be alive and must
    /// not be mutated for the chosen lifetime `'a`.
    #[must_use]
    pub unsafe fn as_bytes<'a>(self) -> &'a [u8] {
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    /// Start address of the view.
    #[must_use]
    pub const fn as_ptr(&self) -> *const u8 {
        self.ptr.as_ptr()
    }

    /// Length of the view in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Check if the view is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl fmt::Debug for RawView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawView")
            .field("ptr", &self.ptr)
            .field("len", &self.len)
            .finish()
    }
}

/// Total number of bytes referenced by a run of views.
pub(crate) fn total_len(views: &[RawView]) -> usize {
    views.iter().map(RawView::len).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_over_slice() {
        let data = b"hello".to_vec();
        let view = RawView::from_slice(&data);

        assert_eq!(view.len(), 5);
        assert!(!view.is_empty());
        assert_eq!(view.as_ptr(), data.as_ptr());
        assert_eq!(unsafe { view.as_bytes() }, b"hello");
    }

    #[test]
    fn empty_view() {
        let view = RawView::from_slice(&[]);
        assert!(view.is_empty());
        assert_eq!(unsafe { view.as_bytes() }, b"");
    }

    #[test]
    fn total_len_of_views() {
        let a = b"ab".to_vec();
        let b = b"cde".to_vec();
        let views = [RawView::from_slice(&a), RawView::from_slice(&b)];
        assert_eq!(total_len(&views), 5);
        assert_eq!(total_len(&[]), 0);
    }
}
