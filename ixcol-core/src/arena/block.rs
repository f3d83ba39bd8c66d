//! Fixed-capacity append-only byte blocks.

use super::RawView;
use std::collections::TryReserveError;
use std::fmt;
use std::ptr::{self, NonNull};

/// A fixed-capacity, contiguously allocated byte buffer.
///
/// A block only grows at its tail and is never reallocated, so every view
/// handed out by [`append`](Self::append) or
/// [`consume_tail`](Self::consume_tail) stays valid until the block is
/// dropped.
///
/// # Preconditions
///
/// Every tail operation requires `len <= available()`. Violating it panics
/// before any memory is touched. Column code checks capacity through
/// [`BlockArena::block_for`](super::BlockArena::block_for) first.
pub struct Block {
    /// Start of the storage; owned, `capacity` bytes long.
    data: NonNull<u8>,
    /// Size of the storage in bytes.
    capacity: usize,
    /// Number of bytes already handed out.
    used: usize,
}

// SAFETY: the block exclusively owns its storage. Mutation needs `&mut Block`
// and only touches the unused tail, which no view refers to.
unsafe impl Send for Block {}
unsafe impl Sync for Block {}

impl Block {
    /// Allocate a zeroed block of `capacity` bytes.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self::from_storage(vec![0u8; capacity].into_boxed_slice())
    }

    /// Allocate a zeroed block of `capacity` bytes, reporting allocation
    /// failure instead of aborting.
    ///
    /// # Errors
    /// Returns the allocator's error if `capacity` bytes can not be reserved.
    pub fn try_new(capacity: usize) -> Result<Self, TryReserveError> {
        let mut storage = Vec::new();
        storage.try_reserve_exact(capacity)?;
        storage.resize(capacity, 0u8);
        Ok(Self::from_storage(storage.into_boxed_slice()))
    }

    fn from_storage(storage: Box<[u8]>) -> Self {
        let capacity = storage.len();
        let data = NonNull::from(Box::leak(storage)).cast::<u8>();
        Self {
            data,
            capacity,
            used: 0,
        }
    }

    /// Total capacity in bytes.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Bytes already handed out.
    #[inline]
    #[must_use]
    pub fn used(&self) -> usize {
        self.used
    }

    /// Bytes still free at the tail.
    #[inline]
    #[must_use]
    pub fn available(&self) -> usize {
        self.capacity - self.used
    }

    /// Copy `bytes` into the tail and return a view over the copy.
    ///
    /// # Panics
    /// Panics if `bytes.len() > self.available()`.
    #[inline]
    pub fn append(&mut self, bytes: &[u8]) -> RawView {
        let len = bytes.len();
        self.check_tail(len);

        // SAFETY: `check_tail` guarantees `used + len <= capacity`, and the
        // tail is not aliased by any view. `bytes` cannot overlap the tail
        // because no reference to the tail exists outside `&mut self`.
        unsafe {
            let dst = self.data.as_ptr().add(self.used);
            ptr::copy_nonoverlapping(bytes.as_ptr(), dst, len);
            self.used += len;
            RawView::from_raw_parts(NonNull::new_unchecked(dst), len)
        }
    }

    /// Get the next `len` bytes of the tail for an external writer.
    ///
    /// The region is not handed out until [`consume_tail`](Self::consume_tail)
    /// is called with the same length.
    ///
    /// # Panics
    /// Panics if `len > self.available()`.
    #[inline]
    pub fn tail_mut(&mut self, len: usize) -> &mut [u8] {
        self.check_tail(len);

        // SAFETY: bounds checked above; the region is initialised (zeroed on
        // allocation) and disjoint from every issued view.
        unsafe { std::slice::from_raw_parts_mut(self.data.as_ptr().add(self.used), len) }
    }

    /// Advance the tail by `len` bytes and return a view over them.
    ///
    /// # Panics
    /// Panics if `len > self.available()`.
    #[inline]
    pub fn consume_tail(&mut self, len: usize) -> RawView {
        self.check_tail(len);

        // SAFETY: bounds checked above.
        unsafe {
            let start = self.data.as_ptr().add(self.used);
            self.used += len;
            RawView::from_raw_parts(NonNull::new_unchecked(start), len)
        }
    }

    #[inline]
    fn check_tail(&self, len: usize) {
        assert!(
            len <= self.available(),
            "block tail overflow: requested {} bytes, available {}",
            len,
            self.available()
        );
    }
}

impl Drop for Block {
    fn drop(&mut self) {
        // SAFETY: `data` and `capacity` come from the leaked boxed slice in
        // `new` and are released exactly once here.
        unsafe {
            drop(Box::from_raw(ptr::slice_from_raw_parts_mut(
                self.data.as_ptr(),
                self.capacity,
            )));
        }
    }
}

impl fmt::Debug for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Block")
            .field("capacity", &self.capacity)
            .field("used", &self.used)
            .finish()
    }
}
