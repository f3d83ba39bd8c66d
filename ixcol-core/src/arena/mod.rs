//! Block arena backing a column's row bytes.
//!
//! Row bytes live in one of two places:
//!
//! - **Blocks**: fixed-capacity buffers filled from the tail. Copied values
//!   and values decoded from the wire land here.
//! - **Overflow store**: buffers moved in by the caller, kept as-is.
//!
//! The column's view index holds a [`RawView`] per row into either of them.
//!
//! # Layout
//!
//! ```text
//! blocks:   ┌──────────────────────┬───────┐ ┌──────────────────────────┐
//!           │ "a" "bb" "ccc" ...   │ waste │ │ <value larger than 4 KB> │
//!           └──────────────────────┴───────┘ └──────────────────────────┘
//! overflow: [ Vec<u8> ] [ Vec<u8> ] ...
//! views:    (ptr,len) (ptr,len) (ptr,len) ...   one per row, in row order
//! ```
//!
//! # Sizing
//!
//! A new block is allocated when there is no block yet or the last block has
//! fewer free bytes than the incoming value. Its capacity is
//! `max(block_size, len)`, so a value is never split across blocks and a
//! value that exactly fills the remaining space reuses the current block.

mod block;
mod overflow;
mod stats;
mod view;

pub use block::Block;
pub use overflow::OverflowStore;
pub use stats::ArenaStats;
pub use view::RawView;

pub(crate) use view::total_len;

use std::collections::TryReserveError;

/// Default block capacity: 4 KB.
pub const DEFAULT_BLOCK_SIZE: usize = 4096;

/// Ordered sequence of blocks owned by one column.
#[derive(Debug, Default)]
pub struct BlockArena {
    blocks: Vec<Block>,
}

impl BlockArena {
    /// Create an empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve room for `additional` more block slots.
    pub fn reserve(&mut self, additional: usize) {
        self.blocks.reserve(additional);
    }

    /// Get a block with at least `len` free bytes.
    ///
    /// Reuses the last block when `available() >= len`, otherwise allocates
    /// a new block of `max(block_size, len)` bytes. Earlier blocks are never
    /// revisited.
    pub fn block_for(&mut self, len: usize, block_size: usize) -> &mut Block {
        if !self.last_fits(len) {
            return self.push_block(block_size.max(len));
        }
        self.last_mut()
    }

    /// Fallible [`block_for`](Self::block_for) for lengths read from
    /// untrusted input.
    ///
    /// # Errors
    /// Returns the allocator's error if a new block is needed and can not be
    /// allocated. The arena is left unchanged.
    pub fn try_block_for(
        &mut self,
        len: usize,
        block_size: usize,
    ) -> Result<&mut Block, TryReserveError> {
        if !self.last_fits(len) {
            let block = Block::try_new(block_size.max(len))?;
            return Ok(self.install(block));
        }
        Ok(self.last_mut())
    }

    /// Allocate a block of exactly `capacity` bytes and make it current.
    pub fn push_block(&mut self, capacity: usize) -> &mut Block {
        self.install(Block::new(capacity))
    }

    fn install(&mut self, block: Block) -> &mut Block {
        let capacity = block.capacity();
        self.blocks.push(block);
        tracing::trace!(capacity, blocks = self.blocks.len(), "Allocated arena block");
        self.last_mut()
    }

    fn last_fits(&self, len: usize) -> bool {
        self.blocks
            .last()
            .is_some_and(|block| block.available() >= len)
    }

    fn last_mut(&mut self) -> &mut Block {
        let last = self.blocks.len() - 1;
        &mut self.blocks[last]
    }

    /// Number of blocks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Check if no block has been allocated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Iterate over blocks in allocation order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Block> + '_ {
        self.blocks.iter()
    }

    /// Sum of block capacities.
    #[must_use]
    pub fn reserved_bytes(&self) -> usize {
        self.blocks.iter().map(Block::capacity).sum()
    }

    /// Sum of bytes handed out from all blocks.
    #[must_use]
    pub fn used_bytes(&self) -> usize {
        self.blocks.iter().map(Block::used).sum()
    }

    /// Drop every block and release the block list's own allocation.
    pub fn clear(&mut self) {
        self.blocks = Vec::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_value_allocates_default_block() {
        let mut arena = BlockArena::new();
        let block = arena.block_for(10, DEFAULT_BLOCK_SIZE);
        assert_eq!(block.capacity(), DEFAULT_BLOCK_SIZE);
        assert_eq!(arena.len(), 1);
    }

    #[test]
    fn large_value_gets_own_block() {
        let mut arena = BlockArena::new();
        let block = arena.block_for(10_000, DEFAULT_BLOCK_SIZE);
        assert_eq!(block.capacity(), 10_000);
    }

    #[test]
    fn exact_fit_reuses_block() {
        let mut arena = BlockArena::new();
        arena.block_for(6, 10).append(b"abcdef");

        // 4 bytes left, 4 bytes requested: same block
        arena.block_for(4, 10).append(b"ghij");
        assert_eq!(arena.len(), 1);

        // Block is now full, the next byte needs a new one
        arena.block_for(1, 10).append(b"k");
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn short_tail_is_abandoned() {
        let mut arena = BlockArena::new();
        arena.block_for(8, 10).append(b"12345678");
        arena.block_for(3, 10).append(b"abc");

        assert_eq!(arena.len(), 2);
        assert_eq!(arena.reserved_bytes(), 20);
        assert_eq!(arena.used_bytes(), 11);

        // The abandoned tail of the first block is never revisited
        arena.block_for(2, 10).append(b"xy");
        assert_eq!(arena.len(), 2);
        assert_eq!(arena.iter().next().map(Block::used), Some(8));
    }

    #[test]
    fn try_block_for_follows_policy() {
        let mut arena = BlockArena::new();
        arena.try_block_for(6, 10).unwrap().append(b"abcdef");
        arena.try_block_for(4, 10).unwrap().append(b"ghij");
        assert_eq!(arena.len(), 1);

        let block = arena.try_block_for(25, 10).unwrap();
        assert_eq!(block.capacity(), 25);
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn failed_allocation_leaves_arena_unchanged() {
        let mut arena = BlockArena::new();
        arena.block_for(3, 8).append(b"abc");

        assert!(arena.try_block_for(usize::MAX, 8).is_err());
        assert_eq!(arena.len(), 1);
        assert_eq!(arena.used_bytes(), 3);

        // The current block is still usable
        arena.try_block_for(5, 8).unwrap().append(b"defgh");
        assert_eq!(arena.len(), 1);
    }

    #[test]
    fn clear_drops_blocks() {
        let mut arena = BlockArena::new();
        arena.block_for(1, 16);
        arena.block_for(32, 16);
        assert_eq!(arena.len(), 2);

        arena.clear();
        assert!(arena.is_empty());
        assert_eq!(arena.reserved_bytes(), 0);
    }
}
