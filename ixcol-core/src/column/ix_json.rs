//! Variable-length JSON string column.

use super::{Column, ColumnRef};
use crate::arena::{ArenaStats, BlockArena, OverflowStore, RawView, total_len};
use crate::config::ColumnConfig;
use crate::error::{IxcolError, Result};
use crate::types::{ItemView, Type};
use crate::wire;
use std::any::Any;
use std::fmt;
use std::io::{Read, Write};
use std::ops::Index;

/// Column of variable-length JSON documents stored as raw bytes.
///
/// Rows are kept as `(pointer, length)` views into memory the column owns:
///
/// - [`append`](Self::append) copies the value into a block,
/// - [`append_owned`](Self::append_owned) takes over the caller's buffer
///   without copying,
/// - [`append_no_managed_lifetime`](Self::append_no_managed_lifetime) records
///   a view over memory the caller keeps alive (the one `unsafe` entry
///   point).
///
/// Every accessor returns slices borrowed from the column, so a row can not
/// be used after [`clear`](Column::clear), after it was swapped away, or
/// after the column is dropped.
///
/// # Example
///
/// ```
/// use ixcol_core::prelude::*;
///
/// let mut column = ColumnIxJson::new();
/// column.append(r#"{"id":1}"#);
/// column.append_owned(String::from(r#"{"id":2}"#));
///
/// assert_eq!(column.len(), 2);
/// assert_eq!(column.at(1).unwrap(), br#"{"id":2}"#);
///
/// let mut wire = Vec::new();
/// column.save_body(&mut wire).unwrap();
///
/// let mut loaded = ColumnIxJson::new();
/// loaded.load_body(&mut wire.as_slice(), 2).unwrap();
/// assert_eq!(loaded, column);
/// ```
pub struct ColumnIxJson {
    column_type: Type,
    config: ColumnConfig,
    /// One view per row, in row order.
    items: Vec<RawView>,
    blocks: BlockArena,
    overflow: OverflowStore,
}

// SAFETY: every view points into `blocks` or `overflow`, which this column
// owns exclusively and never mutates behind `&self`. Views recorded through
// `append_no_managed_lifetime` are covered by that function's contract.
unsafe impl Send for ColumnIxJson {}
unsafe impl Sync for ColumnIxJson {}

impl ColumnIxJson {
    /// Create an empty column with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ColumnConfig::default())
    }

    /// Create an empty column with the given configuration.
    #[must_use]
    pub fn with_config(config: ColumnConfig) -> Self {
        Self {
            column_type: Type::ix_json(),
            config,
            items: Vec::new(),
            blocks: BlockArena::new(),
            overflow: OverflowStore::new(),
        }
    }

    /// Create an empty column sized for `element_count` rows.
    #[must_use]
    pub fn with_capacity(element_count: usize) -> Self {
        let mut column = Self::new();
        column.reserve(element_count);
        column
    }

    /// Create a column holding copies of `values`.
    ///
    /// All values are copied into a single block sized to their total length.
    pub fn from_values<T: AsRef<[u8]>>(values: &[T]) -> Self {
        let mut column = Self::new();
        if values.is_empty() {
            return column;
        }

        let total = values.iter().map(|v| v.as_ref().len()).sum();
        column.items.reserve(values.len());

        let block = column.blocks.push_block(total);
        for value in values {
            column.items.push(block.append(value.as_ref()));
        }
        column
    }

    /// Create a column that takes ownership of `values` without copying.
    pub fn from_owned<T: Into<Vec<u8>>>(values: Vec<T>) -> Self {
        let mut column = Self::new();
        column.items.reserve(values.len());

        for value in values {
            column.append_owned(value);
        }
        column
    }

    /// Configuration of this column.
    #[must_use]
    pub fn config(&self) -> &ColumnConfig {
        &self.config
    }

    /// Reserve room for `additional` more rows.
    ///
    /// Pre-sizes the view index and the block list (one block slot per
    /// `rows_per_block_hint` rows).
    pub fn reserve(&mut self, additional: usize) {
        self.items.reserve(additional);
        self.blocks.reserve(self.config.blocks_for_rows(additional));
    }

    /// Append a copy of `value`.
    pub fn append(&mut self, value: impl AsRef<[u8]>) {
        let value = value.as_ref();
        let block = self.blocks.block_for(value.len(), self.config.block_size);
        self.items.push(block.append(value));
    }

    /// Append `value` by taking ownership of its buffer.
    ///
    /// `String` and `Vec<u8>` are moved in without copying their bytes.
    pub fn append_owned(&mut self, value: impl Into<Vec<u8>>) {
        let view = self.overflow.push(value.into());
        self.items.push(view);
    }

    /// Append a row that refers to `value` without copying or owning it.
    ///
    /// This is the only way to add a row whose bytes the column does not
    /// own.
    ///
    /// # Safety
    /// The memory behind `value` must stay alive and unmodified for as long
    /// as the row can be observed: until the column is cleared or dropped,
    /// or, after a swap, until the column now holding the row is cleared or
    /// dropped. If the column is sent to or shared with another thread, the
    /// memory must remain valid there as well.
    pub unsafe fn append_no_managed_lifetime(&mut self, value: &[u8]) {
        self.items.push(RawView::from_slice(value));
    }

    /// Get row `row`.
    ///
    /// # Errors
    /// Returns [`IxcolError::RowOutOfRange`] if `row >= len()`.
    pub fn at(&self, row: usize) -> Result<&[u8]> {
        match self.items.get(row) {
            // SAFETY: see `view_bytes`.
            Some(view) => Ok(unsafe { view_bytes(*view) }),
            None => Err(IxcolError::RowOutOfRange {
                row,
                size: self.items.len(),
            }),
        }
    }

    /// Iterate over rows in order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &[u8]> + ExactSizeIterator + '_ {
        // SAFETY: see `view_bytes`.
        self.items.iter().map(|view| unsafe { view_bytes(*view) })
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the column has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total payload bytes over all rows.
    #[must_use]
    pub fn total_bytes(&self) -> usize {
        total_len(&self.items)
    }

    /// Number of bytes [`save_body`](Column::save_body) will write.
    #[must_use]
    pub fn serialized_size(&self) -> usize {
        self.items
            .iter()
            .map(|view| wire::string_wire_len(view.len()))
            .sum()
    }

    /// Snapshot of the memory held by this column.
    #[must_use]
    pub fn arena_stats(&self) -> ArenaStats {
        ArenaStats {
            blocks: self.blocks.len(),
            reserved_bytes: self.blocks.reserved_bytes(),
            used_bytes: self.blocks.used_bytes(),
            overflow_entries: self.overflow.len(),
            overflow_bytes: self.overflow.total_bytes(),
        }
    }

    /// Append copies of all rows of `other`.
    ///
    /// The rows are packed into the current block when it has room for all
    /// of them, otherwise into one new block sized for their total.
    pub fn append_from(&mut self, other: &ColumnIxJson) {
        if other.is_empty() {
            return;
        }

        let total = other.total_bytes();
        let block = self.blocks.block_for(total, self.config.block_size);

        // The view index is deliberately not reserved here; growing it
        // geometrically is faster for repeated small appends.
        for view in &other.items {
            // SAFETY: `other` is borrowed for the whole loop.
            self.items.push(block.append(unsafe { view_bytes(*view) }));
        }
    }

    /// Copy rows `[begin, begin + len)` into a new column.
    ///
    /// `len` is clamped to the rows available after `begin`; `begin >= len()`
    /// returns an empty column. The result owns its bytes in a single block
    /// and shares nothing with `self`.
    #[must_use]
    pub fn slice_column(&self, begin: usize, len: usize) -> ColumnIxJson {
        let mut result = Self::with_config(self.config.clone());
        if begin >= self.items.len() {
            return result;
        }

        let len = len.min(self.items.len() - begin);
        let rows = &self.items[begin..begin + len];
        result.items.reserve(len);

        let block = result.blocks.push_block(total_len(rows));
        for view in rows {
            // SAFETY: `self` is borrowed for the whole loop.
            result.items.push(block.append(unsafe { view_bytes(*view) }));
        }
        result
    }

    /// Exchange contents with `other` in constant time.
    ///
    /// Rows, blocks and overflow entries move wholesale; the configurations
    /// stay with their columns.
    pub fn swap_with(&mut self, other: &mut ColumnIxJson) {
        std::mem::swap(&mut self.items, &mut other.items);
        std::mem::swap(&mut self.blocks, &mut other.blocks);
        std::mem::swap(&mut self.overflow, &mut other.overflow);
    }

    fn load_rows(&mut self, input: &mut dyn Read, rows: usize) -> Result<()> {
        self.items.clear();
        self.blocks.clear();
        self.overflow.clear();

        self.items
            .try_reserve(rows)
            .map_err(|e| IxcolError::Reserve {
                rows,
                cause: e.to_string(),
            })?;

        for row in 0..rows {
            let len = wire::read_var_uint(input).map_err(|e| IxcolError::LengthPrefix {
                row,
                cause: e.to_string(),
            })?;
            let len = usize::try_from(len)
                .ok()
                .filter(|&len| len <= isize::MAX as usize)
                .ok_or(IxcolError::LengthOverflow { row, len })?;

            let block = self
                .blocks
                .try_block_for(len, self.config.block_size)
                .map_err(|e| IxcolError::BlockAlloc {
                    row,
                    len,
                    cause: e.to_string(),
                })?;
            wire::read_bytes(input, block.tail_mut(len)).map_err(|e| {
                IxcolError::PayloadRead {
                    row,
                    len,
                    cause: e.to_string(),
                }
            })?;

            self.items.push(block.consume_tail(len));
        }

        Ok(())
    }
}

/// Dereference a view held by a column.
///
/// # Safety
/// `view` must belong to a column that is borrowed for `'a`. Such views point
/// into that column's blocks or overflow entries, which live until the column
/// is cleared, swapped or dropped (all of which need `&mut`), or into
/// external memory covered by `append_no_managed_lifetime`'s contract.
unsafe fn view_bytes<'a>(view: RawView) -> &'a [u8] {
    unsafe { view.as_bytes() }
}

impl Column for ColumnIxJson {
    fn column_type(&self) -> Type {
        self.column_type
    }

    fn append_column(&mut self, column: &dyn Column) {
        if let Some(other) = column.as_column::<Self>() {
            self.append_from(other);
        }
    }

    fn load_body(&mut self, input: &mut dyn Read, rows: usize) -> Result<()> {
        match self.load_rows(input, rows) {
            Ok(()) => {
                tracing::debug!(rows, blocks = self.blocks.len(), "Loaded column body");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(
                    rows,
                    loaded = self.items.len(),
                    error = %e,
                    "Failed to load column body"
                );
                Err(e)
            }
        }
    }

    fn save_body(&self, output: &mut dyn Write) -> Result<()> {
        for (row, bytes) in self.iter().enumerate() {
            wire::write_string(output, bytes).map_err(|e| IxcolError::Write {
                row,
                cause: e.to_string(),
            })?;
        }

        tracing::debug!(rows = self.items.len(), "Saved column body");
        Ok(())
    }

    fn clear(&mut self) {
        self.items = Vec::new();
        self.blocks.clear();
        self.overflow.clear();
    }

    fn size(&self) -> usize {
        self.items.len()
    }

    fn slice(&self, begin: usize, len: usize) -> ColumnRef {
        Box::new(self.slice_column(begin, len))
    }

    fn clone_empty(&self) -> ColumnRef {
        Box::new(Self::with_config(self.config.clone()))
    }

    fn swap(&mut self, other: &mut dyn Column) -> Result<()> {
        let actual = other.column_type().code();
        match other.as_column_mut::<Self>() {
            Some(other) => {
                self.swap_with(other);
                Ok(())
            }
            None => Err(IxcolError::TypeMismatch {
                expected: self.column_type.code(),
                actual,
            }),
        }
    }

    fn get_item(&self, row: usize) -> Result<ItemView<'_>> {
        Ok(ItemView::new(self.column_type.code(), self.at(row)?))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl Default for ColumnIxJson {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ColumnIxJson {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnIxJson")
            .field("rows", &self.items.len())
            .field("blocks", &self.blocks.len())
            .field("overflow", &self.overflow.len())
            .field("config", &self.config)
            .finish()
    }
}

/// Columns are equal when they hold the same rows in the same order.
impl PartialEq for ColumnIxJson {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl Eq for ColumnIxJson {}

impl Index<usize> for ColumnIxJson {
    type Output = [u8];

    /// # Panics
    /// Panics if `row >= len()`; use [`at`](ColumnIxJson::at) for a checked
    /// lookup.
    fn index(&self, row: usize) -> &[u8] {
        // SAFETY: see `view_bytes`.
        unsafe { view_bytes(self.items[row]) }
    }
}

impl<T: AsRef<[u8]>> Extend<T> for ColumnIxJson {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.append(value);
        }
    }
}

impl<T: AsRef<[u8]>> FromIterator<T> for ColumnIxJson {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut column = Self::new();
        column.extend(iter);
        column
    }
}
