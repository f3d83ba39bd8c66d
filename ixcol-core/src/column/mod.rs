//! Column interface and the concrete column kinds of this crate.
//!
//! Generic batch code works with [`ColumnRef`] (`Box<dyn Column>`) and asks a
//! column for its concrete kind with `as_column` when an operation only
//! applies between columns of the same kind:
//!
//! ```
//! use ixcol_core::prelude::*;
//!
//! let mut target: ColumnRef = Box::new(ColumnIxJson::from_values(&["z"]));
//! let source = ColumnIxJson::from_values(&["x", "y"]);
//!
//! target.append_column(&source);
//! assert_eq!(target.size(), 3);
//!
//! let typed = target.as_column::<ColumnIxJson>().unwrap();
//! assert_eq!(typed.at(1).unwrap(), b"x");
//! ```

mod ix_json;

pub use ix_json::ColumnIxJson;

use crate::error::Result;
use crate::types::{ItemView, Type};
use std::any::Any;
use std::fmt;
use std::io::{Read, Write};

/// Owned, type-erased column.
pub type ColumnRef = Box<dyn Column>;

/// Operations every column kind supports.
///
/// Columns are single-writer: mutating methods take `&mut self`, so a column
/// can never be read while it is being modified.
pub trait Column: Any + Send + Sync + fmt::Debug + 'static {
    /// Type tag of this column.
    fn column_type(&self) -> Type;

    /// Append all rows of `column` to the end of this one.
    ///
    /// Does nothing when `column` is of a different concrete kind.
    fn append_column(&mut self, column: &dyn Column);

    /// Replace the contents with `rows` rows decoded from `input`.
    ///
    /// # Errors
    /// Returns a load error if the stream fails or ends early. Rows decoded
    /// before the failure are kept; the column must be discarded or cleared.
    fn load_body(&mut self, input: &mut dyn Read, rows: usize) -> Result<()>;

    /// Encode every row, in order, to `output`.
    ///
    /// # Errors
    /// Returns [`IxcolError::Write`](crate::IxcolError::Write) if the stream
    /// rejects a write.
    fn save_body(&self, output: &mut dyn Write) -> Result<()>;

    /// Remove all rows and release their memory.
    fn clear(&mut self);

    /// Number of rows.
    fn size(&self) -> usize;

    /// Copy rows `[begin, begin + len)` into a new, independent column.
    ///
    /// `len` is clamped to the available rows; `begin >= size()` yields an
    /// empty column.
    fn slice(&self, begin: usize, len: usize) -> ColumnRef;

    /// New empty column of the same concrete kind.
    fn clone_empty(&self) -> ColumnRef;

    /// Exchange contents with `other` without copying rows.
    ///
    /// # Errors
    /// Returns [`IxcolError::TypeMismatch`](crate::IxcolError::TypeMismatch)
    /// if `other` is of a different concrete kind; both columns are left
    /// unchanged.
    fn swap(&mut self, other: &mut dyn Column) -> Result<()>;

    /// Tagged view of one row.
    ///
    /// # Errors
    /// Returns [`IxcolError::RowOutOfRange`](crate::IxcolError::RowOutOfRange)
    /// if `row >= size()`.
    fn get_item(&self, row: usize) -> Result<ItemView<'_>>;

    /// Upcast for concrete-kind queries.
    fn as_any(&self) -> &dyn Any;

    /// Mutable upcast for concrete-kind queries.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl dyn Column {
    /// Get this column as concrete kind `T`, if it is one.
    pub fn as_column<T: Column>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// Get this column mutably as concrete kind `T`, if it is one.
    pub fn as_column_mut<T: Column>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }

    /// Check whether this column is of concrete kind `T`.
    pub fn is<T: Column>(&self) -> bool {
        self.as_any().is::<T>()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::IxcolError;
    use crate::types::TypeCode;

    /// A column of a different concrete kind, for mismatch tests.
    #[derive(Debug, Default)]
    pub(crate) struct CounterColumn {
        pub rows: usize,
    }

    impl Column for CounterColumn {
        fn column_type(&self) -> Type {
            Type::ix_json()
        }

        fn append_column(&mut self, column: &dyn Column) {
            if let Some(other) = column.as_column::<Self>() {
                self.rows += other.rows;
            }
        }

        fn load_body(&mut self, _input: &mut dyn Read, rows: usize) -> Result<()> {
            self.rows = rows;
            Ok(())
        }

        fn save_body(&self, _output: &mut dyn Write) -> Result<()> {
            Ok(())
        }

        fn clear(&mut self) {
            self.rows = 0;
        }

        fn size(&self) -> usize {
            self.rows
        }

        fn slice(&self, begin: usize, len: usize) -> ColumnRef {
            Box::new(Self {
                rows: len.min(self.rows.saturating_sub(begin)),
            })
        }

        fn clone_empty(&self) -> ColumnRef {
            Box::new(Self::default())
        }

        fn swap(&mut self, other: &mut dyn Column) -> Result<()> {
            let actual = other.column_type().code();
            match other.as_column_mut::<Self>() {
                Some(other) => {
                    std::mem::swap(&mut self.rows, &mut other.rows);
                    Ok(())
                }
                None => Err(IxcolError::TypeMismatch {
                    expected: TypeCode::IxJson,
                    actual,
                }),
            }
        }

        fn get_item(&self, row: usize) -> Result<ItemView<'_>> {
            Err(IxcolError::RowOutOfRange {
                row,
                size: self.rows,
            })
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    #[test]
    fn downcast_matching_kind() {
        let column: ColumnRef = Box::new(CounterColumn { rows: 3 });
        assert!(column.is::<CounterColumn>());
        assert_eq!(column.as_column::<CounterColumn>().map(|c| c.rows), Some(3));
    }

    #[test]
    fn downcast_other_kind() {
        let column: ColumnRef = Box::new(CounterColumn::default());
        assert!(!column.is::<ColumnIxJson>());
        assert!(column.as_column::<ColumnIxJson>().is_none());
    }

    #[test]
    fn downcast_mut() {
        let mut column: ColumnRef = Box::new(CounterColumn { rows: 1 });
        if let Some(counter) = column.as_column_mut::<CounterColumn>() {
            counter.rows = 9;
        }
        assert_eq!(column.size(), 9);
    }
}
