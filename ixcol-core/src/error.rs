//! Error types for ixcol.
//!
//! Every error carries the row (or size) it is about so a failed load or an
//! out-of-range access can be traced back to the offending input.

use crate::types::TypeCode;
use thiserror::Error;

/// The main error type for column operations.
#[derive(Error, Debug)]
pub enum IxcolError {
    // =========================================================================
    // Access Errors (E001-E099)
    // =========================================================================
    /// Row index past the end of the column.
    #[error("E001: Row {row} out of range for column of {size} rows")]
    RowOutOfRange {
        /// The requested row.
        row: usize,
        /// Number of rows in the column.
        size: usize,
    },

    // =========================================================================
    // Load Errors (E100-E199)
    // =========================================================================
    /// Failed to read the length prefix of a row.
    #[error("E101: Failed to read length prefix of row {row}: {cause}")]
    LengthPrefix {
        /// The row being loaded.
        row: usize,
        /// Reason for the failure.
        cause: String,
    },

    /// Failed to read the payload of a row.
    #[error("E102: Failed to read {len} payload bytes of row {row}: {cause}")]
    PayloadRead {
        /// The row being loaded.
        row: usize,
        /// Payload length announced by the prefix.
        len: usize,
        /// Reason for the failure.
        cause: String,
    },

    /// Length prefix does not fit in addressable memory.
    #[error("E103: Length prefix {len} of row {row} exceeds addressable memory")]
    LengthOverflow {
        /// The row being loaded.
        row: usize,
        /// The decoded length.
        len: u64,
    },

    /// The view index could not be reserved for the announced row count.
    #[error("E104: Cannot reserve view index for {rows} rows: {cause}")]
    Reserve {
        /// Announced row count.
        rows: usize,
        /// Reason for the failure.
        cause: String,
    },

    /// Block memory for a row could not be allocated.
    #[error("E105: Cannot allocate block for {len} bytes of row {row}: {cause}")]
    BlockAlloc {
        /// The row being loaded.
        row: usize,
        /// Payload length announced by the prefix.
        len: usize,
        /// Reason for the failure.
        cause: String,
    },

    // =========================================================================
    // Save Errors (E200-E299)
    // =========================================================================
    /// Output stream write failed.
    #[error("E201: Failed to write row {row}: {cause}")]
    Write {
        /// The row being written.
        row: usize,
        /// Reason for the failure.
        cause: String,
    },

    // =========================================================================
    // Structural Errors (E300-E399)
    // =========================================================================
    /// Structural operation across different column kinds.
    #[error("E301: Column type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        /// Type of the receiving column.
        expected: TypeCode,
        /// Type of the other column.
        actual: TypeCode,
    },
}

impl IxcolError {
    /// Get the error code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::RowOutOfRange { .. } => "E001",
            Self::LengthPrefix { .. } => "E101",
            Self::PayloadRead { .. } => "E102",
            Self::LengthOverflow { .. } => "E103",
            Self::Reserve { .. } => "E104",
            Self::BlockAlloc { .. } => "E105",
            Self::Write { .. } => "E201",
            Self::TypeMismatch { .. } => "E301",
        }
    }

    /// Check if this error came from `load_body`.
    ///
    /// A column that returned a load error holds partial state and must be
    /// discarded (or cleared) by the caller.
    #[must_use]
    pub fn is_load_error(&self) -> bool {
        matches!(
            self,
            Self::LengthPrefix { .. }
                | Self::PayloadRead { .. }
                | Self::LengthOverflow { .. }
                | Self::Reserve { .. }
                | Self::BlockAlloc { .. }
        )
    }

    /// Row the error refers to, if any.
    #[must_use]
    pub fn row(&self) -> Option<usize> {
        match self {
            Self::RowOutOfRange { row, .. }
            | Self::LengthPrefix { row, .. }
            | Self::PayloadRead { row, .. }
            | Self::LengthOverflow { row, .. }
            | Self::BlockAlloc { row, .. }
            | Self::Write { row, .. } => Some(*row),
            Self::Reserve { .. } | Self::TypeMismatch { .. } => None,
        }
    }
}

/// Result type alias using `IxcolError`.
pub type Result<T> = std::result::Result<T, IxcolError>;
