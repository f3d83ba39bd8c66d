//! Prelude for convenient imports.
//!
//! This module re-exports the most commonly used types and traits.
//!
//! # Example
//!
//! ```
//! use ixcol_core::prelude::*;
//!
//! let column: ColumnRef = Box::new(ColumnIxJson::new());
//! assert_eq!(column.column_type().code(), TypeCode::IxJson);
//! ```

// Columns
pub use crate::column::{Column, ColumnIxJson, ColumnRef};

// Types
pub use crate::types::{ItemView, Type, TypeCode};

// Error handling
pub use crate::error::{IxcolError, Result};

// Configuration
pub use crate::config::ColumnConfig;

// Arena
pub use crate::arena::{ArenaStats, DEFAULT_BLOCK_SIZE};
