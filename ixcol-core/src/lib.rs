//! ixcol Core Library
//!
//! Arena-backed storage for a column of variable-length JSON documents, as
//! used inside the batch buffers of a columnar engine.
//!
//! # Overview
//!
//! Each row is a `(pointer, length)` view into memory owned by the column.
//! Small values are copied into fixed-size blocks that are never moved, so
//! views stay valid while the column grows. Buffers handed over by the caller
//! are kept as-is without copying.
//!
//! # Key Components
//!
//! - **Column**: the [`Column`] trait and the [`ColumnIxJson`] column kind
//! - **Arena**: blocks, the overflow store and raw row views
//! - **Wire**: length-prefixed (LEB128) body encoding
//! - **Config**: block sizing through [`ColumnConfig`]
//!
//! # Example
//!
//! ```
//! use ixcol_core::prelude::*;
//!
//! let mut column = ColumnIxJson::new();
//! column.append(r#"{"event":"click"}"#);
//! column.append(r#"{"event":"view"}"#);
//!
//! let mut body = Vec::new();
//! column.save_body(&mut body)?;
//!
//! let mut restored = ColumnIxJson::new();
//! restored.load_body(&mut body.as_slice(), column.size())?;
//! assert_eq!(restored.at(0)?, br#"{"event":"click"}"#);
//! # Ok::<(), ixcol_core::IxcolError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod arena;
pub mod column;
pub mod config;
pub mod error;
pub mod prelude;
pub mod types;
pub mod wire;

// Re-export key types at crate root for convenience
pub use arena::{ArenaStats, DEFAULT_BLOCK_SIZE};
pub use column::{Column, ColumnIxJson, ColumnRef};
pub use config::ColumnConfig;
pub use error::{IxcolError, Result};
pub use types::{ItemView, Type, TypeCode};
