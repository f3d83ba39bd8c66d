//! Core types for ixcol.
//!
//! This module provides the small vocabulary shared by every column kind:
//! - `TypeCode` / `Type`: the tag identifying a column's concrete kind
//! - `ItemView`: a tagged, borrowed view of one row

mod item;
mod type_code;

pub use item::ItemView;
pub use type_code::{Type, TypeCode};
