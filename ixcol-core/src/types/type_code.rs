//! Type tags for column kinds.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies the concrete kind of a column.
///
/// Only the variable-length JSON string column lives in this crate; the enum
/// is non-exhaustive so other kinds can be tagged without a breaking change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
#[repr(u8)]
pub enum TypeCode {
    /// Variable-length JSON document stored as raw bytes.
    IxJson = 0,
}

impl TypeCode {
    /// Name of the type as it appears in column declarations.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::IxJson => "IxJSON",
        }
    }
}

impl fmt::Display for TypeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u8> for TypeCode {
    type Error = &'static str;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::IxJson),
            _ => Err("Unknown column type code"),
        }
    }
}

/// Type descriptor attached to every column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Type {
    code: TypeCode,
}

impl Type {
    /// Descriptor for the variable-length JSON string column.
    #[must_use]
    pub const fn ix_json() -> Self {
        Self {
            code: TypeCode::IxJson,
        }
    }

    /// Get the type code.
    #[must_use]
    pub const fn code(&self) -> TypeCode {
        self.code
    }

    /// Get the type name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.code.name()
    }
}

impl From<TypeCode> for Type {
    fn from(code: TypeCode) -> Self {
        Self { code }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.code, f)
    }
}
