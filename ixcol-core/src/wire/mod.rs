//! Wire encoding for column bodies.
//!
//! A column body is the concatenation of its rows, each written as a
//! var-uint byte length followed by the raw bytes:
//!
//! ```text
//! ┌──────────┬─────────────┬──────────┬─────────────┬─────
//! │ len(0)   │ bytes(0)    │ len(1)   │ bytes(1)    │ ...
//! │ LEB128   │ len(0) B    │ LEB128   │ len(1) B    │
//! └──────────┴─────────────┴──────────┴─────────────┴─────
//! ```
//!
//! The row count is not part of the body; it travels in the enclosing
//! block header and is passed to `load_body` by the caller.

mod varint;

pub use varint::{MAX_VAR_UINT_LEN, read_var_uint, var_uint_len, write_var_uint};

use std::io::{self, Read, Write};

/// Fill `dest` with exactly `dest.len()` bytes from the stream.
///
/// # Errors
/// Returns `UnexpectedEof` if the stream ends first.
pub fn read_bytes<R: Read + ?Sized>(input: &mut R, dest: &mut [u8]) -> io::Result<()> {
    input.read_exact(dest)
}

/// Write `bytes` prefixed with their var-uint length.
pub fn write_string<W: Write + ?Sized>(output: &mut W, bytes: &[u8]) -> io::Result<()> {
    write_var_uint(output, bytes.len() as u64)?;
    output.write_all(bytes)
}

/// Number of bytes [`write_string`] produces for `len` payload bytes.
#[must_use]
pub fn string_wire_len(len: usize) -> usize {
    var_uint_len(len as u64) + len
}
