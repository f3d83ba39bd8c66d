//! Unsigned LEB128 integers.
//!
//! Each byte carries 7 bits of the value, least significant group first.
//! The high bit is set on every byte except the last.

use byteorder::{ReadBytesExt, WriteBytesExt};
use std::io::{self, Read, Write};

/// Longest valid encoding of a `u64` (10 × 7 bits ≥ 64 bits).
pub const MAX_VAR_UINT_LEN: usize = 10;

/// Read one var-uint.
///
/// # Errors
/// Returns `UnexpectedEof` if the stream ends mid-value and `InvalidData` if
/// the value does not fit in a `u64` within [`MAX_VAR_UINT_LEN`] bytes.
pub fn read_var_uint<R: Read + ?Sized>(input: &mut R) -> io::Result<u64> {
    let mut value = 0u64;

    for i in 0..MAX_VAR_UINT_LEN {
        let byte = input.read_u8()?;
        // The last group holds only bit 63
        if i == MAX_VAR_UINT_LEN - 1 && byte > 1 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "var-uint overflows u64",
            ));
        }
        value |= u64::from(byte & 0x7f) << (7 * i);

        if byte & 0x80 == 0 {
            return Ok(value);
        }
    }

    Err(io::Error::new(
        io::ErrorKind::InvalidData,
        "var-uint overflows u64",
    ))
}

/// Write one var-uint.
pub fn write_var_uint<W: Write + ?Sized>(output: &mut W, mut value: u64) -> io::Result<()> {
    loop {
        let byte = (value & 0x7f) as u8;
        value >>= 7;

        if value == 0 {
            return output.write_u8(byte);
        }
        output.write_u8(byte | 0x80)?;
    }
}

/// Number of bytes `value` occupies on the wire.
#[must_use]
pub fn var_uint_len(value: u64) -> usize {
    let bits = 64 - value.leading_zeros() as usize;
    bits.div_ceil(7).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn encode(value: u64) -> Vec<u8> {
        let mut out = Vec::new();
        write_var_uint(&mut out, value).unwrap();
        out
    }

    #[test]
    fn known_encodings() {
        assert_eq!(encode(0), [0x00]);
        assert_eq!(encode(1), [0x01]);
        assert_eq!(encode(127), [0x7f]);
        assert_eq!(encode(128), [0x80, 0x01]);
        assert_eq!(encode(300), [0xac, 0x02]);
        assert_eq!(encode(4096), [0x80, 0x20]);
        assert_eq!(encode(u64::MAX).len(), MAX_VAR_UINT_LEN);
    }

    #[test]
    fn decode_boundaries() {
        for value in [0, 127, 128, 16_383, 16_384, u32::MAX as u64, u64::MAX] {
            let bytes = encode(value);
            assert_eq!(var_uint_len(value), bytes.len());

            let mut cursor = Cursor::new(bytes);
            assert_eq!(read_var_uint(&mut cursor).unwrap(), value);
        }
    }

    #[test]
    fn truncated_value_is_eof() {
        let mut cursor = Cursor::new(vec![0x80, 0x80]);
        let err = read_var_uint(&mut cursor).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn overlong_value_is_invalid() {
        let mut cursor = Cursor::new(vec![0xff; 11]);
        let err = read_var_uint(&mut cursor).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn bits_past_u64_are_invalid() {
        let mut bytes = vec![0x81];
        bytes.extend_from_slice(&[0x80; 8]);
        bytes.push(0x02);

        let mut cursor = Cursor::new(bytes);
        let err = read_var_uint(&mut cursor).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);

        // A final group of 1 is exactly bit 63
        let mut cursor = Cursor::new(encode(1 << 63));
        assert_eq!(read_var_uint(&mut cursor).unwrap(), 1 << 63);
    }

    #[test]
    fn reads_through_dyn_read() {
        let mut cursor = Cursor::new(vec![0xac, 0x02]);
        let input: &mut dyn Read = &mut cursor;
        assert_eq!(read_var_uint(input).unwrap(), 300);
    }
}
