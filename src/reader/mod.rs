#![doc = r#"
Sequential, bounds-checked access to a finite ssq byte source.

# Overview

Every field in an ssq file is a fixed-width little-endian integer, so the
[`Reader`] only needs to know how to pull `u8`, `u16`, `i16` and `i32` values
off the front of a byte slice and how to skip padding. A read that would need
more bytes than remain fails with [`ReaderErrorKind::TruncatedInput`]; the
format has no end marker beyond the zero-size chunk header, so short input is
never zero-filled.

# Example
```rust
# use ssq::reader::Reader;
let bytes = [0x34, 0x12, 0xFF];
let mut reader = Reader::from_byte_slice(&bytes);

assert_eq!(reader.read_u16().unwrap(), 0x1234);
assert_eq!(reader.buffer_position(), 2);
assert!(reader.read_u16().unwrap_err().is_truncated());
```
"#]
mod error;
pub use error::*;

use crate::file::{
    ChunkHeader,
    builder::ChunkEvent,
    chunk::Chunk,
};

/// A cursor over the bytes of one ssq file.
#[derive(Debug, Clone)]
pub struct Reader<'slc> {
    data: &'slc [u8],
    position: usize,
}

impl<'slc> Reader<'slc> {
    /// Create a reader positioned at the start of `data`.
    pub const fn from_byte_slice(data: &'slc [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// The offset of the next byte to be read.
    #[inline]
    pub const fn buffer_position(&self) -> usize {
        self.position
    }

    /// Number of unread bytes.
    #[inline]
    pub const fn remaining(&self) -> usize {
        self.data.len() - self.position
    }

    /// True once every byte has been consumed.
    #[inline]
    pub const fn is_at_end(&self) -> bool {
        self.position >= self.data.len()
    }

    /// Take the next `len` bytes as a slice.
    pub fn read_slice(&mut self, len: usize) -> ReadResult<&'slc [u8]> {
        if self.remaining() < len {
            return Err(ReaderError::truncated(self.position));
        }
        let start = self.position;
        self.position += len;
        Ok(&self.data[start..self.position])
    }

    /// Take the next `N` bytes as an array.
    pub fn read_exact_size<const N: usize>(&mut self) -> ReadResult<[u8; N]> {
        let mut out = [0; N];
        out.copy_from_slice(self.read_slice(N)?);
        Ok(out)
    }

    /// Reads one byte.
    pub fn read_u8(&mut self) -> ReadResult<u8> {
        let [b] = self.read_exact_size()?;
        Ok(b)
    }

    /// Reads a little-endian `u16`.
    pub fn read_u16(&mut self) -> ReadResult<u16> {
        self.read_exact_size().map(u16::from_le_bytes)
    }

    /// Reads a little-endian `i16`.
    pub fn read_i16(&mut self) -> ReadResult<i16> {
        self.read_exact_size().map(i16::from_le_bytes)
    }

    /// Reads a little-endian `i32`.
    pub fn read_i32(&mut self) -> ReadResult<i32> {
        self.read_exact_size().map(i32::from_le_bytes)
    }

    /// Advance past `len` bytes without decoding them.
    pub fn skip(&mut self, len: usize) -> ReadResult<()> {
        self.read_slice(len).map(|_| ())
    }

    /// Reads the next chunk in the stream.
    ///
    /// Yields [`ChunkEvent::Eof`] on the zero-size sentinel header or when the
    /// input is exhausted exactly at a chunk boundary.
    pub fn read_chunk(&mut self) -> ReadResult<ChunkEvent> {
        if self.is_at_end() {
            return Ok(ChunkEvent::Eof);
        }
        let Some(header) = ChunkHeader::read(self)? else {
            return Ok(ChunkEvent::Eof);
        };
        let chunk = Chunk::read(self, header)?;
        Ok(ChunkEvent::Chunk(chunk))
    }
}

#[test]
fn reads_little_endian_fields() {
    use pretty_assertions::assert_eq;
    let bytes = [
        0xAB, // u8
        0xFE, 0xFF, // i16 -2
        0x78, 0x56, 0x34, 0x12, // i32
        0x00, 0x00, // padding
        0x01,
    ];
    let mut reader = Reader::from_byte_slice(&bytes);
    assert_eq!(reader.read_u8().unwrap(), 0xAB);
    assert_eq!(reader.read_i16().unwrap(), -2);
    assert_eq!(reader.read_i32().unwrap(), 0x1234_5678);
    reader.skip(2).unwrap();
    assert_eq!(reader.remaining(), 1);
    assert_eq!(reader.read_u8().unwrap(), 1);
    assert!(reader.is_at_end());
}

#[test]
fn short_reads_do_not_advance() {
    use pretty_assertions::assert_eq;
    let bytes = [0x01, 0x02, 0x03];
    let mut reader = Reader::from_byte_slice(&bytes);
    reader.read_u8().unwrap();

    let err = reader.read_i32().unwrap_err();
    assert!(err.is_truncated());
    assert_eq!(err.position(), 1);
    assert_eq!(reader.buffer_position(), 1);

    assert!(reader.skip(3).unwrap_err().is_truncated());
    reader.skip(2).unwrap();
    assert!(reader.is_at_end());
}
