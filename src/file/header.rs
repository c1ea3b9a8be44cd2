use crate::prelude::*;

#[doc = r#"
The 6-byte header that opens every chunk: a 4-byte total size and a 2-byte type tag.

`size` counts the header itself. A size of zero is the end-of-stream sentinel
and is not represented by a [`ChunkHeader`] at all (see [`ChunkHeader::read`]).
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkHeader {
    offset: usize,
    size: usize,
    tag: u16,
}

impl ChunkHeader {
    /// Size in bytes of the size and type fields.
    pub const LEN: usize = 6;

    /// Create a header for a chunk starting at `offset`.
    ///
    /// Fails if `size` cannot hold the header.
    pub const fn new(offset: usize, size: i32, tag: u16) -> Result<Self, ChunkError> {
        if size < Self::LEN as i32 {
            return Err(ChunkError::InvalidSize(size));
        }
        Ok(Self {
            offset,
            size: size as usize,
            tag,
        })
    }

    /// Reads a header, returning `None` for the zero-size sentinel.
    pub fn read(reader: &mut Reader<'_>) -> ReadResult<Option<Self>> {
        let offset = reader.buffer_position();
        let size = reader.read_i32()?;
        if size == 0 {
            return Ok(None);
        }
        let tag = reader.read_u16()?;
        Self::new(offset, size, tag)
            .map(Some)
            .map_err(|e| ReaderError::invalid_chunk(offset, e))
    }

    /// Byte offset of the size field within the file.
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// The declared total size, header included.
    pub const fn size(&self) -> usize {
        self.size
    }

    /// The raw type tag.
    pub const fn tag(&self) -> u16 {
        self.tag
    }

    /// The decoder that handles this chunk.
    pub fn kind(&self) -> ChunkKind {
        ChunkKind::from_tag(self.tag)
    }

    /// Bytes the variant decoder must consume after the header.
    pub const fn payload_len(&self) -> usize {
        self.size - Self::LEN
    }

    /// Alignment bytes trailing the declared size.
    pub const fn padding(&self) -> usize {
        alignment_padding(self.size)
    }
}

/// Bytes needed to bring `len` up to a multiple of four.
pub const fn alignment_padding(len: usize) -> usize {
    (4 - (len % 4)) % 4
}

#[test]
fn padding_rounds_to_dword() {
    use pretty_assertions::assert_eq;
    for (len, pad) in [(0, 0), (1, 3), (2, 2), (3, 1), (4, 0), (13, 3), (14, 2)] {
        assert_eq!(alignment_padding(len), pad, "len {len}");
    }
}

#[test]
fn zero_size_is_sentinel() {
    let bytes = [0, 0, 0, 0];
    let mut reader = Reader::from_byte_slice(&bytes);
    assert!(ChunkHeader::read(&mut reader).unwrap().is_none());
    assert!(reader.is_at_end());
}

#[test]
fn undersized_header_is_invalid() {
    use pretty_assertions::assert_eq;
    let bytes = [4, 0, 0, 0, 1, 0];
    let mut reader = Reader::from_byte_slice(&bytes);
    let err = ChunkHeader::read(&mut reader).unwrap_err();
    assert_eq!(
        err.error_kind(),
        &ReaderErrorKind::InvalidChunk(ChunkError::InvalidSize(4))
    );
    assert_eq!(err.position(), 0);

    let bytes = (-8i32).to_le_bytes();
    let mut reader = Reader::from_byte_slice(&bytes);
    // type tag is missing, so truncation is reported first
    assert!(ChunkHeader::read(&mut reader).unwrap_err().is_truncated());
}
