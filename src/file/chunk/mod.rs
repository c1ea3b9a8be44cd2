#![doc = r#"
Contains types for ssq chunks

# Overview

An ssq file is a flat run of chunks. Each chunk opens with a
[`ChunkHeader`](crate::file::ChunkHeader): a 4-byte total size (header
included) and a 2-byte type tag. A size of zero ends the stream. After the
declared size, a chunk is padded with up to three bytes so the next header
starts on a 4-byte boundary.

## [`TempoChunk`]

Tag `1`. The tempo map: a tick rate plus two parallel arrays of breakpoints,
musical offsets in 1/4096 of a measure and the matching tick positions.

## [`MushStepsChunk`]

Tag `9`. One chart: the step table, and behind it up to three optional
regions (enemy metadata, overlay item table, deferred "extra" steps) whose
presence depends on counts found while scanning the steps.

## [`UnknownChunk`]

Any other tag. Three header words are kept and the rest of the payload is
skipped, so an undocumented chunk never aborts the stream.

# Example Structure

```text
[size: i32][tag: i16][payload ...][padding to 4]
[size: i32][tag: i16][payload ...][padding to 4]
...
[0: i32]
```
"#]

mod tempo;
pub use tempo::*;

mod mush_steps;
pub use mush_steps::*;

mod unknown_chunk;
pub use unknown_chunk::*;

use crate::{file::alignment_padding, prelude::*};
use alloc::vec::Vec;
use num_enum::FromPrimitive;

/// The decoder selected by a chunk's type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromPrimitive)]
#[repr(u16)]
pub enum ChunkKind {
    /// Tempo map
    Tempo = 1,
    /// Step chart with overlay data
    MushSteps = 9,
    /// Any tag without a dedicated decoder
    #[num_enum(catch_all)]
    Unknown(u16),
}

impl ChunkKind {
    /// Map a raw type tag to its decoder.
    pub fn from_tag(tag: u16) -> Self {
        Self::from_primitive(tag)
    }
}

#[doc = r#"
One decoded chunk.
"#]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Chunk {
    /// Tag 1
    Tempo(TempoChunk),
    /// Tag 9
    MushSteps(MushStepsChunk),
    /// Anything else
    Unknown(UnknownChunk),
}

impl Chunk {
    /// Decodes the payload described by `header` and consumes its trailing padding.
    pub fn read(reader: &mut Reader<'_>, header: ChunkHeader) -> ReadResult<Self> {
        let mut payload = PayloadReader::new(reader, header);
        let chunk = match header.kind() {
            ChunkKind::Tempo => Chunk::Tempo(TempoChunk::read(&mut payload)?),
            ChunkKind::MushSteps => Chunk::MushSteps(MushStepsChunk::read(&mut payload)?),
            ChunkKind::Unknown(tag) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    "chunk at {} has unknown type {tag:#06x}, keeping it opaque",
                    header.offset()
                );
                Chunk::Unknown(UnknownChunk::read(&mut payload, tag)?)
            }
        };
        payload.finish()?;
        #[cfg(feature = "tracing")]
        tracing::debug!(
            "decoded {:?} chunk at {} ({} bytes)",
            header.kind(),
            header.offset(),
            header.size()
        );
        Ok(chunk)
    }

    /// The decoder that produced this chunk.
    pub const fn kind(&self) -> ChunkKind {
        match self {
            Chunk::Tempo(_) => ChunkKind::Tempo,
            Chunk::MushSteps(_) => ChunkKind::MushSteps,
            Chunk::Unknown(u) => ChunkKind::Unknown(u.tag()),
        }
    }

    /// The raw type tag.
    pub const fn tag(&self) -> u16 {
        match self.kind() {
            ChunkKind::Tempo => 1,
            ChunkKind::MushSteps => 9,
            ChunkKind::Unknown(tag) => tag,
        }
    }
}

impl From<TempoChunk> for Chunk {
    fn from(value: TempoChunk) -> Self {
        Self::Tempo(value)
    }
}

impl From<MushStepsChunk> for Chunk {
    fn from(value: MushStepsChunk) -> Self {
        Self::MushSteps(value)
    }
}

impl From<UnknownChunk> for Chunk {
    fn from(value: UnknownChunk) -> Self {
        Self::Unknown(value)
    }
}

/// A view of the [`Reader`] limited to one chunk's declared payload.
///
/// Reads that would cross the declared end fail with
/// [`ChunkError::Overrun`] before touching the input, so a bad count inside a
/// chunk is reported as an invalid chunk rather than as truncation.
pub struct PayloadReader<'r, 'slc> {
    reader: &'r mut Reader<'slc>,
    header: ChunkHeader,
    start: usize,
}

impl<'r, 'slc> PayloadReader<'r, 'slc> {
    /// Starts a payload view at the reader's current position.
    pub fn new(reader: &'r mut Reader<'slc>, header: ChunkHeader) -> Self {
        let start = reader.buffer_position();
        Self {
            reader,
            header,
            start,
        }
    }

    /// The header this payload belongs to.
    pub const fn header(&self) -> &ChunkHeader {
        &self.header
    }

    /// Absolute position of the next byte.
    pub fn buffer_position(&self) -> usize {
        self.reader.buffer_position()
    }

    /// Payload bytes consumed so far.
    pub fn consumed(&self) -> usize {
        self.reader.buffer_position() - self.start
    }

    /// Payload bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.header.payload_len().saturating_sub(self.consumed())
    }

    /// An invalid chunk error at the current position.
    pub fn invalid(&self, error: ChunkError) -> ReaderError {
        ReaderError::invalid_chunk(self.buffer_position(), error)
    }

    fn ensure(&self, len: usize) -> ReadResult<()> {
        let requested = self.consumed() + len;
        if requested > self.header.payload_len() {
            return Err(self.invalid(ChunkError::Overrun {
                declared: self.header.payload_len(),
                requested,
            }));
        }
        Ok(())
    }

    /// Reads one byte.
    pub fn read_u8(&mut self) -> ReadResult<u8> {
        self.ensure(1)?;
        self.reader.read_u8()
    }

    /// Reads a little-endian `u16`.
    pub fn read_u16(&mut self) -> ReadResult<u16> {
        self.ensure(2)?;
        self.reader.read_u16()
    }

    /// Reads a little-endian `i32`.
    pub fn read_i32(&mut self) -> ReadResult<i32> {
        self.ensure(4)?;
        self.reader.read_i32()
    }

    /// Reads `count` little-endian `i32`s as one contiguous run.
    pub fn read_i32_array(&mut self, count: usize) -> ReadResult<Vec<i32>> {
        self.ensure(count * 4)?;
        let bytes = self.reader.read_slice(count * 4)?;
        Ok(bytes
            .chunks_exact(4)
            .map(|b| i32::from_le_bytes([b[0], b[1], b[2], b[3]]))
            .collect())
    }

    /// Reads `count` raw bytes.
    pub fn read_bytes(&mut self, count: usize) -> ReadResult<Vec<u8>> {
        self.ensure(count)?;
        Ok(self.reader.read_slice(count)?.to_vec())
    }

    /// Skips `len` bytes of the payload.
    pub fn skip(&mut self, len: usize) -> ReadResult<()> {
        self.ensure(len)?;
        self.reader.skip(len)
    }

    /// Skips the bytes that pad a region of `len` bytes to a 4-byte boundary.
    pub fn align(&mut self, len: usize) -> ReadResult<()> {
        self.skip(alignment_padding(len))
    }

    /// Reads a region's magic word and end offset, checking the magic.
    pub fn read_region_header(&mut self, region: Region) -> ReadResult<i32> {
        let position = self.buffer_position();
        let found = self.read_i32()? as u32;
        if found != region.magic() {
            return Err(ReaderError::invalid_chunk(
                position,
                ChunkError::BadMagic {
                    region,
                    expected: region.magic(),
                    found,
                },
            ));
        }
        self.read_i32()
    }

    /// Checks the payload was consumed exactly, then skips the trailing padding.
    pub fn finish(self) -> ReadResult<()> {
        let consumed = self.consumed();
        let declared = self.header.payload_len();
        if consumed != declared {
            return Err(self.invalid(ChunkError::SizeMismatch { declared, consumed }));
        }
        self.reader.skip(self.header.padding())
    }
}

#[test]
fn tags_select_decoders() {
    use pretty_assertions::assert_eq;
    assert_eq!(ChunkKind::from_tag(1), ChunkKind::Tempo);
    assert_eq!(ChunkKind::from_tag(9), ChunkKind::MushSteps);
    assert_eq!(ChunkKind::from_tag(2), ChunkKind::Unknown(2));
    assert_eq!(ChunkKind::from_tag(0xFFFF), ChunkKind::Unknown(0xFFFF));
}

#[test]
fn payload_reads_stop_at_declared_end() {
    use pretty_assertions::assert_eq;
    // payload of 4 bytes followed by unrelated data
    let bytes = [1, 0, 2, 0, 9, 9, 9, 9];
    let mut reader = Reader::from_byte_slice(&bytes);
    let header = ChunkHeader::new(0, 10, 0x20).unwrap();
    let mut payload = PayloadReader::new(&mut reader, header);

    assert_eq!(payload.read_u16().unwrap(), 1);
    let err = payload.read_i32().unwrap_err();
    assert_eq!(
        err.error_kind(),
        &ReaderErrorKind::InvalidChunk(ChunkError::Overrun {
            declared: 4,
            requested: 6
        })
    );
    assert_eq!(payload.read_u16().unwrap(), 2);
    assert_eq!(payload.remaining(), 0);
    payload.finish().unwrap();
    // size 10 pads by 2
    assert_eq!(reader.buffer_position(), 6);
}

#[test]
fn unconsumed_payload_is_a_mismatch() {
    use pretty_assertions::assert_eq;
    let bytes = [0; 8];
    let mut reader = Reader::from_byte_slice(&bytes);
    let header = ChunkHeader::new(0, 12, 0x20).unwrap();
    let mut payload = PayloadReader::new(&mut reader, header);
    payload.skip(4).unwrap();
    let err = payload.finish().unwrap_err();
    assert_eq!(
        err.error_kind(),
        &ReaderErrorKind::InvalidChunk(ChunkError::SizeMismatch {
            declared: 6,
            consumed: 4
        })
    );
}
