#![doc = r#"
Rusty representation of an [`SsqFile`]
"#]

/// Contains the [`SsqFileBuilder`](builder::SsqFileBuilder) and the
/// chunk events it consumes.
pub mod builder;

pub mod chunk;

mod header;
pub use header::*;

use crate::{
    file::{
        builder::{ChunkEvent, SsqFileBuilder},
        chunk::{Chunk, MushStepsChunk, TempoChunk, UnknownChunk},
    },
    reader::{ReadResult, Reader},
};
use alloc::vec::Vec;

#[doc = r#"
A fully decoded ssq file: its chunks in stream order.

Built once by [`SsqFile::parse`] and read-only afterwards.
"#]
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SsqFile {
    chunks: Vec<Chunk>,
}

impl SsqFile {
    /// Decode a set of bytes into a file struct.
    ///
    /// Decoding stops at the first zero-size header, or at the end of input
    /// if it falls exactly on a chunk boundary. Any error discards the
    /// chunks decoded so far.
    pub fn parse(bytes: &[u8]) -> ReadResult<Self> {
        let mut reader = Reader::from_byte_slice(bytes);
        let mut builder = SsqFileBuilder::default();

        loop {
            match reader.read_chunk()? {
                ChunkEvent::Chunk(chunk) => builder.handle_chunk(chunk),
                ChunkEvent::Eof => break,
            }
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(
            "decoded {} chunks from {} of {} bytes",
            builder.len(),
            reader.buffer_position(),
            bytes.len()
        );

        Ok(builder.build())
    }

    /// All chunks in stream order.
    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    /// Number of chunks.
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// True for a stream holding only the end sentinel.
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Iterates over the chunks.
    pub fn iter(&self) -> core::slice::Iter<'_, Chunk> {
        self.chunks.iter()
    }

    /// The first tempo map in the stream.
    pub fn tempo(&self) -> Option<&TempoChunk> {
        self.chunks.iter().find_map(|c| match c {
            Chunk::Tempo(t) => Some(t),
            _ => None,
        })
    }

    /// Every chart in the stream.
    pub fn charts(&self) -> impl Iterator<Item = &MushStepsChunk> {
        self.chunks.iter().filter_map(|c| match c {
            Chunk::MushSteps(m) => Some(m),
            _ => None,
        })
    }

    /// Chunks kept without a dedicated decoder.
    pub fn unknown_chunks(&self) -> impl Iterator<Item = &UnknownChunk> {
        self.chunks.iter().filter_map(|c| match c {
            Chunk::Unknown(u) => Some(u),
            _ => None,
        })
    }

    /// Consumes the file, returning its chunks.
    pub fn into_chunks(self) -> Vec<Chunk> {
        self.chunks
    }
}

impl<'a> IntoIterator for &'a SsqFile {
    type Item = &'a Chunk;
    type IntoIter = core::slice::Iter<'a, Chunk>;
    fn into_iter(self) -> Self::IntoIter {
        self.chunks.iter()
    }
}
