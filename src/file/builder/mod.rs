use super::SsqFile;
use crate::file::chunk::Chunk;
use alloc::vec::Vec;

/// One step of [`Reader::read_chunk`](crate::reader::Reader::read_chunk).
#[derive(Debug, Clone, PartialEq)]
pub enum ChunkEvent {
    /// A decoded chunk
    Chunk(Chunk),
    /// The zero-size sentinel, or the end of input at a chunk boundary
    Eof,
}

/// A builder used to create a new [`SsqFile`].
#[derive(Default)]
pub struct SsqFileBuilder {
    chunks: Vec<Chunk>,
}

impl SsqFileBuilder {
    /// Appends a decoded chunk in stream order.
    pub fn handle_chunk(&mut self, chunk: Chunk) {
        self.chunks.push(chunk);
    }

    /// Number of chunks collected so far.
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// True if no chunk has been collected.
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Finishes the stream.
    pub fn build(self) -> SsqFile {
        SsqFile {
            chunks: self.chunks,
        }
    }
}

#[test]
fn builder_keeps_stream_order() {
    use crate::file::chunk::TempoChunk;
    use pretty_assertions::assert_eq;

    let mut builder = SsqFileBuilder::default();
    assert!(builder.is_empty());
    for tick_rate in [60, 150] {
        builder.handle_chunk(TempoChunk::new(tick_rate, alloc::vec![0], alloc::vec![0]).into());
    }
    assert!(!builder.is_empty());
    assert_eq!(builder.len(), 2);

    let file = builder.build();
    let rates: Vec<u16> = file
        .iter()
        .filter_map(|c| match c {
            Chunk::Tempo(t) => Some(t.tick_rate()),
            _ => None,
        })
        .collect();
    assert_eq!(rates, [60, 150]);
}
