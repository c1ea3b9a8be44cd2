#![doc = r#"
A decoder for the SSQ chart containers used by Hudson's dance titles
(Mario Mix, the Hottest Party series).

An ssq file is a run of size-prefixed, type-tagged chunks. This crate turns
one into an immutable [`SsqFile`](file::SsqFile): a tempo map, one or more
step charts with their gameplay overlays ("mush" data), and any chunk types it
does not understand, kept as opaque records.

# Example
```rust
use ssq::prelude::*;

#[rustfmt::skip]
let bytes = [
    // size 28, tag 1: tempo, 240 ticks/s, 2 entries
    28, 0, 0, 0, 1, 0, 240, 0, 2, 0, 0, 0,
    0, 0, 0, 0, 0, 16, 0, 0,        // offsets 0, 4096
    0, 0, 0, 0, 240, 0, 0, 0,       // ticks 0, 240
    0, 0, 0, 0,                     // end of stream
];

let file = ssq::decode(&bytes).unwrap();
let tempo = file.tempo().unwrap();
let bpm = tempo.segments().next().unwrap().bpm();
assert_eq!(bpm, Some(240.0));
```
"#]
#![warn(missing_docs)]
#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

mod error;
pub use error::*;

pub mod difficulty;
pub mod enemy;
pub mod file;
pub mod panels;
pub mod reader;
mod report;

/// Commonly used types
pub mod prelude {
    pub use crate::{
        ChunkError, Region,
        difficulty::*,
        enemy::*,
        file::{chunk::*, *},
        panels::*,
        reader::{ReadResult, Reader, ReaderError, ReaderErrorKind},
    };
}

/// Decodes one ssq file held in memory.
///
/// Each call is independent, so a batch of files can be decoded in any
/// order or in parallel, and one failing file does not affect the others.
pub fn decode(bytes: &[u8]) -> reader::ReadResult<file::SsqFile> {
    file::SsqFile::parse(bytes)
}
