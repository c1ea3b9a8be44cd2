use crate::ChunkError;
use thiserror::Error;

#[doc = r#"
A set of errors that can occur while decoding bytes into the ssq representation
"#]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Reading at Position {position}, {kind}")]
pub struct ReaderError {
    position: usize,
    pub(crate) kind: ReaderErrorKind,
}

/// A kind of error that a reader can produce
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReaderErrorKind {
    /// Fewer bytes remain than a read requires.
    #[error("Input truncated")]
    TruncatedInput,
    /// A chunk did not reconcile with its declared size.
    #[error("Invalid chunk: {0}")]
    InvalidChunk(#[from] ChunkError),
}

impl ReaderError {
    /// Create a reader error from a position and kind
    pub const fn new(position: usize, kind: ReaderErrorKind) -> Self {
        Self { position, kind }
    }
    /// True if the input ended before a read could complete
    pub const fn is_truncated(&self) -> bool {
        matches!(self.kind, ReaderErrorKind::TruncatedInput)
    }
    /// True if a chunk failed to reconcile with its header
    pub const fn is_invalid_chunk(&self) -> bool {
        matches!(self.kind, ReaderErrorKind::InvalidChunk(_))
    }
    /// Returns the error kind of the reader.
    pub fn error_kind(&self) -> &ReaderErrorKind {
        &self.kind
    }
    /// Returns the position where the read error occurred.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Create a new invalid chunk error
    pub const fn invalid_chunk(position: usize, error: ChunkError) -> Self {
        Self {
            position,
            kind: ReaderErrorKind::InvalidChunk(error),
        }
    }

    /// Create a new truncated input error
    pub const fn truncated(position: usize) -> Self {
        Self {
            position,
            kind: ReaderErrorKind::TruncatedInput,
        }
    }
}

/// The Read Result type (see [`ReaderError`])
pub type ReadResult<T> = Result<T, ReaderError>;

#[test]
fn error_display_carries_position() {
    use alloc::string::ToString;
    use pretty_assertions::assert_eq;

    let err = ReaderError::truncated(42);
    assert_eq!(err.to_string(), "Reading at Position 42, Input truncated");

    let err = ReaderError::invalid_chunk(
        8,
        ChunkError::SizeMismatch {
            declared: 12,
            consumed: 10,
        },
    );
    assert!(err.is_invalid_chunk());
    assert_eq!(err.position(), 8);
}
