use core::fmt;
use thiserror::Error;

/// Reasons a chunk fails to reconcile with its header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ChunkError {
    /// The size field is negative, or too small to hold the chunk header.
    #[error("Declared size {0} cannot hold a chunk header")]
    InvalidSize(i32),
    /// The decoder consumed a different number of payload bytes than declared.
    #[error("Declared {declared} payload bytes, decoded {consumed}")]
    SizeMismatch {
        /// Payload bytes implied by the header (`size - 6`)
        declared: usize,
        /// Payload bytes the decoder read, including internal alignment
        consumed: usize,
    },
    /// A field read would cross the declared end of the chunk.
    #[error("Read of {requested} bytes crosses the declared {declared} byte payload")]
    Overrun {
        /// Payload bytes implied by the header
        declared: usize,
        /// Payload bytes that would have been consumed after the read
        requested: usize,
    },
    /// A tempo chunk declares more breakpoints than its payload can hold.
    #[error("{entries} tempo entries need more than the {available} bytes available")]
    EntryCountOverrun {
        /// Declared entry count
        entries: u16,
        /// Payload bytes left for the offset and tick arrays
        available: usize,
    },
    /// A region header did not start with its magic constant.
    #[error("{region} magic: expected {expected:#010x}, found {found:#010x}")]
    BadMagic {
        /// Which region was being read
        region: Region,
        /// The constant the format defines
        expected: u32,
        /// What the file contained
        found: u32,
    },
    /// The item table end offset does not describe a whole number of items.
    #[error("Item table end offset {0} is not 8 + a multiple of 12")]
    ItemTableSize(i32),
}

/// The optional regions of a mush-steps chunk that carry a magic header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Region {
    /// Enemy metadata header, present when the post-data offset is nonzero
    EnemyMetadata,
    /// Overlay item table, present when any step references an item
    ItemTable,
    /// Extras header, present when any step was deferred to the second pass
    Extras,
}

impl Region {
    /// The magic constant that opens this region.
    pub const fn magic(&self) -> u32 {
        match self {
            Region::EnemyMetadata => 0x5445_5845,
            Region::ItemTable => 0x5241_4843,
            Region::Extras => 0x5A45_5246,
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Region::EnemyMetadata => "Enemy metadata",
            Region::ItemTable => "Item table",
            Region::Extras => "Extras",
        };
        f.write_str(name)
    }
}

#[test]
fn magic_constants_spell_tags() {
    use pretty_assertions::assert_eq;
    assert_eq!(&Region::EnemyMetadata.magic().to_le_bytes(), b"EXET");
    assert_eq!(&Region::ItemTable.magic().to_le_bytes(), b"CHAR");
    assert_eq!(&Region::Extras.magic().to_le_bytes(), b"FREZ");
}
