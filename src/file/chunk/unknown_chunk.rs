use crate::prelude::*;

#[doc = r#"
A chunk whose tag has no dedicated decoder.

Only the three header words after the tag are kept; the rest of the payload
is skipped.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnknownChunk {
    tag: u16,
    param1: u16,
    param2: u16,
    param3: u16,
    skipped: usize,
}

impl UnknownChunk {
    pub(crate) fn read(payload: &mut PayloadReader<'_, '_>, tag: u16) -> ReadResult<Self> {
        let param1 = payload.read_u16()?;
        let param2 = payload.read_u16()?;
        let param3 = payload.read_u16()?;
        let skipped = payload.remaining();
        payload.skip(skipped)?;
        Ok(Self {
            tag,
            param1,
            param2,
            param3,
            skipped,
        })
    }

    /// The raw type tag.
    pub const fn tag(&self) -> u16 {
        self.tag
    }

    /// First header word.
    pub const fn param1(&self) -> u16 {
        self.param1
    }

    /// Second header word.
    pub const fn param2(&self) -> u16 {
        self.param2
    }

    /// Third header word.
    pub const fn param3(&self) -> u16 {
        self.param3
    }

    /// Payload bytes that were skipped without decoding.
    pub const fn skipped_len(&self) -> usize {
        self.skipped
    }
}
