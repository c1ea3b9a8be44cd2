#![doc = r#"
The mush-steps chart chunk (tag `9`).

# Layout

```text
difficulty: u16, step_count: u16, param3: u16
post_data_offset: i32
offsets:  [i32; step_count]
for each step:
    panels: u8
    refs:   [u8; popcount(panels)]        (absent when panels == 0)
padding to 4

if post_data_offset != 0:   "EXET" magic, end offset
if any ref != 0:            "CHAR" magic, end offset, items: [(i32, i32, i32); (end - 8) / 12]
if any step had panels == 0: "FREZ" magic, end offset

for each step with panels == 0, in step order:
    panels: u8, extra_type: u8, refs: [u8; popcount(panels)]
padding to 4
```

Whether the later regions exist is only known after the step table has been
scanned, so decoding runs in two passes: the first reads the steps and
remembers which ones were deferred, the second fills those in from the
extras region.
"#]

use crate::prelude::*;
use alloc::vec::Vec;

/// One step of a chart.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MushStep {
    offset: i32,
    panels: Panels,
    extra_type: u8,
    mush_refs: Vec<u8>,
    extra: bool,
}

impl MushStep {
    /// An ordinary step with one reference byte per set panel.
    ///
    /// # Panics
    /// if `mush_refs` does not hold exactly one byte per set panel.
    pub fn new(offset: i32, panels: Panels, mush_refs: Vec<u8>) -> Self {
        assert_eq!(panels.arrow_count(), mush_refs.len());
        Self {
            offset,
            panels,
            extra_type: 0,
            mush_refs,
            extra: false,
        }
    }

    fn deferred(offset: i32) -> Self {
        Self {
            offset,
            panels: Panels::NONE,
            extra_type: 0,
            mush_refs: Vec::new(),
            extra: true,
        }
    }

    /// Musical offset in 1/4096 of a measure.
    pub const fn offset(&self) -> i32 {
        self.offset
    }

    /// The pressed panels.
    pub const fn panels(&self) -> Panels {
        self.panels
    }

    /// Zero for ordinary steps; set from the extras region for deferred steps.
    pub const fn extra_type(&self) -> u8 {
        self.extra_type
    }

    /// One byte per set panel: `0` for no overlay, otherwise a 1-based item index.
    pub fn mush_refs(&self) -> &[u8] {
        &self.mush_refs
    }

    /// True if this step was deferred to the extras region (a freeze marker).
    pub const fn is_extra(&self) -> bool {
        self.extra
    }

    /// Each set panel paired with its overlay reference.
    pub fn arrows(&self) -> impl Iterator<Item = (Arrow, u8)> + '_ {
        self.panels.arrows().zip(self.mush_refs.iter().copied())
    }
}

/// One overlay definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MushItem {
    /// Overlay type code, see [`EnemyKind`]
    pub kind: i32,
    /// Type-specific
    pub param1: i32,
    /// Type-specific
    pub param2: i32,
}

impl MushItem {
    /// Size of one item in the table.
    pub const LEN: usize = 12;

    /// The overlay kind, if recognized.
    pub fn enemy(&self) -> Option<EnemyKind> {
        EnemyKind::from_code(self.kind)
    }
}

/// The overlay items referenced by steps.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MushItemTable {
    end_offset: i32,
    items: Vec<MushItem>,
}

impl MushItemTable {
    /// Builds a table; its end offset is derived from the item count.
    ///
    /// Returns `None` if the end offset would not fit the `i32` field.
    pub fn new(items: Vec<MushItem>) -> Option<Self> {
        let end_offset = items
            .len()
            .checked_mul(MushItem::LEN)
            .and_then(|len| len.checked_add(8))
            .and_then(|end| i32::try_from(end).ok())?;
        Some(Self { end_offset, items })
    }

    /// The region's end offset, which sizes the table.
    pub const fn end_offset(&self) -> i32 {
        self.end_offset
    }

    /// The items in file order.
    pub fn items(&self) -> &[MushItem] {
        &self.items
    }

    /// Resolves a 1-based step reference. `0` and out-of-range references give `None`.
    pub fn get(&self, reference: u8) -> Option<&MushItem> {
        (reference as usize).checked_sub(1).and_then(|i| self.items.get(i))
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True if the table holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Header of the enemy metadata region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyHeader {
    /// The nonzero post-data offset that announced the region
    pub post_data_offset: i32,
    /// Offset to the end of the overlay and extras data
    pub end_offset: i32,
}

/// Header of the extras region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExtrasHeader {
    /// Offset to the end of the extras data
    pub end_offset: i32,
}

#[doc = r#"
A decoded chart.

Every step satisfies `mush_refs().len() == panels().arrow_count()`.
"#]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MushStepsChunk {
    difficulty: Difficulty,
    param3: u16,
    steps: Vec<MushStep>,
    enemy_header: Option<EnemyHeader>,
    items: Option<MushItemTable>,
    extras_header: Option<ExtrasHeader>,
}

/// Running totals of the first pass.
#[derive(Default)]
struct StepScan {
    steps: Vec<MushStep>,
    extras: Vec<usize>,
    mush_bytes: usize,
    mush_item_count: usize,
}

impl MushStepsChunk {
    pub(crate) fn read(payload: &mut PayloadReader<'_, '_>) -> ReadResult<Self> {
        let difficulty = Difficulty::new(payload.read_u16()?);
        let step_count = payload.read_u16()? as usize;
        let param3 = payload.read_u16()?;
        let post_data_offset = payload.read_i32()?;

        let offsets = payload.read_i32_array(step_count)?;
        let mut scan = Self::scan_steps(payload, &offsets)?;

        let step_data_len = step_count * 4 + step_count + scan.mush_bytes;
        payload.align(step_data_len)?;
        #[cfg(feature = "tracing")]
        tracing::trace!(
            "{step_count} steps, {} inline refs, {} deferred, {} overlay refs",
            scan.mush_bytes,
            scan.extras.len(),
            scan.mush_item_count
        );

        let enemy_header = if post_data_offset != 0 {
            let end_offset = payload.read_region_header(Region::EnemyMetadata)?;
            Some(EnemyHeader {
                post_data_offset,
                end_offset,
            })
        } else {
            None
        };

        let items = if scan.mush_item_count > 0 {
            Some(Self::read_item_table(payload)?)
        } else {
            None
        };

        let extras_header = if !scan.extras.is_empty() {
            let end_offset = payload.read_region_header(Region::Extras)?;
            Some(ExtrasHeader { end_offset })
        } else {
            None
        };

        Self::fill_extras(payload, &mut scan)?;

        Ok(Self {
            difficulty,
            param3,
            steps: scan.steps,
            enemy_header,
            items,
            extras_header,
        })
    }

    /// First pass: panels and inline references, deferring empty steps.
    fn scan_steps(payload: &mut PayloadReader<'_, '_>, offsets: &[i32]) -> ReadResult<StepScan> {
        let mut scan = StepScan {
            steps: Vec::with_capacity(offsets.len()),
            ..Default::default()
        };
        for &offset in offsets {
            let panels = Panels::new(payload.read_u8()?);
            if panels.is_empty() {
                scan.extras.push(scan.steps.len());
                scan.steps.push(MushStep::deferred(offset));
                continue;
            }
            let mush_refs = payload.read_bytes(panels.arrow_count())?;
            scan.mush_bytes += mush_refs.len();
            scan.mush_item_count += mush_refs.iter().filter(|&&r| r != 0).count();
            scan.steps.push(MushStep {
                offset,
                panels,
                extra_type: 0,
                mush_refs,
                extra: false,
            });
        }
        Ok(scan)
    }

    /// The item table is sized by its end offset: an 8-byte header then 12 bytes per item.
    fn read_item_table(payload: &mut PayloadReader<'_, '_>) -> ReadResult<MushItemTable> {
        let end_offset = payload.read_region_header(Region::ItemTable)?;
        let table_len = end_offset
            .checked_sub(8)
            .and_then(|len| usize::try_from(len).ok())
            .filter(|len| len % MushItem::LEN == 0)
            .ok_or_else(|| payload.invalid(ChunkError::ItemTableSize(end_offset)))?;
        if table_len > payload.remaining() {
            return Err(payload.invalid(ChunkError::Overrun {
                declared: payload.header().payload_len(),
                requested: payload.consumed() + table_len,
            }));
        }

        let item_count = table_len / MushItem::LEN;
        let mut items = Vec::with_capacity(item_count);
        for _ in 0..item_count {
            items.push(MushItem {
                kind: payload.read_i32()?,
                param1: payload.read_i32()?,
                param2: payload.read_i32()?,
            });
        }
        #[cfg(feature = "tracing")]
        tracing::trace!("{item_count} overlay items");
        Ok(MushItemTable { end_offset, items })
    }

    /// Second pass: overwrite each deferred step from the extras region.
    fn fill_extras(payload: &mut PayloadReader<'_, '_>, scan: &mut StepScan) -> ReadResult<()> {
        let mut extra_mush_bytes = 0;
        for &index in &scan.extras {
            let panels = Panels::new(payload.read_u8()?);
            let extra_type = payload.read_u8()?;
            let mush_refs = payload.read_bytes(panels.arrow_count())?;
            extra_mush_bytes += mush_refs.len();

            let step = &mut scan.steps[index];
            step.panels = panels;
            step.extra_type = extra_type;
            step.mush_refs = mush_refs;
        }
        let extra_data_len = scan.extras.len() * 2 + extra_mush_bytes;
        payload.align(extra_data_len)
    }

    /// The packed style and tier.
    pub const fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Unused header word, kept as read.
    pub const fn param3(&self) -> u16 {
        self.param3
    }

    /// Number of steps.
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// All steps in chart order.
    pub fn steps(&self) -> &[MushStep] {
        &self.steps
    }

    /// Steps that were filled in from the extras region.
    pub fn extras(&self) -> impl Iterator<Item = &MushStep> {
        self.steps.iter().filter(|s| s.is_extra())
    }

    /// The enemy metadata header, if present.
    pub const fn enemy_header(&self) -> Option<&EnemyHeader> {
        self.enemy_header.as_ref()
    }

    /// The overlay item table, present when any step references an item.
    pub const fn item_table(&self) -> Option<&MushItemTable> {
        self.items.as_ref()
    }

    /// The extras header, present when any step was deferred.
    pub const fn extras_header(&self) -> Option<&ExtrasHeader> {
        self.extras_header.as_ref()
    }

    /// Resolves a step reference against the item table.
    pub fn item(&self, reference: u8) -> Option<&MushItem> {
        self.items.as_ref().and_then(|t| t.get(reference))
    }
}

#[cfg(test)]
fn decode_payload(size: i32, payload: &[u8]) -> ReadResult<MushStepsChunk> {
    let mut reader = Reader::from_byte_slice(payload);
    let header = ChunkHeader::new(0, size, 9).unwrap();
    let mut view = PayloadReader::new(&mut reader, header);
    let chunk = MushStepsChunk::read(&mut view)?;
    view.finish()?;
    Ok(chunk)
}

#[test]
fn single_plain_step() {
    use pretty_assertions::assert_eq;
    #[rustfmt::skip]
    let payload = [
        0x14, 0x01, 1, 0, 0, 0, // difficulty, step count, param3
        0, 0, 0, 0,             // post data offset
        0, 0, 0, 0,             // offsets
        0x01, 0x00,             // panels, one ref
        0, 0,                   // padding (4 + 2) -> 8
    ];
    let chunk = decode_payload(6 + payload.len() as i32, &payload).unwrap();
    assert_eq!(chunk.steps(), &[MushStep::new(0, Panels::new(1), alloc::vec![0])]);
    assert!(chunk.item_table().is_none());
    assert!(chunk.extras_header().is_none());
    assert!(chunk.enemy_header().is_none());
}

#[test]
fn item_table_must_hold_whole_items() {
    use pretty_assertions::assert_eq;
    let magic = Region::ItemTable.magic().to_le_bytes();
    #[rustfmt::skip]
    let payload = [
        0x14, 0x01, 1, 0, 0, 0,
        0, 0, 0, 0,
        0, 0, 0, 0,
        0x01, 0x01, 0, 0,
        magic[0], magic[1], magic[2], magic[3],
        14, 0, 0, 0, // 8 + 6
        0, 0, 0, 0, 0, 0, 0, 0,
    ];
    let err = decode_payload(6 + payload.len() as i32, &payload).unwrap_err();
    assert_eq!(
        err.error_kind(),
        &ReaderErrorKind::InvalidChunk(ChunkError::ItemTableSize(14))
    );
    assert_eq!(err.position(), 26);
}

#[test]
fn built_table_derives_end_offset() {
    use pretty_assertions::assert_eq;
    let item = MushItem {
        kind: 5,
        param1: 0,
        param2: 0,
    };
    let table = MushItemTable::new(alloc::vec![item, item]).unwrap();
    assert_eq!(table.end_offset(), 8 + 2 * 12);
    assert_eq!(table.get(2), Some(&item));
    assert_eq!(table.get(0), None);
    assert_eq!(table.get(3), None);
    assert_eq!(MushItemTable::new(Vec::new()).unwrap().end_offset(), 8);
}
