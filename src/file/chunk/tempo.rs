use crate::prelude::*;
use alloc::vec::Vec;

/// Musical offsets are counted in 1/4096 of a measure.
pub const MEASURE_LENGTH: i32 = 4096;

#[doc = r#"
The tempo map (chunk tag `1`).

Breakpoint `i` says that musical offset `offsets[i]` is reached at tick
`ticks[i]`. Between two breakpoints the tempo is constant; see
[`TempoChunk::segments`].

# Layout
```text
tick_rate: u16, entry_count: u16, param3: u16
offsets:   [i32; entry_count]
ticks:     [i32; entry_count]
```
"#]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TempoChunk {
    tick_rate: u16,
    param3: u16,
    offsets: Vec<i32>,
    ticks: Vec<i32>,
}

impl TempoChunk {
    /// Builds a tempo map from parallel arrays.
    ///
    /// # Panics
    /// if `offsets` and `ticks` differ in length.
    pub fn new(tick_rate: u16, offsets: Vec<i32>, ticks: Vec<i32>) -> Self {
        assert_eq!(
            offsets.len(),
            ticks.len(),
            "tempo breakpoints must be co-indexed"
        );
        Self {
            tick_rate,
            param3: 0,
            offsets,
            ticks,
        }
    }

    pub(crate) fn read(payload: &mut PayloadReader<'_, '_>) -> ReadResult<Self> {
        let tick_rate = payload.read_u16()?;
        let entry_count = payload.read_u16()?;
        let param3 = payload.read_u16()?;

        let available = payload.remaining();
        if entry_count as usize * 8 > available {
            return Err(payload.invalid(ChunkError::EntryCountOverrun {
                entries: entry_count,
                available,
            }));
        }

        let offsets = payload.read_i32_array(entry_count as usize)?;
        let ticks = payload.read_i32_array(entry_count as usize)?;

        Ok(Self {
            tick_rate,
            param3,
            offsets,
            ticks,
        })
    }

    /// Ticks per second.
    pub const fn tick_rate(&self) -> u16 {
        self.tick_rate
    }

    /// Number of breakpoints.
    pub fn entry_count(&self) -> usize {
        self.offsets.len()
    }

    /// Unused header word, kept as read.
    pub const fn param3(&self) -> u16 {
        self.param3
    }

    /// Musical offset of each breakpoint.
    pub fn offsets(&self) -> &[i32] {
        &self.offsets
    }

    /// Tick position of each breakpoint.
    pub fn ticks(&self) -> &[i32] {
        &self.ticks
    }

    /// True if both arrays never decrease.
    pub fn is_monotonic(&self) -> bool {
        self.offsets.windows(2).all(|w| w[0] <= w[1]) && self.ticks.windows(2).all(|w| w[0] <= w[1])
    }

    /// Converts a tick position to seconds, if the tick rate is nonzero.
    pub fn tick_to_seconds(&self, tick: i32) -> Option<f64> {
        if self.tick_rate == 0 {
            return None;
        }
        Some(tick as f64 / self.tick_rate as f64)
    }

    /// The constant-tempo spans between consecutive breakpoints.
    pub fn segments(&self) -> impl Iterator<Item = TempoSegment> + '_ {
        self.offsets
            .windows(2)
            .zip(self.ticks.windows(2))
            .map(|(offsets, ticks)| TempoSegment {
                tick_rate: self.tick_rate,
                start_offset: offsets[0],
                end_offset: offsets[1],
                start_tick: ticks[0],
                end_tick: ticks[1],
            })
    }
}

/// The span between two tempo breakpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TempoSegment {
    tick_rate: u16,
    /// Musical offset where the span starts
    pub start_offset: i32,
    /// Musical offset where the span ends
    pub end_offset: i32,
    /// Tick where the span starts
    pub start_tick: i32,
    /// Tick where the span ends
    pub end_tick: i32,
}

impl TempoSegment {
    /// Beats per minute across this span.
    ///
    /// `None` when the span covers no ticks (a stop) or the tick rate is zero.
    pub fn bpm(&self) -> Option<f64> {
        let d_tick = self.end_tick as i64 - self.start_tick as i64;
        if d_tick == 0 || self.tick_rate == 0 {
            return None;
        }
        let d_offset = self.end_offset as i64 - self.start_offset as i64;
        let measures = d_offset as f64 / MEASURE_LENGTH as f64;
        let minutes = (d_tick as f64 / self.tick_rate as f64) / 240.0;
        Some(measures / minutes)
    }

    /// Length of the span in seconds.
    pub fn duration_seconds(&self) -> Option<f64> {
        if self.tick_rate == 0 {
            return None;
        }
        Some((self.end_tick as i64 - self.start_tick as i64) as f64 / self.tick_rate as f64)
    }
}

#[test]
fn one_measure_per_second_is_240_bpm() {
    use pretty_assertions::assert_eq;
    let tempo = TempoChunk::new(240, alloc::vec![0, 4096], alloc::vec![0, 240]);
    let segments: Vec<_> = tempo.segments().collect();
    assert_eq!(segments.len(), 1);
    assert_eq!(segments[0].bpm(), Some(240.0));
    assert_eq!(segments[0].duration_seconds(), Some(1.0));
    assert!(tempo.is_monotonic());
}

#[test]
fn stops_have_no_bpm() {
    use pretty_assertions::assert_eq;
    let tempo = TempoChunk::new(150, alloc::vec![0, 4096, 4096, 8192], alloc::vec![0, 300, 450, 450]);
    let bpms: Vec<_> = tempo.segments().map(|s| s.bpm()).collect();
    assert_eq!(bpms, alloc::vec![Some(120.0), Some(0.0), None]);
    assert_eq!(tempo.tick_to_seconds(450), Some(3.0));
}
