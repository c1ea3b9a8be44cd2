//! Text dumps of decoded chunks.

use crate::prelude::*;
use core::fmt;

impl fmt::Display for TempoChunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "TEMPO CHUNK: tick rate = {} ticks per second, entry count = {}, param3 = {}",
            self.tick_rate(),
            self.entry_count(),
            self.param3()
        )?;
        for segment in self.segments() {
            write!(
                f,
                "  TEMPO VALUE: offset = {} - {}, tempo = ",
                segment.start_offset, segment.end_offset
            )?;
            match segment.bpm() {
                Some(bpm) => writeln!(f, "{bpm:.6} bpm")?,
                None => writeln!(f, "stop")?,
            }
        }
        Ok(())
    }
}

impl fmt::Display for MushStepsChunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "MUSH STEP CHUNK: difficulty = {}, step count = {}, param3 = {}",
            self.difficulty(),
            self.step_count(),
            self.param3()
        )?;
        for (i, step) in self.steps().iter().enumerate() {
            write!(
                f,
                "  STEP {:04}: OFFSET = {:08}, TYPE = {:02x}, PANELS = {}",
                i + 1,
                step.offset(),
                step.extra_type(),
                step.panels().glyphs()
            )?;
            for &reference in step.mush_refs() {
                match (reference, self.item(reference)) {
                    (0, _) => write!(f, ", None ({reference:02x})")?,
                    (_, Some(item)) => {
                        write!(f, ", {} ({reference:02x})", EnemyKind::name_of(item.kind))?
                    }
                    (_, None) => write!(f, ", Unknown ({reference:02x})")?,
                }
            }
            writeln!(f)?;
        }
        for item in self.item_table().map(|t| t.items()).unwrap_or_default() {
            writeln!(
                f,
                "  MUSH ITEM: {} ({:08x}), {:08x}, {:08x}",
                EnemyKind::name_of(item.kind),
                item.kind,
                item.param1,
                item.param2
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for UnknownChunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "UNKNOWN CHUNK: type = {:04x}, param1 = {:04x}, param2 = {}, param3 = {}",
            self.tag(),
            self.param1(),
            self.param2(),
            self.param3()
        )
    }
}

impl fmt::Display for Chunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Chunk::Tempo(t) => fmt::Display::fmt(t, f),
            Chunk::MushSteps(m) => fmt::Display::fmt(m, f),
            Chunk::Unknown(u) => fmt::Display::fmt(u, f),
        }
    }
}

impl fmt::Display for SsqFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.iter()
            .try_for_each(|chunk| fmt::Display::fmt(chunk, f))
    }
}

#[test]
fn tempo_dump_lists_segments() {
    use alloc::string::ToString;
    use pretty_assertions::assert_eq;
    let tempo = TempoChunk::new(240, alloc::vec![0, 4096, 4096], alloc::vec![0, 240, 240]);
    assert_eq!(
        tempo.to_string(),
        "TEMPO CHUNK: tick rate = 240 ticks per second, entry count = 3, param3 = 0\n\
         \x20 TEMPO VALUE: offset = 0 - 4096, tempo = 240.000000 bpm\n\
         \x20 TEMPO VALUE: offset = 4096 - 4096, tempo = stop\n"
    );
}
