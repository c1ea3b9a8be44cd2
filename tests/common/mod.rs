#![allow(dead_code)]
//! Little-endian byte builders for ssq fixtures.

pub const ENEMY_MAGIC: i32 = 0x5445_5845;
pub const ITEM_MAGIC: i32 = 0x5241_4843;
pub const EXTRA_MAGIC: i32 = 0x5A45_5246;

fn pad_to_dword(out: &mut Vec<u8>, len: usize) {
    out.resize(out.len() + (4 - len % 4) % 4, 0);
}

/// A chunk with its 6-byte header and trailing alignment.
pub fn chunk(tag: u16, payload: &[u8]) -> Vec<u8> {
    let size = 6 + payload.len();
    let mut out = Vec::new();
    out.extend((size as i32).to_le_bytes());
    out.extend(tag.to_le_bytes());
    out.extend(payload);
    pad_to_dword(&mut out, size);
    out
}

/// Concatenates chunks and appends the zero-size sentinel.
pub fn stream(chunks: &[Vec<u8>]) -> Vec<u8> {
    let mut out: Vec<u8> = chunks.concat();
    out.extend(0i32.to_le_bytes());
    out
}

pub fn tempo_payload(tick_rate: u16, offsets: &[i32], ticks: &[i32]) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend(tick_rate.to_le_bytes());
    out.extend((offsets.len() as u16).to_le_bytes());
    out.extend(0u16.to_le_bytes());
    offsets.iter().for_each(|o| out.extend(o.to_le_bytes()));
    ticks.iter().for_each(|t| out.extend(t.to_le_bytes()));
    out
}

/// A step as written in the step table: panels == 0 defers it to the extras region.
pub struct Step {
    pub offset: i32,
    pub panels: u8,
    pub refs: Vec<u8>,
}

pub fn step(offset: i32, panels: u8, refs: &[u8]) -> Step {
    Step {
        offset,
        panels,
        refs: refs.to_vec(),
    }
}

/// Data for one deferred step, in step order.
pub struct Extra {
    pub panels: u8,
    pub extra_type: u8,
    pub refs: Vec<u8>,
}

pub fn extra(panels: u8, extra_type: u8, refs: &[u8]) -> Extra {
    Extra {
        panels,
        extra_type,
        refs: refs.to_vec(),
    }
}

#[derive(Default)]
pub struct MushPayload {
    pub difficulty: u16,
    pub post_data_offset: i32,
    pub enemy_end_offset: i32,
    pub steps: Vec<Step>,
    pub items: Vec<(i32, i32, i32)>,
    pub extras: Vec<Extra>,
}

impl MushPayload {
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend(self.difficulty.to_le_bytes());
        out.extend((self.steps.len() as u16).to_le_bytes());
        out.extend(0u16.to_le_bytes());
        out.extend(self.post_data_offset.to_le_bytes());
        for s in &self.steps {
            out.extend(s.offset.to_le_bytes());
        }

        let mut step_len = self.steps.len() * 4;
        let mut any_ref = false;
        for s in &self.steps {
            out.push(s.panels);
            step_len += 1;
            if s.panels != 0 {
                out.extend(&s.refs);
                step_len += s.refs.len();
                any_ref |= s.refs.iter().any(|&r| r != 0);
            }
        }
        pad_to_dword(&mut out, step_len);

        if self.post_data_offset != 0 {
            out.extend(ENEMY_MAGIC.to_le_bytes());
            out.extend(self.enemy_end_offset.to_le_bytes());
        }
        if any_ref {
            out.extend(ITEM_MAGIC.to_le_bytes());
            out.extend((8 + 12 * self.items.len() as i32).to_le_bytes());
            for (kind, p1, p2) in &self.items {
                out.extend(kind.to_le_bytes());
                out.extend(p1.to_le_bytes());
                out.extend(p2.to_le_bytes());
            }
        }
        if self.steps.iter().any(|s| s.panels == 0) {
            out.extend(EXTRA_MAGIC.to_le_bytes());
            out.extend(0x40i32.to_le_bytes());
        }

        let mut extra_len = 0;
        for e in &self.extras {
            out.push(e.panels);
            out.push(e.extra_type);
            out.extend(&e.refs);
            extra_len += 2 + e.refs.len();
        }
        pad_to_dword(&mut out, extra_len);
        out
    }

    pub fn chunk(&self) -> Vec<u8> {
        chunk(9, &self.encode())
    }
}
