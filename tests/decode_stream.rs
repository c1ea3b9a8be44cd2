mod common;

use common::*;
use pretty_assertions::assert_eq;
use ssq::prelude::*;

#[test]
fn sentinel_only_is_empty() {
    let file = ssq::decode(&0i32.to_le_bytes()).unwrap();
    assert!(file.is_empty());
    assert_eq!(file, SsqFile::default());
}

#[test]
fn empty_input_is_empty() {
    assert!(ssq::decode(&[]).unwrap().is_empty());
}

#[test]
fn tempo_between_two_breakpoints() {
    let bytes = stream(&[chunk(1, &tempo_payload(240, &[0, 4096], &[0, 240]))]);
    let file = ssq::decode(&bytes).unwrap();

    assert_eq!(file.len(), 1);
    let tempo = file.tempo().unwrap();
    assert_eq!(tempo.tick_rate(), 240);
    assert_eq!(tempo.entry_count(), 2);
    assert_eq!(tempo.offsets(), &[0, 4096]);
    assert_eq!(tempo.ticks(), &[0, 240]);
    assert!(tempo.is_monotonic());

    let segment = tempo.segments().next().unwrap();
    assert_eq!(segment.bpm(), Some(240.0));
}

#[test]
fn tempo_entry_count_past_declared_size() {
    let mut payload = tempo_payload(240, &[0, 4096], &[0, 240]);
    // claim three entries while only two are stored
    payload[2] = 3;
    let bytes = stream(&[chunk(1, &payload)]);
    let err = ssq::decode(&bytes).unwrap_err();
    assert_eq!(
        err.error_kind(),
        &ReaderErrorKind::InvalidChunk(ChunkError::EntryCountOverrun {
            entries: 3,
            available: 16
        })
    );
    assert_eq!(err.position(), 12);
}

#[test]
fn tempo_with_trailing_payload_is_rejected() {
    let mut payload = tempo_payload(60, &[0], &[0]);
    payload.extend([0; 4]);
    let bytes = stream(&[chunk(1, &payload)]);
    let err = ssq::decode(&bytes).unwrap_err();
    assert_eq!(
        err.error_kind(),
        &ReaderErrorKind::InvalidChunk(ChunkError::SizeMismatch {
            declared: 18,
            consumed: 14
        })
    );
}

#[test]
fn unknown_chunks_are_kept_opaque() {
    // 7 payload bytes: size 13, padded by 3
    let unknown = chunk(2, &[0x34, 0x12, 5, 0, 6, 0, 0xAA]);
    assert_eq!(unknown.len(), 16);
    let bytes = stream(&[
        unknown,
        chunk(1, &tempo_payload(100, &[0], &[0])),
        chunk(0x7F, &[1, 0, 2, 0, 3, 0]),
    ]);
    let file = ssq::decode(&bytes).unwrap();

    let kinds: Vec<_> = file.iter().map(|c| c.kind()).collect();
    assert_eq!(
        kinds,
        vec![ChunkKind::Unknown(2), ChunkKind::Tempo, ChunkKind::Unknown(0x7F)]
    );

    let unknown: Vec<_> = file.unknown_chunks().collect();
    assert_eq!(unknown[0].tag(), 2);
    assert_eq!(unknown[0].param1(), 0x1234);
    assert_eq!(unknown[0].param2(), 5);
    assert_eq!(unknown[0].param3(), 6);
    assert_eq!(unknown[0].skipped_len(), 1);
    assert_eq!(unknown[1].skipped_len(), 0);
    assert_eq!(file.chunks()[2].tag(), 0x7F);
}

#[test]
fn high_bit_tags_stay_unsigned() {
    let bytes = stream(&[chunk(0x8009, &[0, 0, 0, 0, 0, 0])]);
    let file = ssq::decode(&bytes).unwrap();
    assert_eq!(file.chunks()[0].kind(), ChunkKind::Unknown(0x8009));
    assert_eq!(file.chunks()[0].tag(), 0x8009);
}

#[test]
fn unknown_chunk_too_small_for_params() {
    let bytes = stream(&[chunk(3, &[1, 0])]);
    let err = ssq::decode(&bytes).unwrap_err();
    assert!(err.is_invalid_chunk());
    assert_eq!(
        err.error_kind(),
        &ReaderErrorKind::InvalidChunk(ChunkError::Overrun {
            declared: 2,
            requested: 4
        })
    );
}

#[test]
fn stops_at_sentinel() {
    let mut bytes = stream(&[chunk(1, &tempo_payload(100, &[0], &[0]))]);
    // garbage after the sentinel is never read
    bytes.extend([0xFF; 7]);
    assert_eq!(ssq::decode(&bytes).unwrap().len(), 1);
}

#[test]
fn input_may_end_without_sentinel() {
    let bytes = chunk(1, &tempo_payload(100, &[0], &[0]));
    assert_eq!(ssq::decode(&bytes).unwrap().len(), 1);
}

#[test]
fn negative_size_is_invalid() {
    let mut bytes = (-12i32).to_le_bytes().to_vec();
    bytes.extend(1u16.to_le_bytes());
    let err = ssq::decode(&bytes).unwrap_err();
    assert_eq!(
        err.error_kind(),
        &ReaderErrorKind::InvalidChunk(ChunkError::InvalidSize(-12))
    );
    assert_eq!(err.position(), 0);
}

#[test]
fn decoding_is_deterministic() {
    let chart = MushPayload {
        difficulty: 0x0214,
        steps: vec![step(0, 0x03, &[1, 0]), step(1024, 0, &[])],
        items: vec![(5, 10, 20)],
        extras: vec![extra(0x10, 1, &[0])],
        ..Default::default()
    };
    let bytes = stream(&[
        chunk(1, &tempo_payload(150, &[0, 4096], &[0, 300])),
        chart.chunk(),
    ]);
    let first = ssq::decode(&bytes).unwrap();
    let second = ssq::decode(&bytes).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.charts().count(), 1);
}

#[test]
fn batch_failures_are_independent() {
    let good = stream(&[chunk(1, &tempo_payload(100, &[0], &[0]))]);
    let bad = good[..good.len() - 6].to_vec();
    let results: Vec<_> = [&good, &bad, &good]
        .into_iter()
        .map(|b| ssq::decode(b))
        .collect();
    assert!(results[0].is_ok());
    assert!(results[1].as_ref().unwrap_err().is_truncated());
    assert_eq!(results[0], results[2]);
}
