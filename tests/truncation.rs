mod common;

use common::*;
use ssq::prelude::*;

fn sample_stream() -> (Vec<u8>, Vec<usize>) {
    let chunks = vec![
        chunk(1, &tempo_payload(240, &[0, 4096, 8192], &[0, 240, 480])),
        MushPayload {
            difficulty: 0x0214,
            post_data_offset: 0x20,
            enemy_end_offset: 0x50,
            steps: vec![
                step(0, 0x01, &[1]),
                step(1024, 0, &[]),
                step(2048, 0x90, &[0, 2]),
            ],
            items: vec![(1, 0, 0), (5, 2, 3)],
            extras: vec![extra(0x02, 1, &[0])],
            ..Default::default()
        }
        .chunk(),
        chunk(4, &[1, 0, 2, 0, 3, 0, 4]),
    ];
    let mut boundaries = vec![0];
    for c in &chunks {
        boundaries.push(boundaries.last().unwrap() + c.len());
    }
    (stream(&chunks), boundaries)
}

#[test]
fn sample_decodes_whole() {
    let (bytes, _) = sample_stream();
    let file = ssq::decode(&bytes).unwrap();
    assert_eq!(file.len(), 3);
}

#[test]
fn every_cut_is_truncation_or_a_chunk_boundary() {
    let (bytes, boundaries) = sample_stream();
    for cut in 0..bytes.len() {
        let result = ssq::decode(&bytes[..cut]);
        if let Some(chunks) = boundaries.iter().position(|&b| b == cut) {
            let file = result.unwrap_or_else(|e| panic!("cut at {cut}: {e}"));
            assert_eq!(file.len(), chunks, "cut at {cut}");
        } else {
            let err = result.expect_err("partial chunk decoded");
            assert!(err.is_truncated(), "cut at {cut}: {err}");
            assert!(err.position() <= cut, "cut at {cut}: {err}");
        }
    }
}

#[test]
fn cut_mid_array_reports_truncation() {
    let bytes = stream(&[chunk(1, &tempo_payload(60, &[0, 4096, 8192], &[0, 60, 120]))]);
    // header 6 + fields 6 + two offsets
    let err = ssq::decode(&bytes[..20]).unwrap_err();
    assert_eq!(err.error_kind(), &ReaderErrorKind::TruncatedInput);
    assert_eq!(err.position(), 12);
}
