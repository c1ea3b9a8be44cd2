mod common;

use common::*;
use pretty_assertions::assert_eq;
use ssq::prelude::*;

fn decode_chart(payload: &MushPayload) -> MushStepsChunk {
    let file = ssq::decode(&stream(&[payload.chunk()])).unwrap();
    file.charts().next().unwrap().clone()
}

fn assert_refs_match_panels(chart: &MushStepsChunk) {
    for step in chart.steps() {
        assert_eq!(step.mush_refs().len(), step.panels().arrow_count());
    }
}

#[test]
fn single_ordinary_step() {
    let chart = decode_chart(&MushPayload {
        difficulty: 0x0114,
        steps: vec![step(0, 0x01, &[0])],
        ..Default::default()
    });

    assert_eq!(chart.difficulty().name(), "Single Medium");
    assert_eq!(chart.step_count(), 1);
    let step = &chart.steps()[0];
    assert_eq!(step.offset(), 0);
    assert_eq!(step.panels(), Panels::new(0x01));
    assert_eq!(step.mush_refs(), &[0]);
    assert_eq!(step.extra_type(), 0);
    assert!(!step.is_extra());
    assert!(chart.item_table().is_none());
    assert!(chart.extras_header().is_none());
    assert!(chart.enemy_header().is_none());
}

#[test]
fn empty_step_is_filled_from_extras() {
    let chart = decode_chart(&MushPayload {
        difficulty: 0x0114,
        steps: vec![step(0, 0x01, &[0]), step(2048, 0x00, &[])],
        extras: vec![extra(0x22, 0x01, &[0, 0])],
        ..Default::default()
    });

    assert_eq!(chart.step_count(), 2);
    let freeze = &chart.steps()[1];
    assert!(freeze.is_extra());
    assert_eq!(freeze.offset(), 2048);
    assert_eq!(freeze.panels(), Panels::new(0x22));
    assert_eq!(freeze.extra_type(), 0x01);
    assert_eq!(freeze.mush_refs(), &[0, 0]);
    assert_eq!(chart.extras().count(), 1);
    assert!(chart.extras_header().is_some());
    assert!(chart.item_table().is_none());
    assert_refs_match_panels(&chart);
}

#[test]
fn extras_keep_step_order() {
    let chart = decode_chart(&MushPayload {
        steps: vec![
            step(0, 0, &[]),
            step(512, 0x0F, &[0, 0, 0, 0]),
            step(1024, 0, &[]),
            step(1536, 0, &[]),
        ],
        extras: vec![
            extra(0x01, 1, &[0]),
            extra(0x00, 2, &[]),
            extra(0x81, 3, &[0, 0]),
        ],
        ..Default::default()
    });

    let types: Vec<_> = chart.extras().map(|s| s.extra_type()).collect();
    assert_eq!(types, vec![1, 2, 3]);
    let panels: Vec<_> = chart.steps().iter().map(|s| s.panels().bits()).collect();
    assert_eq!(panels, vec![0x01, 0x0F, 0x00, 0x81]);
    assert_refs_match_panels(&chart);
}

#[test]
fn overlay_items_resolve_from_references() {
    let chart = decode_chart(&MushPayload {
        difficulty: 0x0618,
        steps: vec![
            step(0, 0x05, &[1, 0]),
            step(1024, 0x80, &[2]),
            step(2048, 0x10, &[1]),
        ],
        items: vec![(0x02, 7, 8), (0x0E, -1, 0x100)],
        ..Default::default()
    });

    let table = chart.item_table().unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table.end_offset(), 8 + 2 * 12);
    assert_eq!(
        table.items()[1],
        MushItem {
            kind: 0x0E,
            param1: -1,
            param2: 0x100
        }
    );

    assert_eq!(chart.item(0), None);
    assert_eq!(chart.item(1).unwrap().enemy(), Some(EnemyKind::KoopaTroopa));
    assert_eq!(chart.item(2).unwrap().enemy(), Some(EnemyKind::IceSpiny));
    assert_eq!(chart.item(3), None);

    let arrows: Vec<_> = chart.steps()[0].arrows().collect();
    assert_eq!(
        arrows,
        vec![
            (Arrow::new(Player::One, Direction::Left), 1),
            (Arrow::new(Player::One, Direction::Up), 0),
        ]
    );
    assert!(chart.extras_header().is_none());
}

#[test]
fn item_count_comes_from_end_offset() {
    // more items than references: the table is sized by its end offset only
    let chart = decode_chart(&MushPayload {
        steps: vec![step(0, 0x01, &[1])],
        items: vec![(1, 0, 0), (3, 0, 0), (9, 0, 0), (16, 0, 0)],
        ..Default::default()
    });
    let table = chart.item_table().unwrap();
    assert_eq!(table.len() as i32, (table.end_offset() - 8) / 12);
    assert_eq!(table.len(), 4);
}

#[test]
fn enemy_header_follows_nonzero_post_data_offset() {
    let chart = decode_chart(&MushPayload {
        post_data_offset: 0x30,
        enemy_end_offset: 0x58,
        steps: vec![step(0, 0x02, &[1]), step(4096, 0, &[])],
        items: vec![(4, 1, 2)],
        extras: vec![extra(0x04, 1, &[0])],
        ..Default::default()
    });

    assert_eq!(
        chart.enemy_header(),
        Some(&EnemyHeader {
            post_data_offset: 0x30,
            end_offset: 0x58
        })
    );
    assert_eq!(chart.item_table().unwrap().len(), 1);
    assert_eq!(chart.extras_header().unwrap().end_offset, 0x40);
    assert_refs_match_panels(&chart);
}

#[test]
fn wrong_magic_is_invalid() {
    let mut payload = MushPayload {
        steps: vec![step(0, 0x01, &[1])],
        items: vec![(1, 0, 0)],
        ..Default::default()
    }
    .encode();
    // header 10, offsets 4, panels + ref + padding 4
    let magic_at = 18;
    payload[magic_at] ^= 0xFF;
    let err = ssq::decode(&stream(&[chunk(9, &payload)])).unwrap_err();

    let ReaderErrorKind::InvalidChunk(ChunkError::BadMagic { region, expected, .. }) =
        err.error_kind()
    else {
        panic!("unexpected error {err:?}");
    };
    assert_eq!(*region, Region::ItemTable);
    assert_eq!(*expected, 0x5241_4843);
    assert_eq!(err.position(), 6 + magic_at);
}

#[test]
fn missing_item_table_is_an_overrun() {
    // a nonzero reference with no table behind it
    let mut payload = MushPayload {
        steps: vec![step(0, 0x01, &[0])],
        ..Default::default()
    }
    .encode();
    payload[15] = 1;
    let err = ssq::decode(&stream(&[chunk(9, &payload)])).unwrap_err();
    assert!(matches!(
        err.error_kind(),
        ReaderErrorKind::InvalidChunk(ChunkError::Overrun { .. })
    ));
}

#[test]
fn every_step_has_one_ref_per_panel() {
    let steps = (0..=255u8)
        .map(|panels| {
            let refs = vec![0; panels.count_ones() as usize];
            step(panels as i32 * 64, panels, &refs)
        })
        .collect();
    let extras = vec![extra(0xFF, 9, &[0; 8])];
    let chart = decode_chart(&MushPayload {
        difficulty: 0x0418,
        steps,
        extras,
        ..Default::default()
    });
    assert_eq!(chart.step_count(), 256);
    assert_refs_match_panels(&chart);
    assert_eq!(chart.steps()[0].panels().bits(), 0xFF);
    assert_eq!(chart.steps()[0].extra_type(), 9);
}

#[test]
fn item_table_end_offset_below_header_is_invalid() {
    let good = MushPayload {
        steps: vec![step(0, 0x01, &[1])],
        items: vec![(1, 0, 0)],
        ..Default::default()
    }
    .encode();
    // header 10, offsets 4, panels + ref + padding 4, magic 4
    let end_at = 22;
    for end_offset in [4, 0, -1, i32::MIN] {
        let mut payload = good.clone();
        payload[end_at..end_at + 4].copy_from_slice(&end_offset.to_le_bytes());
        let err = ssq::decode(&stream(&[chunk(9, &payload)])).unwrap_err();
        assert_eq!(
            err.error_kind(),
            &ReaderErrorKind::InvalidChunk(ChunkError::ItemTableSize(end_offset)),
            "end offset {end_offset}"
        );
        assert_eq!(err.position(), 6 + end_at + 4);
    }
}
