//! Integration tests for message assembly
//!
//! Drives the public writer API the way a message encoder does: reserve,
//! write, patch, check code, escape, retrieve.

use chrono::NaiveDate;
use jt905_writer::constants::BCD_RADIX;
use jt905_writer::{xor, EscapeMode, Jt905Error, Jt905Writer};
use proptest::prelude::*;

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn test_body_only_escape_scenario() {
    let mut buf = [0u8; 32];
    let mut writer = Jt905Writer::new(&mut buf);

    writer.write_start().unwrap();
    writer.write_array(&[0x01, 0x7e, 0x7d]).unwrap();
    writer.write_end().unwrap();
    writer.write_encode().unwrap();

    assert_eq!(
        writer.encoded(),
        &[0x7e, 0x01, 0x7d, 0x02, 0x7d, 0x01, 0x7e]
    );
    assert_eq!(writer.buffer().before_coding_position(), 5);
    assert_eq!(writer.physical().len(), 12);
}

#[test]
fn test_full_message_with_patched_length() {
    let time = NaiveDate::from_ymd_opt(2020, 1, 1)
        .unwrap()
        .and_hms_opt(12, 30, 45)
        .unwrap();

    let mut buf = [0u8; 128];
    let mut writer = Jt905Writer::new(&mut buf);

    // Header: flag, message id, body length placeholder, ISU id, serial
    writer.write_start().unwrap();
    writer.write_u16(0x0200).unwrap();
    let len_pos = writer.skip(2, 0x00).unwrap();
    writer.write_bcd("10000000007e", 12).unwrap();
    writer.write_u16(0x007e).unwrap();

    // Body
    let body_start = writer.current_position();
    writer.write_u32(0x0000_0001).unwrap();
    writer.write_date_time6(&time, BCD_RADIX).unwrap();
    writer.write_hex("7d", None).unwrap();
    let body_len = writer.current_position() - body_start;
    writer.write_u16_at(len_pos, body_len as u16).unwrap();

    writer.write_xor().unwrap();
    writer.write_end().unwrap();

    let logical = writer.logical().to_vec();
    assert_eq!(&logical[3..5], &[0x00, 11]);
    assert_eq!(&logical[5..11], &[0x10, 0x00, 0x00, 0x00, 0x00, 0x7e]);
    assert_eq!(&logical[17..23], &[0x20, 0x01, 0x01, 0x12, 0x30, 0x45]);
    assert_eq!(logical[logical.len() - 2], xor(&logical[1..logical.len() - 2]));

    writer.write_encode().unwrap();

    let encoded = writer.encoded();
    assert_eq!(encoded.first(), Some(&0x7e));
    assert_eq!(encoded.last(), Some(&0x7e));
    assert!(encoded[1..encoded.len() - 1].iter().all(|&b| b != 0x7e));
    assert_eq!(
        encoded.len(),
        logical.len() + escapes_in(&logical[1..logical.len() - 1])
    );
    assert_eq!(writer.logical(), logical.as_slice());
}

#[test]
fn test_patch_does_not_move_cursor() {
    let mut buf = [0u8; 16];
    let mut writer = Jt905Writer::new(&mut buf);

    let pos = writer.skip(2, 0x00).unwrap();
    writer.write_u32(0xCAFEBABE).unwrap();
    let count = writer.current_position();

    writer.write_u16_at(pos, 0xBEEF).unwrap();

    assert_eq!(writer.current_position(), count);
    assert_eq!(&writer.physical()[pos..pos + 2], &[0xBE, 0xEF]);
}

#[test]
fn test_date_into_small_buffer_fails() {
    let time = NaiveDate::from_ymd_opt(2024, 6, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let mut buf = [0u8; 4];
    let mut writer = Jt905Writer::new(&mut buf);

    let err = writer.write_date_time6(&time, BCD_RADIX).unwrap_err();
    assert!(matches!(err, Jt905Error::CapacityExceeded { .. }));
    assert_eq!(writer.current_position(), 0);
}

#[test]
fn test_encoded_outlives_writer() {
    let mut buf = [0u8; 16];
    let encoded = {
        let mut writer = Jt905Writer::new(&mut buf);
        writer.write_array(&[0x7d]).unwrap();
        writer.write_escaped(EscapeMode::Full).unwrap();
        writer.into_encoded()
    };
    assert_eq!(encoded, &[0x7d, 0x01]);
}

fn escapes_in(bytes: &[u8]) -> usize {
    bytes.iter().filter(|&&b| b == 0x7e || b == 0x7d).count()
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn prop_plain_bytes_unchanged(data in prop::collection::vec(
        any::<u8>().prop_filter("no reserved bytes", |b| *b != 0x7e && *b != 0x7d),
        0..64,
    )) {
        let mut buf = vec![0u8; data.len() * 2];
        let mut writer = Jt905Writer::new(&mut buf);
        writer.write_array(&data).unwrap();
        writer.write_full_encode().unwrap();

        prop_assert_eq!(writer.encoded(), data.as_slice());
        prop_assert_eq!(writer.buffer().before_coding_position(), data.len());
    }

    #[test]
    fn prop_escaped_length_grows_by_reserved_count(
        data in prop::collection::vec(any::<u8>(), 0..64),
    ) {
        let mut buf = vec![0u8; data.len() * 3];
        let mut writer = Jt905Writer::new(&mut buf);
        writer.write_array(&data).unwrap();
        writer.write_full_encode().unwrap();

        prop_assert_eq!(writer.encoded().len(), data.len() + escapes_in(&data));
        prop_assert!(writer.encoded().iter().all(|&b| b != 0x7e));
        prop_assert_eq!(writer.logical(), data.as_slice());
    }

    #[test]
    fn prop_xor_check_code_cancels(data in prop::collection::vec(any::<u8>(), 1..64)) {
        let mut buf = vec![0u8; data.len() + 1];
        let mut writer = Jt905Writer::new(&mut buf);
        writer.write_array(&data).unwrap();
        writer.write_xor_from(0).unwrap();

        prop_assert_eq!(xor(writer.physical()), 0);
    }

    #[test]
    fn prop_integers_round_trip_big_endian(
        a in any::<i16>(),
        b in any::<u16>(),
        c in any::<i32>(),
        d in any::<u32>(),
        e in any::<i64>(),
        f in any::<u64>(),
    ) {
        let mut buf = [0u8; 28];
        let mut writer = Jt905Writer::new(&mut buf);
        writer.write_i16(a).unwrap();
        writer.write_u16(b).unwrap();
        writer.write_i32(c).unwrap();
        writer.write_u32(d).unwrap();
        writer.write_i64(e).unwrap();
        writer.write_u64(f).unwrap();

        let out = writer.physical();
        prop_assert_eq!(out.len(), 28);
        prop_assert_eq!(i16::from_be_bytes([out[0], out[1]]), a);
        prop_assert_eq!(u16::from_be_bytes([out[2], out[3]]), b);
        prop_assert_eq!(i32::from_be_bytes(out[4..8].try_into().unwrap()), c);
        prop_assert_eq!(u32::from_be_bytes(out[8..12].try_into().unwrap()), d);
        prop_assert_eq!(i64::from_be_bytes(out[12..20].try_into().unwrap()), e);
        prop_assert_eq!(u64::from_be_bytes(out[20..28].try_into().unwrap()), f);
    }

    #[test]
    fn prop_bcd_matches_decimal_digits(value in 0u32..100_000_000) {
        let text = value.to_string();
        let mut buf = [0u8; 4];
        let mut writer = Jt905Writer::new(&mut buf);
        writer.write_bcd(&text, 8).unwrap();

        let expected = format!("{:08}", value);
        let decoded: String = writer
            .physical()
            .iter()
            .map(|b| format!("{:02x}", b))
            .collect();
        prop_assert_eq!(decoded, expected);
    }
}
