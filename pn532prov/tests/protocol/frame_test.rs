#[path = "../common/mod.rs"]
mod common;

use pn532prov::protocol::{Direction, Frame, FrameError};
use proptest::prelude::*;

#[test]
fn firmware_fixture_decodes() {
    let frame = Frame::decode(&common::fixtures::firmware_response_frame()).unwrap();
    assert_eq!(frame.direction, Direction::DeviceToHost);
    assert_eq!(frame.payload, vec![0x03, 0x32, 0x01, 0x06, 0x07]);
}

#[test]
fn encoder_matches_capture() {
    assert_eq!(
        Frame::encode_response(&[0x03, 0x32, 0x01, 0x06, 0x07]).unwrap(),
        common::fixtures::firmware_response_frame()
    );
    assert_eq!(
        Frame::encode_command(&[0x02]).unwrap(),
        common::fixtures::get_firmware_version_frame()
    );
}

#[test]
fn ack_is_not_an_information_frame() {
    assert!(matches!(
        Frame::decode(&common::fixtures::ack()),
        Err(FrameError::LengthChecksumMismatch { len: 0x00, lcs: 0xFF })
    ));
}

#[test]
fn corrupted_payload_byte_fails_dcs() {
    let mut raw = common::fixtures::sam_response_frame();
    raw[6] ^= 0x01;
    assert!(matches!(
        Frame::decode(&raw),
        Err(FrameError::PayloadChecksumMismatch { .. })
    ));
}

proptest! {
    #[test]
    fn any_command_payload_roundtrips(payload in proptest::collection::vec(any::<u8>(), 0..=62)) {
        let raw = Frame::encode_command(&payload).unwrap();
        let frame = Frame::decode(&raw).unwrap();
        prop_assert_eq!(frame.direction, Direction::HostToDevice);
        prop_assert_eq!(frame.payload, payload);
    }

    #[test]
    fn wrong_third_byte_is_preamble_mismatch(
        payload in proptest::collection::vec(any::<u8>(), 1..=62),
        third in any::<u8>().prop_filter("not 0xFF", |b| *b != 0xFF),
    ) {
        let mut raw = Frame::encode_response(&payload).unwrap();
        raw[2] = third;
        prop_assert_eq!(Frame::decode(&raw), Err(FrameError::PreambleMismatch));
    }

    #[test]
    fn bad_lcs_is_length_checksum_mismatch(
        payload in proptest::collection::vec(any::<u8>(), 1..=62),
        delta in 1u8..=255,
    ) {
        let mut raw = Frame::encode_response(&payload).unwrap();
        raw[4] = raw[4].wrapping_add(delta);
        let is_lcs_error = matches!(
            Frame::decode(&raw),
            Err(FrameError::LengthChecksumMismatch { .. })
        );
        prop_assert!(is_lcs_error);
    }
}
