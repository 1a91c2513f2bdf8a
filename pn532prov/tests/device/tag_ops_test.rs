#[path = "../common/mod.rs"]
mod common;

use pn532prov::device::address;
use pn532prov::ndef;
use pn532prov::test_support;
use pn532prov::{ClassicProfile, Error, ErrorKind, KeyType};

#[test]
fn classic_address_limits() {
    let (mut dev, shared) = test_support::inlisted_device();
    let before = shared.sent().len();
    let err = dev
        .mifare_classic_write_block(ClassicProfile::Classic1K, 64, &[0u8; 16])
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AddressRange);
    assert_eq!(shared.sent().len(), before);

    let mut answer = vec![0x41, 0x00];
    answer.extend([0xA5u8; 16]);
    shared.push_ack_and_frame(&answer);
    assert_eq!(
        dev.mifare_classic_read_block(ClassicProfile::Classic4K, 255).unwrap(),
        [0xA5; 16]
    );
}

#[test]
fn sector_geometry() {
    assert!(address::is_first_block(0));
    assert!(address::is_trailer_block(3));
    assert!(address::is_first_block(128));
    assert!(!address::is_first_block(132));
    assert!(address::is_trailer_block(143));
}

#[test]
fn format_then_write_uri() {
    let (mut dev, shared) = test_support::inlisted_device();
    let uid = [0xDE, 0xAD, 0xBE, 0xEF];
    // auth sector 0, three MAD blocks, auth sector 1, four NDEF blocks
    for _ in 0..9 {
        shared.push_ack_and_frame(&[0x41, 0x00]);
    }
    dev.mifare_classic_authenticate(ClassicProfile::Classic1K, 0, KeyType::A, &[0xFF; 6], &uid)
        .unwrap();
    dev.mifare_classic_format_ndef().unwrap();
    dev.mifare_classic_authenticate(ClassicProfile::Classic1K, 4, KeyType::A, &[0xFF; 6], &uid)
        .unwrap();
    dev.mifare_classic_write_ndef_uri(1, 0x01, "example.com").unwrap();

    let sent = shared.sent();
    let trailer = sent.last().unwrap();
    assert_eq!(trailer[9], 7);
    assert_eq!(&trailer[10..26], &ndef::CLASSIC_NDEF_TRAILER);
    assert_eq!(shared.pending_responses(), 0);
}

#[test]
fn failed_write_status_is_reported() {
    let (mut dev, shared) = test_support::inlisted_device();
    // authentication error status from the target
    shared.push_ack_and_frame(&[0x41, 0x14]);
    let err = dev
        .mifare_classic_write_block(ClassicProfile::Classic1K, 4, &[0u8; 16])
        .unwrap_err();
    assert!(matches!(err, Error::DeviceStatus { status: 0x14, .. }));
}

#[test]
fn ntag_pages() {
    let (mut dev, shared) = test_support::inlisted_device();
    let mut answer = vec![0x41, 0x00];
    answer.extend(0u8..16);
    shared.push_ack_and_frame(&answer);
    assert_eq!(dev.ntag2xx_read_page(230).unwrap(), [0, 1, 2, 3]);

    for page in [3u16, 226] {
        let err = dev.ntag2xx_write_page(page, &[0; 4]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AddressRange);
    }
}

#[test]
fn ntag_uri_overflow_sends_nothing() {
    let (mut dev, shared) = test_support::inlisted_device();
    let before = shared.sent().len();
    let url = "x".repeat(40);
    assert!(dev.ntag2xx_write_ndef_uri(0x01, &url, 48).is_err());
    assert_eq!(shared.sent().len(), before);
}
