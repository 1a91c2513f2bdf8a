#[path = "../common/mod.rs"]
mod common;

use pn532prov::config::ReaderConfig;
use pn532prov::{BaudRate, Error, ErrorKind};

#[test]
fn one_target_is_cached() {
    let (mut dev, shared) = common::device_with_config(ReaderConfig::default()).unwrap();
    shared.push_ack_and_frame(&common::fixtures::one_target_payload());
    let target = dev.in_list_passive_target().unwrap();
    assert_eq!(target.as_u8(), 1);
    assert_eq!(dev.inlisted_target(), Some(target));
    assert_eq!(
        shared.sent().last().unwrap(),
        &common::fixtures::in_list_passive_target_frame()
    );
}

#[test]
fn zero_targets_then_exchange_fails_fast() {
    let (mut dev, shared) = common::device_with_config(ReaderConfig::default()).unwrap();
    shared.push_ack_and_frame(&common::fixtures::one_target_payload());
    dev.in_list_passive_target().unwrap();

    // a later empty enumeration clears the earlier target
    shared.push_ack_and_frame(&common::fixtures::no_target_payload());
    assert!(matches!(dev.in_list_passive_target(), Err(Error::TargetCount(0))));
    assert_eq!(dev.inlisted_target(), None);

    let before = shared.sent().len();
    let mut buf = [0u8; 63];
    let err = dev.in_data_exchange(&[0x00, 0xB0, 0x00, 0x00, 0x02], &mut buf).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Precondition);
    assert_eq!(shared.sent().len(), before);
}

#[test]
fn enumeration_timeout_clears_cache() {
    let config = ReaderConfig::default().with_enumeration_timeout(200);
    let (mut dev, shared) = common::device_with_config(config).unwrap();
    shared.push_ack_and_frame(&common::fixtures::one_target_payload());
    dev.in_list_passive_target().unwrap();

    let err = dev.in_list_passive_target().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Timeout);
    assert_eq!(dev.inlisted_target(), None);
}

#[test]
fn missing_ack_fails_within_exchange_timeout() {
    let (mut dev, shared) = common::device_with_config(ReaderConfig::default()).unwrap();
    let start = shared.elapsed_ms();
    let err = dev.in_list_passive_target().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Timeout);
    assert_eq!(shared.elapsed_ms() - start, 1_000);
}

#[test]
fn target_search_gets_enumeration_timeout() {
    let config = ReaderConfig::default().with_enumeration_timeout(5_000);
    let (mut dev, shared) = common::device_with_config(config).unwrap();
    shared.push_response(common::fixtures::ack());
    let start = shared.elapsed_ms();
    let err = dev.in_list_passive_target().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Timeout);
    assert_eq!(shared.elapsed_ms() - start, 5_000);
}

#[test]
fn read_passive_target_id_returns_uid() {
    let (mut dev, shared) = common::device_with_config(ReaderConfig::default()).unwrap();
    shared.push_ack_and_frame(&common::fixtures::one_target_payload());
    let info = dev.read_passive_target_id(BaudRate::Iso14443A, 1_000).unwrap();
    assert_eq!(info.uid.to_hex(), "deadbeef");
    assert_eq!(dev.inlisted_target(), Some(info.target));
}

#[test]
fn exchange_returns_data_with_status_word() {
    let (mut dev, shared) = common::device_with_config(ReaderConfig::default()).unwrap();
    shared.push_ack_and_frame(&common::fixtures::one_target_payload());
    dev.in_list_passive_target().unwrap();

    shared.push_ack_and_frame(&common::fixtures::nlen_payload());
    let mut buf = [0u8; 63];
    let n = dev.in_data_exchange(&[0x00, 0xB0, 0x00, 0x00, 0x02], &mut buf).unwrap();
    assert_eq!(&buf[..n], &[0x00, 0x1C, 0x90, 0x00]);
}
