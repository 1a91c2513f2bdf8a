#[path = "../common/mod.rs"]
mod common;

use pn532prov::protocol::codec::encode_command_frame;
use pn532prov::protocol::Command;
use pn532prov::{BaudRate, Error, SamMode, TargetId};

#[test]
fn sam_configuration_matches_capture() {
    let cmd = Command::SamConfiguration {
        mode: SamMode::Normal,
        timeout: 0x14,
        use_irq: true,
    };
    assert_eq!(
        encode_command_frame(&cmd).unwrap(),
        common::fixtures::sam_configuration_frame()
    );
}

#[test]
fn in_list_passive_target_matches_capture() {
    let cmd = Command::InListPassiveTarget {
        max_targets: 1,
        baud: BaudRate::Iso14443A,
    };
    assert_eq!(
        encode_command_frame(&cmd).unwrap(),
        common::fixtures::in_list_passive_target_frame()
    );
}

#[test]
fn in_data_exchange_prefixes_target() {
    let cmd = Command::InDataExchange {
        target: TargetId::new(1),
        data: vec![0x00, 0xB0, 0x00, 0x00, 0x02],
    };
    assert_eq!(cmd.encode().unwrap(), vec![0x40, 0x01, 0x00, 0xB0, 0x00, 0x00, 0x02]);
}

#[test]
fn oversize_apdu_rejected() {
    let cmd = Command::InDataExchange {
        target: TargetId::new(1),
        data: vec![0u8; 63],
    };
    assert!(matches!(
        cmd.encode(),
        Err(Error::PayloadTooLong { max: 62, actual: 63 })
    ));
}
