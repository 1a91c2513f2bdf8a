#[path = "../common/mod.rs"]
mod common;

use pn532prov::constants::{PN532_SPI_DATAREAD, PN532_SPI_DATAWRITE, PN532_SPI_STATREAD};
use pn532prov::protocol::link;
use pn532prov::transport::{MockTransport, Transport};
use pn532prov::ErrorKind;

#[test]
fn status_reads_ready_only_with_queued_response() {
    let mut m = MockTransport::new();
    assert!(!link::is_ready(&mut m).unwrap());
    m.push_response(common::fixtures::ack());
    assert!(link::is_ready(&mut m).unwrap());
    assert_eq!(m.status_polls, 2);
}

#[test]
fn raw_bytes_follow_op_codes() {
    let mut m = MockTransport::new();
    m.push_response(vec![0xAB, 0xCD]);

    m.select().unwrap();
    m.write_all(&[PN532_SPI_DATAWRITE, 0x11, 0x22]).unwrap();
    m.deselect().unwrap();
    assert_eq!(m.sent, vec![vec![0x11, 0x22]]);

    m.select().unwrap();
    m.write_byte(PN532_SPI_STATREAD).unwrap();
    assert_eq!(m.read_byte().unwrap(), 0x01);
    m.deselect().unwrap();

    m.select().unwrap();
    m.write_byte(PN532_SPI_DATAREAD).unwrap();
    let mut buf = [0u8; 3];
    m.read_into(&mut buf).unwrap();
    m.deselect().unwrap();
    // reads past the queued bytes clock in zeros
    assert_eq!(buf, [0xAB, 0xCD, 0x00]);
    assert_eq!(m.selects, 3);
}

#[test]
fn bus_fault_surfaces_as_bus_error() {
    let mut m = MockTransport::new();
    m.bus_fault = true;
    let err = link::write_command(&mut m, &[0x02]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Bus);
    assert!(m.sent.is_empty());
}

#[test]
fn truncated_frame_read_stops_at_bad_preamble() {
    let mut m = MockTransport::new();
    m.push_response(hex::decode("00ff0000").unwrap());
    let err = link::read_frame(&mut m).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::FrameIntegrity);
}
