#[path = "../common/mod.rs"]
mod common;

use pn532prov::protocol::engine::{send_command_check_ack, CommandExchange};
use pn532prov::protocol::link;
use pn532prov::protocol::ExchangeState;
use pn532prov::transport::MockTransport;
use pn532prov::{Error, ErrorKind};

#[test]
fn exchange_then_read_response() {
    common::init_logging();
    let mut m = MockTransport::new();
    m.push_response(common::fixtures::ack());
    m.push_response(common::fixtures::firmware_response_frame());

    let mut exchange = CommandExchange::new(&mut m, 1_000);
    assert_eq!(exchange.state(), ExchangeState::Idle);
    exchange.run(&[0x02]).unwrap();
    assert_eq!(exchange.state(), ExchangeState::Complete);

    let frame = link::read_frame(&mut m).unwrap();
    assert_eq!(frame.payload[0], 0x03);
    assert_eq!(m.sent, vec![common::fixtures::get_firmware_version_frame()]);
}

#[test]
fn busy_device_is_polled_every_10ms() {
    let mut m = MockTransport::new();
    m.push_response(common::fixtures::ack());
    m.push_response(common::fixtures::sam_response_frame());
    m.set_busy_polls(20);

    let (state, result) = send_command_check_ack(&mut m, &[0x14, 0x01, 0x14, 0x01], 1_000);
    result.unwrap();
    assert_eq!(state, ExchangeState::Complete);
    assert_eq!(m.elapsed_ms, 200);
}

#[test]
fn timeout_budget_counts_polls() {
    let mut m = MockTransport::new();
    let (state, result) = send_command_check_ack(&mut m, &[0x02], 1_000);
    let err = result.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Timeout);
    assert_eq!(state, ExchangeState::Failed);
    // polls at 0, 10, ... 1000 ms, then the budget is exceeded
    assert_eq!(m.status_polls, 101);
    assert_eq!(m.elapsed_ms, 1_000);
}

#[test]
fn zero_timeout_waits_for_slow_device() {
    let mut m = MockTransport::new();
    m.push_response(common::fixtures::ack());
    m.push_response(common::fixtures::sam_response_frame());
    m.set_busy_polls(5_000);
    let (state, result) = send_command_check_ack(&mut m, &[0x02], 0);
    result.unwrap();
    assert_eq!(state, ExchangeState::Complete);
    assert!(m.elapsed_ms >= 50_000);
}

#[test]
fn garbage_instead_of_ack() {
    let mut m = MockTransport::new();
    m.push_response(hex::decode("0000ff01ff00").unwrap());
    let (state, result) = send_command_check_ack(&mut m, &[0x02], 1_000);
    assert!(matches!(result, Err(Error::AckMismatch(ref got)) if got[3] == 0x01));
    assert_eq!(state, ExchangeState::Failed);
}
