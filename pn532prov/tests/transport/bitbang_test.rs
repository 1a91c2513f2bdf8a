#[path = "../common/mod.rs"]
mod common;

use std::convert::Infallible;
use std::fmt;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{self, ErrorType, InputPin, OutputPin};
use pn532prov::protocol::link;
use pn532prov::transport::{BitBangSpi, Transport};
use pn532prov::{Error, ErrorKind};

#[derive(Debug)]
struct PinFault;

impl fmt::Display for PinFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("pin fault")
    }
}

impl digital::Error for PinFault {
    fn kind(&self) -> digital::ErrorKind {
        digital::ErrorKind::Other
    }
}

struct Pin {
    fail: bool,
}

impl ErrorType for Pin {
    type Error = PinFault;
}

impl OutputPin for Pin {
    fn set_low(&mut self) -> Result<(), PinFault> {
        if self.fail { Err(PinFault) } else { Ok(()) }
    }

    fn set_high(&mut self) -> Result<(), PinFault> {
        if self.fail { Err(PinFault) } else { Ok(()) }
    }
}

/// MISO line held low: the controller never answers.
struct Quiet;

impl ErrorType for Quiet {
    type Error = Infallible;
}

impl InputPin for Quiet {
    fn is_high(&mut self) -> Result<bool, Infallible> {
        Ok(false)
    }

    fn is_low(&mut self) -> Result<bool, Infallible> {
        Ok(true)
    }
}

#[derive(Default)]
struct VirtualClock {
    ms: u64,
}

impl DelayNs for VirtualClock {
    fn delay_ns(&mut self, ns: u32) {
        self.ms += u64::from(ns / 1_000_000);
    }
}

fn ok() -> Pin {
    Pin { fail: false }
}

#[test]
fn failing_select_pin_is_bus_error() {
    let result = BitBangSpi::new(ok(), Quiet, ok(), Pin { fail: true }, VirtualClock::default());
    match result {
        Err(Error::Bus(msg)) => assert!(msg.contains("PinFault")),
        Err(other) => panic!("unexpected error {}", other),
        Ok(_) => panic!("select pin fault was not reported"),
    }
}

#[test]
fn silent_controller_times_out_over_gpio() {
    let mut spi = BitBangSpi::new(ok(), Quiet, ok(), ok(), VirtualClock::default())
        .unwrap()
        .with_select_settle(0);
    let err = link::wait_ready(&mut spi, 100).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Timeout);
    let (_, _, _, _, clock) = spi.release();
    assert_eq!(clock.ms, 100);
}

#[test]
fn quiet_bus_reads_zero() {
    let mut spi = BitBangSpi::new(ok(), Quiet, ok(), ok(), VirtualClock::default()).unwrap();
    spi.select().unwrap();
    assert_eq!(spi.read_byte().unwrap(), 0x00);
    spi.deselect().unwrap();
}
