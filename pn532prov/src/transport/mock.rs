// pn532prov/src/transport/mock.rs
//! In-memory PN532 used by tests and the simulator example.

use std::collections::VecDeque;

use crate::constants::{
    PN532_SPI_DATAREAD, PN532_SPI_DATAWRITE, PN532_SPI_READY, PN532_SPI_STATREAD,
};
use crate::transport::traits::Transport;
use crate::{Error, Result};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
enum Mode {
    #[default]
    Idle,
    AwaitOp,
    Write,
    Status,
    Read,
}

/// Byte-level PN532 simulator for unit tests.
///
/// Every byte block written with a data-write transaction is recorded in
/// `sent`. Queued responses (ACK frames, response frames) are handed out one
/// per data-read transaction; the status byte reads ready only while a
/// response is waiting and `busy_polls` is exhausted. Delays advance a
/// virtual clock instead of sleeping.
#[derive(Debug, Default)]
pub struct MockTransport {
    /// Frames written by the host, one entry per select.
    pub sent: Vec<Vec<u8>>,
    /// Queued controller answers, served in order.
    pub responses: VecDeque<Vec<u8>>,
    /// Testing hook: number of status polls answered "busy" before ready
    pub busy_polls: usize,
    /// Testing hook: every bus access fails with `Error::Bus` while set
    pub bus_fault: bool,
    /// Virtual clock advanced by `delay_ms`.
    pub elapsed_ms: u64,
    /// Status reads answered so far.
    pub status_polls: usize,
    /// Chip-select assertions so far.
    pub selects: usize,
    mode: Mode,
    pending_write: Vec<u8>,
    reading: Vec<u8>,
    read_pos: usize,
}

impl MockTransport {
    /// Empty simulator: nothing queued, never busy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue one raw answer (ACK or frame).
    pub fn push_response(&mut self, resp: Vec<u8>) {
        self.responses.push_back(resp);
    }

    /// Set how many subsequent status polls should report busy (for tests).
    pub fn set_busy_polls(&mut self, n: usize) {
        self.busy_polls = n;
    }

    /// Take the most recent host frame.
    pub fn pop_sent(&mut self) -> Option<Vec<u8>> {
        self.sent.pop()
    }

    fn check_fault(&self) -> Result<()> {
        if self.bus_fault {
            Err(Error::Bus("simulated bus fault".into()))
        } else {
            Ok(())
        }
    }
}

impl Transport for MockTransport {
    fn select(&mut self) -> Result<()> {
        self.check_fault()?;
        self.selects += 1;
        self.mode = Mode::AwaitOp;
        self.pending_write.clear();
        Ok(())
    }

    fn deselect(&mut self) -> Result<()> {
        if self.mode == Mode::Write && !self.pending_write.is_empty() {
            self.sent.push(std::mem::take(&mut self.pending_write));
        }
        self.mode = Mode::Idle;
        self.reading.clear();
        self.read_pos = 0;
        Ok(())
    }

    fn write_byte(&mut self, byte: u8) -> Result<()> {
        self.check_fault()?;
        match self.mode {
            Mode::AwaitOp => {
                self.mode = match byte {
                    PN532_SPI_DATAWRITE => Mode::Write,
                    PN532_SPI_STATREAD => Mode::Status,
                    PN532_SPI_DATAREAD => {
                        self.reading = self.responses.pop_front().unwrap_or_default();
                        self.read_pos = 0;
                        Mode::Read
                    }
                    _ => Mode::Idle,
                };
            }
            Mode::Write => self.pending_write.push(byte),
            // Bytes clocked outside a transaction are dropped by the chip.
            _ => {}
        }
        Ok(())
    }

    fn read_byte(&mut self) -> Result<u8> {
        self.check_fault()?;
        match self.mode {
            Mode::Status => {
                self.status_polls += 1;
                if self.busy_polls > 0 {
                    self.busy_polls -= 1;
                    return Ok(0x00);
                }
                if self.responses.is_empty() {
                    Ok(0x00)
                } else {
                    Ok(PN532_SPI_READY)
                }
            }
            Mode::Read => {
                let b = self.reading.get(self.read_pos).copied().unwrap_or(0x00);
                self.read_pos += 1;
                Ok(b)
            }
            _ => Ok(0x00),
        }
    }

    fn delay_ms(&mut self, ms: u32) {
        self.elapsed_ms += u64::from(ms);
    }
}
