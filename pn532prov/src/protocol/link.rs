// pn532prov/src/protocol/link.rs
//! SPI link primitives: command write, status polling, ACK and frame reads.
//! Each function is one or more complete chip-select transactions.

use log::trace;

use crate::constants::{
    PN532_ACK, PN532_PREAMBLE, PN532_SPI_DATAREAD, PN532_SPI_DATAWRITE, PN532_SPI_READY,
    PN532_SPI_STATREAD,
};
use crate::protocol::frame::{Frame, FrameError};
use crate::transport::Transport;
use crate::{Error, Result};

/// Interval between two status polls.
pub const POLL_INTERVAL_MS: u32 = 10;

/// Run `f` inside a select/deselect pair. Deselect happens even when `f`
/// fails so the chip is never left selected.
fn transaction<T, R>(t: &mut T, op: u8, f: impl FnOnce(&mut T) -> Result<R>) -> Result<R>
where
    T: Transport + ?Sized,
{
    t.select()?;
    let result = match t.write_byte(op) {
        Ok(()) => f(t),
        Err(e) => Err(e),
    };
    let released = t.deselect();
    let value = result?;
    released?;
    Ok(value)
}

#[cfg(feature = "diagnostics")]
fn dump(dir: &str, bytes: &[u8]) {
    trace!("{} {}", dir, crate::utils::bytes_to_hex_spaced(bytes));
}

#[cfg(not(feature = "diagnostics"))]
fn dump(dir: &str, bytes: &[u8]) {
    trace!("{} {} bytes", dir, bytes.len());
}

/// Frame `payload` (command code + parameters) and write it to the chip.
pub fn write_command<T: Transport + ?Sized>(t: &mut T, payload: &[u8]) -> Result<()> {
    let frame = Frame::encode_command(payload)?;
    dump("->", &frame);
    transaction(t, PN532_SPI_DATAWRITE, |t| t.write_all(&frame))
}

/// Single status poll.
pub fn is_ready<T: Transport + ?Sized>(t: &mut T) -> Result<bool> {
    let status = transaction(t, PN532_SPI_STATREAD, |t| t.read_byte())?;
    Ok(status == PN532_SPI_READY)
}

/// Poll the status byte every `POLL_INTERVAL_MS` until it reads ready.
/// A `timeout_ms` of 0 waits forever; otherwise the wait fails once the
/// accumulated poll time exceeds `timeout_ms`.
pub fn wait_ready<T: Transport + ?Sized>(t: &mut T, timeout_ms: u32) -> Result<()> {
    let mut waited: u32 = 0;
    while !is_ready(t)? {
        if timeout_ms != 0 {
            waited = waited.saturating_add(POLL_INTERVAL_MS);
            if waited > timeout_ms {
                trace!("not ready after {} ms", timeout_ms);
                return Err(Error::Timeout);
            }
        }
        t.delay_ms(POLL_INTERVAL_MS);
    }
    Ok(())
}

/// Read `n` bytes in one data-read transaction.
pub fn read_data<T: Transport + ?Sized>(t: &mut T, n: usize) -> Result<Vec<u8>> {
    let mut buf = vec![0u8; n];
    transaction(t, PN532_SPI_DATAREAD, |t| t.read_into(&mut buf))?;
    dump("<-", &buf);
    Ok(buf)
}

/// Read the 6-byte acknowledgement and compare it with the ACK constant.
pub fn read_ack<T: Transport + ?Sized>(t: &mut T) -> Result<()> {
    let got = read_data(t, PN532_ACK.len())?;
    if got[..] != PN532_ACK {
        return Err(Error::AckMismatch(got));
    }
    Ok(())
}

/// Read one information frame as raw wire bytes. The read stops as soon as
/// the preamble or the length checksum is wrong; otherwise the buffer is
/// sized from the frame's own length byte.
pub fn read_raw_frame<T: Transport + ?Sized>(t: &mut T) -> Result<Vec<u8>> {
    let raw = transaction(t, PN532_SPI_DATAREAD, |t| {
        let mut raw = vec![0u8; 5];
        t.read_into(&mut raw[..3])?;
        if raw[..3] != PN532_PREAMBLE {
            dump("<-", &raw[..3]);
            return Err(FrameError::PreambleMismatch.into());
        }
        t.read_into(&mut raw[3..5])?;
        let (len, lcs) = (raw[3], raw[4]);
        if len.wrapping_add(lcs) != 0 {
            dump("<-", &raw);
            return Err(FrameError::LengthChecksumMismatch { len, lcs }.into());
        }
        // TFI + payload (LEN bytes), DCS, postamble
        let body = len as usize + 2;
        raw.resize(5 + body, 0);
        t.read_into(&mut raw[5..])?;
        Ok(raw)
    })?;
    dump("<-", &raw);
    Ok(raw)
}

/// Read and decode one information frame.
pub fn read_frame<T: Transport + ?Sized>(t: &mut T) -> Result<Frame> {
    let raw = read_raw_frame(t)?;
    Ok(Frame::decode(&raw)?)
}
