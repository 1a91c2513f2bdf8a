// pn532prov/src/protocol/frame.rs
//! PN532 information frame codec.

use thiserror::Error;

use crate::constants::{
    PN532_FRAME_OVERHEAD, PN532_HOST_TO_PN532, PN532_PN532_TO_HOST, PN532_POSTAMBLE,
    PN532_PREAMBLE,
};
use crate::protocol::checksum::{dcs, lcs};
use crate::{Error, Result};

/// Reasons a raw byte buffer is not a valid PN532 information frame.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameError {
    /// The buffer does not start with `00 00 FF`.
    #[error("invalid preamble")]
    PreambleMismatch,
    /// `LEN + LCS` is not zero mod 256.
    #[error("length checksum mismatch: len={len:#04x}, lcs={lcs:#04x}")]
    LengthChecksumMismatch {
        /// LEN byte as received.
        len: u8,
        /// LCS byte as received.
        lcs: u8,
    },
    /// DCS does not match the TFI and payload.
    #[error("payload checksum mismatch: expected {expected:#04x}, got {actual:#04x}")]
    PayloadChecksumMismatch {
        /// DCS computed over the received bytes.
        expected: u8,
        /// DCS byte as received.
        actual: u8,
    },
    /// Fewer bytes than LEN announces.
    #[error("truncated frame: need {needed} bytes, got {actual}")]
    Truncated {
        /// Bytes the header calls for.
        needed: usize,
        /// Bytes available.
        actual: usize,
    },
    /// TFI is neither `D4` nor `D5`.
    #[error("unknown frame direction {0:#04x}")]
    UnknownDirection(u8),
}

/// Frame identifier (TFI): who sent the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// TFI `D4`.
    HostToDevice,
    /// TFI `D5`.
    DeviceToHost,
}

impl Direction {
    /// Frame identifier byte for this direction.
    pub fn tfi(&self) -> u8 {
        match self {
            Direction::HostToDevice => PN532_HOST_TO_PN532,
            Direction::DeviceToHost => PN532_PN532_TO_HOST,
        }
    }

    /// Map a TFI byte back to its direction.
    pub fn from_tfi(tfi: u8) -> std::result::Result<Self, FrameError> {
        match tfi {
            PN532_HOST_TO_PN532 => Ok(Direction::HostToDevice),
            PN532_PN532_TO_HOST => Ok(Direction::DeviceToHost),
            other => Err(FrameError::UnknownDirection(other)),
        }
    }
}

/// PN532 normal information frame.
/// Format: [Preamble 00 00 FF] [LEN] [LCS] [TFI] [Payload(LEN-1)] [DCS] [Postamble 00]
/// LEN counts the TFI byte plus the payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Host to controller or controller to host.
    pub direction: Direction,
    /// Command or response bytes following the TFI.
    pub payload: Vec<u8>,
}

impl Frame {
    /// Largest payload that fits the one-byte LEN field next to the TFI.
    pub const MAX_PAYLOAD_LEN: usize = 254;

    /// Wrap a payload without encoding it.
    pub fn new(direction: Direction, payload: Vec<u8>) -> Self {
        Self { direction, payload }
    }

    /// Encode this frame into wire bytes.
    pub fn encode(&self) -> Result<Vec<u8>> {
        encode_with(self.direction.tfi(), &self.payload)
    }

    /// Encode a host -> PN532 command frame around `payload` (command code
    /// followed by its parameters).
    pub fn encode_command(payload: &[u8]) -> Result<Vec<u8>> {
        encode_with(PN532_HOST_TO_PN532, payload)
    }

    /// Encode a PN532 -> host frame; used by simulators and tests.
    pub fn encode_response(payload: &[u8]) -> Result<Vec<u8>> {
        encode_with(PN532_PN532_TO_HOST, payload)
    }

    /// Decode a complete wire frame. Checks are ordered so that nothing past
    /// a bad preamble or a bad length checksum is interpreted.
    pub fn decode(raw: &[u8]) -> std::result::Result<Frame, FrameError> {
        if raw.len() < PN532_PREAMBLE.len() || raw[..3] != PN532_PREAMBLE {
            return Err(FrameError::PreambleMismatch);
        }

        if raw.len() < 5 {
            return Err(FrameError::Truncated {
                needed: 5,
                actual: raw.len(),
            });
        }
        let len = raw[3];
        let len_checksum = raw[4];
        if len.wrapping_add(len_checksum) != 0 {
            return Err(FrameError::LengthChecksumMismatch {
                len,
                lcs: len_checksum,
            });
        }
        if len == 0 {
            // LEN 00 with LCS 00 passes the checksum but leaves no room for
            // the TFI. The ACK (LEN 00, LCS FF) already failed above.
            return Err(FrameError::Truncated {
                needed: PN532_FRAME_OVERHEAD + 1,
                actual: raw.len(),
            });
        }

        // DCS sits right after the LEN bytes that start at offset 5; the
        // postamble is not required since some hosts stop clocking early.
        let needed = 5 + len as usize + 1;
        if raw.len() < needed {
            return Err(FrameError::Truncated {
                needed,
                actual: raw.len(),
            });
        }

        let tfi = raw[5];
        let payload = &raw[6..5 + len as usize];
        let expected = dcs(tfi, payload);
        let actual = raw[5 + len as usize];
        if expected != actual {
            return Err(FrameError::PayloadChecksumMismatch { expected, actual });
        }

        let direction = Direction::from_tfi(tfi)?;
        if raw.get(needed).is_some_and(|&b| b != PN532_POSTAMBLE) {
            log::trace!("frame postamble is {:#04x}, ignoring", raw[needed]);
        }

        Ok(Frame {
            direction,
            payload: payload.to_vec(),
        })
    }
}

fn encode_with(tfi: u8, payload: &[u8]) -> Result<Vec<u8>> {
    if payload.len() > Frame::MAX_PAYLOAD_LEN {
        return Err(Error::PayloadTooLong {
            max: Frame::MAX_PAYLOAD_LEN,
            actual: payload.len(),
        });
    }

    let len = (payload.len() + 1) as u8;
    let mut out = Vec::with_capacity(PN532_FRAME_OVERHEAD + 1 + payload.len());
    out.extend_from_slice(&PN532_PREAMBLE);
    out.push(len);
    out.push(lcs(len));
    out.push(tfi);
    out.extend_from_slice(payload);
    out.push(dcs(tfi, payload));
    out.push(PN532_POSTAMBLE);
    Ok(out)
}
