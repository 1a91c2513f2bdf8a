// pn532prov/src/protocol/codec.rs
//! Glue between typed commands/responses and wire frames.

use crate::Result;

use super::Frame;
use super::commands::Command;
use super::frame::{Direction, FrameError};
use super::responses::Response;

/// Encode a Command into a full wire frame (with preamble/LCS/DCS/postamble).
pub fn encode_command_frame(cmd: &Command) -> Result<Vec<u8>> {
    let payload = cmd.encode()?;
    Frame::encode_command(&payload)
}

/// Decode a full wire frame and parse the contained response for the
/// expected command code. Frames travelling host -> PN532 are rejected.
pub fn decode_response_frame(expected_cmd: u8, raw: &[u8]) -> Result<Response> {
    let frame = Frame::decode(raw)?;
    decode_response(expected_cmd, &frame)
}

/// Parse an already decoded frame.
pub fn decode_response(expected_cmd: u8, frame: &Frame) -> Result<Response> {
    if frame.direction != Direction::DeviceToHost {
        return Err(FrameError::UnknownDirection(frame.direction.tfi()).into());
    }
    Response::decode(expected_cmd, &frame.payload)
}
