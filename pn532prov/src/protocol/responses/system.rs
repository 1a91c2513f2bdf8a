// pn532prov/src/protocol/responses/system.rs
//! GetFirmwareVersion answer decoding.

use crate::protocol::parser;
use crate::types::FirmwareVersion;
use crate::Result;

/// Decode a GetFirmwareVersion response payload (response code = 0x03)
/// Layout: response_code(1) + IC(1) + Ver(1) + Rev(1) + Support(1)
pub fn decode_firmware_version(data: &[u8]) -> Result<FirmwareVersion> {
    let s = parser::slice_at(data, 1, 4)?;
    Ok(FirmwareVersion::from_bytes([s[0], s[1], s[2], s[3]]))
}
