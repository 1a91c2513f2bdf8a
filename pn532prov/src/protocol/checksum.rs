// pn532prov/src/protocol/checksum.rs
//! LCS and DCS checksums.

use crate::constants::PN532_HOST_TO_PN532;

/// Compute Length Checksum (LCS) for a PN532 frame.
/// LCS = 0x100 - LEN (mod 256), so LEN + LCS == 0.
pub fn lcs(len: u8) -> u8 {
    0u8.wrapping_sub(len)
}

/// Compute Data Checksum (DCS) over TFI + payload.
/// DCS = 0x100 - (TFI + sum(payload)) (mod 256)
pub fn dcs(tfi: u8, payload: &[u8]) -> u8 {
    let sum = payload.iter().fold(tfi, |acc, &b| acc.wrapping_add(b));
    0u8.wrapping_sub(sum)
}

/// DCS for a host -> PN532 command frame.
pub fn command_dcs(payload: &[u8]) -> u8 {
    dcs(PN532_HOST_TO_PN532, payload)
}
