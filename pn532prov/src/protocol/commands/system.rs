// pn532prov/src/protocol/commands/system.rs
//! GetFirmwareVersion and SAMConfiguration encoding.

use crate::constants::{PN532_CMD_GET_FIRMWARE_VERSION, PN532_CMD_SAM_CONFIGURATION};
use crate::types::SamMode;

/// GetFirmwareVersion has no parameters.
pub fn encode_get_firmware_version() -> Vec<u8> {
    vec![PN532_CMD_GET_FIRMWARE_VERSION]
}

/// SAMConfiguration: mode, timeout in 50 ms units, IRQ pin use.
pub fn encode_sam_configuration(mode: SamMode, timeout: u8, use_irq: bool) -> Vec<u8> {
    vec![
        PN532_CMD_SAM_CONFIGURATION,
        mode as u8,
        timeout,
        u8::from(use_irq),
    ]
}
