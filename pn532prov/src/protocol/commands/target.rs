// pn532prov/src/protocol/commands/target.rs
//! InListPassiveTarget encoding.

use crate::constants::PN532_CMD_IN_LIST_PASSIVE_TARGET;
use crate::types::BaudRate;

/// InListPassiveTarget: MaxTg, BrTy. No initiator data is sent.
pub fn encode_in_list_passive_target(max_targets: u8, baud: BaudRate) -> Vec<u8> {
    vec![PN532_CMD_IN_LIST_PASSIVE_TARGET, max_targets, baud as u8]
}
