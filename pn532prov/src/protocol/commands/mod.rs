// pn532prov/src/protocol/commands/mod.rs
//! Typed host-to-controller commands.

pub mod exchange;
pub mod system;
pub mod target;

pub use exchange::encode_in_data_exchange;
pub use system::{encode_get_firmware_version, encode_sam_configuration};
pub use target::encode_in_list_passive_target;

use crate::constants::{
    PN532_CMD_GET_FIRMWARE_VERSION, PN532_CMD_IN_DATA_EXCHANGE, PN532_CMD_IN_LIST_PASSIVE_TARGET,
    PN532_CMD_SAM_CONFIGURATION,
};
use crate::types::{BaudRate, SamMode, TargetId};

/// High-level Command enum. Per-command encoders live in
/// `protocol::commands::<group>.rs`.
#[derive(Debug, Clone)]
pub enum Command {
    /// Ask for IC, version, revision and supported tag families.
    GetFirmwareVersion,
    /// Configure the security access module; normal mode on this board.
    SamConfiguration {
        /// SAM operating mode.
        mode: SamMode,
        /// In units of 50 ms
        timeout: u8,
        /// Whether the IRQ line signals completion.
        use_irq: bool,
    },
    /// Search the field for targets.
    InListPassiveTarget {
        /// At most 2.
        max_targets: u8,
        /// Modulation and bit rate to search with.
        baud: BaudRate,
    },
    /// Relay bytes to an inlisted target.
    InDataExchange {
        /// Logical target number from enumeration.
        target: TargetId,
        /// Tag command or APDU.
        data: Vec<u8>,
    },
}

impl Command {
    /// PN532 command code (the byte following TFI).
    pub fn code(&self) -> u8 {
        match self {
            Self::GetFirmwareVersion => PN532_CMD_GET_FIRMWARE_VERSION,
            Self::SamConfiguration { .. } => PN532_CMD_SAM_CONFIGURATION,
            Self::InListPassiveTarget { .. } => PN532_CMD_IN_LIST_PASSIVE_TARGET,
            Self::InDataExchange { .. } => PN532_CMD_IN_DATA_EXCHANGE,
        }
    }

    /// Encode the command into the raw payload (command code + params).
    pub fn encode(&self) -> crate::Result<Vec<u8>> {
        Ok(match self {
            Self::GetFirmwareVersion => encode_get_firmware_version(),
            Self::SamConfiguration {
                mode,
                timeout,
                use_irq,
            } => encode_sam_configuration(*mode, *timeout, *use_irq),
            Self::InListPassiveTarget { max_targets, baud } => {
                encode_in_list_passive_target(*max_targets, *baud)
            }
            Self::InDataExchange { target, data } => encode_in_data_exchange(*target, data)?,
        })
    }
}
