// pn532prov/src/protocol/responses/mod.rs
//! Typed controller-to-host responses.

pub mod exchange;
pub mod system;
pub mod target;

pub use exchange::decode_in_data_exchange;
pub use system::decode_firmware_version;
pub use target::decode_in_list_passive_target;

use crate::constants::{
    PN532_CMD_GET_FIRMWARE_VERSION, PN532_CMD_IN_DATA_EXCHANGE, PN532_CMD_IN_LIST_PASSIVE_TARGET,
    PN532_CMD_SAM_CONFIGURATION,
};
use crate::types::{FirmwareVersion, TargetInfo};

/// High-level Response enum. Per-command decoders live in
/// `protocol::responses::<group>.rs` and are dispatched here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// Answer to GetFirmwareVersion.
    FirmwareVersion(FirmwareVersion),
    /// SAM configured; carries no data.
    SamConfiguration,
    /// Targets found during the search.
    InListPassiveTarget {
        /// Number of targets inlisted, 0 when the field was empty.
        count: u8,
        /// First target, present when `count > 0`.
        info: Option<TargetInfo>,
    },
    /// Answer relayed from the target.
    InDataExchange {
        /// Controller status byte, 0 on success.
        status: u8,
        /// Target answer, status word included for APDUs.
        data: Vec<u8>,
    },
}

impl Response {
    /// Decode a response payload (starting at the response code) for the
    /// given command code. The response code must be `expected_cmd + 1`.
    pub fn decode(expected_cmd: u8, data: &[u8]) -> crate::Result<Self> {
        crate::protocol::parser::expect_response_code(data, expected_cmd.wrapping_add(1))?;

        match expected_cmd {
            PN532_CMD_GET_FIRMWARE_VERSION => {
                Ok(Self::FirmwareVersion(decode_firmware_version(data)?))
            }
            PN532_CMD_SAM_CONFIGURATION => Ok(Self::SamConfiguration),
            PN532_CMD_IN_LIST_PASSIVE_TARGET => {
                let (count, info) = decode_in_list_passive_target(data)?;
                Ok(Self::InListPassiveTarget { count, info })
            }
            PN532_CMD_IN_DATA_EXCHANGE => {
                let (status, data) = decode_in_data_exchange(data)?;
                Ok(Self::InDataExchange { status, data })
            }
            _ => Err(crate::Error::InvalidArgument(format!(
                "no decoder for command {:#04x}",
                expected_cmd
            ))),
        }
    }

    /// Response code byte this variant was decoded from.
    pub fn code(&self) -> u8 {
        let cmd = match self {
            Self::FirmwareVersion(_) => PN532_CMD_GET_FIRMWARE_VERSION,
            Self::SamConfiguration => PN532_CMD_SAM_CONFIGURATION,
            Self::InListPassiveTarget { .. } => PN532_CMD_IN_LIST_PASSIVE_TARGET,
            Self::InDataExchange { .. } => PN532_CMD_IN_DATA_EXCHANGE,
        };
        cmd.wrapping_add(1)
    }
}
