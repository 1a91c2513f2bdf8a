// pn532prov/src/constants.rs
//! Wire-level constants for the PN532 link protocol and the tag command sets.

/// Information frame preamble + start code: 0x00 0x00 0xFF
pub const PN532_PREAMBLE: [u8; 3] = [0x00, 0x00, 0xFF];

/// Information frame postamble: 0x00
pub const PN532_POSTAMBLE: u8 = 0x00;

/// Frame identifier (TFI) for host -> PN532 frames
pub const PN532_HOST_TO_PN532: u8 = 0xD4;
/// Frame identifier (TFI) for PN532 -> host frames
pub const PN532_PN532_TO_HOST: u8 = 0xD5;

/// Fixed acknowledgement frame returned after every accepted command
pub const PN532_ACK: [u8; 6] = [0x00, 0x00, 0xFF, 0x00, 0xFF, 0x00];

/// Header of a well-formed GetFirmwareVersion response, starting at the
/// second preamble byte: `00 FF LEN=06 LCS=FA D5 03`.
pub const PN532_FIRMWARE_SIGNATURE: [u8; 6] = [0x00, 0xFF, 0x06, 0xFA, 0xD5, 0x03];

/// Preamble(3) + LEN + LCS + DCS + postamble
pub const PN532_FRAME_OVERHEAD: usize = 7;

/// Capacity of the host-side packet staging buffer. Outgoing
/// data-exchange payloads are bounded by `PACKET_BUFFER_LEN - 2`.
pub const PACKET_BUFFER_LEN: usize = 64;

/// Largest APDU accepted by `InDataExchange` (opcode + target byte reserved).
pub const MAX_APDU_LEN: usize = PACKET_BUFFER_LEN - 2;

/// Worst-case APDU response the provisioning dialogue reserves room for.
pub const MAX_APDU_RESPONSE_LEN: usize = 63;

/// SPI op byte: a command frame follows.
pub const PN532_SPI_DATAWRITE: u8 = 0x01;
/// SPI op byte: read one status byte.
pub const PN532_SPI_STATREAD: u8 = 0x02;
/// SPI op byte: read ACK or response bytes.
pub const PN532_SPI_DATAREAD: u8 = 0x03;
/// Status byte value meaning an answer is waiting.
pub const PN532_SPI_READY: u8 = 0x01;

/// GetFirmwareVersion
pub const PN532_CMD_GET_FIRMWARE_VERSION: u8 = 0x02;
/// SAMConfiguration
pub const PN532_CMD_SAM_CONFIGURATION: u8 = 0x14;
/// InDataExchange
pub const PN532_CMD_IN_DATA_EXCHANGE: u8 = 0x40;
/// InListPassiveTarget
pub const PN532_CMD_IN_LIST_PASSIVE_TARGET: u8 = 0x4A;

/// Mask applied to the `InDataExchange` status byte; non-zero is an error.
pub const PN532_STATUS_ERROR_MASK: u8 = 0x3F;

/// Mifare Classic authenticate with key A (tunnelled through InDataExchange).
pub const MIFARE_CMD_AUTH_A: u8 = 0x60;
/// Authenticate with key B.
pub const MIFARE_CMD_AUTH_B: u8 = 0x61;
/// 16-byte read (four pages on Ultralight/NTAG).
pub const MIFARE_CMD_READ: u8 = 0x30;
/// Classic 16-byte block write.
pub const MIFARE_CMD_WRITE: u8 = 0xA0;
/// Ultralight/NTAG 4-byte page write.
pub const MIFARE_ULTRALIGHT_CMD_WRITE: u8 = 0xA2;

/// Mifare Classic block size in bytes
pub const MIFARE_BLOCK_LEN: usize = 16;
/// Ultralight / NTAG page size in bytes
pub const MIFARE_PAGE_LEN: usize = 4;
