// pn532prov/src/types.rs
//! Identifiers and small value types shared by the device and protocol layers.

use crate::Error;
use derive_more::Display;
use std::convert::TryFrom;

/// Logical target number assigned by the PN532 during enumeration (Tg).
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
#[display(fmt = "Tg{}", _0)]
pub struct TargetId(u8);

impl TargetId {
    /// Wrap a raw Tg byte.
    pub const fn new(tg: u8) -> Self {
        Self(tg)
    }

    /// Raw Tg byte as used in InDataExchange.
    pub fn as_u8(&self) -> u8 {
        self.0
    }
}

/// Card UID (NFCID1) - Newtype Pattern (4, 7 or 10 バイト)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Uid(Vec<u8>);

impl Uid {
    /// Wrap bytes without a length check; see the `TryFrom` impl for the checked form.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Raw UID bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// UID length in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True for a zero-length UID.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Lowercase hex, no separators.
    pub fn to_hex(&self) -> String {
        crate::utils::bytes_to_hex(&self.0)
    }
}

impl TryFrom<&[u8]> for Uid {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        match bytes.len() {
            4 | 7 | 10 => Ok(Self(bytes.to_vec())),
            n => Err(Error::InvalidLength {
                expected: 4,
                actual: n,
            }),
        }
    }
}

/// Firmware identification returned by GetFirmwareVersion.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
#[display(fmt = "PN5{:x} v{}.{}", ic, version, revision)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FirmwareVersion {
    /// IC code (`0x32` for a PN532).
    pub ic: u8,
    /// Firmware version.
    pub version: u8,
    /// Firmware revision.
    pub revision: u8,
    /// Supported protocol bitmap.
    pub support: u8,
}

impl FirmwareVersion {
    /// From the four bytes following the response code.
    pub fn from_bytes(bytes: [u8; 4]) -> Self {
        Self {
            ic: bytes[0],
            version: bytes[1],
            revision: bytes[2],
            support: bytes[3],
        }
    }

    /// Packed big-endian form (IC, Ver, Rev, Support).
    pub fn as_u32(&self) -> u32 {
        u32::from_be_bytes([self.ic, self.version, self.revision, self.support])
    }
}

/// Details of an enumerated ISO14443A target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetInfo {
    /// Tg assigned by the controller.
    pub target: TargetId,
    /// ATQA
    pub sens_res: u16,
    /// SAK
    pub sel_res: u8,
    /// NFCID1.
    pub uid: Uid,
}

/// Modulation/baud rate requested from InListPassiveTarget (BrTy).
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BaudRate {
    /// 106 kbps type A.
    #[default]
    Iso14443A = 0x00,
    /// 212 kbps FeliCa polling.
    Felica212 = 0x01,
    /// 424 kbps FeliCa polling.
    Felica424 = 0x02,
    /// 106 kbps type B.
    Iso14443B = 0x03,
    /// 106 kbps Innovision Jewel.
    Jewel = 0x04,
}

/// SAM configuration mode.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SamMode {
    /// SAM not used.
    #[default]
    Normal = 0x01,
    /// PN532 and SAM seen as one card.
    VirtualCard = 0x02,
    /// Host talks to the SAM directly.
    WiredCard = 0x03,
    /// PN532 and SAM visible as two targets.
    DualCard = 0x04,
}

/// Mifare Classic authentication key slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyType {
    /// Key A (`0x60`).
    A,
    /// Key B (`0x61`).
    B,
}

impl KeyType {
    /// Mifare AUTH opcode for this slot.
    pub fn command(&self) -> u8 {
        match self {
            KeyType::A => crate::constants::MIFARE_CMD_AUTH_A,
            KeyType::B => crate::constants::MIFARE_CMD_AUTH_B,
        }
    }
}

/// Mifare Classic memory profile; decides the valid block range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassicProfile {
    /// Blocks 0..=63.
    Classic1K,
    /// Blocks 0..=255.
    Classic4K,
}

impl ClassicProfile {
    /// Highest valid block number.
    pub fn max_block(&self) -> u16 {
        match self {
            ClassicProfile::Classic1K => 63,
            ClassicProfile::Classic4K => 255,
        }
    }

    /// Tag family used in range errors.
    pub fn tag_kind(&self) -> TagKind {
        match self {
            ClassicProfile::Classic1K => TagKind::Classic1K,
            ClassicProfile::Classic4K => TagKind::Classic4K,
        }
    }
}

/// Tag family, used for address validation and error reporting.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    /// Mifare Classic 1K block.
    #[display(fmt = "mifare classic 1k block")]
    Classic1K,
    /// Mifare Classic 4K block.
    #[display(fmt = "mifare classic 4k block")]
    Classic4K,
    /// Mifare Ultralight page.
    #[display(fmt = "mifare ultralight page")]
    Ultralight,
    /// NTAG203/213/215/216 page.
    #[display(fmt = "ntag2xx page")]
    Ntag2xx,
    /// Mifare Classic sector number.
    #[display(fmt = "mifare classic sector")]
    ClassicSector,
}
