// pn532prov/src/device/address.rs
//! Address validation for the tag families reachable through
//! InDataExchange. Every check runs before any bus traffic.

use crate::types::{ClassicProfile, TagKind};
use crate::{Error, Result};

/// Last page of a Mifare Ultralight.
pub const ULTRALIGHT_MAX_PAGE: u16 = 63;
/// Last readable NTAG2xx page.
pub const NTAG2XX_MAX_READ_PAGE: u16 = 230;
/// Pages below this hold UID and lock bytes.
pub const NTAG2XX_MIN_WRITE_PAGE: u16 = 4;
/// Last user-writable NTAG2xx page.
pub const NTAG2XX_MAX_WRITE_PAGE: u16 = 225;
/// Sectors available for NDEF data on a 1K card (sector 0 holds the MAD).
pub const NDEF_SECTORS: (u16, u16) = (1, 15);

fn check(tag: TagKind, address: u16, min: u16, max: u16) -> Result<u8> {
    if address < min || address > max {
        return Err(Error::AddressOutOfRange {
            tag,
            address,
            min,
            max,
        });
    }
    // Every range above tops out at 255.
    Ok(address as u8)
}

/// Block number on a Classic card of the given size.
pub fn classic_block(profile: ClassicProfile, block: u16) -> Result<u8> {
    check(profile.tag_kind(), block, 0, profile.max_block())
}

/// Ultralight page for read or write.
pub fn ultralight_page(page: u16) -> Result<u8> {
    check(TagKind::Ultralight, page, 0, ULTRALIGHT_MAX_PAGE)
}

/// NTAG2xx page for a read.
pub fn ntag2xx_read_page(page: u16) -> Result<u8> {
    check(TagKind::Ntag2xx, page, 0, NTAG2XX_MAX_READ_PAGE)
}

/// NTAG2xx page for a write, user area only.
pub fn ntag2xx_write_page(page: u16) -> Result<u8> {
    check(
        TagKind::Ntag2xx,
        page,
        NTAG2XX_MIN_WRITE_PAGE,
        NTAG2XX_MAX_WRITE_PAGE,
    )
}

/// Classic sector usable for NDEF data.
pub fn ndef_sector(sector: u16) -> Result<u8> {
    check(TagKind::ClassicSector, sector, NDEF_SECTORS.0, NDEF_SECTORS.1)
}

/// True for the first block of a sector: 4-block sectors below block 128,
/// 16-block sectors above.
pub fn is_first_block(block: u16) -> bool {
    if block < 128 {
        block % 4 == 0
    } else {
        block % 16 == 0
    }
}

/// True for a sector trailer (keys and access bits).
pub fn is_trailer_block(block: u16) -> bool {
    if block < 128 {
        (block + 1) % 4 == 0
    } else {
        (block + 1) % 16 == 0
    }
}
