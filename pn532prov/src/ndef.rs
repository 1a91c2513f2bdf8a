// pn532prov/src/ndef.rs
//! Byte layouts for writing NDEF URI records to Mifare Classic and NTAG2xx
//! tags.

use crate::constants::{MIFARE_BLOCK_LEN, MIFARE_PAGE_LEN};
use crate::{Error, Result};

/// NDEF record header for a short, single, well-known `U` record.
const URI_RECORD_HEADER: u8 = 0xD1;
const URI_RECORD_TYPE: u8 = 0x55;
const NDEF_MESSAGE_TLV: u8 = 0x03;
const TERMINATOR_TLV: u8 = 0xFE;

/// Longest URI that fits the three data blocks of one Classic sector.
pub const CLASSIC_MAX_URI_LEN: usize = 38;

/// Bytes of the NTAG lock-control TLV plus the NDEF record header.
pub const NTAG_URI_OVERHEAD: usize = 12;

/// MAD sector blocks 1 and 2 mark every sector as holding NDEF data.
pub const CLASSIC_MAD_BLOCK1: [u8; 16] = [
    0x14, 0x01, 0x03, 0xE1, 0x03, 0xE1, 0x03, 0xE1, 0x03, 0xE1, 0x03, 0xE1, 0x03, 0xE1, 0x03, 0xE1,
];
/// Second MAD block, see [`CLASSIC_MAD_BLOCK1`].
pub const CLASSIC_MAD_BLOCK2: [u8; 16] = [
    0x03, 0xE1, 0x03, 0xE1, 0x03, 0xE1, 0x03, 0xE1, 0x03, 0xE1, 0x03, 0xE1, 0x03, 0xE1, 0x03, 0xE1,
];
/// Sector 0 trailer: MAD key A `A0..A5` and its access bits.
pub const CLASSIC_MAD_TRAILER: [u8; 16] = [
    0xA0, 0xA1, 0xA2, 0xA3, 0xA4, 0xA5, 0x78, 0x77, 0x88, 0xC1, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
];
/// NDEF sector trailer: public key A `D3 F7 ..` and its access bits.
pub const CLASSIC_NDEF_TRAILER: [u8; 16] = [
    0xD3, 0xF7, 0xD3, 0xF7, 0xD3, 0xF7, 0x7F, 0x07, 0x88, 0x40, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
];

/// Default key A of the NDEF sectors.
pub const KEY_NDEF: [u8; 6] = [0xD3, 0xF7, 0xD3, 0xF7, 0xD3, 0xF7];
/// Default key A of the MAD sector.
pub const KEY_MAD: [u8; 6] = [0xA0, 0xA1, 0xA2, 0xA3, 0xA4, 0xA5];

fn uri_record(uri_identifier: u8, url: &[u8]) -> Vec<u8> {
    let len = url.len() as u8;
    let mut out = Vec::with_capacity(url.len() + 7);
    out.extend_from_slice(&[
        NDEF_MESSAGE_TLV,
        len + 5,
        URI_RECORD_HEADER,
        0x01,
        len + 1,
        URI_RECORD_TYPE,
        uri_identifier,
    ]);
    out.extend_from_slice(url);
    out.push(TERMINATOR_TLV);
    out
}

/// The three data blocks of a Classic NDEF sector carrying one URI record.
pub fn classic_uri_blocks(uri_identifier: u8, url: &str) -> Result<[[u8; 16]; 3]> {
    let url = url.as_bytes();
    if url.is_empty() || url.len() > CLASSIC_MAX_URI_LEN {
        return Err(Error::InvalidArgument(format!(
            "uri length {} outside 1..={}",
            url.len(),
            CLASSIC_MAX_URI_LEN
        )));
    }

    let mut bytes = vec![0x00, 0x00];
    bytes.extend(uri_record(uri_identifier, url));
    bytes.resize(3 * MIFARE_BLOCK_LEN, 0x00);

    let mut blocks = [[0u8; 16]; 3];
    for (block, chunk) in blocks.iter_mut().zip(bytes.chunks(MIFARE_BLOCK_LEN)) {
        block.copy_from_slice(chunk);
    }
    Ok(blocks)
}

/// Pages written from page 4 onwards to put one URI record on an NTAG2xx
/// whose user data area is `data_len` bytes.
pub fn ntag_uri_pages(uri_identifier: u8, url: &str, data_len: usize) -> Result<Vec<[u8; 4]>> {
    let url = url.as_bytes();
    let room = data_len.saturating_sub(NTAG_URI_OVERHEAD);
    if url.is_empty() || url.len() + 1 > room || url.len() > usize::from(u8::MAX - 5) {
        return Err(Error::InvalidArgument(format!(
            "uri length {} does not fit a {} byte data area",
            url.len(),
            data_len
        )));
    }

    // Lock control TLV: lock bytes at page 10 offset 0, 16 bits, 4-byte pages.
    let mut bytes = vec![0x01, 0x03, 0xA0, 0x10, 0x44];
    bytes.extend(uri_record(uri_identifier, url));

    Ok(bytes
        .chunks(MIFARE_PAGE_LEN)
        .map(|chunk| {
            let mut page = [0u8; 4];
            page[..chunk.len()].copy_from_slice(chunk);
            page
        })
        .collect())
}
