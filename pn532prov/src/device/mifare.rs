// pn532prov/src/device/mifare.rs
//! Mifare Classic operations tunnelled through InDataExchange.

use log::debug;

use crate::constants::{MIFARE_BLOCK_LEN, MIFARE_CMD_READ, MIFARE_CMD_WRITE};
use crate::device::address;
use crate::device::handle::{Device, Initialized};
use crate::ndef;
use crate::types::{ClassicProfile, KeyType};
use crate::{Error, Result};

impl Device<Initialized> {
    /// Authenticate `block` with a 6-byte key. `uid` is the card UID as
    /// returned by enumeration (4 bytes for Classic cards).
    pub fn mifare_classic_authenticate(
        &mut self,
        profile: ClassicProfile,
        block: u16,
        key_type: KeyType,
        key: &[u8; 6],
        uid: &[u8],
    ) -> Result<()> {
        let block = address::classic_block(profile, block)?;
        if uid.is_empty() || uid.len() > 7 {
            return Err(Error::InvalidArgument(format!(
                "uid length {} not in 1..=7",
                uid.len()
            )));
        }

        let mut apdu = Vec::with_capacity(2 + key.len() + uid.len());
        apdu.push(key_type.command());
        apdu.push(block);
        apdu.extend_from_slice(key);
        apdu.extend_from_slice(uid);
        self.transceive(&apdu)?;
        debug!("authenticated block {} with key {:?}", block, key_type);
        Ok(())
    }

    /// Read one 16-byte block.
    pub fn mifare_classic_read_block(
        &mut self,
        profile: ClassicProfile,
        block: u16,
    ) -> Result<[u8; 16]> {
        let block = address::classic_block(profile, block)?;
        let data = self.transceive(&[MIFARE_CMD_READ, block])?;
        if data.len() < MIFARE_BLOCK_LEN {
            return Err(Error::InvalidLength {
                expected: MIFARE_BLOCK_LEN,
                actual: data.len(),
            });
        }
        let mut out = [0u8; 16];
        out.copy_from_slice(&data[..MIFARE_BLOCK_LEN]);
        Ok(out)
    }

    /// Write one 16-byte block. The sector must already be authenticated.
    pub fn mifare_classic_write_block(
        &mut self,
        profile: ClassicProfile,
        block: u16,
        data: &[u8; 16],
    ) -> Result<()> {
        let block = address::classic_block(profile, block)?;
        let mut apdu = Vec::with_capacity(2 + MIFARE_BLOCK_LEN);
        apdu.push(MIFARE_CMD_WRITE);
        apdu.push(block);
        apdu.extend_from_slice(data);
        self.transceive(&apdu).map(|_| ())
    }

    /// Turn a blank 1K card into an NFC Forum tag by writing the MAD blocks
    /// of sector 0. Sector 0 must be authenticated first.
    pub fn mifare_classic_format_ndef(&mut self) -> Result<()> {
        let profile = ClassicProfile::Classic1K;
        self.mifare_classic_write_block(profile, 1, &ndef::CLASSIC_MAD_BLOCK1)?;
        self.mifare_classic_write_block(profile, 2, &ndef::CLASSIC_MAD_BLOCK2)?;
        self.mifare_classic_write_block(profile, 3, &ndef::CLASSIC_MAD_TRAILER)
    }

    /// Write a URI record into NDEF sector 1..=15 of a formatted 1K card,
    /// then its trailer. The sector must be authenticated first.
    pub fn mifare_classic_write_ndef_uri(
        &mut self,
        sector: u16,
        uri_identifier: u8,
        url: &str,
    ) -> Result<()> {
        let sector = u16::from(address::ndef_sector(sector)?);
        let blocks = ndef::classic_uri_blocks(uri_identifier, url)?;
        let profile = ClassicProfile::Classic1K;
        let first = sector * 4;
        for (i, block) in blocks.iter().enumerate() {
            self.mifare_classic_write_block(profile, first + i as u16, block)?;
        }
        self.mifare_classic_write_block(profile, first + 3, &ndef::CLASSIC_NDEF_TRAILER)
    }
}
