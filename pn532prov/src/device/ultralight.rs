// pn532prov/src/device/ultralight.rs
//! Mifare Ultralight and NTAG2xx page operations.

use crate::constants::{MIFARE_CMD_READ, MIFARE_PAGE_LEN, MIFARE_ULTRALIGHT_CMD_WRITE};
use crate::device::address;
use crate::device::handle::{Device, Initialized};
use crate::ndef;
use crate::{Error, Result};

impl Device<Initialized> {
    /// READ returns four pages; only the requested one is kept.
    fn read_page(&mut self, page: u8) -> Result<[u8; 4]> {
        let data = self.transceive(&[MIFARE_CMD_READ, page])?;
        if data.len() < MIFARE_PAGE_LEN {
            return Err(Error::InvalidLength {
                expected: MIFARE_PAGE_LEN,
                actual: data.len(),
            });
        }
        let mut out = [0u8; 4];
        out.copy_from_slice(&data[..MIFARE_PAGE_LEN]);
        Ok(out)
    }

    fn write_page(&mut self, page: u8, data: &[u8; 4]) -> Result<()> {
        let apdu = [
            MIFARE_ULTRALIGHT_CMD_WRITE,
            page,
            data[0],
            data[1],
            data[2],
            data[3],
        ];
        self.transceive(&apdu).map(|_| ())
    }

    /// Read one 4-byte page.
    pub fn mifare_ultralight_read_page(&mut self, page: u16) -> Result<[u8; 4]> {
        let page = address::ultralight_page(page)?;
        self.read_page(page)
    }

    /// Write one 4-byte page.
    pub fn mifare_ultralight_write_page(&mut self, page: u16, data: &[u8; 4]) -> Result<()> {
        let page = address::ultralight_page(page)?;
        self.write_page(page, data)
    }

    /// Read one 4-byte page; the tag answers 16 bytes and the rest is dropped.
    pub fn ntag2xx_read_page(&mut self, page: u16) -> Result<[u8; 4]> {
        let page = address::ntag2xx_read_page(page)?;
        self.read_page(page)
    }

    /// Pages 0-3 (serial, lock, capability container) are never written.
    pub fn ntag2xx_write_page(&mut self, page: u16, data: &[u8; 4]) -> Result<()> {
        let page = address::ntag2xx_write_page(page)?;
        self.write_page(page, data)
    }

    /// Write a URI record from page 4 on a tag whose user area is
    /// `data_len` bytes.
    pub fn ntag2xx_write_ndef_uri(
        &mut self,
        uri_identifier: u8,
        url: &str,
        data_len: usize,
    ) -> Result<()> {
        let pages = ndef::ntag_uri_pages(uri_identifier, url, data_len)?;
        for (i, page) in pages.iter().enumerate() {
            self.ntag2xx_write_page(address::NTAG2XX_MIN_WRITE_PAGE + i as u16, page)?;
        }
        Ok(())
    }
}
