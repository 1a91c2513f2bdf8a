// pn532prov/src/transport/traits.rs
//! The `Transport` trait every bus implements.

use crate::Result;

/// Transport trait abstracts the synchronous serial bus away from the
/// link protocol. Bytes are clocked least-significant bit first.
pub trait Transport {
    /// Assert chip select (active low) to open a transaction.
    fn select(&mut self) -> Result<()>;

    /// Release chip select, closing the transaction.
    fn deselect(&mut self) -> Result<()>;

    /// Clock one byte out to the controller.
    fn write_byte(&mut self, byte: u8) -> Result<()>;

    /// Clock one byte in from the controller.
    fn read_byte(&mut self) -> Result<u8>;

    /// Sleep for `ms` milliseconds. Every polling loop waits through here so
    /// simulators can advance a virtual clock instead of sleeping.
    fn delay_ms(&mut self, ms: u32);

    /// Write every byte of `data` in order. Default implementation loops over
    /// `write_byte`.
    fn write_all(&mut self, data: &[u8]) -> Result<()> {
        for &b in data {
            self.write_byte(b)?;
        }
        Ok(())
    }

    /// Fill `buf` from the bus. Default implementation loops over
    /// `read_byte`.
    fn read_into(&mut self, buf: &mut [u8]) -> Result<()> {
        for slot in buf.iter_mut() {
            *slot = self.read_byte()?;
        }
        Ok(())
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn select(&mut self) -> Result<()> {
        (**self).select()
    }

    fn deselect(&mut self) -> Result<()> {
        (**self).deselect()
    }

    fn write_byte(&mut self, byte: u8) -> Result<()> {
        (**self).write_byte(byte)
    }

    fn read_byte(&mut self) -> Result<u8> {
        (**self).read_byte()
    }

    fn delay_ms(&mut self, ms: u32) {
        (**self).delay_ms(ms)
    }

    fn write_all(&mut self, data: &[u8]) -> Result<()> {
        (**self).write_all(data)
    }

    fn read_into(&mut self, buf: &mut [u8]) -> Result<()> {
        (**self).read_into(buf)
    }
}
