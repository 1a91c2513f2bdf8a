// pn532prov/src/transport/bitbang.rs
//! Software SPI over `embedded-hal` pins.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use crate::transport::traits::Transport;
use crate::{Error, Result};

/// Wait after asserting chip select before the first clock edge.
pub const DEFAULT_SELECT_SETTLE_MS: u32 = 10;

/// Software SPI over four GPIO lines, LSB first, clock idling high.
///
/// Owns the pins for its whole lifetime; the device handle in turn owns the
/// transport, so no other code can drive the bus concurrently.
pub struct BitBangSpi<SCK, MISO, MOSI, SS, D> {
    sck: SCK,
    miso: MISO,
    mosi: MOSI,
    ss: SS,
    delay: D,
    select_settle_ms: u32,
}

fn bus_err<E: core::fmt::Debug>(e: E) -> Error {
    Error::Bus(format!("{:?}", e))
}

impl<SCK, MISO, MOSI, SS, D> BitBangSpi<SCK, MISO, MOSI, SS, D>
where
    SCK: OutputPin,
    MISO: InputPin,
    MOSI: OutputPin,
    SS: OutputPin,
    D: DelayNs,
{
    /// Take ownership of the bus pins and park them in the idle state
    /// (clock high, select released).
    pub fn new(mut sck: SCK, miso: MISO, mosi: MOSI, mut ss: SS, delay: D) -> Result<Self> {
        ss.set_high().map_err(bus_err)?;
        sck.set_high().map_err(bus_err)?;
        Ok(Self {
            sck,
            miso,
            mosi,
            ss,
            delay,
            select_settle_ms: DEFAULT_SELECT_SETTLE_MS,
        })
    }

    /// Pause after asserting select, in milliseconds.
    pub fn with_select_settle(mut self, ms: u32) -> Self {
        self.select_settle_ms = ms;
        self
    }

    /// Give the pins back.
    pub fn release(self) -> (SCK, MISO, MOSI, SS, D) {
        (self.sck, self.miso, self.mosi, self.ss, self.delay)
    }
}

impl<SCK, MISO, MOSI, SS, D> Transport for BitBangSpi<SCK, MISO, MOSI, SS, D>
where
    SCK: OutputPin,
    MISO: InputPin,
    MOSI: OutputPin,
    SS: OutputPin,
    D: DelayNs,
{
    fn select(&mut self) -> Result<()> {
        self.ss.set_low().map_err(bus_err)?;
        self.delay.delay_ms(self.select_settle_ms);
        Ok(())
    }

    fn deselect(&mut self) -> Result<()> {
        self.ss.set_high().map_err(bus_err)
    }

    fn write_byte(&mut self, byte: u8) -> Result<()> {
        self.sck.set_high().map_err(bus_err)?;
        for bit in 0..8 {
            self.sck.set_low().map_err(bus_err)?;
            if byte & (1 << bit) != 0 {
                self.mosi.set_high().map_err(bus_err)?;
            } else {
                self.mosi.set_low().map_err(bus_err)?;
            }
            self.sck.set_high().map_err(bus_err)?;
        }
        Ok(())
    }

    fn read_byte(&mut self) -> Result<u8> {
        let mut x = 0u8;
        self.sck.set_high().map_err(bus_err)?;
        for bit in 0..8 {
            if self.miso.is_high().map_err(bus_err)? {
                x |= 1 << bit;
            }
            self.sck.set_low().map_err(bus_err)?;
            self.sck.set_high().map_err(bus_err)?;
        }
        Ok(x)
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }
}
