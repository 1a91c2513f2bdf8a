// pn532prov/src/device/builder.rs
//! Builder assembling a `Device` from a transport and a `ReaderConfig`.

use crate::config::ReaderConfig;
use crate::device::handle::{Device, Initialized, Uninitialized};
use crate::transport::Transport;
use crate::{Error, Result};

/// Helper to construct a Device with optional configuration.
#[derive(Default)]
pub struct DeviceBuilder {
    transport: Option<Box<dyn Transport + Send>>,
    config: ReaderConfig,
}

impl DeviceBuilder {
    /// Builder with the default reader config and no transport.
    pub fn new() -> Self {
        Self::default()
    }

    /// Provide the bus transport (e.g. `BitBangSpi` or `MockTransport`).
    pub fn with_transport(mut self, transport: Box<dyn Transport + Send>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Replace the reader config.
    pub fn with_config(mut self, config: ReaderConfig) -> Self {
        self.config = config;
        self
    }

    /// Consume the builder and return an uninitialized Device.
    pub fn build_uninitialized(self) -> Result<Device<Uninitialized>> {
        match self.transport {
            Some(t) => Ok(Device::with_config(t, self.config)),
            None => Err(Error::InvalidArgument("no transport configured".into())),
        }
    }

    /// Build and run the wake/firmware/SAM sequence.
    pub fn build(self) -> Result<Device<Initialized>> {
        self.build_uninitialized()?.initialize()
    }
}
