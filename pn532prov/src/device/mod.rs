// pn532prov/src/device/mod.rs
//! High-level device API. Tag-specific operations live in `mifare` and
//! `ultralight` as further `impl Device<Initialized>` blocks.

pub mod address;
pub mod builder;
pub mod handle;
pub mod mifare;
pub mod ultralight;

pub use builder::DeviceBuilder;
pub use handle::{Device, Initialized, Uninitialized};
