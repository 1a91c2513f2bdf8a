// pn532prov/src/prelude.rs
//! Convenience re-exports.

pub use crate::config::{ProvisioningConfig, ReaderConfig};
pub use crate::device::{Device, DeviceBuilder, Initialized, Uninitialized};
pub use crate::protocol::{Command, ExchangeState, Frame, FrameError, Response};
pub use crate::provisioning::{
    BootPath, CloudRunner, CredentialError, CredentialParser, CredentialStore, Credentials,
    CycleOutcome, CycleReport, MemoryStore, NetworkJoin, Provisioner, ProvisioningState,
    StopSignal,
};
pub use crate::transport::{BitBangSpi, MockTransport, Transport};
pub use crate::{
    BaudRate, ClassicProfile, Error, ErrorKind, FirmwareVersion, KeyType, Result, SamMode,
    TagKind, TargetId, TargetInfo, Uid,
};

// Re-export small utilities for convenience
pub use crate::utils::{ascii_preview, bytes_to_hex, bytes_to_hex_spaced};
