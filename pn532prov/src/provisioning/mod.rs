// pn532prov/src/provisioning/mod.rs
//! Tap-to-provision: read Wi-Fi credentials from a phone emulating a Type 4
//! tag and hand them to the network and storage collaborators.

pub mod apdu;
pub mod collaborators;
pub mod credentials;
pub mod machine;
pub mod state;
pub mod stop;

pub use apdu::Step;
pub use collaborators::{CloudRunner, CredentialStore, MemoryStore, NetworkJoin};
pub use credentials::{CredentialError, CredentialParser, Credentials};
pub use machine::{BootPath, CycleOutcome, CycleReport, Provisioner, StepOutcome};
pub use state::ProvisioningState;
pub use stop::StopSignal;
