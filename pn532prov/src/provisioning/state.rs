// pn532prov/src/provisioning/state.rs
//! What the device currently knows about its Wi-Fi connection.

use crate::provisioning::credentials::Credentials;

/// What the provisioning loop knows about the network. Passed by reference
/// to the cloud runner.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProvisioningState {
    credentials: Option<Credentials>,
    connected: bool,
    retired: bool,
}

impl ProvisioningState {
    /// Nothing parsed, not connected.
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recently read credentials.
    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    /// Replace the held pair; a fresh pair is live again until joined.
    pub fn set_credentials(&mut self, credentials: Credentials) {
        self.credentials = Some(credentials);
        self.retired = false;
    }

    /// Wi-Fi status for the cloud runner.
    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// True once the held credentials have been used for a successful join.
    pub fn is_retired(&self) -> bool {
        self.retired
    }

    pub(crate) fn mark_joined(&mut self) {
        self.connected = true;
        self.retired = true;
    }

    pub(crate) fn mark_disconnected(&mut self) {
        self.connected = false;
    }
}
