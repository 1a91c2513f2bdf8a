// pn532prov/src/provisioning/collaborators.rs
//! Narrow interfaces onto the services the provisioning loop hands off to.
//! Implementations report their own failures as `Error::Collaborator`.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::provisioning::credentials::Credentials;
use crate::provisioning::state::ProvisioningState;
use crate::Result;

/// Wi-Fi station join.
pub trait NetworkJoin {
    /// Join the network; returns once the station has an address.
    fn connect(&mut self, credentials: &Credentials) -> Result<()>;
}

/// Persistent key-value storage for the credential pair and the
/// "already provisioned" flag.
pub trait CredentialStore {
    /// Persist the pair, replacing any earlier one.
    fn store_credentials(&mut self, credentials: &Credentials) -> Result<()>;

    /// Credentials written by an earlier provisioning, if any.
    fn load_credentials(&mut self) -> Result<Option<Credentials>>;

    /// Whether a previous tap completed provisioning.
    fn provisioning_flag(&mut self) -> Result<bool>;

    /// Mark provisioning as done.
    fn set_provisioning_flag(&mut self) -> Result<()>;
}

/// Whatever runs once the device is online (the MQTT demo on hardware).
pub trait CloudRunner {
    /// Take over after a successful join.
    fn run(&mut self, state: &ProvisioningState) -> Result<()>;
}

impl<T: NetworkJoin + ?Sized> NetworkJoin for Box<T> {
    fn connect(&mut self, credentials: &Credentials) -> Result<()> {
        (**self).connect(credentials)
    }
}

impl<T: CredentialStore + ?Sized> CredentialStore for Box<T> {
    fn store_credentials(&mut self, credentials: &Credentials) -> Result<()> {
        (**self).store_credentials(credentials)
    }

    fn load_credentials(&mut self) -> Result<Option<Credentials>> {
        (**self).load_credentials()
    }

    fn provisioning_flag(&mut self) -> Result<bool> {
        (**self).provisioning_flag()
    }

    fn set_provisioning_flag(&mut self) -> Result<()> {
        (**self).set_provisioning_flag()
    }
}

impl<T: CloudRunner + ?Sized> CloudRunner for Box<T> {
    fn run(&mut self, state: &ProvisioningState) -> Result<()> {
        (**self).run(state)
    }
}

/// In-memory store. Clones share the same contents, so a test or a demo can
/// keep a handle after giving one to the provisioner.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<MemoryStoreInner>>,
}

#[derive(Debug, Default)]
struct MemoryStoreInner {
    credentials: Option<Credentials>,
    provisioned: bool,
}

impl MemoryStore {
    /// Empty store, flag cleared.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `credentials` with the flag set.
    pub fn provisioned(credentials: Credentials) -> Self {
        let store = Self::default();
        {
            let mut inner = store.lock();
            inner.credentials = Some(credentials);
            inner.provisioned = true;
        }
        store
    }

    fn lock(&self) -> MutexGuard<'_, MemoryStoreInner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Last saved credentials.
    pub fn credentials(&self) -> Option<Credentials> {
        self.lock().credentials.clone()
    }

    /// Whether the provisioning flag is set.
    pub fn is_provisioned(&self) -> bool {
        self.lock().provisioned
    }
}

impl CredentialStore for MemoryStore {
    fn store_credentials(&mut self, credentials: &Credentials) -> Result<()> {
        self.lock().credentials = Some(credentials.clone());
        Ok(())
    }

    fn load_credentials(&mut self) -> Result<Option<Credentials>> {
        Ok(self.lock().credentials.clone())
    }

    fn provisioning_flag(&mut self) -> Result<bool> {
        Ok(self.lock().provisioned)
    }

    fn set_provisioning_flag(&mut self) -> Result<()> {
        self.lock().provisioned = true;
        Ok(())
    }
}
