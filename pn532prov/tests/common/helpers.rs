// helpers.rs - device/provisioner construction shared by the test files

use pn532prov::config::{ProvisioningConfig, ReaderConfig};
use pn532prov::provisioning::Provisioner;
use pn532prov::test_support::{self, CallLog, RecordingCloud, RecordingNetwork, RecordingStore, SharedTransport};
use pn532prov::{Device, Initialized, Result};

pub use pn532prov::test_support::{initialized_mock_device, payload_answer, queue_tap, seed_init};

pub type TestProvisioner = Provisioner<RecordingNetwork, RecordingStore, RecordingCloud>;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Initialized device over a shared mock using `config`.
pub fn device_with_config(config: ReaderConfig) -> Result<(Device<Initialized>, SharedTransport)> {
    let shared = SharedTransport::new(test_support::seeded_mock());
    let device = Device::with_config(Box::new(shared.clone()), config).initialize()?;
    Ok((device, shared))
}

/// Provisioner with recording collaborators and no delays.
pub fn provisioner() -> (TestProvisioner, SharedTransport, CallLog) {
    provisioner_with(ProvisioningConfig::immediate())
}

pub fn provisioner_with(config: ProvisioningConfig) -> (TestProvisioner, SharedTransport, CallLog) {
    init_logging();
    let (device, shared) = test_support::initialized_device();
    let log = CallLog::default();
    let p = Provisioner::with_config(
        device,
        RecordingNetwork::new(log.clone()),
        RecordingStore::new(log.clone()),
        RecordingCloud::new(log.clone()),
        config,
    );
    (p, shared, log)
}
