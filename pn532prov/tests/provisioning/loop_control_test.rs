#[path = "../common/mod.rs"]
mod common;

use std::thread;
use std::time::Duration;

use pn532prov::config::ProvisioningConfig;
use pn532prov::device::Device;
use pn532prov::provisioning::{BootPath, CredentialStore, Credentials, Provisioner, Step, StopSignal};
use pn532prov::test_support::{
    self, CallLog, RecordingCloud, RecordingNetwork, RecordingStore, SharedTransport,
};
use pn532prov::transport::Transport;
use pn532prov::{Error, Result};

/// Raises `stop` once `frames` command frames have been written.
struct StopAfterFrames {
    inner: SharedTransport,
    stop: StopSignal,
    frames: usize,
}

impl Transport for StopAfterFrames {
    fn select(&mut self) -> Result<()> {
        self.inner.select()
    }

    fn deselect(&mut self) -> Result<()> {
        self.inner.deselect()?;
        if self.inner.sent().len() >= self.frames {
            self.stop.raise();
        }
        Ok(())
    }

    fn write_byte(&mut self, byte: u8) -> Result<()> {
        self.inner.write_byte(byte)
    }

    fn read_byte(&mut self) -> Result<u8> {
        self.inner.read_byte()
    }

    fn delay_ms(&mut self, ms: u32) {
        self.inner.delay_ms(ms)
    }
}

#[test]
fn stop_signal_ends_idle_loop() {
    common::init_logging();
    let (p, _shared, log) = common::provisioner_with(
        ProvisioningConfig::immediate().with_retry_delay(10),
    );
    let stop = StopSignal::new();
    let mut p = p.with_stop_signal(stop.clone());

    // no phone ever shows up: every cycle times out on enumeration
    let worker = thread::spawn(move || {
        p.run().unwrap();
        p
    });
    thread::sleep(Duration::from_millis(20));
    stop.raise();
    let p = worker.join().unwrap();
    assert!(log.calls().is_empty());
    assert!(!p.state().is_connected());
}

#[test]
fn stop_between_steps_releases_target() {
    let shared = SharedTransport::new(test_support::seeded_mock());
    let stop = StopSignal::new();
    // wake, firmware, SAM, enumeration, then two APDUs
    let bus = StopAfterFrames {
        inner: shared.clone(),
        stop: stop.clone(),
        frames: 6,
    };
    let device = Device::new_with_transport(Box::new(bus)).initialize().unwrap();
    let before = shared.sent().len();
    let log = CallLog::default();
    let mut p = Provisioner::with_config(
        device,
        RecordingNetwork::new(log.clone()),
        RecordingStore::new(log.clone()),
        RecordingCloud::new(log.clone()),
        ProvisioningConfig::immediate(),
    )
    .with_stop_signal(stop.clone());
    common::queue_tap(&shared, b"MyNetwork?Sup3rSecret");

    assert!(matches!(p.poll_once(), Err(Error::Stopped)));

    let frames = shared.sent();
    let exchanges = &frames[before + 1..];
    assert_eq!(exchanges.len(), 2);
    assert!(exchanges.len() < Step::SEQUENCE.len());
    let last = &exchanges[1];
    assert_eq!(
        &last[8..last.len() - 2],
        Step::SelectCapabilityContainer.apdu()
    );
    assert_eq!(p.device().inlisted_target(), None);
    assert!(log.calls().is_empty());
}

#[test]
fn loop_keeps_running_after_join_without_stop_after_join() {
    let (mut p, shared, log) = common::provisioner();
    let stop = p.stop_signal();
    common::queue_tap(&shared, b"first?one");
    common::queue_tap(&shared, b"second?two");

    // raise the stop once both taps have been consumed
    let watcher = {
        let shared = shared.clone();
        thread::spawn(move || {
            while shared.pending_responses() > 0 {
                thread::sleep(Duration::from_millis(1));
            }
            stop.raise();
        })
    };
    p.run().unwrap();
    watcher.join().unwrap();

    assert_eq!(log.count("connect"), 2);
    assert_eq!(p.state().credentials().unwrap().ssid(), "second");
}

#[test]
fn boot_with_stored_credentials_skips_nfc() {
    let (device, shared) = test_support::initialized_device();
    let log = CallLog::default();
    let stored = Credentials::new("home", "hunter22").unwrap();
    let mut p = Provisioner::new(
        device,
        RecordingNetwork::new(log.clone()),
        RecordingStore::provisioned(log.clone(), stored),
        RecordingCloud::new(log.clone()),
    );
    let sent_before = shared.sent().len();
    assert_eq!(p.start().unwrap(), BootPath::StoredCredentials);
    assert_eq!(shared.sent().len(), sent_before);
    assert_eq!(log.calls(), vec!["connect home", "cloud"]);
}

#[test]
fn boot_without_flag_runs_nfc_and_persists() {
    let (device, shared) = test_support::initialized_device();
    let log = CallLog::default();
    let store = RecordingStore::new(log.clone());
    let memory = store.memory().clone();
    let mut p = Provisioner::with_config(
        device,
        RecordingNetwork::new(log.clone()),
        store,
        RecordingCloud::new(log.clone()),
        ProvisioningConfig::immediate().with_stop_after_join(true),
    );
    common::queue_tap(&shared, b"MyNetwork?Sup3rSecret");

    assert_eq!(p.start().unwrap(), BootPath::Nfc);
    assert!(memory.is_provisioned());
    let mut reopened = memory.clone();
    assert_eq!(reopened.load_credentials().unwrap().unwrap().password(), "Sup3rSecret");
}
