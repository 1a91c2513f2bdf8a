//! Test support helpers intended for use by unit and integration tests.
//!
//! These helpers centralize the MockTransport seeding for the PN532 init
//! handshake so tests across the crate and the tests/ directory agree on
//! the exact frames the device expects.
#![allow(dead_code, missing_docs)]

use std::sync::{Arc, Mutex, MutexGuard};

use crate::constants::PN532_ACK;
use crate::device::{Device, Initialized};
use crate::protocol::frame::Frame;
use crate::provisioning::{CloudRunner, CredentialStore, Credentials, MemoryStore, NetworkJoin, ProvisioningState};
use crate::transport::{MockTransport, Transport};
use crate::{Error, Result};

/// ACK frame as queued on the mock.
#[doc(hidden)]
pub fn ack() -> Vec<u8> {
    PN532_ACK.to_vec()
}

/// Framed response bytes for a device-to-host payload.
#[doc(hidden)]
pub fn response_frame(payload: &[u8]) -> Vec<u8> {
    Frame::encode_response(payload).unwrap_or_default()
}

/// GetFirmwareVersion answer: PN532 (IC 0x32) firmware 1.6, all protocols.
#[doc(hidden)]
pub fn firmware_frame() -> Vec<u8> {
    response_frame(&[0x03, 0x32, 0x01, 0x06, 0x07])
}

#[doc(hidden)]
pub fn sam_frame() -> Vec<u8> {
    response_frame(&[0x15])
}

/// InListPassiveTarget answer: one ISO14443A target, Tg 1, UID DEADBEEF.
#[doc(hidden)]
pub fn one_target_payload() -> Vec<u8> {
    vec![
        0x4B, 0x01, 0x01, 0x00, 0x04, 0x08, 0x04, 0xDE, 0xAD, 0xBE, 0xEF,
    ]
}

/// Queue the init handshake: wake ACK, firmware ACK + answer, SAM ACK +
/// answer.
#[doc(hidden)]
pub fn seed_init(mock: &mut MockTransport) {
    mock.push_response(ack());
    mock.push_response(ack());
    mock.push_response(firmware_frame());
    mock.push_response(ack());
    mock.push_response(sam_frame());
}

/// A MockTransport that will get through `Device::initialize`.
#[doc(hidden)]
pub fn seeded_mock() -> MockTransport {
    let mut mock = MockTransport::new();
    seed_init(&mut mock);
    mock
}

/// Build a seeded MockTransport followed by the given raw responses and
/// return it boxed as a Transport trait object.
#[doc(hidden)]
pub fn boxed_mock_with_responses(responses: Vec<Vec<u8>>) -> Box<dyn Transport + Send> {
    let mut mock = seeded_mock();
    for resp in responses {
        mock.push_response(resp);
    }
    Box::new(mock)
}

/// Convenience: create and initialize a Device<Initialized> backed by a
/// seeded MockTransport with `responses` queued after the handshake.
#[doc(hidden)]
pub fn initialized_mock_device(responses: Vec<Vec<u8>>) -> Result<Device<Initialized>> {
    Device::new_with_transport(boxed_mock_with_responses(responses)).initialize()
}

/// Clonable handle onto one MockTransport so a test can keep inspecting the
/// bus after the device has taken ownership of its transport.
#[doc(hidden)]
#[derive(Clone, Default)]
pub struct SharedTransport(Arc<Mutex<MockTransport>>);

impl SharedTransport {
    pub fn new(mock: MockTransport) -> Self {
        Self(Arc::new(Mutex::new(mock)))
    }

    fn lock(&self) -> MutexGuard<'_, MockTransport> {
        // a panicking test may poison the lock; the mock is still usable
        self.0.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Run `f` against the underlying mock.
    pub fn with<R>(&self, f: impl FnOnce(&mut MockTransport) -> R) -> R {
        f(&mut self.lock())
    }

    /// Every frame written so far.
    pub fn sent(&self) -> Vec<Vec<u8>> {
        self.lock().sent.clone()
    }

    pub fn push_response(&self, resp: Vec<u8>) {
        self.lock().push_response(resp);
    }

    /// Queue the ACK and the framed answer for one command.
    pub fn push_ack_and_frame(&self, payload: &[u8]) {
        let mut mock = self.lock();
        mock.push_response(ack());
        mock.push_response(response_frame(payload));
    }

    pub fn status_polls(&self) -> usize {
        self.lock().status_polls
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.lock().elapsed_ms
    }

    pub fn pending_responses(&self) -> usize {
        self.lock().responses.len()
    }
}

impl Transport for SharedTransport {
    fn select(&mut self) -> Result<()> {
        self.lock().select()
    }

    fn deselect(&mut self) -> Result<()> {
        self.lock().deselect()
    }

    fn write_byte(&mut self, byte: u8) -> Result<()> {
        self.lock().write_byte(byte)
    }

    fn read_byte(&mut self) -> Result<u8> {
        self.lock().read_byte()
    }

    fn delay_ms(&mut self, ms: u32) {
        self.lock().delay_ms(ms)
    }
}

/// Initialized device with Tg 1 already inlisted, plus a handle on its bus.
#[doc(hidden)]
pub fn inlisted_device() -> (Device<Initialized>, SharedTransport) {
    let shared = SharedTransport::new(seeded_mock());
    shared.push_ack_and_frame(&one_target_payload());
    let mut device = match Device::new_with_transport(Box::new(shared.clone())).initialize() {
        Ok(d) => d,
        Err(e) => panic!("seeded init failed: {}", e),
    };
    if let Err(e) = device.in_list_passive_target() {
        panic!("seeded enumeration failed: {}", e);
    }
    (device, shared)
}

/// Initialized device with nothing inlisted, plus a handle on its bus.
#[doc(hidden)]
pub fn initialized_device() -> (Device<Initialized>, SharedTransport) {
    let shared = SharedTransport::new(seeded_mock());
    match Device::new_with_transport(Box::new(shared.clone())).initialize() {
        Ok(device) => (device, shared),
        Err(e) => panic!("seeded init failed: {}", e),
    }
}

/// NDEF file image the phone app serves for `text`: NLEN, then one short
/// well-known Text record with status byte `02` and language `en`.
#[doc(hidden)]
pub fn text_record_image(text: &[u8]) -> Vec<u8> {
    let payload_len = 3 + text.len();
    let nlen = (4 + payload_len) as u16;
    let mut image = nlen.to_be_bytes().to_vec();
    image.extend_from_slice(&[0xD1, 0x01, payload_len as u8, 0x54, 0x02, b'e', b'n']);
    image.extend_from_slice(text);
    image
}

/// InDataExchange answer to the payload read: the text record image, then
/// SW 90 00.
#[doc(hidden)]
pub fn payload_answer(text: &[u8]) -> Vec<u8> {
    let mut answer = vec![0x41, 0x00];
    answer.extend(text_record_image(text));
    answer.extend_from_slice(&[0x90, 0x00]);
    answer
}

/// Queue everything one successful tap needs: the enumeration answer, five
/// `90 00` step answers and the payload answer carrying `text`.
#[doc(hidden)]
pub fn queue_tap(shared: &SharedTransport, text: &[u8]) {
    shared.push_ack_and_frame(&one_target_payload());
    for _ in 0..5 {
        shared.push_ack_and_frame(&[0x41, 0x00, 0x90, 0x00]);
    }
    shared.push_ack_and_frame(&payload_answer(text));
}

/// Ordered record of collaborator calls, shared between recorders.
#[doc(hidden)]
#[derive(Debug, Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
    pub fn record(&self, call: impl Into<String>) {
        self.0
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(call.into());
    }

    pub fn calls(&self) -> Vec<String> {
        self.0.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Calls starting with `prefix`.
    pub fn count(&self, prefix: &str) -> usize {
        self.calls().iter().filter(|c| c.starts_with(prefix)).count()
    }
}

/// Network join that logs `connect <ssid>` and can refuse one SSID.
#[doc(hidden)]
#[derive(Debug, Clone)]
pub struct RecordingNetwork {
    log: CallLog,
    refuse: Option<String>,
}

impl RecordingNetwork {
    pub fn new(log: CallLog) -> Self {
        Self { log, refuse: None }
    }

    pub fn failing_for(mut self, ssid: &str) -> Self {
        self.refuse = Some(ssid.to_string());
        self
    }
}

impl NetworkJoin for RecordingNetwork {
    fn connect(&mut self, credentials: &Credentials) -> Result<()> {
        self.log.record(format!("connect {}", credentials.ssid()));
        if self.refuse.as_deref() == Some(credentials.ssid()) {
            return Err(Error::Collaborator(format!(
                "association with {} refused",
                credentials.ssid()
            )));
        }
        Ok(())
    }
}

/// MemoryStore that logs the write calls.
#[doc(hidden)]
#[derive(Debug, Clone)]
pub struct RecordingStore {
    log: CallLog,
    inner: MemoryStore,
}

impl RecordingStore {
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            inner: MemoryStore::new(),
        }
    }

    pub fn provisioned(log: CallLog, credentials: Credentials) -> Self {
        Self {
            log,
            inner: MemoryStore::provisioned(credentials),
        }
    }

    pub fn memory(&self) -> &MemoryStore {
        &self.inner
    }
}

impl CredentialStore for RecordingStore {
    fn store_credentials(&mut self, credentials: &Credentials) -> Result<()> {
        self.log.record("store_credentials");
        self.inner.store_credentials(credentials)
    }

    fn load_credentials(&mut self) -> Result<Option<Credentials>> {
        self.inner.load_credentials()
    }

    fn provisioning_flag(&mut self) -> Result<bool> {
        self.inner.provisioning_flag()
    }

    fn set_provisioning_flag(&mut self) -> Result<()> {
        self.log.record("set_provisioning_flag");
        self.inner.set_provisioning_flag()
    }
}

/// Cloud runner that logs `cloud` and checks it is only run online.
#[doc(hidden)]
#[derive(Debug, Clone)]
pub struct RecordingCloud {
    log: CallLog,
}

impl RecordingCloud {
    pub fn new(log: CallLog) -> Self {
        Self { log }
    }
}

impl CloudRunner for RecordingCloud {
    fn run(&mut self, state: &ProvisioningState) -> Result<()> {
        if !state.is_connected() {
            return Err(Error::Collaborator("cloud runner started offline".into()));
        }
        self.log.record("cloud");
        Ok(())
    }
}
