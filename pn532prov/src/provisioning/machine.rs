// pn532prov/src/provisioning/machine.rs
//! The provisioning loop.

use log::{debug, info, trace, warn};

use crate::config::ProvisioningConfig;
use crate::constants::MAX_APDU_RESPONSE_LEN;
use crate::device::{Device, Initialized};
use crate::provisioning::apdu::Step;
use crate::provisioning::collaborators::{CloudRunner, CredentialStore, NetworkJoin};
use crate::provisioning::credentials::{CredentialError, CredentialParser, Credentials};
use crate::provisioning::state::ProvisioningState;
use crate::provisioning::stop::StopSignal;
use crate::types::TargetId;
use crate::utils::bytes_to_hex_spaced;
use crate::{Error, Result};

/// Result of one APDU step.
#[derive(Debug)]
pub struct StepOutcome {
    /// Which APDU was sent.
    pub step: Step,
    /// Exchange data (SW1 SW2 included) or the failure.
    pub result: Result<Vec<u8>>,
}

impl StepOutcome {
    /// Exchange completed, whatever the status word.
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// How a cycle that reached the APDU dialogue ended.
#[derive(Debug)]
pub enum CycleOutcome {
    /// Credentials parsed, stored and joined.
    Joined(Credentials),
    /// The payload read failed; nothing was parsed.
    NoPayload,
    /// The payload did not hold a usable credential pair.
    ParseFailed(CredentialError),
    /// Credentials parsed but storing or joining failed.
    JoinFailed(Error),
}

impl CycleOutcome {
    /// The cycle ended with a network join.
    pub fn is_joined(&self) -> bool {
        matches!(self, CycleOutcome::Joined(_))
    }
}

/// Everything one pass over the tag produced.
#[derive(Debug)]
pub struct CycleReport {
    /// Phone that was tapped.
    pub target: TargetId,
    /// One entry per APDU sent, in order.
    pub steps: Vec<StepOutcome>,
    /// How the cycle ended.
    pub outcome: CycleOutcome,
}

impl CycleReport {
    /// Answer of the payload read, if it succeeded.
    pub fn payload(&self) -> Option<&[u8]> {
        self.steps
            .iter()
            .find(|s| s.step.gates_parsing())
            .and_then(|s| s.result.as_ref().ok())
            .map(Vec::as_slice)
    }

    /// Steps whose exchange failed.
    pub fn failed_steps(&self) -> impl Iterator<Item = &StepOutcome> {
        self.steps.iter().filter(|s| !s.is_success())
    }
}

/// How `start` got the device online.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootPath {
    /// Joined with credentials from a previous provisioning.
    StoredCredentials,
    /// Ran the NFC loop.
    Nfc,
}

/// Tap-to-provision loop: enumerate a phone, read its NDEF message, parse
/// the credentials out of it, persist them and join the network.
pub struct Provisioner<N, S, C> {
    device: Device<Initialized>,
    network: N,
    store: S,
    cloud: C,
    config: ProvisioningConfig,
    parser: CredentialParser,
    state: ProvisioningState,
    stop: StopSignal,
}

impl<N, S, C> Provisioner<N, S, C>
where
    N: NetworkJoin,
    S: CredentialStore,
    C: CloudRunner,
{
    /// Loop over an initialized reader with the default config.
    pub fn new(device: Device<Initialized>, network: N, store: S, cloud: C) -> Self {
        Self::with_config(device, network, store, cloud, ProvisioningConfig::default())
    }

    /// Loop with an explicit provisioning config.
    pub fn with_config(
        device: Device<Initialized>,
        network: N,
        store: S,
        cloud: C,
        config: ProvisioningConfig,
    ) -> Self {
        Self {
            device,
            network,
            store,
            cloud,
            parser: CredentialParser::from_config(&config),
            config,
            state: ProvisioningState::new(),
            stop: StopSignal::new(),
        }
    }

    /// Use an externally owned stop flag.
    pub fn with_stop_signal(mut self, stop: StopSignal) -> Self {
        self.stop = stop;
        self
    }

    /// Handle that stops `run` from another thread.
    pub fn stop_signal(&self) -> StopSignal {
        self.stop.clone()
    }

    /// Credentials and connection flags gathered so far.
    pub fn state(&self) -> &ProvisioningState {
        &self.state
    }

    /// Active provisioning config.
    pub fn config(&self) -> &ProvisioningConfig {
        &self.config
    }

    /// The reader handle.
    pub fn device(&self) -> &Device<Initialized> {
        &self.device
    }

    /// Mutable reader handle, e.g. for tag operations between cycles.
    pub fn device_mut(&mut self) -> &mut Device<Initialized> {
        &mut self.device
    }

    /// Drop the loop and keep the reader.
    pub fn into_device(self) -> Device<Initialized> {
        self.device
    }

    /// Boot entry point. A device provisioned earlier joins with its stored
    /// credentials; otherwise, or if that join fails, the NFC loop runs.
    pub fn start(&mut self) -> Result<BootPath> {
        match self.stored_credentials() {
            Ok(Some(creds)) => {
                info!("already provisioned, joining {:?}", creds.ssid());
                self.state.set_credentials(creds.clone());
                match self.network.connect(&creds) {
                    Ok(()) => {
                        self.state.mark_joined();
                        self.run_cloud();
                        return Ok(BootPath::StoredCredentials);
                    }
                    Err(e) => {
                        self.state.mark_disconnected();
                        warn!("stored credentials did not join: {}", e);
                    }
                }
            }
            Ok(None) => {}
            Err(e) => warn!("could not read stored credentials: {}", e),
        }

        self.run()?;
        Ok(BootPath::Nfc)
    }

    fn stored_credentials(&mut self) -> Result<Option<Credentials>> {
        if !self.store.provisioning_flag()? {
            return Ok(None);
        }
        let creds = self.store.load_credentials()?;
        if creds.is_none() {
            warn!("provisioning flag set but no credentials stored");
        }
        Ok(creds)
    }

    /// Poll for taps until the stop signal is raised, or, with
    /// `stop_after_join`, until one cycle has joined the network. Failed
    /// cycles are logged and retried after the retry delay.
    pub fn run(&mut self) -> Result<()> {
        info!("waiting for a phone tap");
        loop {
            match self.poll_once() {
                Ok(report) => {
                    if report.outcome.is_joined() && self.config.stop_after_join {
                        return Ok(());
                    }
                }
                Err(Error::Stopped) => {
                    info!("provisioning loop stopped");
                    return Ok(());
                }
                Err(e) if e.is_recoverable() => debug!("cycle aborted ({:?}): {}", e.kind(), e),
                Err(e) => return Err(e),
            }

            if self.stop.is_raised() {
                info!("provisioning loop stopped");
                return Ok(());
            }
            self.device.pause(self.config.retry_delay_ms);
        }
    }

    /// One cycle: enumerate, then run every APDU step. A failed enumeration
    /// aborts the cycle with its error. Step failures are recorded and the
    /// sequence carries on; only the payload read decides whether parsing
    /// happens. `Error::Stopped` is returned if the stop signal is seen
    /// before or between steps.
    pub fn poll_once(&mut self) -> Result<CycleReport> {
        self.check_stop()?;

        let target = match self.device.in_list_passive_target() {
            Ok(target) => target,
            Err(e) => {
                warn!("could not inlist target: {}", e);
                return Err(e);
            }
        };
        info!("inlisted {}", target);
        self.device.pause(self.config.settle_delay_ms);

        let mut steps = Vec::with_capacity(Step::SEQUENCE.len());
        for step in Step::SEQUENCE {
            if let Err(e) = self.check_stop() {
                self.device.release_target();
                return Err(e);
            }
            let outcome = self.run_step(step);
            steps.push(outcome);
        }

        let mut report = CycleReport {
            target,
            steps,
            outcome: CycleOutcome::NoPayload,
        };
        let outcome = match report.payload() {
            Some(answer) => self.provision(answer),
            None => {
                warn!("no NDEF payload this cycle");
                CycleOutcome::NoPayload
            }
        };
        report.outcome = outcome;
        self.device.release_target();
        Ok(report)
    }

    fn check_stop(&self) -> Result<()> {
        if self.stop.is_raised() {
            Err(Error::Stopped)
        } else {
            Ok(())
        }
    }

    fn run_step(&mut self, step: Step) -> StepOutcome {
        let mut buf = [0u8; MAX_APDU_RESPONSE_LEN];
        let result = self
            .device
            .in_data_exchange(step.apdu(), &mut buf)
            .map(|n| buf[..n].to_vec());
        match &result {
            Ok(data) => {
                debug!("{}: ok, {} bytes", step, data.len());
                trace!("{}: {}", step, bytes_to_hex_spaced(data));
                self.device.pause(self.config.step_delay_ms);
            }
            Err(e) => warn!("{}: {}", step, e),
        }
        StepOutcome { step, result }
    }

    fn provision(&mut self, answer: &[u8]) -> CycleOutcome {
        let creds = match self.parser.parse(answer) {
            Ok(creds) => creds,
            Err(e) => {
                warn!("payload did not hold credentials: {}", e);
                return CycleOutcome::ParseFailed(e);
            }
        };
        info!("received {:?}", creds);
        self.state.set_credentials(creds.clone());

        match self.join(&creds) {
            Ok(()) => {
                info!("joined {:?}", creds.ssid());
                self.run_cloud();
                CycleOutcome::Joined(creds)
            }
            Err(e) => {
                warn!("join failed: {}", e);
                CycleOutcome::JoinFailed(e)
            }
        }
    }

    // The flag is set before the join is attempted.
    fn join(&mut self, creds: &Credentials) -> Result<()> {
        self.store.store_credentials(creds)?;
        self.store.set_provisioning_flag()?;
        match self.network.connect(creds) {
            Ok(()) => {
                self.state.mark_joined();
                Ok(())
            }
            Err(e) => {
                self.state.mark_disconnected();
                Err(e)
            }
        }
    }

    fn run_cloud(&mut self) {
        if let Err(e) = self.cloud.run(&self.state) {
            warn!("cloud runner failed: {}", e);
        }
    }
}
