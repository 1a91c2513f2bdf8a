// pn532prov/src/device/handle.rs
//! Type-state PN532 handle: initialization, enumeration and data exchange.

use std::marker::PhantomData;

use log::{debug, info, trace};

use crate::config::ReaderConfig;
use crate::constants::{MAX_APDU_LEN, PN532_FIRMWARE_SIGNATURE, PN532_STATUS_ERROR_MASK};
use crate::protocol::engine::{self, ExchangeState};
use crate::protocol::frame::Frame;
use crate::protocol::{codec, link, Command, Response};
use crate::transport::Transport;
use crate::types::{BaudRate, FirmwareVersion, TargetId, TargetInfo};
use crate::{Error, Result};

/// GetFirmwareVersion answer without postamble:
/// preamble(3) + LEN + LCS + TFI + code + IC/Ver/Rev/Support + DCS
const FIRMWARE_RESPONSE_LEN: usize = 12;

/// Type-state markers
pub struct Uninitialized;
/// SAM configured; commands may be sent.
pub struct Initialized;

/// PN532 handle that enforces initialization state at compile time.
///
/// Every operation takes `&mut self`: one command/ACK/response cycle is in
/// flight at a time and the inlisted target cannot change underneath it.
pub struct Device<State = Uninitialized> {
    transport: Box<dyn Transport + Send>,
    config: ReaderConfig,
    inlisted: Option<TargetId>,
    firmware: Option<FirmwareVersion>,
    last_exchange: ExchangeState,
    _state: PhantomData<State>,
}

fn unexpected(cmd: &Command, resp: &Response) -> Error {
    debug!("response {:?} does not answer {:?}", resp, cmd);
    Error::UnexpectedResponse {
        expected: cmd.code().wrapping_add(1),
        actual: resp.code(),
    }
}

impl Device<Uninitialized> {
    /// Create a Device from an existing Transport instance.
    pub fn new_with_transport(transport: Box<dyn Transport + Send>) -> Self {
        Self::with_config(transport, ReaderConfig::default())
    }

    /// Wrap a transport with explicit timeouts and retry counts.
    pub fn with_config(transport: Box<dyn Transport + Send>, config: ReaderConfig) -> Self {
        Self {
            transport,
            config,
            inlisted: None,
            firmware: None,
            last_exchange: ExchangeState::Idle,
            _state: PhantomData,
        }
    }

    /// Wake the controller, check its firmware signature and put the SAM in
    /// normal mode. Returns an initialized Device on success.
    pub fn initialize(mut self) -> Result<Device<Initialized>> {
        self.wake()?;
        let fw = self.firmware_version()?;
        info!("found {} (support {:#04x})", fw, fw.support);
        self.sam_configuration()?;

        Ok(Device {
            transport: self.transport,
            config: self.config,
            inlisted: None,
            firmware: Some(fw),
            last_exchange: self.last_exchange,
            _state: PhantomData,
        })
    }

    /// Hold select for the wake delay, then send a throwaway
    /// GetFirmwareVersion so the SPI state machine is in sync. Only bus
    /// errors from the select pulse are reported.
    fn wake(&mut self) -> Result<()> {
        self.transport.select()?;
        self.transport.delay_ms(self.config.wake_delay_ms);
        self.transport.deselect()?;

        let payload = Command::GetFirmwareVersion.encode()?;
        if let Err(e) = self.run_exchange(&payload, self.config.exchange_timeout_ms) {
            debug!("wake-up command ignored: {}", e);
        }
        Ok(())
    }
}

impl<S> Device<S> {
    /// Reader config in effect.
    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    /// Final engine state of the most recent command, for diagnostics.
    pub fn last_exchange_state(&self) -> ExchangeState {
        self.last_exchange
    }

    /// Sleep through the transport's delay.
    pub fn pause(&mut self, ms: u32) {
        if ms > 0 {
            self.transport.delay_ms(ms);
        }
    }

    fn run_exchange(&mut self, payload: &[u8], timeout_ms: u32) -> Result<()> {
        self.run_exchange_split(payload, timeout_ms, timeout_ms)
    }

    fn run_exchange_split(
        &mut self,
        payload: &[u8],
        ack_timeout_ms: u32,
        response_timeout_ms: u32,
    ) -> Result<()> {
        let (state, result) = engine::send_command_with_timeouts(
            &mut *self.transport,
            payload,
            ack_timeout_ms,
            response_timeout_ms,
        );
        self.last_exchange = state;
        result
    }

    /// Run one command through the ACK engine and decode its response.
    pub fn execute(&mut self, cmd: &Command, timeout_ms: u32) -> Result<Response> {
        self.execute_split(cmd, timeout_ms, timeout_ms)
    }

    fn execute_split(
        &mut self,
        cmd: &Command,
        ack_timeout_ms: u32,
        response_timeout_ms: u32,
    ) -> Result<Response> {
        let payload = cmd.encode()?;
        self.run_exchange_split(&payload, ack_timeout_ms, response_timeout_ms)?;
        let frame = link::read_frame(&mut *self.transport)?;
        codec::decode_response(cmd.code(), &frame)
    }

    /// GetFirmwareVersion. The frame header must match the fixed signature
    /// before the version bytes are used.
    pub fn firmware_version(&mut self) -> Result<FirmwareVersion> {
        let cmd = Command::GetFirmwareVersion;
        let payload = cmd.encode()?;
        self.run_exchange(&payload, self.config.exchange_timeout_ms)?;

        let raw = link::read_data(&mut *self.transport, FIRMWARE_RESPONSE_LEN)?;
        let sig_end = 1 + PN532_FIRMWARE_SIGNATURE.len();
        if raw[1..sig_end] != PN532_FIRMWARE_SIGNATURE {
            return Err(Error::FirmwareSignatureMismatch(raw[..sig_end].to_vec()));
        }

        let frame = Frame::decode(&raw)?;
        match codec::decode_response(cmd.code(), &frame)? {
            Response::FirmwareVersion(fw) => Ok(fw),
            other => Err(unexpected(&cmd, &other)),
        }
    }

    /// SAMConfiguration with the configured mode and timeout.
    pub fn sam_configuration(&mut self) -> Result<()> {
        let cmd = Command::SamConfiguration {
            mode: self.config.sam_mode,
            timeout: self.config.sam_timeout,
            use_irq: self.config.use_irq,
        };
        match self.execute(&cmd, self.config.exchange_timeout_ms)? {
            Response::SamConfiguration => Ok(()),
            other => Err(unexpected(&cmd, &other)),
        }
    }
}

impl Device<Initialized> {
    /// Firmware reported during initialization.
    pub fn firmware(&self) -> Option<FirmwareVersion> {
        self.firmware
    }

    /// Target selected by the last successful enumeration.
    pub fn inlisted_target(&self) -> Option<TargetId> {
        self.inlisted
    }

    /// Forget the inlisted target.
    pub fn release_target(&mut self) {
        self.inlisted = None;
    }

    /// Enumerate exactly one 106 kbps type A target and remember its tag
    /// number. Any failure leaves no target inlisted.
    pub fn in_list_passive_target(&mut self) -> Result<TargetId> {
        let timeout = self.config.enumeration_timeout_ms;
        self.enumerate(BaudRate::Iso14443A, timeout)
            .map(|info| info.target)
    }

    /// Enumerate one target at `baud` and return its identification
    /// (SENS_RES, SEL_RES, UID). The target is inlisted as well.
    pub fn read_passive_target_id(&mut self, baud: BaudRate, timeout_ms: u32) -> Result<TargetInfo> {
        self.enumerate(baud, timeout_ms)
    }

    /// The ACK is due within the exchange timeout; only the search for a
    /// target gets `timeout_ms`.
    fn enumerate(&mut self, baud: BaudRate, timeout_ms: u32) -> Result<TargetInfo> {
        self.inlisted = None;
        let cmd = Command::InListPassiveTarget {
            max_targets: 1,
            baud,
        };
        let ack_timeout = self.config.exchange_timeout_ms;
        match self.execute_split(&cmd, ack_timeout, timeout_ms)? {
            Response::InListPassiveTarget {
                count: 1,
                info: Some(info),
            } => {
                debug!(
                    "inlisted {} uid={} sens_res={:#06x} sel_res={:#04x}",
                    info.target,
                    info.uid.to_hex(),
                    info.sens_res,
                    info.sel_res
                );
                self.inlisted = Some(info.target);
                Ok(info)
            }
            Response::InListPassiveTarget { count, .. } => Err(Error::TargetCount(count)),
            other => Err(unexpected(&cmd, &other)),
        }
    }

    /// Send `apdu` to the inlisted target and copy its answer into
    /// `response`. Answers longer than `response` are truncated silently;
    /// the copied length is returned.
    pub fn in_data_exchange(&mut self, apdu: &[u8], response: &mut [u8]) -> Result<usize> {
        let data = self.transceive(apdu)?;
        let n = data.len().min(response.len());
        if n < data.len() {
            trace!("truncating {} byte answer to {}", data.len(), n);
        }
        response[..n].copy_from_slice(&data[..n]);
        Ok(n)
    }

    /// Send `apdu` to the inlisted target and return its answer. Fails
    /// before touching the bus if nothing is inlisted or the APDU is too
    /// long.
    pub fn transceive(&mut self, apdu: &[u8]) -> Result<Vec<u8>> {
        let target = self.inlisted.ok_or(Error::NoTargetInlisted)?;
        if apdu.len() > MAX_APDU_LEN {
            return Err(Error::PayloadTooLong {
                max: MAX_APDU_LEN,
                actual: apdu.len(),
            });
        }

        let cmd = Command::InDataExchange {
            target,
            data: apdu.to_vec(),
        };
        match self.execute(&cmd, self.config.exchange_timeout_ms)? {
            Response::InDataExchange { status, data } => {
                if status & PN532_STATUS_ERROR_MASK != 0 {
                    return Err(Error::DeviceStatus {
                        command: cmd.code(),
                        status,
                    });
                }
                Ok(data)
            }
            other => Err(unexpected(&cmd, &other)),
        }
    }
}
