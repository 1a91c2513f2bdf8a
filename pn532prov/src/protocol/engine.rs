// pn532prov/src/protocol/engine.rs
//! Command/ACK exchange state machine.

use derive_more::Display;
use log::debug;

use crate::protocol::link;
use crate::transport::Transport;
use crate::Result;

/// Progress of one command/ACK exchange.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExchangeState {
    /// Nothing sent yet.
    #[default]
    Idle,
    /// Command frame written.
    CommandSent,
    /// Waiting for the ACK to become readable.
    AwaitingReady1,
    /// ACK read and matched.
    AckValidated,
    /// Waiting for the response frame.
    AwaitingReady2,
    /// Response ready to be read.
    Complete,
    /// Timed out, wrong ACK or bus error.
    Failed,
}

/// Drives a single command through write -> ready -> ACK -> ready.
///
/// The engine never retries; once it reaches `Complete` the caller reads
/// the response frame with `link::read_frame`.
pub struct CommandExchange<'a, T: Transport + ?Sized> {
    transport: &'a mut T,
    ack_timeout_ms: u32,
    response_timeout_ms: u32,
    state: ExchangeState,
}

impl<'a, T: Transport + ?Sized> CommandExchange<'a, T> {
    /// Both readiness waits use `timeout_ms`.
    pub fn new(transport: &'a mut T, timeout_ms: u32) -> Self {
        Self {
            transport,
            ack_timeout_ms: timeout_ms,
            response_timeout_ms: timeout_ms,
            state: ExchangeState::Idle,
        }
    }

    /// Wait up to `ms` for the response once the ACK is in, e.g. while the
    /// controller searches the field for a target.
    pub fn with_response_timeout(mut self, ms: u32) -> Self {
        self.response_timeout_ms = ms;
        self
    }

    /// Where the exchange currently stands.
    pub fn state(&self) -> ExchangeState {
        self.state
    }

    fn transition(&mut self, next: ExchangeState) {
        debug!("exchange {} -> {}", self.state, next);
        self.state = next;
    }

    /// Run the exchange for `payload`. On error the state is `Failed`.
    pub fn run(&mut self, payload: &[u8]) -> Result<()> {
        if self.state != ExchangeState::Idle {
            self.transition(ExchangeState::Idle);
        }
        let result = self.drive(payload);
        if result.is_err() {
            self.transition(ExchangeState::Failed);
        }
        result
    }

    fn drive(&mut self, payload: &[u8]) -> Result<()> {
        link::write_command(&mut *self.transport, payload)?;
        self.transition(ExchangeState::CommandSent);

        self.transition(ExchangeState::AwaitingReady1);
        link::wait_ready(&mut *self.transport, self.ack_timeout_ms)?;

        link::read_ack(&mut *self.transport)?;
        self.transition(ExchangeState::AckValidated);

        self.transition(ExchangeState::AwaitingReady2);
        link::wait_ready(&mut *self.transport, self.response_timeout_ms)?;

        self.transition(ExchangeState::Complete);
        Ok(())
    }
}

/// Send a command and wait until its response is ready. Returns the final
/// engine state alongside the outcome for diagnostics.
pub fn send_command_check_ack<T: Transport + ?Sized>(
    t: &mut T,
    payload: &[u8],
    timeout_ms: u32,
) -> (ExchangeState, Result<()>) {
    send_command_with_timeouts(t, payload, timeout_ms, timeout_ms)
}

/// As `send_command_check_ack`, with separate budgets for the ACK and for
/// the response.
pub fn send_command_with_timeouts<T: Transport + ?Sized>(
    t: &mut T,
    payload: &[u8],
    ack_timeout_ms: u32,
    response_timeout_ms: u32,
) -> (ExchangeState, Result<()>) {
    let mut exchange =
        CommandExchange::new(t, ack_timeout_ms).with_response_timeout(response_timeout_ms);
    let result = exchange.run(payload);
    (exchange.state(), result)
}
