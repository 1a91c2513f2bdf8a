// pn532prov/src/error.rs
//! Crate-wide error type and its coarse classification.

use thiserror::Error;

use crate::protocol::frame::FrameError;
use crate::provisioning::credentials::CredentialError;
use crate::types::TagKind;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    /// The controller did not signal ready in time.
    #[error("operation timed out")]
    Timeout,

    /// A response frame failed to decode.
    #[error("frame error: {0}")]
    Frame(#[from] FrameError),

    /// The six bytes read after a command were not an ACK.
    #[error("ack mismatch: got {0:02x?}")]
    AckMismatch(Vec<u8>),

    /// The firmware answer header was not `00 FF 06 FA D5 03`.
    #[error("firmware signature mismatch: got {0:02x?}")]
    FirmwareSignatureMismatch(Vec<u8>),

    /// A response was shorter than its layout needs.
    #[error("invalid packet length: expected {expected}, got {actual}")]
    InvalidLength {
        /// Bytes required.
        expected: usize,
        /// Bytes received.
        actual: usize,
    },

    /// Outgoing payload or APDU over the frame limit; nothing was sent.
    #[error("payload too long: max {max}, got {actual}")]
    PayloadTooLong {
        /// Largest accepted length.
        max: usize,
        /// Length given.
        actual: usize,
    },

    /// The response code does not answer the command sent.
    #[error("unexpected response code: expected {expected:#04x}, got {actual:#04x}")]
    UnexpectedResponse {
        /// Command code + 1.
        expected: u8,
        /// Code received.
        actual: u8,
    },

    /// The controller reported a non-zero status for the command.
    #[error("device status error for command {command:#04x}: status={status:#04x}")]
    DeviceStatus {
        /// Command code.
        command: u8,
        /// Raw status byte.
        status: u8,
    },

    /// Enumeration found a number of targets other than one.
    #[error("expected exactly one target, device reported {0}")]
    TargetCount(u8),

    /// A tag operation was attempted with no target inlisted.
    #[error("no target inlisted")]
    NoTargetInlisted,

    /// Block or page number outside the tag's range.
    #[error("{tag} address {address} out of range ({min}..={max})")]
    AddressOutOfRange {
        /// Tag family whose range was checked.
        tag: TagKind,
        /// Requested block or page.
        address: u16,
        /// Lowest valid address.
        min: u16,
        /// Highest valid address.
        max: u16,
    },

    /// Caller input the operation cannot use.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A pin or bus operation failed.
    #[error("bus error: {0}")]
    Bus(String),

    /// The tag text did not hold usable credentials.
    #[error("credential error: {0}")]
    Credential(#[from] CredentialError),

    /// The network, store or cloud collaborator failed.
    #[error("collaborator error: {0}")]
    Collaborator(String),

    /// The stop signal was raised.
    #[error("stopped")]
    Stopped,
}

/// Coarse classification used by callers deciding whether to retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Readiness never reached within the budget.
    Timeout,
    /// Preamble/checksum/ACK problems; the response is treated as absent.
    FrameIntegrity,
    /// The device answered but reported an operation-specific failure.
    ProtocolStatus,
    /// Block or page outside the tag's address space; no bus traffic sent.
    AddressRange,
    /// Called in a state where the operation is meaningless.
    Precondition,
    /// Pin-level failure.
    Bus,
    /// Tag text without usable credentials.
    Credential,
    /// Network, store or cloud failure.
    Collaborator,
    /// Stopped on request. The only kind the loop does not retry.
    Cancelled,
}

impl Error {
    /// Map onto the coarse taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Timeout => ErrorKind::Timeout,
            Error::Frame(_)
            | Error::AckMismatch(_)
            | Error::FirmwareSignatureMismatch(_)
            | Error::InvalidLength { .. } => ErrorKind::FrameIntegrity,
            Error::UnexpectedResponse { .. } | Error::DeviceStatus { .. } | Error::TargetCount(_) => {
                ErrorKind::ProtocolStatus
            }
            Error::AddressOutOfRange { .. } => ErrorKind::AddressRange,
            Error::NoTargetInlisted | Error::PayloadTooLong { .. } | Error::InvalidArgument(_) => {
                ErrorKind::Precondition
            }
            Error::Bus(_) => ErrorKind::Bus,
            Error::Credential(_) => ErrorKind::Credential,
            Error::Collaborator(_) => ErrorKind::Collaborator,
            Error::Stopped => ErrorKind::Cancelled,
        }
    }

    /// True for failures the provisioning loop simply retries on its next
    /// cycle.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self.kind(), ErrorKind::Cancelled)
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
