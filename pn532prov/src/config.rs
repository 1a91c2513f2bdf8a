// pn532prov/src/config.rs
//! Timing and parsing defaults, plus the runtime configuration structs that
//! carry them.

use std::ops::Range;

use crate::provisioning::apdu::NDEF_PAYLOAD_LE;
use crate::types::SamMode;

/// Select held low before the wake-up command is sent (ms)
pub const WAKE_DELAY_MS: u32 = 1_000;

/// Readiness budget for ordinary command exchanges (ms)
pub const EXCHANGE_TIMEOUT_MS: u32 = 1_000;

/// Readiness budget for target enumeration; the phone may take a while to
/// enter the field (ms)
pub const ENUMERATION_TIMEOUT_MS: u32 = 30_000;

/// SAM timeout in 50 ms units: 0x14 = 1 second
pub const SAM_TIMEOUT: u8 = 0x14;

/// Pause after a successful enumeration so the phone can bring up its
/// emulated tag (ms)
pub const SETTLE_DELAY_MS: u32 = 10_000;

/// Pause after each successful APDU step (ms)
pub const STEP_DELAY_MS: u32 = 1_000;

/// Pause at the end of every cycle before enumerating again (ms)
pub const RETRY_DELAY_MS: u32 = 5_000;

/// `?` separates SSID from passphrase in the current phone app.
pub const DELIMITER_QUESTION: u8 = 0x3F;
/// Older firmware revisions used a space.
pub const DELIMITER_SPACE: u8 = 0x20;

/// Offset of the text in the NDEF file image the phone app serves: NLEN (2),
/// `D1 01 PLEN 54` record header (4), status byte (1) and the `en` language
/// code (2).
pub const TEXT_RECORD_OFFSET: usize = 9;

/// Byte window of the NDEF payload response scanned for credentials. It runs
/// from the text start to the end of the 59 bytes the payload read asks for.
pub const CREDENTIAL_WINDOW: Range<usize> = TEXT_RECORD_OFFSET..NDEF_PAYLOAD_LE as usize;

/// Controller-level settings used by `Device`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReaderConfig {
    /// Select held low before the wake-up command (ms).
    pub wake_delay_ms: u32,
    /// Readiness budget for ordinary commands and every ACK (ms, 0 = forever).
    pub exchange_timeout_ms: u32,
    /// How long InListPassiveTarget may search for a target once acknowledged (ms, 0 = forever).
    pub enumeration_timeout_ms: u32,
    /// SAM mode sent by SAMConfiguration.
    pub sam_mode: SamMode,
    /// SAM virtual-card timeout in 50 ms units.
    pub sam_timeout: u8,
    /// Ask the controller to drive its IRQ line.
    pub use_irq: bool,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            wake_delay_ms: WAKE_DELAY_MS,
            exchange_timeout_ms: EXCHANGE_TIMEOUT_MS,
            enumeration_timeout_ms: ENUMERATION_TIMEOUT_MS,
            sam_mode: SamMode::Normal,
            sam_timeout: SAM_TIMEOUT,
            use_irq: true,
        }
    }
}

impl ReaderConfig {
    /// Override the wake-up select pulse.
    pub fn with_wake_delay(mut self, ms: u32) -> Self {
        self.wake_delay_ms = ms;
        self
    }

    /// 0 waits forever.
    pub fn with_exchange_timeout(mut self, ms: u32) -> Self {
        self.exchange_timeout_ms = ms;
        self
    }

    /// 0 waits forever.
    pub fn with_enumeration_timeout(mut self, ms: u32) -> Self {
        self.enumeration_timeout_ms = ms;
        self
    }
}

/// Settings for the credential-extraction loop.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProvisioningConfig {
    /// Pause after a target is inlisted (ms).
    pub settle_delay_ms: u32,
    /// Pause after each successful APDU step (ms).
    pub step_delay_ms: u32,
    /// Pause between cycles (ms).
    pub retry_delay_ms: u32,
    /// Byte separating SSID from password.
    pub delimiter: u8,
    /// Byte range of the payload answer scanned for credentials.
    pub window: Range<usize>,
    /// Leave `run` once credentials have been joined successfully.
    pub stop_after_join: bool,
}

impl Default for ProvisioningConfig {
    fn default() -> Self {
        Self {
            settle_delay_ms: SETTLE_DELAY_MS,
            step_delay_ms: STEP_DELAY_MS,
            retry_delay_ms: RETRY_DELAY_MS,
            delimiter: DELIMITER_QUESTION,
            window: CREDENTIAL_WINDOW,
            stop_after_join: false,
        }
    }
}

impl ProvisioningConfig {
    /// Override the post-enumeration pause.
    pub fn with_settle_delay(mut self, ms: u32) -> Self {
        self.settle_delay_ms = ms;
        self
    }

    /// Override the per-step pause.
    pub fn with_step_delay(mut self, ms: u32) -> Self {
        self.step_delay_ms = ms;
        self
    }

    /// Override the pause between cycles.
    pub fn with_retry_delay(mut self, ms: u32) -> Self {
        self.retry_delay_ms = ms;
        self
    }

    /// Use a different SSID/password separator.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Scan a different byte range of the payload answer.
    pub fn with_window(mut self, window: Range<usize>) -> Self {
        self.window = window;
        self
    }

    /// Leave `run` after the first successful join.
    pub fn with_stop_after_join(mut self, stop: bool) -> Self {
        self.stop_after_join = stop;
        self
    }

    /// No delays at all; handy with simulated transports.
    pub fn immediate() -> Self {
        Self::default()
            .with_settle_delay(0)
            .with_step_delay(0)
            .with_retry_delay(0)
    }
}
