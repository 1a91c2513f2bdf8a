// pn532prov/src/provisioning/credentials.rs
//! Wi-Fi credentials and the parser that extracts them from a tag answer.

use std::fmt;
use std::ops::Range;

use heapless::String;
use thiserror::Error;

use crate::config::{ProvisioningConfig, CREDENTIAL_WINDOW, DELIMITER_QUESTION};

/// 802.11 SSID limit in bytes.
pub const MAX_SSID_LEN: usize = 32;
/// WPA2 passphrase limit in bytes.
pub const MAX_PASSWORD_LEN: usize = 63;

/// ISO 7816 "normal processing" status word that closes an APDU answer.
const STATUS_WORD_OK: [u8; 2] = [0x90, 0x00];

/// Why a tag answer did not yield a credential pair.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialError {
    /// The answer ends before the window starts.
    #[error("window {start}.. starts past the {len} byte answer")]
    EmptyWindow {
        /// First window byte.
        start: usize,
        /// Answer length.
        len: usize,
    },
    /// The window holds no delimiter byte.
    #[error("no delimiter {0:#04x} in credential text")]
    MissingDelimiter(u8),
    /// Nothing before the delimiter.
    #[error("empty ssid")]
    EmptySsid,
    /// SSID longer than [`MAX_SSID_LEN`].
    #[error("ssid is {0} bytes, max 32")]
    SsidTooLong(usize),
    /// Password longer than [`MAX_PASSWORD_LEN`].
    #[error("password is {0} bytes, max 63")]
    PasswordTooLong(usize),
    /// Either field is not UTF-8.
    #[error("credential text is not valid utf-8")]
    InvalidUtf8,
}

/// Wi-Fi network name and passphrase received from the phone.
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Credentials {
    ssid: String<MAX_SSID_LEN>,
    password: String<MAX_PASSWORD_LEN>,
}

impl Credentials {
    /// Validate lengths; the SSID must not be empty.
    pub fn new(ssid: &str, password: &str) -> Result<Self, CredentialError> {
        if ssid.is_empty() {
            return Err(CredentialError::EmptySsid);
        }
        let mut s = String::new();
        s.push_str(ssid)
            .map_err(|_| CredentialError::SsidTooLong(ssid.len()))?;
        let mut p = String::new();
        p.push_str(password)
            .map_err(|_| CredentialError::PasswordTooLong(password.len()))?;
        Ok(Self {
            ssid: s,
            password: p,
        })
    }

    /// Network name.
    pub fn ssid(&self) -> &str {
        &self.ssid
    }

    /// Passphrase, possibly empty for open networks.
    pub fn password(&self) -> &str {
        &self.password
    }
}

// Keep passphrases out of logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("ssid", &self.ssid.as_str())
            .field("password", &format_args!("<{} bytes>", self.password.len()))
            .finish()
    }
}

/// Extracts `ssid <delimiter> password` from a byte window of the final
/// NDEF read answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialParser {
    delimiter: u8,
    window: Range<usize>,
}

impl Default for CredentialParser {
    fn default() -> Self {
        Self::new(DELIMITER_QUESTION, CREDENTIAL_WINDOW)
    }
}

impl CredentialParser {
    /// Parser splitting on `delimiter` within `window`.
    pub fn new(delimiter: u8, window: Range<usize>) -> Self {
        Self { delimiter, window }
    }

    /// Parser using the config's delimiter and window.
    pub fn from_config(config: &ProvisioningConfig) -> Self {
        Self::new(config.delimiter, config.window.clone())
    }

    /// Byte separating SSID from password.
    pub fn delimiter(&self) -> u8 {
        self.delimiter
    }

    /// Byte range of the answer holding the text.
    pub fn window(&self) -> Range<usize> {
        self.window.clone()
    }

    /// Scan `answer` (the bytes returned by the exchange). Scanning stops at
    /// the window's end, the end of the data (a trailing `90 00` status word
    /// is not data) or the first `0x00`. Bytes before the first delimiter
    /// are the SSID; everything after it, later delimiters included, is the
    /// password.
    pub fn parse(&self, answer: &[u8]) -> Result<Credentials, CredentialError> {
        let data = answer.strip_suffix(&STATUS_WORD_OK).unwrap_or(answer);
        let end = self.window.end.min(data.len());
        if self.window.start >= end {
            return Err(CredentialError::EmptyWindow {
                start: self.window.start,
                len: data.len(),
            });
        }

        let mut text = &data[self.window.start..end];
        if let Some(nul) = text.iter().position(|&b| b == 0x00) {
            text = &text[..nul];
        }

        let split = text
            .iter()
            .position(|&b| b == self.delimiter)
            .ok_or(CredentialError::MissingDelimiter(self.delimiter))?;
        let ssid = std::str::from_utf8(&text[..split]).map_err(|_| CredentialError::InvalidUtf8)?;
        let password =
            std::str::from_utf8(&text[split + 1..]).map_err(|_| CredentialError::InvalidUtf8)?;

        Credentials::new(ssid, password)
    }
}
