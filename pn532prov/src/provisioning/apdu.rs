// pn532prov/src/provisioning/apdu.rs
//! The fixed Type 4 Tag dialogue used to pull the NDEF message off a phone
//! emulating a tag.

use derive_more::Display;

/// NDEF Tag Application AID registered by the phone app.
pub const NDEF_APP_AID: [u8; 7] = [0xD2, 0x76, 0x00, 0x00, 0x85, 0x01, 0x01];

/// Capability container and NDEF file identifiers.
pub const CC_FILE_ID: [u8; 2] = [0xE1, 0x03];
/// NDEF file holding the Text record.
pub const NDEF_FILE_ID: [u8; 2] = [0xE1, 0x04];

/// Bytes requested by the final READ BINARY. 59 data bytes plus SW1 SW2 fit
/// the 63 byte answer buffer and hold the whole text record.
pub const NDEF_PAYLOAD_LE: u8 = 0x3B;

const SELECT_APP: [u8; 13] = [
    0x00, 0xA4, 0x04, 0x00, 0x07, 0xD2, 0x76, 0x00, 0x00, 0x85, 0x01, 0x01, 0x00,
];
const SELECT_CC: [u8; 7] = [0x00, 0xA4, 0x00, 0x0C, 0x02, 0xE1, 0x03];
const READ_CC: [u8; 5] = [0x00, 0xB0, 0x00, 0x00, 0x0F];
const SELECT_NDEF: [u8; 7] = [0x00, 0xA4, 0x00, 0x0C, 0x02, 0xE1, 0x04];
const READ_NLEN: [u8; 5] = [0x00, 0xB0, 0x00, 0x00, 0x02];
const READ_NDEF: [u8; 5] = [0x00, 0xB0, 0x00, 0x00, NDEF_PAYLOAD_LE];

/// One step of the credential read. Every step is a single InDataExchange.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    /// SELECT by AID [`NDEF_APP_AID`].
    #[display(fmt = "select NDEF application")]
    SelectApp,
    /// SELECT file [`CC_FILE_ID`].
    #[display(fmt = "select capability container")]
    SelectCapabilityContainer,
    /// READ BINARY of the 15-byte CC.
    #[display(fmt = "read capability container")]
    ReadCapabilityContainer,
    /// SELECT file [`NDEF_FILE_ID`].
    #[display(fmt = "select NDEF file")]
    SelectNdefFile,
    /// READ BINARY of the 2-byte NLEN.
    #[display(fmt = "read NDEF length")]
    ReadNdefLength,
    /// READ BINARY of [`NDEF_PAYLOAD_LE`] bytes from offset 0.
    #[display(fmt = "read NDEF payload")]
    ReadNdefPayload,
}

impl Step {
    /// Steps in the order they are sent.
    pub const SEQUENCE: [Step; 6] = [
        Step::SelectApp,
        Step::SelectCapabilityContainer,
        Step::ReadCapabilityContainer,
        Step::SelectNdefFile,
        Step::ReadNdefLength,
        Step::ReadNdefPayload,
    ];

    /// Raw command APDU for this step.
    pub fn apdu(&self) -> &'static [u8] {
        match self {
            Step::SelectApp => &SELECT_APP,
            Step::SelectCapabilityContainer => &SELECT_CC,
            Step::ReadCapabilityContainer => &READ_CC,
            Step::SelectNdefFile => &SELECT_NDEF,
            Step::ReadNdefLength => &READ_NLEN,
            Step::ReadNdefPayload => &READ_NDEF,
        }
    }

    /// Only the payload read decides whether credentials are parsed.
    pub fn gates_parsing(&self) -> bool {
        matches!(self, Step::ReadNdefPayload)
    }
}
