// pn532prov/src/lib.rs

//! pn532prov
//!
//! PN532 NFC controller driver over a bit-banged serial bus, plus the
//! tap-to-provision loop that reads Wi-Fi credentials from a phone
//! emulating an NFC Forum Type 4 tag.
#![warn(missing_docs)]

pub mod config;
pub mod constants;
pub mod device;
pub mod error;
pub mod ndef;
pub mod prelude;
pub mod protocol;
pub mod provisioning;
pub mod test_support;
pub mod transport;
pub mod types;
pub mod utils;

// Re-export common types at crate root so `crate::Error`, `crate::Result`,
// and the newtypes in `types` are available for consumers and for
// convenient `prelude` re-exports.
pub use crate::error::*;
pub use crate::types::*;

pub use prelude::*;
