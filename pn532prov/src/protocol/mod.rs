// pn532prov/src/protocol/mod.rs
//! PN532 link protocol: frames, checksums, typed commands and responses,
//! and the command/ACK engine.

pub mod checksum;
pub mod codec;
pub mod commands;
pub mod engine;
pub mod frame;
pub mod link;
pub mod parser;
pub mod responses;

pub use checksum::{dcs, lcs};
pub use commands::*;
pub use engine::{CommandExchange, ExchangeState};
pub use frame::{Direction, Frame, FrameError};
pub use responses::*;
