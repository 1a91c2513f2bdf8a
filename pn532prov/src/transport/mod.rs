// pn532prov/src/transport/mod.rs
//! Byte-level bus access.

pub mod bitbang;
pub mod mock;
pub mod traits;

pub use bitbang::BitBangSpi;
pub use mock::MockTransport;
pub use traits::Transport;
