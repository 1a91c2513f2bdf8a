// pn532prov/src/provisioning/stop.rs
//! Cooperative stop flag for the provisioning loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cooperative stop flag for the polling loop. Clones share the flag; raise
/// it from any thread and the loop exits at its next step boundary.
#[derive(Debug, Clone, Default)]
pub struct StopSignal(Arc<AtomicBool>);

impl StopSignal {
    /// Fresh signal, not raised.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the loop to stop at its next checkpoint.
    pub fn raise(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Whether a stop was requested.
    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Lower the flag so a stopped loop can be restarted.
    pub fn reset(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}
