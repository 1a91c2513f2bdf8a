// Shared helpers for the integration test aggregators.
#![allow(dead_code)]

pub mod fixtures;
pub mod helpers;

pub use helpers::*;
