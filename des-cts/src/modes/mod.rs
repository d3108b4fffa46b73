//! Chaining modes driving the block cipher engine

pub mod cbc;
pub mod cts;

/// Entry points for the block chaining modes.
pub struct CipherModes;
