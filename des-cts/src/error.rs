//! Error types for cipher and mode operations

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CipherError {
    #[error("invalid block length {0} (blocks are exactly 8 bytes)")]
    InvalidBlockLength(usize),

    #[error("invalid key length {0} (keys are exactly 8 bytes)")]
    InvalidKeyLength(usize),

    #[error("invalid IV length {0} (must match the 8-byte block size)")]
    InvalidIvLength(usize),

    #[error("input length {0} is not a multiple of the 8-byte block size")]
    InputNotBlockAligned(usize),
}

pub type Result<T> = std::result::Result<T, CipherError>;
