//! Generic block cipher trait

use crate::error::Result;

/// Size of a cipher block in bytes.
pub const BLOCK_SIZE: usize = 8;

/// An 8-byte cipher block.
///
/// Bit 0 of the abstract cipher model is the most-significant bit of byte 0
/// (big-endian bit packing).
pub type Block = [u8; BLOCK_SIZE];

/// Trait for a block cipher with an owned key schedule.
///
/// Round keys are derived when the cipher value is constructed, so a chaining
/// mode derives them exactly once per invocation rather than once per block.
pub trait BlockCipher {
    /// Encrypts a single 8-byte block
    fn encrypt_block(&self, block: &[u8]) -> Result<Block>;

    /// Decrypts a single 8-byte block
    fn decrypt_block(&self, block: &[u8]) -> Result<Block>;

    /// Returns the block size of the cipher
    fn block_size(&self) -> usize;
}
