//! Byte-level helpers shared by the cipher modes

use crate::cipher::{Block, BLOCK_SIZE};

/// XOR two 8-byte blocks.
pub fn xor_block(a: &Block, b: &Block) -> Block {
    let mut out = [0u8; BLOCK_SIZE];
    for i in 0..BLOCK_SIZE {
        out[i] = a[i] ^ b[i];
    }
    out
}

/// Copy a full 8-byte chunk into a block.
pub(crate) fn to_block(chunk: &[u8]) -> Block {
    debug_assert_eq!(chunk.len(), BLOCK_SIZE);
    let mut out = [0u8; BLOCK_SIZE];
    out.copy_from_slice(chunk);
    out
}

/// Right-pad a partial chunk with zero bytes to a full block.
pub(crate) fn zero_pad_block(chunk: &[u8]) -> Block {
    debug_assert!(chunk.len() <= BLOCK_SIZE);
    let mut out = [0u8; BLOCK_SIZE];
    out[..chunk.len()].copy_from_slice(chunk);
    out
}
