//! DES block cipher engine: key schedule and 16-round Feistel transform.
//!
//! Encryption and decryption run the identical transform; the direction lives
//! entirely in the order of the round keys. Encrypting a block with the
//! forward schedule and running the result through the reversed schedule
//! derived from the same key yields the original block.

mod tables;

use crate::cipher::{Block, BlockCipher, BLOCK_SIZE};
use crate::error::{CipherError, Result};

use tables::{E, FP, IP, P, PC1, PC2, SBOXES, SHIFTS};

/// Size of a key in bytes.
pub const KEY_SIZE: usize = 8;

/// An 8-byte cipher key. Only 56 of the 64 bits are effective key material;
/// PC-1 discards the rest.
pub type Key = [u8; KEY_SIZE];

const HALF_KEY_BITS: u32 = 28;
const HALF_KEY_MASK: u32 = 0x0FFF_FFFF;
const ROUNDS: usize = 16;

/// Apply a 1-indexed bit permutation table to the low `in_width` bits of
/// `value`.
///
/// Bit 1 in table notation is the most-significant bit of the `in_width`-bit
/// window. The result is `table.len()` bits wide, packed MSB-first into the
/// low bits of the returned word. One routine serves IP, FP, E, P, PC-1 and
/// PC-2 alike.
fn permute(value: u64, in_width: u32, table: &[u8]) -> u64 {
    let mut out = 0u64;
    for &pos in table {
        out = (out << 1) | ((value >> (in_width - pos as u32)) & 1);
    }
    out
}

/// Rotate a 28-bit half-register left by `n` positions.
fn rotate_half(half: u32, n: u8) -> u32 {
    ((half << n) | (half >> (HALF_KEY_BITS - n as u32))) & HALF_KEY_MASK
}

/// The round function: expand the half block, mix in the round key,
/// substitute through the eight S-boxes, permute.
fn feistel(half: u32, round_key: u64) -> u32 {
    let mixed = permute(half as u64, 32, &E) ^ round_key;
    let mut substituted = 0u32;
    for (i, sbox) in SBOXES.iter().enumerate() {
        let group = ((mixed >> (42 - 6 * i)) & 0x3F) as usize;
        // Row from the outer two bits, column from the inner four.
        let row = ((group >> 4) & 0b10) | (group & 1);
        let col = (group >> 1) & 0xF;
        substituted = (substituted << 4) | sbox[row][col] as u32;
    }
    permute(substituted as u64, 32, &P) as u32
}

/// The 16 round keys derived from one 8-byte key.
///
/// Encryption walks the keys in derivation order; decryption derives the same
/// sequence `reversed`, so the rounds run in the opposite temporal order.
#[derive(Clone)]
pub struct KeySchedule {
    round_keys: [u64; ROUNDS],
}

impl KeySchedule {
    /// Derive the 16 round keys from an 8-byte key.
    ///
    /// PC-1 reduces the key to 56 bits split into the C and D half-registers;
    /// each round rotates both halves left by the table amount — the
    /// rotations accumulate across rounds rather than restarting from C₀/D₀ —
    /// and PC-2 selects 48 bits of the merged halves as that round's key.
    pub fn derive(key: &[u8], reversed: bool) -> Result<Self> {
        if key.len() != KEY_SIZE {
            return Err(CipherError::InvalidKeyLength(key.len()));
        }
        let mut packed = [0u8; KEY_SIZE];
        packed.copy_from_slice(key);

        let halves = permute(u64::from_be_bytes(packed), 64, &PC1);
        let mut c = ((halves >> HALF_KEY_BITS) as u32) & HALF_KEY_MASK;
        let mut d = (halves as u32) & HALF_KEY_MASK;

        let mut round_keys = [0u64; ROUNDS];
        for (i, &shift) in SHIFTS.iter().enumerate() {
            c = rotate_half(c, shift);
            d = rotate_half(d, shift);
            let merged = ((c as u64) << HALF_KEY_BITS) | d as u64;
            round_keys[i] = permute(merged, 56, &PC2);
        }
        if reversed {
            round_keys.reverse();
        }
        Ok(Self { round_keys })
    }

    /// Run one 8-byte block through the 16-round Feistel network.
    ///
    /// IP, then 16 rounds of `(L, R) → (R, L ⊕ f(R, Kᵢ))` — the old R
    /// becomes the new L — then the final R ‖ L swap and FP.
    pub fn transform(&self, block: &[u8]) -> Result<Block> {
        if block.len() != BLOCK_SIZE {
            return Err(CipherError::InvalidBlockLength(block.len()));
        }
        let mut packed = [0u8; BLOCK_SIZE];
        packed.copy_from_slice(block);

        let permuted = permute(u64::from_be_bytes(packed), 64, &IP);
        let mut l = (permuted >> 32) as u32;
        let mut r = permuted as u32;
        for &key in &self.round_keys {
            let next_r = l ^ feistel(r, key);
            l = r;
            r = next_r;
        }

        let preoutput = ((r as u64) << 32) | l as u64;
        Ok(permute(preoutput, 64, &FP).to_be_bytes())
    }
}

/// DES engine holding the forward and reversed schedules for one key, both
/// derived once at construction.
pub struct Des {
    encrypt_schedule: KeySchedule,
    decrypt_schedule: KeySchedule,
}

impl Des {
    /// Build an engine from an 8-byte key.
    ///
    /// The caller supplies exactly 8 bytes; any padding or truncation of
    /// longer or shorter key material happens before this boundary.
    pub fn new(key: &[u8]) -> Result<Self> {
        Ok(Self {
            encrypt_schedule: KeySchedule::derive(key, false)?,
            decrypt_schedule: KeySchedule::derive(key, true)?,
        })
    }
}

impl BlockCipher for Des {
    fn encrypt_block(&self, block: &[u8]) -> Result<Block> {
        self.encrypt_schedule.transform(block)
    }

    fn decrypt_block(&self, block: &[u8]) -> Result<Block> {
        self.decrypt_schedule.transform(block)
    }

    fn block_size(&self) -> usize {
        BLOCK_SIZE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Published worked-example vectors for the individual tables.

    #[test]
    fn test_expansion_table() {
        let result = permute(0b1111_0000_1010_1010_1111_0000_1010_1010, 32, &E);
        assert_eq!(
            result,
            0b011110_100001_010101_010101_011110_100001_010101_010101
        );
    }

    #[test]
    fn test_straight_permutation() {
        let result = permute(0b1111_0000_0101_1010_1110_0111_1100_0011, 32, &P);
        assert_eq!(result, 0b0000_0101_1111_0111_1010_1010_1100_1011);
    }

    #[test]
    fn test_permuted_choice_1() {
        let key: u64 =
            0b00010011_00110100_01010111_01111001_10011011_10111100_11011111_11110001;
        let result = permute(key, 64, &PC1);
        assert_eq!(
            result,
            0b1111000_0110011_0010101_0101111_0101010_1011001_1001111_0001111
        );
    }

    #[test]
    fn test_permuted_choice_2() {
        let merged: u64 =
            0b1110000_1100110_0101010_1011111_1010101_0110011_0011110_0011110;
        let result = permute(merged, 56, &PC2);
        assert_eq!(result, 0b000110_110000_001011_101111_111111_000111_000001_110010);
    }

    #[test]
    fn test_known_answer() {
        let key = hex::decode("133457799bbcdff1").unwrap();
        let plaintext = hex::decode("0123456789abcdef").unwrap();

        let schedule = KeySchedule::derive(&key, false).unwrap();
        let ciphertext = schedule.transform(&plaintext).unwrap();
        assert_eq!(hex::encode(ciphertext), "85e813540f0ab405");

        let reversed = KeySchedule::derive(&key, true).unwrap();
        let recovered = reversed.transform(&ciphertext).unwrap();
        assert_eq!(recovered.as_slice(), plaintext.as_slice());
    }

    #[test]
    fn test_reversed_schedule_order() {
        let forward = KeySchedule::derive(b"mysecret", false).unwrap();
        let reversed = KeySchedule::derive(b"mysecret", true).unwrap();
        let mut expected = forward.round_keys;
        expected.reverse();
        assert_eq!(reversed.round_keys, expected);
    }

    #[test]
    fn test_single_block_involution() {
        let des = Des::new(b"mysecret").unwrap();
        let block = *b"datablok";
        let encrypted = des.encrypt_block(&block).unwrap();
        assert_ne!(encrypted, block);
        let decrypted = des.decrypt_block(&encrypted).unwrap();
        assert_eq!(decrypted, block);
    }

    #[test]
    fn test_invalid_key_length() {
        assert!(matches!(
            KeySchedule::derive(b"short", false),
            Err(CipherError::InvalidKeyLength(5))
        ));
        assert!(matches!(
            Des::new(b"toolongkeymaterial"),
            Err(CipherError::InvalidKeyLength(18))
        ));
    }

    #[test]
    fn test_invalid_block_length() {
        let des = Des::new(b"mysecret").unwrap();
        assert_eq!(
            des.encrypt_block(b"tooshort!"),
            Err(CipherError::InvalidBlockLength(9))
        );
    }
}
