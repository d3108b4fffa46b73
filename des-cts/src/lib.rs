//! # DES-CTS
//!
//! DES block cipher with CBC and CBC-CTS (ciphertext stealing) chaining
//! modes.
//!
//! CBC-CTS encrypts plaintext of arbitrary length — not just exact multiples
//! of the 8-byte block size — while keeping the ciphertext exactly as long as
//! the plaintext. The one exception is input shorter than a single block,
//! which is zero-padded up to 8 bytes; the decryptor cannot recover the
//! original length of such input from the ciphertext alone.
//!
//! ## Usage
//!
//! ```rust
//! use des_cts::{cbc_cts_decrypt, cbc_cts_encrypt, DEFAULT_IV};
//!
//! let key = b"mysecret";
//! let plaintext = b"pixel data of any length";
//!
//! let ciphertext = cbc_cts_encrypt(plaintext, key, &DEFAULT_IV)?;
//! assert_eq!(ciphertext.len(), plaintext.len());
//!
//! let decrypted = cbc_cts_decrypt(&ciphertext, key, &DEFAULT_IV)?;
//! assert_eq!(decrypted, plaintext);
//! # Ok::<(), des_cts::CipherError>(())
//! ```
//!
//! Callers that process many messages should build a [`Des`] engine once and
//! call the mode functions on [`CipherModes`] directly; the convenience
//! functions above derive the key schedule on every call.
//!
//! ## Security
//!
//! DES has a 56-bit effective key and an 8-byte block: it is cryptographically
//! weak by modern standards, and this crate is a faithful reimplementation of
//! the classical primitive, not a production security component. The IV is an
//! explicit parameter on every mode function; reusing a fixed IV across
//! multiple encryptions under the same key leaks equality of plaintext
//! prefixes. [`DEFAULT_IV`] exists for compatibility with the reference
//! tools, which share it out-of-band.

// Public modules
pub mod cipher;
pub mod des;
pub mod error;
pub mod modes;
pub mod utils;

// Re-exports for easy access
pub use cipher::{Block, BlockCipher, BLOCK_SIZE};
pub use des::{Des, Key, KeySchedule, KEY_SIZE};
pub use error::{CipherError, Result};
pub use modes::CipherModes;

/// The fixed 8-byte IV used by the reference image tools. Both sides of a
/// transfer must use the same IV; it is not transmitted with the ciphertext.
pub const DEFAULT_IV: Block = *b"12345678";

/// Encrypt `plaintext` of arbitrary length with DES in CBC-CTS mode.
///
/// Derives the key schedule for this invocation, then chains block-by-block;
/// see [`CipherModes::cbc_cts_encrypt`] for the mode itself.
pub fn cbc_cts_encrypt(plaintext: &[u8], key: &[u8], iv: &[u8]) -> Result<Vec<u8>> {
    let des = Des::new(key)?;
    CipherModes::cbc_cts_encrypt(&des, plaintext, iv)
}

/// Decrypt a CBC-CTS ciphertext produced by [`cbc_cts_encrypt`].
///
/// The plaintext length is taken to be the ciphertext length; for originals
/// shorter than one block the caller truncates the full returned block to the
/// true length it holds out-of-band.
pub fn cbc_cts_decrypt(ciphertext: &[u8], key: &[u8], iv: &[u8]) -> Result<Vec<u8>> {
    let des = Des::new(key)?;
    CipherModes::cbc_cts_decrypt(&des, ciphertext, iv)
}

// Cross-module tests: the round-trip contract and the statistical sanity
// checks that catch transposed tables or mis-ordered rounds.
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_full_blocks() {
        for blocks in 1u8..=4 {
            let plaintext: Vec<u8> = (0..blocks * BLOCK_SIZE as u8).collect();
            let ciphertext = cbc_cts_encrypt(&plaintext, b"mysecret", &DEFAULT_IV).unwrap();
            assert_eq!(ciphertext.len(), plaintext.len());
            let decrypted = cbc_cts_decrypt(&ciphertext, b"mysecret", &DEFAULT_IV).unwrap();
            assert_eq!(decrypted, plaintext);
        }
    }

    #[test]
    fn test_round_trip_partial_final_block() {
        for len in 9..=23usize {
            if len % BLOCK_SIZE == 0 {
                continue;
            }
            let plaintext: Vec<u8> = (0..len as u8).map(|b| b.wrapping_mul(37)).collect();
            let ciphertext = cbc_cts_encrypt(&plaintext, b"mysecret", &DEFAULT_IV).unwrap();
            assert_eq!(ciphertext.len(), len);
            let decrypted = cbc_cts_decrypt(&ciphertext, b"mysecret", &DEFAULT_IV).unwrap();
            assert_eq!(decrypted, plaintext);
        }
    }

    #[test]
    fn test_concrete_scenario() {
        // key "mysecret", IV "12345678", 20 bytes of a known pattern.
        let plaintext = b"0123456789abcdefghij";
        let ciphertext = cbc_cts_encrypt(plaintext, b"mysecret", b"12345678").unwrap();
        assert_eq!(ciphertext.len(), 20);
        assert_ne!(&ciphertext[..], &plaintext[..]);
        let decrypted = cbc_cts_decrypt(&ciphertext, b"mysecret", b"12345678").unwrap();
        assert_eq!(&decrypted, plaintext);
    }

    #[test]
    fn test_boundary_single_block() {
        // Length exactly 8: the pure CBC path with one block.
        let plaintext = b"8 bytes!";
        let ciphertext = cbc_cts_encrypt(plaintext, b"mysecret", &DEFAULT_IV).unwrap();
        assert_eq!(ciphertext.len(), 8);
        let decrypted = cbc_cts_decrypt(&ciphertext, b"mysecret", &DEFAULT_IV).unwrap();
        assert_eq!(&decrypted, plaintext);
    }

    #[test]
    fn test_boundary_sub_block() {
        // Length 3: the encryptor pads; the decryptor is told the true
        // length and truncates.
        let original_len = 3;
        let ciphertext = cbc_cts_encrypt(b"abc", b"mysecret", &DEFAULT_IV).unwrap();
        assert_eq!(ciphertext.len(), 8);
        let mut decrypted = cbc_cts_decrypt(&ciphertext, b"mysecret", &DEFAULT_IV).unwrap();
        decrypted.truncate(original_len);
        assert_eq!(&decrypted, b"abc");
    }

    #[test]
    fn test_chaining_dependency() {
        // The same plaintext block at a different position must encrypt
        // differently, or the chain value is not being mixed in.
        let plaintext = b"samesamesamesame";
        let ciphertext = cbc_cts_encrypt(plaintext, b"mysecret", &DEFAULT_IV).unwrap();
        assert_ne!(ciphertext[..8], ciphertext[8..16]);
    }

    #[test]
    fn test_iv_is_mixed_into_first_block() {
        let ciphertext_a = cbc_cts_encrypt(b"8 bytes!", b"mysecret", b"12345678").unwrap();
        let ciphertext_b = cbc_cts_encrypt(b"8 bytes!", b"mysecret", b"87654321").unwrap();
        assert_ne!(ciphertext_a, ciphertext_b);
    }

    #[test]
    fn test_avalanche() {
        // Flipping one plaintext bit should flip roughly half the ciphertext
        // bits. Averaged over all 64 single-bit flips the mean is tightly
        // concentrated around 32 for a correctly wired cipher.
        let des = Des::new(b"mysecret").unwrap();
        let base_block = *b"avalanch";
        let base = des.encrypt_block(&base_block).unwrap();

        let mut flipped_bits = 0u32;
        for bit in 0..64 {
            let mut block = base_block;
            block[bit / 8] ^= 1 << (7 - bit % 8);
            let ciphertext = des.encrypt_block(&block).unwrap();
            flipped_bits += base
                .iter()
                .zip(ciphertext.iter())
                .map(|(a, b)| (a ^ b).count_ones())
                .sum::<u32>();
        }
        let mean = f64::from(flipped_bits) / 64.0;
        assert!(
            (24.0..=40.0).contains(&mean),
            "mean flipped bits {mean} is not roughly half the block"
        );
    }

    #[test]
    fn test_key_length_is_validated() {
        assert!(matches!(
            cbc_cts_encrypt(b"data", b"not eight bytes", &DEFAULT_IV),
            Err(CipherError::InvalidKeyLength(15))
        ));
    }

    #[test]
    fn test_iv_length_is_validated() {
        assert!(matches!(
            cbc_cts_encrypt(b"data", b"mysecret", b"short iv!"),
            Err(CipherError::InvalidIvLength(9))
        ));
    }
}
