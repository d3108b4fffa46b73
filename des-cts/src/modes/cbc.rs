//! CBC (Cipher Block Chaining) mode implementation
//!
//! Plain CBC over inputs that are an exact multiple of the block size. No
//! padding is applied here: inputs of any other length are rejected, and the
//! ciphertext-stealing mode in [`super::cts`] is the way to chain over
//! arbitrary-length data.

use crate::{error::CipherError, utils, BlockCipher, Result, BLOCK_SIZE};

use super::CipherModes;

impl CipherModes {
    /// CBC mode encryption
    ///
    /// Each plaintext block is XORed with the previous ciphertext block (the
    /// IV for the first) before encryption. The chain value is a local
    /// accumulator threaded through the loop.
    pub fn cbc_encrypt<C: BlockCipher>(
        cipher: &C,
        plaintext: &[u8],
        iv: &[u8],
    ) -> Result<Vec<u8>> {
        if iv.len() != BLOCK_SIZE {
            return Err(CipherError::InvalidIvLength(iv.len()));
        }
        if plaintext.len() % BLOCK_SIZE != 0 {
            return Err(CipherError::InputNotBlockAligned(plaintext.len()));
        }

        let mut ciphertext = Vec::with_capacity(plaintext.len());
        let mut prev = utils::to_block(iv);

        for chunk in plaintext.chunks(BLOCK_SIZE) {
            let xored = utils::xor_block(&utils::to_block(chunk), &prev);
            let encrypted = cipher.encrypt_block(&xored)?;
            ciphertext.extend_from_slice(&encrypted);
            prev = encrypted;
        }

        Ok(ciphertext)
    }

    /// CBC mode decryption
    pub fn cbc_decrypt<C: BlockCipher>(
        cipher: &C,
        ciphertext: &[u8],
        iv: &[u8],
    ) -> Result<Vec<u8>> {
        if iv.len() != BLOCK_SIZE {
            return Err(CipherError::InvalidIvLength(iv.len()));
        }
        if ciphertext.len() % BLOCK_SIZE != 0 {
            return Err(CipherError::InputNotBlockAligned(ciphertext.len()));
        }

        let mut plaintext = Vec::with_capacity(ciphertext.len());
        let mut prev = utils::to_block(iv);

        for chunk in ciphertext.chunks(BLOCK_SIZE) {
            let decrypted = cipher.decrypt_block(chunk)?;
            let block = utils::xor_block(&decrypted, &prev);
            plaintext.extend_from_slice(&block);
            prev = utils::to_block(chunk);
        }

        Ok(plaintext)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Des;

    #[test]
    fn test_cbc_round_trip() {
        let des = Des::new(b"mysecret").unwrap();
        let plaintext = b"an exact block multiple!";
        assert_eq!(plaintext.len() % BLOCK_SIZE, 0);

        let ciphertext = CipherModes::cbc_encrypt(&des, plaintext, b"12345678").unwrap();
        assert_eq!(ciphertext.len(), plaintext.len());

        let decrypted = CipherModes::cbc_decrypt(&des, &ciphertext, b"12345678").unwrap();
        assert_eq!(decrypted, plaintext);
    }

    #[test]
    fn test_cbc_rejects_partial_input() {
        let des = Des::new(b"mysecret").unwrap();
        assert!(matches!(
            CipherModes::cbc_encrypt(&des, b"not a block multiple", b"12345678"),
            Err(CipherError::InputNotBlockAligned(20))
        ));
    }

    #[test]
    fn test_cbc_rejects_bad_iv() {
        let des = Des::new(b"mysecret").unwrap();
        assert!(matches!(
            CipherModes::cbc_encrypt(&des, b"eightbyt", b"short"),
            Err(CipherError::InvalidIvLength(5))
        ));
    }
}
