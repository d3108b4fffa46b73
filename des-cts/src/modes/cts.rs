//! CBC-CTS (Cipher Block Chaining with ciphertext stealing) mode
//! implementation
//!
//! Ciphertext stealing extends CBC to arbitrary-length input while keeping
//! the output exactly as long as the input: instead of padding the final
//! partial block, the mode borrows ("steals") the bytes it is short of from
//! the penultimate ciphertext block and reorders the last two output blocks.
//!
//! Three length-dependent paths on each side must invert each other exactly:
//!
//! 1. Input an exact multiple of the block size → plain CBC.
//! 2. Input shorter than one block → one zero-padded block. This is the one
//!    case where the output (8 bytes) is longer than the input, and the
//!    decryptor cannot recover the true length from the ciphertext alone —
//!    the caller holds it out-of-band and truncates.
//! 3. General case → CBC over the leading blocks, then the swapped,
//!    truncated final pair.

use crate::{error::CipherError, utils, BlockCipher, Result, BLOCK_SIZE};

use super::CipherModes;

impl CipherModes {
    /// CBC-CTS mode encryption
    ///
    /// Algorithm (general case, `full` whole blocks plus `d` trailing bytes):
    /// 1. Standard CBC over blocks `0 .. full-8`, advancing the chain value.
    /// 2. C(n-1) = E(P(n-1) ⊕ prev)
    /// 3. C(n) = E(zeropad(P(n)*) ⊕ C(n-1))
    /// 4. Emit the first `d` bytes of C(n-1), then all of C(n).
    ///
    /// Output length equals input length except for sub-block inputs, which
    /// produce one full block.
    pub fn cbc_cts_encrypt<C: BlockCipher>(
        cipher: &C,
        plaintext: &[u8],
        iv: &[u8],
    ) -> Result<Vec<u8>> {
        if iv.len() != BLOCK_SIZE {
            return Err(CipherError::InvalidIvLength(iv.len()));
        }
        if plaintext.is_empty() {
            return Ok(Vec::new());
        }

        let full = plaintext.len() / BLOCK_SIZE * BLOCK_SIZE;
        let d = plaintext.len() - full;

        // Exact multiple of the block size: ordinary CBC.
        if d == 0 {
            return Self::cbc_encrypt(cipher, plaintext, iv);
        }

        // Less than one block of material: zero-pad and encrypt one block.
        if full == 0 {
            let padded = utils::zero_pad_block(plaintext);
            let xored = utils::xor_block(&padded, &utils::to_block(iv));
            return Ok(cipher.encrypt_block(&xored)?.to_vec());
        }

        // General case: CBC over everything before the final full block,
        // then steal the first d bytes of C(n-1) for the shortened segment.
        let head = &plaintext[..full - BLOCK_SIZE];
        let mut ciphertext = Self::cbc_encrypt(cipher, head, iv)?;
        let prev = match ciphertext.len() {
            0 => utils::to_block(iv),
            n => utils::to_block(&ciphertext[n - BLOCK_SIZE..]),
        };

        let last_full = utils::to_block(&plaintext[full - BLOCK_SIZE..full]);
        let tail = utils::zero_pad_block(&plaintext[full..]);

        let c_n1 = cipher.encrypt_block(&utils::xor_block(&last_full, &prev))?;
        let c_n = cipher.encrypt_block(&utils::xor_block(&tail, &c_n1))?;

        ciphertext.extend_from_slice(&c_n1[..d]);
        ciphertext.extend_from_slice(&c_n);
        Ok(ciphertext)
    }

    /// CBC-CTS mode decryption
    ///
    /// CTS preserves total length, so the ciphertext length doubles as the
    /// plaintext length; `d = len % 8` selects the path. Sub-block originals
    /// are the documented exception — their ciphertext is one full block, so
    /// the caller truncates the result to the true length it holds
    /// out-of-band.
    ///
    /// Algorithm (general case):
    /// 1. Standard CBC decrypt up to `pre_len = len - (8 + d)`.
    /// 2. Z = D(C(n)); the tail of Z *is* the stolen tail of the true
    ///    C(n-1), so C(n-1) = stolen ‖ Z[d..].
    /// 3. P(n-1) = D(C(n-1)) ⊕ prev; P(n)* = (Z ⊕ C(n-1))[..d].
    pub fn cbc_cts_decrypt<C: BlockCipher>(
        cipher: &C,
        ciphertext: &[u8],
        iv: &[u8],
    ) -> Result<Vec<u8>> {
        if iv.len() != BLOCK_SIZE {
            return Err(CipherError::InvalidIvLength(iv.len()));
        }
        if ciphertext.is_empty() {
            return Ok(Vec::new());
        }

        let len = ciphertext.len();
        let d = len % BLOCK_SIZE;

        if d == 0 {
            return Self::cbc_decrypt(cipher, ciphertext, iv);
        }

        // Degenerate short input: nothing but a lone (truncated) block. Only
        // reachable for ciphertexts shorter than one block, which the
        // encryptor never emits; the engine rejects the malformed block.
        if len < BLOCK_SIZE + d {
            let decrypted = cipher.decrypt_block(ciphertext)?;
            let block = utils::xor_block(&decrypted, &utils::to_block(iv));
            return Ok(block[..len].to_vec());
        }

        let pre_len = len - (BLOCK_SIZE + d);
        let mut plaintext = Self::cbc_decrypt(cipher, &ciphertext[..pre_len], iv)?;
        let prev = match pre_len {
            0 => utils::to_block(iv),
            n => utils::to_block(&ciphertext[n - BLOCK_SIZE..n]),
        };

        let stolen = &ciphertext[pre_len..pre_len + d];
        let c_n = utils::to_block(&ciphertext[pre_len + d..]);

        let z = cipher.decrypt_block(&c_n)?;
        let mut c_n1 = z;
        c_n1[..d].copy_from_slice(stolen);

        let p_n1 = utils::xor_block(&cipher.decrypt_block(&c_n1)?, &prev);
        let tail = utils::xor_block(&z, &c_n1);

        plaintext.extend_from_slice(&p_n1);
        plaintext.extend_from_slice(&tail[..d]);
        Ok(plaintext)
    }
}
