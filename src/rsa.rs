//! Textbook blockwise RSA over precomputed Montgomery parameters.
//!
//! This is the raw RSA permutation applied block by block: no OAEP, no
//! PKCS#1 v1.5, no constant-time guarantees. Moduli and exponents are
//! supplied from outside; the same [`RsaKey`] type carries `(n, e)` for
//! encryption and `(n, d)` for decryption, the transform being symmetric.

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::arithmetic::montgomery::{montgomery_exponentiation, MontgomeryParams};
use crate::{BigNum, Error, Result};

/// One direction of the RSA transform: a modulus, the exponent to raise to,
/// and the Montgomery constants derived from the modulus.
///
/// All fields are wiped on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct RsaKey {
    modulus: BigNum,
    exponent: BigNum,
    params: MontgomeryParams,
}

impl RsaKey {
    /// Builds a key from an odd modulus and an exponent, computing
    /// $m'$, $R \bmod m$ and $R^2 \bmod m$ once.
    pub fn new(modulus: BigNum, exponent: BigNum) -> Result<Self> {
        let params = MontgomeryParams::new(&modulus)?;
        Ok(Self { modulus, exponent, params })
    }

    /// Plaintext block size: the largest whole number of bytes that is
    /// guaranteed, read as an integer, to stay below the modulus.
    pub fn input_block_bytes(&self) -> usize {
        (self.modulus.number_bits() - 1) / 8
    }

    /// Ciphertext block size: enough bytes for any value below the modulus.
    pub fn output_block_bytes(&self) -> usize {
        (self.modulus.number_bits() + 7) / 8
    }

    fn power(&self, base: &BigNum) -> BigNum {
        montgomery_exponentiation(
            base,
            &self.exponent,
            &self.modulus,
            self.params.m_prime,
            &self.params.r_mod_m,
            &self.params.r2_mod_m,
        )
    }

    /// Encrypts `input` block by block into `output`, returning the number
    /// of bytes written.
    ///
    /// Each full [`input_block_bytes`][Self::input_block_bytes] chunk (and
    /// the shorter final chunk, loaded as-is) produces one full
    /// [`output_block_bytes`][Self::output_block_bytes] slot. The output
    /// must hold `ceil(input / in_block) * out_block` bytes; anything less
    /// fails with [`Error::InvalidArgument`] before any write.
    pub fn encrypt(&self, input: &[u8], output: &mut [u8]) -> Result<usize> {
        let in_block = self.input_block_bytes();
        let out_block = self.output_block_bytes();
        if in_block == 0 {
            return Err(Error::InvalidArgument);
        }

        let blocks = (input.len() + in_block - 1) / in_block;
        let required = blocks * out_block;
        if output.len() < required {
            return Err(Error::InvalidArgument);
        }

        let mut message = BigNum::with_capacity(self.modulus.number_digits() + 1);
        for (block, slot) in input.chunks(in_block).zip(output.chunks_mut(out_block)) {
            message.load_bytes(block, true, None)?;
            let cipher = self.power(&message);
            cipher.store_bytes(slot, None)?;
        }
        Ok(required)
    }

    /// Decrypts `input` block by block into `output`, returning the number
    /// of bytes written.
    ///
    /// The input length must be a multiple of
    /// [`output_block_bytes`][Self::output_block_bytes] and every block
    /// value must be below the modulus, else [`Error::InvalidArgument`].
    /// Only the significant bytes of each recovered block are written, so
    /// leading zero bytes of a plaintext block are lost — callers needing
    /// them must layer a padding scheme on top. Output overflow fails with
    /// [`Error::CapacityExceeded`].
    pub fn decrypt(&self, input: &[u8], output: &mut [u8]) -> Result<usize> {
        let out_block = self.output_block_bytes();
        if out_block == 0 || input.len() % out_block != 0 {
            return Err(Error::InvalidArgument);
        }

        let mut written = 0;
        let mut cipher = BigNum::with_capacity(self.modulus.number_digits() + 1);
        for block in input.chunks(out_block) {
            cipher.load_bytes(block, true, None)?;
            if cipher.compare(&self.modulus) != core::cmp::Ordering::Less {
                return Err(Error::InvalidArgument);
            }
            let message = self.power(&cipher);
            let count = message.number_bytes();
            if written + count > output.len() {
                return Err(Error::CapacityExceeded);
            }
            message.store_bytes(&mut output[written..written + count], None)?;
            written += count;
        }
        Ok(written)
    }
}
