//! Multi-precision signed integers over a 31-bit digit radix, the
//! Montgomery machinery they enable (modular inverse of the modulus with
//! respect to the radix, Montgomery multiplication and exponentiation), a
//! textbook blockwise RSA built on top, and an independent AES-256-CTR
//! stream cipher.
//!
//! Everything is variable-time and unpadded by design: keys, moduli and
//! exponents are supplied from outside, and callers wanting semantic
//! security must layer a padding scheme above the [`rsa`][RsaKey] block
//! transform. What the crate does promise is bit-exact arithmetic: the
//! radix-$2^{31}$ representation keeps one spare carry bit per 32-bit digit,
//! division follows HAC 14.20 with quotient correction, and the Montgomery
//! ladder matches HAC 14.94.
//!
//! The crate is `no_std` (digit storage comes from `alloc`) and wipes key
//! material on drop via `zeroize`.

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod aes;
mod arithmetic;
pub use arithmetic::montgomery::{
    compute_montgomery_inverse, montgomery_exponentiation, montgomery_multiply, MontgomeryParams,
};
mod bignum;
pub use bignum::{BigNum, Bits};
mod digit;
pub use digit::{Digit, DIGIT_BITS, DIGIT_MASK, DIGIT_RADIX};
mod error;
pub use error::{Error, Result};
mod rsa;
pub use rsa::RsaKey;

#[cfg(test)]
mod fixtures;
