//! Shared test fixtures: digit-vector constructors and a fixed 256-bit RSA
//! key with its reference ciphertext.
//!
//! The key was generated once from two 128-bit primes
//! (`p = 0xeb7e21f0921082dfc966aed65a10eeaf`,
//! `q = 0xdfe2b11364b977561be3ae0c3b97b6c9`) with `e = 65537` and
//! `d = e^-1 mod (p-1)(q-1)`; the expected values below were produced with
//! an independent big-integer implementation.

use hex_literal::hex;

pub use crate::digit::{DIGIT_BITS, DIGIT_MASK};
use crate::{BigNum, Digit};

/// Builds a value from little-endian radix-2^31 digits.
pub fn from_digits(digits: &[Digit]) -> BigNum {
    let mut number = BigNum::with_capacity(digits.len());
    for (slot, &digit) in number.digits.iter_mut().zip(digits) {
        assert!(digit <= DIGIT_MASK);
        *slot = digit;
    }
    number.used = digits.len();
    BigNum::clamp(&mut number);
    number
}

pub fn from_u128(value: u128) -> BigNum {
    let mut digits = [0 as Digit; 5];
    let mut rest = value;
    for slot in &mut digits {
        *slot = (rest & u128::from(DIGIT_MASK)) as Digit;
        rest >>= DIGIT_BITS;
    }
    from_digits(&digits)
}

pub fn rsa_modulus_256() -> BigNum {
    let mut n = BigNum::new();
    n.load_bytes(
        &hex!("cdf367ce92190f9c136caa1b337e14b4c4c214d609be61fe7e4fd387df34d167"),
        true,
        None,
    )
    .unwrap();
    n
}

pub fn rsa_private_exponent_256() -> BigNum {
    let mut d = BigNum::new();
    d.load_bytes(
        &hex!("5345ff0c3c709baa2d047c07819b923d07aeb6917d8e8b4445f33a94fc970bd1"),
        true,
        None,
    )
    .unwrap();
    d
}

/// 123 bytes: four 31-byte plaintext blocks, the last one partial.
pub const MESSAGE: &[u8] =
    b"The quick brown fox jumps over the lazy dog. Pack my box with five \
      dozen liquor jugs. Sphinx of black quartz, judge my vow.";

/// `MESSAGE` encrypted blockwise under `(rsa_modulus_256, 65537)`.
pub fn ciphertext_256() -> [u8; 128] {
    hex!(
        "ae898ac5b8e46e4d5b6e3263952800af17eb8e3b056a5ae396cd17d6cf9f0c49"
        "74374ad0150a644dd4affbf4f758c8058a461cecd709134f0869807635cb763d"
        "7dd07a94429cb38b2106b508fc1d45143b0381c242410f32ae0b48afc9ded2b3"
        "9d3c5606a010cad9e95fc13e689fe4703b769c110fa67ea2f4a998cf8be3f92e"
    )
}

/// `0x1122334455667788 ^ 65537 mod rsa_modulus_256`.
pub fn expected_power_65537() -> BigNum {
    let mut value = BigNum::new();
    value
        .load_bytes(
            &hex!("3656037f56dcbe908562ba5b3def05fc70ca3a232d10ed692169fb0eef668afe"),
            true,
            None,
        )
        .unwrap();
    value
}
