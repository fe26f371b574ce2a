//! AES-256 in counter mode (FIPS 197, SP 800-38A).
//!
//! Independent of the bignum layers: a 4x4 byte state in column-major order
//! (the byte at row `r`, column `c` sits at index `c*4 + r`), 14 rounds, an
//! 8-word key expanded to 60 four-byte round-key words, and a 128-bit
//! big-endian counter incremented once per block. Counter mode only ever
//! runs the forward cipher; encryption and decryption are the same
//! operation.
//!
//! The caller chooses the key and the initial counter; a counter value must
//! never be reused under the same key.

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::{Error, Result};

/// Bytes in the cipher state and in one keystream block.
pub const BLOCK_BYTES: usize = 16;

/// Bytes in an AES-256 key.
pub const KEY_BYTES: usize = 32;

const ROUNDS: usize = 14;
const KEY_WORDS: usize = 8;
const SCHEDULE_WORDS: usize = 4 * (ROUNDS + 1);

/// Forward S-box.
static SBOX: [u8; 256] = [
    0x63, 0x7c, 0x77, 0x7b, 0xf2, 0x6b, 0x6f, 0xc5, 0x30, 0x01, 0x67, 0x2b, 0xfe, 0xd7, 0xab, 0x76,
    0xca, 0x82, 0xc9, 0x7d, 0xfa, 0x59, 0x47, 0xf0, 0xad, 0xd4, 0xa2, 0xaf, 0x9c, 0xa4, 0x72, 0xc0,
    0xb7, 0xfd, 0x93, 0x26, 0x36, 0x3f, 0xf7, 0xcc, 0x34, 0xa5, 0xe5, 0xf1, 0x71, 0xd8, 0x31, 0x15,
    0x04, 0xc7, 0x23, 0xc3, 0x18, 0x96, 0x05, 0x9a, 0x07, 0x12, 0x80, 0xe2, 0xeb, 0x27, 0xb2, 0x75,
    0x09, 0x83, 0x2c, 0x1a, 0x1b, 0x6e, 0x5a, 0xa0, 0x52, 0x3b, 0xd6, 0xb3, 0x29, 0xe3, 0x2f, 0x84,
    0x53, 0xd1, 0x00, 0xed, 0x20, 0xfc, 0xb1, 0x5b, 0x6a, 0xcb, 0xbe, 0x39, 0x4a, 0x4c, 0x58, 0xcf,
    0xd0, 0xef, 0xaa, 0xfb, 0x43, 0x4d, 0x33, 0x85, 0x45, 0xf9, 0x02, 0x7f, 0x50, 0x3c, 0x9f, 0xa8,
    0x51, 0xa3, 0x40, 0x8f, 0x92, 0x9d, 0x38, 0xf5, 0xbc, 0xb6, 0xda, 0x21, 0x10, 0xff, 0xf3, 0xd2,
    0xcd, 0x0c, 0x13, 0xec, 0x5f, 0x97, 0x44, 0x17, 0xc4, 0xa7, 0x7e, 0x3d, 0x64, 0x5d, 0x19, 0x73,
    0x60, 0x81, 0x4f, 0xdc, 0x22, 0x2a, 0x90, 0x88, 0x46, 0xee, 0xb8, 0x14, 0xde, 0x5e, 0x0b, 0xdb,
    0xe0, 0x32, 0x3a, 0x0a, 0x49, 0x06, 0x24, 0x5c, 0xc2, 0xd3, 0xac, 0x62, 0x91, 0x95, 0xe4, 0x79,
    0xe7, 0xc8, 0x37, 0x6d, 0x8d, 0xd5, 0x4e, 0xa9, 0x6c, 0x56, 0xf4, 0xea, 0x65, 0x7a, 0xae, 0x08,
    0xba, 0x78, 0x25, 0x2e, 0x1c, 0xa6, 0xb4, 0xc6, 0xe8, 0xdd, 0x74, 0x1f, 0x4b, 0xbd, 0x8b, 0x8a,
    0x70, 0x3e, 0xb5, 0x66, 0x48, 0x03, 0xf6, 0x0e, 0x61, 0x35, 0x57, 0xb9, 0x86, 0xc1, 0x1d, 0x9e,
    0xe1, 0xf8, 0x98, 0x11, 0x69, 0xd9, 0x8e, 0x94, 0x9b, 0x1e, 0x87, 0xe9, 0xce, 0x55, 0x28, 0xdf,
    0x8c, 0xa1, 0x89, 0x0d, 0xbf, 0xe6, 0x42, 0x68, 0x41, 0x99, 0x2d, 0x0f, 0xb0, 0x54, 0xbb, 0x16,
];

/// Inverse S-box. Counter mode never inverts the cipher, but the table is
/// part of the standard and kept available.
#[allow(dead_code)]
static INV_SBOX: [u8; 256] = [
    0x52, 0x09, 0x6a, 0xd5, 0x30, 0x36, 0xa5, 0x38, 0xbf, 0x40, 0xa3, 0x9e, 0x81, 0xf3, 0xd7, 0xfb,
    0x7c, 0xe3, 0x39, 0x82, 0x9b, 0x2f, 0xff, 0x87, 0x34, 0x8e, 0x43, 0x44, 0xc4, 0xde, 0xe9, 0xcb,
    0x54, 0x7b, 0x94, 0x32, 0xa6, 0xc2, 0x23, 0x3d, 0xee, 0x4c, 0x95, 0x0b, 0x42, 0xfa, 0xc3, 0x4e,
    0x08, 0x2e, 0xa1, 0x66, 0x28, 0xd9, 0x24, 0xb2, 0x76, 0x5b, 0xa2, 0x49, 0x6d, 0x8b, 0xd1, 0x25,
    0x72, 0xf8, 0xf6, 0x64, 0x86, 0x68, 0x98, 0x16, 0xd4, 0xa4, 0x5c, 0xcc, 0x5d, 0x65, 0xb6, 0x92,
    0x6c, 0x70, 0x48, 0x50, 0xfd, 0xed, 0xb9, 0xda, 0x5e, 0x15, 0x46, 0x57, 0xa7, 0x8d, 0x9d, 0x84,
    0x90, 0xd8, 0xab, 0x00, 0x8c, 0xbc, 0xd3, 0x0a, 0xf7, 0xe4, 0x58, 0x05, 0xb8, 0xb3, 0x45, 0x06,
    0xd0, 0x2c, 0x1e, 0x8f, 0xca, 0x3f, 0x0f, 0x02, 0xc1, 0xaf, 0xbd, 0x03, 0x01, 0x13, 0x8a, 0x6b,
    0x3a, 0x91, 0x11, 0x41, 0x4f, 0x67, 0xdc, 0xea, 0x97, 0xf2, 0xcf, 0xce, 0xf0, 0xb4, 0xe6, 0x73,
    0x96, 0xac, 0x74, 0x22, 0xe7, 0xad, 0x35, 0x85, 0xe2, 0xf9, 0x37, 0xe8, 0x1c, 0x75, 0xdf, 0x6e,
    0x47, 0xf1, 0x1a, 0x71, 0x1d, 0x29, 0xc5, 0x89, 0x6f, 0xb7, 0x62, 0x0e, 0xaa, 0x18, 0xbe, 0x1b,
    0xfc, 0x56, 0x3e, 0x4b, 0xc6, 0xd2, 0x79, 0x20, 0x9a, 0xdb, 0xc0, 0xfe, 0x78, 0xcd, 0x5a, 0xf4,
    0x1f, 0xdd, 0xa8, 0x33, 0x88, 0x07, 0xc7, 0x31, 0xb1, 0x12, 0x10, 0x59, 0x27, 0x80, 0xec, 0x5f,
    0x60, 0x51, 0x7f, 0xa9, 0x19, 0xb5, 0x4a, 0x0d, 0x2d, 0xe5, 0x7a, 0x9f, 0x93, 0xc9, 0x9c, 0xef,
    0xa0, 0xe0, 0x3b, 0x4d, 0xae, 0x2a, 0xf5, 0xb0, 0xc8, 0xeb, 0xbb, 0x3c, 0x83, 0x53, 0x99, 0x61,
    0x17, 0x2b, 0x04, 0x7e, 0xba, 0x77, 0xd6, 0x26, 0xe1, 0x69, 0x14, 0x63, 0x55, 0x21, 0x0c, 0x7d,
];

/// Round constants for the key schedule: powers of 2 in GF(2^8), low byte of
/// each word.
static RCON: [u8; 7] = [0x01, 0x02, 0x04, 0x08, 0x10, 0x20, 0x40];

/// Doubling in GF(2^8) with reduction polynomial $x^8 + x^4 + x^3 + x + 1$.
///
/// The reduction is applied through a mask built from the high bit (all-ones
/// when set, zero otherwise), not through a data-dependent branch.
#[inline]
fn xtime(byte: u8) -> u8 {
    (byte << 1) ^ (0x1b & (byte >> 7).wrapping_neg())
}

fn sub_word(word: &mut [u8; 4]) {
    for byte in word {
        *byte = SBOX[usize::from(*byte)];
    }
}

fn rot_word(word: &mut [u8; 4]) {
    word.rotate_left(1);
}

/// FIPS 197 key expansion for Nk = 8: every eighth word passes through
/// `SubWord(RotWord(..)) ^ Rcon`, the half-way word through `SubWord` alone.
fn expand_key(key: &[u8; KEY_BYTES]) -> [[u8; 4]; SCHEDULE_WORDS] {
    let mut schedule = [[0u8; 4]; SCHEDULE_WORDS];
    for (word, chunk) in schedule.iter_mut().zip(key.chunks_exact(4)) {
        word.copy_from_slice(chunk);
    }

    for i in KEY_WORDS..SCHEDULE_WORDS {
        let mut temp = schedule[i - 1];
        if i % KEY_WORDS == 0 {
            rot_word(&mut temp);
            sub_word(&mut temp);
            temp[0] ^= RCON[i / KEY_WORDS - 1];
        } else if i % KEY_WORDS == 4 {
            sub_word(&mut temp);
        }
        for (byte, prev) in temp.iter_mut().zip(&schedule[i - KEY_WORDS]) {
            *byte ^= prev;
        }
        schedule[i] = temp;
    }
    schedule
}

fn sub_bytes(state: &mut [u8; BLOCK_BYTES]) {
    for byte in state {
        *byte = SBOX[usize::from(*byte)];
    }
}

/// Row `r` is rotated left by `r` columns; row 0 is untouched. Rows live at
/// stride 4 in the column-major state.
fn shift_rows(state: &mut [u8; BLOCK_BYTES]) {
    let first = state[1];
    state[1] = state[5];
    state[5] = state[9];
    state[9] = state[13];
    state[13] = first;

    state.swap(2, 10);
    state.swap(6, 14);

    let last = state[15];
    state[15] = state[11];
    state[11] = state[7];
    state[7] = state[3];
    state[3] = last;
}

/// Each column `(s0, s1, s2, s3)` becomes
/// `(2 s0 + 3 s1 + s2 + s3, s0 + 2 s1 + 3 s2 + s3, ...)` in GF(2^8), where
/// `3 x = xtime(x) ^ x`.
fn mix_columns(state: &mut [u8; BLOCK_BYTES]) {
    for column in state.chunks_exact_mut(4) {
        let d0 = xtime(column[0]);
        let d1 = xtime(column[1]);
        let d2 = xtime(column[2]);
        let d3 = xtime(column[3]);

        let m0 = d0 ^ column[1] ^ d1 ^ column[2] ^ column[3];
        let m1 = column[0] ^ d1 ^ column[2] ^ d2 ^ column[3];
        let m2 = column[0] ^ column[1] ^ d2 ^ column[3] ^ d3;
        let m3 = column[0] ^ d0 ^ column[1] ^ column[2] ^ d3;

        column[0] = m0;
        column[1] = m1;
        column[2] = m2;
        column[3] = m3;
    }
}

fn add_round_key(state: &mut [u8; BLOCK_BYTES], round_key: &[[u8; 4]]) {
    for (column, word) in state.chunks_exact_mut(4).zip(round_key) {
        for (byte, key_byte) in column.iter_mut().zip(word) {
            *byte ^= key_byte;
        }
    }
}

/// Forward cipher on one block: initial AddRoundKey, 13 full rounds, final
/// round without MixColumns.
fn encrypt_block(
    schedule: &[[u8; 4]; SCHEDULE_WORDS],
    counter: &[u8; BLOCK_BYTES],
    output: &mut [u8; BLOCK_BYTES],
) {
    output.copy_from_slice(counter);
    add_round_key(output, &schedule[..4]);

    for round in 1..ROUNDS {
        sub_bytes(output);
        shift_rows(output);
        mix_columns(output);
        add_round_key(output, &schedule[round * 4..round * 4 + 4]);
    }

    sub_bytes(output);
    shift_rows(output);
    add_round_key(output, &schedule[ROUNDS * 4..]);
}

/// Adds 1 to the counter read as a 128-bit big-endian integer, carrying from
/// the rightmost byte upward; wraps at all-ones.
fn increment_counter(counter: &mut [u8; BLOCK_BYTES]) {
    for byte in counter.iter_mut().rev() {
        let (sum, carry) = byte.overflowing_add(1);
        *byte = sum;
        if !carry {
            break;
        }
    }
}

/// AES-256-CTR keystream session: the expanded round-key schedule plus the
/// running counter. Both are wiped on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Aes256Ctr {
    schedule: [[u8; 4]; SCHEDULE_WORDS],
    counter: [u8; BLOCK_BYTES],
}

impl Aes256Ctr {
    pub fn new(key: &[u8; KEY_BYTES], counter: &[u8; BLOCK_BYTES]) -> Self {
        Self { schedule: expand_key(key), counter: *counter }
    }

    /// XORs the keystream over `input` into `output`; applying the same
    /// session state twice recovers the plaintext.
    ///
    /// The counter advances once per full block. A chunk shorter than
    /// [`BLOCK_BYTES`] consumes a keystream block without advancing the
    /// counter and therefore ends the session's keystream.
    ///
    /// Fails with [`Error::InvalidArgument`] when the buffer lengths differ.
    pub fn process(&mut self, input: &[u8], output: &mut [u8]) -> Result<()> {
        if output.len() != input.len() {
            return Err(Error::InvalidArgument);
        }

        let mut keystream = [0u8; BLOCK_BYTES];
        for (chunk, slot) in input.chunks(BLOCK_BYTES).zip(output.chunks_mut(BLOCK_BYTES)) {
            encrypt_block(&self.schedule, &self.counter, &mut keystream);
            for (byte, (plain, key)) in slot.iter_mut().zip(chunk.iter().zip(&keystream)) {
                *byte = plain ^ key;
            }
            if chunk.len() == BLOCK_BYTES {
                increment_counter(&mut self.counter);
            }
        }
        Ok(())
    }
}

/// One-shot AES-256-CTR: encrypts (equivalently, decrypts) `input` into
/// `output` under `key`, starting from `counter`. Output length equals input
/// length exactly.
pub fn encrypt(
    input: &[u8],
    counter: &[u8; BLOCK_BYTES],
    key: &[u8; KEY_BYTES],
    output: &mut [u8],
) -> Result<()> {
    Aes256Ctr::new(key, counter).process(input, output)
}

#[cfg(test)]
mod test {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn forward_cipher_matches_fips_197() {
        // FIPS 197 appendix C.3: encrypting the counter with a zero
        // plaintext exposes the raw block cipher output.
        let key = hex!("000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f");
        let block = hex!("00112233445566778899aabbccddeeff");
        let mut keystream = [0u8; BLOCK_BYTES];
        encrypt(&[0u8; BLOCK_BYTES], &block, &key, &mut keystream).unwrap();
        assert_eq!(keystream, hex!("8ea2b7ca516745bfeafc49904b496089"));
    }

    #[test]
    fn ctr_vectors_from_sp800_38a() {
        // SP 800-38A, F.5.5 CTR-AES256.Encrypt
        let key = hex!("603deb1015ca71be2b73aef0857d77811f352c073b6108d72d9810a30914dff4");
        let counter = hex!("f0f1f2f3f4f5f6f7f8f9fafbfcfdfeff");
        let plaintext = hex!(
            "6bc1bee22e409f96e93d7e117393172a"
            "ae2d8a571e03ac9c9eb76fac45af8e51"
            "30c81c46a35ce411e5fbc1191a0a52ef"
            "f69f2445df4f9b17ad2b417be66c3710"
        );
        let expected = hex!(
            "601ec313775789a5b7a7f504bbf3d228"
            "f443e3ca4d62b59aca84e990cacaf5c5"
            "2b0930daa23de94ce87017ba2d84988d"
            "dfc9c58db67aada613c2dd08457941a6"
        );

        let mut ciphertext = [0u8; 64];
        encrypt(&plaintext, &counter, &key, &mut ciphertext).unwrap();
        assert_eq!(ciphertext, expected);

        // the same operation inverts itself
        let mut recovered = [0u8; 64];
        encrypt(&ciphertext, &counter, &key, &mut recovered).unwrap();
        assert_eq!(recovered, plaintext);
    }

    #[test]
    fn partial_trailing_block() {
        let key = [0x42u8; KEY_BYTES];
        let counter = [0x07u8; BLOCK_BYTES];
        let plaintext = b"twenty-one byte input";
        assert_eq!(plaintext.len(), 21);

        let mut ciphertext = [0u8; 21];
        encrypt(plaintext, &counter, &key, &mut ciphertext).unwrap();
        assert_ne!(&ciphertext[..], &plaintext[..]);

        let mut recovered = [0u8; 21];
        encrypt(&ciphertext, &counter, &key, &mut recovered).unwrap();
        assert_eq!(&recovered, plaintext);
    }

    #[test]
    fn session_streams_across_calls() {
        let key = [0xa5u8; KEY_BYTES];
        let counter = [0u8; BLOCK_BYTES];
        let plaintext = [0x5au8; 48];

        let mut whole = [0u8; 48];
        encrypt(&plaintext, &counter, &key, &mut whole).unwrap();

        let mut session = Aes256Ctr::new(&key, &counter);
        let mut pieces = [0u8; 48];
        session.process(&plaintext[..16], &mut pieces[..16]).unwrap();
        session.process(&plaintext[16..], &mut pieces[16..]).unwrap();
        assert_eq!(pieces, whole);
    }

    #[test]
    fn mismatched_buffer_lengths_are_rejected() {
        let key = [0u8; KEY_BYTES];
        let counter = [0u8; BLOCK_BYTES];
        let mut output = [0u8; 5];
        assert_eq!(
            encrypt(&[0u8; 4], &counter, &key, &mut output),
            Err(Error::InvalidArgument)
        );
    }

    #[test]
    fn counter_increments_big_endian_with_rollover() {
        let mut counter = [0u8; BLOCK_BYTES];
        increment_counter(&mut counter);
        assert_eq!(counter[15], 1);
        assert!(counter[..15].iter().all(|&b| b == 0));

        let mut edge = [0xffu8; BLOCK_BYTES];
        edge[0] = 0;
        increment_counter(&mut edge);
        assert_eq!(edge[0], 1);
        assert!(edge[1..].iter().all(|&b| b == 0));

        let mut wrap = [0xffu8; BLOCK_BYTES];
        increment_counter(&mut wrap);
        assert!(wrap.iter().all(|&b| b == 0));
    }

    #[test]
    fn xtime_reduces_on_high_bit() {
        assert_eq!(xtime(0x57), 0xae);
        assert_eq!(xtime(0xae), 0x47);
        assert_eq!(xtime(0x80), 0x1b);
    }
}
