//! Montgomery reduction over odd moduli.
//!
//! With $b = 2^{31}$ the digit radix, $l$ the digit length of the modulus
//! $m$, and $R = b^l$, products are kept in the Montgomery representation
//! $x \mapsto xR \bmod m$ so that the reduction after each multiplication is
//! a digit shift instead of a long division. The per-modulus constants are
//! the digit $m' = -m^{-1} \bmod b$ and the lifts $R \bmod m$ and
//! $R^2 \bmod m$; [`MontgomeryParams`] computes all three.
//!
//! Sources: HAC 14.4.3 (binary extended GCD), 14.36 (Montgomery
//! multiplication), 14.94 (left-to-right Montgomery exponentiation).

use core::cmp::Ordering;

use zeroize::Zeroize;

use crate::digit::{DoubleDigit, DIGIT_BITS, DIGIT_MASK};
use crate::{BigNum, Digit, Error, Result};

/// The radix as a number: $b = 2^{31}$.
fn radix() -> BigNum {
    let mut b = BigNum::from(1);
    b <<= DIGIT_BITS;
    b
}

/// Per-modulus constants for Montgomery arithmetic.
#[derive(Clone, Debug, Zeroize)]
pub struct MontgomeryParams {
    /// $m' = -m^{-1} \bmod b$, a single digit.
    pub m_prime: Digit,
    /// $R \bmod m$, the Montgomery representation of 1.
    pub r_mod_m: BigNum,
    /// $R^2 \bmod m$, the lift factor into Montgomery form.
    pub r2_mod_m: BigNum,
}

impl MontgomeryParams {
    /// Computes the constants for an odd, positive modulus.
    ///
    /// A zero modulus surfaces [`Error::InvalidArgument`] from the internal
    /// division; an even one [`Error::PreconditionFailed`] from the inverse.
    pub fn new(modulus: &BigNum) -> Result<Self> {
        let length = modulus.number_digits();

        let mut r = BigNum::from(1);
        r.shl_digits(length);
        let r_mod_m = r.modulo(modulus)?;

        let mut r_squared = BigNum::from(1);
        r_squared.shl_digits(2 * length);
        let r2_mod_m = r_squared.modulo(modulus)?;

        let m_prime = compute_montgomery_inverse(modulus)?;
        Ok(Self { m_prime, r_mod_m, r2_mod_m })
    }
}

/// $m' = -m^{-1} \bmod b$ for an odd modulus $m$, as a single digit.
///
/// Binary extended GCD over $(m, b)$ per HAC 14.4.3, maintaining the
/// invariants $A m + B b = u$ and $C m + D b = v$. Whenever $u$ or $v$ is
/// halved, an odd cofactor pair is first repaired by $\pm b$, $\mp m$ (the
/// repaired pair is always even, so the halving stays exact). The loop ends
/// with $u = 0$ and $v = \gcd(m, b)$; anything but $v = 1$ means the modulus
/// shares a factor with the radix, i.e. is even, and fails with
/// [`Error::PreconditionFailed`]. The result is the least significant digit
/// of $-C \bmod b$.
pub fn compute_montgomery_inverse(modulus: &BigNum) -> Result<Digit> {
    if modulus.is_zero() {
        return Err(Error::PreconditionFailed);
    }

    let x = modulus.clone();
    let y = radix();

    let mut u = x.clone();
    let mut v = y.clone();
    let mut a = BigNum::from(1);
    let mut b = BigNum::new();
    let mut c = BigNum::new();
    let mut d = BigNum::from(1);

    loop {
        while u.is_even() {
            u.div2();
            if a.is_odd() || b.is_odd() {
                a += &y;
                b -= &x;
            }
            a.div2();
            b.div2();
        }

        while v.is_even() {
            v.div2();
            if c.is_odd() || d.is_odd() {
                c += &y;
                d -= &x;
            }
            c.div2();
            d.div2();
        }

        if u.compare(&v) != Ordering::Less {
            u -= &v;
            a -= &c;
            b -= &d;
        } else {
            v -= &u;
            c -= &a;
            d -= &b;
        }

        if u.is_zero() {
            break;
        }
    }

    if v != BigNum::from(1) {
        return Err(Error::PreconditionFailed);
    }

    // m' = -C, normalized into (0, b)
    c.negate();
    let zero = BigNum::new();
    while c.compare(&zero) != Ordering::Greater {
        c += &y;
    }
    while c.compare(&y) != Ordering::Less {
        c -= &y;
    }
    Ok(c.digit(0))
}

/// Montgomery product $x y R^{-1} \bmod m$ (HAC 14.36).
///
/// The reduction is interleaved: in round $i$ the digit
/// $u_i = ((a_0 + x_i y_0) \bmod b) \cdot m' \bmod b$ makes
/// $a + x_i y + u_i m$ divisible by $b$, so the division is a one-digit
/// shift.
///
/// Preconditions: `m` odd and positive, `m_prime` its Montgomery inverse
/// digit, `x, y < m`. The result lies in `[0, m)`.
pub fn montgomery_multiply(x: &BigNum, y: &BigNum, modulus: &BigNum, m_prime: Digit) -> BigNum {
    let length = modulus.number_digits();
    let y0 = y.digit(0) as DoubleDigit;

    let mut accumulator = BigNum::with_capacity(length + 2);
    for i in 0..length {
        let xi = x.digit(i);

        let reduced = (accumulator.digit(0) as DoubleDigit + xi as DoubleDigit * y0)
            & DIGIT_MASK as DoubleDigit;
        let ui = ((reduced * m_prime as DoubleDigit) & DIGIT_MASK as DoubleDigit) as Digit;

        let mut term = y.clone();
        term *= xi;
        accumulator += &term;

        let mut multiple = modulus.clone();
        multiple *= ui;
        accumulator += &multiple;

        accumulator.shr_digits(1);
    }

    if accumulator.compare(modulus) != Ordering::Less {
        accumulator -= modulus;
    }
    accumulator
}

/// Left-to-right Montgomery exponentiation, $x^e \bmod m$ (HAC 14.94).
///
/// `x` is lifted into Montgomery form through $R^2 \bmod m$, the accumulator
/// starts at $R \bmod m$ (the form of 1), squares once per exponent bit from
/// the most significant down and multiplies on set bits, and a final
/// multiplication by 1 leaves Montgomery form. A zero exponent yields 1.
pub fn montgomery_exponentiation(
    x: &BigNum,
    exponent: &BigNum,
    modulus: &BigNum,
    m_prime: Digit,
    r_mod_m: &BigNum,
    r2_mod_m: &BigNum,
) -> BigNum {
    let x_lifted = montgomery_multiply(x, r2_mod_m, modulus, m_prime);

    let mut accumulator = r_mod_m.clone();
    for bit in exponent.bits() {
        accumulator = montgomery_multiply(&accumulator, &accumulator, modulus, m_prime);
        if bit {
            accumulator = montgomery_multiply(&accumulator, &x_lifted, modulus, m_prime);
        }
    }

    montgomery_multiply(&accumulator, &BigNum::from(1), modulus, m_prime)
}
