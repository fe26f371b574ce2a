use core::cmp::Ordering;

use crate::digit::{DoubleDigit, DIGIT_BITS, DIGIT_MASK};
use crate::{BigNum, Error, Result};

impl BigNum {
    /// Signed long division with truncation toward zero: returns `(q, r)`
    /// with `self = q * rhs + r` and `|r| < |rhs|`.
    ///
    /// Multi-precision division per HAC 14.20. Both operands are normalized
    /// left until the divisor's leading digit has its top value bit (bit 30)
    /// set, which bounds the per-digit estimate error. Each quotient digit is
    /// estimated from the two most significant dividend digits over the top
    /// divisor digit, capped at $b - 1$, corrected downward by trialing
    /// $\hat{q} \cdot (y_t b + y_{t-1})$ against the three top dividend
    /// digits, and repaired by one add-back if the subtraction underflows.
    ///
    /// The quotient sign is the XOR of the operand signs, the remainder keeps
    /// the dividend's sign. `|self| < |rhs|` short-circuits to `(0, self)`.
    /// A zero divisor fails with [`Error::InvalidArgument`].
    pub fn div_rem(&self, rhs: &Self) -> Result<(Self, Self)> {
        if rhs.is_zero() {
            return Err(Error::InvalidArgument);
        }
        if self.compare_magnitude(rhs) == Ordering::Less {
            return Ok((Self::new(), self.clone()));
        }

        let negative_quotient = self.negative != rhs.negative;
        let negative_remainder = self.negative;

        let mut x = self.clone();
        x.abs();
        let mut y = rhs.clone();
        y.abs();

        // normalize: top divisor digit gets bit 30 set
        let norm_bits = DIGIT_BITS - 1 - (y.number_bits() - 1) % DIGIT_BITS;
        x <<= norm_bits;
        y <<= norm_bits;

        let n = x.used - 1;
        let t = y.used - 1;

        let mut q = Self::with_capacity(n - t + 1);
        q.used = n - t + 1;

        // leading quotient digit: at most one subtraction after normalization
        y.shl_digits(n - t);
        while x.compare(&y) != Ordering::Less {
            q.digits[n - t] += 1;
            x -= &y;
        }
        y.shr_digits(n - t);

        for i in ((t + 1)..=n).rev() {
            let j = i - t - 1;
            if i > x.used {
                continue;
            }

            // estimate from the two top dividend digits, capped at b - 1
            let mut q_hat = if x.digit(i) == y.digit(t) {
                DIGIT_MASK
            } else {
                let numerator = ((x.digit(i) as DoubleDigit) << DIGIT_BITS)
                    | x.digit(i - 1) as DoubleDigit;
                let estimate = numerator / y.digit(t) as DoubleDigit;
                if estimate > DIGIT_MASK as DoubleDigit {
                    DIGIT_MASK
                } else {
                    estimate as crate::Digit
                }
            };

            // correct downward: q_hat * (y_t * b + y_{t-1}) must not exceed
            // the three top dividend digits
            q_hat = q_hat.wrapping_add(1) & DIGIT_MASK;
            let mut trial = Self::with_capacity(3);
            let mut top = Self::with_capacity(3);
            loop {
                q_hat = q_hat.wrapping_sub(1) & DIGIT_MASK;

                trial.set_zero();
                trial.grow(3);
                trial.digits[0] = if t > 0 { y.digits[t - 1] } else { 0 };
                trial.digits[1] = y.digits[t];
                trial.used = 2;
                BigNum::clamp(&mut trial);
                trial *= q_hat;

                top.set_zero();
                top.grow(3);
                top.digits[0] = if i > 1 { x.digit(i - 2) } else { 0 };
                top.digits[1] = x.digit(i - 1);
                top.digits[2] = x.digit(i);
                top.used = 3;
                BigNum::clamp(&mut top);

                if trial.compare_magnitude(&top) != Ordering::Greater {
                    break;
                }
            }

            // x -= q_hat * y * b^j, with add-back when it underflows
            let mut subtrahend = y.clone();
            subtrahend *= q_hat;
            subtrahend.shl_digits(j);
            x -= &subtrahend;
            if x.is_negative() {
                let mut addback = y.clone();
                addback.shl_digits(j);
                x += &addback;
                q_hat = q_hat.wrapping_sub(1) & DIGIT_MASK;
            }
            q.digits[j] = q_hat;
        }

        x >>= norm_bits;

        q.negative = negative_quotient;
        BigNum::clamp(&mut q);
        x.negative = negative_remainder && !x.is_zero();
        Ok((q, x))
    }

    /// Euclidean remainder: [`div_rem`][Self::div_rem], then a negative
    /// remainder is lifted by `|modulus|`. The result lies in `[0, |modulus|)`.
    pub fn modulo(&self, modulus: &Self) -> Result<Self> {
        let (_quotient, mut remainder) = self.div_rem(modulus)?;
        if remainder.is_negative() {
            let mut magnitude = modulus.clone();
            magnitude.abs();
            remainder += &magnitude;
        }
        Ok(remainder)
    }
}
