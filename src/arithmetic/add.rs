use core::cmp::Ordering;
use core::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use crate::digit::{DIGIT_BITS, DIGIT_MASK};
use crate::BigNum;

/// Magnitude-only `a += b`; signs are dispatched by the operator impls.
///
/// The carry of each digit addition is the single bit above the radix,
/// extracted with a right shift by [`DIGIT_BITS`]; two digits plus a carry
/// always fit the 32-bit storage.
pub(crate) fn unsigned_add_assign(a: &mut BigNum, b: &BigNum) {
    let max_used = a.used.max(b.used);
    a.grow(max_used + 1);

    let old_used = a.used;
    let mut carry = 0;
    for index in 0..max_used {
        let sum = a.digits[index] + b.digit(index) + carry;
        carry = sum >> DIGIT_BITS;
        a.digits[index] = sum & DIGIT_MASK;
    }
    a.digits[max_used] = carry;
    a.used = max_used + 1;

    // Stale digits above the sum, from a previously larger value. The length
    // invariant itself is restored by clamp.
    for digit in &mut a.digits[max_used + 1..old_used.max(max_used + 1)] {
        *digit = 0;
    }

    a.clamp();
}

impl AddAssign<&BigNum> for BigNum {
    /// Signed addition: equal signs add magnitudes; opposite signs subtract
    /// the smaller magnitude from the larger, which donates its sign.
    fn add_assign(&mut self, rhs: &BigNum) {
        if self.negative == rhs.negative {
            unsigned_add_assign(self, rhs);
        } else if self.compare_magnitude(rhs) != Ordering::Less {
            super::subtract::unsigned_sub_assign(self, rhs);
        } else {
            let mut difference = rhs.clone();
            super::subtract::unsigned_sub_assign(&mut difference, self);
            *self = difference;
        }
    }
}

impl Add<&BigNum> for &BigNum {
    type Output = BigNum;

    fn add(self, rhs: &BigNum) -> BigNum {
        let mut sum = self.clone();
        sum += rhs;
        sum
    }
}

impl SubAssign<&BigNum> for BigNum {
    /// `a -= b` is `a += (-b)` with the sign rules inlined.
    fn sub_assign(&mut self, rhs: &BigNum) {
        if self.negative != rhs.negative {
            unsigned_add_assign(self, rhs);
        } else if self.compare_magnitude(rhs) != Ordering::Less {
            super::subtract::unsigned_sub_assign(self, rhs);
        } else {
            let flipped = !self.negative;
            let mut difference = rhs.clone();
            super::subtract::unsigned_sub_assign(&mut difference, self);
            difference.negative = flipped && !difference.is_zero();
            *self = difference;
        }
    }
}

impl Sub<&BigNum> for &BigNum {
    type Output = BigNum;

    fn sub(self, rhs: &BigNum) -> BigNum {
        let mut difference = self.clone();
        difference -= rhs;
        difference
    }
}

impl Neg for &BigNum {
    type Output = BigNum;

    fn neg(self) -> BigNum {
        let mut negated = self.clone();
        negated.negate();
        negated
    }
}
