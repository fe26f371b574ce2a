use core::cmp::Ordering;

use crate::digit::{DIGIT_BITS, DIGIT_MASK};
use crate::BigNum;

/// Magnitude-only `a -= b`; requires `|a| >= |b|`.
///
/// The borrow is extracted from the two's-complement wrap of the 32-bit
/// difference: digits are below $2^{31}$, so `a - b - borrow` wrapped into
/// `u32` has bit 31 set exactly when the subtraction went below zero. A right
/// shift by [`DIGIT_BITS`] yields the borrow, the mask clears it from the
/// digit.
pub(crate) fn unsigned_sub_assign(a: &mut BigNum, b: &BigNum) {
    debug_assert!(a.compare_magnitude(b) != Ordering::Less);

    let old_used = a.used;
    let mut borrow = 0;
    for index in 0..old_used {
        let difference = a.digits[index]
            .wrapping_sub(b.digit(index))
            .wrapping_sub(borrow);
        borrow = difference >> DIGIT_BITS;
        a.digits[index] = difference & DIGIT_MASK;
    }
    debug_assert_eq!(borrow, 0);

    a.clamp();
}
