/// A single place of a [`BigNum`][crate::BigNum], holding a value in
/// $[0, 2^{31})$.
///
/// The storage type is 32 bits wide while the radix is $2^{31}$: the top bit
/// is reserved as the intermediate carry/borrow bit during arithmetic, so the
/// sum of two digits plus a carry never overflows the storage type. Carries
/// are extracted with a right shift by [`DIGIT_BITS`] and the value bits are
/// restored with [`DIGIT_MASK`] at digit boundaries.
pub type Digit = u32;

/// Unsigned type with twice as many bits as [`Digit`], for multiplication
/// accumulators and two-digit trial divisions.
pub(crate) type DoubleDigit = u64;

/// Number of value bits in a digit. The radix is $2^{\mathtt{DIGIT\_BITS}}$.
pub const DIGIT_BITS: usize = 31;

/// The radix, $b = 2^{31}$.
pub const DIGIT_RADIX: Digit = 1 << DIGIT_BITS;

/// Mask extracting the value bits of a digit.
pub const DIGIT_MASK: Digit = DIGIT_RADIX - 1;

/// Digit buffers grow in blocks of this many digits to limit reallocation.
pub(crate) const BASE_CAPACITY: usize = 4;
