/// The ways a call into this crate can fail.
///
/// Every failure is fatal to the current call: there is no retry and no
/// partial success. Output already written when an error surfaces is
/// unspecified.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// An argument violates the call contract: zero divisor, a byte count
    /// that is not a multiple of the swizzle group, a ciphertext length that
    /// is not a multiple of the block size, or an undersized output buffer.
    InvalidArgument,
    /// The modulus is not coprime to the radix, i.e. it is even (detected by
    /// the extended GCD terminating with `v != 1`).
    PreconditionFailed,
    /// The recovered plaintext would overflow the output buffer.
    CapacityExceeded,
}

/// [`Error`] or success.
pub type Result<T> = core::result::Result<T, Error>;
