// Error type for the sampling layer, the sequence helpers, and generator
// construction.
//
// The bit-mixing code (sponge, block function, recurrences) is total and has
// no failure modes. Only caller-supplied bounds, counts, and parameters can
// be rejected, and they are rejected immediately without retrying.

use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RngError {
    /// `random_in_range` was called with `lower > upper`.
    #[error("invalid range: lower bound {lower} is greater than upper bound {upper}")]
    InvalidRange { lower: i32, upper: i32 },

    /// `random_index` was called with a negative count.
    #[error("invalid count: {0} is negative")]
    NegativeCount(i32),

    /// ChaCha round counts must be even and non-zero.
    #[error("invalid ChaCha round count {0}: must be even and non-zero")]
    InvalidRounds(u32),

    /// More samples were requested than the input holds.
    #[error("cannot take {requested} samples from {available} items")]
    SampleTooLarge { requested: usize, available: usize },

    /// Restored generator state that no seeded generator could be in.
    #[error("invalid generator state: {0}")]
    InvalidState(&'static str),

    /// A slice too long to index through the signed 32-bit sampling calls.
    #[error("length {0} exceeds the 32-bit sampling domain")]
    LengthOverflow(usize),
}
