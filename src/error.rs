use crate::{MAX_LENGTH, MIN_LENGTH};

/// Error returned by fallible operations of this crate.
#[derive(Clone, Eq, PartialEq, Hash, Debug, thiserror::Error)]
pub enum Error {
    /// The requested identifier length is outside `MIN_LENGTH..=MAX_LENGTH`.
    #[error("identifier length must be within {min}..={max}, got {0}", min = MIN_LENGTH, max = MAX_LENGTH)]
    InvalidLength(usize),

    /// The prefix is not a lowercase ASCII letter.
    #[error("prefix must be a lowercase ASCII letter, got {0:?}")]
    InvalidPrefix(char),

    /// The random salt is longer than the largest supported identifier.
    #[error("random salt must not exceed {max} bytes, got {0}", max = MAX_LENGTH)]
    RandomTooLong(usize),

    /// The input contains a character outside the base-36 alphabet.
    #[error("invalid base-36 digit {0:?}")]
    InvalidDigit(char),
}
