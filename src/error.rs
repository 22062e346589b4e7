use thiserror::Error;

use crate::base::Base;

/// Every way a conversion can fail. Each variant carries the offending input
/// so a caller can re-prompt without keeping its own copy.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    #[error("'{input}' is not a valid number in base 2, 8, 10 or 16")]
    InvalidNumber { input: String },

    #[error("digit '{digit}' is not valid in base {base}")]
    InvalidDigit { digit: char, base: Base },

    #[error("base {0} is not supported (expected 2, 8, 10 or 16)")]
    UnsupportedBase(u32),

    #[error("'{0}' is not a valid integer")]
    NotAnInteger(String),

    #[error("'{0}' is not a valid number")]
    NotANumber(String),

    #[error("{value} is outside the range [{min}, {max}]")]
    OutOfRange { value: i128, min: i128, max: i128 },

    #[error("precision must not be negative, got {0}")]
    NegativePrecision(i32),

    #[error("bit width {0} is not supported")]
    UnsupportedBitWidth(u32),

    #[error("'{0}' may only contain the characters 0 and 1")]
    InvalidBitPattern(String),

    #[error("'{input}' does not fit in a 128-bit unsigned integer")]
    TooLarge { input: String },
}
