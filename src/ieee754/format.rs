use std::fmt;

use crate::error::ConversionError;

/// IEEE 754 binary interchange formats handled by the encoder and decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IeeeFormat {
    /// binary32: 1 sign bit, 8 exponent bits, 23 mantissa bits, bias 127
    Single,
    /// binary64: 1 sign bit, 11 exponent bits, 52 mantissa bits, bias 1023
    Double,
}

impl IeeeFormat {
    pub const fn width(self) -> usize {
        match self {
            IeeeFormat::Single => 32,
            IeeeFormat::Double => 64,
        }
    }

    pub const fn exponent_bits(self) -> usize {
        match self {
            IeeeFormat::Single => 8,
            IeeeFormat::Double => 11,
        }
    }

    pub const fn mantissa_bits(self) -> usize {
        match self {
            IeeeFormat::Single => 23,
            IeeeFormat::Double => 52,
        }
    }

    pub const fn bias(self) -> i32 {
        match self {
            IeeeFormat::Single => 127,
            IeeeFormat::Double => 1023,
        }
    }

    /// `(exponent_bits, mantissa_bits, bias)`.
    pub const fn params(self) -> (usize, usize, i32) {
        (self.exponent_bits(), self.mantissa_bits(), self.bias())
    }

    /// The all-ones exponent field reserved for infinities and NaN.
    pub const fn special_exponent(self) -> i32 {
        (1 << self.exponent_bits()) - 1
    }

    pub const fn from_width(width: usize) -> Option<Self> {
        match width {
            32 => Some(IeeeFormat::Single),
            64 => Some(IeeeFormat::Double),
            _ => None,
        }
    }

    /// Recognises a 32 or 64 character string of `0`/`1`. Performs no numeric
    /// interpretation.
    pub fn detect(bits: &str) -> Option<Self> {
        if !bits.chars().all(|c| c == '0' || c == '1') {
            return None;
        }
        Self::from_width(bits.len())
    }
}

impl TryFrom<u32> for IeeeFormat {
    type Error = ConversionError;

    fn try_from(bits: u32) -> Result<Self, Self::Error> {
        Self::from_width(bits as usize).ok_or(ConversionError::UnsupportedBitWidth(bits))
    }
}

impl fmt::Display for IeeeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-bit", self.width())
    }
}
