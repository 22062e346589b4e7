use std::fmt;

use crate::error::ConversionError;
use crate::tables;

/// One of the four supported positional numeral systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Base {
    Binary,
    Octal,
    Decimal,
    Hexadecimal,
}

impl Base {
    /// All bases, from the most restrictive alphabet to the most general.
    pub const ALL: [Base; 4] = [Base::Binary, Base::Octal, Base::Decimal, Base::Hexadecimal];

    pub const fn radix(self) -> u32 {
        match self {
            Base::Binary => 2,
            Base::Octal => 8,
            Base::Decimal => 10,
            Base::Hexadecimal => 16,
        }
    }

    /// Bits per digit for the bases that map onto fixed-width binary groups.
    pub const fn group_width(self) -> Option<usize> {
        match self {
            Base::Octal => Some(3),
            Base::Hexadecimal => Some(4),
            Base::Binary | Base::Decimal => None,
        }
    }

    /// Whether `digit` belongs to this base's alphabet. Hex accepts both cases.
    pub fn contains(self, digit: char) -> bool {
        tables::digit_value(digit).is_some_and(|v| v < self.radix())
    }

    /// Checks every character of `digits`, reporting the first one outside
    /// the alphabet.
    pub fn validate(self, digits: &str) -> Result<(), ConversionError> {
        match digits.chars().find(|&c| !self.contains(c)) {
            Some(digit) => Err(ConversionError::InvalidDigit { digit, base: self }),
            None => Ok(()),
        }
    }
}

impl TryFrom<u32> for Base {
    type Error = ConversionError;

    fn try_from(radix: u32) -> Result<Self, Self::Error> {
        match radix {
            2 => Ok(Base::Binary),
            8 => Ok(Base::Octal),
            10 => Ok(Base::Decimal),
            16 => Ok(Base::Hexadecimal),
            other => Err(ConversionError::UnsupportedBase(other)),
        }
    }
}

impl From<Base> for u32 {
    fn from(base: Base) -> Self {
        base.radix()
    }
}

impl fmt::Display for Base {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.radix())
    }
}

/// Classifies `digits` as the narrowest base whose alphabet covers it.
///
/// The search runs binary, octal, decimal, hexadecimal, so `"10"` is always
/// reported as binary. Callers that mean another base must say so.
pub fn detect_base(digits: &str) -> Result<Base, ConversionError> {
    if digits.is_empty() {
        return Err(ConversionError::InvalidNumber {
            input: digits.to_string(),
        });
    }
    Base::ALL
        .into_iter()
        .find(|base| digits.chars().all(|c| base.contains(c)))
        .ok_or_else(|| ConversionError::InvalidNumber {
            input: digits.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("101", Base::Binary)]
    #[case("10", Base::Binary)]
    #[case("0", Base::Binary)]
    #[case("17", Base::Octal)]
    #[case("18", Base::Decimal)]
    #[case("9", Base::Decimal)]
    #[case("FA", Base::Hexadecimal)]
    #[case("ff", Base::Hexadecimal)]
    #[case("1a2B", Base::Hexadecimal)]
    fn test_detect_base(#[case] digits: &str, #[case] expected: Base) {
        assert_eq!(detect_base(digits).unwrap(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("G")]
    #[case("12.5")]
    #[case("-5")]
    #[case("1 0")]
    fn test_detect_base_rejects(#[case] digits: &str) {
        assert_eq!(
            detect_base(digits),
            Err(ConversionError::InvalidNumber {
                input: digits.to_string()
            })
        );
    }

    #[rstest]
    fn test_try_from() {
        for base in Base::ALL {
            assert_eq!(Base::try_from(base.radix()), Ok(base));
            assert_eq!(u32::from(base), base.radix());
        }
        assert_eq!(Base::try_from(3), Err(ConversionError::UnsupportedBase(3)));
        assert_eq!(Base::try_from(0), Err(ConversionError::UnsupportedBase(0)));
    }

    #[rstest]
    fn test_validate() {
        assert!(Base::Octal.validate("0127").is_ok());
        assert_eq!(
            Base::Octal.validate("0187"),
            Err(ConversionError::InvalidDigit {
                digit: '8',
                base: Base::Octal
            })
        );
        assert!(Base::Hexadecimal.validate("DeadBeef").is_ok());
        assert!(Base::Binary.validate("2").is_err());
    }
}
