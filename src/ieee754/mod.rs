use std::fmt;

use crate::bitarray::BitArray;
use crate::error::ConversionError;

pub mod decode;
pub mod encode;
pub mod format;

pub use format::IeeeFormat;

/// How the decoder treats a zero exponent field with a nonzero mantissa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SubnormalMode {
    /// Read every zero-exponent pattern as a signed zero.
    #[default]
    FlushToZero,
    /// Reconstruct `(-1)^s * 0.m * 2^(1 - bias)`.
    Gradual,
}

/// An IEEE 754 value split into its three bit fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ieee754<B> {
    format: IeeeFormat,
    sign: bool,
    exponent: B,
    mantissa: B,
}

impl<B: BitArray> Ieee754<B> {
    pub fn new(format: IeeeFormat, sign: bool, exponent: B, mantissa: B) -> Self {
        debug_assert_eq!(exponent.len(), format.exponent_bits());
        debug_assert_eq!(mantissa.len(), format.mantissa_bits());
        Self {
            format,
            sign,
            exponent,
            mantissa,
        }
    }

    pub fn new_zero_with_sign(format: IeeeFormat, sign: bool) -> Self {
        Self::new(
            format,
            sign,
            B::zeros(format.exponent_bits()),
            B::zeros(format.mantissa_bits()),
        )
    }

    /// Quiet NaN: positive sign, exponent all ones, only the leading
    /// mantissa bit set.
    pub fn new_nan(format: IeeeFormat) -> Self {
        let mut mantissa = vec![false; format.mantissa_bits()];
        mantissa[0] = true;
        Self::new(
            format,
            false,
            B::ones(format.exponent_bits()),
            B::from_bits(&mantissa),
        )
    }

    pub fn new_infinity(format: IeeeFormat, sign: bool) -> Self {
        Self::new(
            format,
            sign,
            B::ones(format.exponent_bits()),
            B::zeros(format.mantissa_bits()),
        )
    }

    /// Splits a 32 or 64 character bit string into its fields.
    ///
    /// The width is checked before the alphabet, so a 33 character string of
    /// letters reports [`ConversionError::UnsupportedBitWidth`].
    pub fn from_bits_str(bits: &str) -> Result<Self, ConversionError> {
        let format = IeeeFormat::from_width(bits.chars().count())
            .ok_or(ConversionError::UnsupportedBitWidth(bits.chars().count() as u32))?;
        let all = B::from_bits_str(bits)
            .ok_or_else(|| ConversionError::InvalidBitPattern(bits.to_string()))?;

        let exponent_end = 1 + format.exponent_bits();
        let invalid = || ConversionError::InvalidBitPattern(bits.to_string());
        Ok(Self::new(
            format,
            *all.get(0).ok_or_else(invalid)?,
            all.get_range(1..exponent_end).ok_or_else(invalid)?,
            all.get_range(exponent_end..format.width())
                .ok_or_else(invalid)?,
        ))
    }

    fn is_special_exponent(&self) -> bool {
        self.exponent.all_ones()
    }

    pub fn is_nan(&self) -> bool {
        self.is_special_exponent() && !self.mantissa.all_zeros()
    }

    pub fn is_infinity(&self) -> bool {
        self.is_special_exponent() && self.mantissa.all_zeros()
    }

    pub fn is_zero(&self) -> bool {
        self.exponent.all_zeros() && self.mantissa.all_zeros()
    }

    pub fn is_subnormal(&self) -> bool {
        self.exponent.all_zeros() && !self.mantissa.all_zeros()
    }

    pub fn format(&self) -> IeeeFormat {
        self.format
    }

    pub fn sign(&self) -> bool {
        self.sign
    }

    pub fn exponent(&self) -> &B {
        &self.exponent
    }

    pub fn mantissa(&self) -> &B {
        &self.mantissa
    }

    /// The stored (biased) exponent field as an integer.
    pub fn biased_exponent(&self) -> i32 {
        self.exponent
            .iter_bits()
            .fold(0, |acc, bit| (acc << 1) | i32::from(bit))
    }

    pub fn to_bits_string(&self) -> String {
        let mut bits = String::with_capacity(self.format.width());
        bits.push(if self.sign { '1' } else { '0' });
        bits.push_str(&self.exponent.to_bits_string());
        bits.push_str(&self.mantissa.to_bits_string());
        bits
    }
}

/// Fields separated by spaces: `sign exponent mantissa`.
impl<B: BitArray> fmt::Display for Ieee754<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            u8::from(self.sign),
            self.exponent.to_bits_string(),
            self.mantissa.to_bits_string()
        )
    }
}

/// Exact `2^exponent` as an `f64`, subnormal powers included.
pub(crate) fn pow2(exponent: i32) -> f64 {
    match exponent {
        e if e > 1023 => f64::INFINITY,
        e if e >= -1022 => f64::from_bits(((e + 1023) as u64) << 52),
        e if e >= -1074 => f64::from_bits(1u64 << (e + 1074)),
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::bitarray::DefaultBitArray;

    type Value = Ieee754<DefaultBitArray>;

    #[rstest]
    fn test_special_values() {
        let zero = Value::new_zero_with_sign(IeeeFormat::Single, false);
        assert!(zero.is_zero());
        assert_eq!(zero.to_bits_string(), "0".repeat(32));

        let neg_zero = Value::new_zero_with_sign(IeeeFormat::Double, true);
        assert!(neg_zero.is_zero());
        assert!(neg_zero.sign());
        assert_eq!(neg_zero.to_bits_string(), format!("1{}", "0".repeat(63)));

        let nan = Value::new_nan(IeeeFormat::Single);
        assert!(nan.is_nan());
        assert!(!nan.is_infinity());
        assert_eq!(
            nan.to_bits_string(),
            format!("0{}1{}", "1".repeat(8), "0".repeat(22))
        );

        let inf = Value::new_infinity(IeeeFormat::Double, true);
        assert!(inf.is_infinity());
        assert!(!inf.is_nan());
        assert_eq!(inf.to_bits_string(), format!("1{}{}", "1".repeat(11), "0".repeat(52)));
    }

    #[rstest]
    fn test_from_bits_str() {
        let value = Value::from_bits_str("01000000010010000000000000000000").unwrap();
        assert_eq!(value.format(), IeeeFormat::Single);
        assert!(!value.sign());
        assert_eq!(value.exponent().to_bits_string(), "10000000");
        assert_eq!(value.biased_exponent(), 128);
        assert_eq!(value.mantissa().to_bits_string(), format!("1001{}", "0".repeat(19)));
        assert_eq!(value.to_string(), format!("0 10000000 1001{}", "0".repeat(19)));

        assert_eq!(
            Value::from_bits_str("0101"),
            Err(ConversionError::UnsupportedBitWidth(4))
        );
        let bad = format!("2{}", "0".repeat(31));
        assert_eq!(
            Value::from_bits_str(&bad),
            Err(ConversionError::InvalidBitPattern(bad.clone()))
        );
    }

    #[rstest]
    fn test_subnormal_detection() {
        let value = Value::from_bits_str(&format!("{}1", "0".repeat(31))).unwrap();
        assert!(value.is_subnormal());
        assert!(!value.is_zero());
    }

    #[rstest]
    fn test_pow2() {
        assert_eq!(pow2(0), 1.0);
        assert_eq!(pow2(10), 1024.0);
        assert_eq!(pow2(-1), 0.5);
        assert_eq!(pow2(-1022), f64::MIN_POSITIVE);
        assert_eq!(pow2(-1074), f64::from_bits(1));
        assert_eq!(pow2(-1075), 0.0);
        assert_eq!(pow2(1023), 2f64.powi(1023));
        assert_eq!(pow2(1024), f64::INFINITY);
    }
}
