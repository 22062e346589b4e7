//! IEEE 754 bit strings back to real numbers.

use log::trace;

use crate::bitarray::{BitArray, DefaultBitArray};
use crate::error::ConversionError;
use crate::explanation::{Conversion, Explanation};
use crate::ieee754::{Ieee754, IeeeFormat, SubnormalMode, pow2};

/// Classifies `bits` as a 32 or 64-bit IEEE 754 pattern by length and
/// alphabet alone. Returns `(false, 0)` for anything else.
pub fn is_ieee754_binary(bits: &str) -> (bool, u32) {
    match IeeeFormat::detect(bits) {
        Some(format) => (true, format.width() as u32),
        None => (false, 0),
    }
}

/// Decodes a 32 or 64 character bit string, flushing subnormal patterns to a
/// signed zero.
///
/// ```rust
/// use radix_steps::ieee754_to_decimal;
///
/// let conversion = ieee754_to_decimal("01000000010010000000000000000000").unwrap();
/// assert_eq!(conversion.value, 3.125);
/// ```
pub fn ieee754_to_decimal(bits: &str) -> Result<Conversion<f64>, ConversionError> {
    ieee754_to_decimal_with(bits, SubnormalMode::FlushToZero)
}

/// Decodes a 32 or 64 character bit string with an explicit subnormal policy.
///
/// # Errors
///
/// [`ConversionError::UnsupportedBitWidth`] for any other length, then
/// [`ConversionError::InvalidBitPattern`] for characters other than `0`/`1`.
pub fn ieee754_to_decimal_with(
    bits: &str,
    subnormals: SubnormalMode,
) -> Result<Conversion<f64>, ConversionError> {
    let bits = bits.trim();
    let pattern = Ieee754::<DefaultBitArray>::from_bits_str(bits)?;
    Ok(decode(&pattern, subnormals))
}

fn signed(sign: bool, magnitude: f64) -> f64 {
    if sign { -magnitude } else { magnitude }
}

pub(crate) fn decode<B: BitArray>(
    pattern: &Ieee754<B>,
    subnormals: SubnormalMode,
) -> Conversion<f64> {
    let format = pattern.format();
    let bias = format.bias();
    let sign = pattern.sign();

    let mut explanation =
        Explanation::new(format!("Converting IEEE 754 {format} to a real number:"));
    explanation.extend([
        "1. Split the fields:".to_string(),
        format!(
            "   - Sign bit: {} ({})",
            u8::from(sign),
            if sign { "negative" } else { "positive" }
        ),
        format!("   - Exponent (biased): {}", pattern.exponent().to_bits_string()),
        format!("   - Mantissa: {}", pattern.mantissa().to_bits_string()),
    ]);

    if pattern.is_zero() {
        explanation.push("Zero (±0)");
        return Conversion::new(signed(sign, 0.0), explanation);
    }
    if pattern.is_subnormal() && subnormals == SubnormalMode::FlushToZero {
        trace!("flushing subnormal {format} pattern to zero");
        explanation.push(
            "Exponent field is all zeros with a nonzero mantissa (subnormal): flushed to ±0",
        );
        return Conversion::new(signed(sign, 0.0), explanation);
    }
    if pattern.is_infinity() {
        explanation.push("Infinity (±∞)");
        return Conversion::new(signed(sign, f64::INFINITY), explanation);
    }
    if pattern.is_nan() {
        explanation.push("Not a number (NaN)");
        return Conversion::new(f64::NAN, explanation);
    }

    let biased = pattern.biased_exponent();
    let (leading, exponent) = if pattern.is_subnormal() {
        (0.0, 1 - bias)
    } else {
        (1.0, biased - bias)
    };

    let mantissa = pattern
        .mantissa()
        .iter_bits()
        .zip(1..)
        .filter(|(bit, _)| *bit)
        .fold(leading, |acc, (_, i)| acc + pow2(-i));

    let result = signed(sign, mantissa * pow2(exponent));

    if pattern.is_subnormal() {
        explanation.push(format!("2. Subnormal: true exponent = 1 - {bias} = {exponent}"));
    } else {
        explanation.push(format!("2. True exponent = {biased} - {bias} = {exponent}"));
    }
    explanation.extend([
        format!("3. Mantissa value = {mantissa:.10}"),
        String::new(),
        format!(
            "Result = {} × {mantissa:.10} × 2^{exponent} = {result}",
            if sign { "-1" } else { "1" }
        ),
    ]);

    Conversion::new(result, explanation)
}
