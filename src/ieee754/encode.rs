//! # Real number to IEEE 754
//!
//! Builds the sign, biased exponent and mantissa fields of a binary32 or
//! binary64 value from an `f64`, explaining each field.
//!
//! ## Layout
//!
//! ```text
//! [Sign: 1 bit][Exponent: 8 / 11 bits][Mantissa: 23 / 52 bits]
//! ```
//!
//! ## Limits
//!
//! - Magnitudes whose biased exponent would be `<= 0` are flushed to a
//!   signed zero; subnormal patterns are never produced.
//! - Magnitudes whose biased exponent would reach the all-ones field become
//!   a signed infinity.
//! - Mantissa bits are truncated, not rounded. For binary64 this is exact;
//!   for binary32 it may differ from `f32` rounding in the last bit.
//!
//! ```rust
//! use radix_steps::decimal_to_ieee754;
//!
//! let conversion = decimal_to_ieee754(1.0, 32).unwrap();
//! assert_eq!(conversion.value, "00111111100000000000000000000000");
//! ```

use log::trace;

use crate::bitarray::{BitArray, DefaultBitArray};
use crate::error::ConversionError;
use crate::explanation::{Conversion, Explanation};
use crate::ieee754::{Ieee754, IeeeFormat, pow2};

/// Encodes `value` as a `bits`-wide IEEE 754 bit string (`bits` is 32 or 64).
pub fn decimal_to_ieee754(value: f64, bits: u32) -> Result<Conversion<String>, ConversionError> {
    let format = IeeeFormat::try_from(bits)?;
    Ok(encode(value, format))
}

/// `floor(log2(magnitude))`, corrected for rounding in `log2` near powers of
/// two. `magnitude` must be finite and positive.
fn unbiased_exponent(magnitude: f64) -> i32 {
    let mut exponent = magnitude.log2().floor() as i32;
    while pow2(exponent) > magnitude {
        exponent -= 1;
    }
    while pow2(exponent + 1) <= magnitude {
        exponent += 1;
    }
    exponent
}

/// Repeated doubling of `fraction` in `[0, 1)`, one bit per step, truncated
/// or zero-padded to exactly `n_bits`.
fn fraction_bits(mut fraction: f64, n_bits: usize) -> DefaultBitArray {
    let mut bits = Vec::with_capacity(n_bits);
    while fraction > 0.0 && bits.len() < n_bits {
        fraction *= 2.0;
        if fraction >= 1.0 {
            bits.push(true);
            fraction -= 1.0;
        } else {
            bits.push(false);
        }
    }
    bits.resize(n_bits, false);
    DefaultBitArray::from_bits(&bits)
}

fn finish(pattern: Ieee754<DefaultBitArray>, explanation: Explanation) -> Conversion<String> {
    Conversion::new(pattern.to_bits_string(), explanation)
}

pub(crate) fn encode(value: f64, format: IeeeFormat) -> Conversion<String> {
    let (exponent_bits, mantissa_bits, bias) = format.params();
    let mut explanation = Explanation::new(format!("Converting {value} to IEEE 754 {format}:"));

    if value.is_nan() {
        trace!("NaN short-cut for {format}");
        explanation.push("Not a number (NaN): exponent all ones, leading mantissa bit set");
        return finish(Ieee754::new_nan(format), explanation);
    }
    if value == 0.0 {
        trace!("zero short-cut for {format}");
        explanation.push("Zero is represented with every bit cleared");
        return finish(Ieee754::new_zero_with_sign(format, false), explanation);
    }
    if value.is_infinite() {
        trace!("infinity short-cut for {format}");
        let sign = value < 0.0;
        explanation.push(if sign {
            "Negative infinity: sign 1, exponent all ones, mantissa all zeros"
        } else {
            "Positive infinity: sign 0, exponent all ones, mantissa all zeros"
        });
        return finish(Ieee754::new_infinity(format, sign), explanation);
    }

    let sign = value < 0.0;
    let magnitude = value.abs();
    explanation.push(format!(
        "1. Sign bit: {} ({})",
        u8::from(sign),
        if sign { "negative" } else { "positive" }
    ));

    let exponent = unbiased_exponent(magnitude);
    let biased = exponent + bias;
    if biased <= 0 {
        explanation.push(format!(
            "Magnitude too small for a normal {format} value, represented as zero"
        ));
        return finish(Ieee754::new_zero_with_sign(format, sign), explanation);
    }
    if biased >= format.special_exponent() {
        explanation.push(format!(
            "Magnitude too large for {format}, represented as infinity"
        ));
        return finish(Ieee754::new_infinity(format, sign), explanation);
    }

    let fraction = magnitude / pow2(exponent) - 1.0;
    let mantissa = fraction_bits(fraction, mantissa_bits);
    let exponent_field = DefaultBitArray::from_u128(biased as u128, exponent_bits);

    let exponent_string = exponent_field.to_bits_string();
    let mantissa_string = mantissa.to_bits_string();
    let pattern = Ieee754::new(format, sign, exponent_field, mantissa);
    let result = pattern.to_bits_string();

    explanation.extend([
        format!("2. True exponent: {exponent}"),
        format!("3. Biased exponent (E = e + {bias}): {biased}"),
        format!("4. Exponent in binary: {exponent_string}"),
        format!("5. Mantissa: {mantissa_string}"),
        String::new(),
        format!("Result: {result}"),
        format!("- Sign (1 bit): {}", u8::from(sign)),
        format!("- Exponent ({exponent_bits} bits): {exponent_string}"),
        format!("- Mantissa ({mantissa_bits} bits): {mantissa_string}"),
    ]);

    Conversion::new(result, explanation)
}
