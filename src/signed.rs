//! Fixed-width two's complement encoding of signed decimal integers.

use log::trace;

use crate::bitarray::{BitArray, DefaultBitArray};
use crate::error::ConversionError;
use crate::explanation::{Conversion, Explanation};

/// Bit widths accepted by [`convert_to_signed_binary`].
pub const SIGNED_WIDTHS: [u32; 4] = [8, 16, 32, 64];

/// Inclusive range representable in `bits`-wide two's complement.
pub(crate) fn signed_range(bits: u32) -> (i128, i128) {
    let half = 1i128 << (bits - 1);
    (-half, half - 1)
}

/// Encodes the decimal integer `value` as a `bits`-wide two's complement
/// binary string.
///
/// Negative values go through magnitude, one's complement, then `+1` modulo
/// `2^bits`; each stage is recorded in the explanation.
///
/// ```rust
/// use radix_steps::convert_to_signed_binary;
///
/// assert_eq!(convert_to_signed_binary("-5", 8).unwrap().value, "11111011");
/// assert_eq!(convert_to_signed_binary("5", 8).unwrap().value, "00000101");
/// assert!(convert_to_signed_binary("128", 8).is_err());
/// ```
pub fn convert_to_signed_binary(
    value: &str,
    bits: u32,
) -> Result<Conversion<String>, ConversionError> {
    if !SIGNED_WIDTHS.contains(&bits) {
        return Err(ConversionError::UnsupportedBitWidth(bits));
    }
    let number: i128 = value
        .trim()
        .parse()
        .map_err(|_| ConversionError::NotAnInteger(value.to_string()))?;

    let (min, max) = signed_range(bits);
    if !(min..=max).contains(&number) {
        return Err(ConversionError::OutOfRange {
            value: number,
            min,
            max,
        });
    }

    let width = bits as usize;
    let magnitude = DefaultBitArray::from_u128(number.unsigned_abs(), width);
    let mut explanation = Explanation::new(format!("Converting {number} to signed binary:"));

    if number >= 0 {
        let binary = magnitude.to_bits_string();
        explanation.push(format!("1. Convert to {bits}-bit binary: {binary}"));
        explanation.push("The number is non-negative, so no further steps are needed.");
        return Ok(Conversion::new(binary, explanation));
    }

    trace!("two's complement of {number} in {bits} bits");
    explanation.push(format!("1. Drop the minus sign: {}", number.unsigned_abs()));
    explanation.push(format!(
        "2. Convert to {bits}-bit binary: {}",
        magnitude.to_bits_string()
    ));

    let ones = magnitude.complement();
    explanation.push(format!(
        "3. One's complement (flip every bit): {}",
        ones.to_bits_string()
    ));

    let twos = ones.wrapping_increment().to_bits_string();
    explanation.push(format!("4. Add 1 to get the two's complement: {twos}"));

    Ok(Conversion::new(twos, explanation))
}
