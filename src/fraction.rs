//! Real numbers as sign, integer bits and a bounded run of fractional bits.

use crate::error::ConversionError;
use crate::explanation::{Conversion, Explanation};

const F64_MANTISSA_BITS: u32 = 52;
const F64_EXPONENT_BIAS: i64 = 1023;

/// Binary digits of the integer part of a finite, non-negative `value`.
///
/// Values of 2^64 and above are rebuilt from the float's own significand and
/// exponent, which is exact because such floats have no fractional part.
fn integer_binary(value: f64) -> String {
    let int_part = value.trunc();
    if int_part < 18_446_744_073_709_551_616.0 {
        return format!("{:b}", int_part as u64);
    }
    let bits = int_part.to_bits();
    let exponent = ((bits >> F64_MANTISSA_BITS) & 0x7ff) as i64 - F64_EXPONENT_BIAS;
    let significand = (bits & ((1u64 << F64_MANTISSA_BITS) - 1)) | (1u64 << F64_MANTISSA_BITS);
    let shift = (exponent - i64::from(F64_MANTISSA_BITS)).max(0) as usize;
    format!("{significand:b}{}", "0".repeat(shift))
}

/// Converts the real number in `value` to plain binary with at most
/// `precision` fractional bits.
///
/// The fraction is expanded by repeated doubling and stops early once the
/// remainder is exactly zero. The result carries an explicit `+` or `-`
/// sign: `"5.5"` becomes `"+101.1"`.
///
/// # Errors
///
/// [`ConversionError::NotANumber`] if `value` does not parse as a float and
/// [`ConversionError::NegativePrecision`] if `precision < 0`.
pub fn convert_float_to_binary(
    value: &str,
    precision: i32,
) -> Result<Conversion<String>, ConversionError> {
    let number: f64 = value
        .trim()
        .parse()
        .map_err(|_| ConversionError::NotANumber(value.to_string()))?;
    if precision < 0 {
        return Err(ConversionError::NegativePrecision(precision));
    }

    if number == 0.0 {
        return Ok(Conversion::new(
            "0".to_string(),
            Explanation::new("Zero is 0 in binary."),
        ));
    }
    if number.is_nan() {
        return Ok(Conversion::new(
            "NaN".to_string(),
            Explanation::new("Not a number (NaN)."),
        ));
    }
    if number.is_infinite() {
        let result = if number < 0.0 { "-inf" } else { "inf" };
        return Ok(Conversion::new(
            result.to_string(),
            Explanation::new(format!("Infinity ({result}).")),
        ));
    }

    let sign = if number < 0.0 { '-' } else { '+' };
    let magnitude = number.abs();
    let int_part = magnitude.trunc();
    let int_binary = integer_binary(magnitude);
    let fraction = magnitude - int_part;

    let mut fraction_bits = String::new();
    let mut steps = Vec::new();
    let mut current = fraction;
    for _ in 0..precision {
        if current == 0.0 {
            break;
        }
        let before = current;
        current *= 2.0;
        let bit = current >= 1.0;
        fraction_bits.push(if bit { '1' } else { '0' });
        steps.push(format!(
            "   * {before:.6} × 2 = {current:.6} → {}",
            u8::from(bit)
        ));
        if bit {
            current -= 1.0;
        }
    }

    let mut result = format!("{sign}{int_binary}");
    if !fraction_bits.is_empty() {
        result.push('.');
        result.push_str(&fraction_bits);
    }

    let mut explanation =
        Explanation::new(format!("Converting the real number {} to binary:", value.trim()));
    explanation.push(format!("1. Sign: {sign}"));
    explanation.push(format!("2. Convert the integer part {int_part}:"));
    explanation.push(format!("   {int_part} (10) = {int_binary} (2)"));
    if fraction_bits.is_empty() {
        explanation.push("3. There is no fractional part");
    } else {
        explanation.push(format!("3. Convert the fractional part {fraction:.6}:"));
        explanation.extend(steps);
    }
    explanation.push(format!("Final result: {result}"));

    Ok(Conversion::new(result, explanation))
}

#[cfg(test)]
mod tests {
    use rand::Rng;
    use rstest::rstest;

    use super::*;
    use crate::tests::*;

    #[rstest]
    #[case("5.5", 10, "+101.1")]
    #[case("-5.5", 10, "-101.1")]
    #[case("0.625", 10, "+0.101")]
    #[case("10", 10, "+1010")]
    #[case("0.1", 4, "+0.0001")]
    #[case("0.1", 0, "+0")]
    #[case("0", 10, "0")]
    #[case("-0.0", 10, "0")]
    #[case("nan", 10, "NaN")]
    #[case("inf", 10, "inf")]
    #[case("-inf", 10, "-inf")]
    fn test_convert_float_to_binary(
        #[case] value: &str,
        #[case] precision: i32,
        #[case] expected: &str,
    ) {
        assert_eq!(
            convert_float_to_binary(value, precision).unwrap().value,
            expected
        );
    }

    #[rstest]
    fn test_fraction_steps() {
        let conversion = convert_float_to_binary("2.75", 10).unwrap();
        assert_eq!(conversion.value, "+10.11");
        assert_eq!(
            conversion.explanation.lines(),
            [
                "Converting the real number 2.75 to binary:",
                "1. Sign: +",
                "2. Convert the integer part 2:",
                "   2 (10) = 10 (2)",
                "3. Convert the fractional part 0.750000:",
                "   * 0.750000 × 2 = 1.500000 → 1",
                "   * 0.500000 × 2 = 1.000000 → 1",
                "Final result: +10.11",
            ]
        );
    }

    #[rstest]
    fn test_errors() {
        assert_eq!(
            convert_float_to_binary("1,5", 10),
            Err(ConversionError::NotANumber("1,5".to_string()))
        );
        assert_eq!(
            convert_float_to_binary("1.5", -1),
            Err(ConversionError::NegativePrecision(-1))
        );
    }

    #[rstest]
    fn test_large_integer_part() {
        let conversion = convert_float_to_binary("1e30", 10).unwrap();
        let expected = format!("+{:b}", 1e30f64 as u128);
        assert_eq!(conversion.value, expected);
    }

    #[rstest]
    fn test_dyadic_fractions_are_exact(mut rng: impl Rng, n_experiments: usize) {
        for _ in 0..n_experiments {
            let int_part: u32 = rng.random();
            let numerator: u32 = rng.random_range(1..1024);
            let value = f64::from(int_part) + f64::from(numerator) / 1024.0;

            let conversion = convert_float_to_binary(&value.to_string(), 10).unwrap();
            let expected_fraction = format!("{numerator:010b}");
            let expected = format!(
                "+{int_part:b}.{}",
                expected_fraction.trim_end_matches('0')
            );
            assert_eq!(conversion.value, expected);
        }
    }
}
