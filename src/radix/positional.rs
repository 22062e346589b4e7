//! Conversions through decimal: positional-weight summation into base 10 and
//! descending-power division out of it.

use crate::base::Base;
use crate::error::ConversionError;
use crate::explanation::Explanation;
use crate::tables;

fn too_large(digits: &str) -> ConversionError {
    ConversionError::TooLarge {
        input: digits.to_string(),
    }
}

/// Sums `digit * from^position`, reading from the least significant digit.
/// `digits` must already be validated for `from`.
pub(crate) fn to_decimal(
    digits: &str,
    from: Base,
    explanation: &mut Explanation,
) -> Result<String, ConversionError> {
    let radix = u128::from(from.radix());
    let significant = match digits.trim_start_matches('0') {
        "" => "0",
        rest => rest,
    };
    if significant.len() < digits.len() {
        explanation.push(format!("Drop the leading zeros: {significant}"));
    }
    explanation.push(format!("Multiply each digit by a power of {from}:"));

    let mut total: u128 = 0;
    for (position, digit) in significant.chars().rev().enumerate() {
        let value = tables::digit_value(digit).ok_or(ConversionError::InvalidDigit {
            digit,
            base: from,
        })?;
        let weight = u32::try_from(position)
            .ok()
            .and_then(|p| radix.checked_pow(p))
            .ok_or_else(|| too_large(digits))?;
        let contribution = u128::from(value)
            .checked_mul(weight)
            .ok_or_else(|| too_large(digits))?;
        total = total
            .checked_add(contribution)
            .ok_or_else(|| too_large(digits))?;
        explanation.push(format!(
            "  {digit} * {from}^{position} = {value} * {weight} = {contribution}"
        ));
    }

    explanation.push(format!("Sum: {total}"));
    Ok(total.to_string())
}

/// Emits one digit per descending power of `to`, starting from the largest
/// power not exceeding the value. `digits` must be a validated decimal string.
pub(crate) fn from_decimal(
    digits: &str,
    to: Base,
    explanation: &mut Explanation,
) -> Result<String, ConversionError> {
    let decimal: u128 = digits.parse().map_err(|_| too_large(digits))?;
    if decimal == 0 {
        explanation.push("Zero is written 0 in every base.");
        return Ok("0".to_string());
    }

    let radix = u128::from(to.radix());
    let mut max_power: u32 = 0;
    let mut temp = decimal;
    while temp >= radix {
        temp /= radix;
        max_power += 1;
    }

    explanation.push(format!(
        "1. Largest power of {to} not exceeding {decimal}: {to}^{max_power} = {}",
        radix.pow(max_power)
    ));
    explanation.push("");
    explanation.push("2. Build the number from left to right:");

    let mut result = String::with_capacity(max_power as usize + 1);
    let mut remaining = decimal;
    for power in (0..=max_power).rev() {
        let weight = radix.pow(power);
        let quotient = remaining / weight;
        let before = remaining;
        remaining -= quotient * weight;

        // quotient < radix <= 16 by construction of max_power
        let digit = tables::digit_char(quotient as u32).ok_or_else(|| too_large(digits))?;
        result.push(digit);

        let mut line = format!("  - {before} ÷ {to}^{power} = {quotient}");
        if to == Base::Hexadecimal {
            line.push_str(&format!(" ({digit})"));
        }
        line.push_str(&format!(" (remainder {remaining})"));
        explanation.push(line);
    }

    Ok(result)
}
