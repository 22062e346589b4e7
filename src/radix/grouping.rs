//! Direct binary <-> octal/hex conversion by fixed-width bit groups.

use crate::base::Base;
use crate::error::ConversionError;
use crate::explanation::Explanation;
use crate::tables;

fn strip_leading_zeros(digits: &str) -> String {
    let stripped = digits.trim_start_matches('0');
    if stripped.is_empty() {
        "0".to_string()
    } else {
        stripped.to_string()
    }
}

fn group_lookup(base: Base) -> fn(&str) -> Option<char> {
    match base {
        Base::Octal => tables::group_to_octal,
        _ => tables::group_to_hex,
    }
}

fn digit_lookup(base: Base) -> fn(char) -> Option<&'static str> {
    match base {
        Base::Octal => tables::octal_to_group,
        _ => tables::hex_to_group,
    }
}

/// Left-pads `bits` to a multiple of the group width of `to`, then maps each
/// group to one digit.
pub(crate) fn binary_to_grouped(
    bits: &str,
    to: Base,
    explanation: &mut Explanation,
) -> Result<String, ConversionError> {
    let Some(width) = to.group_width() else {
        return Err(ConversionError::UnsupportedBase(to.radix()));
    };
    let lookup = group_lookup(to);

    let padding = (width - bits.len() % width) % width;
    let padded = format!("{}{bits}", "0".repeat(padding));

    explanation.push(format!("Group the bits into groups of {width}:"));
    let chars: Vec<char> = padded.chars().collect();
    let mut result = String::with_capacity(chars.len() / width);
    for chunk in chars.chunks(width) {
        let group: String = chunk.iter().collect();
        let digit = lookup(&group)
            .ok_or_else(|| ConversionError::InvalidBitPattern(bits.to_string()))?;
        explanation.push(format!("  {group} (2) = {digit} ({to})"));
        result.push(digit);
    }

    let result = strip_leading_zeros(&result);
    explanation.push(format!("Result: {result}"));
    Ok(result)
}

/// Replaces each octal/hex digit with its fixed-width bit group.
pub(crate) fn grouped_to_binary(
    digits: &str,
    from: Base,
    explanation: &mut Explanation,
) -> Result<String, ConversionError> {
    if from.group_width().is_none() {
        return Err(ConversionError::UnsupportedBase(from.radix()));
    }
    let lookup = digit_lookup(from);

    explanation.push("Convert each digit to binary:");
    let mut bits = String::new();
    for digit in digits.chars() {
        let group = lookup(digit).ok_or(ConversionError::InvalidDigit { digit, base: from })?;
        explanation.push(format!("  {digit} ({from}) = {group} (2)"));
        bits.push_str(group);
    }

    let result = strip_leading_zeros(&bits);
    explanation.push(format!("Join the bit groups: {result}"));
    Ok(result)
}
