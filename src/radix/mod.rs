//! # Base Conversion
//!
//! Converts integer digit strings between bases 2, 8, 10 and 16, recording
//! every step of the derivation.
//!
//! ## Paths
//!
//! - `x -> 10`: positional weights, `digit * from^position`
//! - `10 -> x`: descending powers of the target base
//! - `2 <-> 8`, `2 <-> 16`: fixed-width bit groups (3 or 4 bits per digit)
//! - `8 <-> 16`: through binary, with both derivations concatenated
//!
//! ```rust
//! use radix_steps::convert_base;
//!
//! let conversion = convert_base("FF", 16, 10).unwrap();
//! assert_eq!(conversion.value, "255");
//!
//! let conversion = convert_base("255", 10, 2).unwrap();
//! assert_eq!(conversion.value, "11111111");
//! ```

use log::trace;

use crate::base::Base;
use crate::error::ConversionError;
use crate::explanation::{Conversion, Explanation};

mod grouping;
mod positional;

/// Converts `digits` from `from_base` to `to_base`.
///
/// Hex digits are accepted in either case and produced uppercase. When both
/// bases are equal the input is returned unchanged, after validation.
///
/// # Errors
///
/// - [`ConversionError::UnsupportedBase`] if either base is not 2, 8, 10 or 16
/// - [`ConversionError::InvalidNumber`] if `digits` is empty
/// - [`ConversionError::InvalidDigit`] if a character is outside `from_base`
/// - [`ConversionError::TooLarge`] if the value exceeds `u128`
pub fn convert_base(
    digits: &str,
    from_base: u32,
    to_base: u32,
) -> Result<Conversion<String>, ConversionError> {
    let from = Base::try_from(from_base)?;
    let to = Base::try_from(to_base)?;
    convert(digits, from, to)
}

pub(crate) fn convert(
    digits: &str,
    from: Base,
    to: Base,
) -> Result<Conversion<String>, ConversionError> {
    if digits.is_empty() {
        return Err(ConversionError::InvalidNumber {
            input: digits.to_string(),
        });
    }
    from.validate(digits)?;

    if from == to {
        return Ok(Conversion::new(
            digits.to_string(),
            Explanation::new("No conversion needed: source and target base are the same."),
        ));
    }

    let digits = digits.to_ascii_uppercase();
    let mut explanation =
        Explanation::new(format!("Converting {digits} from base {from} to base {to}:"));
    explanation.push("");

    let value = match (from, to) {
        (_, Base::Decimal) => {
            trace!("positional conversion {digits} ({from}) -> 10");
            positional::to_decimal(&digits, from, &mut explanation)?
        }
        (Base::Decimal, _) => {
            trace!("descending-power conversion {digits} (10) -> {to}");
            positional::from_decimal(&digits, to, &mut explanation)?
        }
        (Base::Binary, _) => {
            trace!("grouping {digits} (2) -> {to}");
            grouping::binary_to_grouped(&digits, to, &mut explanation)?
        }
        (_, Base::Binary) => {
            trace!("ungrouping {digits} ({from}) -> 2");
            grouping::grouped_to_binary(&digits, from, &mut explanation)?
        }
        _ => {
            trace!("pivot through binary {digits} ({from}) -> {to}");
            let (bits, first) = convert(&digits, from, Base::Binary)?.into_parts();
            let (value, second) = convert(&bits, Base::Binary, to)?.into_parts();
            let mut explanation = first;
            explanation.push("");
            explanation.push("Then:");
            explanation.append(second);
            return Ok(Conversion::new(value, explanation));
        }
    };

    Ok(Conversion::new(value, explanation))
}

/// Converts `digits` to every supported base other than `from_base`, in
/// ascending base order. Explanations are dropped; call [`convert_base`] for
/// a single target to get one.
pub fn convert_to_all_bases(
    digits: &str,
    from_base: u32,
) -> Result<Vec<(Base, String)>, ConversionError> {
    let from = Base::try_from(from_base)?;
    Base::ALL
        .into_iter()
        .filter(|&to| to != from)
        .map(|to| convert(digits, from, to).map(|c| (to, c.value)))
        .collect()
}
