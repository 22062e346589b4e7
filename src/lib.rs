//! # radix-steps
//!
//! Number-system conversions that show their work. Every operation returns
//! the converted value together with an [`Explanation`]: the ordered,
//! human-readable steps a student would write down to reach the same result.
//!
//! ## Overview
//!
//! radix-steps provides:
//! - **Base detection**: pick the smallest of base 2, 8, 10 or 16 whose
//!   alphabet covers a digit string
//! - **Base conversion**: positional expansion to decimal, repeated division
//!   by descending powers from decimal, and 3/4-bit grouping between binary
//!   and octal or hexadecimal
//! - **Two's complement**: signed integers in 8, 16, 32 or 64 bits
//! - **Fractional binary**: real numbers expanded by repeated doubling
//! - **IEEE 754**: encoding to and decoding from binary32 and binary64 bit
//!   strings
//! - **Memoization**: a thread-safe [`Converter`] that caches results in a
//!   bounded LRU cache
//!
//! ## Architecture
//!
//! ### BitArray Module
//! Fixed-width bit storage used for two's complement and for the IEEE 754
//! fields, behind the [`BitArray`] trait.
//!
//! ### IEEE 754 Module
//! [`Ieee754`] splits a value into sign, exponent and mantissa fields over
//! any [`BitArray`] backing.
//!
//! ## Quick Start
//!
//! ```rust
//! use radix_steps::{convert_base, detect_base, Base};
//!
//! assert_eq!(detect_base("FA").unwrap(), Base::Hexadecimal);
//!
//! let conversion = convert_base("FA", 16, 2).unwrap();
//! assert_eq!(conversion.value, "11111010");
//! println!("{}", conversion.explanation);
//! ```
//!
//! ## Errors
//!
//! Every fallible operation returns [`ConversionError`]; no operation panics
//! on user input.
//!
//! ```rust
//! use radix_steps::{convert_to_signed_binary, ConversionError};
//!
//! assert!(matches!(
//!     convert_to_signed_binary("128", 8),
//!     Err(ConversionError::OutOfRange { .. })
//! ));
//! ```

pub mod base;
pub mod bitarray;
pub mod converter;
mod error;
pub mod explanation;
pub mod fraction;
pub mod ieee754;
pub mod radix;
pub mod signed;
pub mod tables;

pub use base::{Base, detect_base};
pub use bitarray::{BitArray, BoolBitArray, DefaultBitArray};
pub use converter::{CacheStats, Converter, ConverterConfig};
pub use error::ConversionError;
pub use explanation::{Conversion, Explanation};
pub use fraction::convert_float_to_binary;
pub use ieee754::decode::{ieee754_to_decimal, ieee754_to_decimal_with, is_ieee754_binary};
pub use ieee754::encode::decimal_to_ieee754;
pub use ieee754::{Ieee754, IeeeFormat, SubnormalMode};
pub use radix::{convert_base, convert_to_all_bases};
pub use signed::convert_to_signed_binary;

pub mod prelude {
    //! Prelude module for radix-steps.
    //!
    //! Re-exports the conversion functions and their result types.

    pub use crate::base::{Base, detect_base};
    pub use crate::converter::{Converter, ConverterConfig};
    pub use crate::error::ConversionError;
    pub use crate::explanation::{Conversion, Explanation};
    pub use crate::fraction::convert_float_to_binary;
    pub use crate::ieee754::decode::{ieee754_to_decimal, is_ieee754_binary};
    pub use crate::ieee754::encode::decimal_to_ieee754;
    pub use crate::ieee754::{IeeeFormat, SubnormalMode};
    pub use crate::radix::{convert_base, convert_to_all_bases};
    pub use crate::signed::convert_to_signed_binary;
}

#[cfg(test)]
mod tests {
    use std::sync::OnceLock;

    use rand::{Rng, SeedableRng, rngs::StdRng};
    use rstest::fixture;

    static SEED: OnceLock<u64> = OnceLock::new();

    #[fixture]
    pub const fn n_experiments() -> usize {
        10_000
    }

    #[fixture]
    pub fn seed() -> u64 {
        *SEED.get_or_init(|| rand::rng().random())
    }

    #[fixture]
    pub fn rng(n_experiments: usize, seed: u64) -> impl Rng {
        println!("{} experiments with seed {}", n_experiments, seed);
        StdRng::seed_from_u64(seed)
    }

    pub fn random_normal_f64(mut rng: impl Rng) -> f64 {
        loop {
            let float = f64::from_bits(rng.random());
            if float.is_normal() {
                return float;
            }
        }
    }
}
