use std::ops::{Index, IndexMut, Range};

use crate::tables;

pub mod boolean_list;

pub use boolean_list::BoolBitArray;

pub type DefaultBitArray = BoolBitArray;

/// MSB-first bit order: index 0 is the most significant bit, which is also
/// the first character of [`BitArray::to_bits_string`].
pub trait BitArray {
    fn from_bits(bits: &[bool]) -> Self
    where
        Self: Sized;

    /// Lowest `n_bits` bits of `value`, zero-padded on the left.
    fn from_u128(value: u128, n_bits: usize) -> Self
    where
        Self: Sized,
    {
        let bits: Vec<bool> = (0..n_bits)
            .rev()
            .map(|i| i < 128 && (value >> i) & 1 == 1)
            .collect();
        Self::from_bits(&bits)
    }

    /// Parses a string of `'0'`/`'1'` characters. Returns `None` on any other
    /// character.
    fn from_bits_str(s: &str) -> Option<Self>
    where
        Self: Sized,
    {
        let bits = s
            .chars()
            .map(|c| match c {
                '0' => Some(false),
                '1' => Some(true),
                _ => None,
            })
            .collect::<Option<Vec<bool>>>()?;
        Some(Self::from_bits(&bits))
    }

    fn zeros(n_bits: usize) -> Self
    where
        Self: Sized,
    {
        Self::from_bits(&vec![false; n_bits])
    }

    fn ones(n_bits: usize) -> Self
    where
        Self: Sized,
    {
        Self::from_bits(&vec![true; n_bits])
    }

    fn to_bits(&self) -> Vec<bool> {
        self.iter_bits().collect()
    }

    /// `None` when the array is wider than 128 bits.
    fn to_u128(&self) -> Option<u128> {
        if self.len() > 128 {
            return None;
        }
        Some(
            self.iter_bits()
                .fold(0u128, |acc, bit| (acc << 1) | u128::from(bit)),
        )
    }

    fn to_bits_string(&self) -> String {
        self.iter_bits()
            .map(|b| if b { '1' } else { '0' })
            .collect()
    }

    fn iter_bits(&self) -> impl Iterator<Item = bool>;

    fn len(&self) -> usize;
    fn get(&self, index: usize) -> Option<&bool>;
    fn get_mut(&mut self, index: usize) -> Option<&mut bool>;

    fn get_range(&self, range: Range<usize>) -> Option<Self>
    where
        Self: Sized,
    {
        if range.end > self.len() || range.start > range.end {
            return None;
        }
        let bits: Vec<bool> = self.iter_bits().skip(range.start).take(range.len()).collect();
        Some(Self::from_bits(&bits))
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn all_zeros(&self) -> bool {
        self.iter_bits().all(|b| !b)
    }

    fn all_ones(&self) -> bool {
        self.iter_bits().all(|b| b)
    }

    /// One's complement: every bit flipped through the complement table.
    fn complement(&self) -> Self
    where
        Self: Sized,
    {
        let bits: Vec<bool> = self.iter_bits().map(tables::complement_bit).collect();
        Self::from_bits(&bits)
    }

    /// Adds one modulo `2^len`, discarding the carry out of the top bit.
    fn wrapping_increment(self) -> Self
    where
        Self: Sized;
}

macro_rules! impl_index {
    ($t:ty) => {
        impl Index<usize> for $t {
            type Output = bool;

            fn index(&self, index: usize) -> &Self::Output {
                self.get(index).expect("Index out of bounds")
            }
        }

        impl IndexMut<usize> for $t {
            fn index_mut(&mut self, index: usize) -> &mut Self::Output {
                self.get_mut(index).expect("Index out of bounds")
            }
        }
    };
}

impl_index!(BoolBitArray);

#[cfg(test)]
mod tests {
    pub use rand::Rng;

    pub fn random_bits(rng: &mut impl Rng, len: usize) -> Vec<bool> {
        (0..len).map(|_| rng.random_bool(0.5)).collect()
    }

    pub fn random_bits_string(rng: &mut impl Rng, len: usize) -> String {
        (0..len)
            .map(|_| if rng.random_bool(0.5) { '1' } else { '0' })
            .collect()
    }

    pub fn string_to_bits(s: &str) -> Vec<bool> {
        s.chars().map(|c| c == '1').collect()
    }
}
