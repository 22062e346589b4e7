//! Static lookup tables shared by the converters.
//!
//! Digits are stored uppercase. Group tables are indexed by digit value, so
//! `HEX_GROUPS[0xA] == "1010"` and `OCTAL_GROUPS[5] == "101"`.

pub const HEX_DIGITS: [char; 16] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'A', 'B', 'C', 'D', 'E', 'F',
];

pub const OCTAL_GROUPS: [&str; 8] = ["000", "001", "010", "011", "100", "101", "110", "111"];

pub const HEX_GROUPS: [&str; 16] = [
    "0000", "0001", "0010", "0011", "0100", "0101", "0110", "0111", "1000", "1001", "1010",
    "1011", "1100", "1101", "1110", "1111",
];

/// Bit complement table, indexed by the bit value.
pub const COMPLEMENT: [bool; 2] = [true, false];

pub fn complement_bit(bit: bool) -> bool {
    COMPLEMENT[usize::from(bit)]
}

/// Value of a single digit in bases up to 16. Accepts lowercase hex.
pub fn digit_value(digit: char) -> Option<u32> {
    let upper = digit.to_ascii_uppercase();
    HEX_DIGITS
        .iter()
        .position(|&d| d == upper)
        .map(|i| i as u32)
}

/// Digit character for a value below 16.
pub fn digit_char(value: u32) -> Option<char> {
    HEX_DIGITS.get(value as usize).copied()
}

pub fn group_to_octal(group: &str) -> Option<char> {
    OCTAL_GROUPS
        .iter()
        .position(|&g| g == group)
        .and_then(|i| digit_char(i as u32))
}

pub fn group_to_hex(group: &str) -> Option<char> {
    HEX_GROUPS
        .iter()
        .position(|&g| g == group)
        .and_then(|i| digit_char(i as u32))
}

pub fn octal_to_group(digit: char) -> Option<&'static str> {
    digit_value(digit).and_then(|v| OCTAL_GROUPS.get(v as usize).copied())
}

pub fn hex_to_group(digit: char) -> Option<&'static str> {
    digit_value(digit).and_then(|v| HEX_GROUPS.get(v as usize).copied())
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn test_groups_match_binary_formatting() {
        for (value, group) in OCTAL_GROUPS.iter().enumerate() {
            assert_eq!(*group, format!("{value:03b}"));
        }
        for (value, group) in HEX_GROUPS.iter().enumerate() {
            assert_eq!(*group, format!("{value:04b}"));
        }
    }

    #[rstest]
    #[case('0', Some(0))]
    #[case('7', Some(7))]
    #[case('A', Some(10))]
    #[case('f', Some(15))]
    #[case('G', None)]
    #[case('-', None)]
    fn test_digit_value(#[case] digit: char, #[case] expected: Option<u32>) {
        assert_eq!(digit_value(digit), expected);
    }

    #[rstest]
    fn test_group_lookups() {
        assert_eq!(group_to_octal("101"), Some('5'));
        assert_eq!(group_to_octal("1010"), None);
        assert_eq!(group_to_hex("1111"), Some('F'));
        assert_eq!(group_to_hex("111"), None);
        assert_eq!(octal_to_group('6'), Some("110"));
        assert_eq!(octal_to_group('8'), None);
        assert_eq!(hex_to_group('c'), Some("1100"));
        assert_eq!(hex_to_group('Z'), None);
    }

    #[rstest]
    fn test_complement_bit() {
        assert!(complement_bit(false));
        assert!(!complement_bit(true));
    }
}
