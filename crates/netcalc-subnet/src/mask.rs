//! Subnet and wildcard masks
//!
//! All mask arithmetic lives here. Shifting a value by its full bit width
//! panics (or wraps) in Rust, so prefix 0 is special-cased explicitly.

use crate::codec::parse_ipv4;
use netcalc_core::{CalcError, Result};

/// Longest IPv4 prefix
pub const MAX_PREFIX_V4: u8 = 32;

/// Longest IPv6 prefix
pub const MAX_PREFIX_V6: u8 = 128;

/// Subnet mask with the top `prefix` bits set
///
/// ```
/// use netcalc_subnet::mask::mask_from_prefix;
///
/// assert_eq!(mask_from_prefix(29).unwrap(), 0xFFFFFFF8);
/// assert_eq!(mask_from_prefix(0).unwrap(), 0);
/// ```
pub fn mask_from_prefix(prefix: u8) -> Result<u32> {
    if prefix > MAX_PREFIX_V4 {
        return Err(CalcError::OutOfRange(format!(
            "prefix /{} exceeds /{}",
            prefix, MAX_PREFIX_V4
        )));
    }

    Ok(if prefix == 0 {
        0
    } else {
        u32::MAX << (MAX_PREFIX_V4 - prefix)
    })
}

/// 128-bit mask with the top `prefix` bits set
pub fn mask_from_prefix_v6(prefix: u8) -> Result<u128> {
    if prefix > MAX_PREFIX_V6 {
        return Err(CalcError::OutOfRange(format!(
            "prefix /{} exceeds /{}",
            prefix, MAX_PREFIX_V6
        )));
    }

    Ok(if prefix == 0 {
        0
    } else {
        u128::MAX << (MAX_PREFIX_V6 - prefix)
    })
}

/// Wildcard (host) mask: the complement of `mask`
pub fn wildcard_from_mask(mask: u32) -> u32 {
    !mask
}

/// Mask as four dot-joined, zero-padded 8-bit groups
///
/// ```
/// use netcalc_subnet::mask::binary_representation;
///
/// assert_eq!(
///     binary_representation(0xFFFFFFF8),
///     "11111111.11111111.11111111.11111000"
/// );
/// ```
pub fn binary_representation(mask: u32) -> String {
    let [a, b, c, d] = mask.to_be_bytes();
    format!("{:08b}.{:08b}.{:08b}.{:08b}", a, b, c, d)
}

/// Prefix length of a contiguous mask
///
/// Fails with [`CalcError::InvalidFormat`] when the set bits are not a
/// single run starting at the most significant bit.
pub fn prefix_from_mask(mask: u32) -> Result<u8> {
    let ones = mask.leading_ones();
    if ones + mask.trailing_zeros() < 32 {
        return Err(CalcError::InvalidFormat(format!(
            "mask {:#010x} is not contiguous",
            mask
        )));
    }
    Ok(ones as u8)
}

/// Parse a dotted-decimal subnet mask into its prefix length
pub fn parse_mask(text: &str) -> Result<u8> {
    prefix_from_mask(parse_ipv4(text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use netcalc_core::ErrorKind;

    #[test]
    fn test_mask_from_prefix() {
        assert_eq!(mask_from_prefix(0).unwrap(), 0x00000000);
        assert_eq!(mask_from_prefix(1).unwrap(), 0x80000000);
        assert_eq!(mask_from_prefix(8).unwrap(), 0xFF000000);
        assert_eq!(mask_from_prefix(24).unwrap(), 0xFFFFFF00);
        assert_eq!(mask_from_prefix(32).unwrap(), 0xFFFFFFFF);
    }

    #[test]
    fn test_mask_out_of_range() {
        assert_eq!(mask_from_prefix(33).unwrap_err().kind(), ErrorKind::OutOfRange);
        assert_eq!(mask_from_prefix_v6(129).unwrap_err().kind(), ErrorKind::OutOfRange);
    }

    #[test]
    fn test_mask_from_prefix_v6() {
        assert_eq!(mask_from_prefix_v6(0).unwrap(), 0);
        assert_eq!(mask_from_prefix_v6(128).unwrap(), u128::MAX);
        assert_eq!(mask_from_prefix_v6(64).unwrap(), 0xFFFF_FFFF_FFFF_FFFF_0000_0000_0000_0000);
    }

    #[test]
    fn test_wildcard() {
        assert_eq!(wildcard_from_mask(0xFFFFFFF8), 0x00000007);
        assert_eq!(wildcard_from_mask(0), u32::MAX);
    }

    #[test]
    fn test_binary_representation() {
        assert_eq!(
            binary_representation(0),
            "00000000.00000000.00000000.00000000"
        );
        assert_eq!(
            binary_representation(0xFFFF8000),
            "11111111.11111111.10000000.00000000"
        );
    }

    #[test]
    fn test_prefix_from_mask() {
        assert_eq!(prefix_from_mask(0).unwrap(), 0);
        assert_eq!(prefix_from_mask(u32::MAX).unwrap(), 32);
        assert_eq!(prefix_from_mask(0xFFFFFE00).unwrap(), 23);
        assert_eq!(
            prefix_from_mask(0xFF00FF00).unwrap_err().kind(),
            ErrorKind::InvalidFormat
        );
    }

    #[test]
    fn test_parse_mask() {
        assert_eq!(parse_mask("255.255.255.248").unwrap(), 29);
        assert_eq!(parse_mask("0.0.0.0").unwrap(), 0);
        assert!(parse_mask("255.0.255.0").is_err());
        assert!(parse_mask("255.255.256.0").is_err());
    }
}
