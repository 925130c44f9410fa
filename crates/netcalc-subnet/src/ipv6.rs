//! IPv6 blocks
//!
//! Literal parsing is delegated to [`std::net::Ipv6Addr`], which handles
//! zero compression and embedded IPv4 tails. IPv6 has no broadcast address,
//! so every address in a block counts towards its host count.

use crate::codec::{parse_prefix, split_cidr};
use crate::mask::{mask_from_prefix_v6, MAX_PREFIX_V6};
use netcalc_core::{CalcError, Result};
use num_bigint::BigUint;
use std::fmt;
use std::net::Ipv6Addr;
use tracing::trace;

/// IPv6 address plus prefix length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ipv6Block {
    address: u128,
    prefix_len: u8,
    mask: u128,
}

/// Parse an IPv6 literal and pair it with `prefix`
///
/// # Errors
///
/// * [`CalcError::InvalidAddress`] - the literal is malformed
/// * [`CalcError::OutOfRange`] - `prefix` exceeds 128
pub fn parse_ipv6_with_prefix(text: &str, prefix: u8) -> Result<Ipv6Block> {
    let address: Ipv6Addr = text.parse().map_err(|_| {
        trace!(input = text, "rejecting IPv6 literal");
        CalcError::InvalidAddress(format!("{:?} is not a valid IPv6 literal", text))
    })?;
    compute_ipv6_block(address, prefix)
}

/// Parse `address/prefix` IPv6 notation
///
/// ```
/// use netcalc_subnet::ipv6::parse_ipv6_cidr;
///
/// let block = parse_ipv6_cidr("2001:db8::1/64").unwrap();
/// assert_eq!(block.start().to_string(), "2001:db8::");
/// ```
pub fn parse_ipv6_cidr(text: &str) -> Result<Ipv6Block> {
    let (address, prefix) = split_cidr(text)?;
    let prefix = parse_prefix(prefix, MAX_PREFIX_V6)?;
    parse_ipv6_with_prefix(address, prefix)
}

/// Compute the block containing `address` under `prefix`
pub fn compute_ipv6_block(address: Ipv6Addr, prefix: u8) -> Result<Ipv6Block> {
    let mask = mask_from_prefix_v6(prefix)?;
    Ok(Ipv6Block {
        address: u128::from(address),
        prefix_len: prefix,
        mask,
    })
}

impl Ipv6Block {
    pub fn address(&self) -> Ipv6Addr {
        Ipv6Addr::from(self.address)
    }

    pub fn prefix_len(&self) -> u8 {
        self.prefix_len
    }

    /// Number of host bits, 128 - prefix
    pub fn host_bits(&self) -> u8 {
        MAX_PREFIX_V6 - self.prefix_len
    }

    /// Network address (all host bits zero)
    pub fn start(&self) -> Ipv6Addr {
        Ipv6Addr::from(self.address & self.mask)
    }

    /// Highest address in the block
    pub fn end(&self) -> Ipv6Addr {
        Ipv6Addr::from((self.address & self.mask) | !self.mask)
    }

    /// Number of addresses, 2^(128 - prefix)
    ///
    /// A /0 holds 2^128 addresses, one more than `u128` can represent.
    pub fn host_count(&self) -> BigUint {
        BigUint::from(1u8) << usize::from(self.host_bits())
    }

    /// RFC 5952 text of the address (lowercase, longest zero run compressed)
    pub fn canonical(&self) -> String {
        self.address().to_string()
    }

    /// All eight hextets, zero-padded to four digits
    pub fn expanded(&self) -> String {
        expand(self.address())
    }

    pub fn contains(&self, ip: Ipv6Addr) -> bool {
        (u128::from(ip) & self.mask) == (self.address & self.mask)
    }
}

/// Fully expanded form of an IPv6 address
pub fn expand(address: Ipv6Addr) -> String {
    address
        .segments()
        .iter()
        .map(|s| format!("{:04x}", s))
        .collect::<Vec<_>>()
        .join(":")
}

impl fmt::Display for Ipv6Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.address(), self.prefix_len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use netcalc_core::ErrorKind;

    #[test]
    fn test_documentation_prefix() {
        let block = parse_ipv6_with_prefix("2001:db8::1", 64).unwrap();
        assert_eq!(block.canonical(), "2001:db8::1");
        assert_eq!(block.start().to_string(), "2001:db8::");
        assert_eq!(block.end().to_string(), "2001:db8::ffff:ffff:ffff:ffff");
        assert_eq!(block.host_bits(), 64);
        assert_eq!(block.host_count().to_string(), "18446744073709551616");
    }

    #[test]
    fn test_expanded_form() {
        let block = parse_ipv6_with_prefix("2001:db8::1", 64).unwrap();
        assert_eq!(
            block.expanded(),
            "2001:0db8:0000:0000:0000:0000:0000:0001"
        );
    }

    #[test]
    fn test_canonical_lowercases_and_compresses() {
        let block = parse_ipv6_with_prefix("2001:0DB8:0000:0000:0000:0000:0000:0001", 128).unwrap();
        assert_eq!(block.canonical(), "2001:db8::1");
    }

    #[test]
    fn test_embedded_ipv4() {
        let block = parse_ipv6_with_prefix("::ffff:192.168.1.1", 96).unwrap();
        assert_eq!(block.expanded(), "0000:0000:0000:0000:0000:ffff:c0a8:0101");
        assert_eq!(block.host_count().to_string(), "4294967296");
    }

    #[test]
    fn test_prefix_zero_and_128() {
        let block = parse_ipv6_with_prefix("::1", 0).unwrap();
        assert_eq!(block.start(), Ipv6Addr::UNSPECIFIED);
        assert_eq!(block.end().to_string(), "ffff:ffff:ffff:ffff:ffff:ffff:ffff:ffff");
        assert_eq!(
            block.host_count().to_string(),
            "340282366920938463463374607431768211456"
        );

        let block = parse_ipv6_with_prefix("::1", 128).unwrap();
        assert_eq!(block.start(), Ipv6Addr::LOCALHOST);
        assert_eq!(block.end(), Ipv6Addr::LOCALHOST);
        assert_eq!(block.host_count(), BigUint::from(1u8));
    }

    #[test]
    fn test_invalid_literals() {
        for bad in ["2001:::1", "2001:db8::1::2", "12345::", "gggg::1", "1.2.3.4", ""] {
            let err = parse_ipv6_with_prefix(bad, 64).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidAddress, "{:?}", bad);
        }
    }

    #[test]
    fn test_prefix_out_of_range() {
        let err = parse_ipv6_with_prefix("2001:db8::1", 129).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutOfRange);

        let err = parse_ipv6_cidr("2001:db8::1/200").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutOfRange);
    }

    #[test]
    fn test_parse_cidr() {
        let block = parse_ipv6_cidr("fe80::1234/10").unwrap();
        assert_eq!(block.start().to_string(), "fe80::");
        assert_eq!(block.prefix_len(), 10);
        assert_eq!(block.to_string(), "fe80::1234/10");
        assert!(parse_ipv6_cidr("fe80::1234").is_err());
    }

    #[test]
    fn test_contains() {
        let block = parse_ipv6_cidr("2001:db8::/32").unwrap();
        assert!(block.contains("2001:db8:ffff::1".parse().unwrap()));
        assert!(!block.contains("2001:db9::1".parse().unwrap()));
    }
}
