//! Textual IPv4 codec
//!
//! Dotted-decimal addresses are converted to and from `u32`. Parsing is
//! strict: exactly four groups of decimal digits, no whitespace, no sign and
//! no leading zeros (`"010"` is rejected rather than guessed as octal or
//! decimal). Every string accepted here is reproduced byte for byte by
//! [`format_ipv4`].

use netcalc_core::{CalcError, Result};
use tracing::trace;

/// Parse a dotted-decimal IPv4 address into a `u32`
///
/// # Errors
///
/// * [`CalcError::InvalidFormat`] - not four groups, a group that is empty,
///   non-numeric or zero-padded
/// * [`CalcError::OutOfRange`] - a group greater than 255
///
/// # Examples
///
/// ```
/// use netcalc_subnet::codec::parse_ipv4;
///
/// assert_eq!(parse_ipv4("192.168.1.0").unwrap(), 0xC0A80100);
/// assert!(parse_ipv4("192.168.1").is_err());
/// ```
pub fn parse_ipv4(text: &str) -> Result<u32> {
    let groups: Vec<&str> = text.split('.').collect();
    if groups.len() != 4 {
        trace!(input = text, groups = groups.len(), "rejecting IPv4 address");
        return Err(CalcError::InvalidFormat(format!(
            "expected 4 dot-separated octets, found {} in {:?}",
            groups.len(),
            text
        )));
    }

    let mut result = 0u32;
    for group in groups {
        let octet = parse_octet(group)?;
        result = (result << 8) | octet;
    }

    Ok(result)
}

fn parse_octet(group: &str) -> Result<u32> {
    if group.is_empty() || !group.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CalcError::InvalidFormat(format!(
            "octet {:?} is not a decimal number",
            group
        )));
    }

    if group.len() > 1 && group.starts_with('0') {
        return Err(CalcError::InvalidFormat(format!(
            "octet {:?} has a leading zero",
            group
        )));
    }

    // Digits only, so a parse failure means the value overflowed.
    let value: u64 = group
        .parse()
        .map_err(|_| CalcError::OutOfRange(format!("octet {} exceeds 255", group)))?;
    if value > 255 {
        return Err(CalcError::OutOfRange(format!("octet {} exceeds 255", value)));
    }

    Ok(value as u32)
}

/// Format a `u32` as a dotted-decimal IPv4 address
///
/// ```
/// use netcalc_subnet::codec::format_ipv4;
///
/// assert_eq!(format_ipv4(0x0A0A0A08), "10.10.10.8");
/// ```
pub fn format_ipv4(address: u32) -> String {
    let [a, b, c, d] = address.to_be_bytes();
    format!("{}.{}.{}.{}", a, b, c, d)
}

/// Parse a prefix length no greater than `max`
///
/// An optional leading `/` is accepted, so both `"24"` and `"/24"` parse.
pub fn parse_prefix(text: &str, max: u8) -> Result<u8> {
    let digits = text.strip_prefix('/').unwrap_or(text);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CalcError::InvalidFormat(format!(
            "prefix {:?} is not a decimal number",
            text
        )));
    }

    match digits.parse::<u32>() {
        Ok(value) if value <= max as u32 => Ok(value as u8),
        _ => Err(CalcError::OutOfRange(format!(
            "prefix /{} exceeds /{}",
            digits, max
        ))),
    }
}

/// Split `address/prefix` notation into its two halves
///
/// Fails with [`CalcError::InvalidFormat`] unless exactly one `/` is present.
pub fn split_cidr(text: &str) -> Result<(&str, &str)> {
    let mut parts = text.split('/');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(address), Some(prefix), None) => Ok((address, prefix)),
        _ => Err(CalcError::InvalidFormat(format!(
            "expected address/prefix, got {:?}",
            text
        ))),
    }
}
