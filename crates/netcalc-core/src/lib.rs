//! Core types and errors for netcalc
//!
//! This crate provides the foundational types shared by the netcalc crates:
//! - [`AddressClass`] - Legacy (classful) IPv4 address class
//! - [`AddressScope`] - Public/private scope of an IPv4 address
//! - [`CalcError`] / [`ErrorKind`] - Validation error taxonomy
//! - [`settings::Settings`] - Runtime settings read from the environment
//!
//! ```
//! use netcalc_core::{AddressClass, CalcError, ErrorKind};
//!
//! let err = CalcError::OutOfRange("octet 999 exceeds 255".to_string());
//! assert_eq!(err.kind(), ErrorKind::OutOfRange);
//! assert_eq!(AddressClass::A.to_string(), "A");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub mod settings;

/// Legacy IPv4 address class
///
/// Determined solely by the first octet, independent of any CIDR prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AddressClass {
    /// First octet 0-127
    A,
    /// First octet 128-191
    B,
    /// First octet 192-223
    C,
    /// First octet 224-239 (multicast)
    D,
    /// First octet 240-255 (reserved)
    E,
}

impl fmt::Display for AddressClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AddressClass::A => "A",
            AddressClass::B => "B",
            AddressClass::C => "C",
            AddressClass::D => "D",
            AddressClass::E => "E",
        };
        f.write_str(name)
    }
}

/// Public/private scope of an IPv4 address
///
/// Only the three RFC 1918 ranges count as private. Loopback, link-local
/// and shared (CGNAT) space are reported as public.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AddressScope {
    /// 10.0.0.0/8, 172.16.0.0/12 or 192.168.0.0/16
    Private,
    /// Everything else
    Public,
}

impl fmt::Display for AddressScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressScope::Private => f.write_str("Private"),
            AddressScope::Public => f.write_str("Public"),
        }
    }
}

/// Discriminant of a [`CalcError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidFormat,
    OutOfRange,
    InvalidAddress,
    Unsatisfiable,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::InvalidFormat => "invalid_format",
            ErrorKind::OutOfRange => "out_of_range",
            ErrorKind::InvalidAddress => "invalid_address",
            ErrorKind::Unsatisfiable => "unsatisfiable",
        };
        f.write_str(name)
    }
}

/// Error types for subnet calculations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalcError {
    /// Structurally malformed input (wrong group count, non-numeric token)
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// Numeric value outside its legal bound
    #[error("Out of range: {0}")]
    OutOfRange(String),

    /// Malformed IPv6 literal
    #[error("Invalid IPv6 address: {0}")]
    InvalidAddress(String),

    /// No supported prefix can satisfy the request
    #[error("Unsatisfiable: {0}")]
    Unsatisfiable(String),
}

impl CalcError {
    /// Discriminated kind of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            CalcError::InvalidFormat(_) => ErrorKind::InvalidFormat,
            CalcError::OutOfRange(_) => ErrorKind::OutOfRange,
            CalcError::InvalidAddress(_) => ErrorKind::InvalidAddress,
            CalcError::Unsatisfiable(_) => ErrorKind::Unsatisfiable,
        }
    }

    /// Message without the kind prefix
    pub fn message(&self) -> &str {
        match self {
            CalcError::InvalidFormat(m)
            | CalcError::OutOfRange(m)
            | CalcError::InvalidAddress(m)
            | CalcError::Unsatisfiable(m) => m,
        }
    }
}

/// Result type alias for netcalc operations
pub type Result<T> = std::result::Result<T, CalcError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_display() {
        assert_eq!(format!("{}", AddressClass::A), "A");
        assert_eq!(format!("{}", AddressClass::E), "E");
    }

    #[test]
    fn test_class_ordering() {
        assert!(AddressClass::A < AddressClass::B);
        assert!(AddressClass::D < AddressClass::E);
    }

    #[test]
    fn test_scope_display() {
        assert_eq!(AddressScope::Private.to_string(), "Private");
        assert_eq!(AddressScope::Public.to_string(), "Public");
    }

    #[test]
    fn test_error_kind() {
        assert_eq!(
            CalcError::InvalidFormat("x".into()).kind(),
            ErrorKind::InvalidFormat
        );
        assert_eq!(CalcError::OutOfRange("x".into()).kind(), ErrorKind::OutOfRange);
        assert_eq!(
            CalcError::InvalidAddress("x".into()).kind(),
            ErrorKind::InvalidAddress
        );
        assert_eq!(
            CalcError::Unsatisfiable("x".into()).kind(),
            ErrorKind::Unsatisfiable
        );
    }

    #[test]
    fn test_error_display() {
        let err = CalcError::OutOfRange("prefix 33 exceeds 32".to_string());
        assert_eq!(format!("{}", err), "Out of range: prefix 33 exceeds 32");
        assert_eq!(err.message(), "prefix 33 exceeds 32");

        let err = CalcError::InvalidAddress("2001:::1".to_string());
        assert_eq!(format!("{}", err), "Invalid IPv6 address: 2001:::1");
    }

    #[test]
    fn test_error_kind_serialization() {
        let json = serde_json::to_string(&ErrorKind::OutOfRange).expect("serialization failed");
        assert_eq!(json, "\"out_of_range\"");
        assert_eq!(ErrorKind::Unsatisfiable.to_string(), "unsatisfiable");
    }

    #[test]
    fn test_scope_deserialization() {
        let scope: AddressScope = serde_json::from_str("\"Private\"").expect("deserialization failed");
        assert_eq!(scope, AddressScope::Private);
    }

    #[test]
    fn test_result_type() {
        fn returns_result() -> Result<AddressClass> {
            Ok(AddressClass::C)
        }

        assert_eq!(returns_result(), Ok(AddressClass::C));
    }
}
