//! Result records handed to the presentation layer
//!
//! Addresses are pre-formatted strings. Fields that do not apply (the usable
//! range of a /31, for instance) are `None` and serialize as `null`.

use crate::block::Ipv4Block;
use crate::classify::{classify, scope};
use crate::codec::{format_ipv4, parse_ipv4, parse_prefix, split_cidr};
use crate::ipv6::{parse_ipv6_with_prefix, Ipv6Block};
use crate::mask::{binary_representation, mask_from_prefix, MAX_PREFIX_V4, MAX_PREFIX_V6};
use crate::sizing::{block_for_hosts, usable_hosts_for_prefix};
use netcalc_core::{AddressClass, AddressScope, CalcError, Result};
use num_bigint::BigUint;
use serde::{Serialize, Serializer};
use std::ops::RangeInclusive;

/// Usable vs reserved addresses of an IPv4 block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AddressDistribution {
    pub usable: u64,
    pub reserved: u64,
}

/// Network vs host bits of an IPv6 prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BitDistribution {
    pub network_bits: u8,
    pub host_bits: u8,
}

/// Full breakdown of an IPv4 address/prefix pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ipv4Report {
    pub ip: String,
    pub cidr: u8,
    pub network: String,
    pub broadcast: String,
    pub first_usable: Option<String>,
    pub last_usable: Option<String>,
    pub total_hosts: u64,
    pub usable_hosts: u64,
    pub mask: String,
    pub wildcard: String,
    pub binary_mask: String,
    pub ip_class: AddressClass,
    pub ip_type: AddressScope,
    pub distribution: AddressDistribution,
}

impl Ipv4Report {
    pub fn from_block(block: &Ipv4Block) -> Self {
        let range = block.usable_range();
        Self {
            ip: format_ipv4(block.address()),
            cidr: block.prefix_len(),
            network: format_ipv4(block.network()),
            broadcast: format_ipv4(block.broadcast()),
            first_usable: range.map(|r| format_ipv4(r.first)),
            last_usable: range.map(|r| format_ipv4(r.last)),
            total_hosts: block.total_addresses(),
            usable_hosts: block.usable_hosts(),
            mask: format_ipv4(block.mask()),
            wildcard: format_ipv4(block.wildcard()),
            binary_mask: binary_representation(block.mask()),
            ip_class: classify(block.address()),
            ip_type: scope(block.address()),
            distribution: AddressDistribution {
                usable: block.usable_hosts(),
                reserved: block.reserved_addresses(),
            },
        }
    }
}

/// Block sized around an address for a requested host count
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NeedReport {
    pub ip: String,
    pub needed: u64,
    pub cidr: u8,
    pub usable_hosts: u64,
    pub network: String,
    pub broadcast: String,
    pub first_usable: Option<String>,
    pub last_usable: Option<String>,
    pub mask: String,
    pub distribution: AddressDistribution,
}

impl NeedReport {
    /// Solve for `needed` hosts and describe the block around `address`
    pub fn compute(address: u32, needed: u64) -> Result<Self> {
        let block = block_for_hosts(address, needed)?;
        let range = block.usable_range();
        Ok(Self {
            ip: format_ipv4(address),
            needed,
            cidr: block.prefix_len(),
            usable_hosts: block.usable_hosts(),
            network: format_ipv4(block.network()),
            broadcast: format_ipv4(block.broadcast()),
            first_usable: range.map(|r| format_ipv4(r.first)),
            last_usable: range.map(|r| format_ipv4(r.last)),
            mask: format_ipv4(block.mask()),
            distribution: AddressDistribution {
                usable: block.usable_hosts(),
                reserved: block.reserved_addresses(),
            },
        })
    }
}

/// Full breakdown of an IPv6 address/prefix pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ipv6Report {
    pub canonical: String,
    pub expanded: String,
    pub start: String,
    pub end: String,
    pub prefix: u8,
    pub host_bits: u8,
    #[serde(serialize_with = "serialize_decimal")]
    pub host_count: BigUint,
    pub distribution: BitDistribution,
}

impl Ipv6Report {
    pub fn from_block(block: &Ipv6Block) -> Self {
        Self {
            canonical: block.canonical(),
            expanded: block.expanded(),
            start: block.start().to_string(),
            end: block.end().to_string(),
            prefix: block.prefix_len(),
            host_bits: block.host_bits(),
            host_count: block.host_count(),
            distribution: BitDistribution {
                network_bits: block.prefix_len(),
                host_bits: block.host_bits(),
            },
        }
    }
}

// Decimal string keeps counts above 2^53 exact for JSON consumers.
fn serialize_decimal<S>(value: &BigUint, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(value)
}

/// Either family's report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "family", rename_all = "lowercase")]
pub enum Report {
    Ipv4(Ipv4Report),
    Ipv6(Ipv6Report),
}

/// Calculate a report for CIDR text of either family
///
/// Text containing `:` is treated as IPv6. A missing prefix means a single
/// host (/32 or /128).
///
/// ```
/// use netcalc_subnet::report::{calculate, Report};
///
/// match calculate("10.10.10.10/29").unwrap() {
///     Report::Ipv4(r) => assert_eq!(r.network, "10.10.10.8"),
///     Report::Ipv6(_) => unreachable!(),
/// }
/// ```
pub fn calculate(text: &str) -> Result<Report> {
    let is_v6 = text.contains(':');
    let max = if is_v6 { MAX_PREFIX_V6 } else { MAX_PREFIX_V4 };

    let (address, prefix) = if text.contains('/') {
        let (address, prefix) = split_cidr(text)?;
        (address, parse_prefix(prefix, max)?)
    } else {
        (text, max)
    };

    if is_v6 {
        let block = parse_ipv6_with_prefix(address, prefix)?;
        Ok(Report::Ipv6(Ipv6Report::from_block(&block)))
    } else {
        let block = Ipv4Block::new(parse_ipv4(address)?, prefix)?;
        Ok(Report::Ipv4(Ipv4Report::from_block(&block)))
    }
}

/// One row of the prefix reference table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrefixRow {
    pub prefix: u8,
    pub mask: String,
    pub total_hosts: u64,
    pub usable_hosts: u64,
}

/// Default rows of the prefix table, /30 down to /8
pub const DEFAULT_TABLE: RangeInclusive<u8> = 8..=30;

/// Prefix/mask/host rows for every prefix in `range`, longest prefix first
pub fn prefix_table(range: RangeInclusive<u8>) -> Result<Vec<PrefixRow>> {
    if range.is_empty() {
        return Err(CalcError::InvalidFormat(format!(
            "empty prefix range {}..={}",
            range.start(),
            range.end()
        )));
    }

    range
        .rev()
        .map(|prefix| {
            let mask = mask_from_prefix(prefix)?;
            Ok(PrefixRow {
                prefix,
                mask: format_ipv4(mask),
                total_hosts: 1u64 << (MAX_PREFIX_V4 - prefix),
                usable_hosts: usable_hosts_for_prefix(prefix)?,
            })
        })
        .collect()
}
