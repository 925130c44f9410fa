//! IPv4 network blocks
//!
//! An [`Ipv4Block`] keeps the address it was built from alongside the prefix,
//! so a block built from `10.10.10.10/29` still reports `10.10.10.10` as its
//! address while its network is `10.10.10.8`.

use crate::codec::{format_ipv4, parse_ipv4, parse_prefix, split_cidr};
use crate::mask::{mask_from_prefix, wildcard_from_mask, MAX_PREFIX_V4};
use netcalc_core::Result;
use std::fmt;

/// First and last usable host of a block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostRange {
    pub first: u32,
    pub last: u32,
}

/// IPv4 address plus prefix length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ipv4Block {
    /// Address as supplied
    address: u32,
    /// Prefix length (0-32)
    prefix_len: u8,
    /// Network mask
    mask: u32,
}

/// Compute the block containing `address` under `prefix`
pub fn compute_block(address: u32, prefix: u8) -> Result<Ipv4Block> {
    Ipv4Block::new(address, prefix)
}

impl Ipv4Block {
    /// Create a block from an address and prefix length
    ///
    /// # Arguments
    ///
    /// * `address` - Any address inside the block
    /// * `prefix_len` - Prefix length (0-32)
    pub fn new(address: u32, prefix_len: u8) -> Result<Self> {
        let mask = mask_from_prefix(prefix_len)?;
        Ok(Self {
            address,
            prefix_len,
            mask,
        })
    }

    /// Parse CIDR notation
    ///
    /// ```
    /// use netcalc_subnet::Ipv4Block;
    ///
    /// let block = Ipv4Block::parse("10.10.10.10/29").unwrap();
    /// assert_eq!(block.prefix_len(), 29);
    /// assert_eq!(block.network(), 0x0A0A0A08);
    /// ```
    pub fn parse(cidr: &str) -> Result<Self> {
        let (address, prefix) = split_cidr(cidr)?;
        let address = parse_ipv4(address)?;
        let prefix = parse_prefix(prefix, MAX_PREFIX_V4)?;
        Self::new(address, prefix)
    }

    /// Address the block was built from
    pub fn address(&self) -> u32 {
        self.address
    }

    pub fn prefix_len(&self) -> u8 {
        self.prefix_len
    }

    pub fn mask(&self) -> u32 {
        self.mask
    }

    pub fn wildcard(&self) -> u32 {
        wildcard_from_mask(self.mask)
    }

    /// Lowest address, all host bits zero
    pub fn network(&self) -> u32 {
        self.address & self.mask
    }

    /// Highest address, all host bits one
    pub fn broadcast(&self) -> u32 {
        self.network() | self.wildcard()
    }

    /// Total number of addresses, 2^(32 - prefix)
    pub fn total_addresses(&self) -> u64 {
        1u64 << (MAX_PREFIX_V4 - self.prefix_len)
    }

    /// Addresses left after reserving network and broadcast
    ///
    /// Zero for /31 and /32.
    pub fn usable_hosts(&self) -> u64 {
        usable_hosts_in(self.total_addresses())
    }

    /// Network and broadcast addresses, or the whole block for /31 and /32
    pub fn reserved_addresses(&self) -> u64 {
        self.total_addresses() - self.usable_hosts()
    }

    /// Usable host range, `None` when the block has no usable hosts
    pub fn usable_range(&self) -> Option<HostRange> {
        if self.usable_hosts() == 0 {
            return None;
        }
        Some(HostRange {
            first: self.network() + 1,
            last: self.broadcast() - 1,
        })
    }

    /// Check if `ip` lies in this block
    pub fn contains(&self, ip: u32) -> bool {
        (ip & self.mask) == self.network()
    }
}

pub(crate) fn usable_hosts_in(total: u64) -> u64 {
    if total > 2 {
        total - 2
    } else {
        0
    }
}

impl fmt::Display for Ipv4Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", format_ipv4(self.address), self.prefix_len)
    }
}
