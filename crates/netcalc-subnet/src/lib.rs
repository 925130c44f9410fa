//! IPv4/IPv6 subnet arithmetic
//!
//! Provides the calculations behind a subnet calculator:
//! - Parse and format dotted-decimal IPv4 addresses
//! - Subnet mask, wildcard mask and binary mask from a prefix length
//! - Network, broadcast and usable range of an IPv4 block
//! - Legacy class and RFC 1918 scope of an IPv4 address
//! - Smallest IPv4 block for a required number of hosts
//! - Start, end and exact host count of an IPv6 block
//!
//! Every function is pure. Invalid input comes back as a
//! [`netcalc_core::CalcError`], never a panic.
//!
//! # Examples
//!
//! ```
//! use netcalc_subnet::{format_ipv4, prefix_for_hosts, Ipv4Block};
//!
//! let block = Ipv4Block::parse("10.10.10.10/29").unwrap();
//! assert_eq!(format_ipv4(block.network()), "10.10.10.8");
//! assert_eq!(format_ipv4(block.broadcast()), "10.10.10.15");
//! assert_eq!(block.usable_hosts(), 6);
//!
//! assert_eq!(prefix_for_hosts(5).unwrap().prefix, 29);
//! ```

pub mod block;
pub mod classify;
pub mod codec;
pub mod ipv6;
pub mod mask;
pub mod report;
pub mod sizing;

pub use block::{compute_block, HostRange, Ipv4Block};
pub use classify::{classify, scope};
pub use codec::{format_ipv4, parse_ipv4};
pub use ipv6::{compute_ipv6_block, parse_ipv6_cidr, parse_ipv6_with_prefix, Ipv6Block};
pub use mask::{binary_representation, mask_from_prefix, wildcard_from_mask};
pub use report::{calculate, Ipv4Report, Ipv6Report, NeedReport, Report};
pub use sizing::{block_for_hosts, prefix_for_hosts, SizedPrefix};
