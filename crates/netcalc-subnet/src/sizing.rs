//! Reverse sizing: smallest block for a host count
//!
//! Candidates run from /30 down to /1. /31 and /32 hold no usable hosts, so
//! they can never satisfy a request. The first candidate that fits wins,
//! which is always the largest prefix (smallest block).

use crate::block::{usable_hosts_in, Ipv4Block};
use crate::mask::MAX_PREFIX_V4;
use netcalc_core::{CalcError, Result};
use tracing::debug;

/// Longest prefix with usable hosts
pub const MAX_SIZING_PREFIX: u8 = 30;

/// Shortest prefix considered by the solver
pub const MIN_SIZING_PREFIX: u8 = 1;

/// Prefix chosen by [`prefix_for_hosts`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizedPrefix {
    pub prefix: u8,
    pub usable_hosts: u64,
}

/// Usable hosts in any block with this prefix
pub fn usable_hosts_for_prefix(prefix: u8) -> Result<u64> {
    if prefix > MAX_PREFIX_V4 {
        return Err(CalcError::OutOfRange(format!(
            "prefix /{} exceeds /{}",
            prefix, MAX_PREFIX_V4
        )));
    }
    Ok(usable_hosts_in(1u64 << (MAX_PREFIX_V4 - prefix)))
}

/// Find the largest prefix with at least `needed` usable hosts
///
/// # Errors
///
/// * [`CalcError::OutOfRange`] - `needed` is zero
/// * [`CalcError::Unsatisfiable`] - even a /1 is too small
///
/// ```
/// use netcalc_subnet::sizing::prefix_for_hosts;
///
/// let sized = prefix_for_hosts(5).unwrap();
/// assert_eq!(sized.prefix, 29);
/// assert_eq!(sized.usable_hosts, 6);
/// ```
pub fn prefix_for_hosts(needed: u64) -> Result<SizedPrefix> {
    if needed == 0 {
        return Err(CalcError::OutOfRange(
            "needed host count must be at least 1".to_string(),
        ));
    }

    for prefix in (MIN_SIZING_PREFIX..=MAX_SIZING_PREFIX).rev() {
        let usable_hosts = usable_hosts_for_prefix(prefix)?;
        if usable_hosts >= needed {
            debug!(needed, prefix, usable_hosts, "sized block");
            return Ok(SizedPrefix {
                prefix,
                usable_hosts,
            });
        }
    }

    Err(CalcError::Unsatisfiable(format!(
        "{} hosts exceed the {} usable hosts of a /{}",
        needed,
        usable_hosts_for_prefix(MIN_SIZING_PREFIX)?,
        MIN_SIZING_PREFIX
    )))
}

/// Block around `address` sized for `needed` usable hosts
pub fn block_for_hosts(address: u32, needed: u64) -> Result<Ipv4Block> {
    let sized = prefix_for_hosts(needed)?;
    Ipv4Block::new(address, sized.prefix)
}
