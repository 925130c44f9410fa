//! Legacy class and scope of IPv4 addresses

use netcalc_core::{AddressClass, AddressScope};

/// Classful address class from the first octet
///
/// ```
/// use netcalc_core::AddressClass;
/// use netcalc_subnet::classify::classify;
///
/// assert_eq!(classify(0x0A000001), AddressClass::A);
/// assert_eq!(classify(0xE0000001), AddressClass::D);
/// ```
pub fn classify(address: u32) -> AddressClass {
    match address.to_be_bytes()[0] {
        0..=127 => AddressClass::A,
        128..=191 => AddressClass::B,
        192..=223 => AddressClass::C,
        224..=239 => AddressClass::D,
        _ => AddressClass::E,
    }
}

/// Private (RFC 1918) or public scope
pub fn scope(address: u32) -> AddressScope {
    match address.to_be_bytes() {
        [10, ..] | [172, 16..=31, ..] | [192, 168, ..] => AddressScope::Private,
        _ => AddressScope::Public,
    }
}
