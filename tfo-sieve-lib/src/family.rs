//! Address-family split of a run by destination syntax.
//!
//! A colon in the address means IPv6, anything else is treated as IPv4. No
//! further validation happens here.

use crate::runs::{Keyed, RunSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressFamily {
    V4,
    V6,
}

impl AddressFamily {
    pub fn of(addr: &str) -> Self {
        if addr.contains(':') {
            AddressFamily::V6
        } else {
            AddressFamily::V4
        }
    }
}

/// Rows of `rows` whose destination belongs to `family`
pub fn select<T: Keyed + Clone>(rows: &[T], family: AddressFamily) -> Vec<T> {
    rows.iter()
        .filter(|row| AddressFamily::of(row.dip()) == family)
        .cloned()
        .collect()
}

/// Split `rows` into `(ipv4, ipv6)`
pub fn partition<T: Keyed + Clone>(rows: &[T]) -> (Vec<T>, Vec<T>) {
    rows.iter()
        .cloned()
        .partition(|row| AddressFamily::of(row.dip()) == AddressFamily::V4)
}

impl RunSet {
    /// The joined and miss sets restricted to one address family
    pub fn select_family(&self, family: AddressFamily) -> RunSet {
        RunSet { joined: select(&self.joined, family), misses: select(&self.misses, family) }
    }
}
