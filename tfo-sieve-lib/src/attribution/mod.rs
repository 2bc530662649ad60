//! Prefix and autonomous-system attribution of destination addresses.
//!
//! The [`Attributor`] answers from a [`PrefixCache`] when a cached prefix
//! covers the address and asks an [`AttributionOracle`] otherwise, caching the
//! prefix the oracle returns.

mod attributor;
mod cache;
mod canid;
mod http;
mod retry;
mod ripestat;

use std::future::Future;
use std::net::IpAddr;

use ipnet::IpNet;
use serde::Serialize;

use crate::error::Result;

pub use attributor::{Attributed, Attributor};
pub use cache::PrefixCache;
pub use canid::{parse_canid, CanidOracle};
pub use http::HttpOracle;
pub use retry::{RetryPolicy, Retrying};
pub use ripestat::{parse_ripestat, RipeStatOracle};

/// Owning network and AS of an address
///
/// Either half may be unknown when the oracle could not resolve it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Attribution {
    pub prefix: Option<IpNet>,
    pub asn: Option<u32>,
}

impl Attribution {
    pub fn new(prefix: IpNet, asn: u32) -> Self {
        Self { prefix: Some(prefix), asn: Some(asn) }
    }

    /// Neither prefix nor ASN known
    pub fn unresolved() -> Self {
        Self::default()
    }

    pub fn is_resolved(&self) -> bool {
        self.prefix.is_some() || self.asn.is_some()
    }
}

/// Source of prefix/ASN answers for single addresses
pub trait AttributionOracle {
    fn lookup(&self, addr: IpAddr) -> impl Future<Output = Result<Attribution>> + Send;
}
