use std::net::IpAddr;

use ipnet::IpNet;

use super::Attribution;

/// Prefix to attribution cache shared by every sieve of one invocation
///
/// Lookups scan all entries. When several cached prefixes cover an address
/// the longest one wins; between equal lengths the most recent insert wins.
/// Entries are never evicted.
#[derive(Debug, Clone, Default)]
pub struct PrefixCache {
    entries: Vec<(IpNet, Attribution)>,
}

impl PrefixCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Cached attribution of the most specific prefix covering `addr`
    pub fn lookup(&self, addr: IpAddr) -> Option<Attribution> {
        self.entries
            .iter()
            .filter(|(net, _)| net.contains(&addr))
            .max_by_key(|(net, _)| net.prefix_len())
            .map(|(_, attribution)| *attribution)
    }

    /// Store `attribution` under its own (normalized) prefix
    ///
    /// Returns `false` and stores nothing when the prefix is unknown. An
    /// existing entry for the same network is replaced and moves to the back.
    pub fn insert(&mut self, attribution: Attribution) -> bool {
        let Some(prefix) = attribution.prefix else {
            return false;
        };
        let key = prefix.trunc();
        self.entries.retain(|(net, _)| *net != key);
        self.entries.push((key, attribution));
        true
    }
}
