use std::net::IpAddr;

use serde::Serialize;
use tracing::{debug, info, warn};

use super::{Attribution, AttributionOracle, PrefixCache};
use crate::config::OnOracleError;
use crate::error::{Result, SieveError};
use crate::runs::JoinedRecord;

/// A joined record with the owning prefix and ASN of its destination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Attributed<'a> {
    #[serde(flatten)]
    pub record: &'a JoinedRecord,
    #[serde(flatten)]
    pub attribution: Attribution,
}

/// Resolves destinations through a [`PrefixCache`] backed by an oracle
pub struct Attributor<O> {
    oracle: O,
    on_error: OnOracleError,
}

impl<O: AttributionOracle> Attributor<O> {
    pub fn new(oracle: O, on_error: OnOracleError) -> Self {
        Self { oracle, on_error }
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    /// Attribution of a single destination
    ///
    /// The oracle is consulted only when no cached prefix covers `dip`; a
    /// resolved answer is cached under the prefix it names.
    pub async fn resolve(&self, dip: &str, cache: &mut PrefixCache) -> Result<Attribution> {
        let addr: IpAddr = match dip.parse() {
            Ok(addr) => addr,
            Err(_) => return self.recover(dip, SieveError::InvalidAddress(dip.to_string())),
        };

        if let Some(hit) = cache.lookup(addr) {
            debug!(%addr, prefix = ?hit.prefix, "prefix cache hit");
            return Ok(hit);
        }

        match self.oracle.lookup(addr).await {
            Ok(attribution) => {
                debug!(%addr, prefix = ?attribution.prefix, asn = ?attribution.asn, "oracle answer");
                cache.insert(attribution);
                Ok(attribution)
            }
            Err(err) => self.recover(dip, err),
        }
    }

    /// Attribute every row, in order
    pub async fn attribute<'a>(
        &self,
        rows: Vec<&'a JoinedRecord>,
        cache: &mut PrefixCache,
    ) -> Result<Vec<Attributed<'a>>> {
        let cached_before = cache.len();
        let mut out = Vec::with_capacity(rows.len());
        let mut unresolved = 0usize;
        for record in rows {
            let attribution = self.resolve(&record.dip, cache).await?;
            if !attribution.is_resolved() {
                unresolved = unresolved.saturating_add(1);
            }
            out.push(Attributed { record, attribution });
        }
        info!(
            rows = out.len(),
            unresolved,
            new_prefixes = cache.len().saturating_sub(cached_before),
            cached_prefixes = cache.len(),
            "attribution complete"
        );
        Ok(out)
    }

    fn recover(&self, dip: &str, err: SieveError) -> Result<Attribution> {
        match self.on_error {
            OnOracleError::Fail => Err(err),
            OnOracleError::Unresolved => {
                warn!(dip, %err, "attribution unresolved");
                Ok(Attribution::unresolved())
            }
        }
    }
}
