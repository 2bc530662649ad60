use ahash::{AHashMap, AHashSet};
use tracing::debug;

use super::types::{Baseline, Experimental, JoinedRecord, Keyed, MissRecord};
use crate::records::Record;

/// Joined and join-miss destinations of one or more probe runs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSet {
    pub joined: Vec<JoinedRecord>,
    pub misses: Vec<MissRecord>,
}

impl RunSet {
    /// Number of distinct baseline destinations
    pub fn total(&self) -> usize {
        self.joined.len().saturating_add(self.misses.len())
    }

    /// Append `other`, keeping the first occurrence of every destination
    ///
    /// A joined observation from either run supersedes a miss, so every
    /// destination ends up in exactly one of the two sets.
    pub fn merge(mut self, other: RunSet) -> RunSet {
        self.joined = keep_first(self.joined.into_iter().chain(other.joined));
        let joined: AHashSet<&str> = self.joined.iter().map(|row| row.dip.as_str()).collect();
        self.misses = keep_first(
            self.misses
                .into_iter()
                .chain(other.misses)
                .filter(|row| !joined.contains(row.dip.as_str())),
        );
        self
    }
}

fn keep_first<T: Keyed>(rows: impl Iterator<Item = T>) -> Vec<T> {
    let mut seen = AHashSet::new();
    rows.filter(|row| seen.insert(row.dip().to_string())).collect()
}

/// Split records by `config_column` and join the two runs on `dip`
///
/// Rows with discriminator `0` form the baseline, `1` the experimental run;
/// anything else is ignored. Within a run the first row for a destination
/// wins. Output order follows the baseline.
pub fn rejoin<I>(records: I, config_column: &str) -> RunSet
where
    I: IntoIterator<Item = Record>,
{
    let mut baseline: Vec<(String, Baseline)> = Vec::new();
    let mut baseline_seen: AHashSet<String> = AHashSet::new();
    let mut experimental: AHashMap<String, Experimental> = AHashMap::new();
    let mut ignored = 0usize;

    for record in records {
        match record.discriminator(config_column) {
            Some(0) => {
                if baseline_seen.insert(record.dip.clone()) {
                    baseline.push(split_baseline(record));
                }
            }
            Some(1) => {
                let (dip, exp) = split_experimental(record);
                experimental.entry(dip).or_insert(exp);
            }
            _ => ignored = ignored.saturating_add(1),
        }
    }

    let mut set = RunSet::default();
    for (dip, base) in baseline {
        match experimental.get(&dip) {
            Some(exp) => set.joined.push(JoinedRecord { dip, baseline: base, experimental: *exp }),
            None => set.misses.push(MissRecord { dip, baseline: base }),
        }
    }

    debug!(
        joined = set.joined.len(),
        misses = set.misses.len(),
        ignored,
        config_column,
        "runs rejoined"
    );
    set
}

fn split_baseline(record: Record) -> (String, Baseline) {
    let base = Baseline {
        conn_t0: record.connstate,
        host: record.host,
        rank: record.rank,
        fwd_rst_t0: record.fwd_rst,
        rev_rst_t0: record.rev_rst,
    };
    (record.dip, base)
}

fn split_experimental(record: Record) -> (String, Experimental) {
    let exp = Experimental {
        conn_t1: record.connstate,
        fwd_rst_t1: record.fwd_rst,
        rev_rst_t1: record.rev_rst,
        tfo_seq: record.tfo_seq,
        tfo_ack: record.tfo_ack,
        tfo_dlen: record.tfo_dlen,
        tfo_synclen: record.tfo_synclen,
        tfo_synkind: record.tfo_synkind,
        tfo_ackclen: record.tfo_ackclen,
        tfo_ackkind: record.tfo_ackkind,
    };
    (record.dip, exp)
}
