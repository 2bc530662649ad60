//! Shared builders and oracle doubles for the sieve tests
#![allow(dead_code)]

use std::collections::HashMap;
use std::net::IpAddr;
use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};

use ipnet::IpNet;
use tfo_sieve_lib::runs::{Baseline, Experimental};
use tfo_sieve_lib::{Attribution, AttributionOracle, JoinedRecord, MissRecord, Result, SieveError};

pub type TestResult<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

pub fn baseline(conn_t0: bool) -> Baseline {
    Baseline { conn_t0, host: None, rank: None, fwd_rst_t0: false, rev_rst_t0: false }
}

pub fn joined(dip: &str, experimental: Experimental) -> JoinedRecord {
    JoinedRecord { dip: dip.to_string(), baseline: baseline(true), experimental }
}

pub fn miss(dip: &str, conn_t0: bool) -> MissRecord {
    MissRecord { dip: dip.to_string(), baseline: baseline(conn_t0) }
}

/// TFO-run columns of a connection that saw no cookie at all
pub fn no_cookie(conn_t1: bool) -> Experimental {
    Experimental { conn_t1, ..Experimental::default() }
}

/// Oracle answering from a fixed table of prefixes, counting calls
///
/// Addresses outside every prefix get an oracle error.
pub struct TableOracle {
    table: Vec<(IpNet, u32)>,
    calls: AtomicUsize,
}

impl TableOracle {
    pub fn new(entries: &[(&str, u32)]) -> Self {
        let table = entries
            .iter()
            .filter_map(|(net, asn)| IpNet::from_str(net).ok().map(|n| (n, *asn)))
            .collect();
        Self { table, calls: AtomicUsize::new(0) }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl AttributionOracle for TableOracle {
    async fn lookup(&self, addr: IpAddr) -> Result<Attribution> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.table
            .iter()
            .find(|(net, _)| net.contains(&addr))
            .map(|(net, asn)| Attribution::new(*net, *asn))
            .ok_or_else(|| SieveError::Oracle(format!("no route for {addr}")))
    }
}

/// Oracle failing a fixed number of times per address before answering
pub struct FlakyOracle {
    failures: usize,
    answer: Attribution,
    seen: std::sync::Mutex<HashMap<IpAddr, usize>>,
}

impl FlakyOracle {
    pub fn new(failures: usize, answer: Attribution) -> Self {
        Self { failures, answer, seen: std::sync::Mutex::new(HashMap::new()) }
    }

    pub fn attempts(&self, addr: IpAddr) -> usize {
        self.seen
            .lock()
            .map(|seen| seen.get(&addr).copied().unwrap_or(0))
            .unwrap_or(0)
    }
}

impl AttributionOracle for FlakyOracle {
    async fn lookup(&self, addr: IpAddr) -> Result<Attribution> {
        let attempt = {
            let mut seen = self.seen.lock().map_err(|e| SieveError::Oracle(e.to_string()))?;
            let count = seen.entry(addr).or_insert(0);
            *count += 1;
            *count
        };
        if attempt <= self.failures {
            return Err(SieveError::Oracle(format!("attempt {attempt} refused")));
        }
        Ok(self.answer)
    }
}

/// Small deterministic generator for synthetic datasets
pub struct Lcg(u64);

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    pub fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        self.0 >> 33
    }

    /// One of `choices`, uniformly
    pub fn pick<T: Copy>(&mut self, choices: &[T]) -> T {
        let len = choices.len() as u64;
        choices[(self.next_u64() % len) as usize]
    }

    pub fn flag(&mut self) -> bool {
        self.next_u64() % 2 == 0
    }
}

/// Random TFO-run columns drawn from the interesting edge values
pub fn random_experimental(rng: &mut Lcg) -> Experimental {
    let tfo_seq = rng.pick(&[0, 100, 4_294_967_295]);
    let tfo_dlen = rng.pick(&[0, 10, 1400]);
    let tfo_ack = match rng.pick(&[0u8, 1, 2, 3]) {
        0 => 0,
        1 => tfo_seq + 1,
        2 => tfo_seq + 1 + tfo_dlen,
        _ => tfo_seq + 7,
    };
    Experimental {
        conn_t1: rng.flag(),
        fwd_rst_t1: rng.flag(),
        rev_rst_t1: rng.flag(),
        tfo_seq,
        tfo_ack,
        tfo_dlen,
        tfo_synclen: rng.pick(&[0, 0, 4, 8]),
        tfo_synkind: rng.pick(&[0, 34, 254]),
        tfo_ackclen: rng.pick(&[0, 0, 8, 16]),
        tfo_ackkind: rng.pick(&[0, 34, 254]),
    }
}

/// Address `i` of a mixed IPv4/IPv6 population
pub fn address(i: usize) -> String {
    if i % 3 == 0 {
        format!("2001:db8:{:x}::{:x}", i / 256, i % 256 + 1)
    } else {
        format!("198.{}.{}.{}", 18 + (i / 65536) % 2, (i / 256) % 256, i % 256)
    }
}
