//! Classification of joined and join-miss destinations into TFO outcomes.
//!
//! The stages run in a fixed order and later subsets are carved out of earlier
//! ones: the cookie-shape and data-on-SYN subsets are filtered from the
//! attributed `cookie` union, and `cfail`/`nope` from `nocookie`.

mod counts;
mod outcome;

use std::io::Write;

use serde::Serialize;
use tracing::info;

use crate::attribution::{Attributed, AttributionOracle, Attributor, PrefixCache};
use crate::error::Result;
use crate::runs::{JoinedRecord, MissRecord, RunSet};

pub use counts::SieveCounts;
pub use outcome::{Outcome, EXPERIMENTAL_COOKIE_KIND, STANDARD_COOKIE_LEN};

/// Stage 1 of the sieve: cookie presence on SYN and SYN-ACK
///
/// The three subsets are disjoint; a row with neither cookie is in none.
#[derive(Debug, Clone, Default)]
pub struct CookiePresence<'a> {
    pub rscookie: Vec<&'a JoinedRecord>,
    pub racookie: Vec<&'a JoinedRecord>,
    pub rascookie: Vec<&'a JoinedRecord>,
}

impl<'a> CookiePresence<'a> {
    pub fn split(joined: &'a [JoinedRecord]) -> Self {
        let all: Vec<&'a JoinedRecord> = joined.iter().collect();
        Self {
            rscookie: filter_joined(&all, Outcome::RsCookie),
            racookie: filter_joined(&all, Outcome::RaCookie),
            rascookie: filter_joined(&all, Outcome::RasCookie),
        }
    }

    /// `rscookie`, then `racookie`, then `rascookie`
    pub fn union(&self) -> Vec<&'a JoinedRecord> {
        self.rscookie
            .iter()
            .chain(&self.racookie)
            .chain(&self.rascookie)
            .copied()
            .collect()
    }
}

/// Every named subset of one sieve, plus its counts
///
/// Subsets borrow from the [`RunSet`] they were computed from.
#[derive(Debug, Clone)]
pub struct Sieve<'a> {
    pub rscookie: Vec<&'a JoinedRecord>,
    pub racookie: Vec<&'a JoinedRecord>,
    pub rascookie: Vec<&'a JoinedRecord>,
    pub cookie: Vec<Attributed<'a>>,
    pub oddcookie: Vec<Attributed<'a>>,
    pub expcookie: Vec<Attributed<'a>>,
    pub twocookie: Vec<Attributed<'a>>,
    pub works: Vec<Attributed<'a>>,
    pub dna: Vec<Attributed<'a>>,
    pub dfail: Vec<Attributed<'a>>,
    pub nocookie: Vec<&'a JoinedRecord>,
    pub cfail: Vec<&'a JoinedRecord>,
    pub nope: Vec<&'a JoinedRecord>,
    pub tcfail: Vec<&'a MissRecord>,
    pub xcfail: Vec<&'a MissRecord>,
    pub counts: SieveCounts,
}

/// Borrowed rows of one outcome subset
pub enum Rows<'s, 'a> {
    Joined(&'s [&'a JoinedRecord]),
    Cookie(&'s [Attributed<'a>]),
    Miss(&'s [&'a MissRecord]),
}

impl Rows<'_, '_> {
    pub fn len(&self) -> usize {
        match self {
            Rows::Joined(rows) => rows.len(),
            Rows::Cookie(rows) => rows.len(),
            Rows::Miss(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Run the whole cascade on `runs`
///
/// Only the `cookie` union is attributed; `cache` is extended with every
/// prefix the oracle returns and may be reused by later sieves.
pub async fn tfo_sieve<'a, O: AttributionOracle>(
    runs: &'a RunSet,
    attributor: &Attributor<O>,
    cache: &mut PrefixCache,
    google_asn: u32,
) -> Result<Sieve<'a>> {
    let presence = CookiePresence::split(&runs.joined);
    let cookie = attributor.attribute(presence.union(), cache).await?;
    Ok(Sieve::classify(runs, presence, cookie, google_asn))
}

impl<'a> Sieve<'a> {
    /// Stages 2 to 6, given the presence split and the attributed union
    pub fn classify(
        runs: &'a RunSet,
        presence: CookiePresence<'a>,
        cookie: Vec<Attributed<'a>>,
        google_asn: u32,
    ) -> Self {
        let oddcookie = filter_cookie(&cookie, Outcome::OddCookie);
        let expcookie = filter_cookie(&cookie, Outcome::ExpCookie);
        let twocookie = filter_cookie(&cookie, Outcome::TwoCookie);

        let works = filter_cookie(&cookie, Outcome::Works);
        let dna = filter_cookie(&cookie, Outcome::Dna);
        let dfail = filter_cookie(&cookie, Outcome::Dfail);

        let joined: Vec<&'a JoinedRecord> = runs.joined.iter().collect();
        let nocookie = filter_joined(&joined, Outcome::NoCookie);
        let cfail = filter_joined(&nocookie, Outcome::Cfail);
        let nope = filter_joined(&nocookie, Outcome::Nope);

        let tcfail = filter_miss(&runs.misses, Outcome::Tcfail);
        let xcfail = filter_miss(&runs.misses, Outcome::Xcfail);

        let google = cookie.iter().filter(|row| row.attribution.asn == Some(google_asn)).count();

        let counts = SieveCounts {
            total: runs.total(),
            totalfail: tcfail.len(),
            tfocfail: cfail.len().saturating_add(xcfail.len()),
            tfocfail_from_misses: xcfail.len(),
            tfocfail_from_nocookie: cfail.len(),
            nope: nope.len(),
            tfonego: cookie.len(),
            overlap: presence.racookie.len(),
            expcookie: expcookie.len(),
            oddcookie: oddcookie.len(),
            works: works.len(),
            twocookie: twocookie.len(),
            dna: dna.len(),
            dfail: dfail.len(),
            google,
            non_google: cookie.len().saturating_sub(google),
        };

        info!(
            total = counts.total,
            tfonego = counts.tfonego,
            works = counts.works,
            nope = counts.nope,
            tfocfail = counts.tfocfail,
            totalfail = counts.totalfail,
            "sieve complete"
        );

        Self {
            rscookie: presence.rscookie,
            racookie: presence.racookie,
            rascookie: presence.rascookie,
            cookie,
            oddcookie,
            expcookie,
            twocookie,
            works,
            dna,
            dfail,
            nocookie,
            cfail,
            nope,
            tcfail,
            xcfail,
            counts,
        }
    }

    pub fn rows(&self, outcome: Outcome) -> Rows<'_, 'a> {
        match outcome {
            Outcome::RsCookie => Rows::Joined(&self.rscookie),
            Outcome::RaCookie => Rows::Joined(&self.racookie),
            Outcome::RasCookie => Rows::Joined(&self.rascookie),
            Outcome::Cookie => Rows::Cookie(&self.cookie),
            Outcome::OddCookie => Rows::Cookie(&self.oddcookie),
            Outcome::ExpCookie => Rows::Cookie(&self.expcookie),
            Outcome::TwoCookie => Rows::Cookie(&self.twocookie),
            Outcome::Works => Rows::Cookie(&self.works),
            Outcome::Dna => Rows::Cookie(&self.dna),
            Outcome::Dfail => Rows::Cookie(&self.dfail),
            Outcome::NoCookie => Rows::Joined(&self.nocookie),
            Outcome::Cfail => Rows::Joined(&self.cfail),
            Outcome::Nope => Rows::Joined(&self.nope),
            Outcome::Tcfail => Rows::Miss(&self.tcfail),
            Outcome::Xcfail => Rows::Miss(&self.xcfail),
        }
    }

    pub fn len(&self, outcome: Outcome) -> usize {
        self.rows(outcome).len()
    }

    /// Destination addresses of one subset, in subset order
    pub fn dips(&self, outcome: Outcome) -> Vec<&'a str> {
        match self.rows(outcome) {
            Rows::Joined(rows) => rows.iter().map(|r| r.dip.as_str()).collect(),
            Rows::Cookie(rows) => rows.iter().map(|r| r.record.dip.as_str()).collect(),
            Rows::Miss(rows) => rows.iter().map(|r| r.dip.as_str()).collect(),
        }
    }

    /// Write one subset as JSON lines, returning the number of rows written
    pub fn write_rows<W: Write>(&self, outcome: Outcome, mut out: W) -> Result<usize> {
        match self.rows(outcome) {
            Rows::Joined(rows) => write_json_lines(rows, &mut out),
            Rows::Cookie(rows) => write_json_lines(rows, &mut out),
            Rows::Miss(rows) => write_json_lines(rows, &mut out),
        }
    }
}

fn filter_joined<'a>(rows: &[&'a JoinedRecord], outcome: Outcome) -> Vec<&'a JoinedRecord> {
    rows.iter()
        .copied()
        .filter(|row| outcome.matches_joined(&row.experimental) == Some(true))
        .collect()
}

fn filter_cookie<'a>(rows: &[Attributed<'a>], outcome: Outcome) -> Vec<Attributed<'a>> {
    rows.iter()
        .copied()
        .filter(|row| outcome.matches_joined(&row.record.experimental) == Some(true))
        .collect()
}

fn filter_miss(rows: &[MissRecord], outcome: Outcome) -> Vec<&MissRecord> {
    rows.iter()
        .filter(|row| outcome.matches_miss(&row.baseline) == Some(true))
        .collect()
}

fn write_json_lines<T: Serialize, W: Write>(rows: &[T], out: &mut W) -> Result<usize> {
    for row in rows {
        serde_json::to_writer(&mut *out, row).map_err(std::io::Error::from)?;
        out.write_all(b"\n")?;
    }
    Ok(rows.len())
}
