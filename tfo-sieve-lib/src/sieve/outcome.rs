use std::fmt;
use std::str::FromStr;

use crate::runs::{Baseline, Experimental};

/// Option kind of a TFO cookie carrying the "experimental" (retry) kind
pub const EXPERIMENTAL_COOKIE_KIND: i64 = 254;

/// Expected length of a TFO cookie on the SYN
pub const STANDARD_COOKIE_LEN: i64 = 8;

/// Named subsets of the outcome taxonomy
///
/// Categories overlap: `racookie` rows belong to both `cookie` and
/// `nocookie`, and a zero-length SYN payload puts a row in both `works` and
/// `dna`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// SYN cookie, no SYN-ACK cookie
    RsCookie,
    /// SYN-ACK cookie without a SYN cookie
    RaCookie,
    /// Cookie on both SYN and SYN-ACK
    RasCookie,
    /// Union of the three above, attributed
    Cookie,
    OddCookie,
    ExpCookie,
    TwoCookie,
    Works,
    /// Data not acked
    Dna,
    /// Data failed
    Dfail,
    NoCookie,
    Cfail,
    Nope,
    /// Total connection failure
    Tcfail,
    Xcfail,
}

impl Outcome {
    pub const ALL: [Outcome; 15] = [
        Outcome::RsCookie,
        Outcome::RaCookie,
        Outcome::RasCookie,
        Outcome::Cookie,
        Outcome::OddCookie,
        Outcome::ExpCookie,
        Outcome::TwoCookie,
        Outcome::Works,
        Outcome::Dna,
        Outcome::Dfail,
        Outcome::NoCookie,
        Outcome::Cfail,
        Outcome::Nope,
        Outcome::Tcfail,
        Outcome::Xcfail,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Outcome::RsCookie => "rscookie",
            Outcome::RaCookie => "racookie",
            Outcome::RasCookie => "rascookie",
            Outcome::Cookie => "cookie",
            Outcome::OddCookie => "oddcookie",
            Outcome::ExpCookie => "expcookie",
            Outcome::TwoCookie => "twocookie",
            Outcome::Works => "works",
            Outcome::Dna => "dna",
            Outcome::Dfail => "dfail",
            Outcome::NoCookie => "nocookie",
            Outcome::Cfail => "cfail",
            Outcome::Nope => "nope",
            Outcome::Tcfail => "tcfail",
            Outcome::Xcfail => "xcfail",
        }
    }

    /// Predicate over the TFO-run columns of a joined row
    ///
    /// `None` for the join-miss outcomes, which are decided on baseline
    /// columns by [`Outcome::matches_miss`]. `cookie` is the union of the
    /// three presence predicates; the shape and data-on-SYN predicates are
    /// only meaningful within it.
    pub fn matches_joined(self, exp: &Experimental) -> Option<bool> {
        let syn = exp.tfo_synclen > 0;
        let ack = exp.tfo_ackclen > 0;
        Some(match self {
            Outcome::RsCookie => syn && !ack,
            Outcome::RaCookie => !syn && ack,
            Outcome::RasCookie => syn && ack,
            Outcome::Cookie => syn || ack,
            Outcome::OddCookie => syn && exp.tfo_synclen != STANDARD_COOKIE_LEN,
            Outcome::ExpCookie => ack && exp.tfo_ackkind == EXPERIMENTAL_COOKIE_KIND,
            Outcome::TwoCookie => syn && ack,
            Outcome::Works => exp.acked_data() == i128::from(exp.tfo_dlen),
            Outcome::Dna => exp.acked_data() == 0,
            Outcome::Dfail => exp.tfo_ack == 0,
            Outcome::NoCookie => exp.tfo_synclen == 0,
            Outcome::Cfail => exp.tfo_synclen == 0 && !exp.conn_t1,
            Outcome::Nope => exp.tfo_synclen == 0 && exp.conn_t1,
            Outcome::Tcfail | Outcome::Xcfail => return None,
        })
    }

    /// Predicate over a join miss; `None` for joined-row outcomes
    pub fn matches_miss(self, base: &Baseline) -> Option<bool> {
        match self {
            Outcome::Tcfail => Some(!base.conn_t0),
            Outcome::Xcfail => Some(base.conn_t0),
            _ => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Outcome {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Outcome::ALL
            .into_iter()
            .find(|o| o.name() == wanted)
            .ok_or_else(|| format!("unknown outcome: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for outcome in Outcome::ALL {
            assert_eq!(outcome.name().parse::<Outcome>(), Ok(outcome));
        }
        assert_eq!("XCFAIL".parse::<Outcome>(), Ok(Outcome::Xcfail));
        assert!("cookies".parse::<Outcome>().is_err());
    }

    #[test]
    fn test_presence_predicates_partition_cookie() {
        for (synclen, ackclen) in [(0, 0), (8, 0), (0, 16), (8, 16), (4, 0)] {
            let exp = Experimental { tfo_synclen: synclen, tfo_ackclen: ackclen, ..Experimental::default() };
            let hits = [Outcome::RsCookie, Outcome::RaCookie, Outcome::RasCookie]
                .into_iter()
                .filter(|o| o.matches_joined(&exp) == Some(true))
                .count();
            let cookie = Outcome::Cookie.matches_joined(&exp) == Some(true);
            assert_eq!(hits, usize::from(cookie), "synclen={synclen} ackclen={ackclen}");
        }
    }

    #[test]
    fn test_cookie_shape_needs_the_matching_cookie() {
        let ack_only = Experimental { tfo_ackclen: 16, ..Experimental::default() };
        assert_eq!(Outcome::OddCookie.matches_joined(&ack_only), Some(false));

        let kind_without_cookie = Experimental {
            tfo_synclen: 8,
            tfo_ackclen: 0,
            tfo_ackkind: EXPERIMENTAL_COOKIE_KIND,
            ..Experimental::default()
        };
        assert_eq!(Outcome::ExpCookie.matches_joined(&kind_without_cookie), Some(false));
        assert_eq!(Outcome::OddCookie.matches_joined(&kind_without_cookie), Some(false));

        let short = Experimental { tfo_synclen: 4, ..Experimental::default() };
        assert_eq!(Outcome::OddCookie.matches_joined(&short), Some(true));
    }

    #[test]
    fn test_zero_length_data_is_both_works_and_dna() {
        let exp = Experimental { tfo_seq: 41, tfo_ack: 42, tfo_dlen: 0, ..Experimental::default() };
        assert_eq!(Outcome::Works.matches_joined(&exp), Some(true));
        assert_eq!(Outcome::Dna.matches_joined(&exp), Some(true));
        assert_eq!(Outcome::Dfail.matches_joined(&exp), Some(false));
    }

    #[test]
    fn test_miss_predicates() {
        let base = Baseline { conn_t0: true, host: None, rank: None, fwd_rst_t0: false, rev_rst_t0: false };
        assert_eq!(Outcome::Xcfail.matches_miss(&base), Some(true));
        assert_eq!(Outcome::Tcfail.matches_miss(&base), Some(false));
        assert_eq!(Outcome::Cookie.matches_miss(&base), None);
        assert_eq!(Outcome::Xcfail.matches_joined(&Experimental::default()), None);
    }
}
