use std::fmt;

use crate::sieve::SieveCounts;

/// Console summary of one sieve
///
/// Percentages are against the tested population, and for the negotiated-TFO
/// breakdown also against the negotiated population. A zero base prints
/// `n/a`.
pub struct Report<'a> {
    counts: &'a SieveCounts,
}

impl<'a> Report<'a> {
    pub fn new(counts: &'a SieveCounts) -> Self {
        Self { counts }
    }
}

/// `100 * n / base` as `%6.3f%`, or right-aligned `n/a`
pub fn percent(n: usize, base: usize) -> String {
    if base == 0 {
        return format!("{:>7}", "n/a");
    }
    format!("{:6.3}%", 100.0 * n as f64 / base as f64)
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = self.counts;
        let total = c.total;
        let nego = c.tfonego;

        writeln!(f, "Of {:6} tested IP addresses:", total)?;
        writeln!(f, "   {:6} ({}) completely failed to connect.", c.totalfail, percent(c.totalfail, total))?;
        writeln!(f, "   {:6} ({}) may have TFO-dependent failure.", c.tfocfail, percent(c.tfocfail, total))?;
        writeln!(f, "   {:6} ({}) did not negotiate TFO.", c.nope, percent(c.nope, total))?;
        writeln!(f, "   {:6} ({}) negotiated TFO, of which:", nego, percent(nego, total))?;
        writeln!(f, " - - - - - - - -")?;

        let breakdown = [
            (c.expcookie, "responded with a type-254 cookie"),
            (c.oddcookie, "responded with a non-8-byte cookie"),
            (c.works, "properly ACKed data on SYN"),
            (c.twocookie, "returned a cookie while ACKing data on SYN"),
            (c.dna, "did not ACK data on SYN"),
            (c.dfail, "failed with data on SYN"),
        ];
        for (n, what) in breakdown {
            writeln!(f, "   {:6} ({} / {}) {what}", n, percent(n, nego), percent(n, total))?;
        }

        writeln!(f, " - - - - - - - -")?;
        writeln!(
            f,
            "   {:6} ({} / {}) are Google properties",
            c.google,
            percent(c.google, nego),
            percent(c.google, total)
        )?;
        writeln!(
            f,
            "   {:6} ({} / {}) are not Google properties",
            c.non_google,
            percent(c.non_google, nego),
            percent(c.non_google, total)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent() {
        assert_eq!(percent(1, 4), "25.000%");
        assert_eq!(percent(1, 3), "33.333%");
        assert_eq!(percent(0, 10), " 0.000%");
        assert_eq!(percent(5, 0), "    n/a");
    }

    #[test]
    fn test_empty_counts_render() {
        let counts = SieveCounts::default();
        let text = Report::new(&counts).to_string();
        assert!(text.starts_with("Of      0 tested IP addresses:"));
        assert!(text.contains("n/a"));
        assert!(!text.contains("NaN"));
        assert_eq!(text.lines().count(), 15);
    }

    #[test]
    fn test_breakdown_line() {
        let counts = SieveCounts { total: 200, tfonego: 50, works: 25, ..SieveCounts::default() };
        let text = Report::new(&counts).to_string();
        assert!(text.contains("       25 (50.000% / 12.500%) properly ACKed data on SYN"));
    }
}
