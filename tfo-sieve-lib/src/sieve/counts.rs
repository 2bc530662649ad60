use serde::Serialize;

/// Scalar summary of one sieve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SieveCounts {
    /// Distinct baseline destinations: joined plus misses
    pub total: usize,
    /// Misses whose baseline connection failed too
    pub totalfail: usize,
    /// Possibly TFO-dependent failures: `xcfail` plus `cfail`
    pub tfocfail: usize,
    pub tfocfail_from_misses: usize,
    pub tfocfail_from_nocookie: usize,
    pub nope: usize,
    /// Negotiated TFO, the size of `cookie`
    pub tfonego: usize,
    /// Rows counted in both `cookie` and `nocookie` (`racookie`)
    pub overlap: usize,
    pub expcookie: usize,
    pub oddcookie: usize,
    pub works: usize,
    pub twocookie: usize,
    pub dna: usize,
    pub dfail: usize,
    /// Negotiated-TFO rows inside the highlighted AS
    pub google: usize,
    pub non_google: usize,
}

impl SieveCounts {
    /// `total + overlap == totalfail + xcfail + nope + tfonego + cfail`
    ///
    /// Without `racookie` rows this is the plain five-way partition of the
    /// tested population.
    pub fn identity_holds(&self) -> bool {
        let lhs = self.total.saturating_add(self.overlap);
        let rhs = self
            .totalfail
            .saturating_add(self.tfocfail_from_misses)
            .saturating_add(self.nope)
            .saturating_add(self.tfonego)
            .saturating_add(self.tfocfail_from_nocookie);
        lhs == rhs
    }
}
