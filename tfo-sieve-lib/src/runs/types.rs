use serde::Serialize;

/// Baseline (TFO disabled) columns of a destination
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Baseline {
    pub conn_t0: bool,
    pub host: Option<String>,
    pub rank: Option<i64>,
    pub fwd_rst_t0: bool,
    pub rev_rst_t0: bool,
}

/// Experimental (TFO enabled) columns of a destination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Experimental {
    pub conn_t1: bool,
    pub fwd_rst_t1: bool,
    pub rev_rst_t1: bool,
    pub tfo_seq: i64,
    pub tfo_ack: i64,
    pub tfo_dlen: i64,
    pub tfo_synclen: i64,
    pub tfo_synkind: i64,
    pub tfo_ackclen: i64,
    pub tfo_ackkind: i64,
}

impl Experimental {
    /// Bytes credited by the SYN-ACK beyond the SYN itself: `ack - seq - 1`
    ///
    /// Computed in 128 bits so arbitrary 64-bit inputs cannot overflow.
    pub fn acked_data(&self) -> i128 {
        i128::from(self.tfo_ack) - i128::from(self.tfo_seq) - 1
    }
}

/// A destination seen in both runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JoinedRecord {
    pub dip: String,
    #[serde(flatten)]
    pub baseline: Baseline,
    #[serde(flatten)]
    pub experimental: Experimental,
}

/// A destination seen only in the baseline run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissRecord {
    pub dip: String,
    #[serde(flatten)]
    pub baseline: Baseline,
}

/// Anything keyed by destination address
pub trait Keyed {
    fn dip(&self) -> &str;
}

impl Keyed for JoinedRecord {
    fn dip(&self) -> &str {
        &self.dip
    }
}

impl Keyed for MissRecord {
    fn dip(&self) -> &str {
        &self.dip
    }
}
