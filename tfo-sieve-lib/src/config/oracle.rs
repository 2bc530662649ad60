use serde::Deserialize;

/// Which attribution service answers prefix/ASN queries
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OracleKind {
    /// Local caching service: `GET /prefix.json?addr=<address>`
    #[default]
    Canid,
    /// Public RIPEstat prefix-overview data API
    Ripestat,
}

/// What the attributor does when the oracle cannot answer
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OnOracleError {
    /// Record an unresolved attribution (no prefix, no ASN) and continue
    #[default]
    Unresolved,
    /// Abort the run with the oracle error
    Fail,
}

/// Attribution oracle configuration
#[derive(Debug, Deserialize, Clone)]
pub struct OracleConfig {
    /// Oracle implementation
    /// Default: canid
    #[serde(default)]
    pub kind: OracleKind,
    /// Base URL of the local canid service
    /// Default: "http://localhost:8081"
    #[serde(default = "default_canid_url")]
    pub canid_url: String,
    /// Base URL of the RIPEstat data API
    /// Default: "https://stat.ripe.net"
    #[serde(default = "default_ripestat_url")]
    pub ripestat_url: String,
    /// Per-request timeout in milliseconds
    /// Default: 5000 (5 seconds)
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Total attempts per address, including the first one
    /// Default: 3
    #[serde(default = "default_attempts")]
    pub attempts: u32,
    /// Delay before the first retry in milliseconds, doubled on every retry
    /// Default: 200
    #[serde(default = "default_backoff_ms")]
    pub backoff_ms: u64,
    /// Behaviour once all attempts failed
    /// Default: unresolved
    #[serde(default)]
    pub on_error: OnOracleError,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            kind: OracleKind::default(),
            canid_url: default_canid_url(),
            ripestat_url: default_ripestat_url(),
            timeout_ms: default_timeout_ms(),
            attempts: default_attempts(),
            backoff_ms: default_backoff_ms(),
            on_error: OnOracleError::default(),
        }
    }
}

impl OracleConfig {
    /// Base URL of the configured oracle kind
    pub fn base_url(&self) -> &str {
        match self.kind {
            OracleKind::Canid => &self.canid_url,
            OracleKind::Ripestat => &self.ripestat_url,
        }
    }
}

fn default_canid_url() -> String {
    "http://localhost:8081".to_string()
}

fn default_ripestat_url() -> String {
    "https://stat.ripe.net".to_string()
}

fn default_timeout_ms() -> u64 {
    5000
}

fn default_attempts() -> u32 {
    3
}

fn default_backoff_ms() -> u64 {
    200
}
