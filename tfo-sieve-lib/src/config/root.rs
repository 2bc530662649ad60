use serde::Deserialize;

use super::input::InputConfig;
use super::oracle::OracleConfig;
use super::report::ReportConfig;
use super::telemetry::LoggingConfig;

/// Main configuration structure
///
/// Every section is optional; an empty file (or no file at all) yields the
/// defaults used by the measurement campaign.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    /// How measurement records are read and split into runs
    #[serde(default)]
    pub input: InputConfig,
    /// Prefix/ASN attribution oracle
    #[serde(default)]
    pub oracle: OracleConfig,
    /// Console report options
    #[serde(default)]
    pub report: ReportConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}
