use serde::Deserialize;

/// Autonomous system of Google, broken out separately in the report
pub const GOOGLE_ASN: u32 = 15169;

/// Output format of the summary
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

/// Report configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ReportConfig {
    /// ASN whose negotiated-TFO addresses are counted separately
    /// Default: 15169
    #[serde(default = "default_google_asn")]
    pub google_asn: u32,
    /// Default: text
    #[serde(default)]
    pub format: ReportFormat,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self { google_asn: default_google_asn(), format: ReportFormat::default() }
    }
}

fn default_google_asn() -> u32 {
    GOOGLE_ASN
}
