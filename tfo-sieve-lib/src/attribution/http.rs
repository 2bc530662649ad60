use std::net::IpAddr;

use super::{Attribution, AttributionOracle, CanidOracle, RetryPolicy, Retrying, RipeStatOracle};
use crate::config::{OracleConfig, OracleKind};
use crate::error::{Result, SieveError};

/// The HTTP oracle selected by configuration
#[derive(Debug, Clone)]
pub enum HttpOracle {
    Canid(CanidOracle),
    RipeStat(RipeStatOracle),
}

impl HttpOracle {
    pub fn from_config(cfg: &OracleConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| SieveError::Config(format!("Failed to create HTTP client: {e}")))?;
        Ok(match cfg.kind {
            OracleKind::Canid => HttpOracle::Canid(CanidOracle::new(client, &cfg.canid_url)),
            OracleKind::Ripestat => {
                HttpOracle::RipeStat(RipeStatOracle::new(client, &cfg.ripestat_url))
            }
        })
    }

    /// Configured oracle wrapped in the configured retry policy
    pub fn with_retries(cfg: &OracleConfig) -> Result<Retrying<Self>> {
        Ok(Retrying::new(Self::from_config(cfg)?, RetryPolicy::from_config(cfg)))
    }
}

impl AttributionOracle for HttpOracle {
    async fn lookup(&self, addr: IpAddr) -> Result<Attribution> {
        match self {
            HttpOracle::Canid(oracle) => oracle.lookup(addr).await,
            HttpOracle::RipeStat(oracle) => oracle.lookup(addr).await,
        }
    }
}
