use std::net::IpAddr;
use std::time::Duration;

use tracing::warn;

use super::{Attribution, AttributionOracle};
use crate::config::OracleConfig;
use crate::error::{Result, SieveError};

/// Per-attempt timeout and exponential backoff for oracle calls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first one
    pub attempts: u32,
    pub timeout: Duration,
    /// Delay before the first retry, doubled for every following one
    pub backoff: Duration,
}

impl RetryPolicy {
    pub fn from_config(cfg: &OracleConfig) -> Self {
        Self {
            attempts: cfg.attempts.max(1),
            timeout: Duration::from_millis(cfg.timeout_ms),
            backoff: Duration::from_millis(cfg.backoff_ms),
        }
    }
}

/// Oracle wrapper applying a [`RetryPolicy`]
pub struct Retrying<O> {
    inner: O,
    policy: RetryPolicy,
}

impl<O> Retrying<O> {
    pub fn new(inner: O, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    pub fn inner(&self) -> &O {
        &self.inner
    }
}

impl<O: AttributionOracle + Sync> AttributionOracle for Retrying<O> {
    async fn lookup(&self, addr: IpAddr) -> Result<Attribution> {
        let mut delay = self.policy.backoff;
        let mut attempt = 1u32;
        loop {
            let outcome = match tokio::time::timeout(self.policy.timeout, self.inner.lookup(addr)).await {
                Ok(result) => result,
                Err(_) => Err(SieveError::OracleTimeout { addr: addr.to_string() }),
            };
            match outcome {
                Ok(attribution) => return Ok(attribution),
                Err(err) if attempt < self.policy.attempts => {
                    warn!(%addr, attempt, %err, "oracle lookup failed, retrying");
                    tokio::time::sleep(delay).await;
                    delay = delay.saturating_mul(2);
                    attempt = attempt.saturating_add(1);
                }
                Err(err) => return Err(err),
            }
        }
    }
}
