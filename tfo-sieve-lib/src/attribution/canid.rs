use std::net::IpAddr;
use std::str::FromStr;

use ipnet::IpNet;
use serde::Deserialize;

use super::{Attribution, AttributionOracle};
use crate::error::{Result, SieveError};

/// Client of the local prefix/ASN caching service
///
/// Queried as `GET <base>/prefix.json?addr=<address>`; both `Prefix` and
/// `ASN` must be present in the answer.
#[derive(Debug, Clone)]
pub struct CanidOracle {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Deserialize)]
struct CanidResponse {
    #[serde(rename = "Prefix")]
    prefix: String,
    #[serde(rename = "ASN")]
    asn: u32,
}

impl CanidOracle {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self { client, base_url: base_url.into() }
    }

    pub fn url_for(&self, addr: IpAddr) -> String {
        format!("{}/prefix.json?addr={addr}", self.base_url.trim_end_matches('/'))
    }
}

/// Decode a canid response body
pub fn parse_canid(body: &str) -> Result<Attribution> {
    let response: CanidResponse = serde_json::from_str(body)
        .map_err(|e| SieveError::Oracle(format!("Malformed canid response: {e}")))?;
    let prefix = IpNet::from_str(response.prefix.trim())
        .map_err(|_| SieveError::InvalidPrefix(response.prefix.clone()))?;
    Ok(Attribution::new(prefix, response.asn))
}

impl AttributionOracle for CanidOracle {
    async fn lookup(&self, addr: IpAddr) -> Result<Attribution> {
        let body = self
            .client
            .get(self.url_for(addr))
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        parse_canid(&body)
    }
}
