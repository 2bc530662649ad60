use std::net::IpAddr;
use std::str::FromStr;

use ipnet::IpNet;
use serde::Deserialize;

use super::{Attribution, AttributionOracle};
use crate::error::{Result, SieveError};

/// Client of the RIPEstat prefix-overview data API
///
/// Missing `resource` or `asns` fields yield an unresolved half instead of an
/// error; only transport failures and non-JSON bodies are errors.
#[derive(Debug, Clone)]
pub struct RipeStatOracle {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Deserialize, Default)]
struct RipeStatResponse {
    #[serde(default)]
    data: Option<RipeStatData>,
}

#[derive(Deserialize, Default)]
struct RipeStatData {
    #[serde(default)]
    resource: Option<String>,
    #[serde(default)]
    asns: Vec<RipeStatAsn>,
}

#[derive(Deserialize)]
struct RipeStatAsn {
    #[serde(default)]
    asn: Option<u32>,
}

impl RipeStatOracle {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self { client, base_url: base_url.into() }
    }

    pub fn url_for(&self, addr: IpAddr) -> String {
        format!(
            "{}/data/prefix-overview/data.json?resource={addr}",
            self.base_url.trim_end_matches('/')
        )
    }
}

/// Decode a RIPEstat prefix-overview body, first listed ASN wins
pub fn parse_ripestat(body: &str) -> Result<Attribution> {
    let response: RipeStatResponse = serde_json::from_str(body)
        .map_err(|e| SieveError::Oracle(format!("Malformed RIPEstat response: {e}")))?;
    let data = response.data.unwrap_or_default();
    let prefix = data.resource.as_deref().and_then(parse_resource);
    let asn = data.asns.first().and_then(|a| a.asn);
    Ok(Attribution { prefix, asn })
}

fn parse_resource(resource: &str) -> Option<IpNet> {
    let resource = resource.trim();
    IpNet::from_str(resource)
        .ok()
        .or_else(|| IpAddr::from_str(resource).ok().map(IpNet::from))
}

impl AttributionOracle for RipeStatOracle {
    async fn lookup(&self, addr: IpAddr) -> Result<Attribution> {
        let body = self
            .client
            .get(self.url_for(addr))
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        parse_ripestat(&body)
    }
}
