//! IP metadata lookup against an ip2location.io-style provider.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Lookup error types.
#[derive(Error, Debug)]
pub enum LookupError {
    #[error("lookup request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("lookup provider returned status {0}")]
    UpstreamStatus(u16),
}

/// What the provider answers with. Only the fields we normalize.
#[derive(Debug, Default, Deserialize)]
struct ProviderRecord {
    #[serde(default)]
    ip: String,
    #[serde(default)]
    country_name: String,
    #[serde(default)]
    city_name: String,
    #[serde(default)]
    region_name: String,
    #[serde(default)]
    asn: String,
    #[serde(default, rename = "as")]
    as_name: String,
    #[serde(default)]
    is_proxy: Option<bool>,
    #[serde(default)]
    proxy_type: Option<String>,
}

/// Autonomous system a looked-up address belongs to.
#[derive(Debug, Clone, Serialize)]
pub struct AsnInfo {
    pub asn: String,
    pub name: String,
}

/// Normalized lookup answer served to clients.
#[derive(Debug, Clone, Serialize)]
pub struct IpRecord {
    pub ip: String,
    pub country: String,
    pub city: String,
    pub region: String,
    pub asn: AsnInfo,
    #[serde(rename = "type")]
    pub network_type: String,
}

/// Client for the lookup provider.
pub struct LookupClient {
    client: reqwest::Client,
    base_url: String,
    key: Option<String>,
}

impl LookupClient {
    pub fn new(base_url: &str, key: Option<String>) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            key,
        })
    }

    /// Look up one address, or the caller's own when `ip` is `None`.
    pub async fn lookup(&self, ip: Option<&str>) -> Result<IpRecord, LookupError> {
        let mut request = self.client.get(&self.base_url).query(&[("format", "json")]);
        if let Some(key) = &self.key {
            request = request.query(&[("key", key.as_str())]);
        }
        if let Some(ip) = ip {
            request = request.query(&[("ip", ip)]);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(LookupError::UpstreamStatus(response.status().as_u16()));
        }

        let record: ProviderRecord = response.json().await?;
        Ok(normalize(record))
    }
}

/// Collapse the provider's flat record into the served shape. Any proxy
/// signal classifies the address as datacenter rather than end-user space.
fn normalize(record: ProviderRecord) -> IpRecord {
    let proxied = record.is_proxy.unwrap_or(false)
        || record.proxy_type.as_deref().is_some_and(|t| t != "-");
    let network_type = if proxied { "IDC" } else { "Home/Enterprise" };

    IpRecord {
        ip: record.ip,
        country: record.country_name,
        city: record.city_name,
        region: record.region_name,
        asn: AsnInfo {
            asn: record.asn,
            name: record.as_name,
        },
        network_type: network_type.to_string(),
    }
}
