// # HTTP IP Source
//
// This crate provides an HTTP-based IP source for ddns-oneshot.
//
// ## Architecture
//
// Fetches the current public IP from an external echo service (e.g.,
// icanhazip.com, api.ipify.org) that answers a plain GET with the caller's
// address as text. One request per call, no polling, no caching.

use ddns_core::traits::IpSource;
use ddns_core::{Error, Result};

use std::net::Ipv4Addr;

/// HTTP-based IP source
pub struct HttpIpSource {
    /// URL to fetch IP from
    url: String,

    /// HTTP client shared with the rest of the run
    client: reqwest::Client,
}

impl HttpIpSource {
    /// Create a new HTTP IP source
    ///
    /// # Parameters
    ///
    /// - `client`: HTTP client owned by the caller
    /// - `url`: URL to fetch IP from (e.g., "https://icanhazip.com/")
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client,
        }
    }

    /// Echo endpoint URL
    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Parse an echo response body into an IPv4 address
///
/// Surrounding whitespace (including the trailing newline most services
/// send) is ignored.
fn parse_echo_body(body: &str) -> Result<Ipv4Addr> {
    let ip_text = body.trim();

    if ip_text.is_empty() {
        return Err(Error::ip_lookup("Echo service returned an empty response"));
    }

    ip_text
        .parse()
        .map_err(|_| Error::ip_lookup(format!("'{}' is not an IPv4 address", ip_text)))
}

#[async_trait::async_trait]
impl IpSource for HttpIpSource {
    async fn current(&self) -> Result<Ipv4Addr> {
        tracing::debug!("Fetching public IP from {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| Error::ip_lookup(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::ip_lookup(format!(
                "HTTP error: {}",
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::ip_lookup(format!("Failed to read response: {}", e)))?;

        parse_echo_body(&body)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}
