// # Cloudflare DNS Provider
//
// This crate provides the Cloudflare DNS provider for ddns-oneshot.
//
// ## Behavior
//
// - One HTTP request per trait call; the Reconciler decides which calls to make
// - NO retry logic, NO backoff, NO caching
// - Every non-2xx status is treated the same way; the status is kept in the
//   error message for logs
// - Dry-run mode performs GET requests only and logs intended writes
//
// ## Security Requirements
//
// - API token NEVER appears in logs or error messages
// - Provider refuses to build with an empty token
//
// ## API Reference
//
// - Cloudflare API v4: https://developers.cloudflare.com/api/
// - Verify Token: GET `/user/tokens/verify`
// - List DNS Records: GET `/zones/:zone_id/dns_records?type=A&name=...`
// - Create DNS Record: POST `/zones/:zone_id/dns_records`
// - Update DNS Record: PUT `/zones/:zone_id/dns_records/:record_id`

use async_trait::async_trait;
use ddns_core::traits::{DesiredRecord, DnsProvider, DnsRecord, RECORD_TYPE_A};
use ddns_core::{Error, Result};
use reqwest::{Method, StatusCode};
use serde::Deserialize;

/// Cloudflare API base URL
pub const CLOUDFLARE_API_BASE: &str = "https://api.cloudflare.com/client/v4";

/// Envelope returned by the record listing endpoint
#[derive(Debug, Deserialize)]
struct ListRecordsResponse {
    success: bool,
    #[serde(default)]
    result: Option<Vec<DnsRecord>>,
}

/// Cloudflare DNS provider
///
/// # Dry-Run Mode
///
/// When `dry_run` is true, the provider will:
/// - Perform all GET requests (token verification, record lookup)
/// - Log the intended POST/PUT payload
/// - **NOT** actually modify DNS records
///
/// # Security
///
/// The Debug implementation intentionally does NOT expose the API token.
pub struct CloudflareProvider {
    /// Cloudflare API token
    /// ⚠️ NEVER log this value
    api_token: String,

    /// API root, without trailing slash
    api_base: String,

    /// HTTP client shared with the rest of the run
    client: reqwest::Client,

    /// Dry-run mode: if true, perform GET requests but skip writes
    dry_run: bool,
}

// Custom Debug implementation that hides the API token
impl std::fmt::Debug for CloudflareProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudflareProvider")
            .field("api_token", &"<REDACTED>")
            .field("api_base", &self.api_base)
            .field("dry_run", &self.dry_run)
            .finish()
    }
}

impl CloudflareProvider {
    /// Create a new Cloudflare provider (live mode, public API)
    ///
    /// # Parameters
    ///
    /// - `client`: HTTP client owned by the caller
    /// - `api_token`: Cloudflare API token with Zone:DNS:Edit permissions
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the token is empty.
    pub fn new(client: reqwest::Client, api_token: impl Into<String>) -> Result<Self> {
        let api_token = api_token.into();

        if api_token.trim().is_empty() {
            return Err(Error::config("Cloudflare API token cannot be empty"));
        }

        Ok(Self {
            api_token,
            api_base: CLOUDFLARE_API_BASE.to_string(),
            client,
            dry_run: false,
        })
    }

    /// Point the provider at a different API root
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    /// Enable or disable dry-run mode
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Whether writes are skipped
    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }

    fn records_url(&self, zone_id: &str) -> String {
        self.url(&format!("/zones/{}/dns_records", zone_id))
    }

    fn record_url(&self, zone_id: &str, record_id: &str) -> String {
        self.url(&format!("/zones/{}/dns_records/{}", zone_id, record_id))
    }

    /// Send an authenticated request and return its status
    ///
    /// Transport errors are returned as plain messages so each caller can
    /// wrap them in its own error kind.
    async fn send_write(
        &self,
        method: Method,
        url: &str,
        record: &DesiredRecord,
    ) -> std::result::Result<(), String> {
        if self.dry_run {
            tracing::info!(
                "[DRY-RUN] Would send {} request to {} with payload: {}",
                method,
                url,
                serde_json::to_string(record).unwrap_or_default()
            );
            return Ok(());
        }

        let response = self
            .client
            .request(method, url)
            .bearer_auth(&self.api_token)
            .json(record)
            .send()
            .await
            .map_err(|e| format!("HTTP request failed: {}", e))?;

        check_status(response.status())
    }
}

/// Map a response status to the coarse success/failure used everywhere
fn check_status(status: StatusCode) -> std::result::Result<(), String> {
    if status.is_success() {
        Ok(())
    } else {
        Err(format!("HTTP {}", status))
    }
}

#[async_trait]
impl DnsProvider for CloudflareProvider {
    /// Verify the API token
    ///
    /// # API Call
    ///
    /// ```http
    /// GET /user/tokens/verify
    /// Authorization: Bearer <token>
    /// ```
    async fn verify_credentials(&self) -> Result<()> {
        tracing::debug!("Verifying Cloudflare API token");

        let response = self
            .client
            .get(self.url("/user/tokens/verify"))
            .bearer_auth(&self.api_token)
            .send()
            .await
            .map_err(|e| Error::auth(format!("HTTP request failed: {}", e)))?;

        check_status(response.status()).map_err(Error::auth)?;

        tracing::debug!("Cloudflare API token verified");
        Ok(())
    }

    /// Find the first "A" record with the given name
    ///
    /// # API Call
    ///
    /// ```http
    /// GET /zones/:zone_id/dns_records?type=A&name=home.example.org
    /// Authorization: Bearer <token>
    /// ```
    async fn find_record(&self, zone_id: &str, name: &str) -> Result<Option<DnsRecord>> {
        tracing::debug!("Looking up record: {} (type: {})", name, RECORD_TYPE_A);

        let response = self
            .client
            .get(self.records_url(zone_id))
            .query(&[("type", RECORD_TYPE_A), ("name", name)])
            .bearer_auth(&self.api_token)
            .send()
            .await
            .map_err(|e| Error::record_lookup(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        let body: ListRecordsResponse = response.json().await.map_err(|e| {
            Error::record_lookup(format!("HTTP {}: failed to parse response: {}", status, e))
        })?;

        if !body.success {
            tracing::debug!("Record lookup reported success=false (HTTP {})", status);
            return Ok(None);
        }

        let record = body.result.and_then(|records| records.into_iter().next());
        match &record {
            Some(r) => tracing::debug!("Found record ID: {}", r.id),
            None => tracing::debug!("No existing record for {}", name),
        }
        Ok(record)
    }

    /// Create a record
    ///
    /// # API Call
    ///
    /// ```http
    /// POST /zones/:zone_id/dns_records
    /// { "type": "A", "name": "...", "content": "1.2.3.4", "ttl": 120 }
    /// ```
    async fn create_record(&self, zone_id: &str, record: &DesiredRecord) -> Result<()> {
        let url = self.records_url(zone_id);
        self.send_write(Method::POST, &url, record)
            .await
            .map_err(Error::record_create)?;

        tracing::info!("DNS record created: {} -> {}", record.name, record.content);
        Ok(())
    }

    /// Replace a record
    ///
    /// # API Call
    ///
    /// ```http
    /// PUT /zones/:zone_id/dns_records/:record_id
    /// { "type": "A", "name": "...", "content": "1.2.3.4", "ttl": 120 }
    /// ```
    async fn update_record(
        &self,
        zone_id: &str,
        record_id: &str,
        record: &DesiredRecord,
    ) -> Result<()> {
        let url = self.record_url(zone_id, record_id);
        self.send_write(Method::PUT, &url, record)
            .await
            .map_err(Error::record_update)?;

        tracing::info!("DNS record updated: {} -> {}", record.name, record.content);
        Ok(())
    }

    fn provider_name(&self) -> &'static str {
        "cloudflare"
    }
}
