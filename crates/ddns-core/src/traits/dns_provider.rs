// # DNS Provider Trait
//
// Defines the interface for reading and writing DNS "A" records via
// provider APIs.
//
// ## Implementations
//
// - Cloudflare: `ddns-provider-cloudflare` crate
//
// ## Usage
//
// ```rust,ignore
// use ddns_core::traits::{DnsProvider, DesiredRecord};
//
// provider.verify_credentials().await?;
// match provider.find_record("zone", "home.example.org").await? {
//     Some(record) => provider.update_record("zone", &record.id, &desired).await?,
//     None => provider.create_record("zone", &desired).await?,
// }
// ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// The only record type this system manages
pub const RECORD_TYPE_A: &str = "A";

/// A provider-side DNS "A" record
///
/// Only ever built from a provider response; the identifier is opaque.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DnsRecord {
    /// The record ID (provider-assigned)
    pub id: String,
    /// The record name
    pub name: String,
    /// The record content (IPv4 address as text)
    pub content: String,
    /// Time-to-live in seconds
    pub ttl: u32,
}

impl DnsRecord {
    /// Whether this record already matches the desired content and TTL
    pub fn matches(&self, desired: &DesiredRecord) -> bool {
        self.content == desired.content && self.ttl == desired.ttl
    }
}

/// Record body sent on create and update
///
/// Serializes as `{"type": "A", "name": .., "content": .., "ttl": ..}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DesiredRecord {
    /// Always [`RECORD_TYPE_A`]
    #[serde(rename = "type")]
    pub record_type: &'static str,
    /// The record name
    pub name: String,
    /// The IPv4 address as text
    pub content: String,
    /// Time-to-live in seconds
    pub ttl: u32,
}

impl DesiredRecord {
    /// Create an "A" record body
    pub fn a(name: impl Into<String>, content: impl Into<String>, ttl: u32) -> Self {
        Self {
            record_type: RECORD_TYPE_A,
            name: name.into(),
            content: content.into(),
            ttl,
        }
    }
}

/// Trait for DNS provider implementations
///
/// Implementations wrap one provider's HTTP API. Each method performs
/// exactly one request and reports the outcome; deciding *which* method
/// to call is owned by the [`Reconciler`](crate::Reconciler).
///
/// ## Forbidden
/// - Retry logic or backoff (a failed request ends the run)
/// - Caching records between calls
/// - Deciding whether an update is needed
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// Check that the configured API token is accepted by the provider
    ///
    /// # Returns
    ///
    /// - `Ok(())`: The provider reported success
    /// - `Err(Error::AuthVerificationFailed)`: Any non-success status or
    ///   transport failure
    async fn verify_credentials(&self) -> Result<(), crate::Error>;

    /// Find the first "A" record with the given name in a zone
    ///
    /// # Returns
    ///
    /// - `Ok(Some(record))`: The provider reported success with at least one match
    /// - `Ok(None)`: No match, or the provider reported `success: false`
    /// - `Err(Error::RecordLookup)`: The request failed or the body was undecodable
    async fn find_record(
        &self,
        zone_id: &str,
        name: &str,
    ) -> Result<Option<DnsRecord>, crate::Error>;

    /// Create a new record in a zone
    async fn create_record(
        &self,
        zone_id: &str,
        record: &DesiredRecord,
    ) -> Result<(), crate::Error>;

    /// Replace an existing record
    async fn update_record(
        &self,
        zone_id: &str,
        record_id: &str,
        record: &DesiredRecord,
    ) -> Result<(), crate::Error>;

    /// Get the provider name (for logging/debugging)
    fn provider_name(&self) -> &'static str;
}
