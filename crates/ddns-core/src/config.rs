//! Configuration types for the DDNS reconciler
//!
//! Two pieces of configuration drive a run:
//! - [`AuthConfig`]: the provider API token, read from a JSON file
//! - [`ReconcileRequest`]: the desired record, built from command-line values

use crate::error::{Error, Result};
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::Path;

/// Default record TTL in seconds
pub const DEFAULT_TTL: u32 = 120;

/// Default public IP echo endpoint
pub const DEFAULT_IP_PROVIDER_URL: &str = "https://icanhazip.com/";

/// TTL value Cloudflare interprets as "automatic"
pub const AUTOMATIC_TTL: u32 = 1;

/// Smallest explicit TTL the provider accepts
pub const MIN_TTL: u32 = 60;

/// Largest explicit TTL the provider accepts
pub const MAX_TTL: u32 = 86_400;

/// Provider credentials
///
/// Loaded once at startup and never written back.
///
/// # Security
///
/// The Debug implementation does NOT expose the API token.
#[derive(Clone, Deserialize)]
pub struct AuthConfig {
    /// Cloudflare API token
    #[serde(rename = "CloudflareApiToken")]
    api_token: String,
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("api_token", &"<REDACTED>")
            .finish()
    }
}

impl AuthConfig {
    /// Create an auth config from a token
    pub fn new(api_token: impl Into<String>) -> Self {
        Self {
            api_token: api_token.into(),
        }
    }

    /// Load the auth config from a JSON file
    ///
    /// The file must hold an object with a `CloudflareApiToken` string field;
    /// other fields are ignored.
    ///
    /// # Errors
    ///
    /// - [`Error::ConfigNotFound`] if `path` does not exist
    /// - [`Error::ConfigParse`] if the file cannot be read, is not valid
    ///   JSON, lacks the token field, or holds an empty token
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(Error::config_not_found(path));
        }

        let content =
            fs::read_to_string(path).map_err(|e| Error::config_parse(path, e.to_string()))?;

        let config: AuthConfig =
            serde_json::from_str(&content).map_err(|e| Error::config_parse(path, e.to_string()))?;

        if config.api_token.trim().is_empty() {
            return Err(Error::config_parse(path, "CloudflareApiToken cannot be empty"));
        }

        tracing::debug!("Loaded auth config from {}", path.display());
        Ok(config)
    }

    /// The API token
    ///
    /// ⚠️ NEVER log this value
    pub fn api_token(&self) -> &str {
        &self.api_token
    }
}

/// Desired end state for one run
///
/// The desired IP is not part of the request: it is whatever the IP source
/// reports during the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileRequest {
    /// Provider zone identifier
    pub zone_id: String,

    /// DNS record name (e.g., "home.example.org")
    pub name: String,

    /// Desired TTL in seconds
    pub ttl: u32,
}

impl ReconcileRequest {
    /// Create a request with the default TTL
    pub fn new(zone_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            zone_id: zone_id.into(),
            name: name.into(),
            ttl: DEFAULT_TTL,
        }
    }

    /// Set the desired TTL
    pub fn with_ttl(mut self, ttl: u32) -> Self {
        self.ttl = ttl;
        self
    }

    /// Validate the request before any network call is made
    pub fn validate(&self) -> Result<()> {
        if self.zone_id.trim().is_empty() {
            return Err(Error::config("Zone identifier cannot be empty"));
        }

        validate_domain_name(&self.name)?;

        if self.ttl != AUTOMATIC_TTL && !(MIN_TTL..=MAX_TTL).contains(&self.ttl) {
            return Err(Error::config(format!(
                "TTL must be {} (automatic) or between {} and {} seconds. Got: {}",
                AUTOMATIC_TTL, MIN_TTL, MAX_TTL, self.ttl
            )));
        }

        Ok(())
    }
}

/// Validate that a string is a usable DNS record name
///
/// Basic RFC 1035 checks; a leading `*` label is accepted for wildcard
/// records.
fn validate_domain_name(domain: &str) -> Result<()> {
    if domain.is_empty() {
        return Err(Error::config("Domain name cannot be empty"));
    }

    // Fully qualified form: one trailing root dot
    let domain = domain.strip_suffix('.').unwrap_or(domain);

    if domain.len() > 253 {
        return Err(Error::config(format!(
            "Domain name too long: {} chars (max 253). Got: {}",
            domain.len(),
            domain
        )));
    }

    for (index, label) in domain.split('.').enumerate() {
        if label.is_empty() {
            return Err(Error::config(format!(
                "Domain name has empty label: '{}'",
                domain
            )));
        }

        if index == 0 && label == "*" {
            continue;
        }

        if label.len() > 63 {
            return Err(Error::config(format!(
                "Domain label too long: {} chars (max 63). Label: '{}'",
                label.len(),
                label
            )));
        }

        if !label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
            return Err(Error::config(format!(
                "Domain label contains invalid characters. Label: '{}'",
                label
            )));
        }

        if label.starts_with('-') || label.ends_with('-') {
            return Err(Error::config(format!(
                "Domain label cannot start or end with hyphen. Label: '{}'",
                label
            )));
        }
    }

    Ok(())
}
