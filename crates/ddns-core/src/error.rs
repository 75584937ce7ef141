//! Error types for the DDNS reconciler
//!
//! Every variant is terminal for a run: nothing is retried or recovered
//! locally, and the binary maps each one to a single console line and
//! exit code 1.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for DDNS operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the DDNS reconciler
#[derive(Error, Debug)]
pub enum Error {
    /// The auth config file does not exist
    #[error("Config file does not exist: {}", .0.display())]
    ConfigNotFound(PathBuf),

    /// The auth config file exists but could not be read or decoded
    #[error("Failed to parse config file {}: {message}", path.display())]
    ConfigParse {
        /// Path of the offending file
        path: PathBuf,
        /// Parser or I/O message
        message: String,
    },

    /// Invalid run parameters (record name, zone, TTL)
    #[error("Configuration error: {0}")]
    Config(String),

    /// The provider rejected the API token, or could not be reached
    #[error("Authentication failure with the DNS provider: {0}")]
    AuthVerificationFailed(String),

    /// The public IP echo endpoint failed or returned garbage
    #[error("Failed to lookup public IP address: {0}")]
    IpLookupFailed(String),

    /// The record listing could not be fetched or decoded
    #[error("DNS record lookup failed: {0}")]
    RecordLookup(String),

    /// Creating the record failed
    #[error("Failed to create DNS record: {0}")]
    RecordCreateFailed(String),

    /// Updating the record failed
    #[error("Failed to update DNS record: {0}")]
    RecordUpdateFailed(String),
}

impl Error {
    /// Create a "config not found" error
    pub fn config_not_found(path: impl Into<PathBuf>) -> Self {
        Self::ConfigNotFound(path.into())
    }

    /// Create a config parse error
    pub fn config_parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::ConfigParse {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an authentication error
    pub fn auth(msg: impl Into<String>) -> Self {
        Self::AuthVerificationFailed(msg.into())
    }

    /// Create an IP lookup error
    pub fn ip_lookup(msg: impl Into<String>) -> Self {
        Self::IpLookupFailed(msg.into())
    }

    /// Create a record lookup error
    pub fn record_lookup(msg: impl Into<String>) -> Self {
        Self::RecordLookup(msg.into())
    }

    /// Create a record creation error
    pub fn record_create(msg: impl Into<String>) -> Self {
        Self::RecordCreateFailed(msg.into())
    }

    /// Create a record update error
    pub fn record_update(msg: impl Into<String>) -> Self {
        Self::RecordUpdateFailed(msg.into())
    }
}
