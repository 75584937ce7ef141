//! Core traits for the DDNS reconciler
//!
//! This module defines the abstract interfaces the reconciler drives.
//!
//! - [`IpSource`]: Resolve the current public IP address
//! - [`DnsProvider`]: Verify credentials and read/write DNS records via provider APIs

pub mod ip_source;
pub mod dns_provider;

pub use ip_source::IpSource;
pub use dns_provider::{DnsProvider, DnsRecord, DesiredRecord, RECORD_TYPE_A};
