// # IP Source Trait
//
// Defines the interface for resolving the caller's current public IPv4
// address.
//
// ## Implementations
//
// - HTTP echo endpoint: `ddns-ip-http` crate
//
// ## Usage
//
// ```rust,ignore
// use ddns_core::IpSource;
//
// let ip = source.current().await?;
// println!("Your IP address is {ip}");
// ```

use async_trait::async_trait;
use std::net::Ipv4Addr;

/// Trait for IP source implementations
///
/// A source answers one question, once per call: what is the public
/// address right now. It does not poll, cache, or retry.
#[async_trait]
pub trait IpSource: Send + Sync {
    /// Get the current public IPv4 address
    ///
    /// # Returns
    ///
    /// - `Ok(Ipv4Addr)`: The current IP address
    /// - `Err(Error::IpLookupFailed)`: If unable to determine it
    async fn current(&self) -> Result<Ipv4Addr, crate::Error>;

    /// Human-readable description of where the address comes from
    fn describe(&self) -> String;
}
