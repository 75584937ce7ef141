// # ddns-core
//
// Core library for one-shot dynamic DNS reconciliation.
//
// ## Architecture Overview
//
// This library provides the pieces of a single reconciliation run:
// - **AuthConfig**: Provider API token loaded from a JSON file
// - **ReconcileRequest**: Desired record name, zone and TTL
// - **IpSource**: Trait for resolving the current public IPv4 address
// - **DnsProvider**: Trait for verifying credentials and reading/writing records
// - **Reconciler**: Sequential state machine deciding create / update / no-op
//
// ## Design Principles
//
// 1. **Separation of Concerns**: Core logic is separate from provider and IP implementations
// 2. **Sequential**: One awaited request at a time, no background tasks
// 3. **No Retries**: The first failure ends the run
// 4. **Library-First**: The workflow can be embedded without the CLI

pub mod traits;
pub mod engine;
pub mod config;
pub mod error;

// Re-export core types for convenience
pub use traits::{IpSource, DnsProvider, DnsRecord, DesiredRecord};
pub use engine::{Reconciler, Outcome};
pub use config::{AuthConfig, ReconcileRequest};
pub use error::{Error, Result};
