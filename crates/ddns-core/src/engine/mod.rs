//! Reconciliation engine
//!
//! The Reconciler performs one run:
//! - Verifying the API token with the DnsProvider
//! - Resolving the public IP via the IpSource
//! - Looking up the existing "A" record
//! - Creating, updating, or leaving the record alone
//!
//! ## State Machine
//!
//! ```text
//! Start ──verify──▶ AuthVerified ──resolve──▶ IpResolved ──lookup──▶ RecordLookedUp
//!   │                    │                        │                      │
//!   ▼                    ▼                        ▼                      │
//! Failed(auth)       Failed(ip)            Failed(lookup)                │
//!                                                   ┌────────────────────┼───────────────────┐
//!                                                   ▼                    ▼                   ▼
//!                                            no record: create   matches: UpToDate   differs: update
//!                                                   │                                        │
//!                                          Created | Failed(create)           Updated | Failed(update)
//! ```
//!
//! Every stage is awaited before the next one starts. Nothing is retried.

use crate::config::ReconcileRequest;
use crate::error::Result;
use crate::traits::{DesiredRecord, DnsProvider, IpSource};
use std::fmt;
use tracing::{debug, info};

/// Stages of a reconciliation run, used to label transitions in the debug log
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    /// Nothing done yet
    Start,
    /// The provider accepted the API token
    AuthVerified,
    /// The public IP is known
    IpResolved,
    /// The existing record (if any) is known
    RecordLookedUp,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Start => "start",
            Stage::AuthVerified => "auth-verified",
            Stage::IpResolved => "ip-resolved",
            Stage::RecordLookedUp => "record-looked-up",
        };
        f.write_str(name)
    }
}

/// Successful terminal states of a run
///
/// Failures are the `Err` arm of [`Reconciler::reconcile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// No record existed; one was created
    Created,
    /// The existing record already matched; nothing was written
    UpToDate,
    /// The existing record differed and was replaced
    Updated,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            Outcome::Created => "New DNS record has been created.",
            Outcome::UpToDate => "Existing DNS record is already up-to-date.",
            Outcome::Updated => "Existing DNS record has been updated.",
        };
        f.write_str(message)
    }
}

/// Core reconciler
///
/// Holds the provider and IP source for the duration of a run. Both are
/// expected to share one HTTP client owned by the caller.
pub struct Reconciler {
    /// DNS provider for verifying credentials and writing records
    provider: Box<dyn DnsProvider>,

    /// Source of the current public IP
    ip_source: Box<dyn IpSource>,
}

impl Reconciler {
    /// Create a new reconciler
    pub fn new(provider: Box<dyn DnsProvider>, ip_source: Box<dyn IpSource>) -> Self {
        Self {
            provider,
            ip_source,
        }
    }

    /// Run the reconciliation workflow once
    ///
    /// # Returns
    ///
    /// - `Ok(Outcome)`: The record is in the desired state
    /// - `Err(Error)`: The run stopped at the failing stage; later stages
    ///   were not attempted
    pub async fn reconcile(&self, request: &ReconcileRequest) -> Result<Outcome> {
        request.validate()?;

        debug!(
            "Reconciling {} in zone {} via {} [stage: {}]",
            request.name,
            request.zone_id,
            self.provider.provider_name(),
            Stage::Start
        );

        self.provider.verify_credentials().await?;
        debug!("Stage transition: {} -> {}", Stage::Start, Stage::AuthVerified);

        let ip = self.ip_source.current().await?;
        info!("Your IP address is {} (from {})", ip, self.ip_source.describe());
        debug!("Stage transition: {} -> {}", Stage::AuthVerified, Stage::IpResolved);

        let desired = DesiredRecord::a(&request.name, ip.to_string(), request.ttl);

        // An unanswered lookup must not be read as "no record": creating
        // blindly could add a second A record for the name.
        let existing = self
            .provider
            .find_record(&request.zone_id, &request.name)
            .await?;
        debug!("Stage transition: {} -> {}", Stage::IpResolved, Stage::RecordLookedUp);

        match existing {
            None => {
                info!(
                    "Creating record {} -> {} (ttl {})",
                    desired.name, desired.content, desired.ttl
                );
                self.provider
                    .create_record(&request.zone_id, &desired)
                    .await?;
                Ok(Outcome::Created)
            }
            Some(record) if record.matches(&desired) => {
                info!(
                    "Record {} already has IP {} and ttl {}, no update needed",
                    record.name, record.content, record.ttl
                );
                Ok(Outcome::UpToDate)
            }
            Some(record) => {
                info!(
                    "Updating record {} ({}): {} -> {}, ttl {} -> {}",
                    record.name, record.id, record.content, desired.content, record.ttl, desired.ttl
                );
                self.provider
                    .update_record(&request.zone_id, &record.id, &desired)
                    .await?;
                Ok(Outcome::Updated)
            }
        }
    }
}
