//! Test doubles and common utilities for reconciliation contract tests
//!
//! The doubles keep their state behind `Arc`s so a test can clone one,
//! hand the clone to the `Reconciler`, and inspect the original afterwards.

#![allow(dead_code)]

use ddns_core::error::{Error, Result};
use ddns_core::traits::{DesiredRecord, DnsProvider, DnsRecord, IpSource};
use ddns_core::ReconcileRequest;
use std::net::Ipv4Addr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const ZONE: &str = "zone-123";
pub const NAME: &str = "home.example.org";

/// A call observed by [`FakeDnsProvider`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderCall {
    Verify,
    Find {
        zone_id: String,
        name: String,
    },
    Create {
        zone_id: String,
        record: DesiredRecord,
    },
    Update {
        zone_id: String,
        record_id: String,
        record: DesiredRecord,
    },
}

/// An in-memory DnsProvider that records every call
#[derive(Clone)]
pub struct FakeDnsProvider {
    records: Arc<Mutex<Vec<DnsRecord>>>,
    calls: Arc<Mutex<Vec<ProviderCall>>>,
    next_id: Arc<AtomicUsize>,
    token_valid: bool,
    lookup_fails: bool,
    writes_fail: bool,
}

impl FakeDnsProvider {
    pub fn new() -> Self {
        Self {
            records: Arc::new(Mutex::new(Vec::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            next_id: Arc::new(AtomicUsize::new(1)),
            token_valid: true,
            lookup_fails: false,
            writes_fail: false,
        }
    }

    /// Seed an existing record
    pub fn with_record(self, id: &str, content: &str, ttl: u32) -> Self {
        self.records.lock().unwrap().push(DnsRecord {
            id: id.to_string(),
            name: NAME.to_string(),
            content: content.to_string(),
            ttl,
        });
        self
    }

    /// Reject the API token (like an HTTP 401)
    pub fn rejecting_token(mut self) -> Self {
        self.token_valid = false;
        self
    }

    /// Fail every lookup (like an unreachable API)
    pub fn failing_lookup(mut self) -> Self {
        self.lookup_fails = true;
        self
    }

    /// Fail every create and update
    pub fn failing_writes(mut self) -> Self {
        self.writes_fail = true;
        self
    }

    pub fn calls(&self) -> Vec<ProviderCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn records(&self) -> Vec<DnsRecord> {
        self.records.lock().unwrap().clone()
    }

    /// Number of create and update calls
    pub fn write_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, ProviderCall::Create { .. } | ProviderCall::Update { .. }))
            .count()
    }

    fn record_call(&self, call: ProviderCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait::async_trait]
impl DnsProvider for FakeDnsProvider {
    async fn verify_credentials(&self) -> Result<()> {
        self.record_call(ProviderCall::Verify);
        if self.token_valid {
            Ok(())
        } else {
            Err(Error::auth("HTTP 401 Unauthorized"))
        }
    }

    async fn find_record(&self, zone_id: &str, name: &str) -> Result<Option<DnsRecord>> {
        self.record_call(ProviderCall::Find {
            zone_id: zone_id.to_string(),
            name: name.to_string(),
        });
        if self.lookup_fails {
            return Err(Error::record_lookup("connection refused"));
        }
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.name == name)
            .cloned())
    }

    async fn create_record(&self, zone_id: &str, record: &DesiredRecord) -> Result<()> {
        self.record_call(ProviderCall::Create {
            zone_id: zone_id.to_string(),
            record: record.clone(),
        });
        if self.writes_fail {
            return Err(Error::record_create("HTTP 400 Bad Request"));
        }
        let id = format!("rec-{}", self.next_id.fetch_add(1, Ordering::SeqCst));
        self.records.lock().unwrap().push(DnsRecord {
            id,
            name: record.name.clone(),
            content: record.content.clone(),
            ttl: record.ttl,
        });
        Ok(())
    }

    async fn update_record(
        &self,
        zone_id: &str,
        record_id: &str,
        record: &DesiredRecord,
    ) -> Result<()> {
        self.record_call(ProviderCall::Update {
            zone_id: zone_id.to_string(),
            record_id: record_id.to_string(),
            record: record.clone(),
        });
        if self.writes_fail {
            return Err(Error::record_update("HTTP 400 Bad Request"));
        }
        let mut records = self.records.lock().unwrap();
        let existing = records
            .iter_mut()
            .find(|r| r.id == record_id)
            .ok_or_else(|| Error::record_update("HTTP 404 Not Found"))?;
        existing.content = record.content.clone();
        existing.ttl = record.ttl;
        Ok(())
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }
}

/// An IpSource returning a fixed answer
#[derive(Clone)]
pub struct FixedIpSource {
    ip: Arc<Mutex<Option<Ipv4Addr>>>,
    call_count: Arc<AtomicUsize>,
}

impl FixedIpSource {
    pub fn new(ip: Ipv4Addr) -> Self {
        Self {
            ip: Arc::new(Mutex::new(Some(ip))),
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// A source whose lookups always fail
    pub fn failing() -> Self {
        Self {
            ip: Arc::new(Mutex::new(None)),
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Change the address reported by later calls
    pub fn set_ip(&self, ip: Ipv4Addr) {
        *self.ip.lock().unwrap() = Some(ip);
    }

    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl IpSource for FixedIpSource {
    async fn current(&self) -> Result<Ipv4Addr> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.ip
            .lock()
            .unwrap()
            .ok_or_else(|| Error::ip_lookup("HTTP 503 Service Unavailable"))
    }

    fn describe(&self) -> String {
        "fixed".to_string()
    }
}

/// Request for [`NAME`] in [`ZONE`] with the given TTL
pub fn request(ttl: u32) -> ReconcileRequest {
    ReconcileRequest::new(ZONE, NAME).with_ttl(ttl)
}

pub fn ip(s: &str) -> Ipv4Addr {
    s.parse().expect("valid IPv4 literal")
}
