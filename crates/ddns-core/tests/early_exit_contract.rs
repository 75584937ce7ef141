//! Contract Test: Early Exit
//!
//! Constraints verified:
//! - Invalid requests fail before any provider call
//! - Auth failure stops the run before the IP lookup
//! - IP lookup failure stops the run before any DNS operation
//!
//! If this test fails, a broken credential or network could still touch DNS.

mod common;

use common::*;
use ddns_core::{Error, ReconcileRequest, Reconciler};

#[tokio::test]
async fn auth_failure_skips_ip_lookup_and_dns() {
    let provider = FakeDnsProvider::new().rejecting_token();
    let source = FixedIpSource::new(ip("203.0.113.7"));

    let reconciler = Reconciler::new(Box::new(provider.clone()), Box::new(source.clone()));
    let err = reconciler.reconcile(&request(120)).await.unwrap_err();

    assert!(matches!(err, Error::AuthVerificationFailed(_)), "got {err:?}");
    assert_eq!(source.call_count(), 0, "IP lookup must not run after auth failure");
    assert_eq!(provider.calls(), vec![ProviderCall::Verify]);
}

#[tokio::test]
async fn ip_lookup_failure_skips_dns() {
    let provider = FakeDnsProvider::new();
    let source = FixedIpSource::failing();

    let reconciler = Reconciler::new(Box::new(provider.clone()), Box::new(source.clone()));
    let err = reconciler.reconcile(&request(120)).await.unwrap_err();

    assert!(matches!(err, Error::IpLookupFailed(_)), "got {err:?}");
    assert_eq!(source.call_count(), 1);
    assert_eq!(provider.calls(), vec![ProviderCall::Verify]);
}

#[tokio::test]
async fn invalid_request_makes_no_calls() {
    let provider = FakeDnsProvider::new();
    let source = FixedIpSource::new(ip("203.0.113.7"));

    let reconciler = Reconciler::new(Box::new(provider.clone()), Box::new(source.clone()));
    let err = reconciler
        .reconcile(&ReconcileRequest::new(ZONE, "bad name.example.org"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Config(_)), "got {err:?}");
    assert!(provider.calls().is_empty());
    assert_eq!(source.call_count(), 0);
}
