//! Adapters against the real API
//!
//! Read-only; nothing is created. Run with:
//! ```bash
//! TENCENTCLOUD_SECRET_ID=xxx TENCENTCLOUD_SECRET_KEY=xxx \
//!     cargo test -p tencentcloud-provider --test acceptance_test -- --ignored --nocapture
//! ```

mod common;

use serde_json::json;
use tencentcloud_provider::{Provider, ProviderConfig};

fn live_provider() -> Provider {
    let config = ProviderConfig::from_env().expect("provider config from environment");
    Provider::from_config(&config).expect("provider from config")
}

#[tokio::test]
#[ignore]
async fn test_audit_cos_regions() {
    skip_if_no_credentials!("TENCENTCLOUD_SECRET_ID", "TENCENTCLOUD_SECRET_KEY");

    let d = live_provider()
        .read_data_source("tencentcloud_audit_cos_regions", json!({"website_type": "zh"}))
        .await
        .expect("audit regions query");

    let regions = d.state()["audit_cos_region_list"].as_array().cloned().unwrap_or_default();
    assert!(!regions.is_empty(), "audit should offer at least one COS region");
    println!("✓ {} audit COS regions", regions.len());
}

#[tokio::test]
#[ignore]
async fn test_clb_instances() {
    skip_if_no_credentials!("TENCENTCLOUD_SECRET_ID", "TENCENTCLOUD_SECRET_KEY");

    let d = live_provider()
        .read_data_source("tencentcloud_clb_instances", json!({}))
        .await
        .expect("clb instances query");

    let listed = d.state()["clb_list"].as_array().map_or(0, Vec::len);
    assert_eq!(d.id().len(), 64);
    println!("✓ {listed} load balancers");
}

#[tokio::test]
#[ignore]
async fn test_import_of_unknown_load_balancer_fails() {
    skip_if_no_credentials!("TENCENTCLOUD_SECRET_ID", "TENCENTCLOUD_SECRET_KEY");

    let err = live_provider()
        .import("tencentcloud_clb_instance", "lb-00000000")
        .await
        .expect_err("lb-00000000 should not exist");
    assert!(err.is_expected(), "unexpected failure: {err}");
}
