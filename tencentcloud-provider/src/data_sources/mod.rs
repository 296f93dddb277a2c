//! Data source adapters

mod output;

pub mod api_gateway_throttling_apis;
pub mod audit_cos_regions;
pub mod clb_instances;
pub mod dc_gateway_ccn_routes;
pub mod mps_content_review_templates;

use std::sync::Arc;

use crate::traits::DataSource;

pub use api_gateway_throttling_apis::ApiGatewayThrottlingApis;
pub use audit_cos_regions::AuditCosRegions;
pub use clb_instances::ClbInstances;
pub use dc_gateway_ccn_routes::DcGatewayCcnRoutes;
pub use mps_content_review_templates::MpsContentReviewTemplates;

/// Every data source this provider serves.
pub fn all() -> Vec<Arc<dyn DataSource>> {
    vec![
        Arc::new(ApiGatewayThrottlingApis),
        Arc::new(AuditCosRegions),
        Arc::new(ClbInstances),
        Arc::new(DcGatewayCcnRoutes),
        Arc::new(MpsContentReviewTemplates),
    ]
}
