//! Managed resource adapters

pub mod api_gateway_api;
pub mod api_gateway_plugin_attachment;
pub mod clb_attachment;
pub mod clb_instance;
pub mod clb_listener;
pub mod dc_gateway;
pub mod dc_gateway_ccn_route;
pub mod dnat;
pub mod mps_content_review_template;
pub mod private_dns_record;
pub mod sms_sign;
pub mod sms_template;

use std::sync::Arc;

use crate::traits::Resource;

pub use api_gateway_api::ApiGatewayApi;
pub use api_gateway_plugin_attachment::ApiGatewayPluginAttachment;
pub use clb_attachment::ClbAttachment;
pub use clb_instance::ClbInstance;
pub use clb_listener::ClbListener;
pub use dc_gateway::DcGateway;
pub use dc_gateway_ccn_route::DcGatewayCcnRoute;
pub use dnat::Dnat;
pub use mps_content_review_template::MpsContentReviewTemplate;
pub use private_dns_record::PrivateDnsRecord;
pub use sms_sign::SmsSign;
pub use sms_template::SmsTemplate;

/// Every managed resource this provider serves.
pub fn all() -> Vec<Arc<dyn Resource>> {
    vec![
        Arc::new(ApiGatewayApi),
        Arc::new(ApiGatewayPluginAttachment),
        Arc::new(ClbAttachment),
        Arc::new(ClbInstance),
        Arc::new(ClbListener),
        Arc::new(DcGateway),
        Arc::new(DcGatewayCcnRoute),
        Arc::new(Dnat),
        Arc::new(MpsContentReviewTemplate),
        Arc::new(PrivateDnsRecord),
        Arc::new(SmsSign),
        Arc::new(SmsTemplate),
    ]
}
