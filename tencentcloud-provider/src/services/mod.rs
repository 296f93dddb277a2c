//! Service layer
//!
//! One struct per cloud service, borrowing the [`ProviderContext`](crate::ProviderContext).
//! Every call runs inside the retry loop; describes use the read budget, mutations
//! the write budget, and "not found" comes back as `None` or success.

mod api_gateway_service;
mod audit_service;
mod clb_service;
mod mps_service;
mod private_dns_service;
mod sms_service;
mod vpc_service;

pub use api_gateway_service::{
    ApiGatewayService, API_NOT_FOUND, ENVIRONMENTS, ENV_PREPUB, ENV_RELEASE, ENV_TEST, QUOTA_MAX,
    QUOTA_UNLIMITED, SERVICE_NOT_FOUND,
};
pub use audit_service::AuditService;
pub use clb_service::{ClbService, LoadBalancerQuery, TASK_WAIT_TIMEOUT};
pub use mps_service::MpsService;
pub use private_dns_service::PrivateDnsService;
pub use sms_service::SmsService;
pub use vpc_service::VpcService;
