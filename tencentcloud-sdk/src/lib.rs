//! # tencentcloud-sdk
//!
//! A signed Tencent Cloud API 3.0 client with typed request/response models for the
//! services the provider adapters manage.
//!
//! ## Supported Services
//!
//! | Service | Accessor | API version |
//! |---------|----------|-------------|
//! | API Gateway | [`TencentCloudClient::apigateway`] | 2018-08-08 |
//! | Cloud Load Balancer | [`TencentCloudClient::clb`] | 2018-03-17 |
//! | VPC (DC gateways, NAT) | [`TencentCloudClient::vpc`] | 2017-03-12 |
//! | Private DNS | [`TencentCloudClient::privatedns`] | 2020-10-28 |
//! | SMS | [`TencentCloudClient::sms`] | 2021-01-11 |
//! | MPS | [`TencentCloudClient::mps`] | 2019-06-12 |
//! | Cloud Audit | [`TencentCloudClient::audit`] | 2019-03-19 |
//!
//! ## Feature Flags
//!
//! - **`native-tls`** *(default)*: use the platform's native TLS implementation.
//! - **`rustls`**: use rustls. Recommended for cross-compilation.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use tencentcloud_sdk::{Credential, TencentCloudClient};
//! use tencentcloud_sdk::services::clb::DescribeLoadBalancersRequest;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = TencentCloudClient::builder(Credential::new("AKID...", "secret"))
//!         .region("ap-guangzhou")
//!         .build()?;
//!
//!     let resp = client
//!         .clb()
//!         .describe_load_balancers(&DescribeLoadBalancersRequest {
//!             limit: 20,
//!             ..Default::default()
//!         })
//!         .await?;
//!     println!("{} load balancers", resp.total_count.unwrap_or(0));
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Every call returns [`Result<T, SdkError>`](SdkError). API-level failures carry the
//! service error code, e.g. `ResourceNotFound.ApiNotExist`, via
//! [`SdkError::api_code`]. Transport failures (`NetworkError`, `Timeout`,
//! `RateLimited`) are not retried here; retry policy belongs to the caller.

mod client;
mod common;
mod credential;
mod error;
mod http_client;
mod ratelimit;
pub mod services;
mod sign;
mod transport;
mod types;
mod utils;

pub use client::{DEFAULT_DOMAIN, DEFAULT_REGION, Endpoint, Protocol, TencentCloudClient, TencentCloudClientBuilder};
pub use credential::Credential;
pub use error::{Result, SdkError};
pub use ratelimit::{DEFAULT_RATE_LIMIT, RateLimiter};
pub use transport::{HttpRequest, ReqwestTransport, Transport};
pub use types::{ActionResponse, Filter, ResultResponse, TagInfo};
pub use utils::log_sanitizer;
