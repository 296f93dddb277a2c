//! Tencent Cloud provider adapters
//!
//! Declarative resources and data sources on top of [`tencentcloud_sdk`]:
//! - Managed resources for API Gateway, CLB, VPC (direct connect gateways, DNAT),
//!   Private DNS, SMS and MPS
//! - Read-only data sources for throttling strategies, load balancers, CCN routes,
//!   audit regions and review templates
//!
//! Every adapter reconciles through the same pieces: a retry loop that classifies
//! API errors, a paginated describe loop, composite ids, and a schema-driven
//! [`ResourceData`] model.
//!
//! ```rust,no_run
//! use serde_json::json;
//! use tencentcloud_provider::{Provider, ProviderConfig};
//!
//! # async fn run() -> tencentcloud_provider::ProviderResult<()> {
//! let provider = Provider::from_config(&ProviderConfig::from_env()?)?;
//! let record = provider
//!     .create(
//!         "tencentcloud_private_dns_record",
//!         json!({
//!             "zone_id": "zone-12c5a6e8",
//!             "record_type": "A",
//!             "sub_domain": "www",
//!             "record_value": "192.168.1.2",
//!         }),
//!     )
//!     .await?;
//! println!("created {}", record.id());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod context;
pub mod data_sources;
pub mod error;
pub mod id;
pub mod logging;
pub mod pagination;
pub mod provider;
pub mod resource_data;
pub mod resources;
pub mod retry;
pub mod schema;
pub mod services;
pub mod traits;

// Re-export common types
pub use config::ProviderConfig;
pub use context::ProviderContext;
pub use error::{ProviderError, ProviderResult, SdkError};
pub use provider::Provider;
pub use resource_data::ResourceData;
pub use schema::{AttrType, Attribute, Schema};
pub use traits::{DataSource, Resource};
