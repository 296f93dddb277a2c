//! Cloud Audit service

use tencentcloud_sdk::services::audit::{CosRegionInfo, ListCosEnableRegionRequest};

use crate::context::ProviderContext;
use crate::error::ProviderResult;
use crate::retry::retry_call;

pub struct AuditService<'a> {
    ctx: &'a ProviderContext,
}

impl<'a> AuditService<'a> {
    #[must_use]
    pub fn new(ctx: &'a ProviderContext) -> Self {
        Self { ctx }
    }

    /// COS regions that can receive audit logs.
    pub async fn cos_enable_regions(
        &self,
        website_type: Option<&str>,
    ) -> ProviderResult<Vec<CosRegionInfo>> {
        let api = self.ctx.client().audit();
        let request = ListCosEnableRegionRequest {
            website_type: website_type.map(str::to_string),
        };
        let response = retry_call(self.ctx.read_timeout(), &[], || {
            api.list_cos_enable_region(&request)
        })
        .await?;
        Ok(response.enable_regions.unwrap_or_default())
    }
}
