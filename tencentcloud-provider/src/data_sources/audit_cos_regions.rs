//! `tencentcloud_audit_cos_regions`

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::output::publish;
use crate::context::ProviderContext;
use crate::error::ProviderResult;
use crate::logging::ElapsedGuard;
use crate::resource_data::ResourceData;
use crate::schema::{Attribute, Schema};
use crate::services::AuditService;
use crate::traits::DataSource;

pub const TYPE_NAME: &str = "tencentcloud_audit_cos_regions";

#[derive(Debug, Deserialize)]
struct Query {
    website_type: Option<String>,
}

#[derive(Debug, Serialize)]
struct RegionItem {
    cos_region: Option<String>,
    cos_region_name: Option<String>,
}

pub struct AuditCosRegions;

#[async_trait]
impl DataSource for AuditCosRegions {
    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }

    fn schema(&self) -> Schema {
        let region = Schema::new()
            .attr("cos_region", Attribute::string().computed().description("Region code, e.g. `ap-guangzhou`."))
            .attr("cos_region_name", Attribute::string().computed());
        Schema::new()
            .attr("website_type", Attribute::string().optional().description("zh for the China site, en for the international site."))
            .attr("audit_cos_region_list", Attribute::list_of_blocks(region).computed())
            .with_result_output_file()
    }

    async fn read(&self, ctx: &ProviderContext, d: &mut ResourceData) -> ProviderResult<()> {
        let _elapsed = ElapsedGuard::new(TYPE_NAME, "read");
        let query: Query = d.decode()?;
        let list: Vec<RegionItem> = AuditService::new(ctx)
            .cos_enable_regions(query.website_type.as_deref())
            .await?
            .into_iter()
            .map(|r| RegionItem {
                cos_region: r.cos_region,
                cos_region_name: r.cos_region_name,
            })
            .collect();
        publish(d, "audit_cos_region_list", &list)
    }
}
