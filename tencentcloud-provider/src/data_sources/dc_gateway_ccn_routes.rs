//! `tencentcloud_dc_gateway_ccn_routes`

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::output::publish;
use crate::context::ProviderContext;
use crate::error::ProviderResult;
use crate::logging::ElapsedGuard;
use crate::resource_data::ResourceData;
use crate::schema::{AttrType, Attribute, Schema};
use crate::services::VpcService;
use crate::traits::DataSource;

pub const TYPE_NAME: &str = "tencentcloud_dc_gateway_ccn_routes";

#[derive(Debug, Deserialize)]
struct Query {
    dcg_id: String,
}

#[derive(Debug, Serialize)]
struct RouteItem {
    dcg_id: String,
    route_id: Option<String>,
    cidr_block: String,
    as_path: Vec<String>,
}

pub struct DcGatewayCcnRoutes;

#[async_trait]
impl DataSource for DcGatewayCcnRoutes {
    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }

    fn schema(&self) -> Schema {
        let route = Schema::new()
            .attr("dcg_id", Attribute::string().computed())
            .attr("route_id", Attribute::string().computed())
            .attr("cidr_block", Attribute::string().computed())
            .attr("as_path", Attribute::list(AttrType::String).computed());
        Schema::new()
            .attr("dcg_id", Attribute::string().required().description("Id of a CCN-type direct connect gateway."))
            .attr("instance_list", Attribute::list_of_blocks(route).computed())
            .with_result_output_file()
    }

    async fn read(&self, ctx: &ProviderContext, d: &mut ResourceData) -> ProviderResult<()> {
        let _elapsed = ElapsedGuard::new(TYPE_NAME, "read");
        let query: Query = d.decode()?;
        let list: Vec<RouteItem> = VpcService::new(ctx)
            .describe_ccn_routes(&query.dcg_id)
            .await?
            .into_iter()
            .map(|r| RouteItem {
                dcg_id: query.dcg_id.clone(),
                route_id: r.route_id,
                cidr_block: r.destination_cidr_block,
                as_path: r.as_path,
            })
            .collect();
        publish(d, "instance_list", &list)
    }
}
