//! `tencentcloud_dc_gateway_ccn_route`
//!
//! Id: `dcgId#routeId`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::context::ProviderContext;
use crate::error::ProviderResult;
use crate::id;
use crate::logging::ElapsedGuard;
use crate::resource_data::ResourceData;
use crate::schema::{AttrType, Attribute, Schema};
use crate::services::VpcService;
use crate::traits::Resource;

pub const TYPE_NAME: &str = "tencentcloud_dc_gateway_ccn_route";

#[derive(Debug, Deserialize)]
struct RouteConfig {
    dcg_id: String,
    cidr_block: String,
}

#[derive(Debug, Serialize)]
struct RouteState {
    dcg_id: String,
    cidr_block: String,
    as_path: Vec<String>,
}

pub struct DcGatewayCcnRoute;

#[async_trait]
impl Resource for DcGatewayCcnRoute {
    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }

    fn schema(&self) -> Schema {
        Schema::new()
            .attr("dcg_id", Attribute::string().required().force_new().description("Id of a CCN-type direct connect gateway."))
            .attr("cidr_block", Attribute::string().required().force_new().description("Destination CIDR, e.g. `10.1.0.0/24`."))
            .attr("as_path", Attribute::list(AttrType::String).computed())
    }

    async fn create(&self, ctx: &ProviderContext, d: &mut ResourceData) -> ProviderResult<()> {
        let _elapsed = ElapsedGuard::new(TYPE_NAME, "create");
        let config: RouteConfig = d.decode()?;
        let route_id = VpcService::new(ctx)
            .create_ccn_route(&config.dcg_id, &config.cidr_block)
            .await?;
        log::info!("[{TYPE_NAME}] Published {} through {} as {route_id}", config.cidr_block, config.dcg_id);
        d.set_id(id::join(&[&config.dcg_id, &route_id]));
        self.read(ctx, d).await
    }

    async fn read(&self, ctx: &ProviderContext, d: &mut ResourceData) -> ProviderResult<()> {
        let _elapsed = ElapsedGuard::new(TYPE_NAME, "read");
        let [dcg_id, route_id] = id::split::<2>(d.id(), &[])?;
        match VpcService::new(ctx).describe_ccn_route(&dcg_id, &route_id).await? {
            Some(route) => d.set_state(&RouteState {
                dcg_id,
                cidr_block: route.destination_cidr_block,
                as_path: route.as_path,
            }),
            None => {
                log::warn!("[{TYPE_NAME}] Route {route_id} not found, removing from state");
                d.clear_id();
                Ok(())
            }
        }
    }

    async fn delete(&self, ctx: &ProviderContext, d: &mut ResourceData) -> ProviderResult<()> {
        let _elapsed = ElapsedGuard::new(TYPE_NAME, "delete");
        let [dcg_id, route_id] = id::split::<2>(d.id(), &[])?;
        VpcService::new(ctx).delete_ccn_route(&dcg_id, &route_id).await
    }
}
