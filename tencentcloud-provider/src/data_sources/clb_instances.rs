//! `tencentcloud_clb_instances`

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tencentcloud_sdk::services::clb::LoadBalancer;

use super::output::publish;
use crate::context::ProviderContext;
use crate::error::ProviderResult;
use crate::logging::ElapsedGuard;
use crate::resource_data::ResourceData;
use crate::schema::{AttrType, Attribute, Schema};
use crate::services::{ClbService, LoadBalancerQuery};
use crate::traits::DataSource;

pub const TYPE_NAME: &str = "tencentcloud_clb_instances";

#[derive(Debug, Deserialize)]
struct Query {
    clb_id: Option<String>,
    clb_name: Option<String>,
    network_type: Option<String>,
    project_id: Option<i64>,
}

impl From<Query> for LoadBalancerQuery {
    fn from(q: Query) -> Self {
        Self {
            id: q.clb_id,
            name: q.clb_name,
            network_type: q.network_type,
            project_id: q.project_id,
        }
    }
}

#[derive(Debug, Serialize)]
struct ClbItem {
    clb_id: Option<String>,
    clb_name: Option<String>,
    network_type: Option<String>,
    project_id: Option<i64>,
    vpc_id: Option<String>,
    subnet_id: Option<String>,
    address_ip_version: Option<String>,
    clb_vips: Vec<String>,
    security_groups: Vec<String>,
    status: Option<i64>,
    create_time: Option<String>,
    tags: BTreeMap<String, String>,
}

impl From<LoadBalancer> for ClbItem {
    fn from(lb: LoadBalancer) -> Self {
        Self {
            clb_id: lb.load_balancer_id,
            clb_name: lb.load_balancer_name,
            network_type: lb.load_balancer_type,
            project_id: lb.project_id,
            vpc_id: lb.vpc_id,
            subnet_id: lb.subnet_id,
            address_ip_version: lb.address_ip_version,
            clb_vips: lb.load_balancer_vips.unwrap_or_default(),
            security_groups: lb.secure_groups.unwrap_or_default(),
            status: lb.status,
            create_time: lb.create_time,
            tags: lb
                .tags
                .unwrap_or_default()
                .into_iter()
                .map(|t| (t.tag_key, t.tag_value))
                .collect(),
        }
    }
}

pub struct ClbInstances;

#[async_trait]
impl DataSource for ClbInstances {
    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }

    fn schema(&self) -> Schema {
        let clb = Schema::new()
            .attr("clb_id", Attribute::string().computed())
            .attr("clb_name", Attribute::string().computed())
            .attr("network_type", Attribute::string().computed())
            .attr("project_id", Attribute::int().computed())
            .attr("vpc_id", Attribute::string().computed())
            .attr("subnet_id", Attribute::string().computed())
            .attr("address_ip_version", Attribute::string().computed())
            .attr("clb_vips", Attribute::list(AttrType::String).computed())
            .attr("security_groups", Attribute::list(AttrType::String).computed())
            .attr("status", Attribute::int().computed())
            .attr("create_time", Attribute::string().computed())
            .attr("tags", Attribute::map(AttrType::String).computed());
        Schema::new()
            .attr("clb_id", Attribute::string().optional())
            .attr("clb_name", Attribute::string().optional().description("Matched fuzzily."))
            .attr("network_type", Attribute::string().optional().description("OPEN or INTERNAL."))
            .attr("project_id", Attribute::int().optional())
            .attr("clb_list", Attribute::list_of_blocks(clb).computed())
            .with_result_output_file()
    }

    async fn read(&self, ctx: &ProviderContext, d: &mut ResourceData) -> ProviderResult<()> {
        let _elapsed = ElapsedGuard::new(TYPE_NAME, "read");
        let query: Query = d.decode()?;
        let list: Vec<ClbItem> = ClbService::new(ctx)
            .describe_load_balancers(&query.into())
            .await?
            .into_iter()
            .map(ClbItem::from)
            .collect();
        publish(d, "clb_list", &list)
    }
}
