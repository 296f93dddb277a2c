//! `tencentcloud_clb_instance`

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tencentcloud_sdk::services::clb::{CreateLoadBalancerRequest, LoadBalancer};
use tencentcloud_sdk::TagInfo;

use crate::context::ProviderContext;
use crate::error::{ProviderError, ProviderResult};
use crate::logging::ElapsedGuard;
use crate::resource_data::ResourceData;
use crate::schema::{AttrType, Attribute, Schema};
use crate::services::{ClbService, LoadBalancerQuery};
use crate::traits::Resource;

pub const TYPE_NAME: &str = "tencentcloud_clb_instance";

const NETWORK_TYPES: [&str; 2] = ["OPEN", "INTERNAL"];

#[derive(Debug, Deserialize)]
struct ClbConfig {
    network_type: String,
    clb_name: Option<String>,
    project_id: Option<i64>,
    vpc_id: Option<String>,
    subnet_id: Option<String>,
    address_ip_version: Option<String>,
    #[serde(default)]
    tags: BTreeMap<String, String>,
    #[serde(default)]
    security_groups: Vec<String>,
}

impl ClbConfig {
    fn validate(&self) -> ProviderResult<()> {
        if !NETWORK_TYPES.contains(&self.network_type.as_str()) {
            return Err(ProviderError::InvalidConfig(format!(
                "network_type must be one of {NETWORK_TYPES:?}, got '{}'",
                self.network_type
            )));
        }
        if self.network_type == "INTERNAL" && self.subnet_id.is_none() {
            return Err(ProviderError::InvalidConfig(
                "subnet_id is required for an INTERNAL load balancer".to_string(),
            ));
        }
        Ok(())
    }

    fn to_request(&self) -> CreateLoadBalancerRequest {
        CreateLoadBalancerRequest {
            load_balancer_type: self.network_type.clone(),
            load_balancer_name: self.clb_name.clone(),
            project_id: self.project_id,
            vpc_id: self.vpc_id.clone(),
            subnet_id: self.subnet_id.clone(),
            address_ip_version: self.address_ip_version.clone(),
            tags: self
                .tags
                .iter()
                .map(|(k, v)| TagInfo {
                    tag_key: k.clone(),
                    tag_value: v.clone(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ClbState {
    network_type: Option<String>,
    clb_name: Option<String>,
    project_id: Option<i64>,
    vpc_id: Option<String>,
    subnet_id: Option<String>,
    address_ip_version: Option<String>,
    tags: Option<BTreeMap<String, String>>,
    security_groups: Option<Vec<String>>,
    clb_vips: Option<Vec<String>>,
    status: Option<i64>,
    create_time: Option<String>,
}

impl From<LoadBalancer> for ClbState {
    fn from(lb: LoadBalancer) -> Self {
        Self {
            network_type: lb.load_balancer_type,
            clb_name: lb.load_balancer_name,
            project_id: lb.project_id,
            vpc_id: lb.vpc_id,
            subnet_id: lb.subnet_id.filter(|s| !s.is_empty()),
            address_ip_version: lb.address_ip_version,
            tags: lb
                .tags
                .map(|tags| tags.into_iter().map(|t| (t.tag_key, t.tag_value)).collect()),
            security_groups: lb.secure_groups,
            clb_vips: lb.load_balancer_vips,
            status: lb.status,
            create_time: lb.create_time,
        }
    }
}

pub struct ClbInstance;

#[async_trait]
impl Resource for ClbInstance {
    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }

    fn schema(&self) -> Schema {
        Schema::new()
            .attr("network_type", Attribute::string().required().force_new().description("OPEN or INTERNAL."))
            .attr("clb_name", Attribute::string().optional().description("Name of the CLB; must be unique."))
            .attr("project_id", Attribute::int().optional().force_new().default(0))
            .attr("vpc_id", Attribute::string().optional().force_new())
            .attr("subnet_id", Attribute::string().optional().force_new().description("Required for INTERNAL load balancers."))
            .attr("address_ip_version", Attribute::string().optional().computed().force_new().description("IPV4, IPV6 or IPv6FullChain."))
            .attr("tags", Attribute::map(AttrType::String).optional().force_new())
            .attr("security_groups", Attribute::list(AttrType::String).optional())
            .attr("clb_vips", Attribute::list(AttrType::String).computed())
            .attr("status", Attribute::int().computed().description("0 creating, 1 running."))
            .attr("create_time", Attribute::string().computed())
    }

    async fn create(&self, ctx: &ProviderContext, d: &mut ResourceData) -> ProviderResult<()> {
        let _elapsed = ElapsedGuard::new(TYPE_NAME, "create");
        let config: ClbConfig = d.decode()?;
        config.validate()?;
        let service = ClbService::new(ctx);

        if let Some(name) = &config.clb_name {
            let query = LoadBalancerQuery {
                name: Some(name.clone()),
                ..Default::default()
            };
            let same_name = service
                .describe_load_balancers(&query)
                .await?
                .into_iter()
                .any(|lb| lb.load_balancer_name.as_deref() == Some(name.as_str()));
            if same_name {
                return Err(ProviderError::InvalidConfig(format!(
                    "a CLB named '{name}' already exists"
                )));
            }
        }

        let clb_id = service.create_load_balancer(&config.to_request()).await?;
        log::info!("[{TYPE_NAME}] Created CLB {clb_id}");
        d.set_id(clb_id.as_str());

        if !config.security_groups.is_empty() {
            service.set_security_groups(&clb_id, &config.security_groups).await?;
        }
        self.read(ctx, d).await
    }

    async fn read(&self, ctx: &ProviderContext, d: &mut ResourceData) -> ProviderResult<()> {
        let _elapsed = ElapsedGuard::new(TYPE_NAME, "read");
        let clb_id = d.id().to_string();
        match ClbService::new(ctx).describe_load_balancer(&clb_id).await? {
            Some(lb) => d.set_state(&ClbState::from(lb)),
            None => {
                log::warn!("[{TYPE_NAME}] CLB {clb_id} not found, removing from state");
                d.clear_id();
                Ok(())
            }
        }
    }

    async fn update(&self, ctx: &ProviderContext, d: &mut ResourceData) -> ProviderResult<()> {
        let _elapsed = ElapsedGuard::new(TYPE_NAME, "update");
        let config: ClbConfig = d.decode()?;
        let clb_id = d.id().to_string();
        let service = ClbService::new(ctx);

        if d.has_change("clb_name") {
            if let Some(name) = &config.clb_name {
                service.modify_load_balancer_name(&clb_id, name).await?;
            }
        }
        if d.has_change("security_groups") {
            service.set_security_groups(&clb_id, &config.security_groups).await?;
        }
        self.read(ctx, d).await
    }

    async fn delete(&self, ctx: &ProviderContext, d: &mut ResourceData) -> ProviderResult<()> {
        let _elapsed = ElapsedGuard::new(TYPE_NAME, "delete");
        ClbService::new(ctx).delete_load_balancer(d.id()).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn config(value: serde_json::Value) -> ClbConfig {
        ResourceData::planned(TYPE_NAME, ClbInstance.schema(), value)
            .unwrap()
            .decode()
            .unwrap()
    }

    #[test]
    fn internal_requires_subnet() {
        let c = config(json!({"network_type": "INTERNAL", "vpc_id": "vpc-1"}));
        assert!(c.validate().is_err());
        let c = config(json!({"network_type": "INTERNAL", "vpc_id": "vpc-1", "subnet_id": "subnet-1"}));
        assert!(c.validate().is_ok());
        assert!(config(json!({"network_type": "PUBLIC"})).validate().is_err());
    }

    #[test]
    fn tags_become_sorted_tag_infos() {
        let c = config(json!({
            "network_type": "OPEN",
            "clb_name": "web",
            "tags": {"team": "infra", "env": "prod"}
        }));
        let request = c.to_request();
        assert_eq!(request.project_id, Some(0));
        let keys: Vec<_> = request.tags.iter().map(|t| t.tag_key.as_str()).collect();
        assert_eq!(keys, ["env", "team"]);
    }
}
