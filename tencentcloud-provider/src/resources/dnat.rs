//! `tencentcloud_dnat`
//!
//! Port forwarding rule of a NAT gateway. The id is the URL-like [`DnatId`]
//! encoding of its key fields.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tencentcloud_sdk::services::vpc::{DnatRule, NatGatewayDnatRule};

use crate::context::ProviderContext;
use crate::error::{ProviderError, ProviderResult};
use crate::id::DnatId;
use crate::logging::ElapsedGuard;
use crate::resource_data::ResourceData;
use crate::schema::{Attribute, Schema};
use crate::services::VpcService;
use crate::traits::Resource;

pub const TYPE_NAME: &str = "tencentcloud_dnat";

#[derive(Debug, Deserialize)]
struct DnatConfig {
    vpc_id: String,
    nat_id: String,
    protocol: String,
    elastic_ip: String,
    elastic_port: u16,
    private_ip: String,
    private_port: u16,
    description: Option<String>,
}

impl DnatConfig {
    fn key(&self) -> ProviderResult<DnatId> {
        if !matches!(self.protocol.as_str(), "TCP" | "UDP") {
            return Err(ProviderError::InvalidConfig(format!(
                "protocol must be TCP or UDP, got '{}'",
                self.protocol
            )));
        }
        DnatId::new(
            self.protocol.as_str(),
            self.vpc_id.as_str(),
            self.nat_id.as_str(),
            self.elastic_ip.as_str(),
            self.elastic_port,
        )
    }

    fn rule(&self) -> DnatRule {
        DnatRule {
            ip_protocol: self.protocol.clone(),
            public_ip_address: self.elastic_ip.clone(),
            public_port: self.elastic_port,
            private_ip_address: self.private_ip.clone(),
            private_port: self.private_port,
            description: self.description.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
struct DnatState {
    vpc_id: String,
    nat_id: String,
    protocol: String,
    elastic_ip: String,
    elastic_port: u16,
    private_ip: String,
    private_port: u16,
    description: Option<String>,
}

impl DnatState {
    fn new(key: DnatId, found: NatGatewayDnatRule) -> Self {
        Self {
            vpc_id: found.vpc_id.unwrap_or(key.vpc_id),
            nat_id: key.nat_id,
            protocol: found.rule.ip_protocol.to_ascii_uppercase(),
            elastic_ip: found.rule.public_ip_address,
            elastic_port: found.rule.public_port,
            private_ip: found.rule.private_ip_address,
            private_port: found.rule.private_port,
            description: found.rule.description,
        }
    }
}

pub struct Dnat;

#[async_trait]
impl Resource for Dnat {
    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }

    fn schema(&self) -> Schema {
        Schema::new()
            .attr("vpc_id", Attribute::string().required().force_new())
            .attr("nat_id", Attribute::string().required().force_new())
            .attr("protocol", Attribute::string().required().force_new().description("TCP or UDP."))
            .attr("elastic_ip", Attribute::string().required().force_new().description("Public IP bound to the NAT gateway."))
            .attr("elastic_port", Attribute::int().required().force_new())
            .attr("private_ip", Attribute::string().required().description("Backend IP inside the VPC."))
            .attr("private_port", Attribute::int().required())
            .attr("description", Attribute::string().optional())
    }

    async fn create(&self, ctx: &ProviderContext, d: &mut ResourceData) -> ProviderResult<()> {
        let _elapsed = ElapsedGuard::new(TYPE_NAME, "create");
        let config: DnatConfig = d.decode()?;
        let key = config.key()?;

        VpcService::new(ctx).create_dnat_rule(&config.nat_id, &config.rule()).await?;
        log::info!("[{TYPE_NAME}] Created rule {key}");
        d.set_id(key.to_string());
        self.read(ctx, d).await
    }

    async fn read(&self, ctx: &ProviderContext, d: &mut ResourceData) -> ProviderResult<()> {
        let _elapsed = ElapsedGuard::new(TYPE_NAME, "read");
        let key: DnatId = d.id().parse()?;
        match VpcService::new(ctx).describe_dnat_rule(&key).await? {
            Some(found) => d.set_state(&DnatState::new(key, found)),
            None => {
                log::warn!("[{TYPE_NAME}] Rule {key} not found, removing from state");
                d.clear_id();
                Ok(())
            }
        }
    }

    async fn update(&self, ctx: &ProviderContext, d: &mut ResourceData) -> ProviderResult<()> {
        let _elapsed = ElapsedGuard::new(TYPE_NAME, "update");
        if ["private_ip", "private_port", "description"]
            .iter()
            .any(|k| d.has_change(k))
        {
            let key: DnatId = d.id().parse()?;
            let service = VpcService::new(ctx);
            let Some(current) = service.describe_dnat_rule(&key).await? else {
                return Err(ProviderError::not_found("dnat rule", key.to_string()));
            };
            let config: DnatConfig = d.decode()?;
            service
                .modify_dnat_rule(&key.nat_id, &current.rule, &config.rule())
                .await?;
        }
        self.read(ctx, d).await
    }

    async fn delete(&self, ctx: &ProviderContext, d: &mut ResourceData) -> ProviderResult<()> {
        let _elapsed = ElapsedGuard::new(TYPE_NAME, "delete");
        let key: DnatId = d.id().parse()?;
        let service = VpcService::new(ctx);
        match service.describe_dnat_rule(&key).await? {
            Some(found) => service.delete_dnat_rule(&key.nat_id, &found.rule).await,
            None => Ok(()),
        }
    }
}
