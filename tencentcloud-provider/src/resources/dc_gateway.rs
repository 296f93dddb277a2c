//! `tencentcloud_dc_gateway`

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tencentcloud_sdk::services::vpc::{CreateDirectConnectGatewayRequest, DirectConnectGateway};

use crate::context::ProviderContext;
use crate::error::{ProviderError, ProviderResult};
use crate::logging::ElapsedGuard;
use crate::resource_data::ResourceData;
use crate::schema::{Attribute, Schema};
use crate::services::VpcService;
use crate::traits::Resource;

pub const TYPE_NAME: &str = "tencentcloud_dc_gateway";

#[derive(Debug, Deserialize)]
struct GatewayConfig {
    name: String,
    network_type: String,
    network_instance_id: String,
    gateway_type: String,
}

impl GatewayConfig {
    fn validate(&self) -> ProviderResult<()> {
        if !matches!(self.network_type.as_str(), "VPC" | "CCN") {
            return Err(ProviderError::InvalidConfig(format!(
                "network_type must be VPC or CCN, got '{}'",
                self.network_type
            )));
        }
        if !matches!(self.gateway_type.as_str(), "NORMAL" | "NAT") {
            return Err(ProviderError::InvalidConfig(format!(
                "gateway_type must be NORMAL or NAT, got '{}'",
                self.gateway_type
            )));
        }
        if self.network_type == "CCN" && self.gateway_type == "NAT" {
            return Err(ProviderError::InvalidConfig(
                "a CCN gateway cannot be of type NAT".to_string(),
            ));
        }
        Ok(())
    }
}

/// `cnn_route_type` keeps the spelling existing configurations use.
#[derive(Debug, Serialize)]
struct GatewayState {
    name: Option<String>,
    network_type: Option<String>,
    network_instance_id: Option<String>,
    gateway_type: Option<String>,
    cnn_route_type: Option<String>,
    enable_bgp: Option<bool>,
    create_time: Option<String>,
}

impl From<DirectConnectGateway> for GatewayState {
    fn from(g: DirectConnectGateway) -> Self {
        Self {
            name: g.direct_connect_gateway_name,
            network_type: g.network_type,
            network_instance_id: g.network_instance_id,
            gateway_type: g.gateway_type,
            cnn_route_type: g.ccn_route_type,
            enable_bgp: g.enable_bgp,
            create_time: g.create_time,
        }
    }
}

pub struct DcGateway;

#[async_trait]
impl Resource for DcGateway {
    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }

    fn schema(&self) -> Schema {
        Schema::new()
            .attr("name", Attribute::string().required())
            .attr("network_type", Attribute::string().required().force_new().description("VPC or CCN."))
            .attr("network_instance_id", Attribute::string().required().force_new().description("VPC id or CCN id, per `network_type`."))
            .attr("gateway_type", Attribute::string().default("NORMAL").force_new().description("NORMAL or NAT; CCN only supports NORMAL."))
            .attr("cnn_route_type", Attribute::string().computed().description("STATIC or BGP."))
            .attr("enable_bgp", Attribute::bool().computed())
            .attr("create_time", Attribute::string().computed())
    }

    async fn create(&self, ctx: &ProviderContext, d: &mut ResourceData) -> ProviderResult<()> {
        let _elapsed = ElapsedGuard::new(TYPE_NAME, "create");
        let config: GatewayConfig = d.decode()?;
        config.validate()?;

        let request = CreateDirectConnectGatewayRequest {
            direct_connect_gateway_name: config.name,
            network_type: config.network_type,
            network_instance_id: config.network_instance_id,
            gateway_type: Some(config.gateway_type),
        };
        let id = VpcService::new(ctx).create_dc_gateway(&request).await?;
        log::info!("[{TYPE_NAME}] Created gateway {id}");
        d.set_id(id);
        self.read(ctx, d).await
    }

    async fn read(&self, ctx: &ProviderContext, d: &mut ResourceData) -> ProviderResult<()> {
        let _elapsed = ElapsedGuard::new(TYPE_NAME, "read");
        let id = d.id().to_string();
        match VpcService::new(ctx).describe_dc_gateway(&id).await? {
            Some(gateway) => d.set_state(&GatewayState::from(gateway)),
            None => {
                log::warn!("[{TYPE_NAME}] Gateway {id} not found, removing from state");
                d.clear_id();
                Ok(())
            }
        }
    }

    async fn update(&self, ctx: &ProviderContext, d: &mut ResourceData) -> ProviderResult<()> {
        let _elapsed = ElapsedGuard::new(TYPE_NAME, "update");
        if d.has_change("name") {
            let name = d.get_str("name").unwrap_or_default().to_string();
            VpcService::new(ctx).rename_dc_gateway(d.id(), &name).await?;
        }
        self.read(ctx, d).await
    }

    async fn delete(&self, ctx: &ProviderContext, d: &mut ResourceData) -> ProviderResult<()> {
        let _elapsed = ElapsedGuard::new(TYPE_NAME, "delete");
        VpcService::new(ctx).delete_dc_gateway(d.id()).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn config(value: serde_json::Value) -> GatewayConfig {
        ResourceData::planned(TYPE_NAME, DcGateway.schema(), value)
            .unwrap()
            .decode()
            .unwrap()
    }

    #[test]
    fn ccn_gateway_must_be_normal() {
        let c = config(json!({"name": "g", "network_type": "CCN", "network_instance_id": "ccn-1"}));
        assert_eq!(c.gateway_type, "NORMAL");
        assert!(c.validate().is_ok());
        let c = config(json!({
            "name": "g", "network_type": "CCN", "network_instance_id": "ccn-1", "gateway_type": "NAT"
        }));
        assert!(c.validate().is_err());
    }
}
