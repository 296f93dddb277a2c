//! VPC service: direct connect gateways, their CCN routes, and NAT gateway DNAT rules

use tencentcloud_sdk::services::vpc::{
    CreateDirectConnectGatewayCcnRoutesRequest, CreateDirectConnectGatewayRequest,
    CreateDnatRuleRequest, DeleteDirectConnectGatewayCcnRoutesRequest,
    DeleteDirectConnectGatewayRequest, DeleteDnatRuleRequest,
    DescribeDirectConnectGatewayCcnRoutesRequest, DescribeDirectConnectGatewaysRequest,
    DescribeDnatRulesRequest, DirectConnectGateway, DirectConnectGatewayCcnRoute, DnatRule,
    ModifyDirectConnectGatewayAttributeRequest, ModifyDnatRuleRequest, NatGatewayDnatRule, Vpc,
};

use crate::context::ProviderContext;
use crate::error::{ProviderError, ProviderResult};
use crate::id::DnatId;
use crate::pagination::{paginate, Page, DEFAULT_PAGE_LIMIT};
use crate::retry::{retry_call, retry_lookup};

const NOT_FOUND: &[&str] = &["ResourceNotFound", "InvalidParameterValue.NotFound"];

pub struct VpcService<'a> {
    ctx: &'a ProviderContext,
}

impl<'a> VpcService<'a> {
    #[must_use]
    pub fn new(ctx: &'a ProviderContext) -> Self {
        Self { ctx }
    }

    fn api(&self) -> Vpc<'a> {
        self.ctx.client().vpc()
    }

    // ============ Direct connect gateways ============

    pub async fn create_dc_gateway(
        &self,
        request: &CreateDirectConnectGatewayRequest,
    ) -> ProviderResult<String> {
        let api = self.api();
        let response = retry_call(self.ctx.write_timeout(), &[], || {
            api.create_direct_connect_gateway(request)
        })
        .await?;
        response
            .direct_connect_gateway
            .and_then(|g| g.direct_connect_gateway_id)
            .ok_or_else(|| ProviderError::BusinessFailure {
                action: "CreateDirectConnectGateway".to_string(),
                detail: "response carries no DirectConnectGatewayId".to_string(),
            })
    }

    pub async fn describe_dc_gateway(&self, id: &str) -> ProviderResult<Option<DirectConnectGateway>> {
        let api = self.api();
        let request = DescribeDirectConnectGatewaysRequest {
            direct_connect_gateway_ids: Some(vec![id.to_string()]),
            filters: None,
            offset: 0,
            limit: 1,
        };
        let response = retry_lookup(self.ctx.read_timeout(), NOT_FOUND, &[], || {
            api.describe_direct_connect_gateways(&request)
        })
        .await?;
        Ok(response
            .and_then(|r| r.direct_connect_gateway_set)
            .unwrap_or_default()
            .into_iter()
            .find(|g| g.direct_connect_gateway_id.as_deref() == Some(id)))
    }

    pub async fn rename_dc_gateway(&self, id: &str, name: &str) -> ProviderResult<()> {
        let api = self.api();
        let request = ModifyDirectConnectGatewayAttributeRequest {
            direct_connect_gateway_id: id.to_string(),
            direct_connect_gateway_name: name.to_string(),
        };
        retry_call(self.ctx.write_timeout(), &[], || {
            api.modify_direct_connect_gateway_attribute(&request)
        })
        .await?;
        Ok(())
    }

    pub async fn delete_dc_gateway(&self, id: &str) -> ProviderResult<()> {
        let api = self.api();
        let request = DeleteDirectConnectGatewayRequest {
            direct_connect_gateway_id: id.to_string(),
        };
        retry_lookup(self.ctx.write_timeout(), NOT_FOUND, &[], || {
            api.delete_direct_connect_gateway(&request)
        })
        .await?;
        Ok(())
    }

    // ============ CCN routes ============

    /// Publish `cidr_block` through a CCN-type gateway and return the new route id.
    ///
    /// The create action returns nothing, so the route is found again by CIDR.
    pub async fn create_ccn_route(&self, dcg_id: &str, cidr_block: &str) -> ProviderResult<String> {
        let api = self.api();
        let request = CreateDirectConnectGatewayCcnRoutesRequest {
            direct_connect_gateway_id: dcg_id.to_string(),
            routes: vec![DirectConnectGatewayCcnRoute {
                destination_cidr_block: cidr_block.to_string(),
                ..Default::default()
            }],
        };
        retry_call(self.ctx.write_timeout(), &[], || {
            api.create_direct_connect_gateway_ccn_routes(&request)
        })
        .await?;

        self.describe_ccn_routes(dcg_id)
            .await?
            .into_iter()
            .find(|r| r.destination_cidr_block == cidr_block)
            .and_then(|r| r.route_id)
            .ok_or_else(|| ProviderError::not_found("dc gateway ccn route", format!("{dcg_id}/{cidr_block}")))
    }

    /// Every CCN route of a gateway; a missing gateway yields an empty list.
    pub async fn describe_ccn_routes(
        &self,
        dcg_id: &str,
    ) -> ProviderResult<Vec<DirectConnectGatewayCcnRoute>> {
        let api = self.api();
        let timeout = self.ctx.read_timeout();
        paginate(DEFAULT_PAGE_LIMIT, |offset, limit| async move {
            let request = DescribeDirectConnectGatewayCcnRoutesRequest {
                direct_connect_gateway_id: dcg_id.to_string(),
                ccn_route_type: None,
                offset,
                limit,
            };
            let response = retry_lookup(timeout, NOT_FOUND, &[], || {
                api.describe_direct_connect_gateway_ccn_routes(&request)
            })
            .await?
            .unwrap_or_default();
            Ok(Page::new(response.route_set.unwrap_or_default(), response.total_count))
        })
        .await
    }

    pub async fn describe_ccn_route(
        &self,
        dcg_id: &str,
        route_id: &str,
    ) -> ProviderResult<Option<DirectConnectGatewayCcnRoute>> {
        Ok(self
            .describe_ccn_routes(dcg_id)
            .await?
            .into_iter()
            .find(|r| r.route_id.as_deref() == Some(route_id)))
    }

    pub async fn delete_ccn_route(&self, dcg_id: &str, route_id: &str) -> ProviderResult<()> {
        let api = self.api();
        let request = DeleteDirectConnectGatewayCcnRoutesRequest {
            direct_connect_gateway_id: dcg_id.to_string(),
            route_ids: vec![route_id.to_string()],
        };
        retry_lookup(self.ctx.write_timeout(), NOT_FOUND, &[], || {
            api.delete_direct_connect_gateway_ccn_routes(&request)
        })
        .await?;
        Ok(())
    }

    // ============ DNAT rules ============

    pub async fn create_dnat_rule(&self, nat_id: &str, rule: &DnatRule) -> ProviderResult<()> {
        let api = self.api();
        let request = CreateDnatRuleRequest {
            nat_gateway_id: nat_id.to_string(),
            destination_ip_port_translation_nat_rules: vec![rule.clone()],
        };
        retry_call(self.ctx.write_timeout(), &[], || api.create_dnat_rule(&request)).await?;
        Ok(())
    }

    /// The rule addressed by `id`, matched on protocol, public address and port.
    pub async fn describe_dnat_rule(&self, id: &DnatId) -> ProviderResult<Option<NatGatewayDnatRule>> {
        let api = self.api();
        let timeout = self.ctx.read_timeout();
        let rules = paginate(DEFAULT_PAGE_LIMIT, |offset, limit| async move {
            let request = DescribeDnatRulesRequest {
                nat_gateway_ids: Some(vec![id.nat_id.clone()]),
                filters: None,
                offset,
                limit,
            };
            let response = retry_lookup(timeout, NOT_FOUND, &[], || api.describe_dnat_rules(&request))
                .await?
                .unwrap_or_default();
            Ok(Page::new(
                response
                    .nat_gateway_destination_ip_port_translation_nat_rule_set
                    .unwrap_or_default(),
                response.total_count,
            ))
        })
        .await?;

        Ok(rules.into_iter().find(|r| {
            r.rule.ip_protocol.eq_ignore_ascii_case(&id.protocol)
                && r.rule.public_ip_address == id.elastic_ip
                && r.rule.public_port == id.elastic_port
        }))
    }

    pub async fn modify_dnat_rule(
        &self,
        nat_id: &str,
        source: &DnatRule,
        destination: &DnatRule,
    ) -> ProviderResult<()> {
        let api = self.api();
        let request = ModifyDnatRuleRequest {
            nat_gateway_id: nat_id.to_string(),
            source_nat_rule: source.clone(),
            destination_nat_rule: destination.clone(),
        };
        retry_call(self.ctx.write_timeout(), &[], || api.modify_dnat_rule(&request)).await?;
        Ok(())
    }

    pub async fn delete_dnat_rule(&self, nat_id: &str, rule: &DnatRule) -> ProviderResult<()> {
        let api = self.api();
        let request = DeleteDnatRuleRequest {
            nat_gateway_id: nat_id.to_string(),
            destination_ip_port_translation_nat_rules: vec![rule.clone()],
        };
        retry_lookup(self.ctx.write_timeout(), NOT_FOUND, &[], || api.delete_dnat_rule(&request))
            .await?;
        Ok(())
    }
}
