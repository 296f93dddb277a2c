//! Virtual Private Cloud (`vpc`, 2017-03-12): direct connect gateways and NAT port
//! forwarding rules

use serde::{Deserialize, Serialize};

use crate::client::Endpoint;
use crate::types::{ActionResponse, Filter};

pub const ENDPOINT: Endpoint = Endpoint {
    service: "vpc",
    version: "2017-03-12",
};

service_client! {
    /// VPC actions.
    Vpc, vpc, ENDPOINT, {
        create_direct_connect_gateway(CreateDirectConnectGatewayRequest) -> CreateDirectConnectGatewayResponse = "CreateDirectConnectGateway";
        describe_direct_connect_gateways(DescribeDirectConnectGatewaysRequest) -> DescribeDirectConnectGatewaysResponse = "DescribeDirectConnectGateways";
        modify_direct_connect_gateway_attribute(ModifyDirectConnectGatewayAttributeRequest) -> ActionResponse = "ModifyDirectConnectGatewayAttribute";
        delete_direct_connect_gateway(DeleteDirectConnectGatewayRequest) -> ActionResponse = "DeleteDirectConnectGateway";
        create_direct_connect_gateway_ccn_routes(CreateDirectConnectGatewayCcnRoutesRequest) -> ActionResponse = "CreateDirectConnectGatewayCcnRoutes";
        describe_direct_connect_gateway_ccn_routes(DescribeDirectConnectGatewayCcnRoutesRequest) -> DescribeDirectConnectGatewayCcnRoutesResponse = "DescribeDirectConnectGatewayCcnRoutes";
        delete_direct_connect_gateway_ccn_routes(DeleteDirectConnectGatewayCcnRoutesRequest) -> ActionResponse = "DeleteDirectConnectGatewayCcnRoutes";
        create_dnat_rule(CreateDnatRuleRequest) -> ActionResponse = "CreateNatGatewayDestinationIpPortTranslationNatRule";
        describe_dnat_rules(DescribeDnatRulesRequest) -> DescribeDnatRulesResponse = "DescribeNatGatewayDestinationIpPortTranslationNatRules";
        modify_dnat_rule(ModifyDnatRuleRequest) -> ActionResponse = "ModifyNatGatewayDestinationIpPortTranslationNatRule";
        delete_dnat_rule(DeleteDnatRuleRequest) -> ActionResponse = "DeleteNatGatewayDestinationIpPortTranslationNatRule";
    }
}

// ============ Direct connect gateways ============

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateDirectConnectGatewayRequest {
    pub direct_connect_gateway_name: String,
    pub network_type: String,
    pub network_instance_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gateway_type: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CreateDirectConnectGatewayResponse {
    pub direct_connect_gateway: Option<DirectConnectGateway>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DirectConnectGateway {
    pub direct_connect_gateway_id: Option<String>,
    pub direct_connect_gateway_name: Option<String>,
    pub direct_connect_gateway_ip: Option<String>,
    pub network_type: Option<String>,
    pub network_instance_id: Option<String>,
    pub gateway_type: Option<String>,
    pub vpc_id: Option<String>,
    pub ccn_route_type: Option<String>,
    #[serde(rename = "EnableBGP")]
    pub enable_bgp: Option<bool>,
    pub create_time: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeDirectConnectGatewaysRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direct_connect_gateway_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<Vec<Filter>>,
    pub offset: i64,
    pub limit: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DescribeDirectConnectGatewaysResponse {
    pub total_count: Option<i64>,
    pub direct_connect_gateway_set: Option<Vec<DirectConnectGateway>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ModifyDirectConnectGatewayAttributeRequest {
    pub direct_connect_gateway_id: String,
    pub direct_connect_gateway_name: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteDirectConnectGatewayRequest {
    pub direct_connect_gateway_id: String,
}

// ============ CCN routes ============

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DirectConnectGatewayCcnRoute {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_id: Option<String>,
    pub destination_cidr_block: String,
    #[serde(rename = "ASPath", skip_serializing_if = "Vec::is_empty")]
    pub as_path: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateDirectConnectGatewayCcnRoutesRequest {
    pub direct_connect_gateway_id: String,
    pub routes: Vec<DirectConnectGatewayCcnRoute>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeDirectConnectGatewayCcnRoutesRequest {
    pub direct_connect_gateway_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ccn_route_type: Option<String>,
    pub offset: i64,
    pub limit: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DescribeDirectConnectGatewayCcnRoutesResponse {
    pub total_count: Option<i64>,
    pub route_set: Option<Vec<DirectConnectGatewayCcnRoute>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteDirectConnectGatewayCcnRoutesRequest {
    pub direct_connect_gateway_id: String,
    pub route_ids: Vec<String>,
}

// ============ NAT destination port forwarding ============

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DnatRule {
    pub ip_protocol: String,
    pub public_ip_address: String,
    pub public_port: u16,
    pub private_ip_address: String,
    pub private_port: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Rule as listed by the describe action, with its owning gateway.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct NatGatewayDnatRule {
    #[serde(flatten)]
    pub rule: DnatRule,
    pub nat_gateway_id: Option<String>,
    pub vpc_id: Option<String>,
    pub created_time: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateDnatRuleRequest {
    pub nat_gateway_id: String,
    pub destination_ip_port_translation_nat_rules: Vec<DnatRule>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeDnatRulesRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nat_gateway_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<Vec<Filter>>,
    pub offset: i64,
    pub limit: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DescribeDnatRulesResponse {
    pub total_count: Option<i64>,
    pub nat_gateway_destination_ip_port_translation_nat_rule_set: Option<Vec<NatGatewayDnatRule>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ModifyDnatRuleRequest {
    pub nat_gateway_id: String,
    pub source_nat_rule: DnatRule,
    pub destination_nat_rule: DnatRule,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteDnatRuleRequest {
    pub nat_gateway_id: String,
    pub destination_ip_port_translation_nat_rules: Vec<DnatRule>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ccn_route_uses_aspath_key() {
        let route: DirectConnectGatewayCcnRoute = serde_json::from_str(
            r#"{"RouteId":"ccnr-1","DestinationCidrBlock":"10.0.0.0/8","ASPath":["65000"]}"#,
        )
        .unwrap();
        assert_eq!(route.as_path, vec!["65000".to_string()]);

        let body = serde_json::to_value(DirectConnectGatewayCcnRoute {
            route_id: None,
            destination_cidr_block: "10.0.0.0/8".to_string(),
            as_path: Vec::new(),
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"DestinationCidrBlock": "10.0.0.0/8"}));
    }

    #[test]
    fn listed_dnat_rule_flattens_rule_fields() {
        let resp: DescribeDnatRulesResponse = serde_json::from_str(
            r#"{"TotalCount":1,"NatGatewayDestinationIpPortTranslationNatRuleSet":[
                {"IpProtocol":"TCP","PublicIpAddress":"1.2.3.4","PublicPort":80,
                 "PrivateIpAddress":"10.0.0.2","PrivatePort":8080,"Description":null,
                 "NatGatewayId":"nat-1","VpcId":"vpc-1"}]}"#,
        )
        .unwrap();
        let listed = &resp.nat_gateway_destination_ip_port_translation_nat_rule_set.unwrap()[0];
        assert_eq!(listed.rule.public_port, 80);
        assert_eq!(listed.rule.private_ip_address, "10.0.0.2");
        assert_eq!(listed.vpc_id.as_deref(), Some("vpc-1"));
    }
}
