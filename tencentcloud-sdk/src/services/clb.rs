//! Cloud Load Balancer (`clb`, 2018-03-17)
//!
//! Mutating CLB actions are asynchronous: their `RequestId` is a task id that has
//! to be polled with `DescribeTaskStatus`.

use serde::{Deserialize, Serialize};

use crate::client::Endpoint;
use crate::types::{ActionResponse, TagInfo};

pub const ENDPOINT: Endpoint = Endpoint {
    service: "clb",
    version: "2018-03-17",
};

/// `DescribeTaskStatus` status codes.
pub const TASK_STATUS_SUCCESS: i64 = 0;
pub const TASK_STATUS_FAILED: i64 = 1;
pub const TASK_STATUS_RUNNING: i64 = 2;

service_client! {
    /// CLB actions.
    Clb, clb, ENDPOINT, {
        create_load_balancer(CreateLoadBalancerRequest) -> CreateLoadBalancerResponse = "CreateLoadBalancer";
        describe_load_balancers(DescribeLoadBalancersRequest) -> DescribeLoadBalancersResponse = "DescribeLoadBalancers";
        modify_load_balancer_attributes(ModifyLoadBalancerAttributesRequest) -> ActionResponse = "ModifyLoadBalancerAttributes";
        set_load_balancer_security_groups(SetLoadBalancerSecurityGroupsRequest) -> ActionResponse = "SetLoadBalancerSecurityGroups";
        delete_load_balancer(DeleteLoadBalancerRequest) -> ActionResponse = "DeleteLoadBalancer";
        describe_task_status(DescribeTaskStatusRequest) -> DescribeTaskStatusResponse = "DescribeTaskStatus";
        create_listener(CreateListenerRequest) -> CreateListenerResponse = "CreateListener";
        describe_listeners(DescribeListenersRequest) -> DescribeListenersResponse = "DescribeListeners";
        modify_listener(ModifyListenerRequest) -> ActionResponse = "ModifyListener";
        delete_listener(DeleteListenerRequest) -> ActionResponse = "DeleteListener";
        register_targets(RegisterTargetsRequest) -> ActionResponse = "RegisterTargets";
        deregister_targets(DeregisterTargetsRequest) -> ActionResponse = "DeregisterTargets";
        describe_targets(DescribeTargetsRequest) -> DescribeTargetsResponse = "DescribeTargets";
    }
}

// ============ Load balancers ============

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateLoadBalancerRequest {
    pub load_balancer_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub load_balancer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vpc_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subnet_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_ip_version: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<TagInfo>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CreateLoadBalancerResponse {
    pub load_balancer_ids: Option<Vec<String>>,
    pub request_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeLoadBalancersRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub load_balancer_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub load_balancer_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub load_balancer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<i64>,
    pub offset: i64,
    pub limit: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DescribeLoadBalancersResponse {
    pub total_count: Option<i64>,
    pub load_balancer_set: Option<Vec<LoadBalancer>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct LoadBalancer {
    pub load_balancer_id: Option<String>,
    pub load_balancer_name: Option<String>,
    pub load_balancer_type: Option<String>,
    pub project_id: Option<i64>,
    pub vpc_id: Option<String>,
    pub subnet_id: Option<String>,
    pub address_ip_version: Option<String>,
    pub load_balancer_vips: Option<Vec<String>>,
    pub secure_groups: Option<Vec<String>>,
    pub status: Option<i64>,
    pub create_time: Option<String>,
    pub tags: Option<Vec<TagInfo>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ModifyLoadBalancerAttributesRequest {
    pub load_balancer_id: String,
    pub load_balancer_name: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SetLoadBalancerSecurityGroupsRequest {
    pub load_balancer_id: String,
    pub security_groups: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteLoadBalancerRequest {
    pub load_balancer_ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeTaskStatusRequest {
    pub task_id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DescribeTaskStatusResponse {
    pub status: Option<i64>,
    pub load_balancer_ids: Option<Vec<String>>,
}

// ============ Listeners ============

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct HealthCheck {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_switch: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval_time: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_num: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub un_health_num: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateListenerRequest {
    pub load_balancer_id: String,
    pub ports: Vec<i64>,
    pub protocol: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub listener_names: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_check: Option<HealthCheck>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_expire_time: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduler: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CreateListenerResponse {
    pub listener_ids: Option<Vec<String>>,
    pub request_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeListenersRequest {
    pub load_balancer_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub listener_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DescribeListenersResponse {
    pub listeners: Option<Vec<Listener>>,
    pub total_count: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Listener {
    pub listener_id: Option<String>,
    pub listener_name: Option<String>,
    pub protocol: Option<String>,
    pub port: Option<i64>,
    pub health_check: Option<HealthCheck>,
    pub scheduler: Option<String>,
    pub session_expire_time: Option<i64>,
    pub create_time: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ModifyListenerRequest {
    pub load_balancer_id: String,
    pub listener_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub listener_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_expire_time: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_check: Option<HealthCheck>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduler: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteListenerRequest {
    pub load_balancer_id: String,
    pub listener_id: String,
}

// ============ Backends ============

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Target {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance_id: Option<String>,
    pub port: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RegisterTargetsRequest {
    pub load_balancer_id: String,
    pub listener_id: String,
    pub targets: Vec<Target>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_id: Option<String>,
}

pub type DeregisterTargetsRequest = RegisterTargetsRequest;

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeTargetsRequest {
    pub load_balancer_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub listener_ids: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DescribeTargetsResponse {
    pub listeners: Option<Vec<ListenerBackend>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ListenerBackend {
    pub listener_id: Option<String>,
    pub protocol: Option<String>,
    pub port: Option<i64>,
    pub targets: Option<Vec<Backend>>,
    pub rules: Option<Vec<RuleTargets>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct RuleTargets {
    pub location_id: Option<String>,
    pub domain: Option<String>,
    pub url: Option<String>,
    pub targets: Option<Vec<Backend>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Backend {
    pub instance_id: Option<String>,
    pub port: Option<i64>,
    pub weight: Option<i64>,
    pub private_ip_addresses: Option<Vec<String>>,
}
