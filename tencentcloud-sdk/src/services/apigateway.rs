//! API Gateway (`apigateway`, 2018-08-08)

use serde::{Deserialize, Serialize};

use crate::client::Endpoint;
use crate::types::{ActionResponse, Filter, ResultResponse};

pub const ENDPOINT: Endpoint = Endpoint {
    service: "apigateway",
    version: "2018-08-08",
};

service_client! {
    /// API Gateway actions.
    ApiGateway, apigateway, ENDPOINT, {
        describe_service(DescribeServiceRequest) -> DescribeServiceResponse = "DescribeService";
        describe_services_status(DescribeServicesStatusRequest) -> DescribeServicesStatusResponse = "DescribeServicesStatus";
        create_api(CreateApiRequest) -> CreateApiResponse = "CreateApi";
        describe_api(DescribeApiRequest) -> DescribeApiResponse = "DescribeApi";
        modify_api(ModifyApiRequest) -> ActionResponse = "ModifyApi";
        delete_api(DeleteApiRequest) -> ResultResponse = "DeleteApi";
        modify_api_environment_strategy(ModifyApiEnvironmentStrategyRequest) -> ResultResponse = "ModifyApiEnvironmentStrategy";
        describe_api_environment_strategy(DescribeApiEnvironmentStrategyRequest) -> DescribeApiEnvironmentStrategyResponse = "DescribeApiEnvironmentStrategy";
        describe_plugin_apis(DescribePluginApisRequest) -> DescribePluginApisResponse = "DescribePluginApis";
        attach_plugin(AttachPluginRequest) -> ResultResponse = "AttachPlugin";
        detach_plugin(DetachPluginRequest) -> ResultResponse = "DetachPlugin";
    }
}

// ============ Services ============

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeServiceRequest {
    pub service_id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DescribeServiceResponse {
    pub service_id: Option<String>,
    pub service_name: Option<String>,
    pub service_desc: Option<String>,
    pub protocol: Option<String>,
    pub created_time: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeServicesStatusRequest {
    pub limit: i64,
    pub offset: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<Vec<Filter>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DescribeServicesStatusResponse {
    pub result: Option<ServicesStatus>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ServicesStatus {
    pub total_count: Option<i64>,
    pub service_set: Option<Vec<ServiceSummary>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ServiceSummary {
    pub service_id: Option<String>,
    pub service_name: Option<String>,
    pub protocol: Option<String>,
    pub created_time: Option<String>,
}

// ============ APIs ============

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ApiRequestConfig {
    pub path: String,
    pub method: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ConstantParameter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct RequestParameter {
    pub name: String,
    pub position: String,
    #[serde(rename = "Type")]
    pub param_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ServiceConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uniq_vpc_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ResponseErrorCode {
    pub code: i64,
    pub msg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub converted_code: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub need_convert: Option<bool>,
}

/// Body shared by `CreateApi` and `ModifyApi`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateApiRequest {
    pub service_id: String,
    pub api_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_desc: Option<String>,
    pub api_type: String,
    pub auth_type: String,
    pub protocol: String,
    #[serde(rename = "EnableCORS")]
    pub enable_cors: bool,
    pub request_config: ApiRequestConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constant_parameters: Option<Vec<ConstantParameter>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_parameters: Option<Vec<RequestParameter>>,
    pub service_type: String,
    pub service_timeout: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_config: Option<ServiceConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_mock_return_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_success_example: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_fail_example: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_error_codes: Option<Vec<ResponseErrorCode>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_delete_response_error_codes: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CreateApiResponse {
    pub result: Option<CreateApiResult>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CreateApiResult {
    pub api_id: Option<String>,
    pub path: Option<String>,
    pub method: Option<String>,
    pub created_time: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ModifyApiRequest {
    pub api_id: String,
    #[serde(flatten)]
    pub api: CreateApiRequest,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeApiRequest {
    pub service_id: String,
    pub api_id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DescribeApiResponse {
    pub result: Option<ApiInfo>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ApiInfo {
    pub service_id: Option<String>,
    pub api_id: Option<String>,
    pub api_name: Option<String>,
    pub api_desc: Option<String>,
    pub api_type: Option<String>,
    pub auth_type: Option<String>,
    pub protocol: Option<String>,
    #[serde(rename = "EnableCORS")]
    pub enable_cors: Option<bool>,
    pub request_config: Option<ApiRequestConfig>,
    pub constant_parameters: Option<Vec<ConstantParameter>>,
    pub request_parameters: Option<Vec<RequestParameter>>,
    pub service_type: Option<String>,
    pub service_timeout: Option<i64>,
    pub service_config: Option<ServiceConfig>,
    pub service_mock_return_message: Option<String>,
    pub response_type: Option<String>,
    pub response_success_example: Option<String>,
    pub response_fail_example: Option<String>,
    pub response_error_codes: Option<Vec<ResponseErrorCode>>,
    pub created_time: Option<String>,
    pub modified_time: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteApiRequest {
    pub service_id: String,
    pub api_id: String,
}

// ============ Environment strategies (throttling) ============

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ModifyApiEnvironmentStrategyRequest {
    pub service_id: String,
    pub strategy: i64,
    pub environment_name: String,
    pub api_ids: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeApiEnvironmentStrategyRequest {
    pub service_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment_names: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_id: Option<String>,
    pub limit: i64,
    pub offset: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DescribeApiEnvironmentStrategyResponse {
    pub result: Option<ApiEnvironmentStrategyStatus>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ApiEnvironmentStrategyStatus {
    pub total_count: Option<i64>,
    pub api_environment_strategy_set: Option<Vec<ApiEnvironmentStrategy>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ApiEnvironmentStrategy {
    pub api_id: Option<String>,
    pub api_name: Option<String>,
    pub path: Option<String>,
    pub method: Option<String>,
    pub environment_strategy_set: Option<Vec<EnvironmentStrategy>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct EnvironmentStrategy {
    pub environment_name: Option<String>,
    pub quota: Option<i64>,
}

// ============ Plugins ============

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribePluginApisRequest {
    pub plugin_id: String,
    pub limit: i64,
    pub offset: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DescribePluginApisResponse {
    pub result: Option<AttachedApiSummary>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct AttachedApiSummary {
    pub total_count: Option<i64>,
    pub attached_apis: Option<Vec<AttachedApiInfo>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct AttachedApiInfo {
    pub service_id: Option<String>,
    pub service_name: Option<String>,
    pub api_id: Option<String>,
    pub api_name: Option<String>,
    pub environment: Option<String>,
    pub attached_time: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AttachPluginRequest {
    pub plugin_id: String,
    pub service_id: String,
    pub environment_name: String,
    pub api_ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DetachPluginRequest {
    pub plugin_id: String,
    pub service_id: String,
    pub environment_name: String,
    pub api_id: String,
}
