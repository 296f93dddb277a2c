//! `tencentcloud_api_gateway_api`

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tencentcloud_sdk::services::apigateway::{
    ApiInfo, ApiRequestConfig, ConstantParameter, CreateApiRequest, ModifyApiRequest,
    RequestParameter, ResponseErrorCode, ServiceConfig,
};

use crate::context::ProviderContext;
use crate::error::{ProviderError, ProviderResult};
use crate::logging::ElapsedGuard;
use crate::resource_data::ResourceData;
use crate::schema::{Attribute, Schema};
use crate::services::{ApiGatewayService, ENV_PREPUB, ENV_RELEASE, ENV_TEST, QUOTA_MAX, QUOTA_UNLIMITED};
use crate::traits::Resource;

pub const TYPE_NAME: &str = "tencentcloud_api_gateway_api";

/// Throttling attribute and the environment it applies to.
const LIMITS: [(&str, &str); 3] = [
    ("pre_limit", ENV_PREPUB),
    ("release_limit", ENV_RELEASE),
    ("test_limit", ENV_TEST),
];

/// Attributes sent through `ModifyApi`.
const MODIFIABLE: &[&str] = &[
    "api_name",
    "api_desc",
    "api_type",
    "auth_type",
    "enable_cors",
    "request_config_path",
    "request_config_method",
    "constant_parameters",
    "request_parameters",
    "service_config_type",
    "service_config_timeout",
    "service_config_product",
    "service_config_vpc_id",
    "service_config_url",
    "service_config_path",
    "service_config_method",
    "service_config_mock_return_message",
    "response_type",
    "response_success_example",
    "response_fail_example",
    "response_error_codes",
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
struct ConstantParam {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    desc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    default_value: Option<String>,
}

impl From<ConstantParameter> for ConstantParam {
    fn from(p: ConstantParameter) -> Self {
        Self {
            name: p.name,
            desc: p.desc,
            position: p.position,
            default_value: p.default_value,
        }
    }
}

impl From<&ConstantParam> for ConstantParameter {
    fn from(p: &ConstantParam) -> Self {
        Self {
            name: p.name.clone(),
            desc: p.desc.clone(),
            position: p.position.clone(),
            default_value: p.default_value.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct RequestParam {
    name: String,
    position: String,
    #[serde(rename = "type")]
    param_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    desc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    default_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    required: Option<bool>,
}

impl From<RequestParameter> for RequestParam {
    fn from(p: RequestParameter) -> Self {
        Self {
            name: p.name,
            position: p.position,
            param_type: p.param_type,
            desc: p.desc,
            default_value: p.default_value,
            required: p.required,
        }
    }
}

impl From<&RequestParam> for RequestParameter {
    fn from(p: &RequestParam) -> Self {
        Self {
            name: p.name.clone(),
            position: p.position.clone(),
            param_type: p.param_type.clone(),
            desc: p.desc.clone(),
            default_value: p.default_value.clone(),
            required: p.required,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ErrorCode {
    code: i64,
    msg: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    desc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    converted_code: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    need_convert: Option<bool>,
}

impl From<ResponseErrorCode> for ErrorCode {
    fn from(c: ResponseErrorCode) -> Self {
        Self {
            code: c.code,
            msg: c.msg,
            desc: c.desc,
            converted_code: c.converted_code,
            need_convert: c.need_convert,
        }
    }
}

impl From<&ErrorCode> for ResponseErrorCode {
    fn from(c: &ErrorCode) -> Self {
        Self {
            code: c.code,
            msg: c.msg.clone(),
            desc: c.desc.clone(),
            converted_code: c.converted_code,
            need_convert: c.need_convert,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ApiConfig {
    service_id: String,
    api_name: String,
    api_desc: Option<String>,
    api_type: String,
    auth_type: String,
    protocol: String,
    enable_cors: bool,
    request_config_path: String,
    request_config_method: String,
    #[serde(default)]
    constant_parameters: Vec<ConstantParam>,
    #[serde(default)]
    request_parameters: Vec<RequestParam>,
    service_config_type: String,
    service_config_timeout: i64,
    service_config_product: Option<String>,
    service_config_vpc_id: Option<String>,
    service_config_url: Option<String>,
    service_config_path: Option<String>,
    service_config_method: Option<String>,
    service_config_mock_return_message: Option<String>,
    response_type: Option<String>,
    response_success_example: Option<String>,
    response_fail_example: Option<String>,
    #[serde(default)]
    response_error_codes: Vec<ErrorCode>,
    pre_limit: Option<i64>,
    release_limit: Option<i64>,
    test_limit: Option<i64>,
}

impl ApiConfig {
    fn validate(&self) -> ProviderResult<()> {
        for code in &self.response_error_codes {
            if code.need_convert == Some(true) && code.converted_code.is_none() {
                return Err(ProviderError::InvalidConfig(format!(
                    "response_error_codes: code {} sets need_convert without converted_code",
                    code.code
                )));
            }
        }
        Ok(())
    }

    fn limit(&self, key: &str) -> Option<i64> {
        match key {
            "pre_limit" => self.pre_limit,
            "release_limit" => self.release_limit,
            "test_limit" => self.test_limit,
            _ => None,
        }
    }

    fn to_request(&self) -> CreateApiRequest {
        let service_config = ServiceConfig {
            product: self.service_config_product.clone(),
            uniq_vpc_id: self.service_config_vpc_id.clone(),
            url: self.service_config_url.clone(),
            path: self.service_config_path.clone(),
            method: self.service_config_method.clone(),
        };
        CreateApiRequest {
            service_id: self.service_id.clone(),
            api_name: self.api_name.clone(),
            api_desc: self.api_desc.clone(),
            api_type: self.api_type.clone(),
            auth_type: self.auth_type.clone(),
            protocol: self.protocol.clone(),
            enable_cors: self.enable_cors,
            request_config: ApiRequestConfig {
                path: self.request_config_path.clone(),
                method: self.request_config_method.clone(),
            },
            constant_parameters: (!self.constant_parameters.is_empty())
                .then(|| self.constant_parameters.iter().map(Into::into).collect()),
            request_parameters: (!self.request_parameters.is_empty())
                .then(|| self.request_parameters.iter().map(Into::into).collect()),
            service_type: self.service_config_type.clone(),
            service_timeout: self.service_config_timeout,
            service_config: (service_config != ServiceConfig::default()).then_some(service_config),
            service_mock_return_message: self.service_config_mock_return_message.clone(),
            response_type: self.response_type.clone(),
            response_success_example: self.response_success_example.clone(),
            response_fail_example: self.response_fail_example.clone(),
            response_error_codes: (!self.response_error_codes.is_empty())
                .then(|| self.response_error_codes.iter().map(Into::into).collect()),
            is_delete_response_error_codes: None,
        }
    }
}

#[derive(Debug, Default, Serialize)]
struct ApiState {
    service_id: Option<String>,
    api_name: Option<String>,
    api_desc: Option<String>,
    api_type: Option<String>,
    auth_type: Option<String>,
    protocol: Option<String>,
    enable_cors: Option<bool>,
    request_config_path: Option<String>,
    request_config_method: Option<String>,
    constant_parameters: Option<Vec<ConstantParam>>,
    request_parameters: Option<Vec<RequestParam>>,
    service_config_type: Option<String>,
    service_config_timeout: Option<i64>,
    service_config_product: Option<String>,
    service_config_vpc_id: Option<String>,
    service_config_url: Option<String>,
    service_config_path: Option<String>,
    service_config_method: Option<String>,
    service_config_mock_return_message: Option<String>,
    response_type: Option<String>,
    response_success_example: Option<String>,
    response_fail_example: Option<String>,
    response_error_codes: Option<Vec<ErrorCode>>,
    create_time: Option<String>,
    modify_time: Option<String>,
}

impl From<ApiInfo> for ApiState {
    fn from(info: ApiInfo) -> Self {
        let (request_config_path, request_config_method) = match info.request_config {
            Some(c) => (Some(c.path), Some(c.method)),
            None => (None, None),
        };
        let service_config = info.service_config.unwrap_or_default();
        Self {
            service_id: info.service_id,
            api_name: info.api_name,
            api_desc: info.api_desc,
            api_type: info.api_type,
            auth_type: info.auth_type,
            protocol: info.protocol,
            enable_cors: info.enable_cors,
            request_config_path,
            request_config_method,
            constant_parameters: info
                .constant_parameters
                .map(|v| v.into_iter().map(Into::into).collect()),
            request_parameters: info
                .request_parameters
                .map(|v| v.into_iter().map(Into::into).collect()),
            service_config_type: info.service_type,
            service_config_timeout: info.service_timeout,
            service_config_product: service_config.product,
            service_config_vpc_id: service_config.uniq_vpc_id,
            service_config_url: service_config.url,
            service_config_path: service_config.path,
            service_config_method: service_config.method,
            service_config_mock_return_message: info.service_mock_return_message,
            response_type: info.response_type,
            response_success_example: info.response_success_example,
            response_fail_example: info.response_fail_example,
            response_error_codes: info
                .response_error_codes
                .map(|v| v.into_iter().map(Into::into).collect()),
            create_time: info.created_time,
            modify_time: info.modified_time,
        }
    }
}

/// Quota reported for unlimited throttling is stored as [`QUOTA_MAX`].
fn stored_quota(quota: i64) -> i64 {
    if quota == QUOTA_UNLIMITED {
        QUOTA_MAX
    } else {
        quota
    }
}

fn is_empty_list(value: Option<&Value>) -> bool {
    value.and_then(Value::as_array).is_none_or(Vec::is_empty)
}

pub struct ApiGatewayApi;

#[async_trait]
impl Resource for ApiGatewayApi {
    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }

    fn schema(&self) -> Schema {
        let constant_parameter = Schema::new()
            .attr("name", Attribute::string().optional().description("Parameter name."))
            .attr("desc", Attribute::string().optional())
            .attr("position", Attribute::string().optional().description("PATH, QUERY or HEADER."))
            .attr("default_value", Attribute::string().optional());
        let request_parameter = Schema::new()
            .attr("name", Attribute::string().required())
            .attr("position", Attribute::string().required())
            .attr("type", Attribute::string().required().description("Parameter value type."))
            .attr("desc", Attribute::string().optional())
            .attr("default_value", Attribute::string().optional())
            .attr("required", Attribute::bool().optional());
        let error_code = Schema::new()
            .attr("code", Attribute::int().required())
            .attr("msg", Attribute::string().required())
            .attr("desc", Attribute::string().optional())
            .attr("converted_code", Attribute::int().optional())
            .attr("need_convert", Attribute::bool().optional());

        Schema::new()
            .attr("service_id", Attribute::string().required().force_new().description("Service the API belongs to."))
            .attr("api_name", Attribute::string().required())
            .attr("api_desc", Attribute::string().optional())
            .attr("api_type", Attribute::string().default("NORMAL").description("NORMAL or TSF."))
            .attr("auth_type", Attribute::string().default("NONE").description("SECRET, NONE or OAUTH."))
            .attr("protocol", Attribute::string().default("HTTP").force_new().description("HTTP or WEBSOCKET."))
            .attr("enable_cors", Attribute::bool().default(true))
            .attr("request_config_path", Attribute::string().required().description("Frontend path, e.g. `/user/info`."))
            .attr("request_config_method", Attribute::string().default("GET"))
            .attr("constant_parameters", Attribute::set_of_blocks(constant_parameter).optional())
            .attr("request_parameters", Attribute::set_of_blocks(request_parameter).optional())
            .attr("service_config_type", Attribute::string().default("HTTP").description("HTTP, MOCK, TSF, SCF, WEBSOCKET or TARGET."))
            .attr("service_config_timeout", Attribute::int().default(5).description("Backend timeout in seconds."))
            .attr("service_config_product", Attribute::string().optional())
            .attr("service_config_vpc_id", Attribute::string().optional())
            .attr("service_config_url", Attribute::string().optional())
            .attr("service_config_path", Attribute::string().optional())
            .attr("service_config_method", Attribute::string().optional())
            .attr("service_config_mock_return_message", Attribute::string().optional())
            .attr("response_type", Attribute::string().optional().description("HTML, JSON, TEXT, BINARY or XML."))
            .attr("response_success_example", Attribute::string().optional())
            .attr("response_fail_example", Attribute::string().optional())
            .attr("response_error_codes", Attribute::set_of_blocks(error_code).optional())
            .attr("pre_limit", Attribute::int().optional().computed().description("QPS limit in the prepub environment."))
            .attr("release_limit", Attribute::int().optional().computed().description("QPS limit in the release environment."))
            .attr("test_limit", Attribute::int().optional().computed().description("QPS limit in the test environment."))
            .attr("create_time", Attribute::string().computed())
            .attr("modify_time", Attribute::string().computed())
    }

    async fn create(&self, ctx: &ProviderContext, d: &mut ResourceData) -> ProviderResult<()> {
        let _elapsed = ElapsedGuard::new(TYPE_NAME, "create");
        let config: ApiConfig = d.decode()?;
        config.validate()?;
        let service = ApiGatewayService::new(ctx);

        if service.describe_service(&config.service_id).await?.is_none() {
            return Err(ProviderError::not_found("api gateway service", config.service_id.clone()));
        }

        let api_id = service.create_api(&config.to_request()).await?;
        log::info!("[{TYPE_NAME}] Created API {api_id} in service {}", config.service_id);

        for (key, environment) in LIMITS {
            if let Some(limit) = config.limit(key).filter(|l| *l != 0) {
                service
                    .modify_environment_strategy(&config.service_id, environment, limit, &[api_id.clone()])
                    .await?;
            }
        }

        d.set_id(api_id);
        self.read(ctx, d).await
    }

    async fn read(&self, ctx: &ProviderContext, d: &mut ResourceData) -> ProviderResult<()> {
        let _elapsed = ElapsedGuard::new(TYPE_NAME, "read");
        let api_id = d.id().to_string();
        let service_id = d.get_str("service_id").unwrap_or_default().to_string();
        let service = ApiGatewayService::new(ctx);

        let Some(info) = service.describe_api(&service_id, &api_id).await? else {
            log::warn!("[{TYPE_NAME}] API {api_id} not found, removing from state");
            d.clear_id();
            return Ok(());
        };
        d.set_state(&ApiState::from(info))?;

        let strategies = service
            .describe_environment_strategies(&service_id, &[], Some(&api_id))
            .await?;
        let Some(strategy) = strategies
            .into_iter()
            .find(|s| s.api_id.as_deref() == Some(api_id.as_str()))
        else {
            return Ok(());
        };
        // environments missing from the API's strategy read back as 0
        let mut limits: Vec<(&str, i64)> = LIMITS.iter().map(|(key, _)| (*key, 0)).collect();
        for env in strategy.environment_strategy_set.unwrap_or_default() {
            let (Some(environment), Some(quota)) = (env.environment_name, env.quota) else {
                continue;
            };
            if let Some(i) = LIMITS.iter().position(|(_, e)| *e == environment) {
                limits[i].1 = stored_quota(quota);
            }
        }
        for (key, limit) in limits {
            d.set(key, limit);
        }
        Ok(())
    }

    async fn update(&self, ctx: &ProviderContext, d: &mut ResourceData) -> ProviderResult<()> {
        let _elapsed = ElapsedGuard::new(TYPE_NAME, "update");
        let config: ApiConfig = d.decode()?;
        config.validate()?;

        if d.has_change("response_error_codes")
            && !is_empty_list(d.old("response_error_codes"))
            && is_empty_list(d.get("response_error_codes"))
        {
            return Err(ProviderError::InvalidConfig(
                "response_error_codes cannot be emptied once set".to_string(),
            ));
        }

        let api_id = d.id().to_string();
        let service = ApiGatewayService::new(ctx);

        if MODIFIABLE.iter().any(|key| d.has_change(key)) {
            let request = ModifyApiRequest {
                api_id: api_id.clone(),
                api: config.to_request(),
            };
            service.modify_api(&request).await?;
        }

        for (key, environment) in LIMITS {
            if !d.has_change(key) {
                continue;
            }
            if let Some(limit) = config.limit(key).filter(|l| *l != 0) {
                service
                    .modify_environment_strategy(&config.service_id, environment, limit, &[api_id.clone()])
                    .await?;
            }
        }

        self.read(ctx, d).await
    }

    async fn delete(&self, ctx: &ProviderContext, d: &mut ResourceData) -> ProviderResult<()> {
        let _elapsed = ElapsedGuard::new(TYPE_NAME, "delete");
        let api_id = d.id().to_string();
        let service_id = d.get_str("service_id").unwrap_or_default().to_string();
        let service = ApiGatewayService::new(ctx);

        if service.describe_api(&service_id, &api_id).await?.is_none() {
            return Ok(());
        }

        for (_, environment) in LIMITS {
            service
                .modify_environment_strategy(&service_id, environment, QUOTA_UNLIMITED, &[api_id.clone()])
                .await?;
        }
        service.delete_api(&service_id, &api_id).await
    }

    fn importable(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn planned(config: Value) -> ResourceData {
        ResourceData::planned(TYPE_NAME, ApiGatewayApi.schema(), config).unwrap()
    }

    #[test]
    fn defaults_fill_the_request() {
        let d = planned(json!({
            "service_id": "service-ehtglmrs",
            "api_name": "hello",
            "request_config_path": "/user/info",
            "service_config_timeout": 15,
        }));
        let config: ApiConfig = d.decode().unwrap();
        let request = config.to_request();

        assert_eq!(request.protocol, "HTTP");
        assert_eq!(request.api_type, "NORMAL");
        assert_eq!(request.auth_type, "NONE");
        assert!(request.enable_cors);
        assert_eq!(request.request_config.method, "GET");
        assert_eq!(request.service_type, "HTTP");
        assert_eq!(request.service_timeout, 15);
        assert!(request.service_config.is_none());
        assert!(request.constant_parameters.is_none());
        assert!(request.response_error_codes.is_none());
    }

    #[test]
    fn need_convert_requires_converted_code() {
        let d = planned(json!({
            "service_id": "service-1",
            "api_name": "hello",
            "request_config_path": "/",
            "response_error_codes": [{"code": 10, "msg": "fail", "need_convert": true}],
        }));
        let config: ApiConfig = d.decode().unwrap();
        assert!(matches!(config.validate(), Err(ProviderError::InvalidConfig(_))));
    }

    #[test]
    fn unlimited_quota_is_stored_as_max() {
        assert_eq!(stored_quota(QUOTA_UNLIMITED), QUOTA_MAX);
        assert_eq!(stored_quota(300), 300);
    }

    #[test]
    fn state_carries_timestamps_and_service_config() {
        let info: ApiInfo = serde_json::from_value(json!({
            "ServiceId": "service-1",
            "ApiId": "api-1",
            "ApiName": "hello",
            "Protocol": "HTTP",
            "EnableCORS": true,
            "RequestConfig": {"Path": "/user/info", "Method": "GET"},
            "ServiceType": "HTTP",
            "ServiceTimeout": 15,
            "ServiceConfig": {"Url": "http://www.qq.com", "Path": "/user", "Method": "POST"},
            "CreatedTime": "2020-09-22T00:00:00Z",
            "ModifiedTime": "2020-09-22T00:00:01Z"
        }))
        .unwrap();
        let state = serde_json::to_value(ApiState::from(info)).unwrap();
        assert_eq!(state["api_name"], "hello");
        assert_eq!(state["service_config_url"], "http://www.qq.com");
        assert_eq!(state["service_config_method"], "POST");
        assert_eq!(state["request_config_path"], "/user/info");
        assert_eq!(state["create_time"], "2020-09-22T00:00:00Z");
        assert_eq!(state["modify_time"], "2020-09-22T00:00:01Z");
    }
}
