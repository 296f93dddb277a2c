//! API Gateway service

use tencentcloud_sdk::services::apigateway::{
    ApiEnvironmentStrategy, ApiInfo, AttachPluginRequest, AttachedApiInfo, CreateApiRequest,
    DeleteApiRequest, DescribeApiEnvironmentStrategyRequest, DescribeApiRequest,
    DescribePluginApisRequest, DescribeServiceRequest, DescribeServiceResponse,
    DescribeServicesStatusRequest, DetachPluginRequest, ModifyApiEnvironmentStrategyRequest,
    ModifyApiRequest, ServiceSummary,
};
use tencentcloud_sdk::ResultResponse;

use crate::context::ProviderContext;
use crate::error::{ProviderError, ProviderResult};
use crate::pagination::{paginate, Page, DEFAULT_PAGE_LIMIT};
use crate::retry::{retry_call, retry_lookup};

/// Missing service.
pub const SERVICE_NOT_FOUND: &str = "ResourceNotFound.InvalidService";
/// Missing API.
pub const API_NOT_FOUND: &str = "ResourceNotFound.InvalidApi";
/// Quota reported for an environment without throttling.
pub const QUOTA_UNLIMITED: i64 = -1;
/// Value stored in state for [`QUOTA_UNLIMITED`].
pub const QUOTA_MAX: i64 = 2000;

/// Environments an API can be throttled in.
pub const ENV_PREPUB: &str = "prepub";
pub const ENV_RELEASE: &str = "release";
pub const ENV_TEST: &str = "test";
pub const ENVIRONMENTS: [&str; 3] = [ENV_PREPUB, ENV_RELEASE, ENV_TEST];

const INTERNAL_ERROR: &[&str] = &["InternalError"];

fn require_result(action: &str, response: &ResultResponse) -> ProviderResult<()> {
    if response.succeeded() {
        Ok(())
    } else {
        Err(ProviderError::BusinessFailure {
            action: action.to_string(),
            detail: format!(
                "Result is not true (RequestId: {})",
                response.request_id.as_deref().unwrap_or("-")
            ),
        })
    }
}

/// API Gateway calls with retry and not-found handling
pub struct ApiGatewayService<'a> {
    ctx: &'a ProviderContext,
}

impl<'a> ApiGatewayService<'a> {
    #[must_use]
    pub fn new(ctx: &'a ProviderContext) -> Self {
        Self { ctx }
    }

    /// Service details, or `None` when the service does not exist.
    pub async fn describe_service(
        &self,
        service_id: &str,
    ) -> ProviderResult<Option<DescribeServiceResponse>> {
        let api = self.ctx.client().apigateway();
        let request = DescribeServiceRequest {
            service_id: service_id.to_string(),
        };
        retry_lookup(
            self.ctx.read_timeout(),
            &[SERVICE_NOT_FOUND],
            INTERNAL_ERROR,
            || api.describe_service(&request),
        )
        .await
    }

    /// Every service in the region.
    pub async fn describe_services(&self) -> ProviderResult<Vec<ServiceSummary>> {
        let api = self.ctx.client().apigateway();
        let timeout = self.ctx.read_timeout();
        paginate(DEFAULT_PAGE_LIMIT, |offset, limit| async move {
            let request = DescribeServicesStatusRequest {
                limit,
                offset,
                filters: None,
            };
            let response =
                retry_call(timeout, INTERNAL_ERROR, || api.describe_services_status(&request)).await?;
            let result = response.result.unwrap_or_default();
            Ok(Page::new(result.service_set.unwrap_or_default(), result.total_count))
        })
        .await
    }

    /// Create an API and return its id.
    pub async fn create_api(&self, request: &CreateApiRequest) -> ProviderResult<String> {
        let api = self.ctx.client().apigateway();
        let response =
            retry_call(self.ctx.write_timeout(), &[], || api.create_api(request)).await?;
        response
            .result
            .and_then(|r| r.api_id)
            .ok_or_else(|| ProviderError::BusinessFailure {
                action: "CreateApi".to_string(),
                detail: "response carries no ApiId".to_string(),
            })
    }

    /// API details, or `None` when the API or its service is gone.
    pub async fn describe_api(&self, service_id: &str, api_id: &str) -> ProviderResult<Option<ApiInfo>> {
        let api = self.ctx.client().apigateway();
        let request = DescribeApiRequest {
            service_id: service_id.to_string(),
            api_id: api_id.to_string(),
        };
        let response = retry_lookup(
            self.ctx.read_timeout(),
            &[SERVICE_NOT_FOUND, API_NOT_FOUND],
            INTERNAL_ERROR,
            || api.describe_api(&request),
        )
        .await?;
        Ok(response.and_then(|r| r.result))
    }

    pub async fn modify_api(&self, request: &ModifyApiRequest) -> ProviderResult<()> {
        let api = self.ctx.client().apigateway();
        retry_call(self.ctx.write_timeout(), &[], || api.modify_api(request)).await?;
        Ok(())
    }

    /// Delete an API; an already deleted API counts as success.
    pub async fn delete_api(&self, service_id: &str, api_id: &str) -> ProviderResult<()> {
        let api = self.ctx.client().apigateway();
        let request = DeleteApiRequest {
            service_id: service_id.to_string(),
            api_id: api_id.to_string(),
        };
        let response = retry_lookup(
            self.ctx.write_timeout(),
            &[SERVICE_NOT_FOUND, API_NOT_FOUND],
            &[],
            || api.delete_api(&request),
        )
        .await?;
        match response {
            Some(response) => require_result("DeleteApi", &response),
            None => Ok(()),
        }
    }

    /// Set the throttling quota of `api_ids` in one environment.
    pub async fn modify_environment_strategy(
        &self,
        service_id: &str,
        environment: &str,
        strategy: i64,
        api_ids: &[String],
    ) -> ProviderResult<()> {
        let api = self.ctx.client().apigateway();
        let request = ModifyApiEnvironmentStrategyRequest {
            service_id: service_id.to_string(),
            strategy,
            environment_name: environment.to_string(),
            api_ids: api_ids.to_vec(),
        };
        let response = retry_call(self.ctx.write_timeout(), &[], || {
            api.modify_api_environment_strategy(&request)
        })
        .await?;
        require_result("ModifyApiEnvironmentStrategy", &response)
    }

    /// Throttling strategies of a service, optionally narrowed to some environments
    /// or one API. A missing service yields an empty list.
    pub async fn describe_environment_strategies(
        &self,
        service_id: &str,
        environment_names: &[String],
        api_id: Option<&str>,
    ) -> ProviderResult<Vec<ApiEnvironmentStrategy>> {
        if service_id.is_empty() {
            return Err(ProviderError::InvalidConfig(
                "service_id must not be empty".to_string(),
            ));
        }
        let api = self.ctx.client().apigateway();
        let timeout = self.ctx.read_timeout();
        let environment_names = (!environment_names.is_empty()).then(|| environment_names.to_vec());
        let environment_names = &environment_names;

        paginate(DEFAULT_PAGE_LIMIT, |offset, limit| async move {
            let request = DescribeApiEnvironmentStrategyRequest {
                service_id: service_id.to_string(),
                environment_names: environment_names.clone(),
                api_id: api_id.map(str::to_string),
                limit,
                offset,
            };
            let response = retry_lookup(timeout, &[SERVICE_NOT_FOUND], INTERNAL_ERROR, || {
                api.describe_api_environment_strategy(&request)
            })
            .await?;
            let result = response.and_then(|r| r.result).unwrap_or_default();
            Ok(Page::new(
                result.api_environment_strategy_set.unwrap_or_default(),
                result.total_count,
            ))
        })
        .await
    }

    /// Every API a plugin is bound to.
    pub async fn describe_plugin_apis(&self, plugin_id: &str) -> ProviderResult<Vec<AttachedApiInfo>> {
        let api = self.ctx.client().apigateway();
        let timeout = self.ctx.read_timeout();
        paginate(DEFAULT_PAGE_LIMIT, |offset, limit| async move {
            let request = DescribePluginApisRequest {
                plugin_id: plugin_id.to_string(),
                limit,
                offset,
            };
            let response = retry_lookup(timeout, &["ResourceNotFound"], &[], || {
                api.describe_plugin_apis(&request)
            })
            .await?;
            let result = response.and_then(|r| r.result).unwrap_or_default();
            Ok(Page::new(result.attached_apis.unwrap_or_default(), result.total_count))
        })
        .await
    }

    /// The binding of a plugin to one API in one environment, if present.
    pub async fn describe_plugin_attachment(
        &self,
        plugin_id: &str,
        service_id: &str,
        environment: &str,
        api_id: &str,
    ) -> ProviderResult<Option<AttachedApiInfo>> {
        let attached = self.describe_plugin_apis(plugin_id).await?;
        Ok(attached.into_iter().find(|a| {
            a.service_id.as_deref() == Some(service_id)
                && a.environment.as_deref() == Some(environment)
                && a.api_id.as_deref() == Some(api_id)
        }))
    }

    pub async fn attach_plugin(
        &self,
        plugin_id: &str,
        service_id: &str,
        environment: &str,
        api_id: &str,
    ) -> ProviderResult<()> {
        let api = self.ctx.client().apigateway();
        let request = AttachPluginRequest {
            plugin_id: plugin_id.to_string(),
            service_id: service_id.to_string(),
            environment_name: environment.to_string(),
            api_ids: vec![api_id.to_string()],
        };
        let response =
            retry_call(self.ctx.write_timeout(), &[], || api.attach_plugin(&request)).await?;
        require_result("AttachPlugin", &response)
    }

    /// Unbind a plugin; a binding that no longer exists counts as success.
    pub async fn detach_plugin(
        &self,
        plugin_id: &str,
        service_id: &str,
        environment: &str,
        api_id: &str,
    ) -> ProviderResult<()> {
        let api = self.ctx.client().apigateway();
        let request = DetachPluginRequest {
            plugin_id: plugin_id.to_string(),
            service_id: service_id.to_string(),
            environment_name: environment.to_string(),
            api_id: api_id.to_string(),
        };
        let response = retry_lookup(
            self.ctx.write_timeout(),
            &["ResourceNotFound"],
            &[],
            || api.detach_plugin(&request),
        )
        .await?;
        match response {
            Some(response) => require_result("DetachPlugin", &response),
            None => Ok(()),
        }
    }
}
