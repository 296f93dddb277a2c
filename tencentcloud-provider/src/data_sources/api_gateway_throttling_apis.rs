//! `tencentcloud_api_gateway_throttling_apis`

use async_trait::async_trait;
use futures::future::try_join_all;
use serde::{Deserialize, Serialize};
use tencentcloud_sdk::services::apigateway::ApiEnvironmentStrategy;

use super::output::publish;
use crate::context::ProviderContext;
use crate::error::ProviderResult;
use crate::logging::ElapsedGuard;
use crate::resource_data::ResourceData;
use crate::schema::{AttrType, Attribute, Schema};
use crate::services::ApiGatewayService;
use crate::traits::DataSource;

pub const TYPE_NAME: &str = "tencentcloud_api_gateway_throttling_apis";

#[derive(Debug, Deserialize)]
struct Query {
    service_id: Option<String>,
    #[serde(default)]
    environment_names: Vec<String>,
}

#[derive(Debug, Serialize)]
struct StrategyItem {
    environment_name: String,
    quota: i64,
}

#[derive(Debug, Serialize)]
struct ApiItem {
    api_id: Option<String>,
    api_name: Option<String>,
    path: Option<String>,
    method: Option<String>,
    strategy_list: Vec<StrategyItem>,
}

#[derive(Debug, Serialize)]
struct ServiceItem {
    service_id: String,
    api_environment_strategies: Vec<ApiItem>,
}

/// Keep only strategy entries of the requested environments; no filter keeps all.
fn api_item(strategy: ApiEnvironmentStrategy, environments: &[String]) -> ApiItem {
    let strategy_list = strategy
        .environment_strategy_set
        .unwrap_or_default()
        .into_iter()
        .filter_map(|s| Some((s.environment_name?, s.quota.unwrap_or_default())))
        .filter(|(env, _)| environments.is_empty() || environments.contains(env))
        .map(|(environment_name, quota)| StrategyItem {
            environment_name,
            quota,
        })
        .collect();
    ApiItem {
        api_id: strategy.api_id,
        api_name: strategy.api_name,
        path: strategy.path,
        method: strategy.method,
        strategy_list,
    }
}

pub struct ApiGatewayThrottlingApis;

#[async_trait]
impl DataSource for ApiGatewayThrottlingApis {
    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }

    fn schema(&self) -> Schema {
        let strategy = Schema::new()
            .attr("environment_name", Attribute::string().computed())
            .attr("quota", Attribute::int().computed().description("Requests per second."));
        let api = Schema::new()
            .attr("api_id", Attribute::string().computed())
            .attr("api_name", Attribute::string().computed())
            .attr("path", Attribute::string().computed())
            .attr("method", Attribute::string().computed())
            .attr("strategy_list", Attribute::list_of_blocks(strategy).computed());
        let service = Schema::new()
            .attr("service_id", Attribute::string().computed())
            .attr("api_environment_strategies", Attribute::list_of_blocks(api).computed());
        Schema::new()
            .attr("service_id", Attribute::string().optional().description("Service to query; all services when omitted."))
            .attr("environment_names", Attribute::list(AttrType::String).optional().description("Environments to keep: test, prepub or release."))
            .attr("list", Attribute::list_of_blocks(service).computed())
            .with_result_output_file()
    }

    async fn read(&self, ctx: &ProviderContext, d: &mut ResourceData) -> ProviderResult<()> {
        let _elapsed = ElapsedGuard::new(TYPE_NAME, "read");
        let query: Query = d.decode()?;
        let service = ApiGatewayService::new(ctx);

        let service_ids: Vec<String> = match query.service_id {
            Some(id) => vec![id],
            None => service
                .describe_services()
                .await?
                .into_iter()
                .filter_map(|s| s.service_id)
                .collect(),
        };

        let environments = &query.environment_names;
        let service = &service;
        let list = try_join_all(service_ids.into_iter().map(|service_id| async move {
            let strategies = service
                .describe_environment_strategies(&service_id, environments, None)
                .await?;
            ProviderResult::Ok(ServiceItem {
                api_environment_strategies: strategies
                    .into_iter()
                    .map(|s| api_item(s, environments))
                    .collect(),
                service_id,
            })
        }))
        .await?;

        publish(d, "list", &list)
    }
}

#[cfg(test)]
mod tests {
    use tencentcloud_sdk::services::apigateway::EnvironmentStrategy;

    use super::*;

    fn strategy() -> ApiEnvironmentStrategy {
        let env = |name: &str, quota: i64| EnvironmentStrategy {
            environment_name: Some(name.to_string()),
            quota: Some(quota),
        };
        ApiEnvironmentStrategy {
            api_id: Some("api-1".into()),
            api_name: Some("hello".into()),
            path: Some("/hello".into()),
            method: Some("GET".into()),
            environment_strategy_set: Some(vec![env("test", 100), env("release", -1)]),
        }
    }

    #[test]
    fn filters_environments_client_side() {
        let item = api_item(strategy(), &["release".to_string()]);
        assert_eq!(item.strategy_list.len(), 1);
        assert_eq!(item.strategy_list[0].environment_name, "release");
        assert_eq!(item.strategy_list[0].quota, -1);
    }

    #[test]
    fn no_filter_keeps_everything() {
        let item = api_item(strategy(), &[]);
        assert_eq!(item.strategy_list.len(), 2);
        assert_eq!(item.api_id.as_deref(), Some("api-1"));
    }
}
