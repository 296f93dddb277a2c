//! `tencentcloud_api_gateway_plugin_attachment`
//!
//! Id: `pluginId#serviceId#environmentName#apiId`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::context::ProviderContext;
use crate::error::ProviderResult;
use crate::id;
use crate::logging::ElapsedGuard;
use crate::resource_data::ResourceData;
use crate::schema::{Attribute, Schema};
use crate::services::ApiGatewayService;
use crate::traits::Resource;

pub const TYPE_NAME: &str = "tencentcloud_api_gateway_plugin_attachment";

#[derive(Debug, Deserialize)]
struct AttachmentConfig {
    plugin_id: String,
    service_id: String,
    environment_name: String,
    api_id: String,
}

#[derive(Debug, Serialize)]
struct AttachmentState {
    plugin_id: String,
    service_id: String,
    environment_name: String,
    api_id: String,
    attached_time: Option<String>,
}

pub struct ApiGatewayPluginAttachment;

#[async_trait]
impl Resource for ApiGatewayPluginAttachment {
    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }

    fn schema(&self) -> Schema {
        Schema::new()
            .attr("plugin_id", Attribute::string().required().force_new().description("Id of the plugin."))
            .attr("service_id", Attribute::string().required().force_new())
            .attr("environment_name", Attribute::string().required().force_new().description("test, prepub or release."))
            .attr("api_id", Attribute::string().required().force_new())
            .attr("attached_time", Attribute::string().computed())
    }

    async fn create(&self, ctx: &ProviderContext, d: &mut ResourceData) -> ProviderResult<()> {
        let _elapsed = ElapsedGuard::new(TYPE_NAME, "create");
        let c: AttachmentConfig = d.decode()?;
        ApiGatewayService::new(ctx)
            .attach_plugin(&c.plugin_id, &c.service_id, &c.environment_name, &c.api_id)
            .await?;
        d.set_id(id::join(&[&c.plugin_id, &c.service_id, &c.environment_name, &c.api_id]));
        self.read(ctx, d).await
    }

    async fn read(&self, ctx: &ProviderContext, d: &mut ResourceData) -> ProviderResult<()> {
        let _elapsed = ElapsedGuard::new(TYPE_NAME, "read");
        let [plugin_id, service_id, environment_name, api_id] = id::split::<4>(d.id(), &[])?;

        let attached = ApiGatewayService::new(ctx)
            .describe_plugin_attachment(&plugin_id, &service_id, &environment_name, &api_id)
            .await?;
        let Some(attached) = attached else {
            log::warn!("[{TYPE_NAME}] Attachment {} not found, removing from state", d.id());
            d.clear_id();
            return Ok(());
        };

        d.set_state(&AttachmentState {
            plugin_id,
            service_id,
            environment_name,
            api_id,
            attached_time: attached.attached_time,
        })
    }

    async fn delete(&self, ctx: &ProviderContext, d: &mut ResourceData) -> ProviderResult<()> {
        let _elapsed = ElapsedGuard::new(TYPE_NAME, "delete");
        let [plugin_id, service_id, environment_name, api_id] = id::split::<4>(d.id(), &[])?;
        ApiGatewayService::new(ctx)
            .detach_plugin(&plugin_id, &service_id, &environment_name, &api_id)
            .await
    }
}
