//! `tencentcloud_sms_template`

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tencentcloud_sdk::services::sms::TemplateSpec;

use super::sms_sign::parse_numeric_id;
use crate::context::ProviderContext;
use crate::error::ProviderResult;
use crate::logging::ElapsedGuard;
use crate::resource_data::ResourceData;
use crate::schema::{Attribute, Schema};
use crate::services::SmsService;
use crate::traits::Resource;

pub const TYPE_NAME: &str = "tencentcloud_sms_template";

const UPDATABLE: [&str; 4] = ["template_name", "template_content", "sms_type", "remark"];

#[derive(Debug, Deserialize)]
struct TemplateConfig {
    template_name: String,
    template_content: String,
    sms_type: i64,
    international: i64,
    remark: Option<String>,
}

impl From<TemplateConfig> for TemplateSpec {
    fn from(c: TemplateConfig) -> Self {
        Self {
            template_name: c.template_name,
            template_content: c.template_content,
            sms_type: c.sms_type,
            international: c.international,
            remark: c.remark,
        }
    }
}

#[derive(Debug, Serialize)]
struct TemplateState {
    template_id: u64,
    template_name: Option<String>,
    international: Option<i64>,
    status_code: Option<i64>,
    review_reply: Option<String>,
}

pub struct SmsTemplate;

#[async_trait]
impl Resource for SmsTemplate {
    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }

    fn schema(&self) -> Schema {
        Schema::new()
            .attr("template_name", Attribute::string().required())
            .attr("template_content", Attribute::string().required().description("Body with `{1}`-style placeholders."))
            .attr("sms_type", Attribute::int().required().description("0 regular, 1 marketing, 2 notification, 3 international."))
            .attr("international", Attribute::int().required().force_new().description("0 for mainland China, 1 for international/HK/MO/TW."))
            .attr("remark", Attribute::string().required())
            .attr("template_id", Attribute::int().computed())
            .attr("status_code", Attribute::int().computed().description("0 approved, 1 pending, -1 rejected."))
            .attr("review_reply", Attribute::string().computed())
    }

    async fn create(&self, ctx: &ProviderContext, d: &mut ResourceData) -> ProviderResult<()> {
        let _elapsed = ElapsedGuard::new(TYPE_NAME, "create");
        let config: TemplateConfig = d.decode()?;
        let template_id = SmsService::new(ctx).add_template(&config.into()).await?;
        log::info!("[{TYPE_NAME}] Submitted template {template_id} for review");
        d.set_id(template_id.to_string());
        self.read(ctx, d).await
    }

    async fn read(&self, ctx: &ProviderContext, d: &mut ResourceData) -> ProviderResult<()> {
        let _elapsed = ElapsedGuard::new(TYPE_NAME, "read");
        let template_id = parse_numeric_id(d.id())?;
        let international = d.get("international").and_then(serde_json::Value::as_i64).unwrap_or(0);
        match SmsService::new(ctx).describe_template(template_id, international).await? {
            Some(status) => d.set_state(&TemplateState {
                template_id,
                template_name: status.template_name,
                international: status.international,
                status_code: status.status_code,
                review_reply: status.review_reply,
            }),
            None => {
                log::warn!("[{TYPE_NAME}] Template {template_id} not found, removing from state");
                d.clear_id();
                Ok(())
            }
        }
    }

    async fn update(&self, ctx: &ProviderContext, d: &mut ResourceData) -> ProviderResult<()> {
        let _elapsed = ElapsedGuard::new(TYPE_NAME, "update");
        if UPDATABLE.iter().any(|k| d.has_change(k)) {
            let template_id = parse_numeric_id(d.id())?;
            let config: TemplateConfig = d.decode()?;
            SmsService::new(ctx).modify_template(template_id, &config.into()).await?;
        }
        self.read(ctx, d).await
    }

    async fn delete(&self, ctx: &ProviderContext, d: &mut ResourceData) -> ProviderResult<()> {
        let _elapsed = ElapsedGuard::new(TYPE_NAME, "delete");
        SmsService::new(ctx).delete_template(parse_numeric_id(d.id())?).await
    }

    fn importable(&self) -> bool {
        false
    }
}
