//! `tencentcloud_mps_content_review_templates`

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tencentcloud_sdk::services::mps::ContentReviewTemplateItem;

use super::output::publish;
use crate::context::ProviderContext;
use crate::error::ProviderResult;
use crate::logging::ElapsedGuard;
use crate::resource_data::ResourceData;
use crate::resources::mps_content_review_template::{block_from_sdk, configure_schema, ConfigureBlock};
use crate::schema::{AttrType, Attribute, Schema};
use crate::services::MpsService;
use crate::traits::DataSource;

pub const TYPE_NAME: &str = "tencentcloud_mps_content_review_templates";

#[derive(Debug, Deserialize)]
struct Query {
    #[serde(default)]
    definitions: Vec<i64>,
    #[serde(rename = "type")]
    template_type: Option<String>,
}

#[derive(Debug, Serialize)]
struct TemplateItem {
    definition: Option<i64>,
    name: Option<String>,
    comment: Option<String>,
    #[serde(rename = "type")]
    template_type: Option<String>,
    porn_configure: Vec<ConfigureBlock>,
    terrorism_configure: Vec<ConfigureBlock>,
    political_configure: Vec<ConfigureBlock>,
    prohibited_configure: Vec<ConfigureBlock>,
    create_time: Option<String>,
    update_time: Option<String>,
}

impl From<ContentReviewTemplateItem> for TemplateItem {
    fn from(t: ContentReviewTemplateItem) -> Self {
        Self {
            definition: t.definition,
            name: t.name,
            comment: t.comment,
            template_type: t.template_type,
            porn_configure: block_from_sdk(t.porn_configure),
            terrorism_configure: block_from_sdk(t.terrorism_configure),
            political_configure: block_from_sdk(t.political_configure),
            prohibited_configure: block_from_sdk(t.prohibited_configure),
            create_time: t.create_time,
            update_time: t.update_time,
        }
    }
}

pub struct MpsContentReviewTemplates;

#[async_trait]
impl DataSource for MpsContentReviewTemplates {
    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }

    fn schema(&self) -> Schema {
        let template = Schema::new()
            .attr("definition", Attribute::int().computed())
            .attr("name", Attribute::string().computed())
            .attr("comment", Attribute::string().computed())
            .attr("type", Attribute::string().computed())
            .attr("porn_configure", Attribute::block(configure_schema()).computed())
            .attr("terrorism_configure", Attribute::block(configure_schema()).computed())
            .attr("political_configure", Attribute::block(configure_schema()).computed())
            .attr("prohibited_configure", Attribute::block(configure_schema()).computed())
            .attr("create_time", Attribute::string().computed())
            .attr("update_time", Attribute::string().computed());
        Schema::new()
            .attr("definitions", Attribute::list(AttrType::Int).optional().description("Template definitions to fetch."))
            .attr("type", Attribute::string().optional().description("Preset or Custom."))
            .attr("template_list", Attribute::list_of_blocks(template).computed())
            .with_result_output_file()
    }

    async fn read(&self, ctx: &ProviderContext, d: &mut ResourceData) -> ProviderResult<()> {
        let _elapsed = ElapsedGuard::new(TYPE_NAME, "read");
        let query: Query = d.decode()?;
        let list: Vec<TemplateItem> = MpsService::new(ctx)
            .describe_templates(&query.definitions, query.template_type.as_deref())
            .await?
            .into_iter()
            .map(TemplateItem::from)
            .collect();
        publish(d, "template_list", &list)
    }
}
