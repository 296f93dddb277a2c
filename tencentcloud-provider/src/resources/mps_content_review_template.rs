//! `tencentcloud_mps_content_review_template`
//!
//! Id: the template definition number.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tencentcloud_sdk::services::mps::{
    ContentReviewTemplateItem, ReviewConfigure, ReviewInfo, TemplateSpec,
};

use crate::context::ProviderContext;
use crate::error::{ProviderError, ProviderResult};
use crate::logging::ElapsedGuard;
use crate::resource_data::ResourceData;
use crate::schema::{AttrType, Attribute, Schema};
use crate::services::MpsService;
use crate::traits::Resource;

pub const TYPE_NAME: &str = "tencentcloud_mps_content_review_template";

const CATEGORIES: [&str; 4] = [
    "porn_configure",
    "terrorism_configure",
    "political_configure",
    "prohibited_configure",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct ReviewInfoBlock {
    switch: String,
    #[serde(default)]
    label_set: Vec<String>,
    block_confidence: Option<i64>,
    review_confidence: Option<i64>,
}

impl From<&ReviewInfoBlock> for ReviewInfo {
    fn from(b: &ReviewInfoBlock) -> Self {
        Self {
            switch: b.switch.clone(),
            label_set: (!b.label_set.is_empty()).then(|| b.label_set.clone()),
            block_confidence: b.block_confidence,
            review_confidence: b.review_confidence,
        }
    }
}

impl From<ReviewInfo> for ReviewInfoBlock {
    fn from(i: ReviewInfo) -> Self {
        Self {
            switch: i.switch,
            label_set: i.label_set.unwrap_or_default(),
            block_confidence: i.block_confidence,
            review_confidence: i.review_confidence,
        }
    }
}

/// One review category; every channel is a zero-or-one element list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub(crate) struct ConfigureBlock {
    #[serde(default)]
    img_review_info: Vec<ReviewInfoBlock>,
    #[serde(default)]
    asr_review_info: Vec<ReviewInfoBlock>,
    #[serde(default)]
    ocr_review_info: Vec<ReviewInfoBlock>,
}

impl ConfigureBlock {
    fn to_sdk(&self) -> ReviewConfigure {
        ReviewConfigure {
            img_review_info: self.img_review_info.first().map(ReviewInfo::from),
            asr_review_info: self.asr_review_info.first().map(ReviewInfo::from),
            ocr_review_info: self.ocr_review_info.first().map(ReviewInfo::from),
        }
    }

    fn from_sdk(c: ReviewConfigure) -> Self {
        let one = |i: Option<ReviewInfo>| -> Vec<ReviewInfoBlock> {
            i.map(ReviewInfoBlock::from).into_iter().collect()
        };
        Self {
            img_review_info: one(c.img_review_info),
            asr_review_info: one(c.asr_review_info),
            ocr_review_info: one(c.ocr_review_info),
        }
    }
}

fn block_to_sdk(blocks: &[ConfigureBlock]) -> Option<ReviewConfigure> {
    blocks.first().map(ConfigureBlock::to_sdk)
}

pub(crate) fn block_from_sdk(c: Option<ReviewConfigure>) -> Vec<ConfigureBlock> {
    c.map(ConfigureBlock::from_sdk).into_iter().collect()
}

#[derive(Debug, Deserialize)]
struct TemplateConfig {
    name: Option<String>,
    comment: Option<String>,
    #[serde(default)]
    porn_configure: Vec<ConfigureBlock>,
    #[serde(default)]
    terrorism_configure: Vec<ConfigureBlock>,
    #[serde(default)]
    political_configure: Vec<ConfigureBlock>,
    #[serde(default)]
    prohibited_configure: Vec<ConfigureBlock>,
}

impl From<&TemplateConfig> for TemplateSpec {
    fn from(c: &TemplateConfig) -> Self {
        Self {
            name: c.name.clone(),
            comment: c.comment.clone(),
            porn_configure: block_to_sdk(&c.porn_configure),
            terrorism_configure: block_to_sdk(&c.terrorism_configure),
            political_configure: block_to_sdk(&c.political_configure),
            prohibited_configure: block_to_sdk(&c.prohibited_configure),
        }
    }
}

#[derive(Debug, Serialize)]
struct TemplateState {
    name: Option<String>,
    comment: Option<String>,
    porn_configure: Vec<ConfigureBlock>,
    terrorism_configure: Vec<ConfigureBlock>,
    political_configure: Vec<ConfigureBlock>,
    prohibited_configure: Vec<ConfigureBlock>,
}

impl From<ContentReviewTemplateItem> for TemplateState {
    fn from(t: ContentReviewTemplateItem) -> Self {
        Self {
            name: t.name,
            comment: t.comment,
            porn_configure: block_from_sdk(t.porn_configure),
            terrorism_configure: block_from_sdk(t.terrorism_configure),
            political_configure: block_from_sdk(t.political_configure),
            prohibited_configure: block_from_sdk(t.prohibited_configure),
        }
    }
}

pub(crate) fn review_info_schema() -> Schema {
    Schema::new()
        .attr("switch", Attribute::string().required().description("ON or OFF."))
        .attr("label_set", Attribute::list(AttrType::String).optional())
        .attr("block_confidence", Attribute::int().optional().description("Score at or above which content is blocked, 0-100."))
        .attr("review_confidence", Attribute::int().optional().description("Score at or above which content goes to manual review, 0-100."))
}

pub(crate) fn configure_schema() -> Schema {
    Schema::new()
        .attr("img_review_info", Attribute::block(review_info_schema()).optional())
        .attr("asr_review_info", Attribute::block(review_info_schema()).optional())
        .attr("ocr_review_info", Attribute::block(review_info_schema()).optional())
}

fn parse_definition(raw: &str) -> ProviderResult<i64> {
    raw.parse()
        .map_err(|_| ProviderError::invalid_id(raw, "expected a numeric template definition"))
}

pub struct MpsContentReviewTemplate;

#[async_trait]
impl Resource for MpsContentReviewTemplate {
    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }

    fn schema(&self) -> Schema {
        let mut schema = Schema::new()
            .attr("name", Attribute::string().optional().description("At most 64 characters."))
            .attr("comment", Attribute::string().optional());
        for category in CATEGORIES {
            schema = schema.attr(category, Attribute::block(configure_schema()).optional());
        }
        schema
    }

    async fn create(&self, ctx: &ProviderContext, d: &mut ResourceData) -> ProviderResult<()> {
        let _elapsed = ElapsedGuard::new(TYPE_NAME, "create");
        let config: TemplateConfig = d.decode()?;
        let definition = MpsService::new(ctx).create_template(&(&config).into()).await?;
        log::info!("[{TYPE_NAME}] Created template {definition}");
        d.set_id(definition.to_string());
        self.read(ctx, d).await
    }

    async fn read(&self, ctx: &ProviderContext, d: &mut ResourceData) -> ProviderResult<()> {
        let _elapsed = ElapsedGuard::new(TYPE_NAME, "read");
        let definition = parse_definition(d.id())?;
        match MpsService::new(ctx).describe_template(definition).await? {
            Some(template) => d.set_state(&TemplateState::from(template)),
            None => {
                log::warn!("[{TYPE_NAME}] Template {definition} not found, removing from state");
                d.clear_id();
                Ok(())
            }
        }
    }

    async fn update(&self, ctx: &ProviderContext, d: &mut ResourceData) -> ProviderResult<()> {
        let _elapsed = ElapsedGuard::new(TYPE_NAME, "update");
        let changed = ["name", "comment"]
            .into_iter()
            .chain(CATEGORIES)
            .any(|k| d.has_change(k));
        if changed {
            let definition = parse_definition(d.id())?;
            let config: TemplateConfig = d.decode()?;
            MpsService::new(ctx)
                .modify_template(definition, &(&config).into())
                .await?;
        }
        self.read(ctx, d).await
    }

    async fn delete(&self, ctx: &ProviderContext, d: &mut ResourceData) -> ProviderResult<()> {
        let _elapsed = ElapsedGuard::new(TYPE_NAME, "delete");
        MpsService::new(ctx).delete_template(parse_definition(d.id())?).await
    }
}
